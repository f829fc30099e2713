use crate::{
    components::layout::Layout,
    state::{auth::use_auth, token::token_expiry},
};
use chrono::{DateTime, Utc};
use leptos::*;

pub fn session_expiry_label(expiry: Option<DateTime<Utc>>) -> String {
    match expiry {
        Some(at) => format!("Admin session valid until {} UTC", at.format("%Y-%m-%d %H:%M")),
        None => "Admin session expiry unknown".to_string(),
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let username = move || {
        auth.state
            .with(|s| s.user.as_ref().map(|u| u.username.clone()))
            .unwrap_or_default()
    };
    let expiry = move || {
        session_expiry_label(auth.state.with(|s| s.token.as_deref().and_then(token_expiry)))
    };
    view! {
        <Layout>
            <div class="space-y-2">
                <h1 class="text-2xl font-bold text-fg">"Administration"</h1>
                <p class="text-sm text-fg-muted">{move || format!("Signed in as {}", username())}</p>
                <p class="text-xs text-fg-muted">{expiry}</p>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_label_formats_timestamp() {
        let at = DateTime::<Utc>::from_timestamp(1_762_344_000, 0);
        assert_eq!(
            session_expiry_label(at),
            "Admin session valid until 2025-11-05 12:00 UTC"
        );
        assert_eq!(session_expiry_label(None), "Admin session expiry unknown");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::token::jwt_with_claims;
    use crate::test_support::helpers::{admin_user, provide_auth};
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn admin_page_shows_identity_and_expiry() {
        let token = jwt_with_claims(json!({ "sub": "root", "exp": 1_762_344_000 }));
        let html = render_to_string(move || {
            provide_auth(Some(admin_user()), Some(token));
            view! { <AdminPage /> }
        });
        assert!(html.contains("Signed in as root@example.com"));
        assert!(html.contains("2025-11-05 12:00"));
    }
}
