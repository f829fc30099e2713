use crate::{
    api::{ApiClient, ApiError, ThreadSummary},
    components::layout::hard_redirect,
    state::auth::{use_auth, AuthContext},
};
use leptos::*;

type ThreadKey = (Option<String>, Option<i64>);

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub auth: AuthContext,
    pub threads_resource: Resource<ThreadKey, Result<Vec<ThreadSummary>, ApiError>>,
}

impl DashboardViewModel {
    pub fn username(&self) -> String {
        self.auth
            .state
            .with(|s| s.user.as_ref().map(|u| u.username.clone()))
            .unwrap_or_default()
    }

    pub fn logout(&self) {
        self.auth.logout();
        hard_redirect("/login");
    }
}

pub async fn fetch_threads(api: &ApiClient, key: ThreadKey) -> Result<Vec<ThreadSummary>, ApiError> {
    match key {
        (Some(token), Some(user_id)) => {
            let mut threads = api.list_user_threads(&token, user_id).await?;
            threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(threads)
        }
        _ => Ok(Vec::new()),
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let auth = use_auth();
    let api = auth.api();
    let threads_resource = create_resource(
        move || {
            auth.state
                .with(|s| (s.token.clone(), s.user.as_ref().map(|u| u.user_id)))
        },
        move |key| {
            let api = api.clone();
            async move { fetch_threads(&api, key).await }
        },
    );
    DashboardViewModel {
        auth,
        threads_resource,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, regular_user};
    use crate::test_support::ssr::with_resources_suppressed;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn threads_are_listed_newest_first() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/threads/user/5")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(json!([
                { "id": 1, "user_id": 5, "created_at": "2025-01-01T10:00:00" },
                { "id": 2, "user_id": 5, "created_at": "2025-03-01T10:00:00" }
            ]));
        });

        let api = ApiClient::new_with_base_url(server.url("/api"));
        let threads = fetch_threads(&api, (Some("tok".into()), Some(5))).await.unwrap();
        assert_eq!(threads.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn missing_identity_skips_request() {
        let api = ApiClient::new_with_base_url("http://127.0.0.1:9");
        let threads = fetch_threads(&api, (Some("tok".into()), None)).await.unwrap();
        assert!(threads.is_empty());
    }

    #[test]
    fn logout_clears_session() {
        with_resources_suppressed(|| {
            let ctx = provide_auth(Some(regular_user()), Some("tok".into()));
            ctx.store().set("tok");
            let vm = use_dashboard_view_model();
            assert_eq!(vm.username(), "ada@example.com");

            vm.logout();

            assert!(!ctx.state.get_untracked().is_authenticated());
            assert_eq!(ctx.store().resolve(), None);
        });
    }
}
