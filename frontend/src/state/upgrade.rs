use crate::{
    api::{ApiClient, ApiError, AuthResponse, UpgradeResult},
    state::{
        auth::{apply_token, AuthState},
        guest::{clear_guest_session, has_guest_session},
        token::TokenStore,
    },
};
use leptos::*;
use leptos_router::NavigateOptions;

/// Navigation-state key telling the thread view it was reached from a guest upgrade.
pub const FROM_GUEST_UPGRADE_KEY: &str = "fromGuestUpgrade";

const PROFILE_ERROR_MESSAGE: &str = "Signed in, but your profile could not be loaded. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAuthDestination {
    Thread { thread_id: i64 },
    Dashboard,
}

impl PostAuthDestination {
    pub fn path(&self) -> String {
        match self {
            PostAuthDestination::Thread { thread_id } => format!("/thread/{}", thread_id),
            PostAuthDestination::Dashboard => "/dashboard".to_string(),
        }
    }

    pub fn from_guest_upgrade(&self) -> bool {
        matches!(self, PostAuthDestination::Thread { .. })
    }

    pub fn navigate_options(&self) -> NavigateOptions {
        if !self.from_guest_upgrade() {
            return NavigateOptions::default();
        }
        NavigateOptions {
            state: upgrade_state(),
            ..Default::default()
        }
    }
}

impl From<UpgradeResult> for PostAuthDestination {
    fn from(result: UpgradeResult) -> Self {
        match result {
            UpgradeResult::Upgraded { thread_id, .. } => PostAuthDestination::Thread { thread_id },
            UpgradeResult::NotUpgraded => PostAuthDestination::Dashboard,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn upgrade_state() -> leptos_router::State {
    let object = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &object,
        &FROM_GUEST_UPGRADE_KEY.into(),
        &wasm_bindgen::JsValue::TRUE,
    );
    leptos_router::State(Some(object.into()))
}

#[cfg(not(target_arch = "wasm32"))]
fn upgrade_state() -> leptos_router::State {
    leptos_router::State(None)
}

pub fn came_from_guest_upgrade(state: &leptos_router::State) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        state
            .0
            .as_ref()
            .and_then(|value| js_sys::Reflect::get(value, &FROM_GUEST_UPGRADE_KEY.into()).ok())
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = state;
        false
    }
}

/// Must run under a `Router` owner, e.g. inside an effect created by a routed view.
pub fn navigate_to(destination: PostAuthDestination) {
    let navigate = leptos_router::use_navigate();
    navigate(&destination.path(), destination.navigate_options());
}

/// Persists a fresh token, refreshes the profile and tries to carry the guest
/// conversation over. Only a failed profile fetch is an error; it leaves the
/// guest marker in place so the next sign-in can still upgrade. Every upgrade
/// problem lands on the dashboard.
pub async fn complete_authentication(
    api: &ApiClient,
    store: &TokenStore,
    state: RwSignal<AuthState>,
    response: &AuthResponse,
) -> Result<PostAuthDestination, ApiError> {
    let token = response.access_token.clone();
    store.set(&token);
    if apply_token(api, store, state, Some(token.clone())).await.is_none() {
        let message = state
            .with_untracked(|s| s.error.clone())
            .unwrap_or_else(|| PROFILE_ERROR_MESSAGE.to_string());
        return Err(ApiError::profile(message));
    }

    if !has_guest_session(store) {
        return Ok(PostAuthDestination::Dashboard);
    }
    let outcome = api.upgrade_guest_session(&token).await;
    clear_guest_session(store);
    match outcome {
        Ok(result) => {
            if let UpgradeResult::Upgraded {
                thread_id,
                transferred_messages,
            } = result
            {
                log::info!(
                    "guest conversation moved to thread {} ({:?} messages)",
                    thread_id,
                    transferred_messages
                );
            }
            Ok(result.into())
        }
        Err(err) => {
            log::warn!("guest upgrade skipped: {}", err);
            Ok(PostAuthDestination::Dashboard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_destination_carries_upgrade_flag() {
        let destination = PostAuthDestination::from(UpgradeResult::Upgraded {
            thread_id: 42,
            transferred_messages: Some(6),
        });
        assert_eq!(destination.path(), "/thread/42");
        assert!(destination.from_guest_upgrade());
    }

    #[test]
    fn not_upgraded_goes_to_dashboard() {
        let destination = PostAuthDestination::from(UpgradeResult::NotUpgraded);
        assert_eq!(destination.path(), "/dashboard");
        assert!(!destination.from_guest_upgrade());
    }
}
