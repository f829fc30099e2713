#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiClient, UserIdentity};
    use crate::state::auth::{AuthContext, AuthState};
    use crate::state::token::TokenStore;
    use leptos::*;

    pub fn admin_user() -> UserIdentity {
        UserIdentity {
            user_id: 1,
            username: "root@example.com".into(),
            role: "admin".into(),
        }
    }

    pub fn regular_user() -> UserIdentity {
        UserIdentity {
            user_id: 5,
            username: "ada@example.com".into(),
            role: "user".into(),
        }
    }

    /// Token without user leaves the state resolving.
    pub fn state_with(user: Option<UserIdentity>, token: Option<String>) -> AuthState {
        let mut state = AuthState::default();
        if let Some(ticket) = state.begin(token) {
            if let Some(user) = user {
                state.commit(&ticket, Ok(user));
            }
        }
        state
    }

    pub fn authenticated_state(user: UserIdentity, token: &str) -> AuthState {
        state_with(Some(user), Some(token.to_string()))
    }

    pub fn provide_auth(user: Option<UserIdentity>, token: Option<String>) -> AuthContext {
        let ctx = AuthContext::new(
            ApiClient::new_with_base_url("http://localhost:0"),
            TokenStore::in_memory(),
        );
        ctx.state.set(state_with(user, token));
        provide_context(ctx);
        ctx
    }
}
