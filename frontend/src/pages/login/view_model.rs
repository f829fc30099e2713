use super::utils::LoginFormState;
use crate::api::{ApiError, LoginRequest};
use crate::state::{
    auth::{use_auth, AuthContext},
    upgrade::{complete_authentication, navigate_to, PostAuthDestination},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<PostAuthDestination, ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub async fn login_and_upgrade(
    auth: AuthContext,
    request: LoginRequest,
) -> Result<PostAuthDestination, ApiError> {
    let api = auth.api();
    let response = api.login(&request).await?;
    complete_authentication(&api, &auth.store(), auth.state, &response).await
}

pub fn use_login_view_model() -> LoginViewModel {
    let auth = use_auth();
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = create_action(move |request: &LoginRequest| {
        let request = request.clone();
        async move { login_and_upgrade(auth, request).await }
    });

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(destination) => {
                    error.set(None);
                    form.password.set(String::new());
                    navigate_to(destination);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::state::{guest::mark_guest_session, token::TokenStore};
    use crate::test_support::ssr::with_runtime;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get_untracked().is_none());
            assert!(vm.form.username.get_untracked().is_empty());
        });
    }

    #[test]
    fn submit_with_empty_form_sets_validation_error() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.submit();
            let err = vm.error.get_untracked().unwrap();
            assert_eq!(err.code, "VALIDATION_ERROR");
        });
    }

    #[tokio::test]
    async fn login_with_guest_marker_routes_to_upgraded_thread() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .json_body(json!({ "access_token": "fresh", "user_id": 5 }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(200)
                .json_body(json!({ "user_id": 5, "username": "ada@example.com" }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/guest/upgrade");
            then.status(200)
                .json_body(json!({ "upgraded": true, "thread_id": 11 }));
        });

        let runtime = create_runtime();
        let store = TokenStore::in_memory();
        mark_guest_session(&store);
        let auth = AuthContext::new(ApiClient::new_with_base_url(server.url("/api")), store);

        let destination = login_and_upgrade(
            auth,
            LoginRequest {
                username: "ada@example.com".into(),
                password: "Analytical1".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(destination, PostAuthDestination::Thread { thread_id: 11 });
        assert!(auth.state.get_untracked().is_authenticated());
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_login_surfaces_backend_detail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401)
                .json_body(json!({ "detail": "Invalid username or password" }));
        });

        let runtime = create_runtime();
        let auth = AuthContext::new(
            ApiClient::new_with_base_url(server.url("/api")),
            TokenStore::in_memory(),
        );
        let err = login_and_upgrade(
            auth,
            LoginRequest {
                username: "ada@example.com".into(),
                password: "wrong".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.error, "Invalid username or password");
        assert_eq!(auth.store().resolve(), None);
        runtime.dispose();
    }
}
