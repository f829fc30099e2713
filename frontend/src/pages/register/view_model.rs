use super::utils::RegisterFormState;
use crate::api::{ApiError, LoginRequest};
use crate::state::{
    auth::{use_auth, AuthContext},
    upgrade::{complete_authentication, navigate_to, PostAuthDestination},
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub register_action: Action<LoginRequest, Result<PostAuthDestination, ApiError>>,
}

impl RegisterViewModel {
    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.register_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

/// Registration logs the new account straight in, then runs the same handshake as login.
pub async fn register_and_upgrade(
    auth: AuthContext,
    request: LoginRequest,
) -> Result<PostAuthDestination, ApiError> {
    let api = auth.api();
    let response = api.register(&request).await?;
    log::info!("registered {}", request.username);
    complete_authentication(&api, &auth.store(), auth.state, &response).await
}

pub fn use_register_view_model() -> RegisterViewModel {
    let auth = use_auth();
    let form = RegisterFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let register_action = create_action(move |request: &LoginRequest| {
        let request = request.clone();
        async move { register_and_upgrade(auth, request).await }
    });

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(destination) => {
                    error.set(None);
                    form.clear_secrets();
                    navigate_to(destination);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    RegisterViewModel {
        form,
        error,
        register_action,
    }
}
