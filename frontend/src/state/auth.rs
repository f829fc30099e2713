use crate::{
    api::{ApiClient, ApiError, UserIdentity},
    state::token::TokenStore,
};
use leptos::*;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Idle,
    Resolving,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserIdentity>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: AuthPhase,
    generation: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
            error: None,
            phase: AuthPhase::Idle,
            generation: 0,
        }
    }
}

/// Issued per profile fetch; only the latest ticket may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTicket {
    pub id: u64,
    pub token: String,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(UserIdentity::is_admin)
    }

    /// Token change: invalidates any fetch in flight and starts a new one when a token is present.
    pub fn begin(&mut self, token: Option<String>) -> Option<ProfileTicket> {
        self.generation += 1;
        self.token = token.clone();
        self.error = None;
        match token {
            Some(token) => {
                self.phase = AuthPhase::Resolving;
                self.loading = true;
                Some(ProfileTicket {
                    id: self.generation,
                    token,
                })
            }
            None => {
                self.phase = AuthPhase::Unauthenticated;
                self.user = None;
                self.loading = false;
                None
            }
        }
    }

    /// Empty first lookup with a re-check pending: stays loading so guards wait.
    /// Returns the generation the re-check must still match.
    pub fn hold_for_recheck(&mut self) -> u64 {
        self.generation += 1;
        self.token = None;
        self.user = None;
        self.error = None;
        self.phase = AuthPhase::Resolving;
        self.loading = true;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Returns false when the ticket is stale and the outcome was discarded.
    pub fn commit(
        &mut self,
        ticket: &ProfileTicket,
        outcome: Result<UserIdentity, ApiError>,
    ) -> bool {
        if ticket.id != self.generation {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(user) => {
                self.user = Some(user);
                self.error = None;
                self.phase = AuthPhase::Authenticated;
            }
            Err(err) => {
                self.user = None;
                self.error = Some(err.error);
                self.phase = AuthPhase::Unauthenticated;
            }
        }
        true
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    api: StoredValue<ApiClient>,
    store: StoredValue<TokenStore>,
}

impl AuthContext {
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        Self {
            state: create_rw_signal(AuthState::default()),
            api: store_value(api),
            store: store_value(store),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn store(&self) -> TokenStore {
        self.store.get_value()
    }

    /// Pushes a token obtained in this tab and refetches the profile.
    pub fn set_token(&self, token: Option<String>) {
        let ctx = *self;
        spawn_local(async move {
            let api = ctx.api();
            let store = ctx.store();
            apply_token(&api, &store, ctx.state, token).await;
        });
    }

    pub async fn refresh(&self) -> Option<UserIdentity> {
        let token = self.state.with_untracked(|s| s.token.clone());
        apply_token(&self.api(), &self.store(), self.state, token).await
    }

    pub fn logout(&self) {
        logout(&self.store(), self.state);
    }
}

/// Starts a profile fetch for `token` and commits it unless a newer token arrived meanwhile.
pub async fn apply_token(
    api: &ApiClient,
    store: &TokenStore,
    state: RwSignal<AuthState>,
    token: Option<String>,
) -> Option<UserIdentity> {
    let ticket = state.try_update(|s| s.begin(token)).flatten()?;
    let outcome = api.get_me(&ticket.token).await;
    if let Err(err) = &outcome {
        log::warn!("profile fetch failed: {}", err);
    }
    commit_profile(store, state, &ticket, outcome)
}

pub fn commit_profile(
    store: &TokenStore,
    state: RwSignal<AuthState>,
    ticket: &ProfileTicket,
    outcome: Result<UserIdentity, ApiError>,
) -> Option<UserIdentity> {
    let user = outcome.as_ref().ok().cloned();
    let committed = state
        .try_update(|s| s.commit(ticket, outcome))
        .unwrap_or(false);
    if !committed {
        log::debug!("discarded stale profile response (ticket {})", ticket.id);
        return None;
    }
    if user.is_some() {
        store.normalize(&ticket.token);
    }
    user
}

/// Mount-time discovery. When the first lookup is empty and `recheck` is given,
/// the state stays `Resolving` until `recheck` completes and storage is read again.
/// A token pushed in the meantime wins over the re-check.
pub async fn discover_with_recheck<F>(
    api: &ApiClient,
    store: &TokenStore,
    state: RwSignal<AuthState>,
    recheck: Option<F>,
) where
    F: Future<Output = ()>,
{
    if let Some(token) = store.resolve() {
        apply_token(api, store, state, Some(token)).await;
        return;
    }
    let Some(recheck) = recheck else {
        apply_token(api, store, state, None).await;
        return;
    };
    let Some(held) = state.try_update(AuthState::hold_for_recheck) else {
        return;
    };
    recheck.await;
    if !state.with_untracked(|s| s.is_current(held)) {
        log::debug!("token arrived before the re-check");
        return;
    }
    let token = store.resolve();
    if token.is_some() {
        log::info!("token found on re-check");
    }
    apply_token(api, store, state, token).await;
}

/// Re-resolves after another tab touched storage; returns true when the token changed.
pub async fn resync_from_storage(
    api: &ApiClient,
    store: &TokenStore,
    state: RwSignal<AuthState>,
) -> bool {
    let resolved = store.resolve();
    let current = state.with_untracked(|s| s.token.clone());
    if resolved == current {
        return false;
    }
    apply_token(api, store, state, resolved).await;
    true
}

pub fn logout(store: &TokenStore, state: RwSignal<AuthState>) {
    store.clear();
    state.update(|s| {
        s.begin(None);
    });
}

#[cfg(target_arch = "wasm32")]
fn watch_for_tokens(ctx: AuthContext) {
    let recheck = crate::config::current()
        .token_rediscovery_delay()
        .map(|delay| {
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::future::TimeoutFuture::new(millis)
        });
    spawn_local(async move {
        discover_with_recheck(&ctx.api(), &ctx.store(), ctx.state, recheck).await;
    });

    // Another tab logging in or out.
    let handle = window_event_listener_untyped("storage", move |_| {
        spawn_local(async move {
            resync_from_storage(&ctx.api(), &ctx.store(), ctx.state).await;
        });
    });
    on_cleanup(move || handle.remove());
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let ctx = AuthContext::new(api, TokenStore::browser());
    provide_context(ctx);
    #[cfg(target_arch = "wasm32")]
    watch_for_tokens(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .unwrap_or_else(|| AuthContext::new(ApiClient::new(), TokenStore::in_memory()))
}
