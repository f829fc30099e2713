use crate::{
    components::layout::{hard_redirect, LoadingSpinner},
    state::{
        auth::{use_auth, AuthState},
        token::admin_token_is_valid,
    },
};
use chrono::Utc;
use leptos::*;

/// Where unauthenticated visitors end up: the public landing page with guest chat.
pub const GUEST_FALLBACK_PATH: &str = "/";

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = create_memo(move |_| auth.state.get().is_authenticated());
    let is_loading = create_memo(move |_| auth.state.get().loading);
    create_effect(move |_| {
        let state = auth.state.get();
        if state.loading || state.is_authenticated() {
            return;
        }
        hard_redirect(GUEST_FALLBACK_PATH);
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = create_memo(move |_| auth.state.get().is_authenticated());
    let is_loading = create_memo(move |_| auth.state.get().loading);
    let is_admin = create_memo(move |_| has_admin_scope(&auth.state.get()));
    create_effect(move |_| {
        let state = auth.state.get();
        if state.loading {
            return;
        }
        let target = if !state.is_authenticated() {
            GUEST_FALLBACK_PATH
        } else if !has_admin_scope(&state) {
            "/dashboard"
        } else {
            return;
        };
        hard_redirect(target);
    });
    view! {
        <Show
            when=move || {
                should_render_admin_children(is_authenticated.get(), is_loading.get(), is_admin.get())
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn has_admin_scope(state: &AuthState) -> bool {
    state.is_admin()
        && state
            .token
            .as_deref()
            .is_some_and(|token| admin_token_is_valid(token, Utc::now()))
}

fn should_render_admin_children(is_authenticated: bool, is_loading: bool, is_admin: bool) -> bool {
    is_authenticated && is_admin && !is_loading
}
