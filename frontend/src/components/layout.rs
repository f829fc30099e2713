use crate::state::auth::use_auth;
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = create_memo(move |_| auth.state.get().is_authenticated());
    let is_admin = create_memo(move |_| auth.state.get().is_admin());
    let username = move || {
        auth.state
            .get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        auth.logout();
        hard_redirect("/login");
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="text-xl font-semibold text-fg">"Places in Time"</a>
                    <nav class="flex items-center space-x-4">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=|| view! {
                                <a href="/login" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                    "Log in"
                                </a>
                                <a href="/register" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                    "Register"
                                </a>
                            }
                        >
                            <a href="/dashboard" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                "Dashboard"
                            </a>
                            <Show when=move || is_admin.get()>
                                <a href="/admin" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                    "Admin"
                                </a>
                            </Show>
                            <span class="text-sm text-fg-muted">{username}</span>
                            <button
                                on:click=on_logout
                                class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium"
                            >
                                "Log out"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-5xl mx-auto py-6 px-4 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Full page load, so every view re-reads storage from scratch.
pub fn hard_redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("redirect to {} skipped outside the browser", path);
    }
}
