use crate::{
    api::ThreadSummary,
    components::layout::ErrorMessage,
    pages::{
        guest::components::{composer::Composer, transcript::Transcript},
        thread::view_model::use_thread_view_model,
    },
};
use leptos::*;

/// After a guest upgrade the browser history leads back into the guest chat,
/// so the control points at the dashboard instead.
#[component]
pub fn BackControl(#[prop(into)] from_guest_upgrade: MaybeSignal<bool>) -> impl IntoView {
    view! {
        <Show
            when=move || from_guest_upgrade.get()
            fallback=|| view! {
                <button
                    type="button"
                    class="text-sm text-action-primary-bg hover:underline"
                    on:click=move |_| history_back()
                >
                    "Back"
                </button>
            }
        >
            <a href="/dashboard" class="text-sm text-action-primary-bg hover:underline">
                "Back to dashboard"
            </a>
        </Show>
    }
}

#[component]
pub fn ThreadConversation(thread: ThreadSummary) -> impl IntoView {
    let title = thread.display_title();
    let figure_name = thread
        .figure_slug
        .clone()
        .unwrap_or_else(|| "Assistant".to_string());
    let subtitle = thread.figure_slug.clone().map(|slug| format!("With {}", slug));
    let vm = use_thread_view_model(thread);
    let chat = vm.chat;
    let messages = Signal::derive(move || chat.with(|c| c.transcript.clone()));
    let sending = Signal::derive(move || chat.with(|c| c.sending));
    let error = Signal::derive(move || chat.with(|c| c.error.clone()));

    view! {
        <div class="space-y-4">
            <div class="space-y-1">
                <h1 class="text-2xl font-bold text-fg">{title}</h1>
                {subtitle.map(|text| view! { <p class="text-sm text-fg-muted">{text}</p> })}
            </div>
            <Transcript messages=messages figure_name=figure_name />
            {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
            <Composer
                draft=vm.draft
                disabled=sending
                on_submit=Callback::new(move |_| vm.submit())
            />
        </div>
    }
}

fn history_back() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    }
}
