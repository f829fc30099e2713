use crate::{
    components::{
        layout::{ErrorMessage, Layout, LoadingSpinner},
        quota_modal::QuotaModal,
    },
    pages::guest::{
        components::{composer::Composer, transcript::Transcript},
        view_model::{use_guest_view_model, GuestViewModel},
    },
    state::guest::GuestPhase,
};
use leptos::*;
use leptos_router::use_params_map;

#[component]
pub fn GuestChatPage() -> impl IntoView {
    let params = use_params_map();
    let slug = params.with_untracked(|p| p.get("slug").cloned().unwrap_or_default());
    view! { <GuestChatPanel slug=slug /> }
}

#[component]
pub fn GuestChatPanel(#[prop(into)] slug: String) -> impl IntoView {
    let vm = use_guest_view_model(slug);
    view! {
        <Layout>
            <GuestChatBody vm=vm />
        </Layout>
    }
}

#[component]
pub fn GuestChatBody(vm: GuestViewModel) -> impl IntoView {
    let session = vm.session;
    let phase = Signal::derive(move || session.with(|s| s.phase));
    let figure_name = Signal::derive(move || vm.figure_name());
    let summary = Signal::derive(move || {
        session.with(|s| s.figure.as_ref().and_then(|f| f.short_summary.clone()))
    });
    let messages = Signal::derive(move || session.with(|s| s.transcript.clone()));
    let error = Signal::derive(move || session.with(|s| s.error.clone()));
    let sending = Signal::derive(move || session.with(|s| s.is_sending()));
    let remaining = Signal::derive(move || session.with(|s| s.remaining()));
    let quota_open = Signal::derive(move || session.with(|s| s.quota_modal_open));

    view! {
        <div class="space-y-4">
            <div>
                <h1 class="text-2xl font-bold text-fg">{move || figure_name.get()}</h1>
                {move || summary.get().map(|text| view! { <p class="text-sm text-fg-muted">{text}</p> })}
            </div>
            {move || match phase.get() {
                GuestPhase::Booting => view! { <LoadingSpinner /> }.into_view(),
                GuestPhase::Error => view! {
                    <div>
                        <ErrorMessage message=error.get().unwrap_or_else(|| "Could not start a guest session.".to_string()) />
                        <a href="/" class="text-sm text-action-primary-bg hover:underline">"Back to all figures"</a>
                    </div>
                }
                .into_view(),
                GuestPhase::Ready | GuestPhase::Sending => view! {
                    <div>
                        <Transcript messages=messages figure_name=figure_name />
                        {move || error.get().map(|message| view! { <ErrorMessage message=message /> })}
                        <Composer
                            draft=vm.draft
                            disabled=sending
                            remaining=remaining
                            on_submit=Callback::new(move |_| vm.submit())
                        />
                    </div>
                }
                .into_view(),
            }}
            <QuotaModal
                is_open=quota_open
                figure_name=figure_name
                on_register=Callback::new(move |_| vm.go_register())
                on_later=Callback::new(move |_| vm.go_home())
            />
        </div>
    }
}
