use crate::state::guest::GUEST_QUESTION_LIMIT;
use leptos::ev::KeyboardEvent;
use leptos::*;

/// Shown once the guest allowance is spent. Both actions leave the guest chat.
#[component]
pub fn QuotaModal(
    is_open: Signal<bool>,
    #[prop(into)] figure_name: MaybeSignal<String>,
    on_register: Callback<()>,
    on_later: Callback<()>,
) -> impl IntoView {
    let message = Signal::derive(move || quota_message(&figure_name.get()));
    let later_on_backdrop = on_later;
    let later_on_esc = on_later;
    let later_on_button = on_later;

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| later_on_backdrop.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="quota-modal-title"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            later_on_esc.call(());
                        }
                    }
                >
                    <h2 id="quota-modal-title" class="text-lg font-semibold text-fg">
                        "You've used your free questions"
                    </h2>
                    <p class="text-sm text-fg-muted">{move || message.get()}</p>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| later_on_button.call(())
                        >
                            "Maybe later"
                        </button>
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                            on:click=move |_| on_register.call(())
                        >
                            "Create an account"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

fn quota_message(figure_name: &str) -> String {
    let who = if figure_name.trim().is_empty() {
        "this figure"
    } else {
        figure_name
    };
    format!(
        "Guests can ask {} questions. Register to keep talking with {} and save this conversation.",
        GUEST_QUESTION_LIMIT, who
    )
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn quota_modal_renders_both_actions_when_open() {
        let html = render_to_string(move || {
            view! {
                <QuotaModal
                    is_open=Signal::derive(|| true)
                    figure_name="Guy Fawkes"
                    on_register=Callback::new(|_| {})
                    on_later=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Create an account"));
        assert!(html.contains("Maybe later"));
    }

    #[test]
    fn quota_modal_hidden_when_closed() {
        let html = render_to_string(move || {
            view! {
                <QuotaModal
                    is_open=Signal::derive(|| false)
                    figure_name=""
                    on_register=Callback::new(|_| {})
                    on_later=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("role=\"dialog\""));
    }
}
