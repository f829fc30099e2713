use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

#[component]
pub fn Composer(
    draft: RwSignal<String>,
    disabled: Signal<bool>,
    on_submit: Callback<()>,
    /// Free-question allowance; registered threads have none.
    #[prop(optional)]
    remaining: Option<Signal<u32>>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };
    view! {
        <form class="mt-4 space-y-2" on:submit=handle_submit>
            <div class="flex gap-2">
                <label for="chat-question" class="sr-only">"Your question"</label>
                <input
                    id="chat-question"
                    type="text"
                    class="flex-1 rounded-md border border-border px-3 py-2 text-sm"
                    placeholder="Ask a question"
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        let target = event_target::<HtmlInputElement>(&ev);
                        draft.set(target.value());
                    }
                />
                <button
                    type="submit"
                    class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    disabled=move || disabled.get()
                >
                    {move || if disabled.get() { "Sending..." } else { "Send" }}
                </button>
            </div>
            {remaining.map(|remaining| view! {
                <p class="text-xs text-fg-muted">{move || remaining_label(remaining.get())}</p>
            })}
        </form>
    }
}

pub fn remaining_label(remaining: u32) -> String {
    match remaining {
        0 => "No free questions left".to_string(),
        1 => "1 free question left".to_string(),
        n => format!("{} free questions left", n),
    }
}
