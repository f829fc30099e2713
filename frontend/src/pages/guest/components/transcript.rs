use crate::state::guest::{ChatMessage, ChatRole};
use leptos::*;

#[component]
pub fn Transcript(
    messages: Signal<Vec<ChatMessage>>,
    #[prop(into)] figure_name: MaybeSignal<String>,
) -> impl IntoView {
    view! {
        <div class="space-y-3" aria-live="polite">
            {move || {
                let name = figure_name.get();
                messages
                    .get()
                    .into_iter()
                    .map(|message| {
                        let (speaker, class) = match message.role {
                            ChatRole::User => ("You".to_string(), "ml-auto bg-action-primary-bg text-action-primary-text"),
                            ChatRole::Assistant => (name.clone(), "mr-auto bg-surface-elevated text-fg border border-border"),
                        };
                        view! {
                            <div class=format!("max-w-[80%] rounded-lg px-4 py-2 {}", class)>
                                <p class="text-xs font-semibold opacity-75">{speaker}</p>
                                <p class="text-sm whitespace-pre-wrap">{message.content}</p>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
