use crate::{
    api::{ApiError, ThreadSummary},
    components::{empty_state::EmptyState, layout::LoadingSpinner},
};
use leptos::*;

type ThreadsResource = Resource<(Option<String>, Option<i64>), Result<Vec<ThreadSummary>, ApiError>>;

#[component]
pub fn ThreadsSection(threads: ThreadsResource) -> impl IntoView {
    view! {
        <section class="space-y-3">
            <h2 class="text-lg font-semibold text-fg">"Your conversations"</h2>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || threads.get().map(render_threads)}
            </Suspense>
        </section>
    }
}

pub fn render_threads(result: Result<Vec<ThreadSummary>, ApiError>) -> View {
    match result {
        Ok(threads) if threads.is_empty() => view! {
            <EmptyState
                title="No conversations yet"
                description="Pick a figure and start talking."
                action_href="/"
                action_label="Browse figures"
            />
        }
        .into_view(),
        Ok(threads) => view! {
            <ul class="divide-y divide-border border border-border rounded-lg">
                {threads.into_iter().map(|thread| view! { <ThreadRow thread=thread /> }).collect_view()}
            </ul>
        }
        .into_view(),
        Err(err) => view! {
            <p class="text-status-error-text">{format!("Could not load conversations: {}", err)}</p>
        }
        .into_view(),
    }
}

#[component]
fn ThreadRow(thread: ThreadSummary) -> impl IntoView {
    let href = format!("/thread/{}", thread.id);
    let started = thread
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string());
    view! {
        <li class="px-4 py-3 hover:bg-surface-muted">
            <a href=href class="flex items-center justify-between">
                <span class="font-medium text-fg">{thread.display_title()}</span>
                {started.map(|text| view! { <span class="text-xs text-fg-muted">{text}</span> })}
            </a>
        </li>
    }
}
