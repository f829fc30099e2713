use crate::{
    api::{ApiClient, ApiError, ThreadSummary},
    components::layout::{Layout, LoadingSpinner},
    state::{auth::use_auth, upgrade::came_from_guest_upgrade},
};
use leptos::*;
use leptos_router::{use_location, use_params_map};

pub mod components;
pub mod view_model;

use components::{BackControl, ThreadConversation};

pub fn parse_thread_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok().filter(|id: &i64| *id > 0)
}

pub async fn find_thread(
    api: &ApiClient,
    token: Option<String>,
    user_id: Option<i64>,
    thread_id: Option<i64>,
) -> Result<Option<ThreadSummary>, ApiError> {
    let (Some(token), Some(user_id), Some(thread_id)) = (token, user_id, thread_id) else {
        return Ok(None);
    };
    let threads = api.list_user_threads(&token, user_id).await?;
    Ok(threads.into_iter().find(|thread| thread.id == thread_id))
}

#[component]
pub fn ThreadPage() -> impl IntoView {
    let params = use_params_map();
    let thread_id = Signal::derive(move || params.with(|p| p.get("id").and_then(|id| parse_thread_id(id))));
    let location = use_location();
    let from_guest_upgrade = Signal::derive(move || location.state.with(came_from_guest_upgrade));
    view! { <ThreadPanel thread_id=thread_id from_guest_upgrade=from_guest_upgrade /> }
}

#[component]
pub fn ThreadPanel(thread_id: Signal<Option<i64>>, from_guest_upgrade: Signal<bool>) -> impl IntoView {
    let auth = use_auth();
    let api = auth.api();
    let thread = create_resource(
        move || {
            auth.state.with(|s| {
                (
                    s.token.clone(),
                    s.user.as_ref().map(|u| u.user_id),
                    thread_id.get(),
                )
            })
        },
        move |(token, user_id, id)| {
            let api = api.clone();
            async move { find_thread(&api, token, user_id, id).await }
        },
    );

    view! {
        <Layout>
            <div class="space-y-4">
                <BackControl from_guest_upgrade=from_guest_upgrade />
                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    {move || thread.get().map(render_thread)}
                </Suspense>
            </div>
        </Layout>
    }
}

fn render_thread(result: Result<Option<ThreadSummary>, ApiError>) -> View {
    match result {
        Ok(Some(thread)) => view! { <ThreadConversation thread=thread /> }.into_view(),
        Ok(None) => view! { <p class="text-fg-muted">"This conversation could not be found."</p> }.into_view(),
        Err(err) => view! {
            <p class="text-status-error-text">{format!("Could not load the conversation: {}", err)}</p>
        }
        .into_view(),
    }
}
