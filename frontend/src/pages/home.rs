use crate::{
    api::{ApiClient, ApiError, FigureSummary},
    components::{
        empty_state::EmptyState,
        layout::{Layout, LoadingSpinner},
    },
};
use leptos::*;

pub fn guest_chat_path(slug: &str) -> String {
    format!("/guest/{}", slug)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let figures = create_resource(
        || (),
        move |_| {
            let api = api.clone();
            async move { api.list_figures().await }
        },
    );

    view! {
        <Layout>
            <div class="text-center py-8">
                <h1 class="text-4xl font-extrabold text-fg sm:text-5xl">"Places in Time"</h1>
                <p class="mt-3 max-w-2xl mx-auto text-base text-fg-muted sm:text-lg">
                    "Talk with people from history. Try any figure as a guest, no account needed."
                </p>
            </div>
            <Suspense fallback=move || view! { <LoadingSpinner /> }>
                {move || figures.get().map(render_figures)}
            </Suspense>
        </Layout>
    }
}

fn render_figures(result: Result<Vec<FigureSummary>, ApiError>) -> View {
    match result {
        Ok(figures) if figures.is_empty() => view! {
            <EmptyState title="No figures yet" description="Check back soon." />
        }
        .into_view(),
        Ok(figures) => view! {
            <ul class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {figures.into_iter().map(|figure| view! { <FigureCard figure=figure /> }).collect_view()}
            </ul>
        }
        .into_view(),
        Err(err) => view! {
            <p class="text-status-error-text text-center">{format!("Could not load figures: {}", err)}</p>
        }
        .into_view(),
    }
}

#[component]
fn FigureCard(figure: FigureSummary) -> impl IntoView {
    let link = figure.slug.as_deref().map(guest_chat_path);
    view! {
        <li class="rounded-lg border border-border bg-surface-elevated p-4 space-y-2">
            {figure.image_url.clone().map(|src| view! {
                <img src=src alt=figure.name.clone() class="h-32 w-full object-cover rounded" />
            })}
            <h2 class="text-lg font-semibold text-fg">{figure.name.clone()}</h2>
            {figure.era.clone().map(|era| view! { <p class="text-xs text-fg-muted">{era}</p> })}
            {figure.short_summary.clone().map(|summary| view! { <p class="text-sm text-fg-muted">{summary}</p> })}
            {link.map(|href| view! {
                <a href=href class="inline-flex text-sm font-medium text-action-primary-bg hover:underline">
                    "Ask as a guest"
                </a>
            })}
        </li>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;

    fn figure() -> FigureSummary {
        FigureSummary {
            name: "Guy Fawkes".into(),
            slug: Some("guy-fawkes".into()),
            era: Some("1570-1606".into()),
            image_url: None,
            short_summary: Some("Conspirator of 1605.".into()),
        }
    }

    #[test]
    fn figure_list_links_to_guest_chat() {
        let html = render_to_string(move || {
            provide_auth(None, None);
            render_figures(Ok(vec![figure()]))
        });
        assert!(html.contains("Guy Fawkes"));
        assert!(html.contains("/guest/guy-fawkes"));
        assert!(html.contains("Ask as a guest"));
    }

    #[test]
    fn figure_list_reports_failures_and_empty_lists() {
        let html = render_to_string(move || render_figures(Err(ApiError::http(503, None))));
        assert!(html.contains("Could not load figures: Error 503"));

        let html = render_to_string(move || render_figures(Ok(Vec::new())));
        assert!(html.contains("No figures yet"));
    }

    #[test]
    fn home_page_renders_heading() {
        let html = render_to_string(move || {
            provide_auth(None, None);
            view! { <HomePage /> }
        });
        assert!(html.contains("Places in Time"));
    }
}
