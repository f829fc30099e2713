use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2" role="alert">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    if let Some(fields) = e.details.as_ref().and_then(|d| d.get("fields")).and_then(|v| v.as_array()) {
                        return view! {
                            <ul class="list-disc list-inside text-sm">
                                {fields.iter().map(|field| {
                                    view! { <li>{field.as_str().unwrap_or_default().to_string()}</li> }
                                }).collect_view()}
                            </ul>
                        }.into_view();
                    }
                    match e.status {
                        Some(status) => view! { <div class="text-xs opacity-75">{"Status: "}{status}</div> }.into_view(),
                        None => ().into_view(),
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}
