use crate::{
    components::layout::Layout,
    pages::dashboard::{components::ThreadsSection, view_model::use_dashboard_view_model},
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">"Dashboard"</h1>
                        <p class="text-sm text-fg-muted">{move || format!("Signed in as {}", vm.username())}</p>
                    </div>
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                        on:click=move |_| vm.logout()
                    >
                        "Log out"
                    </button>
                </div>
                <ThreadsSection threads=vm.threads_resource />
            </div>
        </Layout>
    }
}
