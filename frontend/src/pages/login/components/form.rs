use crate::{components::error::InlineErrorMessage, pages::login::view_model::LoginViewModel};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

#[component]
pub fn LoginForm(vm: LoginViewModel) -> impl IntoView {
    let pending = vm.login_action.pending();
    let username = vm.form.username;
    let password = vm.form.password;
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                    "Log in to Places in Time"
                </h2>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="username" class="sr-only">"Email"</label>
                            <input
                                id="username"
                                name="username"
                                type="email"
                                autocomplete="username"
                                required
                                class="appearance-none rounded-t-md relative block w-full px-3 py-2 border border-border text-fg sm:text-sm"
                                placeholder="Email"
                                prop:value=move || username.get()
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    username.set(target.value());
                                }
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">"Password"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                required
                                class="appearance-none rounded-b-md relative block w-full px-3 py-2 border border-border text-fg sm:text-sm"
                                placeholder="Password"
                                prop:value=move || password.get()
                                on:input=move |ev| {
                                    let target = event_target::<HtmlInputElement>(&ev);
                                    password.set(target.value());
                                }
                            />
                        </div>
                    </div>

                    <InlineErrorMessage error=vm.error.into() />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Logging in..." } else { "Log in" }}
                    </button>
                    <p class="text-center text-sm text-fg-muted">
                        "No account yet? "
                        <a href="/register" class="text-action-primary-bg hover:underline">"Register"</a>
                    </p>
                </form>
            </div>
        </div>
    }
}
