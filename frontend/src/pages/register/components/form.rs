use crate::{
    components::error::InlineErrorMessage,
    pages::register::{utils::MIN_PASSWORD_LENGTH, view_model::RegisterViewModel},
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    autocomplete: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm font-medium text-fg">{label}</label>
            <input
                id=id
                name=id
                type=input_type
                autocomplete=autocomplete
                required
                class="mt-1 appearance-none rounded-md block w-full px-3 py-2 border border-border text-fg sm:text-sm"
                prop:value=move || value.get()
                on:input=move |ev| {
                    let target = event_target::<HtmlInputElement>(&ev);
                    value.set(target.value());
                }
            />
        </div>
    }
}

#[component]
pub fn RegisterForm(vm: RegisterViewModel) -> impl IntoView {
    let pending = vm.register_action.pending();
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-6">
                <div>
                    <h2 class="text-center text-3xl font-extrabold text-fg">"Create your account"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Your guest conversation will be saved to your new account."
                    </p>
                </div>
                <form class="space-y-4" on:submit=handle_submit>
                    <Field id="username" label="Email" input_type="email" autocomplete="username" value=vm.form.username />
                    <Field id="password" label="Password" input_type="password" autocomplete="new-password" value=vm.form.password />
                    <Field id="confirm" label="Confirm password" input_type="password" autocomplete="new-password" value=vm.form.confirm />
                    <p class="text-xs text-fg-muted">
                        {format!("At least {} characters, with a letter and a digit.", MIN_PASSWORD_LENGTH)}
                    </p>

                    <InlineErrorMessage error=vm.error.into() />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Creating account..." } else { "Register" }}
                    </button>
                    <p class="text-center text-sm text-fg-muted">
                        "Already registered? "
                        <a href="/login" class="text-action-primary-bg hover:underline">"Log in"</a>
                    </p>
                </form>
            </div>
        </div>
    }
}
