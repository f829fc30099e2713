use crate::{
    components::layout::Layout,
    pages::register::{components::form::RegisterForm, view_model::use_register_view_model},
};
use leptos::*;

pub mod components;
pub mod utils;
pub mod view_model;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let vm = use_register_view_model();
    view! {
        <Layout>
            <RegisterForm vm=vm />
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn register_page_renders_all_fields() {
        let html = render_to_string(move || {
            provide_auth(None, None);
            view! { <RegisterPage /> }
        });
        assert!(html.contains("Create your account"));
        assert!(html.contains("id=\"confirm\""));
        assert!(html.contains("At least 8 characters"));
    }

    #[test]
    fn register_form_lists_validation_problems() {
        let html = render_to_string(move || {
            provide_auth(None, None);
            let vm = use_register_view_model();
            vm.form.username.set("nobody".into());
            vm.submit();
            view! { <RegisterForm vm=vm /> }
        });
        assert!(html.contains("Username must be a valid email address"));
        assert!(html.contains("Passwords do not match") || html.contains("Password must be"));
    }
}
