use crate::{
    components::layout::Layout,
    pages::login::{components::form::LoginForm, view_model::use_login_view_model},
};
use leptos::*;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    view! {
        <Layout>
            <LoginForm vm=vm />
        </Layout>
    }
}
