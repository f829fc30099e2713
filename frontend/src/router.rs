use leptos::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::{RequireAdmin, RequireAuth},
    pages::{
        admin::AdminPage, dashboard::DashboardPage, guest::GuestChatPage, home::HomePage,
        login::LoginPage, register::RegisterPage, thread::ThreadPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/guest/:slug",
    "/dashboard",
    "/thread/:id",
    "/admin",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/dashboard", "/thread/:id", "/admin"];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/admin"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login", "/register", "/guest/:slug"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/guest/:slug" view=GuestChatPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/thread/:id" view=ProtectedThread/>
                    <Route path="/admin" view=ProtectedAdmin/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedThread() -> impl IntoView {
    view! { <RequireAuth><ThreadPage/></RequireAuth> }
}

#[component]
fn ProtectedAdmin() -> impl IntoView {
    view! { <RequireAdmin><AdminPage/></RequireAdmin> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn guest_and_thread_routes_are_registered() {
        assert!(ROUTE_PATHS.contains(&"/guest/:slug"));
        assert!(ROUTE_PATHS.contains(&"/thread/:id"));
        assert!(ROUTE_PATHS.contains(&"/register"));
    }

    #[test]
    fn every_route_is_public_or_protected() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        let public: HashSet<&str> = PUBLIC_ROUTE_PATHS.iter().copied().collect();
        let protected: HashSet<&str> = PROTECTED_ROUTE_PATHS.iter().copied().collect();
        assert!(public.is_disjoint(&protected));
        assert_eq!(public.union(&protected).count(), all.len());
        for path in ADMIN_ROUTE_PATHS {
            assert!(protected.contains(path), "admin path not protected: {}", path);
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
