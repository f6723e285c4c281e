//! Console chrome: navbar, sidebar and the authenticated-route guard.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};
use leptos_router::hooks::use_navigate;
use session::User;

use crate::state::auth::AuthContext;
use crate::util::auth::install_unauth_redirect;

/// Sidebar entries as `(href, label, admin_only)`.
pub const NAV_LINKS: &[(&str, &str, bool)] = &[
    ("/", "Dashboard", false),
    ("/labs", "Labs", false),
    ("/devices", "Devices", false),
    ("/schedules", "Schedules", false),
    ("/tests", "Tests", false),
    ("/users", "Users", true),
];

/// Sidebar entries shown to an account with or without the admin role.
#[must_use]
pub fn visible_nav_links(is_admin: bool) -> Vec<(&'static str, &'static str)> {
    NAV_LINKS
        .iter()
        .filter(|(_, _, admin_only)| is_admin || !admin_only)
        .map(|(href, label, _)| (*href, *label))
        .collect()
}

/// Parent route for every signed-in screen.
/// Redirects to `/login` once the session settles unauthenticated.
#[component]
pub fn Layout() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    install_unauth_redirect(&auth, use_navigate());

    let state = auth.state;
    view! {
        <Show
            when=move || state.get().is_authenticated()
            fallback=move || view! { <div class="loading">"Loading..."</div> }
        >
            <div class="layout">
                <Navbar />
                <div class="layout__body">
                    <Sidebar />
                    <main class="layout__content">
                        <Outlet />
                    </main>
                </div>
                <footer class="footer">"OpenLab Management"</footer>
            </div>
        </Show>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;
    let display_name = move || {
        state
            .get()
            .current_user()
            .map(|u| u.display_name.clone())
            .unwrap_or_default()
    };
    let on_logout = move |_| auth.sign_out();

    view! {
        <nav class="navbar">
            <span class="navbar__brand">"OpenLab"</span>
            <span class="navbar__user">{display_name}</span>
            <button class="navbar__logout" on:click=on_logout>"Log out"</button>
        </nav>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let state = expect_context::<AuthContext>().state;
    let is_admin = move || state.get().current_user().is_some_and(User::is_admin);

    view! {
        <aside class="sidebar">
            <ul>
                {move || {
                    visible_nav_links(is_admin())
                        .into_iter()
                        .map(|(href, label)| view! { <li><A href=href>{label}</A></li> })
                        .collect_view()
                }}
            </ul>
        </aside>
    }
}
