//! Root component: builds the session store and declares routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The one [`AuthContext`] is created here and provided to every route. The
//! persisted token is resolved once on mount; until that settles protected
//! routes render a loading placeholder instead of redirecting.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;
use records::{Device, Lab, LabTest, Schedule, UserAccount};
use session::SessionStore;

use crate::components::layout::Layout;
use crate::net::api::HttpAuth;
use crate::net::storage::BrowserTokenStore;
use crate::pages::collection::collection_page;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::record_detail::record_detail_page;
use crate::pages::record_form::record_form_page;
use crate::pages::test_detail::TestDetailPage;
use crate::state::auth::{API_BASE, AuthContext};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new(SessionStore::new(HttpAuth::new(API_BASE), BrowserTokenStore));
    provide_context(auth.clone());

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        auth.store.restore_session().await;
    });
    #[cfg(not(feature = "csr"))]
    let _ = auth;

    view! {
        <Title text="OpenLab Management" />
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("") view=Layout>
                    <Route path=path!("") view=DashboardPage />
                    <Route path=path!("labs") view={collection_page::<Lab>} />
                    <Route path=path!("labs/new") view={record_form_page::<Lab>} />
                    <Route path=path!("labs/:id") view={record_detail_page::<Lab>} />
                    <Route path=path!("labs/:id/edit") view={record_form_page::<Lab>} />
                    <Route path=path!("devices") view={collection_page::<Device>} />
                    <Route path=path!("devices/new") view={record_form_page::<Device>} />
                    <Route path=path!("devices/:id") view={record_detail_page::<Device>} />
                    <Route path=path!("devices/:id/edit") view={record_form_page::<Device>} />
                    <Route path=path!("schedules") view={collection_page::<Schedule>} />
                    <Route path=path!("schedules/new") view={record_form_page::<Schedule>} />
                    <Route path=path!("schedules/:id") view={record_detail_page::<Schedule>} />
                    <Route path=path!("schedules/:id/edit") view={record_form_page::<Schedule>} />
                    <Route path=path!("tests") view={collection_page::<LabTest>} />
                    <Route path=path!("tests/new") view={record_form_page::<LabTest>} />
                    <Route path=path!("tests/:id") view=TestDetailPage />
                    <Route path=path!("tests/:id/edit") view={record_form_page::<LabTest>} />
                    <Route path=path!("users") view={collection_page::<UserAccount>} />
                    <Route path=path!("users/new") view={record_form_page::<UserAccount>} />
                    <Route path=path!("users/:id") view={record_detail_page::<UserAccount>} />
                    <Route path=path!("users/:id/edit") view={record_form_page::<UserAccount>} />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
