//! Dashboard page: per-collection counts.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Counts come through the
//! data-access contract, so an expired token here signs the user out like on
//! any other screen.

use leptos::prelude::*;
use records::DashboardCounts;

use crate::state::auth::AuthContext;

/// `(label, href, count)` cards in display order.
#[must_use]
pub fn dashboard_cards(counts: &DashboardCounts) -> [(&'static str, &'static str, usize); 4] {
    [
        ("Labs", "/labs", counts.labs),
        ("Devices", "/devices", counts.devices),
        ("Schedules", "/schedules", counts.schedules),
        ("Tests", "/tests", counts.tests),
    ]
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let counts = RwSignal::new(None::<DashboardCounts>);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            match records::load_dashboard_counts(&auth.records()).await {
                Ok(loaded) => counts.set(Some(loaded)),
                Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
            }
        });
    }

    let state = auth.state;
    let greeting = move || {
        state
            .get()
            .current_user()
            .map(|u| format!("Welcome, {}", u.display_name))
            .unwrap_or_default()
    };

    view! {
        <section class="dashboard">
            <h1>"Dashboard"</h1>
            <p class="dashboard__greeting">{greeting}</p>
            {move || error.get().map(|e| view! { <p class="alert alert--error">{e}</p> })}
            {move || match counts.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(loaded) => view! {
                    <div class="dashboard__cards">
                        {dashboard_cards(&loaded)
                            .into_iter()
                            .map(|(label, href, count)| view! {
                                <a class="stat-card" href=href>
                                    <span class="stat-card__count">{count}</span>
                                    <span class="stat-card__label">{label}</span>
                                </a>
                            })
                            .collect_view()}
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;
