//! Read-only view of one record, generic over the entity.

#[cfg(test)]
#[path = "record_detail_test.rs"]
mod record_detail_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::record_form::Editable;
use crate::components::record_table::{Tabular, can_manage};
use crate::state::auth::AuthContext;

/// `(column, value)` pairs shown on the detail screen.
#[must_use]
pub fn detail_rows<R: Tabular>(record: &R) -> Vec<(&'static str, String)> {
    R::COLUMNS.iter().copied().zip(record.cells()).collect()
}

pub fn record_detail_page<R: Editable>() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let params = use_params_map();
    let record = RwSignal::new(None::<R>);
    let error = RwSignal::new(None::<String>);
    let state = auth.state;

    let record_id = params.read_untracked().get("id").and_then(|raw| raw.parse::<u64>().ok());

    #[cfg(feature = "csr")]
    match record_id {
        Some(id) => {
            use records::DataAccess;

            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                match auth.records().get::<R>(id).await {
                    Ok(loaded) => record.set(Some(loaded)),
                    Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
                }
            });
        }
        None => error.set(Some(format!("Unknown {}", R::LABEL.to_lowercase()))),
    }
    #[cfg(not(feature = "csr"))]
    let _ = (&auth, record_id);

    view! {
        <section class="record-detail">
            <h1>{format!("{} Details", R::LABEL)}</h1>
            {move || error.get().map(|e| view! { <p class="alert alert--error">{e}</p> })}
            {move || record.get().map(|r| {
                let edit = can_manage::<R>(state.get().current_user()).then(|| r.edit_href());
                view! {
                    <dl class="record-detail__fields">
                        {detail_rows(&r)
                            .into_iter()
                            .map(|(column, value)| view! { <dt>{column}</dt><dd>{value}</dd> })
                            .collect_view()}
                    </dl>
                    {edit.map(|href| view! { <a class="button" href=href>"Edit"</a> })}
                }
            })}
            <a class="button button--secondary" href=format!("/{}", R::COLLECTION)>"Back"</a>
        </section>
    }
}
