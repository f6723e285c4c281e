//! Create and edit screens, generic over the entity.
//!
//! `/{collection}/new` starts from an empty record and calls `create`;
//! `/{collection}/:id/edit` loads the record first and calls `update`. Both
//! return to the list once the API accepts the write.

#[cfg(test)]
#[path = "record_form_test.rs"]
mod record_form_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::record_form::{Editable, RecordForm, form_heading};
use crate::components::record_table::can_manage;
use crate::state::auth::AuthContext;

/// `Create Lab` / `Update Lab`.
#[must_use]
pub fn submit_label<R: Editable>(editing: bool) -> String {
    if editing { format!("Update {}", R::LABEL) } else { format!("Create {}", R::LABEL) }
}

#[must_use]
pub fn list_href<R: Editable>() -> String {
    format!("/{}", R::COLLECTION)
}

pub fn record_form_page<R: Editable>() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let params = use_params_map();
    let editing_id = params.read_untracked().get("id").and_then(|raw| raw.parse::<u64>().ok());
    let editing = editing_id.is_some();

    let record = RwSignal::new(R::default());
    let values = RwSignal::new(R::default().form_values());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let saved = RwSignal::new(false);
    let state = auth.state;

    let navigate = use_navigate();
    Effect::new(move || {
        if saved.get() {
            navigate(&list_href::<R>(), NavigateOptions::default());
        }
    });

    #[cfg(feature = "csr")]
    if let Some(id) = editing_id {
        use records::DataAccess;

        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            match auth.records().get::<R>(id).await {
                Ok(loaded) => {
                    values.set(loaded.form_values());
                    record.set(loaded);
                }
                Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
            }
        });
    }

    let on_submit = Callback::new(move |()| {
        let mut next = record.get_untracked();
        if let Err(message) = next.apply_form(&values.get_untracked()) {
            error.set(Some(message));
            return;
        }
        error.set(None);

        #[cfg(feature = "csr")]
        {
            use records::DataAccess;

            let auth = auth.clone();
            saving.set(true);
            leptos::task::spawn_local(async move {
                let access = auth.records();
                let outcome = if editing { access.update(&next).await } else { access.create(&next).await };
                saving.set(false);
                match outcome {
                    Ok(_) => saved.set(true),
                    Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (next, &auth, saved);
        }
    });

    let allowed = move || can_manage::<R>(state.get().current_user());

    view! {
        <section class="record-form-page">
            <h1>{form_heading::<R>(editing)}</h1>
            {move || error.get().map(|e| view! { <p class="alert alert--error">{e}</p> })}
            <Show
                when=allowed
                fallback=|| view! { <p class="alert alert--error">"Admin access required"</p> }
            >
                <RecordForm
                    fields=R::FIELDS
                    values=values
                    submit_label={submit_label::<R>(editing)}
                    saving=saving
                    cancel_href={list_href::<R>()}
                    on_submit=on_submit
                />
            </Show>
        </section>
    }
}
