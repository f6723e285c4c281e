//! Generic list screen for one entity collection.

use leptos::prelude::*;

use crate::components::record_table::{RecordTable, Tabular, can_manage, new_href};
use crate::state::auth::AuthContext;

/// Lists every `R` and deletes rows on request. Reloads after each delete.
/// Create, edit and delete controls only show for accounts allowed to write.
pub fn collection_page<R: Tabular>() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let rows = RwSignal::new(None::<Vec<R>>);
    let error = RwSignal::new(None::<String>);
    let reload = RwSignal::new(0_u32);
    let state = auth.state;
    let can_write = move || can_manage::<R>(state.get().current_user());

    #[cfg(feature = "csr")]
    {
        use records::DataAccess;

        let auth = auth.clone();
        Effect::new(move || {
            reload.track();
            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                match auth.records().list::<R>().await {
                    Ok(loaded) => {
                        error.set(None);
                        rows.set(Some(loaded));
                    }
                    Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
                }
            });
        });
    }

    let on_delete = Callback::new(move |id: u64| {
        #[cfg(feature = "csr")]
        {
            use records::DataAccess;

            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                match auth.records().delete::<R>(id).await {
                    Ok(()) => reload.update(|n| *n += 1),
                    Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&auth, id, reload);
        }
    });

    view! {
        <section class="collection">
            <div class="collection__header">
                <h1>{R::TITLE}</h1>
                {move || can_write().then(|| view! { <a class="button" href={new_href::<R>()}>{format!("New {}", R::LABEL)}</a> })}
            </div>
            {move || error.get().map(|e| view! { <p class="alert alert--error">{e}</p> })}
            {move || match rows.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(list) if list.is_empty() => view! { <p class="empty">"Nothing here yet."</p> }.into_any(),
                Some(list) => view! { <RecordTable rows=list can_write=can_write() on_delete=on_delete /> }.into_any(),
            }}
        </section>
    }
}
