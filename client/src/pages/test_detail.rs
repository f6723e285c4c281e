//! Test detail page: a test's questions with their correct answers marked,
//! plus adding and removing questions.
//!
//! Questions are saved by updating the whole test; the API numbers new
//! questions.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use records::{AnswerOption, LabTest, Question};

use crate::components::record_table::Tabular;
use crate::state::auth::AuthContext;

pub const NO_CORRECT_OPTION_MESSAGE: &str = "Please mark at least one option as correct";
pub const TOO_FEW_OPTIONS_MESSAGE: &str = "Please provide at least 2 valid answer options";

/// Blank option rows offered by the question form.
pub const OPTION_SLOTS: usize = 4;

/// Answer text with a marker on correct options.
#[must_use]
pub fn answer_label(content: &str, is_correct: bool) -> String {
    if is_correct { format!("{content} (correct)") } else { content.to_owned() }
}

/// Build a question from the form. Blank option rows are dropped.
///
/// # Errors
///
/// Returns [`NO_CORRECT_OPTION_MESSAGE`] or [`TOO_FEW_OPTIONS_MESSAGE`].
pub fn build_question(content: &str, options: &[(String, bool)]) -> Result<Question, &'static str> {
    let answer_options: Vec<AnswerOption> = options
        .iter()
        .filter(|(text, _)| !text.trim().is_empty())
        .map(|(text, is_correct)| AnswerOption { content: text.trim().to_owned(), is_correct: *is_correct })
        .collect();
    if !answer_options.iter().any(|o| o.is_correct) {
        return Err(NO_CORRECT_OPTION_MESSAGE);
    }
    if answer_options.len() < 2 {
        return Err(TOO_FEW_OPTIONS_MESSAGE);
    }
    Ok(Question { question_id: 0, content: content.trim().to_owned(), answer_options })
}

#[must_use]
pub fn with_question(mut test: LabTest, question: Question) -> LabTest {
    test.questions.push(question);
    test
}

#[must_use]
pub fn without_question(mut test: LabTest, question_id: u64) -> LabTest {
    test.questions.retain(|q| q.question_id != question_id);
    test
}

fn blank_options() -> Vec<(String, bool)> {
    vec![(String::new(), false); OPTION_SLOTS]
}

#[component]
pub fn TestDetailPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let params = use_params_map();
    let test = RwSignal::new(None::<LabTest>);
    let questions = RwSignal::new(None::<Vec<Question>>);
    let error = RwSignal::new(None::<String>);
    let reload = RwSignal::new(0_u32);

    let content = RwSignal::new(String::new());
    let options = RwSignal::new(blank_options());
    let form_error = RwSignal::new(None::<&'static str>);

    let test_id = move || params.read().get("id").and_then(|raw| raw.parse::<u64>().ok());

    #[cfg(feature = "csr")]
    {
        let auth = auth.clone();
        Effect::new(move || {
            use records::DataAccess;

            reload.track();
            let Some(id) = test_id() else {
                error.set(Some("Unknown test".to_owned()));
                return;
            };
            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                let access = auth.records();
                let loaded = match access.get::<LabTest>(id).await {
                    Ok(found) => access.questions(id).await.map(|list| (found, list)),
                    Err(e) => Err(e),
                };
                match loaded {
                    Ok((found, list)) => {
                        error.set(None);
                        test.set(Some(found));
                        questions.set(Some(list));
                    }
                    Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
                }
            });
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = test_id;

    // Write the edited test back, then reload the page data.
    let save = Callback::new(move |next: LabTest| {
        #[cfg(feature = "csr")]
        {
            use records::DataAccess;

            let auth = auth.clone();
            leptos::task::spawn_local(async move {
                match auth.records().update(&next).await {
                    Ok(_) => reload.update(|n| *n += 1),
                    Err(e) => error.set(crate::util::auth::handle_access_error(&auth, &e)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&auth, next, reload);
        }
    });

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = test.get_untracked() else {
            return;
        };
        match build_question(&content.get_untracked(), &options.get_untracked()) {
            Ok(question) => {
                form_error.set(None);
                content.set(String::new());
                options.set(blank_options());
                save.run(with_question(current, question));
            }
            Err(message) => form_error.set(Some(message)),
        }
    };

    let remove = move |question_id: u64| {
        if let Some(current) = test.get_untracked() {
            save.run(without_question(current, question_id));
        }
    };

    let option_row = move |index: usize| {
        let text = move || options.with(|o| o[index].0.clone());
        let correct = move || options.with(|o| o[index].1);
        view! {
            <div class="question-form__option">
                <input
                    type="checkbox"
                    prop:checked=correct
                    on:change=move |ev| options.update(|o| o[index].1 = event_target_checked(&ev))
                />
                <input
                    type="text"
                    placeholder=format!("Option {}", index + 1)
                    prop:value=text
                    on:input=move |ev| options.update(|o| o[index].0 = event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <section class="test-detail">
            {move || test.get().map(|t| view! {
                <h1>{t.title.clone()}</h1>
                <p class="test-detail__description">{t.description.clone()}</p>
                <a class="button" href=t.edit_href()>"Edit"</a>
            })}
            {move || error.get().map(|e| view! { <p class="alert alert--error">{e}</p> })}
            <h2>"Questions"</h2>
            {move || questions.get().map(|list| view! {
                <ol class="questions">
                    {list
                        .into_iter()
                        .map(|q| {
                            let question_id = q.question_id;
                            view! {
                                <li>
                                    <p>{q.content.clone()}</p>
                                    <ul>
                                        {q.answer_options
                                            .iter()
                                            .map(|o| view! { <li>{answer_label(&o.content, o.is_correct)}</li> })
                                            .collect_view()}
                                    </ul>
                                    <button on:click=move |_| remove(question_id)>"Remove"</button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
            })}
            <form class="question-form" on:submit=on_add>
                <h2>"Add New Question"</h2>
                <textarea
                    rows="3"
                    required=true
                    placeholder="Enter the question text here"
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
                <p class="question-form__hint">"Mark at least one option as correct."</p>
                {(0..OPTION_SLOTS).map(option_row).collect_view()}
                {move || form_error.get().map(|m| view! { <p class="alert alert--error">{m}</p> })}
                <button class="button" type="submit">"Add Question"</button>
            </form>
            <a class="button button--secondary" href="/tests">"Back"</a>
        </section>
    }
}

#[cfg(test)]
#[path = "test_detail_test.rs"]
mod test_detail_test;
