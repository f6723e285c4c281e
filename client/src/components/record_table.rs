//! Column layout of each entity's list screen.

#[cfg(test)]
#[path = "record_table_test.rs"]
mod record_table_test;

use leptos::prelude::*;
use records::{Device, Lab, LabTest, Record, Schedule, UserAccount};
use session::User;

use crate::util::format::{capitalize_first_letter, format_timestamp, truncate_text};

const DESCRIPTION_PREVIEW_CHARS: usize = 60;

/// A record that can be shown as one table row.
pub trait Tabular: Record + Send + Sync {
    /// Screen heading.
    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Writes need the admin role.
    const ADMIN_ONLY: bool = false;

    /// One display string per column, in [`Self::COLUMNS`] order.
    fn cells(&self) -> Vec<String>;

    fn detail_href(&self) -> String {
        format!("/{}/{}", Self::COLLECTION, self.id())
    }

    fn edit_href(&self) -> String {
        format!("/{}/{}/edit", Self::COLLECTION, self.id())
    }
}

/// Route of the empty create form for `R`.
#[must_use]
pub fn new_href<R: Tabular>() -> String {
    format!("/{}/new", R::COLLECTION)
}

/// Whether `user` may create, edit and delete `R` records.
#[must_use]
pub fn can_manage<R: Tabular>(user: Option<&User>) -> bool {
    !R::ADMIN_ONLY || user.is_some_and(User::is_admin)
}

impl Tabular for Lab {
    const TITLE: &'static str = "Labs";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Description"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.lab_id.to_string(),
            self.name.clone(),
            truncate_text(&self.description, DESCRIPTION_PREVIEW_CHARS),
        ]
    }
}

impl Tabular for Device {
    const TITLE: &'static str = "Devices";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Model", "Lab"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.device_id.to_string(),
            self.name.clone(),
            self.model.clone(),
            self.lab_id.to_string(),
        ]
    }
}

impl Tabular for Schedule {
    const TITLE: &'static str = "Schedules";
    const COLUMNS: &'static [&'static str] = &["ID", "Lab", "User", "Start", "End", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.schedule_id.to_string(),
            self.lab_id.to_string(),
            self.user_id.to_string(),
            format_timestamp(&self.start_time),
            format_timestamp(&self.end_time),
            self.status.to_string(),
        ]
    }
}

impl Tabular for LabTest {
    const TITLE: &'static str = "Tests";
    const COLUMNS: &'static [&'static str] = &["ID", "Title", "Description", "Questions"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.test_id.to_string(),
            self.title.clone(),
            truncate_text(&self.description, DESCRIPTION_PREVIEW_CHARS),
            self.questions.len().to_string(),
        ]
    }
}

impl Tabular for UserAccount {
    const TITLE: &'static str = "Users";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email", "Role"];
    const ADMIN_ONLY: bool = true;

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            self.full_name(),
            self.email.clone(),
            capitalize_first_letter(&self.role),
        ]
    }
}

/// Table of `rows` with view links, plus edit and delete when `can_write`.
#[component]
pub fn RecordTable<R: Tabular>(rows: Vec<R>, can_write: bool, on_delete: Callback<u64>) -> impl IntoView {
    view! {
        <table class="record-table">
            <thead>
                <tr>
                    {R::COLUMNS.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let id = row.id();
                        let detail = row.detail_href();
                        let edit = row.edit_href();
                        view! {
                            <tr>
                                {row.cells().into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                <td class="record-table__actions">
                                    <a href=detail>"View"</a>
                                    {can_write.then(|| view! {
                                        <a href=edit>"Edit"</a>
                                        <button on:click=move |_| on_delete.run(id)>"Delete"</button>
                                    })}
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
