//! Create/edit forms for every entity.
//!
//! DESIGN
//! ======
//! Each entity lists its form [`Field`]s and converts between itself and the
//! raw [`FormValues`] typed into the inputs. Editing starts from the loaded
//! record so fields without an input (ids, a test's questions) survive the
//! round trip. The only checks are the ones an input cannot express: id
//! fields must be numbers and a new password must be typed twice.

#[cfg(test)]
#[path = "record_form_test.rs"]
mod record_form_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use records::{Device, Lab, LabTest, Schedule, ScheduleStatus, UserAccount};

use crate::components::record_table::Tabular;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

const STATUS_CHOICES: &[(&str, &str)] = &[
    ("active", "Active"),
    ("inactive", "Inactive"),
    ("pending", "Pending"),
    ("completed", "Completed"),
    ("cancelled", "Cancelled"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
    /// Numeric id of another record.
    Id,
    /// `YYYY-MM-DDTHH:MM`.
    DateTime,
    Password,
    /// `(value, label)` pairs.
    Choice(&'static [(&'static str, &'static str)]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Field {
    Field { key, label, kind, required }
}

/// Raw input text keyed by [`Field::key`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<&'static str, String>);

impl FormValues {
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Input text, empty when never set.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_default()
    }

    /// Parse an id input.
    ///
    /// # Errors
    ///
    /// Returns a message naming `label` when the input is not a number.
    pub fn id(&self, key: &str, label: &str) -> Result<u64, String> {
        self.text(key).trim().parse().map_err(|_| format!("{label} must be a number"))
    }
}

/// A [`Tabular`] record with a create/edit form.
pub trait Editable: Tabular + Default {
    const FIELDS: &'static [Field];

    /// Current values, one per field.
    fn form_values(&self) -> FormValues;

    /// Copy `values` onto `self`.
    ///
    /// # Errors
    ///
    /// Returns the message to show when an input cannot be converted.
    fn apply_form(&mut self, values: &FormValues) -> Result<(), String>;
}

/// `Create New Lab` / `Edit Lab`.
#[must_use]
pub fn form_heading<R: Editable>(editing: bool) -> String {
    if editing { format!("Edit {}", R::LABEL) } else { format!("Create New {}", R::LABEL) }
}

/// The password to send, `None` to keep the current one.
///
/// # Errors
///
/// Returns [`PASSWORD_MISMATCH_MESSAGE`] when the confirmation differs.
pub fn new_password(password: &str, confirm: &str) -> Result<Option<String>, &'static str> {
    if password.is_empty() && confirm.is_empty() {
        return Ok(None);
    }
    if password != confirm {
        return Err(PASSWORD_MISMATCH_MESSAGE);
    }
    Ok(Some(password.to_owned()))
}

// =============================================================================
// ENTITIES
// =============================================================================

impl Editable for Lab {
    const FIELDS: &'static [Field] = &[
        field("name", "Lab Name", FieldKind::Text, true),
        field("description", "Description", FieldKind::TextArea, true),
    ];

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        values.set("name", &self.name);
        values.set("description", &self.description);
        values
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), String> {
        self.name = values.text("name");
        self.description = values.text("description");
        Ok(())
    }
}

impl Editable for Device {
    const FIELDS: &'static [Field] = &[
        field("name", "Device Name", FieldKind::Text, true),
        field("model", "Model", FieldKind::Text, true),
        field("description", "Description", FieldKind::TextArea, false),
        field("labId", "Lab ID", FieldKind::Id, true),
    ];

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        values.set("name", &self.name);
        values.set("model", &self.model);
        values.set("description", &self.description);
        values.set("labId", id_text(self.lab_id));
        values
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), String> {
        self.lab_id = values.id("labId", "Lab ID")?;
        self.name = values.text("name");
        self.model = values.text("model");
        self.description = values.text("description");
        Ok(())
    }
}

impl Editable for Schedule {
    const FIELDS: &'static [Field] = &[
        field("userId", "User ID", FieldKind::Id, true),
        field("labId", "Lab ID", FieldKind::Id, true),
        field("startTime", "Start Time", FieldKind::DateTime, true),
        field("endTime", "End Time", FieldKind::DateTime, true),
        field("status", "Status", FieldKind::Choice(STATUS_CHOICES), true),
    ];

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        values.set("userId", id_text(self.user_id));
        values.set("labId", id_text(self.lab_id));
        values.set("startTime", &self.start_time);
        values.set("endTime", &self.end_time);
        values.set("status", self.status.as_str());
        values
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), String> {
        let user_id = values.id("userId", "User ID")?;
        let lab_id = values.id("labId", "Lab ID")?;
        self.user_id = user_id;
        self.lab_id = lab_id;
        self.start_time = values.text("startTime");
        self.end_time = values.text("endTime");
        self.status = ScheduleStatus::parse(&values.text("status")).unwrap_or_default();
        Ok(())
    }
}

impl Editable for LabTest {
    const FIELDS: &'static [Field] = &[
        field("title", "Test Title", FieldKind::Text, true),
        field("description", "Description", FieldKind::TextArea, true),
    ];

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        values.set("title", &self.title);
        values.set("description", &self.description);
        values
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), String> {
        self.title = values.text("title");
        self.description = values.text("description");
        Ok(())
    }
}

impl Editable for UserAccount {
    const FIELDS: &'static [Field] = &[
        field("firstname", "First Name", FieldKind::Text, true),
        field("lastname", "Last Name", FieldKind::Text, true),
        field("email", "Email", FieldKind::Email, true),
        field("password", "Password (leave blank to keep current)", FieldKind::Password, false),
        field("confirmPassword", "Confirm Password", FieldKind::Password, false),
        field("address", "Address", FieldKind::TextArea, false),
    ];

    fn form_values(&self) -> FormValues {
        let mut values = FormValues::default();
        values.set("firstname", &self.firstname);
        values.set("lastname", &self.lastname);
        values.set("email", &self.email);
        values.set("address", &self.address);
        values
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), String> {
        self.password = new_password(&values.text("password"), &values.text("confirmPassword"))?;
        self.firstname = values.text("firstname");
        self.lastname = values.text("lastname");
        self.email = values.text("email").trim().to_owned();
        self.address = values.text("address");
        Ok(())
    }
}

fn id_text(id: u64) -> String {
    if id == 0 { String::new() } else { id.to_string() }
}

// =============================================================================
// VIEW
// =============================================================================

/// Inputs for `fields`, bound to `values`.
#[component]
pub fn RecordForm(
    fields: &'static [Field],
    values: RwSignal<FormValues>,
    #[prop(into)] submit_label: Signal<String>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] cancel_href: String,
    on_submit: Callback<()>,
) -> impl IntoView {
    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !saving.get_untracked() {
            on_submit.run(());
        }
    };

    view! {
        <form class="record-form" on:submit=submit>
            {fields.iter().map(|f| view! { <FieldInput field=*f values=values /> }).collect_view()}
            <div class="record-form__actions">
                <a class="button button--secondary" href=cancel_href>"Cancel"</a>
                <button class="button" type="submit" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving...".to_owned() } else { submit_label.get() }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn FieldInput(field: Field, values: RwSignal<FormValues>) -> impl IntoView {
    let key = field.key;
    let current = move || values.with(|v| v.text(key));
    let on_input = move |ev: leptos::ev::Event| values.update(|v| v.set(key, event_target_value(&ev)));
    let label = if field.required { format!("{} *", field.label) } else { field.label.to_owned() };

    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea id=key rows="4" required=field.required prop:value=current on:input=on_input></textarea>
        }
        .into_any(),
        FieldKind::Choice(choices) => view! {
            <select id=key prop:value=current on:change=on_input>
                {choices
                    .iter()
                    .map(|(value, text)| view! { <option value=*value>{*text}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        kind => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Id => "number",
                FieldKind::DateTime => "datetime-local",
                FieldKind::Password => "password",
                _ => "text",
            };
            view! {
                <input id=key type=input_type required=field.required prop:value=current on:input=on_input />
            }
            .into_any()
        }
    };

    view! {
        <div class="record-form__field">
            <label for=key>{label}</label>
            {input}
        </div>
    }
}
