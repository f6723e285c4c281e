//! Display formatting helpers for list and detail screens.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

/// Uppercase the first character.
#[must_use]
pub fn capitalize_first_letter(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Human label for a status string; known statuses get their canonical label.
#[must_use]
pub fn format_status(status: &str) -> String {
    match status.to_ascii_lowercase().as_str() {
        "active" => "Active".to_owned(),
        "inactive" => "Inactive".to_owned(),
        "pending" => "Pending".to_owned(),
        "completed" => "Completed".to_owned(),
        "cancelled" => "Cancelled".to_owned(),
        _ => capitalize_first_letter(status),
    }
}

/// `2025-02-03T09:00` → `2025-02-03 09:00`.
#[must_use]
pub fn format_timestamp(value: &str) -> String {
    value.replacen('T', " ", 1)
}
