use super::*;

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(truncate_text("short", 10), "short");
    assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
}

#[test]
fn truncate_cuts_and_marks() {
    assert_eq!(truncate_text("abcdefghijkl", 5), "abcde...");
}

#[test]
fn truncate_counts_characters_not_bytes() {
    assert_eq!(truncate_text("äöüäöü", 3), "äöü...");
}

#[test]
fn capitalize_handles_empty_and_words() {
    assert_eq!(capitalize_first_letter(""), "");
    assert_eq!(capitalize_first_letter("admin"), "Admin");
    assert_eq!(capitalize_first_letter("Already"), "Already");
}

#[test]
fn format_status_known_and_unknown() {
    assert_eq!(format_status("PENDING"), "Pending");
    assert_eq!(format_status("cancelled"), "Cancelled");
    assert_eq!(format_status("archived"), "Archived");
    assert_eq!(format_status(""), "");
}

#[test]
fn format_timestamp_splits_date_and_time() {
    assert_eq!(format_timestamp("2025-02-03T09:00"), "2025-02-03 09:00");
    assert_eq!(format_timestamp("2025-02-03"), "2025-02-03");
}
