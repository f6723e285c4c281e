use records::AnswerOption;

use super::*;

fn lab(name: &str) -> Lab {
    Lab { name: name.to_owned(), ..Lab::default() }
}

// =============================================================================
// list / get
// =============================================================================

#[test]
fn list_returns_seed_rows_in_order() {
    let tables = Tables::seeded();
    let labs = list::<Lab>(&tables);
    assert_eq!(labs.len(), 5);
    assert_eq!(labs[0].name, "Chemistry Lab");
}

#[test]
fn get_unknown_id_is_not_found() {
    let tables = Tables::seeded();
    assert_eq!(get::<Device>(&tables, 999), Err(CrudError::NotFound { label: "Device", id: 999 }));
}

// =============================================================================
// create
// =============================================================================

#[test]
fn create_assigns_next_id_ignoring_body_id() {
    let mut tables = Tables::seeded();
    let created = create(&mut tables, Lab { lab_id: 42, ..lab("Robotics Lab") });
    assert_eq!(created.lab_id, 6);
    assert_eq!(get::<Lab>(&tables, 6).unwrap().name, "Robotics Lab");
}

#[test]
fn create_stores_record_as_sent() {
    let mut tables = Tables::seeded();
    let device = Device { name: String::new(), lab_id: 77, ..Device::default() };
    let created = create(&mut tables, device);
    assert_eq!(created.device_id, 13);
    assert_eq!(get::<Device>(&tables, 13).unwrap().lab_id, 77);
}

#[test]
fn test_questions_get_ids() {
    let mut tables = Tables::seeded();
    let question = |content: &str| Question {
        question_id: 0,
        content: content.to_owned(),
        answer_options: vec![AnswerOption { content: "yes".to_owned(), is_correct: true }],
    };
    let test = LabTest {
        title: "Laser Safety".to_owned(),
        questions: vec![question("Goggles?"), question("Interlocks?")],
        ..LabTest::default()
    };
    let created = create(&mut tables, test);
    let ids: Vec<u64> = created.questions.iter().map(|q| q.question_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn user_password_is_hashed_and_never_stored_on_record() {
    let mut tables = Tables::seeded();
    let account = UserAccount {
        firstname: "Eve".to_owned(),
        lastname: "Nguyen".to_owned(),
        email: " Eve@Example.com ".to_owned(),
        password: Some("s3cret".to_owned()),
        ..UserAccount::default()
    };
    let created = create(&mut tables, account);
    assert_eq!(created.email, "eve@example.com");
    assert!(created.password.is_none());
    assert_eq!(tables.passwords.get(&created.user_id), Some(&hash_password("s3cret")));
}

// =============================================================================
// update / delete
// =============================================================================

#[test]
fn update_replaces_by_path_id() {
    let mut tables = Tables::seeded();
    let updated = update(&mut tables, 2, Lab { lab_id: 5, ..lab("Optics Lab") }).unwrap();
    assert_eq!(updated.lab_id, 2);
    assert_eq!(get::<Lab>(&tables, 2).unwrap().name, "Optics Lab");
    assert_eq!(get::<Lab>(&tables, 5).unwrap().name, "Materials Lab");
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut tables = Tables::seeded();
    assert_eq!(update(&mut tables, 50, lab("x")), Err(CrudError::NotFound { label: "Lab", id: 50 }));
}

#[test]
fn user_update_without_password_keeps_existing_digest() {
    let mut tables = Tables::seeded();
    let before = tables.passwords.get(&2).cloned();
    let mut account = get::<UserAccount>(&tables, 2).unwrap();
    account.address = "1 Main St".to_owned();
    update(&mut tables, 2, account).unwrap();
    assert_eq!(tables.passwords.get(&2).cloned(), before);
}

#[test]
fn user_update_normalizes_email() {
    let mut tables = Tables::seeded();
    let mut account = get::<UserAccount>(&tables, 1).unwrap();
    account.email = "Root@Example.com".to_owned();
    assert_eq!(update(&mut tables, 1, account).unwrap().email, "root@example.com");
}

#[test]
fn delete_removes_row_and_password() {
    let mut tables = Tables::seeded();
    delete::<UserAccount>(&mut tables, 3).unwrap();
    assert!(get::<UserAccount>(&tables, 3).is_err());
    assert!(!tables.passwords.contains_key(&3));
    assert_eq!(delete::<UserAccount>(&mut tables, 3), Err(CrudError::NotFound { label: "User", id: 3 }));
}

// =============================================================================
// questions / dashboard
// =============================================================================

#[test]
fn questions_of_seeded_test() {
    let tables = Tables::seeded();
    let questions = questions(&tables, 1).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1].correct_options().count(), 2);
}

#[test]
fn questions_of_unknown_test_is_not_found() {
    let tables = Tables::seeded();
    assert_eq!(questions(&tables, 9), Err(CrudError::NotFound { label: "Test", id: 9 }));
}

#[test]
fn dashboard_counts_follow_tables() {
    let mut tables = Tables::seeded();
    assert_eq!(dashboard(&tables), DashboardCounts { labs: 5, devices: 12, schedules: 3, tests: 2 });
    delete::<Device>(&mut tables, 1).unwrap();
    assert_eq!(dashboard(&tables).devices, 11);
}
