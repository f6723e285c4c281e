//! Fixed demo data loaded at startup.

use std::collections::HashMap;

use records::{AnswerOption, Device, Lab, LabTest, Question, Schedule, ScheduleStatus, UserAccount};

use crate::services::auth::hash_password;

/// Email of the seeded administrator.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Password of the seeded administrator.
pub const ADMIN_PASSWORD: &str = "admin123";
/// Password shared by the other seeded accounts.
pub const MEMBER_PASSWORD: &str = "password123";

const SEED_UPDATED_AT: &str = "2025-01-15T09:00:00Z";

pub fn labs() -> Vec<Lab> {
    [
        (1, "Chemistry Lab", "Wet lab with fume hoods and analytical balances."),
        (2, "Physics Lab", "Optics benches, oscilloscopes and signal generators."),
        (3, "Biology Lab", "Microscopy and cell culture workspace."),
        (4, "Electronics Lab", "Soldering stations and PCB prototyping."),
        (5, "Materials Lab", "Tensile testing and sample preparation."),
    ]
    .into_iter()
    .map(|(lab_id, name, description)| Lab {
        lab_id,
        name: name.to_owned(),
        description: description.to_owned(),
        updated_at: Some(SEED_UPDATED_AT.to_owned()),
    })
    .collect()
}

pub fn devices() -> Vec<Device> {
    [
        (1, "Analytical Balance", "Mettler XS205", 1),
        (2, "Fume Hood", "Labconco Protector", 1),
        (3, "pH Meter", "Hanna HI5221", 1),
        (4, "Oscilloscope", "Rigol DS1054Z", 2),
        (5, "Signal Generator", "Siglent SDG2042X", 2),
        (6, "Laser Module", "Thorlabs CPS532", 2),
        (7, "Microscope", "Olympus CX23", 3),
        (8, "Centrifuge", "Eppendorf 5424", 3),
        (9, "Soldering Station", "Hakko FX-951", 4),
        (10, "Bench Power Supply", "Korad KA3005P", 4),
        (11, "Tensile Tester", "Instron 3345", 5),
        (12, "Precision Saw", "Buehler IsoMet", 5),
    ]
    .into_iter()
    .map(|(device_id, name, model, lab_id)| Device {
        device_id,
        name: name.to_owned(),
        model: model.to_owned(),
        description: format!("{name} ({model})"),
        lab_id,
    })
    .collect()
}

pub fn schedules() -> Vec<Schedule> {
    [
        (1, 2, 1, "2025-02-03T09:00", "2025-02-03T11:00", ScheduleStatus::Active),
        (2, 3, 2, "2025-02-04T13:00", "2025-02-04T15:30", ScheduleStatus::Pending),
        (3, 4, 4, "2025-02-05T10:00", "2025-02-05T12:00", ScheduleStatus::Completed),
    ]
    .into_iter()
    .map(|(schedule_id, user_id, lab_id, start, end, status)| Schedule {
        schedule_id,
        user_id,
        lab_id,
        start_time: start.to_owned(),
        end_time: end.to_owned(),
        status,
    })
    .collect()
}

fn option(content: &str, is_correct: bool) -> AnswerOption {
    AnswerOption { content: content.to_owned(), is_correct }
}

pub fn tests() -> Vec<LabTest> {
    vec![
        LabTest {
            test_id: 1,
            title: "General Lab Safety".to_owned(),
            description: "Required before booking any lab.".to_owned(),
            questions: vec![
                Question {
                    question_id: 1,
                    content: "Where should you store flammable solvents?".to_owned(),
                    answer_options: vec![
                        option("In a ventilated flammables cabinet", true),
                        option("On the open bench", false),
                        option("In the office refrigerator", false),
                    ],
                },
                Question {
                    question_id: 2,
                    content: "Which of these are personal protective equipment?".to_owned(),
                    answer_options: vec![
                        option("Safety goggles", true),
                        option("Nitrile gloves", true),
                        option("Sandals", false),
                    ],
                },
            ],
        },
        LabTest {
            test_id: 2,
            title: "Electrical Safety".to_owned(),
            description: "Required before using the Electronics Lab.".to_owned(),
            questions: vec![Question {
                question_id: 1,
                content: "What should you do before probing a mains circuit?".to_owned(),
                answer_options: vec![
                    option("Isolate and verify it is de-energised", true),
                    option("Nothing, the test leads are insulated", false),
                ],
            }],
        },
    ]
}

pub fn users() -> Vec<UserAccount> {
    [
        (1, "Admin", "User", ADMIN_EMAIL, "admin"),
        (2, "John", "Doe", "john.doe@example.com", "user"),
        (3, "Alice", "Smith", "alice.smith@example.com", "user"),
        (4, "Robert", "Johnson", "robert.johnson@example.com", "user"),
    ]
    .into_iter()
    .map(|(user_id, firstname, lastname, email, role)| UserAccount {
        user_id,
        firstname: firstname.to_owned(),
        lastname: lastname.to_owned(),
        email: email.to_owned(),
        address: String::new(),
        role: role.to_owned(),
        password: None,
    })
    .collect()
}

/// Password digests keyed by user id.
pub fn passwords() -> HashMap<u64, String> {
    users()
        .iter()
        .map(|u| {
            let secret = if u.email == ADMIN_EMAIL { ADMIN_PASSWORD } else { MEMBER_PASSWORD };
            (u.user_id, hash_password(secret))
        })
        .collect()
}
