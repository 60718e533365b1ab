// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring form state, messages, and commands.

use crate::logic::api::ApiClient;
use crate::models::student::{Field, FieldErrors, FieldValue, NewStudent, StudentDraft, validate};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// In-progress student record.
    pub draft: StudentDraft,
    /// Per-field messages from the last submit attempt.
    pub errors: FieldErrors,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Blocking alert raised by a failed submission.
    pub alert: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
pub enum Msg {
    FieldEdited { field: Field, value: FieldValue },
    SubmitRequested,
    SubmitCompleted(Result<(), String>),
    DismissAlert,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    CreateStudent(NewStudent),
}

/// Outcome the host shell reacts to; the created-callback and the screen
/// switch live there, not in the update function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// The backend accepted the record.
    Created,
}

/// Update the application model and enqueue commands. Returns an event when
/// the host shell has to act on the outcome.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) -> Option<FormEvent> {
    match msg {
        Msg::FieldEdited { field, value } => {
            model.draft.set(field, value);
            None
        }
        Msg::SubmitRequested => {
            // Every submit attempt replaces the displayed errors wholesale.
            model.errors = validate(&model.draft);
            if !model.errors.is_empty() {
                return None;
            }
            match model.draft.to_payload() {
                Some(payload) => cmds.push(Command::CreateStudent(payload)),
                // validate() guarantees the conversion succeeds; if it ever
                // disagrees, surface the generic failure instead of panicking.
                None => model.alert = Some("Failed to add student".to_string()),
            }
            None
        }
        Msg::SubmitCompleted(result) => match result {
            Ok(()) => {
                log::info!("student added successfully");
                model.status = Some("Student added.".to_string());
                Some(FormEvent::Created)
            }
            Err(message) => {
                log::error!("create student failed: {message}");
                model.alert = Some(message);
                None
            }
        },
        Msg::DismissAlert => {
            model.alert = None;
            None
        }
    }
}

/// Execute a command on a worker thread and report the outcome as a message.
pub fn run_command(cmd: Command, api: &ApiClient) -> Msg {
    match cmd {
        Command::CreateStudent(payload) => {
            let result = api
                .create_student(&payload)
                .map_err(|err| err.to_string());
            Msg::SubmitCompleted(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::api::ApiConfig;
    use chrono::NaiveDate;
    use mockito::Matcher;

    fn valid_draft() -> StudentDraft {
        StudentDraft {
            student_id: "S123".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            dob: NaiveDate::from_ymd_opt(2001, 6, 15),
            department: "Mathematics".into(),
            enrollment_year: "2020".into(),
            is_active: true,
        }
    }

    #[test]
    fn field_edit_updates_draft_without_validation() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            Msg::FieldEdited {
                field: Field::Email,
                value: FieldValue::Text("not-an-email".into()),
            },
            &mut cmds,
        );

        assert!(event.is_none());
        assert!(cmds.is_empty());
        assert_eq!(model.draft.email, "not-an-email");
        assert!(model.errors.is_empty(), "editing must not validate");
    }

    #[test]
    fn submit_with_invalid_draft_enqueues_nothing() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        let event = update(&mut model, Msg::SubmitRequested, &mut cmds);

        assert!(event.is_none());
        assert!(cmds.is_empty(), "invalid draft must not reach the network");
        assert!(!model.errors.is_empty());
    }

    #[test]
    fn submit_with_valid_draft_enqueues_one_create() {
        let mut model = AppModel::default();
        model.draft = valid_draft();
        let mut cmds = Vec::new();

        let event = update(&mut model, Msg::SubmitRequested, &mut cmds);

        assert!(event.is_none());
        assert!(model.errors.is_empty());
        assert_eq!(cmds.len(), 1);
        let Command::CreateStudent(payload) = cmds.pop().unwrap();
        assert_eq!(payload.student_id, "S123");
        assert_eq!(payload.enrollment_year, 2020);
    }

    #[test]
    fn successful_submit_clears_previous_errors() {
        let mut model = AppModel::default();
        model.draft = valid_draft();
        model
            .errors
            .insert(Field::Email, "Please enter a valid email address".into());

        let _ = update(&mut model, Msg::SubmitRequested, &mut Vec::new());

        assert!(model.errors.is_empty());
    }

    #[test]
    fn failed_submit_raises_alert_and_keeps_draft() {
        let mut model = AppModel::default();
        model.draft = valid_draft();
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            Msg::SubmitCompleted(Err("Duplicate ID".into())),
            &mut cmds,
        );

        assert!(event.is_none());
        assert_eq!(model.alert.as_deref(), Some("Duplicate ID"));
        assert_eq!(model.draft, valid_draft());
    }

    #[test]
    fn dismiss_alert_clears_it() {
        let mut model = AppModel {
            alert: Some("Duplicate ID".into()),
            ..Default::default()
        };

        let _ = update(&mut model, Msg::DismissAlert, &mut Vec::new());

        assert!(model.alert.is_none());
    }

    #[test]
    fn submit_round_trip_posts_draft_once_and_reports_created() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/students")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "studentId": "S123",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "dob": "2001-06-15",
                "department": "Mathematics",
                "enrollmentYear": 2020,
                "isActive": true,
            })))
            .with_status(201)
            .with_body("{}")
            .expect(1)
            .create();

        let api = ApiClient::new(ApiConfig::new(server.url()));
        let mut model = AppModel::default();
        model.draft = valid_draft();

        let mut cmds = Vec::new();
        let _ = update(&mut model, Msg::SubmitRequested, &mut cmds);
        assert_eq!(cmds.len(), 1, "valid submit should enqueue one create");

        let msg = run_command(cmds.pop().unwrap(), &api);
        let event = update(&mut model, msg, &mut Vec::new());

        mock.assert();
        assert_eq!(event, Some(FormEvent::Created));
        assert!(model.alert.is_none());
    }

    #[test]
    fn duplicate_id_rejection_alerts_and_emits_no_event() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/students")
            .with_status(400)
            .with_body(r#"{"error":"Duplicate ID"}"#)
            .create();

        let api = ApiClient::new(ApiConfig::new(server.url()));
        let mut model = AppModel::default();
        model.draft = valid_draft();

        let mut cmds = Vec::new();
        let _ = update(&mut model, Msg::SubmitRequested, &mut cmds);
        let msg = run_command(cmds.pop().unwrap(), &api);
        let event = update(&mut model, msg, &mut Vec::new());

        mock.assert();
        assert!(event.is_none(), "failed submit must not navigate");
        assert_eq!(model.alert.as_deref(), Some("Duplicate ID"));
    }
}
