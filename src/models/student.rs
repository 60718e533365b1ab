// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Student draft state, validation, and the wire payload.
//! Kept pure so it can be reused by the UI and the submission logic.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::Serialize;

static STUDENT_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+$").expect("STUDENT_ID_REGEX: invalid regex pattern")
});

// Loose on purpose: anything non-whitespace around "@" and ".".
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("EMAIL_REGEX: invalid regex pattern"));

/// Earliest enrollment year the backend accepts.
pub const MIN_ENROLLMENT_YEAR: i32 = 2000;

/// Draft fields, named as the backend knows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    StudentId,
    FirstName,
    LastName,
    Email,
    Dob,
    Department,
    EnrollmentYear,
    IsActive,
}

impl Field {
    /// All draft fields in form display order.
    pub const ALL: [Field; 8] = [
        Field::StudentId,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Dob,
        Field::Department,
        Field::EnrollmentYear,
        Field::IsActive,
    ];

    /// Wire name, used as the validation-map key and inside error text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::StudentId => "studentId",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Dob => "dob",
            Field::Department => "department",
            Field::EnrollmentYear => "enrollmentYear",
            Field::IsActive => "isActive",
        }
    }
}

/// Raw value delivered by a form control.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Flag(bool),
}

/// Per-field messages from the last validation run. Empty means valid.
pub type FieldErrors = BTreeMap<Field, String>;

/// In-progress, unsaved student record owned by the entry form.
///
/// Text fields keep the raw edit buffers; `enrollment_year` stays a buffer too
/// and is only parsed during validation and payload conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentDraft {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
    pub department: String,
    pub enrollment_year: String,
    pub is_active: bool,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            student_id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            dob: None,
            department: String::new(),
            enrollment_year: String::new(),
            is_active: true,
        }
    }
}

impl StudentDraft {
    /// Replace a single field with a raw control value, leaving all others
    /// unchanged. Validation never runs on this path.
    pub fn set(&mut self, field: Field, value: FieldValue) {
        match (field, value) {
            (Field::StudentId, FieldValue::Text(v)) => self.student_id = v,
            (Field::FirstName, FieldValue::Text(v)) => self.first_name = v,
            (Field::LastName, FieldValue::Text(v)) => self.last_name = v,
            (Field::Email, FieldValue::Text(v)) => self.email = v,
            (Field::Dob, FieldValue::Date(v)) => self.dob = Some(v),
            (Field::Department, FieldValue::Text(v)) => self.department = v,
            (Field::EnrollmentYear, FieldValue::Text(v)) => self.enrollment_year = v,
            (Field::IsActive, FieldValue::Flag(v)) => self.is_active = v,
            // Controls never deliver a mismatched value kind; ignore if one does.
            _ => {}
        }
    }

    /// Whether a field counts as unset for the required check.
    fn is_empty(&self, field: Field) -> bool {
        match field {
            Field::StudentId => self.student_id.is_empty(),
            Field::FirstName => self.first_name.is_empty(),
            Field::LastName => self.last_name.is_empty(),
            Field::Email => self.email.is_empty(),
            Field::Dob => self.dob.is_none(),
            Field::Department => self.department.is_empty(),
            Field::EnrollmentYear => self.enrollment_year.is_empty(),
            Field::IsActive => false,
        }
    }

    /// Convert into the wire payload. Returns `None` when the draft would not
    /// pass [`validate`], so callers never submit a partial record.
    pub fn to_payload(&self) -> Option<NewStudent> {
        let dob = self.dob?;
        let year = parse_enrollment_year(&self.enrollment_year, Local::now().date_naive().year())?;

        Some(NewStudent {
            student_id: self.student_id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            dob: dob.format("%Y-%m-%d").to_string(),
            department: self.department.clone(),
            enrollment_year: year,
            is_active: self.is_active,
        })
    }
}

/// Wire payload for the create-record call, built only from a validated draft.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// ISO `YYYY-MM-DD`.
    pub dob: String,
    pub department: String,
    pub enrollment_year: i32,
    pub is_active: bool,
}

/// Run every check over the draft and collect per-field messages.
///
/// Checks do not short-circuit. The blanket required check runs last so that a
/// non-empty but invalid value keeps its specific message while an empty value
/// always ends up with "{field} is required", overwriting anything a pattern
/// check put there first.
pub fn validate(draft: &StudentDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let today = Local::now().date_naive();

    if !STUDENT_ID_REGEX.is_match(&draft.student_id) {
        errors.insert(
            Field::StudentId,
            "Student ID must be alphanumeric".to_string(),
        );
    }

    if !EMAIL_REGEX.is_match(&draft.email) {
        errors.insert(
            Field::Email,
            "Please enter a valid email address".to_string(),
        );
    }

    if let Some(dob) = draft.dob
        && dob > today
    {
        errors.insert(
            Field::Dob,
            "Date of birth cannot be in the future".to_string(),
        );
    }

    if !draft.enrollment_year.is_empty()
        && parse_enrollment_year(&draft.enrollment_year, today.year()).is_none()
    {
        errors.insert(
            Field::EnrollmentYear,
            format!(
                "Enrollment year must be between {MIN_ENROLLMENT_YEAR} and {}",
                today.year()
            ),
        );
    }

    for field in Field::ALL {
        if field != Field::IsActive && draft.is_empty(field) {
            errors.insert(field, format!("{} is required", field.as_str()));
        }
    }

    errors
}

fn parse_enrollment_year(raw: &str, current_year: i32) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|year| (MIN_ENROLLMENT_YEAR..=current_year).contains(year))
}
