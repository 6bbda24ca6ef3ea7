use serde::Serialize;

use crate::codec::{Record, FIELD_DELIMITER};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    InvalidId,
    DuplicateId,
    EmptyName,
    NameContainsDelimiter,
    NameContainsDigits,
    NameTooShort,
    InvalidAge,
    EmptyGrade,
    InvalidGrade,
    InvalidMarks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: Reason,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: Reason, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            reason,
            message: message.into(),
        }
    }
}

/// Positive and unique. `excluding_id` is the id of the record being
/// replaced during an update, so resubmitting the same id is not a duplicate.
pub fn validate_id(
    id: i64,
    collection: &[Record],
    excluding_id: Option<i64>,
) -> Option<ValidationError> {
    if id <= 0 {
        return Some(ValidationError::new(
            "id",
            Reason::InvalidId,
            "ID must be a positive integer",
        ));
    }
    let taken = collection
        .iter()
        .any(|s| s.id == id && excluding_id != Some(s.id));
    if taken {
        return Some(ValidationError::new(
            "id",
            Reason::DuplicateId,
            format!("ID {id} already exists"),
        ));
    }
    None
}

pub fn validate_name(name: &str) -> Option<ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some(ValidationError::new(
            "name",
            Reason::EmptyName,
            "Name cannot be empty",
        ));
    }
    // The persisted format is delimiter-separated lines with no escaping, so
    // a name carrying the delimiter or a line break would corrupt its row.
    if trimmed.contains(FIELD_DELIMITER) || trimmed.contains('\n') || trimmed.contains('\r') {
        return Some(ValidationError::new(
            "name",
            Reason::NameContainsDelimiter,
            format!("Name cannot contain {FIELD_DELIMITER:?} or line breaks"),
        ));
    }
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Some(ValidationError::new(
            "name",
            Reason::NameContainsDigits,
            "Name cannot contain numbers",
        ));
    }
    if trimmed.chars().count() < 2 {
        return Some(ValidationError::new(
            "name",
            Reason::NameTooShort,
            "Name must be at least 2 characters",
        ));
    }
    None
}

pub fn validate_age(age: i64, config: &Config) -> Option<ValidationError> {
    if age < config.age_min || age > config.age_max {
        return Some(ValidationError::new(
            "age",
            Reason::InvalidAge,
            format!("Age must be between {} and {}", config.age_min, config.age_max),
        ));
    }
    None
}

pub fn validate_grade(grade: &str, config: &Config) -> Option<ValidationError> {
    if grade.trim().is_empty() {
        return Some(ValidationError::new(
            "grade",
            Reason::EmptyGrade,
            "Grade cannot be empty",
        ));
    }
    if !config.grade_is_valid(grade) {
        return Some(ValidationError::new(
            "grade",
            Reason::InvalidGrade,
            format!("Grade must be one of: {}", config.grades.join(", ")),
        ));
    }
    None
}

pub fn validate_marks(marks: i64) -> Option<ValidationError> {
    if !(0..=100).contains(&marks) {
        return Some(ValidationError::new(
            "marks",
            Reason::InvalidMarks,
            "Marks must be between 0 and 100",
        ));
    }
    None
}

/// Run every field check and collect the failures, one per field at most,
/// so a submission surfaces all of its problems at once.
pub fn validate_record(
    record: &Record,
    collection: &[Record],
    excluding_id: Option<i64>,
    config: &Config,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Some(e) = validate_id(record.id, collection, excluding_id) {
        errors.push(e);
    }
    if let Some(e) = validate_name(&record.name) {
        errors.push(e);
    }
    if let Some(e) = validate_age(record.age, config) {
        errors.push(e);
    }
    if let Some(e) = validate_grade(&record.grade, config) {
        errors.push(e);
    }
    if let Some(e) = validate_marks(record.marks) {
        errors.push(e);
    }
    errors
}
