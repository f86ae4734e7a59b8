//! Write-time rules for new registrations.

use crate::error::RegistrationError;
use evreg_kernel::domain::constants::STUDENT_ID_LEN;
use evreg_kernel::domain::models::Registration;
use serde_json::Value;

/// Longest text a spreadsheet cell accepts; every exported cell must fit.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Separator used when list fields are joined into one cell.
const JOIN_CHARS: usize = 2;

/// Exactly [`STUDENT_ID_LEN`] ASCII decimal digits.
#[must_use]
pub fn is_valid_student_id(id: &str) -> bool {
    id.len() == STUDENT_ID_LEN && id.bytes().all(|b| b.is_ascii_digit())
}

/// Rejects any field whose exported cell would exceed [`MAX_CELL_CHARS`].
///
/// List fields are measured as they are exported, joined with `", "`.
///
/// # Errors
/// [`RegistrationError::FieldTooLong`] naming the first oversized field.
pub fn check_field_lengths(candidate: &Registration) -> Result<(), RegistrationError> {
    let text = |value: &Option<String>| value.as_deref().map_or(0, |s| s.chars().count());
    let fields = [
        ("name", text(&candidate.name)),
        ("email", text(&candidate.email)),
        ("phone", text(&candidate.phone)),
        ("gender", text(&candidate.gender)),
        ("events", joined_chars(candidate.events.iter().map(|e| e.chars().count()))),
        ("projectName", text(&candidate.project_name)),
        ("otherActivity", text(&candidate.other_activity)),
        ("sports", candidate.sports.as_ref().map_or(0, sports_chars)),
    ];

    match fields.into_iter().find(|&(_, chars)| chars > MAX_CELL_CHARS) {
        Some((field, chars)) => Err(RegistrationError::field_too_long(field, chars)),
        None => Ok(()),
    }
}

fn joined_chars(lengths: impl Iterator<Item = usize>) -> usize {
    lengths.enumerate().map(|(i, len)| if i == 0 { len } else { len + JOIN_CHARS }).sum()
}

fn value_chars(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        other => other.to_string().chars().count(),
    }
}

fn sports_chars(value: &Value) -> usize {
    match value {
        Value::Array(items) => joined_chars(items.iter().map(value_chars)),
        other => value_chars(other),
    }
}

/// Checks `candidate` against the format rule, the cell length limit, then against
/// `existing` for uniqueness.
///
/// Referenced event names are not checked.
///
/// # Errors
/// [`RegistrationError::InvalidStudentId`], [`RegistrationError::FieldTooLong`] or
/// [`RegistrationError::DuplicateStudentId`].
pub fn validate(existing: &[Registration], candidate: &Registration) -> Result<(), RegistrationError> {
    let id = candidate.student_id.as_str();
    if !is_valid_student_id(id) {
        return Err(RegistrationError::invalid_student_id(id));
    }
    check_field_lengths(candidate)?;
    if existing.iter().any(|r| r.student_id == id) {
        return Err(RegistrationError::duplicate_student_id(id));
    }
    Ok(())
}
