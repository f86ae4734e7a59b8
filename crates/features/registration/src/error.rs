use evreg_storage::StorageError;
use std::borrow::Cow;

pub const INVALID_STUDENT_ID: &str = "Student ID must be exactly 12 digits.";
pub const DUPLICATE_STUDENT_ID: &str = "Student ID already registered.";
pub const INVALID_INDEX: &str = "Invalid index";
pub const FIELD_TOO_LONG: &str = "A registration field is too long.";

/// A specialized [`RegistrationError`] enum of this crate.
#[evreg_derive::evreg_error]
pub enum RegistrationError {
    #[error("{message}{}", format_context(.context))]
    InvalidStudentId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    DuplicateStudentId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    FieldTooLong { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    InvalidIndex { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Registration storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },
}

impl RegistrationError {
    pub(crate) fn invalid_student_id(id: &str) -> Self {
        Self::InvalidStudentId { message: INVALID_STUDENT_ID.into(), context: Some(id.to_owned().into()) }
    }

    pub(crate) fn duplicate_student_id(id: &str) -> Self {
        Self::DuplicateStudentId { message: DUPLICATE_STUDENT_ID.into(), context: Some(id.to_owned().into()) }
    }

    pub(crate) fn field_too_long(field: &str, chars: usize) -> Self {
        Self::FieldTooLong {
            message: FIELD_TOO_LONG.into(),
            context: Some(format!("{field}: {chars} characters").into()),
        }
    }

    pub(crate) fn invalid_index(index: i64, len: usize) -> Self {
        Self::InvalidIndex {
            message: INVALID_INDEX.into(),
            context: Some(format!("{index} not in 0..{len}").into()),
        }
    }

    /// Text shown to API clients, without diagnostic context.
    #[must_use]
    pub fn client_message(&self) -> Cow<'static, str> {
        match self {
            Self::InvalidStudentId { message, .. }
            | Self::DuplicateStudentId { message, .. }
            | Self::FieldTooLong { message, .. }
            | Self::InvalidIndex { message, .. } => message.clone(),
            Self::Storage { .. } => self.to_string().into(),
        }
    }
}
