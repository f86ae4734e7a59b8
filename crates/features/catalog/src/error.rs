use evreg_storage::StorageError;
use std::borrow::Cow;

pub const INVALID_INDEX: &str = "Invalid index";
pub const INVALID_EVENT: &str = "Event name is required.";
pub const DUPLICATE_EVENT_NAME: &str = "Event already exists.";

/// A specialized [`CatalogError`] enum of this crate.
#[evreg_derive::evreg_error]
pub enum CatalogError {
    #[error("{message}{}", format_context(.context))]
    InvalidEvent { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    DuplicateEventName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    InvalidIndex { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Catalog storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },
}

impl CatalogError {
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
            Self::InvalidEvent { message, .. }
            | Self::DuplicateEventName { message, .. }
            | Self::InvalidIndex { message, .. } => message.clone(),
            Self::Storage { .. } => self.to_string().into(),
        }
    }
}
