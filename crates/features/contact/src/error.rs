use lettre::address::AddressError;
use std::borrow::Cow;

pub const MISSING_FIELD: &str = "All fields are required.";
pub const NO_RECIPIENTS: &str = "No administrator email is configured.";

/// A specialized [`ContactError`] enum of this crate.
#[evreg_derive::evreg_error]
pub enum ContactError {
    #[error("{message}{}", format_context(.context))]
    MissingField { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    NoRecipients { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid mail address{}: {source}", format_context(.context))]
    Address { source: AddressError, context: Option<Cow<'static, str>> },

    #[error("Mail composition failed{}: {source}", format_context(.context))]
    Message { source: lettre::error::Error, context: Option<Cow<'static, str>> },

    #[error("Mail delivery failed{}: {source}", format_context(.context))]
    Transport { source: lettre::transport::smtp::Error, context: Option<Cow<'static, str>> },
}

impl ContactError {
    pub(crate) fn missing_field(field: &'static str) -> Self {
        Self::MissingField { message: MISSING_FIELD.into(), context: Some(field.into()) }
    }

    pub(crate) fn no_recipients() -> Self {
        Self::NoRecipients { message: NO_RECIPIENTS.into(), context: None }
    }

    /// Text shown to API clients. Mail failures carry the underlying error text.
    #[must_use]
    pub fn client_message(&self) -> Cow<'static, str> {
        match self {
            Self::MissingField { message, .. } | Self::NoRecipients { message, .. } => message.clone(),
            Self::Address { source, .. } => source.to_string().into(),
            Self::Message { source, .. } => source.to_string().into(),
            Self::Transport { source, .. } => source.to_string().into(),
        }
    }
}
