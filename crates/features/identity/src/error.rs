use std::borrow::Cow;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// A specialized [`IdentityError`] enum of this crate.
#[evreg_derive::evreg_error]
pub enum IdentityError {
    /// Unknown username or wrong password. Which one is never revealed.
    #[error("{message}{}", format_context(.context))]
    InvalidCredentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl IdentityError {
    pub(crate) fn invalid_credentials(username: &str) -> Self {
        Self::InvalidCredentials {
            message: INVALID_CREDENTIALS.into(),
            context: Some(username.to_owned().into()),
        }
    }

    /// Text shown to API clients, without diagnostic context.
    #[must_use]
    pub fn client_message(&self) -> Cow<'static, str> {
        match self {
            Self::InvalidCredentials { message, .. } => message.clone(),
        }
    }
}
