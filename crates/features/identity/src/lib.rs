//! Identity feature slice.
//!
//! Administrators are principals declared in configuration. Login is a credential
//! check against that list; no session or token is issued.

#[cfg(feature = "server")]
pub mod api;
mod error;

pub use crate::error::{INVALID_CREDENTIALS, IdentityError, IdentityErrorExt};

use evreg_kernel::domain::models::{Principal, PrincipalProfile};
use evreg_kernel::domain::registry::InitializedSlice;
use tracing::{info, warn};

/// Finds the principal matching the supplied credentials.
///
/// The username is trimmed and compared case-insensitively, the password is trimmed
/// and compared exactly.
#[must_use]
pub fn authenticate<'a>(principals: &'a [Principal], username: &str, password: &str) -> Option<&'a Principal> {
    let username = username.trim();
    let password = password.trim();

    principals
        .iter()
        .find(|p| p.username.trim().eq_ignore_ascii_case(username) && p.password.trim() == password)
}

/// Identity feature state
#[evreg_derive::evreg_slice]
pub struct Identity {
    principals: Vec<Principal>,
}

impl Identity {
    #[must_use]
    pub fn from_principals(principals: Vec<Principal>) -> Self {
        Self::new(IdentityInner { principals })
    }

    pub fn principals(&self) -> &[Principal] {
        &self.principals
    }

    /// Checks credentials and returns the matching account's canonical username and profile.
    ///
    /// # Errors
    /// [`IdentityError::InvalidCredentials`] when no principal matches.
    pub fn login(&self, username: &str, password: &str) -> Result<(String, PrincipalProfile), IdentityError> {
        match authenticate(&self.principals, username, password) {
            Some(principal) => {
                info!(admin = %principal.username, "Administrator logged in");
                Ok((principal.username.clone(), principal.profile.clone()))
            },
            None => {
                warn!(username = %username.trim(), "Rejected administrator login");
                Err(IdentityError::invalid_credentials(username.trim()))
            },
        }
    }
}

/// Initialize the identity feature from the configured administrators.
///
/// # Errors
/// Infallible today; kept fallible like every slice initializer.
pub fn init(principals: &[Principal]) -> Result<InitializedSlice, IdentityError> {
    if principals.is_empty() {
        warn!("No administrators configured, admin login will always fail");
    }
    info!(admins = principals.len(), "Identity slice initialized");
    Ok(InitializedSlice::new(Identity::from_principals(principals.to_vec())))
}
