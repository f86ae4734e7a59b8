use serde::{Deserialize, Serialize};
use std::fmt;

/// An administrator account loaded from configuration.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Principal {
    pub username: String,
    pub password: String,
    pub profile: PrincipalProfile,
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Public part of a principal, returned on login and used as the contact address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrincipalProfile {
    pub name: String,
    pub email: String,
    pub image: String,
    pub description: String,
}
