//! Contact feature slice.
//!
//! Students write to the administrators through a single form. The message goes out
//! as one mail addressed to every administrator profile email.

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod message;
pub mod transport;

pub use crate::error::{ContactError, ContactErrorExt, MISSING_FIELD, NO_RECIPIENTS};
pub use crate::message::{ContactMessage, Outgoing};
pub use crate::transport::MailTransport;

use evreg_kernel::domain::config::MailConfig;
use evreg_kernel::domain::models::Principal;
use evreg_kernel::domain::registry::InitializedSlice;
use tracing::{error, info, warn};

/// Contact feature state
#[evreg_derive::evreg_slice]
pub struct Contact {
    transport: MailTransport,
    sender: String,
    recipients: Vec<String>,
}

impl Contact {
    #[must_use]
    pub fn with_transport(transport: MailTransport, sender: impl Into<String>, recipients: Vec<String>) -> Self {
        Self::new(ContactInner { transport, sender: sender.into(), recipients })
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Composes and delivers `message` to every administrator.
    ///
    /// # Errors
    /// [`ContactError::NoRecipients`] when no administrator has an email, otherwise
    /// whatever the transport reports.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
        let outgoing = Outgoing::compose(&self.sender, &self.recipients, message)?;

        match self.transport.send(&outgoing).await {
            Ok(()) => {
                info!(from = %message.email, recipients = self.recipients.len(), "Contact message sent");
                Ok(())
            },
            Err(err) => {
                error!(from = %message.email, error = %err, "Contact message not delivered");
                Err(err)
            },
        }
    }
}

/// Non-empty profile emails of the configured administrators, in order.
#[must_use]
pub fn admin_emails(principals: &[Principal]) -> Vec<String> {
    principals
        .iter()
        .map(|p| p.profile.email.trim())
        .filter(|email| !email.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Initialize the contact feature.
///
/// # Errors
/// [`ContactError::Transport`] when mail is enabled and the relay cannot be configured.
pub fn init(mail: &MailConfig, principals: &[Principal]) -> Result<InitializedSlice, ContactError> {
    let transport = MailTransport::from_config(mail)?;
    let sender = mail.sender.clone().unwrap_or_else(|| mail.username.clone());
    let recipients = admin_emails(principals);

    if recipients.is_empty() {
        warn!("No administrator email configured, contact messages will be refused");
    }
    info!(transport = ?transport, recipients = recipients.len(), "Contact slice initialized");

    Ok(InitializedSlice::new(Contact::with_transport(transport, sender, recipients)))
}
