use crate::error::{ContactError, ContactErrorExt};
use crate::message::Outgoing;
use evreg_kernel::domain::config::MailConfig;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::fmt;
use tracing::{debug, info};

/// How contact mail leaves the process.
#[derive(Clone)]
pub enum MailTransport {
    /// STARTTLS relay with credentials.
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    /// Writes the mail to the log instead of sending it.
    Log,
}

impl fmt::Debug for MailTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smtp(_) => f.write_str("MailTransport::Smtp"),
            Self::Log => f.write_str("MailTransport::Log"),
        }
    }
}

impl MailTransport {
    /// Builds the SMTP relay when mail is enabled, the log transport otherwise.
    ///
    /// No connection is opened here.
    ///
    /// # Errors
    /// [`ContactError::Transport`] when the relay cannot be configured for `smtp_host`.
    pub fn from_config(cfg: &MailConfig) -> Result<Self, ContactError> {
        if !cfg.enabled {
            return Ok(Self::Log);
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)
            .context(format!("relay {}", cfg.smtp_host))?
            .port(cfg.smtp_port)
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .build();

        debug!(host = %cfg.smtp_host, port = cfg.smtp_port, "SMTP transport configured");
        Ok(Self::Smtp(transport))
    }

    /// # Errors
    /// Address or composition errors from [`Outgoing::to_message`], and
    /// [`ContactError::Transport`] when the relay rejects or drops the mail.
    pub async fn send(&self, outgoing: &Outgoing) -> Result<(), ContactError> {
        match self {
            Self::Smtp(transport) => {
                let message = outgoing.to_message()?;
                let response = transport.send(message).await.context("SMTP send")?;
                debug!(code = %response.code(), "SMTP relay accepted mail");
            },
            Self::Log => {
                info!(
                    from = %outgoing.from,
                    to = ?outgoing.to,
                    subject = %outgoing.subject,
                    body = %outgoing.body,
                    "Mail delivery disabled, message logged"
                );
            },
        }
        Ok(())
    }
}
