//! Outbound mail transport.
//!
//! `LogMailer` is the default: it validates the recipient and logs the message
//! it would have sent. `SmtpMailer` delivers through an SMTP relay and is only
//! built when `SMTP_SEND_ENABLED` is set. `AppState` holds an `Arc<dyn Mailer>`.

mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use lettre::Address;
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;

pub use smtp::SmtpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("missing required config: {0}")]
    MissingConfig(String),

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// A single plain-text message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Picks the transport for the configured mode.
pub fn build_mailer(config: &SmtpConfig) -> Result<Arc<dyn Mailer>, MailError> {
    if config.send_enabled {
        info!("SMTP sending enabled via {}:{}", config.host, config.port);
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        info!("SMTP sending disabled; outbound emails will only be logged");
        Ok(Arc::new(LogMailer::new(config.from.clone())))
    }
}

/// Logs the would-be send instead of transmitting anything.
pub struct LogMailer {
    from: Option<String>,
}

impl LogMailer {
    pub fn new(from: Option<String>) -> Self {
        Self { from }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        parse_address(&email.to)?;
        info!(
            from = self.from.as_deref().unwrap_or("<unset>"),
            to = %email.to,
            subject = %email.subject,
            "Would send email:\n{}",
            email.body
        );
        Ok(())
    }
}

pub(crate) fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| MailError::InvalidAddress(format!("{raw}: {e}")))
}

#[cfg(test)]
pub mod testing {
    //! Recording transport shared by the dispatch and router tests.

    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    /// Records every accepted message. Recipients listed in `reject` fail
    /// with an SMTP error instead.
    #[derive(Default)]
    pub struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
        reject: HashSet<String>,
    }

    impl RecordingMailer {
        pub fn rejecting(recipients: &[&str]) -> Self {
            Self {
                sent: Mutex::default(),
                reject: recipients.iter().map(|r| r.to_string()).collect(),
            }
        }

        pub fn sent(&self) -> Vec<OutboundEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
            if self.reject.contains(&email.to) {
                return Err(MailError::Smtp(format!("550 mailbox unavailable: {}", email.to)));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }
}
