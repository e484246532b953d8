use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use super::{parse_address, MailError, Mailer, OutboundEmail};
use crate::config::SmtpConfig;

/// Delivers mail through an authenticated STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let (user, pass) = match (&config.user, &config.pass) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => return Err(MailError::MissingConfig("SMTP_USER / SMTP_PASS".to_string())),
        };
        let from = config
            .from
            .as_deref()
            .ok_or_else(|| MailError::MissingConfig("SMTP_FROM".to_string()))?;
        let from = Mailbox::new(None, parse_address(from)?);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(user, pass))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let to = Mailbox::new(None, parse_address(&email.to)?);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        info!(to = %email.to, "Email sent");
        Ok(())
    }
}
