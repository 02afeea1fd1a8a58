// src/services/mailer.rs

//! Mail dispatch.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::Result;
use crate::models::{Credentials, MailConfig};
use crate::services::digest::{Digest, MailBody};

/// Anything that can deliver a rendered digest.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, digest: &Digest) -> Result<()>;
}

/// SMTP relay mailer authenticated with the account credentials.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer for the configured relay.
    pub fn new(config: &MailConfig, credentials: &Credentials) -> Result<Self> {
        let from = Mailbox::new(
            Some(config.sender_name.clone()),
            credentials.user.parse::<Address>()?,
        );
        let to = Mailbox::new(None, credentials.to.parse::<Address>()?);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(SmtpCredentials::new(
                credentials.user.clone(),
                credentials.pass.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    /// Assemble the MIME message for a digest.
    fn message(&self, digest: &Digest) -> Result<Message> {
        let content_type = match digest.body {
            MailBody::Html(_) => ContentType::TEXT_HTML,
            MailBody::Text(_) => ContentType::TEXT_PLAIN,
        };

        Ok(Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(digest.subject.clone())
            .header(content_type)
            .body(digest.body.as_str().to_string())?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, digest: &Digest) -> Result<()> {
        let message = self.message(digest)?;
        let response = self.transport.send(message).await?;
        log::debug!("SMTP response code {}", response.code());
        Ok(())
    }
}
