//! SMTP delivery of minutes PDFs.
//!
//! Internal recipients receive the full minutes, external recipients the
//! redacted variant, each with its own subject line. The SMTP password comes
//! from the `EMAIL_PASSWORD` environment variable, never from the config
//! file.

use crate::config::MailSettings;
use crate::error::{ReferatError, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

const INTERNAL_SUBJECT: &str = "Minutes of Meeting";
const EXTERNAL_SUBJECT: &str = "Customized Minutes of Meeting";
const INTERNAL_BODY: &str = "Please find the attached Minutes of Meeting.";
const EXTERNAL_BODY: &str = "Please find the customized Minutes of Meeting attached.";

/// Which variant of the minutes a recipient gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Internal,
    External,
}

impl Audience {
    fn subject(self) -> &'static str {
        match self {
            Audience::Internal => INTERNAL_SUBJECT,
            Audience::External => EXTERNAL_SUBJECT,
        }
    }

    fn body(self) -> &'static str {
        match self {
            Audience::Internal => INTERNAL_BODY,
            Audience::External => EXTERNAL_BODY,
        }
    }
}

/// Async SMTP mailer for minutes PDFs.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
    attachment_filename: String,
}

impl Mailer {
    /// Build a STARTTLS transport from mail settings plus `EMAIL_PASSWORD`.
    pub fn new(settings: &MailSettings) -> Result<Self> {
        if settings.sender.is_empty() {
            return Err(ReferatError::Config(
                "mail.sender is not configured".to_string(),
            ));
        }
        if settings.smtp_server.is_empty() {
            return Err(ReferatError::Config(
                "mail.smtp_server is not configured".to_string(),
            ));
        }
        let sender = settings.sender.clone();
        let password = std::env::var("EMAIL_PASSWORD").map_err(|_| {
            ReferatError::Config("EMAIL_PASSWORD environment variable not set".to_string())
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_server)
            .map_err(|e| ReferatError::Mail(e.to_string()))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(sender.clone(), password))
            .build();

        Ok(Self {
            transport,
            sender,
            attachment_filename: settings.attachment_filename.clone(),
        })
    }

    /// Send one minutes PDF to one recipient.
    pub async fn send_minutes(
        &self,
        recipient: &str,
        audience: Audience,
        pdf_bytes: Vec<u8>,
    ) -> Result<()> {
        let content_type = ContentType::parse("application/pdf")
            .map_err(|e| ReferatError::Mail(e.to_string()))?;
        let attachment = Attachment::new(self.attachment_filename.clone())
            .body(pdf_bytes, content_type);

        let message = Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|_| ReferatError::Mail(format!("invalid sender: {}", self.sender)))?,
            )
            .to(recipient
                .parse()
                .map_err(|_| ReferatError::Mail(format!("invalid recipient: {}", recipient)))?)
            .subject(audience.subject())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(audience.body().to_string()))
                    .singlepart(attachment),
            )
            .map_err(|e| ReferatError::Mail(e.to_string()))?;

        debug!(recipient, audience = ?audience, "sending minutes mail");
        self.transport
            .send(message)
            .await
            .map_err(|e| ReferatError::Mail(e.to_string()))?;
        info!(recipient, "minutes mail sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects_differ_per_audience() {
        assert_eq!(Audience::Internal.subject(), "Minutes of Meeting");
        assert_eq!(Audience::External.subject(), "Customized Minutes of Meeting");
        assert_ne!(Audience::Internal.body(), Audience::External.body());
    }
}
