//! Mailer trait and SMTP implementation

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::NotificationRequest;
use crate::error::NotifyError;

/// A single plaintext message ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub body: String,
}

/// Deliver one message, single attempt
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), NotifyError>;
}

/// Authenticated STARTTLS submission through a relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(request: &NotificationRequest) -> Result<Self, NotifyError> {
        debug!(server = %request.smtp_server, port = request.smtp_port, "SmtpMailer::new: called");
        let credentials = Credentials::new(request.sender.clone(), request.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&request.smtp_server)
            .map_err(|e| NotifyError::Dispatch(format!("Failed to configure relay {}: {}", request.smtp_server, e)))?
            .port(request.smtp_port)
            .credentials(credentials)
            .authentication(vec![Mechanism::Login, Mechanism::Plain])
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), NotifyError> {
        debug!(to = %message.to, subject = %message.subject, "SmtpMailer::deliver: called");
        let email = Message::builder()
            .from(message.from.clone())
            .to(message.to.clone())
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| NotifyError::Dispatch(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError::Dispatch(e.to_string()))?;
        info!("Sent digest to {}", message.to);
        Ok(())
    }
}
