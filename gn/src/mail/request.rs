//! NotificationRequest - who gets the digest and how it is sent

use lettre::message::Mailbox;
use tracing::debug;

use crate::error::NotifyError;

/// Mail routing and credentials for a run
#[derive(Clone)]
pub struct NotificationRequest {
    pub recipient: String,
    pub sender: String,
    /// Password used to authenticate `sender` at the relay
    pub password: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl NotificationRequest {
    /// Check addresses and credential before any network I/O
    pub fn validate(&self) -> Result<(), NotifyError> {
        debug!(recipient = %self.recipient, sender = %self.sender, "NotificationRequest::validate: called");
        self.sender_mailbox()?;
        self.recipient_mailbox()?;
        if self.password.is_empty() {
            return Err(NotifyError::Dispatch("Sender password is empty".to_string()));
        }
        if self.smtp_server.trim().is_empty() {
            return Err(NotifyError::Dispatch("SMTP server is empty".to_string()));
        }
        Ok(())
    }

    pub fn sender_mailbox(&self) -> Result<Mailbox, NotifyError> {
        self.sender
            .parse()
            .map_err(|e| NotifyError::Dispatch(format!("Invalid sender address '{}': {}", self.sender, e)))
    }

    pub fn recipient_mailbox(&self) -> Result<Mailbox, NotifyError> {
        self.recipient
            .parse()
            .map_err(|e| NotifyError::Dispatch(format!("Invalid recipient address '{}': {}", self.recipient, e)))
    }
}

impl std::fmt::Debug for NotificationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRequest")
            .field("recipient", &self.recipient)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}
