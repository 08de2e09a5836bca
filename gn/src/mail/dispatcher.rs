//! Notification dispatch

use std::sync::Arc;

use tracing::debug;

use super::{Mailer, NotificationRequest, OutgoingMessage};
use crate::error::NotifyError;

/// Sends digests to the configured recipient
pub struct NotificationDispatcher {
    request: NotificationRequest,
    subject: String,
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(request: NotificationRequest, subject: impl Into<String>, mailer: Arc<dyn Mailer>) -> Self {
        let subject = subject.into();
        debug!(?request, %subject, "NotificationDispatcher::new: called");
        Self {
            request,
            subject,
            mailer,
        }
    }

    /// Deliver `body` as one message under the fixed subject
    pub async fn send(&self, body: &str) -> Result<(), NotifyError> {
        debug!(body_len = body.len(), "NotificationDispatcher::send: called");
        let message = OutgoingMessage {
            from: self.request.sender_mailbox()?,
            to: self.request.recipient_mailbox()?,
            subject: self.subject.clone(),
            body: body.to_string(),
        };
        self.mailer.deliver(&message).await
    }
}
