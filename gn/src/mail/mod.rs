//! Outbound mail
//!
//! [`Mailer`] is the transport seam; [`SmtpMailer`] submits through an
//! authenticated STARTTLS relay.

mod dispatcher;
pub mod mailer;
mod request;

pub use dispatcher::NotificationDispatcher;
pub use mailer::{Mailer, OutgoingMessage, SmtpMailer};
pub use request::NotificationRequest;
