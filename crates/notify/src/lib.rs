pub mod smtp;

pub use smtp::SmtpNotifier;

use async_trait::async_trait;
use thiserror::Error;

/// Classified failure from a notification send. No retry is ever attempted;
/// the batch runner logs the classification and moves on.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("SMTP authentication failed")]
    AuthenticationFailed,

    #[error("failed to connect to the SMTP server")]
    ConnectionFailed,

    #[error("recipient rejected: {0}")]
    RecipientRejected(String),

    #[error("{0}")]
    Other(String),
}

/// Abstraction over the alert delivery channel.
///
/// `SmtpNotifier` implements this for production; tests substitute recording
/// implementations. A failed send must never block later sends.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one plain-text message to one recipient.
    async fn send(&self, subject: &str, body: &str, to: &str) -> Result<(), SendError>;
}
