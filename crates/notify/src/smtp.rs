use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::{Notifier, SendError};

/// SMTP notifier: connect, STARTTLS, authenticate, deliver one plain-text
/// message to one recipient, close. One session per send.
#[derive(Debug)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(server: &str, port: u16, user: &str, password: &str) -> Result<Self, SendError> {
        let from: Mailbox = user
            .parse()
            .map_err(|e| SendError::Other(format!("invalid sender address '{user}': {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)
            .map_err(|e| SendError::Other(format!("SMTP transport setup failed: {e}")))?
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, subject: &str, body: &str, to: &str) -> Result<(), SendError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|_| SendError::RecipientRejected(to.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| SendError::Other(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(classify_smtp_error)?;

        info!(%to, "Mail sent successfully");
        Ok(())
    }
}

/// Map a lettre SMTP failure onto the send-error taxonomy.
///
/// 53x replies are authentication failures, 55x replies are recipient
/// rejections; timeouts and I/O-level causes are connection failures.
fn classify_smtp_error(err: lettre::transport::smtp::Error) -> SendError {
    use std::error::Error as _;

    if let Some(code) = err.status() {
        return match code.to_string().as_str() {
            "530" | "534" | "535" => SendError::AuthenticationFailed,
            "550" | "551" | "552" | "553" => SendError::RecipientRejected(err.to_string()),
            _ => SendError::Other(err.to_string()),
        };
    }

    if err.is_timeout() {
        return SendError::ConnectionFailed;
    }

    let mut source = err.source();
    while let Some(cause) = source {
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return SendError::ConnectionFailed;
        }
        source = cause.source();
    }

    SendError::Other(err.to_string())
}
