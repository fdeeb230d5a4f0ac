// src/notify/mod.rs
// Emergency notifications: text alert + voice call to the configured contact

mod dispatcher;
mod twilio;

use async_trait::async_trait;

pub use dispatcher::{AlertDispatcher, ALERT_TEXT, CALL_MESSAGE};
pub use twilio::TwilioNotifier;

/// Error types for notification delivery
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Outbound telephony provider
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Send a short text message
    async fn send_text(&self, to: &str, body: &str) -> Result<(), NotifyError>;

    /// Place a voice call that reads `message` aloud
    async fn place_call(&self, to: &str, message: &str) -> Result<(), NotifyError>;
}
