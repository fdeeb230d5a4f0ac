// src/notify/dispatcher.rs
// Fire-and-forget emergency dispatch

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Notifier, NotifyError, TwilioNotifier};
use crate::config::TelephonyConfig;

pub const ALERT_TEXT: &str = "⚠️ ALERT: Emergency detected by SafeSpace AI";

pub const CALL_MESSAGE: &str = "Emergency detected. Please seek help immediately.";

/// Sends the emergency text and call on background tasks.
///
/// Dispatch never reports failure to the caller: each task logs its own error
/// and exits. Without a notifier or recipient every dispatch is a no-op.
#[derive(Clone)]
pub struct AlertDispatcher {
    notifier: Option<Arc<dyn Notifier>>,
    recipient: Option<String>,
}

impl AlertDispatcher {
    pub fn new(notifier: Option<Arc<dyn Notifier>>, recipient: Option<String>) -> Self {
        Self { notifier, recipient }
    }

    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// Twilio-backed dispatcher, or a disabled one when the account is incomplete
    pub fn from_config(config: &TelephonyConfig) -> Result<Self, NotifyError> {
        let notifier = TwilioNotifier::from_config(config)?
            .map(|twilio| Arc::new(twilio) as Arc<dyn Notifier>);
        Ok(Self::new(notifier, config.alert_recipient.clone()))
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some() && self.recipient.is_some()
    }

    /// Spawn the alert text and the voice call as independent tasks.
    ///
    /// The handles are only for callers that want to wait (tests); dropping
    /// them leaves the tasks running detached.
    pub fn dispatch_emergency(&self) -> Vec<JoinHandle<()>> {
        let (Some(notifier), Some(recipient)) = (&self.notifier, &self.recipient) else {
            debug!("Emergency dispatch skipped: notifications not configured");
            return Vec::new();
        };

        info!("Dispatching emergency alert via {}", notifier.name());

        let text_task = {
            let notifier = Arc::clone(notifier);
            let to = recipient.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.send_text(&to, ALERT_TEXT).await {
                    warn!("SMS alert failed: {}", e);
                }
            })
        };

        let call_task = {
            let notifier = Arc::clone(notifier);
            let to = recipient.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.place_call(&to, CALL_MESSAGE).await {
                    warn!("Alert call failed: {}", e);
                }
            })
        };

        vec![text_task, call_task]
    }
}
