// src/services/chat.rs
// One conversation turn: classify, alert on emergencies, record the mood code

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::classifier::{self, Severity};
use crate::mood_log::MoodLog;
use crate::notify::AlertDispatcher;

/// Reply returned to the chat client
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub severity_code: i64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmergencyAck {
    /// "dispatched" or "skipped"
    pub status: String,
    pub message: String,
}

pub struct ChatService {
    mood_log: Arc<dyn MoodLog>,
    alerts: AlertDispatcher,
}

impl ChatService {
    pub fn new(mood_log: Arc<dyn MoodLog>, alerts: AlertDispatcher) -> Self {
        Self { mood_log, alerts }
    }

    pub async fn ask(&self, question: &str) -> Result<ChatReply> {
        let verdict = classifier::classify(question);

        if verdict.requires_alert() {
            warn!(rule = verdict.rule.unwrap_or("none"), "Emergency verdict, alerting contact");
            // Detached: the reply never waits on the telephony provider
            drop(self.alerts.dispatch_emergency());
        }

        let entry = self.mood_log.append(verdict.severity).await?;
        info!(
            entry_id = entry.id,
            severity = %verdict.severity,
            "Recorded conversation turn"
        );

        Ok(ChatReply {
            reply: verdict.advice,
            severity_code: entry.code,
            severity: verdict.severity,
        })
    }

    /// Mood codes recorded since startup
    pub async fn history(&self) -> Result<Vec<i64>> {
        self.mood_log.codes().await
    }

    /// Manual panic button: same dispatch as an automatic emergency
    pub fn trigger_emergency(&self) -> EmergencyAck {
        if !self.alerts.is_enabled() {
            info!("Manual emergency requested but notifications are not configured");
            return EmergencyAck {
                status: "skipped".to_string(),
                message: "Notifications are not configured".to_string(),
            };
        }

        info!("Manual emergency call requested");
        drop(self.alerts.dispatch_emergency());
        EmergencyAck {
            status: "dispatched".to_string(),
            message: "Emergency alert and call dispatched".to_string(),
        }
    }
}
