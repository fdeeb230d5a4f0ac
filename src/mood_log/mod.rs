// src/mood_log/mod.rs
// Append-only log of severity codes for the current process lifetime

pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::classifier::Severity;

pub use sqlite::SqliteMoodLog;

/// One stored conversation turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: i64,
    pub code: i64,
}

impl MoodEntry {
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_code(self.code)
    }
}

#[async_trait]
pub trait MoodLog: Send + Sync {
    /// Record the code for a verdict's severity
    async fn append(&self, severity: Severity) -> Result<MoodEntry>;

    /// Codes in insertion order
    async fn codes(&self) -> Result<Vec<i64>>;

    async fn entries(&self) -> Result<Vec<MoodEntry>>;

    /// Drop every entry
    async fn clear(&self) -> Result<()>;
}
