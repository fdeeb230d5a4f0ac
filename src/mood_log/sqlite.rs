//! Implements MoodLog on top of a SQLite table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::info;

use super::{MoodEntry, MoodLog};
use crate::classifier::Severity;

pub struct SqliteMoodLog {
    pool: SqlitePool,
}

impl SqliteMoodLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the table if needed and wipe it. Run once per process start, so
    /// history never outlives the process.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS moods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mood INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create moods table")?;

        self.clear().await?;
        info!("Mood log initialized (previous history cleared)");
        Ok(())
    }
}

#[async_trait]
impl MoodLog for SqliteMoodLog {
    async fn append(&self, severity: Severity) -> Result<MoodEntry> {
        let code = severity.code();
        let row = sqlx::query("INSERT INTO moods (mood) VALUES (?) RETURNING id")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .context("Failed to append mood entry")?;

        Ok(MoodEntry {
            id: row.get("id"),
            code,
        })
    }

    async fn codes(&self) -> Result<Vec<i64>> {
        Ok(self.entries().await?.into_iter().map(|e| e.code).collect())
    }

    async fn entries(&self) -> Result<Vec<MoodEntry>> {
        let rows = sqlx::query("SELECT id, mood FROM moods ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load mood history")?;

        Ok(rows
            .into_iter()
            .map(|row| MoodEntry {
                id: row.get("id"),
                code: row.get("mood"),
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM moods")
            .execute(&self.pool)
            .await
            .context("Failed to clear mood log")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::create_pool;
    use tempfile::TempDir;

    async fn open_log(dir: &TempDir) -> SqliteMoodLog {
        let url = format!("sqlite://{}", dir.path().join("moods.db").display());
        let pool = create_pool(&url, 2).await.unwrap();
        let log = SqliteMoodLog::new(pool);
        log.initialize().await.unwrap();
        log
    }

    #[tokio::test]
    async fn test_codes_match_severity_mapping() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir).await;

        for severity in Severity::ALL {
            let entry = log.append(severity).await.unwrap();
            assert_eq!(entry.code, severity.code());
            assert_eq!(entry.severity(), Some(severity));
        }

        assert_eq!(log.codes().await.unwrap(), vec![1, 2, 3, 7, 8]);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir).await;

        let first = log.append(Severity::Sick).await.unwrap();
        let second = log.append(Severity::Low).await.unwrap();
        assert!(second.id > first.id);

        let entries = log.entries().await.unwrap();
        assert_eq!(entries, vec![first, second]);
    }

    #[tokio::test]
    async fn test_history_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let log = open_log(&dir).await;
        log.append(Severity::Neutral).await.unwrap();

        assert_eq!(log.codes().await.unwrap(), log.codes().await.unwrap());
    }

    #[tokio::test]
    async fn test_restart_clears_history() {
        let dir = TempDir::new().unwrap();
        {
            let log = open_log(&dir).await;
            log.append(Severity::Critical).await.unwrap();
            log.append(Severity::Sick).await.unwrap();
            assert_eq!(log.codes().await.unwrap().len(), 2);
            log.pool().close().await;
        }

        let reopened = open_log(&dir).await;
        assert!(reopened.codes().await.unwrap().is_empty());
    }
}
