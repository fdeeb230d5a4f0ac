// src/state.rs

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    config::SafeSpaceConfig,
    mood_log::{MoodLog, SqliteMoodLog},
    notify::AlertDispatcher,
    services::ChatService,
};

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub sqlite_pool: SqlitePool,

    // -------- Services --------
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    pub fn new(sqlite_pool: SqlitePool, mood_log: Arc<dyn MoodLog>, alerts: AlertDispatcher) -> Self {
        Self {
            sqlite_pool,
            chat_service: Arc::new(ChatService::new(mood_log, alerts)),
        }
    }
}

/// Open the mood log (wiping previous history) and wire the Twilio dispatcher.
pub async fn create_app_state(config: &SafeSpaceConfig, pool: SqlitePool) -> Result<AppState> {
    let mood_log = SqliteMoodLog::new(pool.clone());
    mood_log.initialize().await?;

    let alerts = AlertDispatcher::from_config(&config.telephony)?;

    Ok(AppState::new(pool, Arc::new(mood_log), alerts))
}
