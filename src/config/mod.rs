// src/config/mod.rs
// Load settings from .env / process environment with defaults

use std::str::FromStr;

/// Twilio account settings. Every field is optional: an incomplete account
/// simply disables notifications.
#[derive(Debug, Clone, Default)]
pub struct TelephonyConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sender number owned by the Twilio account
    pub from_number: Option<String>,
    /// Emergency contact who receives the alert text and call
    pub alert_recipient: Option<String>,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl TelephonyConfig {
    /// SID, token and sender are all present
    pub fn has_account(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SafeSpaceConfig {
    // ── Server
    pub host: String,
    pub port: u16,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Logging
    pub log_level: String,

    // ── Notifications
    pub telephony: TelephonyConfig,
}

// Values may carry trailing "# comments" and whitespace from hand-edited .env files.
fn env_var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        None => default,
    }
}

fn env_opt<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|val| val.split('#').next().unwrap_or("").trim().to_string())
        .filter(|val| !val.is_empty())
}

impl SafeSpaceConfig {
    /// Read `.env` (if any) and then the process environment.
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: env_var_or(&lookup, "SAFESPACE_HOST", "127.0.0.1".to_string()),
            port: env_var_or(&lookup, "SAFESPACE_PORT", 8000),
            database_url: env_var_or(&lookup, "DATABASE_URL", "sqlite:./safespace.db".to_string()),
            sqlite_max_connections: env_var_or(&lookup, "SQLITE_MAX_CONNECTIONS", 5),
            log_level: env_var_or(&lookup, "SAFESPACE_LOG_LEVEL", "info".to_string()),
            telephony: TelephonyConfig {
                account_sid: env_opt(&lookup, "TWILIO_SID"),
                auth_token: env_opt(&lookup, "TWILIO_TOKEN"),
                from_number: env_opt(&lookup, "TWILIO_PHONE"),
                alert_recipient: env_opt(&lookup, "MY_PHONE"),
                api_base_url: env_var_or(&lookup, "TWILIO_API_BASE", "https://api.twilio.com".to_string()),
                timeout_secs: env_var_or(&lookup, "TWILIO_TIMEOUT", 15),
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
