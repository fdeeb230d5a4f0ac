// src/main.rs

use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use safespace::api::http_router;
use safespace::classifier;
use safespace::config::SafeSpaceConfig;
use safespace::server::create_pool;
use safespace::state::create_app_state;

#[derive(Parser)]
#[command(name = "safespace")]
#[command(about = "SafeSpace symptom triage chatbot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve {
        /// Bind host (overrides SAFESPACE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides SAFESPACE_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// SQLite URL for the mood log (overrides DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Classify one message and print the verdict
    Classify {
        /// Symptom description
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SafeSpaceConfig::from_env();

    let level = if cli.debug {
        Level::DEBUG
    } else {
        Level::from_str(&config.log_level).unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
        database_url: None,
    }) {
        Command::Classify { text } => {
            let verdict = classifier::classify(&text);
            println!("severity: {} ({})", verdict.severity, verdict.severity.code());
            println!("rule:     {}", verdict.rule.unwrap_or("default"));
            println!("advice:   {}", verdict.advice);
            Ok(())
        }
        Command::Serve {
            host,
            port,
            database_url,
        } => {
            apply_overrides(&mut config, host, port, database_url);
            serve(config).await
        }
    }
}

// Environment values are read only by SafeSpaceConfig; flags just replace them.
fn apply_overrides(
    config: &mut SafeSpaceConfig,
    host: Option<String>,
    port: Option<u16>,
    database_url: Option<String>,
) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(url) = database_url {
        config.database_url = url;
    }
}

async fn serve(config: SafeSpaceConfig) -> anyhow::Result<()> {
    info!("Starting SafeSpace");
    info!("Database: {}", config.database_url);

    // Storage problems at startup are fatal
    let pool = create_pool(&config.database_url, config.sqlite_max_connections).await?;
    let app_state = Arc::new(create_app_state(&config, pool).await?);

    if config.telephony.has_account() && config.telephony.alert_recipient.is_some() {
        info!("Emergency notifications: enabled (twilio)");
    } else {
        warn!("Emergency notifications: disabled (TWILIO_SID/TWILIO_TOKEN/TWILIO_PHONE/MY_PHONE not all set)");
    }

    let app = http_router(app_state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);
    info!("Mood chart at http://{}/chart", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_serve_flags_do_not_read_environment() {
        let command = Cli::command();
        let serve = command.find_subcommand("serve").unwrap();
        assert!(serve.get_arguments().all(|arg| arg.get_env().is_none()));
    }

    #[test]
    fn test_serve_flags_override_config() {
        let cli = Cli::try_parse_from(["safespace", "serve", "--port", "9200"]).unwrap();
        let Some(Command::Serve { host, port, database_url }) = cli.command else {
            panic!("expected serve");
        };

        // Commented value in the environment is accepted by the config layer
        let mut config = SafeSpaceConfig::from_lookup(|key| {
            (key == "SAFESPACE_PORT").then(|| "9100 # dev".to_string())
        });
        assert_eq!(config.port, 9100);

        apply_overrides(&mut config, host, port, database_url);
        assert_eq!(config.port, 9200);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_url, "sqlite:./safespace.db");
    }

    #[test]
    fn test_serve_without_flags_keeps_config() {
        let cli = Cli::try_parse_from(["safespace", "serve"]).unwrap();
        let Some(Command::Serve { host, port, database_url }) = cli.command else {
            panic!("expected serve");
        };

        let mut config = SafeSpaceConfig::from_lookup(|key| {
            (key == "SAFESPACE_PORT").then(|| "9100 # dev".to_string())
        });
        apply_overrides(&mut config, host, port, database_url);
        assert_eq!(config.port, 9100);
    }
}
