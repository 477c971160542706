//! authgate server entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │ Request  │───▶│ Session  │───▶│  Access  │───▶│ Handler  │
//! │          │    │  layer   │    │   gate   │    │          │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use authgate::config::AppConfig;
use authgate::{AppState, Database};

#[derive(Debug, Parser)]
#[command(name = "authgate", version, about = "Session-gated login service")]
struct Args {
    /// Configuration environment, loads config/<env>.yaml
    #[arg(short, long, default_value = "dev")]
    env: String,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app_config = AppConfig::load(&args.env)?;
    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    let _log_guard = authgate::logging::init_logging(&app_config);

    tracing::info!("Starting authgate in {} mode", args.env);

    if app_config.session.secret_is_weak() {
        tracing::warn!(
            "Session secret is a placeholder or shorter than {} bytes; set {} before deploying",
            authgate::config::MIN_SECRET_LEN,
            authgate::config::ENV_SESSION_SECRET
        );
    }

    // Unreachable database is the one fatal startup condition
    let db = Database::connect(&app_config.database.url, app_config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", app_config.database.url))?;

    let state = Arc::new(AppState::new(db, &app_config.session, &app_config.auth));
    tracing::info!(
        scheme = ?state.user_auth.scheme(),
        cookie = state.cookies.name(),
        "Hashing new passwords"
    );

    authgate::run_server(
        &app_config.server,
        state,
        Duration::from_secs(app_config.session.purge_interval_secs),
    )
    .await
}
