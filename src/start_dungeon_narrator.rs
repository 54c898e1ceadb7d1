//! Startup helpers for the dungeon narrator server.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::llm::CompletionConfig;
use crate::server::{self, AppState};

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "NARRATOR_PORT";

/// Run the server (used by the `dungeon-narrator` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Some(e) = dotenv_failure(dotenv) {
        tracing::warn!("Ignoring unreadable .env file: {e}");
    }

    tracing::info!("Starting dungeon narrator v{}", env!("CARGO_PKG_VERSION"));

    let Some(config) = load_config() else {
        return ExitCode::from(1);
    };

    let state = match AppState::from_config(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create state: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let server = server::run_server_with_shutdown(state, get_port(), shutdown_signal());
    if let Err(e) = rt.block_on(server) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    tracing::info!("Server stopped");
    ExitCode::SUCCESS
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// A missing `.env` is normal; anything else is worth reporting.
fn dotenv_failure(result: Result<PathBuf, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => Some(e),
    }
}

fn load_config() -> Option<CompletionConfig> {
    let config = match CompletionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return None;
        }
    };
    tracing::info!(
        provider = %config.provider,
        endpoint = %config.api_endpoint,
        model = %config.model,
        timeout = ?config.timeout,
        lenient_extraction = config.lenient_extraction,
        "Completion provider configured"
    );
    Some(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    parse_port(std::env::var(PORT_ENV).ok().as_deref())
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|p| p.trim().parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}
