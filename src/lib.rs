pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::sync::{Arc, Mutex};

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use application::StatusComparison;
pub use domain::error::{AppError, Result};
pub use domain::protocol::{
    CompareConfig, ComparisonRecord, ComparisonReport, SourceKind, SourceLayout, StatusRecord,
};
pub use infrastructure::config::AppConfig;

use interfaces::http::{add_log, start_server, LogEntry};

/// Load configuration and serve the dashboard until shutdown
pub async fn run() -> Result<()> {
    // .env may carry STATUSDIFF_* overrides and RUST_LOG
    dotenvy::dotenv().ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let config = AppConfig::load()?;

    let comparison = Arc::new(StatusComparison::new(
        config.carrier,
        config.internal,
        config.compare.clone(),
    ));
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    info!(
        "serving dashboard on http://{}:{}",
        config.server.host, config.server.port
    );
    add_log(
        &logs,
        "INFO",
        "System",
        &format!("Backend initialized, listening on :{}", config.server.port),
    );

    let server = start_server(comparison, logs, &config.server.host, config.server.port)?;
    server.await?;

    Ok(())
}
