// jobtrail server entrypoint
//!
//! The heavy lifting (store bootstrap, HTTP wiring, graceful shutdown)
//! lives in dedicated modules so this file remains a thin orchestrator.

mod config;
mod lifecycle;
mod logging;

use anyhow::Result;
use config::ServerConfig;
use lifecycle::{bootstrap, run};
use log::{info, warn};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fall back to defaults when the file is absent;
    // a present-but-broken file is fatal).
    let config_path = "config.toml";
    let config = if std::path::Path::new(config_path).exists() {
        match ServerConfig::from_file(config_path) {
            Ok(cfg) => {
                eprintln!(
                    "Loaded config from: {}",
                    std::fs::canonicalize(config_path)
                        .unwrap_or_else(|_| std::path::PathBuf::from(config_path))
                        .display()
                );
                cfg
            }
            Err(e) => {
                eprintln!("FATAL: Failed to load {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("No {} found, using defaults", config_path);
        ServerConfig::default()
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("jobtrail server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    if config.auth.jwt_secret == "change-me-in-production" {
        warn!("Using the default JWT secret; set auth.jwt_secret or JOBTRAIL_JWT_SECRET");
    }

    let components = bootstrap(&config)?;

    // Run HTTP server until termination signal is received
    run(&config, components).await
}
