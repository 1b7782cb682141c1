//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting that would otherwise sit in
//! `main.rs`: opening the store, wiring the HTTP server, and coordinating
//! graceful shutdown.

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::{debug, info};

use jobtrail_api::error::json_error_handler;
use jobtrail_api::{configure_routes, AuthSettings};
use jobtrail_core::{ApplicationStore, SqliteStore, UserRepository};

use crate::config::ServerConfig;

/// Shared application state handed to every HTTP worker.
pub struct ApplicationComponents {
    pub user_repo: Arc<dyn UserRepository>,
    pub app_store: Arc<dyn ApplicationStore>,
    pub auth_settings: AuthSettings,
}

/// Open the SQLite store and build the shared components.
pub fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let phase_start = std::time::Instant::now();

    if let Some(parent) = Path::new(&config.storage.sqlite_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = Arc::new(SqliteStore::open(&config.storage.sqlite_path)?);
    info!(
        "SQLite store ready at {} ({:.2}ms)",
        config.storage.sqlite_path,
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    let user_repo: Arc<dyn UserRepository> = store.clone();
    let app_store: Arc<dyn ApplicationStore> = store;

    let auth_settings = AuthSettings {
        jwt_secret: config.auth.jwt_secret.clone(),
        token_expiry_hours: config.auth.token_expiry_hours,
        bcrypt_cost: config.auth.bcrypt_cost,
    };

    Ok(ApplicationComponents {
        user_repo,
        app_store,
        auth_settings,
    })
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    debug!("Endpoints: /api/auth, /api/applications, /api/health");

    let user_repo = components.user_repo.clone();
    let app_store = components.app_store.clone();
    let auth_settings = components.auth_settings.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(user_repo.clone()))
            .app_data(web::Data::new(app_store.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    .max_connections(config.performance.max_connections)
    .keep_alive(std::time::Duration::from_secs(
        config.performance.keepalive_timeout,
    ))
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            if let Err(e) = result {
                log::error!("Server task failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
