//! # Pet Info API
//!
//! Main entry point of the pet information REST backend.
//! Loads configuration, sets up logging, opens the relational and document
//! stores and serves the JSON routes.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod database;
pub mod logger;
pub mod metric;
pub mod models;
pub mod repo;
pub mod server;
pub mod services;

use envconfig::Envconfig;
use logfire::config::MetricsOptions;
use ntex::web;
use ntex_cors::Cors;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    let app_config = config::AppConfig::init_from_env()?;

    // Initialize logging and metrics, logfire only when a token is set
    let shutdown_handler = match &app_config.logfire_token {
        Some(token) => Some(
            logfire::configure()
                .install_panic_handler()
                .with_metrics(Some(MetricsOptions::default()))
                .send_to_logfire(logfire::config::SendToLogfire::Yes)
                .with_token(token)
                .finish()?,
        ),
        None => {
            logger::setup_simple_logger()?;
            None
        }
    };

    // Open both stores, registering the relational models
    let database = database::Database::connect(&app_config).await?;

    let server_result = configure_and_run_server(&app_config, &database).await;

    database.close().await;

    if let Some(shutdown_handler) = shutdown_handler {
        shutdown_handler.shutdown()?;
    }

    server_result
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor(
    app_config: &config::AppConfig,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state from the opened stores
fn create_app_state(
    settings: api::ApiSettings,
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    activity_log: services::activity::MongoActivityLog,
) -> server::AppState {
    server::AppState {
        repo: Box::new(sqlite_repo),
        activity_log: Box::new(activity_log),
        settings,
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    app_config: &config::AppConfig,
    database: &database::Database,
) -> anyhow::Result<()> {
    let server_addr = ("0.0.0.0", app_config.web_server_port);
    let base_url = app_config.base_url();
    let settings = api::ApiSettings::from_config(app_config)?;
    let sqlite_repo = database.sqlite_repo.clone();
    let activity_log = database.activity_log.clone();

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(consts::ALLOWED_METHODS.to_vec())
                    .allowed_origin(&base_url)
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                settings.clone(),
                sqlite_repo.clone(),
                activity_log.clone(),
            ))
            .configure(server::routes::users)
            .configure(server::routes::sessions)
            .default_service(web::route().to(server::routes::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor(app_config)?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    log::info!("serving on {}", app_config.base_url());

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
