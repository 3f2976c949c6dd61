use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

use crate::config::ServerConfig;
use crate::routes;

/// CORS policy for the configured origins.
pub fn cors(config: &ServerConfig) -> Cors {
    if config.allows_any_origin() {
        return Cors::permissive();
    }
    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

/// Bind and serve until the process is stopped.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = (config.host.clone(), config.port);
    log::info!(
        "[Boundary::Server] Listening on http://{}:{}",
        config.host,
        config.port
    );

    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&app_config))
            .wrap(Logger::default())
            .app_data(web::PayloadConfig::new(app_config.max_payload_bytes))
            .configure(routes::configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind(addr)
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
        .run()
        .await
        .context("Server terminated with an error")
}
