//! Web server module for the catalog schema service.
mod api;
mod middleware;

use actix_web::{
    dev::{Server, ServerHandle},
    middleware::{Compress, Logger, NormalizePath},
    web::{self, Data},
    App, HttpServer,
};
use estate_catalog_error::{init::InitError, web::WebError, ECError, ECResult};
use estate_catalog_models::settings::Settings;
use middleware::cors;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Registers app state, extractor error handlers and all API routes.
///
/// Shared between [`ECWebServer`] and the in-process test harness, so the
/// tested surface is exactly the served one.
pub fn configure_app(
    db: DatabaseConnection,
    router_prefix: &str,
) -> impl FnOnce(&mut web::ServiceConfig) {
    let prefix = router_prefix.to_string();
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(Data::new(Arc::new(AppState { db })))
            // Payload deserialization and validator failures carry the
            // offending field in `message`, same shape as every other
            // error body.
            .app_data(
                actix_web_validator::JsonConfig::default()
                    .error_handler(|err, _| WebError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                actix_web_validator::PathConfig::default()
                    .error_handler(|err, _| WebError::BadRequest(err.to_string()).into()),
            )
            .configure(api::configure_public_routes)
            .service(web::scope(&prefix).configure(api::configure_routes));
    }
}

/// ECWebServer handles the web server initialization and management
#[derive(Clone)]
pub struct ECWebServer {
    /// Server handle for graceful shutdown
    server: Arc<Mutex<Option<ServerHandle>>>,
}

impl ECWebServer {
    /// Create and configure the HTTP server
    async fn create_server(settings: &Settings, db: DatabaseConnection) -> ECResult<Server> {
        let addr = format!("{}:{}", settings.web.host, settings.web.port);
        let router_prefix = settings.web.router_prefix.clone();
        let worker_count = settings.web.get_worker_count();
        let cors_config = settings.web.cors.clone();

        let server = HttpServer::new(move || {
            App::new()
                .wrap(cors::middleware(&cors_config))
                .wrap(Logger::default())
                .wrap(Compress::default())
                .wrap(NormalizePath::trim())
                .configure(configure_app(db.clone(), &router_prefix))
        })
        .workers(worker_count)
        .bind(&addr)
        .map_err(|e| ECError::from(format!("Failed to bind HTTP server to {addr}: {e}")))?;

        Ok(server.run())
    }

    #[instrument(name = "init-web-server", skip_all)]
    /// Initialize and start the web server
    pub async fn init(
        settings: &Settings,
        db: DatabaseConnection,
    ) -> ECResult<Arc<Self>, InitError> {
        let server = Self::create_server(settings, db)
            .await
            .map_err(|e| InitError::Failed(format!("Failed to create web server: {e}")))?;
        let server_handle = server.handle();

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error=%e, "Web server failed to start");
            }
        });

        info!(
            "Web server listening on {}:{}",
            settings.web.host, settings.web.port
        );
        Ok(Arc::new(ECWebServer {
            server: Arc::new(Mutex::new(Some(server_handle))),
        }))
    }

    #[instrument(name = "web-server-stop", skip_all)]
    /// Gracefully stop the web server
    pub async fn stop(&self) -> ECResult<()> {
        info!("Stopping web server...");
        let mut server_guard = self.server.lock().await;
        if let Some(handle) = server_guard.take() {
            handle.stop(true).await;
        }
        info!("Web server stopped successfully");
        Ok(())
    }
}
