//! Portdeck server bootstrap.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use portdeck::adapters::auth::{InMemorySessionStore, PasswordService};
use portdeck::adapters::exposure::ExposureClient;
use portdeck::adapters::http::auth::AuthHandlers;
use portdeck::adapters::http::exposure::ExposureHandlers;
use portdeck::adapters::http::middleware::AuthContext;
use portdeck::adapters::http::servers::ServerHandlers;
use portdeck::adapters::http::settings::SettingsHandlers;
use portdeck::adapters::http::api_router;
use portdeck::adapters::sqlite::{
    connect, SqlitePortInventory, SqliteServerRegistry, SqliteSettingsStore, SqliteUserRepository,
};
use portdeck::application::handlers::{
    ApiKeyService, ConnectExposureHandler, DisconnectExposureHandler, EnrichPortsHandler,
    GetExposureStatusHandler, ListServerPortsHandler,
};
use portdeck::config::AppConfig;
use portdeck::ports::{
    ExposureProvider, PortInventory, ServerRegistry, SessionStore, SettingsStore, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = connect(&config.database).await?;

    let settings: Arc<dyn SettingsStore> = Arc::new(SqliteSettingsStore::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let registry: Arc<dyn ServerRegistry> = Arc::new(SqliteServerRegistry::new(pool.clone()));
    let inventory: Arc<dyn PortInventory> = Arc::new(SqlitePortInventory::new(pool.clone()));

    let passwords = PasswordService::new(config.auth.bcrypt_cost);
    let sessions: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(config.auth.session_ttl()));

    let provider: Arc<dyn ExposureProvider> =
        Arc::new(ExposureClient::new(&config.exposure, settings.clone()));
    provider.initialize().await;

    let enricher = Arc::new(EnrichPortsHandler::new(provider.clone()));
    let api_keys = Arc::new(ApiKeyService::new(registry.clone(), passwords.clone()));

    let auth_ctx = AuthContext {
        enabled: config.auth.enabled,
        sessions: sessions.clone(),
    };

    let app = api_router(
        AuthHandlers::new(
            config.auth.enabled,
            users.clone(),
            sessions.clone(),
            passwords.clone(),
        ),
        ExposureHandlers::new(
            Arc::new(GetExposureStatusHandler::new(
                provider.clone(),
                settings.clone(),
            )),
            Arc::new(ConnectExposureHandler::new(
                provider.clone(),
                settings.clone(),
            )),
            Arc::new(DisconnectExposureHandler::new(
                provider.clone(),
                settings.clone(),
            )),
            provider.clone(),
            settings.clone(),
        ),
        SettingsHandlers::new(settings.clone(), registry.clone(), api_keys.clone()),
        ServerHandlers::new(
            Arc::new(ListServerPortsHandler::new(
                registry.clone(),
                inventory.clone(),
                enricher,
            )),
            inventory.clone(),
        ),
        auth_ctx,
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(std::time::Duration::from_secs(
        config.server.request_timeout_secs,
    )))
    .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "portdeck listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown handler");
    }
}
