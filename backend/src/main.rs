use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use studiverse_backend::{
    api::google_sheets::SheetsStore,
    config::{Config, Environment, StoreConfig},
    repositories::waitlist_store::{MemoryStore, WaitlistStore},
    router, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,studiverse_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let _guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });

    let store: Arc<dyn WaitlistStore> = match &config.store {
        StoreConfig::Sheets(credentials) => {
            tracing::info!("Recording waitlist signups in spreadsheet {}", credentials.spreadsheet_id);
            Arc::new(SheetsStore::new(credentials.clone()))
        }
        StoreConfig::Memory => {
            if config.environment != Environment::Development {
                tracing::warn!("Waitlist store is in-memory; signups are lost on restart");
            }
            Arc::new(MemoryStore::new())
        }
    };
    let state = Arc::new(AppState { store });

    let index = config.frontend_dist.join("index.html");
    let frontend = ServeDir::new(&config.frontend_dist).fallback(ServeFile::new(index));
    let origin = config
        .frontend_url
        .parse::<axum::http::HeaderValue>()
        .with_context(|| format!("invalid FRONTEND_URL {}", config.frontend_url))?;

    let app = router(state)
        .fallback_service(frontend)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST, axum::http::Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(origin))
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::header::ORIGIN,
                ]),
        );

    tracing::info!("Starting server on port {}", config.port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;
    Ok(())
}
