use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod password;
mod seed;

use crate::config::Config;
use crate::db::{PgStore, Store};

/// Shared application state; cheap to clone since the store sits behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub expose_credentials: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,asset_registry=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
        .context("initial database connection failed")?;
    info!(max_connections = config.max_connections, "Database connection pool established.");

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations complete.");

    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

    if let Some(seed) = &config.seed_credential {
        seed::seed_credential(store.as_ref(), seed).await?;
    }

    if config.expose_credentials {
        info!("EXPOSE_CREDENTIALS is on: GET /api/user123 returns the credential table");
    }

    let state = AppState {
        store,
        expose_credentials: config.expose_credentials,
    };

    let app = build_router(state, cors_layer(&config.allowed_origin)?);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("ALLOWED_ORIGIN {:?} is not a valid header value", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))

        // ── Assets ──────────────────────────────────────────────────────────
        .route(
            "/api/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/api/old-item", post(handlers::products::create_old_item))
        .route("/api/out-item", post(handlers::products::out_item))
        .route("/api/update-product", put(handlers::products::update_product))

        // ── Credentials ─────────────────────────────────────────────────────
        .route("/api/login-test", post(handlers::users::login))
        .route("/api/forgot-password", post(handlers::users::forgot_password))
        .route("/api/change-username", post(handlers::users::change_username))
        .route("/api/user123", get(handlers::users::list_users))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received.");
}
