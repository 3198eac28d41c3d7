//! signout-server — HTTP API over the hand-off service.
//!
//! Wires the in-memory store, the case catalog, and the rubric service into
//! an axum router.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use signout_core::cases::CaseCatalog;
use signout_core::service::{HandoffService, ServiceConfig};
use signout_core::traits::HandoffStore;
use signout_store::MemoryStore;

pub mod config;
pub mod error;
pub mod routes;

pub use config::{load_config_from, SignoutConfig};
pub use routes::AppState;

/// Build application state from config: a fresh in-memory store plus the
/// case catalog. A missing catalog file yields an empty catalog.
pub fn build_state(config: &SignoutConfig) -> Result<AppState> {
    let catalog = if config.cases_file.exists() {
        CaseCatalog::load(&config.cases_file)?
    } else {
        tracing::warn!(
            "case catalog {} not found, serving no cases",
            config.cases_file.display()
        );
        CaseCatalog::default()
    };

    let store = Arc::new(MemoryStore::new());
    tracing::info!(
        "serving {} cases, signouts kept in the {} store",
        catalog.len(),
        store.name()
    );

    let service = HandoffService::new(
        store,
        ServiceConfig {
            default_page_limit: config.default_page_limit,
            max_page_limit: config.max_page_limit,
        },
    );

    Ok(AppState {
        service,
        catalog: Arc::new(catalog),
    })
}

/// The full application: routes, CORS, and request tracing.
pub fn app(state: AppState, config: &SignoutConfig) -> Router {
    routes::routes()
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Run the server until Ctrl-C.
pub async fn serve(config: SignoutConfig) -> Result<()> {
    let state = build_state(&config)?;
    let app = app(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("signout API listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("signout API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
