//! Sentiment Meter — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! See `README.md` for quickstart.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sentiment_meter::api::{create_router, AppState};
use sentiment_meter::config::{self, AnalyzerConfig, ConfigHandle};
use sentiment_meter::metrics::Metrics;
use sentiment_meter::scorer::LexiconScorer;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - ANALYZER_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("ANALYZER_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This enables
    // ANALYZER_CONFIG_PATH / ANALYZER_VALIDATION from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    // --- Load the validation-toggle config ---
    let cfg = AnalyzerConfig::load().expect("Failed to load analyzer config");
    let handle = ConfigHandle::new(cfg);

    // If hot reload is enabled, spawn background watcher
    config::start_hot_reload_thread(handle.clone(), config::config_path());

    // Prometheus recorder + /metrics live in the binary only.
    let metrics = Metrics::init(handle.validation_enabled());

    // Build AppState and pass it into the router
    let state = AppState::new(LexiconScorer::new(), handle);
    let router = create_router(state).merge(metrics.router());

    Ok(router.into())
}
