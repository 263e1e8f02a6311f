use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::classifier::classify;
use crate::config::{AnalyzerConfig, ConfigHandle};
use crate::metrics::{FAILED_TOTAL, REJECTED_TOTAL, REQUESTS_TOTAL};
use crate::scorer::LexiconScorer;
use crate::ui::{render_page, PageView};
use crate::validate::{is_valid, REJECT_MESSAGE};

#[cfg(feature = "debug")]
use crate::scorer::PolarityScorer;

/// Shown on the form page when the scoring backend fails. The fixed
/// validator message lives in `validate::REJECT_MESSAGE`.
const SCORING_FAILED_MESSAGE: &str =
    "Sentiment scoring is unavailable right now. Please try again.";

#[derive(Clone)]
pub struct AppState {
    scorer: Arc<LexiconScorer>,
    config: ConfigHandle,
}

impl AppState {
    pub fn new(scorer: LexiconScorer, config: ConfigHandle) -> Self {
        Self {
            scorer: Arc::new(scorer),
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(home).post(submit))
        .route("/analyze", post(analyze))
        .route("/health", get(|| async { "ok" }));

    #[cfg(feature = "debug")]
    let router = router.route("/debug/breakdown", get(debug_breakdown));

    router.layer(CorsLayer::very_permissive()).with_state(state)
}

/// Build the router with config loaded from disk/env. Used by the binary
/// and by integration tests that want the deployed wiring.
pub fn app() -> anyhow::Result<Router> {
    let cfg = AnalyzerConfig::load()?;
    let state = AppState::new(LexiconScorer::new(), ConfigHandle::new(cfg));
    Ok(create_router(state))
}

#[derive(serde::Deserialize)]
struct SubmitForm {
    sentence: String,
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    text: String,
}

async fn home() -> Html<String> {
    Html(render_page(PageView::Empty))
}

async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Html<String> {
    counter!(REQUESTS_TOTAL).increment(1);
    let text = form.sentence.trim();

    if state.config.validation_enabled() && !is_valid(text) {
        counter!(REJECTED_TOTAL).increment(1);
        info!(target: "analyzer", id = %anon_hash(text), "submission rejected by validator");
        return Html(render_page(PageView::Rejected(REJECT_MESSAGE)));
    }

    match classify(state.scorer.as_ref(), text) {
        Ok(result) => {
            info!(target: "analyzer", id = %anon_hash(text), label = %result.label, "classified");
            Html(render_page(PageView::Result(&result)))
        }
        Err(err) => {
            counter!(FAILED_TOTAL).increment(1);
            warn!(target: "analyzer", id = %anon_hash(text), error = %err, "classification failed");
            Html(render_page(PageView::Rejected(SCORING_FAILED_MESSAGE)))
        }
    }
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Response {
    counter!(REQUESTS_TOTAL).increment(1);
    let text = body.text.trim();

    if state.config.validation_enabled() && !is_valid(text) {
        counter!(REJECTED_TOTAL).increment(1);
        info!(target: "analyzer", id = %anon_hash(text), "request rejected by validator");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": REJECT_MESSAGE })),
        )
            .into_response();
    }

    match classify(state.scorer.as_ref(), text) {
        Ok(result) => {
            info!(target: "analyzer", id = %anon_hash(text), label = %result.label, "classified");
            Json(result).into_response()
        }
        Err(err) => {
            counter!(FAILED_TOTAL).increment(1);
            warn!(target: "analyzer", id = %anon_hash(text), error = %err, "classification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(feature = "debug")]
async fn debug_breakdown(
    State(state): State<AppState>,
    axum::extract::Query(q): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Json<serde_json::Value> {
    let text = q.get("text").cloned().unwrap_or_default();
    let hits = state.scorer.breakdown(&text);
    let polarity = state.scorer.polarity(&text).unwrap_or(0.0);
    Json(json!({ "polarity": polarity, "hits": hits }))
}

/// Short anonymized id for log lines; raw submissions are never logged.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
