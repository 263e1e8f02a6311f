// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classifier;
pub mod config;
pub mod metrics;
pub mod report;
pub mod scorer;
pub mod ui;
pub mod validate;

// ---- Re-exports for stable public API ----
pub use crate::api::{app, create_router, AppState};
pub use crate::classifier::{classify, ClassifyError};
pub use crate::report::{AnalysisResult, Intensity, Tone};
pub use crate::scorer::{LexiconScorer, PolarityScorer, ScorerError};
pub use crate::validate::{is_valid, REJECT_MESSAGE};
