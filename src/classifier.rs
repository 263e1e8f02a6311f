//! # Classifier
//! Pure, testable logic that maps raw input text → `AnalysisResult`.
//! No I/O; the polarity backend is injected, so this is suitable for unit
//! tests with fixed-value stubs.
//!
//! Two parsing modes, chosen by a syntactic check:
//! - word-list: the input contains a comma. Pieces are split on commas,
//!   trimmed, and scored one by one; the aggregate is their mean. Empty
//!   pieces are passed to the scorer as-is ("a, ,b" really scores three
//!   pieces).
//! - free-form: the whole input is scored once for the aggregate; each
//!   whitespace-separated word is scored as a secondary signal that only
//!   feeds the mixed-tone override.

use thiserror::Error;

use crate::report::AnalysisResult;
use crate::scorer::{PolarityScorer, ScorerError};

/// Classification failure. No partial results: any scorer failure fails
/// the whole request, and nothing is retried.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Scorer(#[from] ScorerError),
    #[error("scorer returned polarity {value} outside [-1, 1]")]
    PolarityOutOfRange { value: f64 },
}

/// Classify one submission. `text` is expected to be pre-trimmed by the
/// boundary (the validator and the handlers trim before calling in).
pub fn classify<S>(scorer: &S, text: &str) -> Result<AnalysisResult, ClassifyError>
where
    S: PolarityScorer + ?Sized,
{
    if text.contains(',') {
        classify_word_list(scorer, text)
    } else {
        classify_free_form(scorer, text)
    }
}

fn classify_word_list<S>(scorer: &S, text: &str) -> Result<AnalysisResult, ClassifyError>
where
    S: PolarityScorer + ?Sized,
{
    let pieces: Vec<&str> = text.split(',').map(str::trim).collect();

    let mut total = 0.0;
    for piece in &pieces {
        total += checked_polarity(scorer, piece)?;
    }

    // Splitting on a comma always yields at least one piece; the guard
    // keeps the mean defined if that ever changes (empty list -> 0.0).
    let polarity = if pieces.is_empty() {
        0.0
    } else {
        total / pieces.len() as f64
    };

    // Word-list mode never counts positive/negative words, so the mixed
    // override cannot fire here even for mixed per-token polarities.
    Ok(AnalysisResult::from_polarity(polarity, false))
}

fn classify_free_form<S>(scorer: &S, text: &str) -> Result<AnalysisResult, ClassifyError>
where
    S: PolarityScorer + ?Sized,
{
    let polarity = checked_polarity(scorer, text)?;

    let mut positive = 0usize;
    let mut negative = 0usize;
    for word in text.split_whitespace() {
        let s = checked_polarity(scorer, word)?;
        if s > 0.0 {
            positive += 1;
        } else if s < 0.0 {
            negative += 1;
        }
    }

    let mixed = positive > 0 && negative > 0;
    Ok(AnalysisResult::from_polarity(polarity, mixed))
}

/// Score one piece and enforce the backend contract.
fn checked_polarity<S>(scorer: &S, text: &str) -> Result<f64, ClassifyError>
where
    S: PolarityScorer + ?Sized,
{
    let value = scorer.polarity(text)?;
    if !(-1.0..=1.0).contains(&value) {
        return Err(ClassifyError::PolarityOutOfRange { value });
    }
    Ok(value)
}
