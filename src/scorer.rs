//! Polarity scoring capability: the trait the classifier is injected with,
//! plus the default lexicon-backed implementation.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Largest absolute word valence in the lexicon; normalizes to [-1, 1].
const VALENCE_SCALE: f64 = 5.0;

/// Failure of the scoring backend for a given text.
#[derive(Debug, Clone, Error)]
#[error("sentiment backend failed: {reason}")]
pub struct ScorerError {
    pub reason: String,
}

impl ScorerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A capability that estimates sentiment polarity of a short text,
/// returning a value in [-1.0, 1.0] (negative to positive).
///
/// The classifier takes this as an injected dependency so the backend can
/// be swapped (tests use fixed-value stubs).
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64, ScorerError>;
}

/// Lexicon-backed scorer. Word valences are integers in [-5, 5]; the text
/// polarity is the mean valence of matched tokens, scaled to [-1, 1].
/// Unmatched text scores 0.0. Infallible, but kept behind the trait's
/// `Result` so failing backends share the same seam.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_valence(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Per-token valences after negation adjustment, for diagnostics.
    /// Only tokens with a non-zero adjusted valence are reported.
    #[cfg_attr(not(any(test, feature = "debug")), allow(dead_code))]
    pub fn breakdown(&self, text: &str) -> Vec<(String, i32)> {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut out = Vec::new();
        for i in 0..tokens.len() {
            let adj = self.adjusted_valence(&tokens, i);
            if adj != 0 {
                out.push((tokens[i].clone(), adj));
            }
        }
        out
    }

    /// Valence of token `i` with the negation window applied:
    /// a negator within the previous 1..=3 tokens flips the sign.
    fn adjusted_valence(&self, tokens: &[String], i: usize) -> i32 {
        let base = self.word_valence(tokens[i].as_str());
        if base == 0 {
            return 0;
        }
        let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
        if negated {
            -base
        } else {
            base
        }
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64, ScorerError> {
        let tokens: Vec<String> = tokenize(text).collect();

        let mut sum: i64 = 0;
        let mut matched: usize = 0;
        for i in 0..tokens.len() {
            let adj = self.adjusted_valence(&tokens, i);
            if adj != 0 {
                sum += i64::from(adj);
                matched += 1;
            }
        }

        if matched == 0 {
            return Ok(0.0);
        }
        let mean = sum as f64 / matched as f64;
        Ok((mean / VALENCE_SCALE).clamp(-1.0, 1.0))
    }
}

/// Module-level tokenization: alphanumeric tokens, lower-case.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

/// Small negator set. Tokenization splits contractions on the apostrophe,
/// so "isn't" arrives as the stem "isn"; the stems below only ever come
/// from contractions ("no longer" is covered by "no").
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "cannot"
            | "without"
            | "isn"
            | "wasn"
            | "aren"
            | "don"
            | "doesn"
            | "didn"
            | "shouldn"
            | "couldn"
            | "wouldn"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_words_score_with_matching_sign() {
        let s = LexiconScorer::new();
        assert!(s.polarity("love").unwrap() > 0.0);
        assert!(s.polarity("hate").unwrap() < 0.0);
    }

    #[test]
    fn unknown_text_scores_zero() {
        let s = LexiconScorer::new();
        assert_eq!(s.polarity("quartz pebble xylophone").unwrap(), 0.0);
        assert_eq!(s.polarity("").unwrap(), 0.0);
    }

    #[test]
    fn negation_flips_the_sign() {
        let s = LexiconScorer::new();
        let plain = s.polarity("good").unwrap();
        let negated = s.polarity("not good").unwrap();
        assert!(plain > 0.0);
        assert!((negated + plain).abs() < 1e-9, "negation should mirror the score");
    }

    #[test]
    fn polarity_stays_in_bounds() {
        let s = LexiconScorer::new();
        for text in [
            "love love love wonderful amazing best",
            "hate hate awful terrible worst horrible",
            "good bad good bad",
            "I love puppies but I hate rain",
        ] {
            let p = s.polarity(text).unwrap();
            assert!((-1.0..=1.0).contains(&p), "{} -> {}", text, p);
        }
    }

    #[test]
    fn breakdown_reports_only_matched_tokens() {
        let s = LexiconScorer::new();
        let hits = s.breakdown("I love rainy mornings but hate wet socks");
        let words: Vec<&str> = hits.iter().map(|(w, _)| w.as_str()).collect();
        assert!(words.contains(&"love"));
        assert!(words.contains(&"hate"));
        assert!(!words.contains(&"socks"));
    }

    #[test]
    fn casing_is_ignored() {
        let s = LexiconScorer::new();
        assert_eq!(
            s.polarity("LOVE this").unwrap(),
            s.polarity("love this").unwrap()
        );
    }
}
