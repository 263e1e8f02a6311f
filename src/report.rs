//! report.rs — Result types for a single classification: tone, intensity,
//! badge color, 1–10 score, and the 0–100 meter value driving the UI bar.
//!
//! Everything here is a plain value; a result is created per request,
//! rendered once, and dropped.

use serde::{Deserialize, Serialize};

/// Base sentiment tone of the analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
    Balanced,
    Mixed,
}

impl Tone {
    /// Badge/meter color for this tone (fixed palette).
    pub fn color(self) -> &'static str {
        match self {
            Tone::Positive => "#28a745",
            Tone::Negative => "#dc3545",
            Tone::Balanced => "#ffc107",
            Tone::Mixed => "#fd7e14",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Positive => "Positive",
            Tone::Negative => "Negative",
            Tone::Balanced => "Balanced",
            Tone::Mixed => "Mixed",
        }
    }

    /// Tone from aggregate polarity alone. Both cut points are exclusive:
    /// polarity exactly ±0.3 stays Balanced.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.3 {
            Tone::Positive
        } else if polarity < -0.3 {
            Tone::Negative
        } else {
            Tone::Balanced
        }
    }
}

/// Qualitative strength tier derived from `abs(polarity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Weak,
    Moderate,
    Strong,
}

impl Intensity {
    /// Tiers: `< 0.2` Weak, `< 0.5` Moderate, else Strong.
    /// Boundaries belong to the upper tier (0.2 is Moderate, 0.5 is Strong).
    pub fn from_strength(strength: f64) -> Self {
        if strength < 0.2 {
            Intensity::Weak
        } else if strength < 0.5 {
            Intensity::Moderate
        } else {
            Intensity::Strong
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Weak => "Weak",
            Intensity::Moderate => "Moderate",
            Intensity::Strong => "Strong",
        }
    }
}

/// Complete outcome of one classification. This is the shape the API
/// returns and the page renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Display label, e.g. "Strong Positive".
    pub label: String,
    pub tone: Tone,
    pub intensity: Intensity,
    /// 1.0–10.0, rounded to two decimals.
    pub score: f64,
    /// Hex color for badge and meter fill.
    pub color: String,
    /// 0–100 width of the meter bar; always `score / 10 * 100`.
    pub meter_percent: f64,
}

impl AnalysisResult {
    /// Build a result from the aggregate polarity in [-1, 1].
    /// `mixed` forces the Mixed tone (free-form inputs with both a
    /// positive- and a negative-scoring word); the intensity still comes
    /// from the aggregate.
    pub fn from_polarity(polarity: f64, mixed: bool) -> Self {
        let tone = if mixed {
            Tone::Mixed
        } else {
            Tone::from_polarity(polarity)
        };
        let intensity = Intensity::from_strength(polarity.abs());

        // Linear map [-1, 1] -> [1, 10]: -1 -> 1.0, 0 -> 5.5, +1 -> 10.0.
        let score = round2((polarity + 1.0) * 4.5 + 1.0);
        let meter_percent = score / 10.0 * 100.0;

        Self {
            label: format!("{} {}", intensity.as_str(), tone.as_str()),
            tone,
            intensity,
            score,
            color: tone.color().to_string(),
            meter_percent,
        }
    }
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
