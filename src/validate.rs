//! Input gate for the strict variant: letters and whitespace only.
//! Short-circuits before classification; rejected input surfaces a fixed
//! user-facing message and never reaches the scorer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal message shown for rejected submissions.
pub const REJECT_MESSAGE: &str =
    "Only alphabets and spaces allowed. Numbers & special characters are blocked.";

static ALPHA_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("validator regex"));

/// Accept iff the trimmed input is non-empty and every character is an
/// ASCII letter or whitespace.
pub fn is_valid(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && ALPHA_SPACE.is_match(trimmed)
}
