//! Stateless page rendering: one static template, one slot.
//!
//! The three page states are rendered distinctly: no submission yet (bare
//! form), rejected input (notice block, no result fields), and a result
//! (badge + meter + score). User-derived text is HTML-escaped.

use crate::report::AnalysisResult;

static PAGE: &str = include_str!("../ui/index.html");

const SLOT: &str = "{{RESULT_BLOCK}}";

/// What the page shows below the form.
#[derive(Debug, Clone, Copy)]
pub enum PageView<'a> {
    /// Nothing submitted yet.
    Empty,
    /// Submission was turned away before classification.
    Rejected(&'a str),
    /// A successful classification.
    Result(&'a AnalysisResult),
}

/// Render the full page for the given state.
pub fn render_page(view: PageView<'_>) -> String {
    let block = match view {
        PageView::Empty => String::new(),
        PageView::Rejected(message) => format!(
            r#"    <div class="notice">{}</div>"#,
            html_escape::encode_text(message)
        ),
        PageView::Result(result) => render_result_block(result),
    };
    PAGE.replace(SLOT, &block)
}

fn render_result_block(result: &AnalysisResult) -> String {
    // Colors come from a fixed palette, never from user input; only the
    // label needs escaping.
    format!(
        r#"    <div class="result">
        <div class="badge" style="background: {color}20; color: {color};">
            {label}
        </div>

        <div class="meter">
            <div class="meter-fill" style="width: {meter}%; background: {color};"></div>
        </div>

        <div class="score">Emotion Strength: {score:.2} / 10</div>
    </div>"#,
        color = result.color,
        label = html_escape::encode_text(&result.label),
        meter = result.meter_percent,
        score = result.score,
    )
}
