//! Text rendering for durations and transcript lines.

use super::TranscriptSnippet;

/// Format seconds as MM:SS, or HH:MM:SS once an hour is reached.
///
/// Fractions are truncated. Negative and NaN input is undefined; the cast
/// currently clamps it to `00:00`.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Format seconds with two decimals and a unit suffix, e.g. `12.50s`.
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// Render snippets as `[12.34s] text` lines for LLM context.
pub fn render_snippets<'a, I>(snippets: I) -> String
where
    I: IntoIterator<Item = &'a TranscriptSnippet>,
{
    snippets
        .into_iter()
        .map(|s| format!("[{:.2}s] {}", s.start, s.text))
        .collect::<Vec<_>>()
        .join("\n")
}
