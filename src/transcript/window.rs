//! Time-window selection over a transcript.

use super::TranscriptSnippet;
use crate::error::{RangeError, Result, TranscriptError};

/// A validated `[start, end)` range in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    /// Build a window, rejecting a negative start or an end before the start.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if start < 0.0 {
            return Err(TranscriptError::InvalidRange(RangeError::NegativeStart));
        }
        if end < start {
            return Err(TranscriptError::InvalidRange(RangeError::EndBeforeStart { start, end }));
        }
        Ok(Self { start, end })
    }

    /// Whether a snippet starting at `offset` falls inside the window.
    ///
    /// Only the start offset counts: a caption that begins before the window
    /// is dropped even if it runs into it, and one that begins inside is
    /// kept whole even if it runs past the end.
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Result of applying a window to a transcript.
#[derive(Debug, Clone)]
pub struct WindowSelection<'a> {
    /// Snippets whose start lies inside the window, in source order.
    pub snippets: Vec<&'a TranscriptSnippet>,
    /// Duration of the whole transcript.
    pub total_duration: f64,
    /// The window that was applied (end resolved to the total duration if none was given).
    pub window: TimeWindow,
}

impl WindowSelection<'_> {
    /// Start of the first selected snippet.
    pub fn first_start(&self) -> Option<f64> {
        self.snippets.first().map(|s| s.start)
    }

    /// Start of the last selected snippet.
    pub fn last_start(&self) -> Option<f64> {
        self.snippets.last().map(|s| s.start)
    }
}

/// Duration of a snippet sequence: end of the last snippet, or 0 when empty.
pub fn total_duration(snippets: &[TranscriptSnippet]) -> f64 {
    snippets.last().map(|s| s.end()).unwrap_or(0.0)
}

/// Select the snippets that start within `[start_time, end_time)`.
///
/// A missing `end_time` means "until the end of the transcript".
pub fn filter_window(
    snippets: &[TranscriptSnippet],
    start_time: f64,
    end_time: Option<f64>,
) -> Result<WindowSelection<'_>> {
    let total = total_duration(snippets);
    let window = TimeWindow::new(start_time, end_time.unwrap_or(total))?;

    let selected = snippets.iter().filter(|s| window.contains(s.start)).collect();

    Ok(WindowSelection {
        snippets: selected,
        total_duration: total,
        window,
    })
}
