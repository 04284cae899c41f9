//! Transcript data model and the pure reshaping logic applied to it.

mod format;
mod models;
mod window;

pub use format::{format_duration, format_seconds, render_snippets};
pub use models::{FetchedTranscript, TranscriptSnippet};
pub use window::{filter_window, total_duration, TimeWindow, WindowSelection};
