//! The two operations exposed to agents.
//!
//! Handlers never fail: every outcome, including errors, is rendered to a
//! single text payload that a language model can read directly.

mod handlers;
mod report;

pub use handlers::{TranscriptTools, WindowOptions, DEFAULT_LANGUAGES, INFO_LANGUAGE};
pub use report::{TrackSummary, TranscriptInfoReport, WindowReport};
