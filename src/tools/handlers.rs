//! Tool handlers: orchestrate normalization, backend calls and reshaping.

use super::report::{TrackSummary, TranscriptInfoReport, WindowReport};
use crate::backend::TranscriptBackend;
use crate::error::{format_codes, Result, TranscriptError};
use crate::transcript::filter_window;
use crate::video_id::normalize;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, warn};

/// Languages tried when the caller does not pick any.
pub const DEFAULT_LANGUAGES: &[&str] = &["en"];

/// Track used by the info tool to count entries and measure duration.
pub const INFO_LANGUAGE: &str = "en";

/// Options for a windowed transcript fetch.
///
/// - `start_time` (default `0`): snippets starting before this are dropped.
/// - `end_time` (default none): snippets starting at or after this are
///   dropped; none means the end of the transcript.
/// - `languages` (default `["en"]`): language codes in order of preference.
///   The first one the video has a track for is used. `null` means the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub start_time: f64,
    pub end_time: Option<f64>,
    #[serde(deserialize_with = "languages_or_default")]
    pub languages: Vec<String>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: None,
            languages: default_languages(),
        }
    }
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

fn languages_or_default<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let languages = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(languages.unwrap_or_else(default_languages))
}

/// The transcript tools, bound to a backend.
pub struct TranscriptTools<B> {
    backend: B,
}

impl<B: TranscriptBackend> TranscriptTools<B> {
    /// Create the tools over a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Fetch the part of a transcript that falls within a time window.
    ///
    /// Returns pretty-printed JSON, or an `Error: ...` sentence.
    #[instrument(skip(self, options))]
    pub async fn fetch_transcript_window(&self, video_url_or_id: &str, options: &WindowOptions) -> String {
        let payload = self
            .window_report(video_url_or_id, options)
            .await
            .and_then(|report| to_json(&report));

        match payload {
            Ok(json) => json,
            Err(e) => {
                warn!("Transcript fetch failed: {}", e);
                render_window_error(video_url_or_id, &options.languages, &e)
            }
        }
    }

    /// Build the window report without rendering it.
    pub async fn window_report(&self, video_url_or_id: &str, options: &WindowOptions) -> Result<WindowReport> {
        let video_id = normalize(video_url_or_id);
        debug!("Resolved video id {}", video_id);

        let transcript = self.backend.fetch(&video_id, &options.languages).await?;
        let selection = filter_window(&transcript.snippets, options.start_time, options.end_time)?;

        info!(
            "Selected {} of {} snippets from {} ({})",
            selection.snippets.len(),
            transcript.snippets.len(),
            transcript.video_id,
            transcript.language_code
        );

        Ok(WindowReport::new(&transcript, &selection))
    }

    /// Describe the transcripts available for a video.
    ///
    /// Returns pretty-printed JSON, or an `Error getting transcript info: ...` sentence.
    #[instrument(skip(self))]
    pub async fn get_transcript_info(&self, video_url_or_id: &str) -> String {
        match self.info_report(video_url_or_id).await.and_then(|report| to_json(&report)) {
            Ok(json) => json,
            Err(e) => {
                warn!("Transcript info failed: {}", e);
                format!("Error getting transcript info: {}", e)
            }
        }
    }

    /// Build the info report without rendering it.
    ///
    /// Entry count and duration always come from the English track, so this
    /// fails for videos without one.
    pub async fn info_report(&self, video_url_or_id: &str) -> Result<TranscriptInfoReport> {
        let video_id = normalize(video_url_or_id);
        let list = self.backend.list(&video_id).await?;

        let tracks: Vec<TrackSummary> = list.iter().map(TrackSummary::from).collect();

        let reference = list.find_transcript(&[INFO_LANGUAGE.to_string()])?;
        let fetched = self.backend.fetch_track(reference).await?;

        Ok(TranscriptInfoReport::new(&video_id, &fetched, tracks))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Turn a failed fetch into the sentence shown to the agent.
///
/// Messages quote the caller's original input rather than the normalized id.
fn render_window_error(video_url_or_id: &str, languages: &[String], err: &TranscriptError) -> String {
    match err {
        TranscriptError::InvalidRange(range) => format!("Error: {}", range),
        TranscriptError::TranscriptsDisabled(_) => {
            format!("Error: Transcripts are disabled for video: {}", video_url_or_id)
        }
        TranscriptError::NoTranscriptFound { .. } => format!(
            "Error: No transcript found for video: {} in languages: {}",
            video_url_or_id,
            format_codes(languages)
        ),
        TranscriptError::VideoUnavailable(_) => {
            format!("Error: Video unavailable: {}", video_url_or_id)
        }
        other => format!("Error fetching transcript: {}", other),
    }
}
