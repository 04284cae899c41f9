//! Serializable result records returned to agents.

use crate::backend::{TranscriptTrack, TranslationLanguage};
use crate::transcript::{format_duration, format_seconds, render_snippets, FetchedTranscript, WindowSelection};
use serde::Serialize;

const NOT_AVAILABLE: &str = "N/A";

/// Result of a windowed transcript fetch. Field order is the JSON order.
#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub video_id: String,
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub total_duration: String,
    pub requested_start_time: String,
    pub requested_end_time: String,
    pub actual_start_time: String,
    pub actual_end_time: String,
    pub total_entries: usize,
    pub returned_entries: usize,
    pub transcript: String,
}

impl WindowReport {
    /// Build the report for a window applied to a fetched transcript.
    pub fn new(transcript: &FetchedTranscript, selection: &WindowSelection<'_>) -> Self {
        Self {
            video_id: transcript.video_id.clone(),
            language: transcript.language.clone(),
            language_code: transcript.language_code.clone(),
            is_generated: transcript.is_generated,
            total_duration: format_seconds(selection.total_duration),
            requested_start_time: format_seconds(selection.window.start),
            requested_end_time: format_seconds(selection.window.end),
            actual_start_time: seconds_or_na(selection.first_start()),
            actual_end_time: seconds_or_na(selection.last_start()),
            total_entries: transcript.snippets.len(),
            returned_entries: selection.snippets.len(),
            transcript: render_snippets(selection.snippets.iter().copied()),
        }
    }
}

fn seconds_or_na(seconds: Option<f64>) -> String {
    seconds
        .map(format_seconds)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Summary of one available caption track.
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub is_translatable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_languages: Option<Vec<TranslationLanguage>>,
}

impl From<&TranscriptTrack> for TrackSummary {
    fn from(track: &TranscriptTrack) -> Self {
        let is_translatable = track.is_translatable();
        Self {
            language: track.language.clone(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated,
            is_translatable,
            translation_languages: if is_translatable {
                track.translation_languages.clone()
            } else {
                None
            },
        }
    }
}

/// Overview of a video's transcripts.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptInfoReport {
    pub video_id: String,
    pub total_entries: usize,
    pub total_duration: String,
    pub total_duration_formatted: String,
    pub available_transcripts: Vec<TrackSummary>,
}

impl TranscriptInfoReport {
    pub fn new(video_id: &str, reference: &FetchedTranscript, tracks: Vec<TrackSummary>) -> Self {
        let duration = reference.duration();
        Self {
            video_id: video_id.to_string(),
            total_entries: reference.snippets.len(),
            total_duration: format_seconds(duration),
            total_duration_formatted: format_duration(duration),
            available_transcripts: tracks,
        }
    }
}
