//! Error types for ytscribe.

use thiserror::Error;

/// Library-level error type for transcript operations.
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("{0}")]
    InvalidRange(RangeError),

    #[error("Transcripts are disabled for video: {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {video_id} in languages {}", format_codes(.requested))]
    NoTranscriptFound {
        video_id: String,
        requested: Vec<String>,
    },

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("{0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Why a requested time window was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeError {
    NegativeStart,
    EndBeforeStart { start: f64, end: f64 },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::NegativeStart => write!(f, "start_time must be >= 0"),
            RangeError::EndBeforeStart { start, end } => write!(
                f,
                "end_time ({}s) must be >= start_time ({}s)",
                float_literal(*end),
                float_literal(*start)
            ),
        }
    }
}

/// Render a language list the way agents see it in error messages: `['en', 'de']`.
pub fn format_codes(codes: &[String]) -> String {
    let quoted: Vec<String> = codes.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Print a float so whole numbers keep one decimal (`3` -> `3.0`).
fn float_literal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Result type alias for ytscribe operations.
pub type Result<T> = std::result::Result<T, TranscriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_messages() {
        assert_eq!(
            TranscriptError::InvalidRange(RangeError::NegativeStart).to_string(),
            "start_time must be >= 0"
        );
        let err = TranscriptError::InvalidRange(RangeError::EndBeforeStart { start: 3.0, end: 1.5 });
        assert_eq!(err.to_string(), "end_time (1.5s) must be >= start_time (3.0s)");
    }

    #[test]
    fn test_format_codes() {
        assert_eq!(format_codes(&["en".to_string(), "de".to_string()]), "['en', 'de']");
        assert_eq!(format_codes(&[]), "[]");
    }
}
