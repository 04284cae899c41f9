//! Data models for fetched transcripts.

/// A single timed caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSnippet {
    /// Caption text.
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// How long the caption stays on screen, in seconds.
    pub duration: f64,
}

impl TranscriptSnippet {
    /// Create a new snippet.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// Offset at which the caption disappears.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// One language track of a video, fully downloaded.
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    /// Video ID the track belongs to.
    pub video_id: String,
    /// Display name of the language (e.g. "English (auto-generated)").
    pub language: String,
    /// Language code (e.g. "en").
    pub language_code: String,
    /// Whether the track was produced by speech recognition.
    pub is_generated: bool,
    /// Snippets in chronological order.
    pub snippets: Vec<TranscriptSnippet>,
}

impl FetchedTranscript {
    /// Total duration derived from the last snippet.
    pub fn duration(&self) -> f64 {
        super::total_duration(&self.snippets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetched_transcript_duration() {
        let transcript = FetchedTranscript {
            video_id: "vid".to_string(),
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: false,
            snippets: vec![
                TranscriptSnippet::new("Hello", 0.0, 1.5),
                TranscriptSnippet::new("world", 1.5, 2.0),
            ],
        };

        assert_eq!(transcript.duration(), 3.5);
        assert_eq!(transcript.snippets[1].end(), 3.5);
    }
}
