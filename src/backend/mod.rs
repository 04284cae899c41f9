//! Transcript backend abstraction.
//!
//! Provides a trait-based interface over the service that lists and
//! downloads caption tracks, so the tool handlers can be exercised against
//! an in-memory backend in tests.

mod timedtext;
mod youtube;

pub use youtube::YoutubeBackend;

use crate::error::{Result, TranscriptError};
use crate::transcript::FetchedTranscript;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A language a track can be machine-translated into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationLanguage {
    pub language: String,
    pub language_code: String,
}

/// One caption track advertised for a video, not yet downloaded.
#[derive(Debug, Clone)]
pub struct TranscriptTrack {
    /// Video the track belongs to.
    pub video_id: String,
    /// Display name of the language.
    pub language: String,
    /// Language code (e.g. "en", "pt-BR").
    pub language_code: String,
    /// Whether the track was produced by speech recognition.
    pub is_generated: bool,
    /// Targets the backend can translate this track into. `None` when the
    /// backend does not report them.
    pub translation_languages: Option<Vec<TranslationLanguage>>,
    /// Where the track's captions are downloaded from.
    pub url: String,
}

impl TranscriptTrack {
    /// Whether the backend can translate this track.
    pub fn is_translatable(&self) -> bool {
        self.translation_languages
            .as_ref()
            .is_some_and(|langs| !langs.is_empty())
    }
}

/// All caption tracks available for a video.
#[derive(Debug, Clone)]
pub struct TranscriptList {
    pub video_id: String,
    manual: Vec<TranscriptTrack>,
    generated: Vec<TranscriptTrack>,
}

impl TranscriptList {
    /// Build a list, splitting tracks into manually created and generated.
    pub fn new(video_id: impl Into<String>, tracks: Vec<TranscriptTrack>) -> Self {
        let (generated, manual): (Vec<_>, Vec<_>) =
            tracks.into_iter().partition(|t| t.is_generated);
        Self {
            video_id: video_id.into(),
            manual,
            generated,
        }
    }

    /// Iterate all tracks, manually created ones first.
    pub fn iter(&self) -> impl Iterator<Item = &TranscriptTrack> {
        self.manual.iter().chain(self.generated.iter())
    }

    /// Find the first track matching the language codes in priority order.
    ///
    /// For each code a manually created track wins over a generated one.
    pub fn find_transcript(&self, language_codes: &[String]) -> Result<&TranscriptTrack> {
        language_codes
            .iter()
            .find_map(|code| {
                self.manual
                    .iter()
                    .find(|t| &t.language_code == code)
                    .or_else(|| self.generated.iter().find(|t| &t.language_code == code))
            })
            .ok_or_else(|| TranscriptError::NoTranscriptFound {
                video_id: self.video_id.clone(),
                requested: language_codes.to_vec(),
            })
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptBackend: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list(&self, video_id: &str) -> Result<TranscriptList>;

    /// Download one caption track.
    async fn fetch_track(&self, track: &TranscriptTrack) -> Result<FetchedTranscript>;

    /// Download the first available track among `languages`.
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<FetchedTranscript> {
        let list = self.list(video_id).await?;
        let track = list.find_transcript(languages)?;
        self.fetch_track(track).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backend for handler and server tests.

    use super::*;
    use crate::transcript::TranscriptSnippet;
    use std::collections::HashMap;

    /// What the fake backend should do for a given video.
    pub enum FakeVideo {
        Tracks(Vec<(TranscriptTrack, Vec<TranscriptSnippet>)>),
        Disabled,
        Unavailable,
        Broken(String),
    }

    #[derive(Default)]
    pub struct FakeBackend {
        videos: HashMap<String, FakeVideo>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_video(mut self, video_id: &str, video: FakeVideo) -> Self {
            self.videos.insert(video_id.to_string(), video);
            self
        }
    }

    pub fn track(video_id: &str, code: &str, language: &str, generated: bool) -> TranscriptTrack {
        TranscriptTrack {
            video_id: video_id.to_string(),
            language: language.to_string(),
            language_code: code.to_string(),
            is_generated: generated,
            translation_languages: None,
            url: format!("fake://{}/{}", video_id, code),
        }
    }

    #[async_trait]
    impl TranscriptBackend for FakeBackend {
        async fn list(&self, video_id: &str) -> Result<TranscriptList> {
            match self.videos.get(video_id) {
                Some(FakeVideo::Tracks(tracks)) => Ok(TranscriptList::new(
                    video_id,
                    tracks.iter().map(|(t, _)| t.clone()).collect(),
                )),
                Some(FakeVideo::Disabled) => {
                    Err(TranscriptError::TranscriptsDisabled(video_id.to_string()))
                }
                Some(FakeVideo::Broken(msg)) => Err(TranscriptError::Backend(msg.clone())),
                Some(FakeVideo::Unavailable) | None => {
                    Err(TranscriptError::VideoUnavailable(video_id.to_string()))
                }
            }
        }

        async fn fetch_track(&self, track: &TranscriptTrack) -> Result<FetchedTranscript> {
            let Some(FakeVideo::Tracks(tracks)) = self.videos.get(&track.video_id) else {
                return Err(TranscriptError::VideoUnavailable(track.video_id.clone()));
            };
            let (_, snippets) = tracks
                .iter()
                .find(|(t, _)| t.url == track.url)
                .ok_or_else(|| TranscriptError::Backend("unknown track".to_string()))?;

            Ok(FetchedTranscript {
                video_id: track.video_id.clone(),
                language: track.language.clone(),
                language_code: track.language_code.clone(),
                is_generated: track.is_generated,
                snippets: snippets.clone(),
            })
        }
    }
}
