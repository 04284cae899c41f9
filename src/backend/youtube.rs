//! YouTube transcript backend.
//!
//! Caption tracks are discovered through the same player API the mobile
//! apps use: the watch page yields an Innertube API key, the player
//! endpoint yields the caption track list, and each track is a timedtext
//! XML document.

use super::timedtext::parse_timedtext;
use super::{TranscriptBackend, TranscriptList, TranscriptTrack, TranslationLanguage};
use crate::config::YoutubeSettings;
use crate::error::{Result, TranscriptError};
use crate::transcript::FetchedTranscript;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, COOKIE};
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";

const REASON_VIDEO_UNAVAILABLE: &str = "This video is unavailable";
const REASON_BOT_DETECTED: &str = "Sign in to confirm you’re not a bot";
const REASON_AGE_RESTRICTED: &str = "This video may be inappropriate for some users.";

fn api_key_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("valid regex")
    })
}

fn consent_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"name="v" value="(.*?)""#).expect("valid regex"))
}

/// YouTube caption backend over HTTPS.
pub struct YoutubeBackend {
    client: reqwest::Client,
    settings: YoutubeSettings,
}

impl YoutubeBackend {
    /// Create a backend with the given settings.
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&settings.accept_language)
            .map_err(|e| TranscriptError::Config(format!("Invalid accept_language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers);

        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(proxy) = &settings.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| TranscriptError::Config(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
            settings: settings.clone(),
        })
    }

    /// Fetch the watch page, accepting the EU consent interstitial if shown.
    ///
    /// Returns the page body and the consent cookie to reuse, if one was needed.
    async fn fetch_watch_page(&self, video_id: &str) -> Result<(String, Option<String>)> {
        let html = self.get_watch_page(video_id, None).await?;

        if !html.contains("action=\"https://consent.youtube.com/s\"") {
            return Ok((html, None));
        }

        debug!("Consent page shown, retrying with consent cookie");
        let token = consent_pattern()
            .captures(&html)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| {
                TranscriptError::Backend(format!(
                    "Failed to automatically give consent to saving cookies for video {}",
                    video_id
                ))
            })?;

        let cookie = format!("CONSENT=YES+{}", token);
        let html = self.get_watch_page(video_id, Some(&cookie)).await?;

        if html.contains("action=\"https://consent.youtube.com/s\"") {
            return Err(TranscriptError::Backend(format!(
                "Failed to automatically give consent to saving cookies for video {}",
                video_id
            )));
        }

        Ok((html, Some(cookie)))
    }

    async fn get_watch_page(&self, video_id: &str, cookie: Option<&str>) -> Result<String> {
        let url = Url::parse_with_params(WATCH_URL, &[("v", video_id)])
            .map_err(|e| TranscriptError::Backend(format!("Invalid watch URL: {}", e)))?;

        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(unescape_page(&response.text().await?))
    }

    /// Call the Innertube player endpoint for a video.
    async fn fetch_player_response(
        &self,
        video_id: &str,
        api_key: &str,
        cookie: Option<&str>,
    ) -> Result<Value> {
        let url = Url::parse_with_params(PLAYER_URL, &[("key", api_key)])
            .map_err(|e| TranscriptError::Backend(format!("Invalid player URL: {}", e)))?;

        let body = json!({
            "context": {
                "client": {
                    "clientName": self.settings.innertube_client_name,
                    "clientVersion": self.settings.innertube_client_version,
                }
            },
            "videoId": video_id,
        });

        let mut request = self.client.post(url).json(&body);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl TranscriptBackend for YoutubeBackend {
    #[instrument(skip(self))]
    async fn list(&self, video_id: &str) -> Result<TranscriptList> {
        let (html, cookie) = self.fetch_watch_page(video_id).await?;
        let api_key = extract_api_key(&html, video_id)?;
        let player = self
            .fetch_player_response(video_id, &api_key, cookie.as_deref())
            .await?;

        let list = parse_player_response(video_id, &player)?;
        info!("Found {} caption tracks", list.iter().count());
        Ok(list)
    }

    #[instrument(skip(self, track), fields(video_id = %track.video_id, language = %track.language_code))]
    async fn fetch_track(&self, track: &TranscriptTrack) -> Result<FetchedTranscript> {
        if track.url.contains("&exp=xpe") {
            return Err(TranscriptError::Backend(format!(
                "The requested video {} requires a PO token, which is not supported",
                track.video_id
            )));
        }

        let response = self.client.get(&track.url).send().await?.error_for_status()?;
        let xml = response.text().await?;
        let snippets = parse_timedtext(&xml)?;
        debug!("Parsed {} snippets", snippets.len());

        Ok(FetchedTranscript {
            video_id: track.video_id.clone(),
            language: track.language.clone(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated,
            snippets,
        })
    }
}

/// The watch page escapes `&` inside embedded JSON.
fn unescape_page(html: &str) -> String {
    html.replace("\\u0026", "&")
}

/// Pull the Innertube API key out of the watch page.
fn extract_api_key(html: &str, video_id: &str) -> Result<String> {
    if let Some(caps) = api_key_pattern().captures(html) {
        return Ok(caps[1].to_string());
    }

    if html.contains("class=\"g-recaptcha\"") {
        warn!("YouTube is blocking requests from this IP");
        return Err(TranscriptError::Backend(format!(
            "Could not retrieve a transcript for the video {}: YouTube is blocking requests from your IP",
            video_id
        )));
    }

    Err(TranscriptError::Backend(format!(
        "Could not retrieve a transcript for the video {}: the watch page could not be parsed",
        video_id
    )))
}

/// Map the player endpoint's answer to a track list or an error kind.
fn parse_player_response(video_id: &str, player: &Value) -> Result<TranscriptList> {
    check_playability(video_id, &player["playabilityStatus"])?;

    let captions = &player["captions"]["playerCaptionsTracklistRenderer"];
    let Some(caption_tracks) = captions["captionTracks"].as_array() else {
        return Err(TranscriptError::TranscriptsDisabled(video_id.to_string()));
    };

    let translation_languages: Vec<TranslationLanguage> = captions["translationLanguages"]
        .as_array()
        .map(|langs| {
            langs
                .iter()
                .map(|lang| TranslationLanguage {
                    language: text_of(&lang["languageName"]),
                    language_code: lang["languageCode"].as_str().unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let tracks = caption_tracks
        .iter()
        .map(|caption| {
            let translatable = caption["isTranslatable"].as_bool().unwrap_or(false);
            TranscriptTrack {
                video_id: video_id.to_string(),
                language: text_of(&caption["name"]),
                language_code: caption["languageCode"].as_str().unwrap_or_default().to_string(),
                is_generated: caption["kind"].as_str() == Some("asr"),
                translation_languages: translatable.then(|| translation_languages.clone()),
                url: caption["baseUrl"]
                    .as_str()
                    .unwrap_or_default()
                    .replace("&fmt=srv3", ""),
            }
        })
        .collect();

    Ok(TranscriptList::new(video_id, tracks))
}

fn check_playability(video_id: &str, status: &Value) -> Result<()> {
    let code = match status["status"].as_str() {
        None | Some("OK") => return Ok(()),
        Some(code) => code,
    };
    let reason = status["reason"].as_str().unwrap_or_default();

    match (code, reason) {
        ("LOGIN_REQUIRED", REASON_BOT_DETECTED) => Err(TranscriptError::Backend(format!(
            "Could not retrieve a transcript for the video {}: YouTube is blocking requests from your IP",
            video_id
        ))),
        ("LOGIN_REQUIRED", REASON_AGE_RESTRICTED) => Err(TranscriptError::Backend(format!(
            "Could not retrieve a transcript for the video {}: this video is age-restricted",
            video_id
        ))),
        ("ERROR", REASON_VIDEO_UNAVAILABLE) => {
            if video_id.starts_with("http://") || video_id.starts_with("https://") {
                Err(TranscriptError::Backend(format!(
                    "Invalid video id {}: pass the video ID, not the video URL",
                    video_id
                )))
            } else {
                Err(TranscriptError::VideoUnavailable(video_id.to_string()))
            }
        }
        _ => {
            let runs = &status["errorScreen"]["playerErrorMessageRenderer"]["subreason"]["runs"];
            let subreasons: Vec<String> = runs
                .as_array()
                .map(|runs| {
                    runs.iter()
                        .filter_map(|run| run["text"].as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();

            let mut message = format!("The video {} is unplayable: {}", video_id, reason);
            if !subreasons.is_empty() {
                message.push_str(&format!(" ({})", subreasons.join("")));
            }
            Err(TranscriptError::Backend(message))
        }
    }
}

/// Read a localized text node, which is either `{runs: [{text}]}` or `{simpleText}`.
fn text_of(node: &Value) -> String {
    node["runs"][0]["text"]
        .as_str()
        .or_else(|| node["simpleText"].as_str())
        .unwrap_or_default()
        .to_string()
}
