//! Parsing of YouTube timedtext caption documents.
//!
//! The caption endpoint returns a flat XML document:
//!
//! ```text
//! <transcript>
//!   <text start="0.16" dur="1.92">Hey there &amp;amp; welcome</text>
//!   ...
//! </transcript>
//! ```

use crate::error::{Result, TranscriptError};
use crate::transcript::TranscriptSnippet;
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::OnceLock;

fn text_element() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<text\b([^>]*?)(?:/>|>(.*?)</text>)"#).expect("valid regex")
    })
}

fn attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([a-zA-Z_:-]+)\s*=\s*"([^"]*)""#).expect("valid regex"))
}

fn markup_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// Parse a timedtext XML document into snippets, keeping document order.
///
/// Elements without a body are skipped. A missing `dur` counts as zero.
pub fn parse_timedtext(xml: &str) -> Result<Vec<TranscriptSnippet>> {
    let mut snippets = Vec::new();

    for caps in text_element().captures_iter(xml) {
        let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let Some(body) = caps.get(2).filter(|m| !m.as_str().is_empty()) else {
            continue;
        };

        let mut start = None;
        let mut duration = 0.0;
        for attr in attribute().captures_iter(attrs) {
            match &attr[1] {
                "start" => start = Some(parse_seconds(&attr[2])?),
                "dur" => duration = parse_seconds(&attr[2])?,
                _ => {}
            }
        }

        let start = start.ok_or_else(|| {
            TranscriptError::Backend("caption element is missing its start time".to_string())
        })?;

        let text = clean_text(body.as_str());
        snippets.push(TranscriptSnippet::new(text, start, duration));
    }

    Ok(snippets)
}

fn parse_seconds(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| TranscriptError::Backend(format!("invalid caption timestamp: {}", raw)))
}

/// Decode entities and drop inline markup such as `<font>` or `<i>`.
///
/// Entities are decoded twice because caption text is itself HTML that was
/// escaped again when embedded into the XML.
fn clean_text(raw: &str) -> String {
    let decoded = unescape(&unescape(raw));
    markup_tag().replace_all(&decoded, "").into_owned()
}

/// Decode every HTML5 character reference, named or numeric.
///
/// Unknown references are left as they are.
fn unescape(input: &str) -> String {
    decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timedtext() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript>
            <text start="0.16" dur="1.92">Hey there</text>
            <text start="2.08" dur="3.5">how are you</text>
        </transcript>"#;

        let snippets = parse_timedtext(xml).unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0], TranscriptSnippet::new("Hey there", 0.16, 1.92));
        assert_eq!(snippets[1].text, "how are you");
        assert_eq!(snippets[1].start, 2.08);
    }

    #[test]
    fn test_entities_and_markup() {
        let xml = r#"<transcript>
            <text start="1" dur="2">Tom &amp;amp; Jerry&#39;s &lt;i&gt;show&lt;/i&gt;</text>
            <text start="3" dur="1">caf&#xE9; &quot;ok&quot;</text>
        </transcript>"#;

        let snippets = parse_timedtext(xml).unwrap();
        assert_eq!(snippets[0].text, "Tom & Jerry's show");
        assert_eq!(snippets[1].text, "café \"ok\"");
    }

    #[test]
    fn test_named_html_entities() {
        let xml = r#"<transcript>
            <text start="0" dur="1">caf&amp;eacute;</text>
            <text start="1" dur="1">wait&amp;hellip; it&amp;rsquo;s &amp;mdash; done</text>
        </transcript>"#;

        let snippets = parse_timedtext(xml).unwrap();
        assert_eq!(snippets[0].text, "café");
        assert_eq!(snippets[1].text, "wait… it’s — done");
    }

    #[test]
    fn test_empty_and_self_closing_elements_are_skipped() {
        let xml = r#"<transcript>
            <text start="0" dur="1"/>
            <text start="1" dur="1"></text>
            <text start="2">no duration</text>
        </transcript>"#;

        let snippets = parse_timedtext(xml).unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0], TranscriptSnippet::new("no duration", 2.0, 0.0));
    }

    #[test]
    fn test_invalid_timestamp() {
        let xml = r#"<transcript><text start="abc" dur="1">x</text></transcript>"#;
        assert!(parse_timedtext(xml).is_err());
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape("a & b"), "a & b");
        assert_eq!(unescape("&bogus; &amp;"), "&bogus; &");
    }
}
