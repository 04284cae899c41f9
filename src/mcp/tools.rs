//! MCP tool definitions for ytscribe.

use super::protocol::Tool;
use serde_json::json;

pub const TOOL_GET_TRANSCRIPT: &str = "get_youtube_transcript";
pub const TOOL_TRANSCRIPT_INFO: &str = "get_transcript_info";

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: TOOL_GET_TRANSCRIPT.to_string(),
            description: "Fetches the transcript of a YouTube video between specified timestamps. \
                Returns a JSON string containing transcript entries with metadata."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url_or_id": {
                        "type": "string",
                        "description": "YouTube video URL or video ID"
                    },
                    "start_time": {
                        "type": "number",
                        "description": "Start time in seconds",
                        "default": 0
                    },
                    "end_time": {
                        "type": ["number", "null"],
                        "description": "End time in seconds (omit for end of video)",
                        "default": null
                    },
                    "languages": {
                        "type": ["array", "null"],
                        "items": { "type": "string" },
                        "description": "Preferred transcript languages, in order",
                        "default": ["en"]
                    }
                },
                "required": ["video_url_or_id"]
            }),
        },
        Tool {
            name: TOOL_TRANSCRIPT_INFO.to_string(),
            description: "Get information about available transcripts for a YouTube video. \
                Returns a JSON string with available transcript languages, total entries, and video duration."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url_or_id": {
                        "type": "string",
                        "description": "YouTube video URL or video ID"
                    }
                },
                "required": ["video_url_or_id"]
            }),
        },
    ]
}
