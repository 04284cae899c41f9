//! MCP server implementation.

use super::protocol::*;
use super::tools::{get_tools, TOOL_GET_TRANSCRIPT, TOOL_TRANSCRIPT_INFO};
use crate::backend::TranscriptBackend;
use crate::config::ServerSettings;
use crate::tools::{TranscriptTools, WindowOptions};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server exposing the transcript tools.
pub struct McpServer<B> {
    tools: TranscriptTools<B>,
    name: String,
}

impl<B: TranscriptBackend> McpServer<B> {
    /// Create a new MCP server over a transcript backend.
    pub fn new(backend: B, settings: &ServerSettings) -> Self {
        Self {
            tools: TranscriptTools::new(backend),
            name: settings.name.clone(),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("{} MCP server starting", self.name);
        let stdin = io::stdin();
        self.serve(stdin.lock(), io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted.
    ///
    /// Requests are handled one at a time, in order.
    pub async fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> anyhow::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                writeln!(writer, "{}", serde_json::to_string(&response)?)?;
                writer.flush()?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                return Some(JsonRpcResponse::error(Some(Value::Null), PARSE_ERROR, "Parse error"));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(message.clone()) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid request: {}", e);
                let id = message.get("id").cloned().unwrap_or(Value::Null);
                return Some(JsonRpcResponse::error(Some(id), INVALID_REQUEST, "Invalid Request"));
            }
        };

        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Request: {}", request.method);
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let requested = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .and_then(|p| p.protocol_version);

        let protocol_version = match requested {
            Some(v) if SUPPORTED_PROTOCOL_VERSIONS.contains(&v.as_str()) => v,
            _ => PROTOCOL_VERSION.to_string(),
        };

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: SERVER_VERSION.to_string(),
            },
        };

        respond(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        respond(id, &ToolsListResult { tools: get_tools() })
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, INVALID_PARAMS, &format!("Invalid params: {}", e))
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        info!("Tool call: {}", params.name);
        let result = match params.name.as_str() {
            TOOL_GET_TRANSCRIPT => self.tool_get_transcript(params.arguments).await,
            TOOL_TRANSCRIPT_INFO => self.tool_transcript_info(params.arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        respond(id, &result)
    }

    /// Windowed transcript tool.
    async fn tool_get_transcript(&self, args: Option<Value>) -> ToolCallResult {
        let args = match args {
            Some(a) => a,
            None => return ToolCallResult::error("Missing arguments".to_string()),
        };

        let input = match video_argument(&args) {
            Some(i) => i,
            None => return ToolCallResult::error("Missing 'video_url_or_id' argument".to_string()),
        };

        let options: WindowOptions = match serde_json::from_value(args.clone()) {
            Ok(o) => o,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        ToolCallResult::text(self.tools.fetch_transcript_window(input, &options).await)
    }

    /// Transcript info tool.
    async fn tool_transcript_info(&self, args: Option<Value>) -> ToolCallResult {
        let input = match args.as_ref().and_then(video_argument) {
            Some(i) => i,
            None => return ToolCallResult::error("Missing 'video_url_or_id' argument".to_string()),
        };

        ToolCallResult::text(self.tools.get_transcript_info(input).await)
    }
}

fn video_argument(args: &Value) -> Option<&str> {
    args.get("video_url_or_id").and_then(|v| v.as_str())
}

/// Wrap a serializable result in a success response.
fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, &format!("Serialization failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{track, FakeBackend, FakeVideo};
    use crate::transcript::TranscriptSnippet;
    use std::io::Cursor;

    fn server() -> McpServer<FakeBackend> {
        let backend = FakeBackend::new().with_video(
            "abc123",
            FakeVideo::Tracks(vec![(
                track("abc123", "en", "English", false),
                vec![
                    TranscriptSnippet::new("first", 0.0, 2.0),
                    TranscriptSnippet::new("second", 2.0, 2.0),
                ],
            )]),
        );
        McpServer::new(backend, &ServerSettings::default())
    }

    /// Feed lines through the server and collect the parsed responses.
    async fn exchange(lines: &[Value]) -> Vec<Value> {
        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let mut output = Vec::new();
        server().serve(Cursor::new(input), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn call(id: u64, name: &str, arguments: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
    }

    fn text_of(response: &Value) -> &str {
        response["result"]["content"][0]["text"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let responses = exchange(&[
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": { "name": "test", "version": "0.0.1" }
                }
            }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "ping" }),
        ])
        .await;

        // The notification gets no reply
        assert_eq!(responses.len(), 2);

        let init = &responses[0];
        assert_eq!(init["id"], 1);
        assert_eq!(init["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(init["result"]["serverInfo"]["name"], "youtube-transcript-server");
        assert_eq!(init["result"]["capabilities"]["tools"]["listChanged"], false);

        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_unknown_protocol_version_falls_back() {
        let responses = exchange(&[json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "1999-01-01" }
        })])
        .await;

        assert_eq!(responses[0]["result"]["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let responses = exchange(&[json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" })]).await;

        let tools = responses[0]["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["get_youtube_transcript", "get_transcript_info"]);
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["video_url_or_id"]));
    }

    #[tokio::test]
    async fn test_get_transcript_call() {
        let responses = exchange(&[call(
            7,
            "get_youtube_transcript",
            json!({ "video_url_or_id": "https://youtu.be/abc123", "start_time": 1, "end_time": 10 }),
        )])
        .await;

        let response = &responses[0];
        assert_eq!(response["id"], 7);
        assert!(response["result"].get("isError").is_none());

        let payload: Value = serde_json::from_str(text_of(response)).unwrap();
        assert_eq!(payload["returned_entries"], 1);
        assert_eq!(payload["transcript"], "[2.00s] second");
    }

    #[tokio::test]
    async fn test_tool_errors_are_text() {
        let responses = exchange(&[
            call(1, "get_youtube_transcript", json!({ "video_url_or_id": "nope" })),
            call(2, "get_transcript_info", json!({ "video_url_or_id": "nope" })),
        ])
        .await;

        assert_eq!(text_of(&responses[0]), "Error: Video unavailable: nope");
        assert_eq!(
            text_of(&responses[1]),
            "Error getting transcript info: Video unavailable: nope"
        );
        assert!(responses[0].get("error").is_none());
    }

    #[tokio::test]
    async fn test_bad_tool_calls() {
        let responses = exchange(&[
            call(1, "get_youtube_transcript", json!({})),
            call(2, "get_youtube_transcript", json!({ "video_url_or_id": "abc123", "start_time": "soon" })),
            call(3, "summarize", json!({})),
            json!({ "jsonrpc": "2.0", "id": 4, "method": "tools/call" }),
        ])
        .await;

        assert_eq!(responses[0]["result"]["isError"], true);
        assert_eq!(text_of(&responses[0]), "Missing 'video_url_or_id' argument");
        assert_eq!(responses[1]["result"]["isError"], true);
        assert!(text_of(&responses[1]).starts_with("Invalid arguments"));
        assert_eq!(text_of(&responses[2]), "Unknown tool: summarize");
        assert_eq!(responses[3]["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let input = "not json\n\n{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"resources/list\"}\n";
        let mut output = Vec::new();
        server().serve(Cursor::new(input), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["id"], 3);
        assert_eq!(responses[1]["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_null_id_and_invalid_requests() {
        let responses = exchange(&[
            json!({ "jsonrpc": "2.0", "id": null, "method": "ping" }),
            json!({ "jsonrpc": "2.0", "id": 5 }),
            json!([1, 2, 3]),
        ])
        .await;

        assert_eq!(responses.len(), 3);

        // A null id is still a request and gets an answer
        assert!(responses[0].get("id").is_some_and(Value::is_null));
        assert_eq!(responses[0]["result"], json!({}));

        assert_eq!(responses[1]["id"], 5);
        assert_eq!(responses[1]["error"]["code"], INVALID_REQUEST);
        assert!(responses[2]["id"].is_null());
        assert_eq!(responses[2]["error"]["code"], INVALID_REQUEST);
    }
}
