//! ytscribe - YouTube transcripts for AI assistants
//!
//! An MCP server that lets language-model agents read YouTube transcripts
//! a slice at a time.
//!
//! # Overview
//!
//! Two tools are exposed:
//! - `get_youtube_transcript` returns the captions that start inside a
//!   `[start_time, end_time)` window, with timestamps and metadata
//! - `get_transcript_info` lists the caption tracks a video has, with the
//!   English track's entry count and duration
//!
//! Both always answer with text: pretty-printed JSON on success, a plain
//! `Error...` sentence otherwise.
//!
//! # Architecture
//!
//! - `video_id` - Video ID extraction from URLs
//! - `transcript` - Snippet model, window filtering, duration formatting
//! - `backend` - Transcript backend abstraction and the YouTube implementation
//! - `tools` - The two tool handlers
//! - `mcp` - JSON-RPC 2.0 server over stdio
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use ytscribe::backend::YoutubeBackend;
//! use ytscribe::config::Settings;
//! use ytscribe::tools::{TranscriptTools, WindowOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let tools = TranscriptTools::new(YoutubeBackend::new(&settings.youtube)?);
//!
//!     let options = WindowOptions {
//!         start_time: 60.0,
//!         end_time: Some(120.0),
//!         ..WindowOptions::default()
//!     };
//!     println!("{}", tools.fetch_transcript_window("dQw4w9WgXcQ", &options).await);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod transcript;
pub mod video_id;

pub use error::{Result, TranscriptError};
