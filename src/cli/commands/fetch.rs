//! Fetch command implementation.

use crate::backend::YoutubeBackend;
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::{TranscriptTools, WindowOptions};
use anyhow::{bail, Result};

/// Fetch a transcript window and print the JSON payload.
pub async fn run_fetch(
    video: &str,
    start: f64,
    end: Option<f64>,
    languages: Vec<String>,
    settings: Settings,
) -> Result<()> {
    let tools = TranscriptTools::new(YoutubeBackend::new(&settings.youtube)?);
    let options = WindowOptions {
        start_time: start,
        end_time: end,
        languages,
    };

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video));
    let payload = tools.fetch_transcript_window(video, &options).await;
    spinner.finish_and_clear();

    if Output::payload(&payload) {
        bail!("transcript fetch failed");
    }
    Ok(())
}
