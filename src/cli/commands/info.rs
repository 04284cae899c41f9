//! Info command implementation.

use crate::backend::YoutubeBackend;
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::TranscriptTools;
use anyhow::{bail, Result};

/// Print the transcripts available for a video.
pub async fn run_info(video: &str, settings: Settings) -> Result<()> {
    let tools = TranscriptTools::new(YoutubeBackend::new(&settings.youtube)?);

    let spinner = Output::spinner(&format!("Listing transcripts for {}...", video));
    let payload = tools.get_transcript_info(video).await;
    spinner.finish_and_clear();

    if Output::payload(&payload) {
        bail!("transcript info failed");
    }
    Ok(())
}
