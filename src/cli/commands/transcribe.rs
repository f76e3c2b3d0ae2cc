//! Transcribe command - diarized transcription of a recording.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::MinutesPipeline;

/// Run the transcribe command.
pub async fn run_transcribe(
    input: &str,
    output: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    preflight::check(Operation::Transcribe, &settings)?;

    let pipeline = MinutesPipeline::new(settings)?;

    let spinner = Output::spinner("Transcribing with speaker diarization...");
    let outcome = pipeline.transcribe_media(input).await?;
    spinner.finish_and_clear();

    Output::success(&format!(
        "Transcription complete ({} speaker segments)",
        outcome.transcript.segments.len()
    ));

    match output {
        Some(path) => {
            std::fs::write(&path, &outcome.labeled_text)?;
            Output::info(&format!("Transcript written to {}", path));
        }
        None => {
            println!("\n{}", outcome.labeled_text);
        }
    }

    Ok(())
}
