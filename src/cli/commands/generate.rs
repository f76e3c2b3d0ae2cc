//! Generate command - structured minutes from a transcript.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::MinutesPipeline;

/// Run the generate command.
pub async fn run_generate(
    transcript_path: &str,
    output: Option<String>,
    markdown: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    preflight::check(Operation::Generate, &settings)?;

    let transcript = std::fs::read_to_string(transcript_path)?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript file is empty: {}", transcript_path);
    }

    let pipeline = MinutesPipeline::new(settings)?;

    let spinner = Output::spinner("Generating minutes...");
    let minutes = pipeline.generate_minutes(&transcript).await?;
    spinner.finish_and_clear();

    Output::success("Minutes generated");
    if minutes.summary.is_none() {
        Output::warning("Summary generation failed; continuing without one.");
    }

    match &output {
        Some(path) => {
            std::fs::write(path, &minutes.edit_json)?;
            Output::info(&format!("Editable minutes JSON written to {}", path));
            Output::info("Review and edit the JSON, then share it with 'referat share'.");
        }
        None => {
            println!("\n{}", minutes.edit_json);
        }
    }

    if let Some(path) = &markdown {
        std::fs::write(path, &minutes.markdown)?;
        Output::info(&format!("Markdown preview written to {}", path));
    }

    if let Some(summary) = &minutes.summary {
        Output::header("Summary");
        println!("{}", summary);
    }

    Ok(())
}
