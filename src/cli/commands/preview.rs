//! Preview command - render edited minutes as Markdown or PDF.

use crate::cli::Output;
use crate::config::Settings;
use crate::mom;
use crate::orchestrator::MinutesPipeline;

/// Run the preview command.
pub fn run_preview(
    minutes_path: &str,
    redacted: bool,
    format: &str,
    output: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    let edited_json = std::fs::read_to_string(minutes_path)?;

    let pipeline = MinutesPipeline::new(settings)?;
    let mut record = pipeline.parse_edited(&edited_json)?;
    if redacted {
        record = mom::redact(&record);
        Output::info("Rendering the redacted external variant.");
    }

    match format {
        "markdown" | "md" => {
            let markdown = mom::render_markdown(&record);
            match output {
                Some(path) => {
                    std::fs::write(&path, markdown)?;
                    Output::success(&format!("Markdown written to {}", path));
                }
                None => println!("{}", markdown),
            }
        }
        "pdf" => {
            let path = output.unwrap_or_else(|| "minutes.pdf".to_string());
            let bytes = mom::render_pdf(&record)?;
            std::fs::write(&path, bytes)?;
            Output::success(&format!("PDF written to {}", path));
        }
        other => {
            anyhow::bail!("Unknown format '{}'. Use 'markdown' or 'pdf'.", other);
        }
    }

    Ok(())
}
