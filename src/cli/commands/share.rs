//! Share command - mail finalized minutes and persist the meeting.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::MinutesPipeline;

/// Run the share command.
pub async fn run_share(
    minutes_path: &str,
    internal: &[String],
    external: &[String],
    summary_path: Option<String>,
    transcript_path: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    if internal.is_empty() && external.is_empty() && !settings.persistence.enabled {
        anyhow::bail!(
            "Nothing to do: no recipients given and persistence is disabled. \
             Add --to/--external recipients or enable persistence in the config."
        );
    }

    if !internal.is_empty() || !external.is_empty() {
        preflight::check(Operation::Share, &settings)?;
    }
    if settings.persistence.enabled {
        preflight::check(Operation::Persist, &settings)?;
    }

    let edited_json = std::fs::read_to_string(minutes_path)?;
    let summary = match &summary_path {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };
    let transcript = match &transcript_path {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };

    let pipeline = MinutesPipeline::new(settings)?;

    let spinner = Output::spinner("Finalizing and sharing minutes...");
    let result = pipeline
        .finalize_and_share(
            &edited_json,
            internal,
            external,
            summary.as_deref(),
            transcript.as_deref(),
        )
        .await?;
    spinner.finish_and_clear();

    if result.internal_sent > 0 {
        Output::success(&format!(
            "Full minutes sent to {} internal recipient(s)",
            result.internal_sent
        ));
    }
    if result.external_sent > 0 {
        Output::success(&format!(
            "Redacted minutes sent to {} external recipient(s)",
            result.external_sent
        ));
    }
    if let Some(code) = &result.meeting_code {
        Output::success(&format!("Meeting persisted as {}", code));
    }

    Ok(())
}
