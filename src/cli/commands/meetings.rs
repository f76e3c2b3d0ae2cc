//! Meetings command - list meetings in the remote store.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::persistence::MeetingStore;

/// Run the meetings command.
pub async fn run_meetings(settings: Settings) -> anyhow::Result<()> {
    preflight::check(Operation::Persist, &settings)?;

    let store = MeetingStore::new(&settings.persistence)?;
    let meetings = store.list_meetings().await?;

    if meetings.is_empty() {
        Output::info("No meetings stored yet.");
        return Ok(());
    }

    Output::header(&format!("Stored Meetings ({})", meetings.len()));
    println!();
    for meeting in &meetings {
        Output::meeting_info(
            &meeting.meeting_code,
            &meeting.title,
            &meeting.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
        );
    }

    Ok(())
}
