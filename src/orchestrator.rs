//! Pipeline coordination.
//!
//! Wires the stages together: media upload, diarized transcription, minutes
//! generation and extraction, the human-edit boundary, rendering, redaction,
//! mail delivery and persistence. Each stage stays independently usable; the
//! pipeline only sequences them.

use crate::config::{Prompts, Settings};
use crate::error::{ReferatError, Result};
use crate::generation::MinutesGenerator;
use crate::mail::{Audience, Mailer};
use crate::mom::{self, MoMRecord};
use crate::persistence::{self, AttendeeRow, MeetingRow, MeetingStore, MinutesRow};
use crate::transcription::{Diarizer, RemoteDiarizer, Transcript};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// A finished transcription: the raw transcript plus its speaker-labeled
/// rendering, which is what generation consumes.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: Transcript,
    pub labeled_text: String,
}

/// Generated minutes ready for the human-edit step.
#[derive(Debug, Clone)]
pub struct GeneratedMinutes {
    /// The extracted structured record.
    pub record: MoMRecord,
    /// Pretty JSON of the record, the artifact a human edits.
    pub edit_json: String,
    /// Markdown preview of the record.
    pub markdown: String,
    /// Free-text summary; `None` when the summary call failed.
    pub summary: Option<String>,
}

/// Outcome of finalizing and distributing edited minutes.
#[derive(Debug, Clone, Default)]
pub struct ShareResult {
    pub internal_sent: usize,
    pub external_sent: usize,
    /// Set when the meeting was persisted to the remote store.
    pub meeting_code: Option<String>,
}

/// Coordinates the full minutes pipeline.
pub struct MinutesPipeline {
    settings: Settings,
    generator: MinutesGenerator,
    diarizer: Option<Arc<dyn Diarizer>>,
}

impl MinutesPipeline {
    /// Build a pipeline from settings.
    ///
    /// The diarization client is constructed lazily on first use, so
    /// generation-only and rendering-only flows work without a diarization
    /// key in the environment.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let generator = MinutesGenerator::new(&settings.generation, prompts)?;

        Ok(Self {
            settings,
            generator,
            diarizer: None,
        })
    }

    /// Replace the diarization client, mainly for tests.
    pub fn with_diarizer(mut self, diarizer: Arc<dyn Diarizer>) -> Self {
        self.diarizer = Some(diarizer);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Transcribe a media file with speaker diarization.
    pub async fn transcribe_media(&self, media_path: impl AsRef<Path>) -> Result<TranscriptionOutcome> {
        let media_path = media_path.as_ref();
        if !media_path.exists() {
            return Err(ReferatError::InvalidInput(format!(
                "Media file not found: {}",
                media_path.display()
            )));
        }

        let transcript = match &self.diarizer {
            Some(diarizer) => diarizer.diarize(media_path).await?,
            None => {
                let diarizer = RemoteDiarizer::new(&self.settings.transcription)?;
                diarizer.diarize(media_path).await?
            }
        };

        let labeled_text = transcript.format_with_speakers();
        info!(
            segments = transcript.segments.len(),
            "transcription finished"
        );

        Ok(TranscriptionOutcome {
            transcript,
            labeled_text,
        })
    }

    /// Generate structured minutes plus a summary from a labeled transcript.
    ///
    /// The summary call is independent: its failure is logged and yields
    /// `None` rather than blocking the minutes.
    pub async fn generate_minutes(&self, labeled_transcript: &str) -> Result<GeneratedMinutes> {
        let raw = self.generator.structured_minutes(labeled_transcript).await?;
        let record = mom::extract_record(&raw)?;

        let summary = match self.generator.summary(labeled_transcript).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("summary generation failed: {}", e);
                None
            }
        };

        Ok(GeneratedMinutes {
            edit_json: record.to_json_pretty(),
            markdown: mom::render_markdown(&record),
            record,
            summary,
        })
    }

    /// Parse an edited minutes JSON document back into a record.
    ///
    /// Unlike generation output, edited JSON gets no brace-carving leniency:
    /// it must be a well-formed JSON object.
    pub fn parse_edited(&self, edited_json: &str) -> Result<MoMRecord> {
        let value: serde_json::Value = serde_json::from_str(edited_json)
            .map_err(|e| ReferatError::MalformedRecord(e.to_string()))?;
        if !value.is_object() {
            return Err(ReferatError::MalformedRecord(
                "edited minutes must be a JSON object".to_string(),
            ));
        }
        Ok(MoMRecord::from_value(&value))
    }

    /// Finalize edited minutes: render PDFs, mail recipients, persist.
    ///
    /// Internal recipients get the full minutes, external recipients the
    /// redacted variant. Persistence runs only when enabled in settings.
    pub async fn finalize_and_share(
        &self,
        edited_json: &str,
        internal: &[String],
        external: &[String],
        summary: Option<&str>,
        transcript: Option<&str>,
    ) -> Result<ShareResult> {
        let record = self.parse_edited(edited_json)?;

        let full_pdf = mom::render_pdf(&record)?;
        let redacted_pdf = if external.is_empty() {
            None
        } else {
            Some(mom::render_pdf(&mom::redact(&record))?)
        };

        let mut result = ShareResult::default();

        if !internal.is_empty() || !external.is_empty() {
            let mailer = Mailer::new(&self.settings.mail)?;
            for recipient in internal {
                mailer
                    .send_minutes(recipient, Audience::Internal, full_pdf.clone())
                    .await?;
                result.internal_sent += 1;
            }
            if let Some(pdf) = &redacted_pdf {
                for recipient in external {
                    mailer
                        .send_minutes(recipient, Audience::External, pdf.clone())
                        .await?;
                    result.external_sent += 1;
                }
            }
        }

        if self.settings.persistence.enabled {
            let recipients: Vec<String> = internal.iter().chain(external).cloned().collect();
            result.meeting_code =
                Some(self.persist(&record, summary, transcript, &recipients).await?);
        }

        Ok(result)
    }

    async fn persist(
        &self,
        record: &MoMRecord,
        summary: Option<&str>,
        transcript: Option<&str>,
        recipients: &[String],
    ) -> Result<String> {
        let store = MeetingStore::new(&self.settings.persistence)?;
        let meeting_code = persistence::new_meeting_code();

        store
            .insert_meeting(&MeetingRow {
                meeting_code: meeting_code.clone(),
                title: record
                    .title
                    .clone()
                    .unwrap_or_else(|| "Untitled Meeting".to_string()),
                scheduled_at: Utc::now(),
                description: record.purpose.clone(),
                id: None,
            })
            .await?;

        store
            .insert_minutes(&MinutesRow {
                meeting_code: meeting_code.clone(),
                mom_text: mom::render_markdown(record),
                summary_text: summary.map(str::to_string).or_else(|| record.summary.clone()),
                transcript_text: transcript.map(str::to_string),
            })
            .await?;

        for row in attendee_rows(&meeting_code, record, recipients) {
            store.insert_attendee(&row).await?;
        }

        info!(%meeting_code, "meeting persisted");
        Ok(meeting_code)
    }
}

/// Attendee rows for a meeting: the record's attendee names, then each mail
/// recipient with their address (name defaults to the address local part).
fn attendee_rows(
    meeting_code: &str,
    record: &MoMRecord,
    recipients: &[String],
) -> Vec<AttendeeRow> {
    let mut rows: Vec<AttendeeRow> = record
        .attendees
        .iter()
        .map(|name| AttendeeRow {
            meeting_code: meeting_code.to_string(),
            name: name.clone(),
            email: None,
        })
        .collect();

    for email in recipients {
        let name = email.split('@').next().unwrap_or(email).to_string();
        rows.push(AttendeeRow {
            meeting_code: meeting_code.to_string(),
            name,
            email: Some(email.clone()),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> MinutesPipeline {
        MinutesPipeline::new(Settings::default()).unwrap()
    }

    #[test]
    fn test_parse_edited_accepts_objects() {
        let record = pipeline()
            .parse_edited(r#"{"title": "Sync", "attendees": ["Alice"]}"#)
            .unwrap();
        assert_eq!(record.title.as_deref(), Some("Sync"));
    }

    #[test]
    fn test_parse_edited_rejects_invalid_json() {
        let err = pipeline().parse_edited("{not json").unwrap_err();
        assert!(matches!(err, ReferatError::MalformedRecord(_)));
    }

    #[test]
    fn test_parse_edited_rejects_non_objects() {
        let err = pipeline().parse_edited(r#"["a", "b"]"#).unwrap_err();
        assert!(matches!(err, ReferatError::MalformedRecord(_)));
    }

    #[test]
    fn test_attendee_rows_include_recipient_emails() {
        let record = MoMRecord {
            attendees: vec!["Alice".to_string()],
            ..Default::default()
        };
        let recipients = vec!["bob@example.com".to_string()];

        let rows = attendee_rows("MOM-test", &record, &recipients);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].email, None);
        assert_eq!(rows[1].name, "bob");
        assert_eq!(rows[1].email.as_deref(), Some("bob@example.com"));
        assert!(rows.iter().all(|r| r.meeting_code == "MOM-test"));
    }

    #[tokio::test]
    async fn test_transcribe_missing_file_is_invalid_input() {
        let err = pipeline()
            .transcribe_media("/no/such/file.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, ReferatError::InvalidInput(_)));
    }
}
