//! Remote diarization service client.
//!
//! Uploads a media file, submits a transcription job with speaker labels
//! enabled, and polls until the job completes or the timeout elapses.

use super::{Diarizer, DiarizationResponse, Transcript};
use crate::config::TranscriptionSettings;
use crate::error::{ReferatError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Client for a remote diarization REST API.
pub struct RemoteDiarizer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
    timeout: Duration,
    speakers_expected: u32,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    status: Option<String>,
    error: Option<String>,
    #[serde(flatten)]
    response: DiarizationResponse,
}

impl RemoteDiarizer {
    /// Create a diarizer from settings, reading the API key from the
    /// `DIARIZATION_API_KEY` environment variable.
    pub fn new(settings: &TranscriptionSettings) -> Result<Self> {
        let api_key = std::env::var("DIARIZATION_API_KEY").map_err(|_| {
            ReferatError::Config(
                "DIARIZATION_API_KEY not set. Set it with: export DIARIZATION_API_KEY='...'"
                    .to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ReferatError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            poll_interval: Duration::from_secs(settings.poll_interval_seconds),
            timeout: Duration::from_secs(settings.timeout_seconds),
            speakers_expected: settings.speakers_expected,
        })
    }

    /// Upload the media file and return the provider's upload URL.
    #[instrument(skip(self), fields(media_path = %media_path.display()))]
    async fn upload(&self, media_path: &Path) -> Result<String> {
        debug!("Uploading media file");
        let bytes = tokio::fs::read(media_path).await?;

        let response: UploadResponse = self
            .client
            .post(format!("{}/upload", self.base_url))
            .header("authorization", &self.api_key)
            .body(bytes)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.upload_url.ok_or_else(|| {
            ReferatError::Transcription("No upload_url returned by the provider".to_string())
        })
    }

    /// Submit a transcription job with speaker diarization enabled.
    async fn submit(&self, upload_url: &str) -> Result<String> {
        let payload = serde_json::json!({
            "audio_url": upload_url,
            "speaker_labels": true,
            "speakers_expected": self.speakers_expected,
        });

        let response: SubmitResponse = self
            .client
            .post(format!("{}/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.id.ok_or_else(|| {
            ReferatError::Transcription("No transcript ID returned by the provider".to_string())
        })
    }

    /// Poll the job until it completes, fails, or the timeout elapses.
    #[instrument(skip(self))]
    async fn poll(&self, transcript_id: &str) -> Result<DiarizationResponse> {
        let mut elapsed = Duration::ZERO;

        loop {
            let job: JobStatus = self
                .client
                .get(format!("{}/transcript/{}", self.base_url, transcript_id))
                .header("authorization", &self.api_key)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            match job.status.as_deref() {
                Some("completed") => return Ok(job.response),
                Some("failed") => {
                    return Err(ReferatError::Transcription(
                        job.error
                            .unwrap_or_else(|| "Provider reported failure".to_string()),
                    ))
                }
                status => {
                    debug!(?status, "Transcription still in progress");
                }
            }

            if elapsed >= self.timeout {
                warn!("Transcription polling timed out after {:?}", self.timeout);
                return Err(ReferatError::Transcription(format!(
                    "Polling timed out after {} seconds",
                    self.timeout.as_secs()
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
            elapsed += self.poll_interval;
        }
    }
}

#[async_trait]
impl Diarizer for RemoteDiarizer {
    async fn diarize(&self, media_path: &Path) -> Result<Transcript> {
        let upload_url = self.upload(media_path).await?;
        info!("Media uploaded, submitting transcription job");

        let transcript_id = self.submit(&upload_url).await?;
        info!("Job {} submitted, polling for completion", transcript_id);

        let response = self.poll(&transcript_id).await?;
        Ok(Transcript::from_response(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_parses_completed_payload() {
        let job: JobStatus = serde_json::from_str(
            r#"{
                "status": "completed",
                "text": "hello there",
                "utterances": [{"speaker": "A", "start": 120, "text": "hello there"}]
            }"#,
        )
        .unwrap();

        assert_eq!(job.status.as_deref(), Some("completed"));
        let transcript = Transcript::from_response(&job.response);
        assert_eq!(transcript.full_text, "hello there");
        assert_eq!(transcript.segments.len(), 1);
    }
}
