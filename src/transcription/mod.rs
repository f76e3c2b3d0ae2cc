//! Transcription module for Referat.
//!
//! Handles speaker-diarized transcription of meeting recordings through a
//! remote diarization service, and the normalization of provider responses
//! into a canonical transcript.

mod models;
mod provider;

pub use models::{DiarizationResponse, RawSegment, Transcript, TranscriptSegment};
pub use provider::RemoteDiarizer;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for diarization services.
#[async_trait]
pub trait Diarizer: Send + Sync {
    /// Transcribe a media file and return a speaker-labeled transcript.
    async fn diarize(&self, media_path: &Path) -> Result<Transcript>;
}
