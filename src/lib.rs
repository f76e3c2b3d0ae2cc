//! Referat - Meeting Minutes Pipeline
//!
//! A CLI tool that turns recorded meetings into structured, shareable minutes.
//!
//! The name "Referat" is the Norwegian word for the minutes of a meeting.
//!
//! # Overview
//!
//! Referat allows you to:
//! - Transcribe meeting recordings with speaker diarization
//! - Extract structured Minutes of Meeting (MoM) via a language model
//! - Render minutes as Markdown and paginated PDF
//! - Redact sensitive content before sharing with external recipients
//! - Email the minutes as PDF attachments and persist meeting records
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt management
//! - `storage` - Local upload storage
//! - `transcription` - Speaker-diarized transcription
//! - `generation` - Language-model calls for minutes and summaries
//! - `mom` - The minutes document model: extraction, redaction, rendering
//! - `mail` - SMTP delivery with PDF attachments
//! - `persistence` - Remote relational meeting store
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use referat::config::Settings;
//! use referat::orchestrator::MinutesPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = MinutesPipeline::new(settings)?;
//!
//!     let transcript = pipeline.transcribe_media("standup.mp4").await?;
//!     let minutes = pipeline.generate_minutes(&transcript.labeled_text).await?;
//!     println!("{}", minutes.markdown);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod mail;
pub mod mom;
pub mod orchestrator;
pub mod persistence;
pub mod storage;
pub mod transcription;

pub use error::{ReferatError, Result};
