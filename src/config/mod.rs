//! Configuration module for Referat.

mod prompts;
mod settings;

pub use prompts::{MinutesPrompts, Prompts};
pub use settings::{
    GeneralSettings, GenerationSettings, MailSettings, PersistenceSettings, PromptSettings,
    Settings, TranscriptionSettings,
};
