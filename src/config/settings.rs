//! Configuration settings for Referat.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub generation: GenerationSettings,
    pub mail: MailSettings,
    pub persistence: PersistenceSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory where uploaded meeting recordings are kept.
    pub upload_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.referat".to_string(),
            upload_dir: "uploads".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Diarization service settings.
///
/// The API key is read from the `DIARIZATION_API_KEY` environment variable,
/// never from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Base URL of the diarization REST API.
    pub base_url: String,
    /// Seconds between transcript status polls.
    pub poll_interval_seconds: u64,
    /// Give up polling after this many seconds.
    pub timeout_seconds: u64,
    /// Hint for the expected number of speakers.
    pub speakers_expected: u32,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.assemblyai.com/v2".to_string(),
            poll_interval_seconds: 10,
            timeout_seconds: 600,
            speakers_expected: 2,
        }
    }
}

/// Language-model generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat model used for minutes extraction and summaries.
    pub model: String,
    /// Sampling temperature for generation calls.
    pub temperature: f32,
    /// Request timeout for generation calls, in seconds.
    pub timeout_seconds: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            timeout_seconds: 300,
        }
    }
}

/// SMTP mail settings.
///
/// The account password is read from the `EMAIL_PASSWORD` environment
/// variable, never from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    /// SMTP server hostname.
    pub smtp_server: String,
    /// SMTP port (STARTTLS).
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP login.
    pub sender: String,
    /// Filename used for the attached minutes PDF.
    pub attachment_filename: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            smtp_server: String::new(),
            smtp_port: 587,
            sender: String::new(),
            attachment_filename: "Minutes_of_Meeting.pdf".to_string(),
        }
    }
}

/// Remote relational store settings (PostgREST-style API).
///
/// The API key is read from the `PERSISTENCE_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PersistenceSettings {
    /// Enable persisting meetings, minutes and attendees.
    pub enabled: bool,
    /// Base URL of the store, e.g. `https://<project>.supabase.co`.
    pub base_url: String,
}


/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ReferatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("referat")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded upload directory path.
    pub fn upload_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.upload_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mail.smtp_port, 587);
        assert_eq!(settings.mail.attachment_filename, "Minutes_of_Meeting.pdf");
        assert_eq!(settings.transcription.poll_interval_seconds, 10);
        assert!(!settings.persistence.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [generation]
            model = "gpt-4o"
            "#,
        )
        .unwrap();
        assert_eq!(settings.generation.model, "gpt-4o");
        assert_eq!(settings.generation.timeout_seconds, 300);
        assert_eq!(settings.transcription.speakers_expected, 2);
    }
}
