//! Pre-flight checks before expensive operations.
//!
//! Validates that required keys and configuration are available before
//! starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{ReferatError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Transcription requires the diarization API key.
    Transcribe,
    /// Minutes generation requires the OpenAI API key.
    Generate,
    /// Sharing requires mail configuration and the account password.
    Share,
    /// Persistence requires the store URL and API key.
    Persist,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Transcribe => {
            check_env_key("DIARIZATION_API_KEY")?;
        }
        Operation::Generate => {
            check_env_key("OPENAI_API_KEY")?;
        }
        Operation::Share => {
            if settings.mail.smtp_server.is_empty() {
                return Err(ReferatError::Config(
                    "mail.smtp_server is not configured. Set it in the config file.".to_string(),
                ));
            }
            if settings.mail.sender.is_empty() {
                return Err(ReferatError::Config(
                    "mail.sender is not configured. Set it in the config file.".to_string(),
                ));
            }
            check_env_key("EMAIL_PASSWORD")?;
        }
        Operation::Persist => {
            if settings.persistence.base_url.is_empty() {
                return Err(ReferatError::Config(
                    "persistence.base_url is not configured. Set it in the config file."
                        .to_string(),
                ));
            }
            check_env_key("PERSISTENCE_API_KEY")?;
        }
    }
    Ok(())
}

/// Check that an environment variable is set and non-empty.
fn check_env_key(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(ReferatError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(ReferatError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_requires_mail_configuration() {
        let settings = Settings::default();
        assert!(check(Operation::Share, &settings).is_err());
    }

    #[test]
    fn test_persist_requires_base_url() {
        let settings = Settings::default();
        assert!(check(Operation::Persist, &settings).is_err());
    }
}
