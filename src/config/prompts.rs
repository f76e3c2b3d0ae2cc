//! Prompt templates for Referat.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub minutes: MinutesPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for minutes extraction and summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinutesPrompts {
    /// Instruction for the structured Minutes of Meeting JSON.
    pub structured: String,
    /// Instruction for the free-text meeting summary.
    pub summary: String,
}

impl Default for MinutesPrompts {
    fn default() -> Self {
        Self {
            structured: r#"Generate detailed Minutes of Meeting (MoM) from the following transcript. Return the result as a JSON object with the following fields:
- title (string): Meeting title
- date (string): Meeting date
- time (string): Meeting time
- venue (string): Meeting venue, if mentioned
- purpose (string): Purpose of the meeting
- attendees (list of strings): List of attendees
- agenda (list of strings): Meeting agenda items
- discussions (list of sections): Each section has "section_title" and "points"; a point is either a plain string or an object with "text" and "subpoints"
- decisions (list of strings): Decisions taken
- actions (list): Action items, either plain strings or objects with "item", "owner", "status" and "notes"
- next_steps (list of strings): Agreed next steps
- conclusion (string): Meeting conclusion
- summary (string): Overall meeting summary

Ensure the JSON is properly formatted and valid.

Transcript:
{{transcript}}"#
                .to_string(),

            summary: r#"Provide a brief summary of this meeting.

{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        // Store custom variables
        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load minutes prompts if file exists
            let minutes_path = custom_path.join("minutes.toml");
            if minutes_path.exists() {
                let content = std::fs::read_to_string(&minutes_path)?;
                prompts.minutes = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        // Start with custom variables, then override with provided vars
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.minutes.structured.contains("JSON object"));
        assert!(!prompts.minutes.summary.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Summarize:\n{{transcript}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("transcript".to_string(), "Alice spoke.".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Summarize:\nAlice spoke.");
    }
}
