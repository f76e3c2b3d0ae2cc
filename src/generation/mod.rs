//! Language-model generation calls.
//!
//! Two independent generation paths exist for one transcript: a structured
//! Minutes of Meeting request whose output feeds the extractor, and a
//! free-text summary returned verbatim. Either may fail without blocking
//! the other.

use crate::config::{GenerationSettings, Prompts};
use crate::error::{ReferatError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Generation client for minutes and summaries.
pub struct MinutesGenerator {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl MinutesGenerator {
    /// Create a new generator. The request timeout comes from settings so
    /// long transcripts cannot hang a generation call indefinitely.
    pub fn new(settings: &GenerationSettings, prompts: Prompts) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| ReferatError::Config(format!("Failed to create HTTP client: {}", e)))?;
        let client =
            async_openai::Client::with_config(OpenAIConfig::default()).with_http_client(http_client);

        Ok(Self {
            client,
            model: settings.model.clone(),
            temperature: settings.temperature,
            prompts,
        })
    }

    /// Run a single chat completion and return the response text.
    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: String) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| ReferatError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| ReferatError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ReferatError::OpenAI(format!("Failed to generate response: {}", e)))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| ReferatError::Generation("Empty response from model".to_string()))?
            .clone();

        debug!("Generated {} characters", text.len());
        Ok(text)
    }

    /// Request the structured minutes for a transcript.
    ///
    /// Returns the raw response text; JSON extraction is the caller's job.
    pub async fn structured_minutes(&self, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.minutes.structured, &vars);
        self.complete(prompt).await
    }

    /// Request a free-text summary for a transcript.
    pub async fn summary(&self, transcript: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.minutes.summary, &vars);
        self.complete(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_builds_from_default_settings() {
        let generator =
            MinutesGenerator::new(&GenerationSettings::default(), Prompts::default()).unwrap();
        assert_eq!(generator.model, "gpt-4o-mini");
        assert_eq!(generator.temperature, 0.3);
    }
}
