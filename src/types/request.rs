use serde::{Deserialize, Serialize};

use crate::types::Content;

/// Sampling and length controls sent with every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature in `[0.0, 2.0]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Returns true if no field is set, in which case the config is omitted.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_output_tokens.is_none()
    }
}

/// Body of a `generateContent` or `streamGenerateContent` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The conversation to continue.  The chat front ends only ever send one
    /// user turn.
    pub contents: Vec<Content>,

    /// Optional generation parameters.
    #[serde(default, skip_serializing_if = "GenerationConfig::is_empty")]
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Creates a request carrying a single user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig::default(),
        }
    }

    /// Sets the generation config.
    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_request_omits_empty_config() {
        let request = GenerateContentRequest::from_prompt("What is 2+2?");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "What is 2+2?"}]}]
            })
        );
    }

    #[test]
    fn generation_config_is_camel_case() {
        let request =
            GenerateContentRequest::from_prompt("hi").with_generation_config(GenerationConfig {
                temperature: Some(0.5),
                max_output_tokens: Some(256),
            });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
    }
}
