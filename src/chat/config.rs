//! Configuration types for the chat applications.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::fmt;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::types::{GenerationConfig, KnownModel, Model};

/// Which front end a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatVariant {
    /// One streamed answer with a trailing cursor.
    Plain,
    /// Reasoning trace and answer shown separately.
    Thinking,
}

impl ChatVariant {
    /// The model used when none is given.
    pub fn default_model(&self) -> Model {
        match self {
            ChatVariant::Plain => Model::Known(KnownModel::Gemini20FlashExp),
            ChatVariant::Thinking => Model::Known(KnownModel::Gemini20FlashThinkingExp),
        }
    }

    /// Banner title.
    pub fn title(&self) -> &'static str {
        match self {
            ChatVariant::Plain => "Gemini 2.0",
            ChatVariant::Thinking => "Gemini 2.0 Flash Thinking Chat",
        }
    }
}

/// Command-line arguments shared by both chat binaries.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default depends on the binary)", "MODEL")]
    pub model: Option<String>,

    /// Override the API base URL.
    #[arrrg(optional, "API base URL", "URL")]
    pub base_url: Option<String>,

    /// Connect timeout in seconds.
    #[arrrg(optional, "Connect timeout in seconds (default: 60)", "SECS")]
    pub timeout: Option<u64>,

    /// Sampling temperature, kept as text so the struct stays `Eq`.
    #[arrrg(optional, "Sampling temperature 0.0-2.0", "TEMP")]
    pub temperature: Option<String>,

    /// Maximum output tokens per response.
    #[arrrg(optional, "Max output tokens per response", "TOKENS")]
    pub max_output_tokens: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// A command-line value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatArgsError {
    /// `--temperature` was not a number in range.
    Temperature(String),
}

impl fmt::Display for ChatArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatArgsError::Temperature(value) => write!(
                f,
                "--temperature expects a value between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {value:?}"
            ),
        }
    }
}

impl std::error::Error for ChatArgsError {}

/// Lowest accepted temperature.
pub const MIN_TEMPERATURE: f32 = 0.0;

/// Highest accepted temperature.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Parse a temperature, rejecting values outside the accepted range.
pub fn parse_temperature(value: &str) -> Option<f32> {
    let parsed: f32 = value.trim().parse().ok()?;
    (parsed.is_finite() && (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&parsed))
        .then_some(parsed)
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Which front end this is.
    pub variant: ChatVariant,

    /// The model to use for generating responses.
    pub model: Model,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Optional sampling temperature.
    pub temperature: Option<f32>,

    /// Optional cap on output tokens.
    pub max_output_tokens: Option<u32>,

    /// API base URL override.
    pub base_url: Option<String>,

    /// Connect timeout override.
    pub timeout: Option<Duration>,
}

impl ChatConfig {
    /// Creates a new ChatConfig with the variant's defaults.
    pub fn new(variant: ChatVariant) -> Self {
        Self {
            variant,
            model: variant.default_model(),
            use_color: true,
            temperature: None,
            max_output_tokens: None,
            base_url: None,
            timeout: None,
        }
    }

    /// Resolves command-line arguments for `variant`.
    pub fn from_args(variant: ChatVariant, args: ChatArgs) -> Result<Self, ChatArgsError> {
        let temperature = match args.temperature {
            Some(value) => Some(
                parse_temperature(&value).ok_or(ChatArgsError::Temperature(value))?,
            ),
            None => None,
        };
        let model = args
            .model
            .map(|name| name.parse::<Model>().unwrap_or(Model::Custom(name)))
            .unwrap_or_else(|| variant.default_model());

        Ok(ChatConfig {
            model,
            use_color: !args.no_color,
            temperature,
            max_output_tokens: args.max_output_tokens,
            base_url: args.base_url,
            timeout: args.timeout.map(Duration::from_secs),
            ..ChatConfig::new(variant)
        })
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the output token cap.
    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// The generation config sent with each request.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_defaults() {
        let config = ChatConfig::new(ChatVariant::Plain);
        assert_eq!(config.model, Model::Known(KnownModel::Gemini20FlashExp));
        assert!(config.use_color);
        assert!(config.generation_config().is_empty());

        let config = ChatConfig::new(ChatVariant::Thinking);
        assert_eq!(
            config.model,
            Model::Known(KnownModel::Gemini20FlashThinkingExp)
        );
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gemini-2.5-pro".to_string()),
            base_url: Some("http://localhost:9999/".to_string()),
            timeout: Some(5),
            temperature: Some("0.7".to_string()),
            max_output_tokens: Some(512),
            no_color: true,
        };
        let config = ChatConfig::from_args(ChatVariant::Thinking, args).unwrap();
        assert_eq!(config.variant, ChatVariant::Thinking);
        assert_eq!(config.model, Model::Known(KnownModel::Gemini25Pro));
        assert!(!config.use_color);
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_output_tokens, Some(512));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999/"));
    }

    #[test]
    fn config_from_args_rejects_bad_temperature() {
        let args = ChatArgs {
            temperature: Some("hot".to_string()),
            ..ChatArgs::default()
        };
        let err = ChatConfig::from_args(ChatVariant::Plain, args).unwrap_err();
        assert_eq!(err, ChatArgsError::Temperature("hot".to_string()));

        assert_eq!(parse_temperature("2.5"), None);
        assert_eq!(parse_temperature(" 1.5 "), Some(1.5));
    }

    #[test]
    fn unknown_model_is_custom() {
        let args = ChatArgs {
            model: Some("gemini-next".to_string()),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from_args(ChatVariant::Plain, args).unwrap();
        assert_eq!(config.model, Model::Custom("gemini-next".to_string()));
    }
}
