//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation
//! history and runs one streamed exchange per user prompt.

use std::time::Instant;

use crate::chat::config::ChatConfig;
use crate::chat::history::History;
use crate::chat::ChatVariant;
use crate::exchange::{
    ContentStreamer, ExchangeError, PlainReply, ThinkingReply, drive_plain, drive_thinking,
};
use crate::observability::{EXCHANGE_DURATION, EXCHANGE_FAILURES, EXCHANGES};
use crate::render::Renderer;
use crate::types::{GenerateContentRequest, Model};
use crate::Gemini;

/// A chat session that owns conversation history and runs exchanges.
///
/// Exchanges are stateless from the model's point of view: only the current
/// prompt is sent.  History exists for display and `/history`.
pub struct ChatSession<C: ContentStreamer = Gemini> {
    streamer: C,
    config: ChatConfig,
    history: History,
    exchanges: u64,
    failures: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Which front end is running.
    pub variant: ChatVariant,
    /// The model used for the session.
    pub model: Model,
    /// The number of history entries.
    pub message_count: usize,
    /// Exchanges attempted.
    pub exchanges: u64,
    /// Exchanges that ended in an error.
    pub failures: u64,
    /// The sampling temperature, if set.
    pub temperature: Option<f32>,
    /// The output token cap, if set.
    pub max_output_tokens: Option<u32>,
}

impl ChatSession<Gemini> {
    /// Creates a new chat session with the given client and configuration.
    pub fn new(client: Gemini, config: ChatConfig) -> Self {
        Self::with_streamer(client, config)
    }
}

impl<C: ContentStreamer> ChatSession<C> {
    /// Creates a new chat session over any chunk source.
    pub fn with_streamer(streamer: C, config: ChatConfig) -> Self {
        Self {
            streamer,
            config,
            history: History::new(),
            exchanges: 0,
            failures: 0,
        }
    }

    /// Runs one exchange in the session's variant and returns the text stored
    /// as the assistant's reply.
    pub async fn send(&mut self, prompt: &str, renderer: &mut dyn Renderer) -> String {
        match self.config.variant {
            ChatVariant::Plain => self.send_plain(prompt, renderer).await.text,
            ChatVariant::Thinking => self.send_thinking(prompt, renderer).await.answer,
        }
    }

    /// Sends a prompt and streams a single-channel reply.
    ///
    /// Never fails: on error the reply is the error text, which is rendered
    /// and stored in history in place of an answer.
    pub async fn send_plain(&mut self, prompt: &str, renderer: &mut dyn Renderer) -> PlainReply {
        let start = self.begin(prompt);
        let outcome = match self.open(prompt).await {
            Ok(stream) => drive_plain(stream, renderer).await,
            Err(err) => Err(err),
        };
        let reply = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                self.record_failure(&err);
                let reply = PlainReply::failed(&err);
                renderer.print_failure(&reply.text);
                reply
            }
        };
        renderer.finish_response();
        self.finish(start, reply.text.clone());
        reply
    }

    /// Sends a prompt and streams a reply split into thinking and answer.
    ///
    /// Never fails: on error both surfaces show error text and the answer
    /// error text is stored in history.
    pub async fn send_thinking(
        &mut self,
        prompt: &str,
        renderer: &mut dyn Renderer,
    ) -> ThinkingReply {
        let start = self.begin(prompt);
        let outcome = match self.open(prompt).await {
            Ok(stream) => drive_thinking(stream, renderer).await,
            Err(err) => Err(err),
        };
        let reply = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                self.record_failure(&err);
                let reply = ThinkingReply::failed(&err);
                renderer.print_thinking_failure(&reply.thinking);
                renderer.print_failure(&reply.answer);
                reply
            }
        };
        renderer.finish_response();
        self.finish(start, reply.answer.clone());
        reply
    }

    fn begin(&mut self, prompt: &str) -> Instant {
        EXCHANGES.click();
        self.exchanges += 1;
        self.history.push_user(prompt);
        tracing::debug!(model = %self.config.model, variant = ?self.config.variant, "exchange started");
        Instant::now()
    }

    async fn open(&self, prompt: &str) -> Result<crate::exchange::ChunkStream, ExchangeError> {
        let request = GenerateContentRequest::from_prompt(prompt)
            .with_generation_config(self.config.generation_config());
        self.streamer
            .stream_chunks(&self.config.model, &request)
            .await
            .map_err(ExchangeError::Setup)
    }

    fn record_failure(&mut self, err: &ExchangeError) {
        EXCHANGE_FAILURES.click();
        self.failures += 1;
        match err {
            ExchangeError::Setup(error) => {
                tracing::warn!(%error, "exchange failed before streaming");
            }
            ExchangeError::MidStream {
                error,
                thinking,
                answer,
            } => {
                tracing::warn!(
                    %error,
                    discarded_thinking = thinking.len(),
                    discarded_answer = answer.len(),
                    "exchange failed mid-stream"
                );
            }
        }
    }

    fn finish(&mut self, start: Instant, answer: String) {
        EXCHANGE_DURATION.add(start.elapsed().as_secs_f64());
        self.history.push_assistant(answer);
    }

    /// The conversation so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Sets the sampling temperature.
    pub fn set_temperature(&mut self, temperature: Option<f32>) {
        self.config.temperature = temperature;
    }

    /// Sets the output token cap.
    pub fn set_max_output_tokens(&mut self, max_output_tokens: Option<u32>) {
        self.config.max_output_tokens = max_output_tokens;
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            variant: self.config.variant,
            model: self.config.model.clone(),
            message_count: self.history.len(),
            exchanges: self.exchanges,
            failures: self.failures,
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    #[test]
    fn new_session_empty() {
        let client = Gemini::new(Some("test-key".to_string())).unwrap();
        let session = ChatSession::new(client, ChatConfig::new(ChatVariant::Plain));
        assert!(session.history().is_empty());
        assert_eq!(session.stats().exchanges, 0);
    }

    #[test]
    fn set_model() {
        let client = Gemini::new(Some("test-key".to_string())).unwrap();
        let mut session = ChatSession::new(client, ChatConfig::new(ChatVariant::Thinking));
        assert_eq!(
            session.model(),
            &Model::Known(KnownModel::Gemini20FlashThinkingExp)
        );
        session.set_model(Model::Known(KnownModel::Gemini25Flash));
        assert_eq!(session.model(), &Model::Known(KnownModel::Gemini25Flash));
    }

    #[test]
    fn generation_settings_update_config() {
        let client = Gemini::new(Some("test-key".to_string())).unwrap();
        let mut session = ChatSession::new(client, ChatConfig::new(ChatVariant::Plain));
        session.set_temperature(Some(0.3));
        session.set_max_output_tokens(Some(100));
        let stats = session.stats();
        assert_eq!(stats.temperature, Some(0.3));
        assert_eq!(stats.max_output_tokens, Some(100));
        assert!(!session.config().generation_config().is_empty());
    }
}
