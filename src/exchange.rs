//! Driving one prompt/reply exchange.
//!
//! An exchange acquires a chunk stream, feeds it through a [`Demultiplexer`]
//! or [`PlainAccumulator`], and reports every append to a [`Renderer`].  The
//! drivers return a typed [`ExchangeError`] so callers can tell a request that
//! never streamed from one that broke part-way; the chat session then applies
//! the substitute-error-text policy via [`ThinkingReply::failed`] and
//! [`PlainReply::failed`].

use std::fmt;
use std::pin::Pin;

use futures::{Stream, StreamExt};

use crate::Gemini;
use crate::demux::{Channel, Demultiplexer, PlainAccumulator};
use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::types::{Chunk, GenerateContentRequest, Model};

/// A boxed stream of chunks in arrival order.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Chunk>> + Send>>;

/// Source of chunk streams.
///
/// [`Gemini`] is the production implementation; tests script their own.
#[async_trait::async_trait]
pub trait ContentStreamer: Send + Sync {
    /// Start streaming a reply to `request`.
    async fn stream_chunks(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<ChunkStream>;
}

#[async_trait::async_trait]
impl ContentStreamer for Gemini {
    async fn stream_chunks(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<ChunkStream> {
        let responses = self.stream_content(model, request).await?;
        Ok(Box::pin(responses.map(|response| response.map(Chunk::from))))
    }
}

/// Why an exchange did not complete.
#[derive(Debug, Clone)]
pub enum ExchangeError {
    /// The request was rejected before a stream opened.  A stream whose
    /// first event is an error is reported as [`ExchangeError::MidStream`]
    /// with empty buffers.
    Setup(Error),
    /// The stream failed after some chunks were consumed.  The partial buffers
    /// are carried for diagnostics only.
    MidStream {
        /// The failure.
        error: Error,
        /// Thinking text accumulated before the failure.
        thinking: String,
        /// Answer text accumulated before the failure.
        answer: String,
    },
}

impl ExchangeError {
    /// The underlying error.
    pub fn error(&self) -> &Error {
        match self {
            ExchangeError::Setup(error) => error,
            ExchangeError::MidStream { error, .. } => error,
        }
    }

    /// True if the failure happened after streaming began.
    pub fn is_mid_stream(&self) -> bool {
        matches!(self, ExchangeError::MidStream { .. })
    }
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Setup(error) => write!(f, "{error}"),
            ExchangeError::MidStream { error, .. } => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error())
    }
}

/// Final buffers of a thinking exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThinkingReply {
    /// Display-only reasoning trace.
    pub thinking: String,
    /// The answer, which goes into history.
    pub answer: String,
}

impl ThinkingReply {
    /// The reply shown and stored for a failed exchange.
    pub fn failed(error: &ExchangeError) -> Self {
        let mut demux = Demultiplexer::new();
        demux.fail(
            format!("Error fetching thinking process: {error}"),
            format!("Error generating response: {error}"),
        );
        let (thinking, answer) = demux.into_buffers();
        Self { thinking, answer }
    }
}

/// Final buffer of a plain exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainReply {
    /// The reply text, which goes into history.
    pub text: String,
}

impl PlainReply {
    /// The reply shown and stored for a failed exchange.
    pub fn failed(error: &ExchangeError) -> Self {
        let mut acc = PlainAccumulator::new();
        acc.fail(format!("Error: {error}"));
        Self {
            text: acc.into_text(),
        }
    }
}

/// Consume `stream`, splitting it into thinking and answer text.
pub async fn drive_thinking<S>(
    stream: S,
    renderer: &mut dyn Renderer,
) -> std::result::Result<ThinkingReply, ExchangeError>
where
    S: Stream<Item = Result<Chunk>>,
{
    futures::pin_mut!(stream);
    let mut demux = Demultiplexer::new();
    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(chunk) => chunk,
            Err(error) => {
                let (thinking, answer) = demux.into_buffers();
                return Err(ExchangeError::MidStream {
                    error,
                    thinking,
                    answer,
                });
            }
        };
        for update in demux.accept(&chunk) {
            match update.channel {
                Channel::Thinking => renderer.print_thinking(update.delta),
                Channel::Answer => renderer.print_text(update.delta),
            }
        }
    }
    let (thinking, answer) = demux.into_buffers();
    Ok(ThinkingReply { thinking, answer })
}

/// Consume `stream` into one buffer, showing a trailing cursor meanwhile.
pub async fn drive_plain<S>(
    stream: S,
    renderer: &mut dyn Renderer,
) -> std::result::Result<PlainReply, ExchangeError>
where
    S: Stream<Item = Result<Chunk>>,
{
    futures::pin_mut!(stream);
    let mut acc = PlainAccumulator::new();
    renderer.set_cursor(true);
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                if let Some(delta) = acc.accept(&chunk) {
                    renderer.print_text(&delta);
                }
            }
            Err(error) => {
                renderer.set_cursor(false);
                return Err(ExchangeError::MidStream {
                    error,
                    thinking: String::new(),
                    answer: acc.into_text(),
                });
            }
        }
    }
    renderer.set_cursor(false);
    Ok(PlainReply {
        text: acc.into_text(),
    })
}
