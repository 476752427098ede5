//! Streaming chat front ends for the Gemini API.
//!
//! The library is a small Gemini client ([`Gemini`]) plus the pieces the two
//! chat binaries are built from: the thinking/answer [`demux`], the exchange
//! drivers in [`exchange`], terminal [`render`]ing, and the [`chat`] REPL.

// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod demux;
pub mod error;
pub mod exchange;
pub mod observability;
pub mod render;
pub mod sse;
pub mod types;

// Re-exports
pub use client::{API_KEY_ENV, Gemini, MISSING_API_KEY, ResponseStream, resolve_api_key};
pub use client_logger::ClientLogger;
pub use demux::{Channel, Demultiplexer, Mode, PlainAccumulator, Update};
pub use error::{Error, Result};
pub use exchange::{
    ChunkStream, ContentStreamer, ExchangeError, PlainReply, ThinkingReply, drive_plain,
    drive_thinking,
};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
