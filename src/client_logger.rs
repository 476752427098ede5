//! Logging trait for Gemini client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log the API responses passing through the [`Gemini`](crate::Gemini) client.

use crate::GenerateContentResponse;

/// A trait for logging Gemini client operations.
///
/// Implement this trait to record every response the client hands back,
/// both from `generate` and from each element of a `stream_content` stream.
///
/// # Example
///
/// ```rust,ignore
/// use geminius::{ClientLogger, GenerateContentResponse};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_response(&self, response: &GenerateContentResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "{}", serde_json::to_string(response).unwrap()).unwrap();
///     }
///
///     fn log_stream_chunk(&self, response: &GenerateContentResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "chunk: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a complete response from a non-streaming `generate` call.
    fn log_response(&self, response: &GenerateContentResponse);

    /// Log one decoded element of a streamed response.
    ///
    /// Called once per SSE event, in arrival order, before the element is
    /// yielded to the caller.
    fn log_stream_chunk(&self, response: &GenerateContentResponse);
}
