//! Stream classification for chat replies.
//!
//! Thinking models interleave two logical channels (the reasoning trace and
//! the final answer) on one physical stream.  The boundary is implicit: the
//! first chunk that carries more than one part holds the tail of the thinking
//! trace in its first part and the head of the answer in the rest.  After that
//! chunk every part belongs to the answer, even though later chunks go back to
//! carrying a single part.
//!
//! [`Demultiplexer`] implements that edge trigger.  [`PlainAccumulator`] is the
//! degenerate single-channel case used by the plain chat.

use crate::observability::{DEMUX_ANSWER_PARTS, DEMUX_THINKING_PARTS, DEMUX_TRANSITIONS};
use crate::types::{Chunk, Part};

/// Which channel currently receives text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Parts go to the thinking buffer.
    #[default]
    Thinking,
    /// Parts go to the answer buffer.  Terminal.
    Answering,
}

/// A destination buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The reasoning trace.
    Thinking,
    /// The final answer.
    Answer,
}

/// One incremental append to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update<'a> {
    /// Buffer that grew.
    pub channel: Channel,
    /// Text appended.
    pub delta: &'a str,
}

/// Splits a chunk stream into a thinking buffer and an answer buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demultiplexer {
    mode: Mode,
    thinking: String,
    answer: String,
}

impl Demultiplexer {
    /// Creates a demultiplexer in [`Mode::Thinking`] with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Thinking text so far.
    pub fn thinking(&self) -> &str {
        &self.thinking
    }

    /// Answer text so far.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Consumes the demultiplexer, returning `(thinking, answer)`.
    pub fn into_buffers(self) -> (String, String) {
        (self.thinking, self.answer)
    }

    /// Routes every part of `chunk` and returns one update per non-empty
    /// part, in the order the text was appended.
    ///
    /// Empty parts still count toward the part count, so an empty first part
    /// on a two-part chunk triggers the transition all the same.
    pub fn accept<'c>(&mut self, chunk: &'c Chunk) -> Vec<Update<'c>> {
        let mut updates = Vec::with_capacity(chunk.parts.len());
        match (self.mode, chunk.parts.as_slice()) {
            (_, []) => {}
            (Mode::Thinking, [only]) => {
                self.append(Channel::Thinking, only, &mut updates);
            }
            (Mode::Thinking, [first, rest @ ..]) => {
                self.append(Channel::Thinking, first, &mut updates);
                self.mode = Mode::Answering;
                DEMUX_TRANSITIONS.click();
                for part in rest {
                    self.append(Channel::Answer, part, &mut updates);
                }
            }
            (Mode::Answering, parts) => {
                for part in parts {
                    self.append(Channel::Answer, part, &mut updates);
                }
            }
        }
        updates
    }

    /// Replaces both buffers with failure text, discarding partial output.
    pub fn fail(&mut self, thinking_error: String, answer_error: String) {
        self.thinking = thinking_error;
        self.answer = answer_error;
    }

    fn append<'c>(&mut self, channel: Channel, part: &'c Part, updates: &mut Vec<Update<'c>>) {
        let delta = part.as_text();
        if delta.is_empty() {
            return;
        }
        match channel {
            Channel::Thinking => {
                DEMUX_THINKING_PARTS.click();
                self.thinking.push_str(delta);
            }
            Channel::Answer => {
                DEMUX_ANSWER_PARTS.click();
                self.answer.push_str(delta);
            }
        }
        updates.push(Update { channel, delta });
    }
}

/// Appends every chunk's text to a single buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainAccumulator {
    text: String,
}

impl PlainAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the accumulator, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Appends the chunk's concatenated text, returning what was appended
    /// unless it was empty.
    pub fn accept(&mut self, chunk: &Chunk) -> Option<String> {
        let delta = chunk.text();
        if delta.is_empty() {
            return None;
        }
        self.text.push_str(&delta);
        Some(delta)
    }

    /// Replaces the buffer with failure text.
    pub fn fail(&mut self, error: String) {
        self.text = error;
    }
}
