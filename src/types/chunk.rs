use crate::types::{GenerateContentResponse, Part};

/// One element of a streamed reply: the ordered parts of the first candidate
/// of one response.
///
/// Chunks are consumed exactly once, in arrival order.  Part order within a
/// chunk is significant: the thinking demultiplexer keys off the part count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    /// Parts in API order.
    pub parts: Vec<Part>,
}

impl Chunk {
    /// Creates a chunk from parts.
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Creates a chunk with one text part per element.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self {
            parts: texts.iter().map(|t| Part::text(t.as_ref())).collect(),
        }
    }

    /// Concatenated text of every part.
    pub fn text(&self) -> String {
        self.parts.iter().map(Part::as_text).collect()
    }

    /// Number of parts, empty ones included.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True if the chunk carries no parts at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl From<GenerateContentResponse> for Chunk {
    fn from(response: GenerateContentResponse) -> Self {
        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default();
        Self { parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Candidate, Content};

    #[test]
    fn chunk_from_response_takes_first_candidate() {
        let response = GenerateContentResponse {
            candidates: vec![
                Candidate {
                    content: Some(Content {
                        role: None,
                        parts: vec![Part::text("a"), Part::text("b")],
                    }),
                    ..Candidate::default()
                },
                Candidate {
                    content: Some(Content::user("ignored")),
                    ..Candidate::default()
                },
            ],
            ..GenerateContentResponse::default()
        };
        let chunk = Chunk::from(response);
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.text(), "ab");
    }

    #[test]
    fn empty_response_is_empty_chunk() {
        let chunk = Chunk::from(GenerateContentResponse::default());
        assert!(chunk.is_empty());
    }
}
