use serde::{Deserialize, Serialize};

/// The author of a [`Content`] block on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    /// Text supplied by the person chatting.
    User,
    /// Text produced by the model.
    Model,
}

/// The smallest text-bearing unit of a request or streamed response.
///
/// The API may omit `text` entirely (for example on a part that only carries
/// a thought signature), so it is optional here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text of the part, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Set by thinking models on parts that belong to the reasoning trace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }

    /// Returns the part's text, treating an absent field as empty.
    pub fn as_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Returns true when this part contributes no characters.
    pub fn is_empty(&self) -> bool {
        self.as_text().is_empty()
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::text(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::text(text)
    }
}

/// An ordered list of parts attributed to one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Who produced the content.  Responses sometimes omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ContentRole>,

    /// The parts, in the order the API produced them.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a single-part user content block.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(ContentRole::User),
            parts: vec![Part::text(text)],
        }
    }

    /// Concatenates the text of every part.
    pub fn text(&self) -> String {
        self.parts.iter().map(Part::as_text).collect()
    }
}
