// Wire and domain types for the Gemini generateContent API.
mod chunk;
mod content;
mod model;
mod request;
mod response;

pub use chunk::Chunk;
pub use content::{Content, ContentRole, Part};
pub use model::{KnownModel, Model};
pub use request::{GenerateContentRequest, GenerationConfig};
pub use response::{
    Candidate, FinishReason, GenerateContentResponse, PromptFeedback, UsageMetadata,
};
