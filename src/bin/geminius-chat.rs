//! Plain streaming chat with Gemini.
//!
//! Each reply streams into a single answer with a trailing cursor until the
//! model finishes.
//!
//! # Usage
//!
//! ```bash
//! # Reads GEMINI_API_KEY from the environment or a .env file
//! geminius-chat
//!
//! # Specify a model
//! geminius-chat --model gemini-2.5-flash
//!
//! # Disable colors (useful for piping output)
//! geminius-chat --no-color
//! ```
//!
//! Set `RUST_LOG=geminius=debug` to trace requests on stderr.

use tracing_subscriber::EnvFilter;

use geminius::chat::{ChatVariant, run};

/// Main entry point for the geminius-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(ChatVariant::Plain, "geminius-chat [OPTIONS]").await
}
