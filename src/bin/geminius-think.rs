//! Gemini chat that shows the model's thinking apart from its answer.
//!
//! Thinking models stream their reasoning first and the answer after it; this
//! binary prints the reasoning under "Thinking Process:" and the answer below.
//!
//! # Usage
//!
//! ```bash
//! geminius-think
//! geminius-think --model gemini-2.0-flash-thinking-exp --temperature 0.7
//! ```
//!
//! Slash commands (`/help`, `/history`, `/model`, `/stats`, `/quit`) work as in
//! `geminius-chat`.

use tracing_subscriber::EnvFilter;

use geminius::chat::{ChatVariant, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(ChatVariant::Thinking, "geminius-think [OPTIONS]").await
}
