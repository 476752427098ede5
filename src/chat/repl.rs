//! The interactive loop shared by both chat binaries.

use std::env;
use std::ops::ControlFlow;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::commands::{ChatCommand, help_text, parse_command};
use crate::chat::config::{ChatArgs, ChatConfig, ChatVariant};
use crate::chat::session::ChatSession;
use crate::client::{API_KEY_ENV, MISSING_API_KEY, resolve_api_key};
use crate::exchange::ContentStreamer;
use crate::render::{PlainTextRenderer, Renderer};
use crate::types::Model;
use crate::error::Result;
use crate::Gemini;

/// Run a chat REPL of the given variant until the user quits.
///
/// Loads `.env`, parses the command line, and refuses to open the prompt when
/// no API key is available.
pub async fn run(
    variant: ChatVariant,
    usage: &'static str,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!(%err, "could not load .env");
        }
    }

    let (args, _) = ChatArgs::from_command_line_relaxed(usage);
    let config = ChatConfig::from_args(variant, args)?;
    let mut renderer = PlainTextRenderer::with_color(config.use_color);

    println!("{}", variant.title());

    let Some(client) = connect(&config, env::var(API_KEY_ENV).ok(), &mut renderer)? else {
        return Ok(());
    };

    let mut session = ChatSession::new(client, config);
    let mut rl = DefaultEditor::new()?;

    renderer.print_info(&format!("Model: {}", session.model()));
    renderer.print_info("Type /help for commands, /quit to exit");
    if variant == ChatVariant::Thinking {
        renderer.print_info("Start a conversation to see the model's thinking process here.");
    }
    println!();

    loop {
        match rl.readline("What's on your mind? ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    if apply_command(&mut session, &mut renderer, cmd).is_break() {
                        break;
                    }
                    continue;
                }

                session.send(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Build the client for `config` using `env_key` as the credential.
///
/// Returns `None` after reporting [`MISSING_API_KEY`] when there is no usable
/// key; no client exists then, so nothing can reach the network.
pub fn connect(
    config: &ChatConfig,
    env_key: Option<String>,
    renderer: &mut dyn Renderer,
) -> Result<Option<Gemini>> {
    let api_key = match resolve_api_key(None, env_key) {
        Ok(key) => key,
        Err(err) if err.is_authentication() => {
            renderer.print_error(MISSING_API_KEY);
            renderer.print_info("API Key is missing. Cannot access the model.");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };
    let client = Gemini::with_options(Some(api_key), config.base_url.clone(), config.timeout)?;
    Ok(Some(client))
}

/// Apply a slash command to the session.  Breaks when the user quits.
pub(crate) fn apply_command<C: ContentStreamer>(
    session: &mut ChatSession<C>,
    renderer: &mut dyn Renderer,
    cmd: ChatCommand,
) -> ControlFlow<()> {
    match cmd {
        ChatCommand::Quit => {
            renderer.print_info("Goodbye!");
            return ControlFlow::Break(());
        }
        ChatCommand::Help => {
            for line in help_text().lines() {
                renderer.print_info(&format!("    {line}"));
            }
        }
        ChatCommand::History => {
            if session.history().is_empty() {
                renderer.print_info("    (no messages yet)");
            }
            for entry in session.history() {
                renderer.print_info(&format!("    [{}] {}", entry.role, entry.text));
            }
        }
        ChatCommand::Model(model_name) => {
            let model = model_name
                .parse()
                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
            session.set_model(model);
            renderer.print_info(&format!("Model changed to: {}", session.model()));
        }
        ChatCommand::Temperature(value) => {
            session.set_temperature(Some(value));
            renderer.print_info(&format!("temperature set to {:.2}", value));
        }
        ChatCommand::ClearTemperature => {
            session.set_temperature(None);
            renderer.print_info("temperature reset to model default");
        }
        ChatCommand::MaxOutputTokens(value) => {
            session.set_max_output_tokens(Some(value));
            renderer.print_info(&format!("max output tokens set to {value}"));
        }
        ChatCommand::ClearMaxOutputTokens => {
            session.set_max_output_tokens(None);
            renderer.print_info("max output tokens reset to model default");
        }
        ChatCommand::Stats => print_stats(session, renderer),
        ChatCommand::ShowConfig => print_config(session, renderer),
        ChatCommand::Invalid(message) => renderer.print_error(&message),
    }
    ControlFlow::Continue(())
}

fn print_stats<C: ContentStreamer>(session: &ChatSession<C>, renderer: &mut dyn Renderer) {
    let stats = session.stats();
    renderer.print_info("    Session Statistics:");
    renderer.print_info(&format!("      Model: {}", stats.model));
    renderer.print_info(&format!("      Messages: {}", stats.message_count));
    renderer.print_info(&format!(
        "      Exchanges: {} ({} failed)",
        stats.exchanges, stats.failures
    ));
}

fn print_config<C: ContentStreamer>(session: &ChatSession<C>, renderer: &mut dyn Renderer) {
    let config = session.config();
    renderer.print_info("    Current Configuration:");
    renderer.print_info(&format!("      Variant: {:?}", config.variant));
    renderer.print_info(&format!("      Model: {}", config.model));
    renderer.print_info(&format!(
        "      Temperature: {}",
        config
            .temperature
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "default".to_string())
    ));
    renderer.print_info(&format!(
        "      Max output tokens: {}",
        config
            .max_output_tokens
            .map(|v| v.to_string())
            .unwrap_or_else(|| "default".to_string())
    ));
    renderer.print_info(&format!(
        "      Color: {}",
        if config.use_color { "on" } else { "off" }
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::ChunkStream;
    use crate::types::{GenerateContentRequest, KnownModel};

    struct Unreachable;

    #[async_trait::async_trait]
    impl ContentStreamer for Unreachable {
        async fn stream_chunks(
            &self,
            _: &Model,
            _: &GenerateContentRequest,
        ) -> Result<ChunkStream> {
            panic!("commands must not reach the model");
        }
    }

    #[derive(Default)]
    struct Lines(Vec<String>);

    impl Renderer for Lines {
        fn print_thinking(&mut self, _: &str) {}
        fn print_text(&mut self, _: &str) {}
        fn print_error(&mut self, error: &str) {
            self.0.push(format!("error: {error}"));
        }
        fn print_info(&mut self, info: &str) {
            self.0.push(info.to_string());
        }
        fn finish_response(&mut self) {}
    }

    fn session() -> ChatSession<Unreachable> {
        ChatSession::with_streamer(Unreachable, ChatConfig::new(ChatVariant::Plain))
    }

    #[test]
    fn quit_breaks() {
        let mut session = session();
        let mut lines = Lines::default();
        assert!(apply_command(&mut session, &mut lines, ChatCommand::Quit).is_break());
    }

    #[test]
    fn model_command_parses_known_names() {
        let mut session = session();
        let mut lines = Lines::default();
        let flow = apply_command(
            &mut session,
            &mut lines,
            ChatCommand::Model("gemini-2.5-flash".to_string()),
        );
        assert!(flow.is_continue());
        assert_eq!(session.model(), &Model::Known(KnownModel::Gemini25Flash));
        assert_eq!(lines.0, vec!["Model changed to: gemini-2.5-flash"]);
    }

    #[test]
    fn empty_history_is_reported() {
        let mut session = session();
        let mut lines = Lines::default();
        let _ = apply_command(&mut session, &mut lines, ChatCommand::History);
        assert_eq!(lines.0, vec!["    (no messages yet)"]);
    }

    #[test]
    fn invalid_command_prints_error() {
        let mut session = session();
        let mut lines = Lines::default();
        let _ = apply_command(
            &mut session,
            &mut lines,
            ChatCommand::Invalid("Unknown command: /x".to_string()),
        );
        assert_eq!(lines.0, vec!["error: Unknown command: /x"]);
        assert_eq!(session.stats().exchanges, 0);
    }
}
