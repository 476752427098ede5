//! Output rendering for chat streaming.
//!
//! This module provides the renderer trait the exchange driver reports to and
//! a plain-text implementation for terminals.

use std::io::{self, IsTerminal, Write};

/// ANSI escape code for dim text (used for thinking text).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for thinking text).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code for bold text (used for section headers).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Shown after the answer while a plain reply is still streaming.
pub const CURSOR_GLYPH: &str = "▌";

/// Erases the one-column cursor glyph.
const ERASE_CURSOR: &str = "\x08 \x08";

/// Trait for rendering streaming output.
///
/// The thinking variant writes to two surfaces (thinking and answer); the
/// plain variant only to the answer surface.  Deltas arrive in stream order.
pub trait Renderer: Send {
    /// Append text to the thinking surface.
    fn print_thinking(&mut self, text: &str);

    /// Append text to the answer surface.
    fn print_text(&mut self, text: &str);

    /// Show `text` as the final content of the thinking surface after a
    /// failed exchange.
    fn print_thinking_failure(&mut self, text: &str) {
        self.print_error(text);
    }

    /// Show `text` as the final content of the answer surface after a failed
    /// exchange.
    fn print_failure(&mut self, text: &str) {
        self.print_error(text);
    }

    /// Print an error message that is not part of any reply.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Toggle the trailing "still streaming" cursor on the answer surface.
    fn set_cursor(&mut self, visible: bool) {
        _ = visible;
    }

    /// Called when a response is complete, successfully or not.
    fn finish_response(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Thinking,
    Answer,
}

/// Plain text renderer with optional ANSI styling.
///
/// Thinking text is printed under a "Thinking Process:" header, dim and
/// italic when color is enabled; the answer follows under its own header.
/// The streaming cursor is independent of color: it is drawn whenever the
/// output can be backspaced over.
pub struct PlainTextRenderer {
    out: Box<dyn Write + Send>,
    use_color: bool,
    show_cursor: bool,
    section: Section,
    cursor_requested: bool,
    cursor_drawn: bool,
    line_start: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with the given color setting.
    ///
    /// The cursor is shown when stdout is a terminal.
    pub fn with_color(use_color: bool) -> Self {
        let stdout = io::stdout();
        let show_cursor = stdout.is_terminal();
        Self::with_writer(Box::new(stdout), use_color).with_cursor(show_cursor)
    }

    /// Creates a renderer over an arbitrary writer, without the cursor.
    pub fn with_writer(out: Box<dyn Write + Send>, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            show_cursor: false,
            section: Section::None,
            cursor_requested: false,
            cursor_drawn: false,
            line_start: true,
        }
    }

    /// Enables or disables the trailing streaming cursor.
    pub fn with_cursor(mut self, show_cursor: bool) -> Self {
        self.show_cursor = show_cursor;
        self
    }

    fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let _ = self.out.write_all(text.as_bytes());
        self.line_start = text.ends_with('\n');
    }

    /// Flushes the writer to ensure immediate display of streamed content.
    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn style(&mut self, code: &str) {
        if self.use_color {
            let _ = self.out.write_all(code.as_bytes());
        }
    }

    fn erase_cursor(&mut self) {
        if self.cursor_drawn {
            let _ = self.out.write_all(ERASE_CURSOR.as_bytes());
            self.cursor_drawn = false;
        }
    }

    fn draw_cursor(&mut self) {
        if self.cursor_requested && self.show_cursor && !self.cursor_drawn {
            let _ = self.out.write_all(CURSOR_GLYPH.as_bytes());
            self.cursor_drawn = true;
        }
    }

    fn newline_if_needed(&mut self) {
        if !self.line_start {
            self.write("\n");
        }
    }

    fn enter(&mut self, section: Section) {
        if self.section == section {
            return;
        }
        self.erase_cursor();
        self.style(ANSI_RESET);
        self.newline_if_needed();
        match section {
            Section::Thinking => {
                self.style(ANSI_BOLD);
                self.write("Thinking Process:\n");
                self.style(ANSI_RESET);
                self.style(ANSI_DIM);
                self.style(ANSI_ITALIC);
            }
            Section::Answer => {
                if self.section == Section::Thinking {
                    self.write("\n");
                }
                self.style(ANSI_BOLD);
                self.write("Gemini:\n");
                self.style(ANSI_RESET);
            }
            Section::None => {}
        }
        self.section = section;
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_thinking(&mut self, text: &str) {
        self.enter(Section::Thinking);
        self.write(text);
        self.flush();
    }

    fn print_text(&mut self, text: &str) {
        self.enter(Section::Answer);
        self.erase_cursor();
        self.write(text);
        self.draw_cursor();
        self.flush();
    }

    fn print_thinking_failure(&mut self, text: &str) {
        self.enter(Section::Thinking);
        self.newline_if_needed();
        self.style(ANSI_RED);
        self.write(text);
        self.write("\n");
        self.style(ANSI_RESET);
        self.flush();
    }

    fn print_failure(&mut self, text: &str) {
        self.enter(Section::Answer);
        self.erase_cursor();
        self.newline_if_needed();
        self.style(ANSI_RED);
        self.write(text);
        self.write("\n");
        self.style(ANSI_RESET);
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.erase_cursor();
        self.style(ANSI_RESET);
        self.newline_if_needed();
        self.style(ANSI_RED);
        self.write(&format!("Error: {error}\n"));
        self.style(ANSI_RESET);
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.newline_if_needed();
        self.write(info);
        self.write("\n");
        self.flush();
    }

    fn set_cursor(&mut self, visible: bool) {
        self.cursor_requested = visible;
        if visible {
            if self.section == Section::Answer {
                self.draw_cursor();
            }
        } else {
            self.erase_cursor();
        }
        self.flush();
    }

    fn finish_response(&mut self) {
        self.erase_cursor();
        self.cursor_requested = false;
        self.style(ANSI_RESET);
        self.newline_if_needed();
        self.section = Section::None;
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn thinking_then_answer_without_color() {
        let out = Shared::default();
        let mut renderer = PlainTextRenderer::with_writer(Box::new(out.clone()), false);
        renderer.print_thinking("Let me think");
        renderer.print_thinking("...");
        renderer.print_text("The answer is 4");
        renderer.finish_response();
        assert_eq!(
            out.contents(),
            "Thinking Process:\nLet me think...\n\nGemini:\nThe answer is 4\n"
        );
    }

    #[test]
    fn cursor_trails_answer_and_is_erased() {
        let out = Shared::default();
        let mut renderer =
            PlainTextRenderer::with_writer(Box::new(out.clone()), true).with_cursor(true);
        renderer.set_cursor(true);
        renderer.print_text("Hel");
        renderer.print_text("lo");
        assert!(out.contents().ends_with(&format!("lo{CURSOR_GLYPH}")));
        renderer.finish_response();
        let contents = out.contents();
        assert!(contents.ends_with(&format!("lo{CURSOR_GLYPH}{ERASE_CURSOR}{ANSI_RESET}\n")));
    }

    #[test]
    fn cursor_does_not_need_color() {
        let out = Shared::default();
        let mut renderer =
            PlainTextRenderer::with_writer(Box::new(out.clone()), false).with_cursor(true);
        renderer.set_cursor(true);
        renderer.print_text("Hi");
        assert_eq!(out.contents(), format!("Gemini:\nHi{CURSOR_GLYPH}"));
        renderer.set_cursor(false);
        renderer.finish_response();
        assert_eq!(
            out.contents(),
            format!("Gemini:\nHi{CURSOR_GLYPH}{ERASE_CURSOR}\n")
        );
    }

    #[test]
    fn no_cursor_when_disabled() {
        let out = Shared::default();
        let mut renderer = PlainTextRenderer::with_writer(Box::new(out.clone()), false);
        renderer.set_cursor(true);
        renderer.print_text("Hi");
        renderer.finish_response();
        assert_eq!(out.contents(), "Gemini:\nHi\n");
    }

    #[test]
    fn failure_text_is_printed_verbatim() {
        let out = Shared::default();
        let mut renderer = PlainTextRenderer::with_writer(Box::new(out.clone()), false);
        renderer.print_thinking("partial");
        renderer.print_thinking_failure("Error fetching thinking process: boom");
        renderer.print_failure("Error generating response: boom");
        renderer.finish_response();
        assert_eq!(
            out.contents(),
            "Thinking Process:\npartial\nError fetching thinking process: boom\n\nGemini:\nError generating response: boom\n"
        );
    }
}
