//! # Display Management
//!
//! Text output for the terminal, or any other [`Write`] sink.

use crate::config::STATUS_SEPARATOR_WIDTH;
use crate::{render_debug_map, FountainResult, GameState, Message};
use std::io::Write;

/// Plain text display.
///
/// Messages are queued with [`TextDisplay::add_message`] and written out on the
/// next [`TextDisplay::render_game`], each followed by a blank line.
pub struct TextDisplay<W> {
    out: W,
    /// Pending messages since the last render
    pub messages: Vec<Message>,
    /// Whether to draw the full cavern map above the status
    pub show_debug_map: bool,
}

impl<W: Write> TextDisplay<W> {
    /// Creates a display writing to `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{Message, TextDisplay};
    ///
    /// let mut display = TextDisplay::new(Vec::new(), false);
    /// display.add_message(Message::descriptive("Hello"));
    /// assert_eq!(display.messages.len(), 1);
    /// ```
    pub fn new(out: W, show_debug_map: bool) -> Self {
        Self {
            out,
            messages: Vec::new(),
            show_debug_map,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn add_messages(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    /// Writes the debug map (if enabled), a separator, and every queued message.
    pub fn render_game(&mut self, state: &GameState) -> FountainResult<()> {
        if self.show_debug_map {
            writeln!(
                self.out,
                "{}\n",
                render_debug_map(state.world(), state.player().position())
            )?;
        }
        writeln!(self.out, "{}\n", "-".repeat(STATUS_SEPARATOR_WIDTH))?;

        for message in self.messages.drain(..) {
            writeln!(self.out, "{}\n", message.text)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Writes a prompt without a trailing newline.
    pub fn prompt(&mut self, text: &str) -> FountainResult<()> {
        write!(self.out, "{} ", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Consumes the display and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
