//! # Input Module
//!
//! Line-based input handling and command parsing for player interactions.

pub mod commands;

pub use commands::*;

use crate::FountainResult;
use std::io::BufRead;

/// Everything a player can type at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// A turn command for the game state
    Command(Command),
    /// Show help information
    Help,
    /// Quit the game
    Quit,
    /// Text outside the vocabulary, kept for the notice shown to the player
    Unrecognized(String),
}

impl PlayerInput {
    /// Classifies one line of player text.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{Command, PlayerInput};
    ///
    /// assert_eq!(PlayerInput::parse("ef"), PlayerInput::Command(Command::EnableFountain));
    /// assert_eq!(PlayerInput::parse("Q"), PlayerInput::Quit);
    /// ```
    pub fn parse(line: &str) -> PlayerInput {
        if let Some(command) = Command::parse(line) {
            return PlayerInput::Command(command);
        }
        match line.trim().to_lowercase().as_str() {
            "help" | "h" | "?" => PlayerInput::Help,
            "quit" | "q" | "exit" => PlayerInput::Quit,
            _ => PlayerInput::Unrecognized(line.trim().to_string()),
        }
    }
}

/// Reads player input one line at a time.
pub struct InputHandler<R> {
    reader: R,
    buffer: String,
}

impl<R: BufRead> InputHandler<R> {
    /// Creates a new input handler over any buffered reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{InputHandler, PlayerInput};
    ///
    /// let mut input = InputHandler::new("mn\nquit\n".as_bytes());
    /// assert!(matches!(input.next_input().unwrap(), Some(PlayerInput::Command(_))));
    /// assert_eq!(input.next_input().unwrap(), Some(PlayerInput::Quit));
    /// assert_eq!(input.next_input().unwrap(), None);
    /// ```
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    /// Reads and classifies the next line. `None` at end of input.
    pub fn next_input(&mut self) -> FountainResult<Option<PlayerInput>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(PlayerInput::parse(&self.buffer)))
    }
}
