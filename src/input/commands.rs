//! # Command Definitions
//!
//! The closed set of turn commands and their text vocabulary.

use crate::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A turn command the game state knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Walk one room in a direction
    Move(Direction),
    /// Fire an arrow into the adjacent room
    Shoot(Direction),
    /// Reactivate the fountain in the current room
    EnableFountain,
}

impl Command {
    /// Parses a command from player text.
    ///
    /// Matching is case-insensitive and ignores surrounding and repeated
    /// whitespace. Both the long form and the two-letter shorthand are
    /// accepted. Returns `None` for anything outside the vocabulary.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{Command, Direction};
    ///
    /// assert_eq!(Command::parse("move north"), Some(Command::Move(Direction::North)));
    /// assert_eq!(Command::parse("  SW "), Some(Command::Shoot(Direction::West)));
    /// assert_eq!(Command::parse("ef"), Some(Command::EnableFountain));
    /// assert_eq!(Command::parse("dance"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Command> {
        let normalized = text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        let command = match normalized.as_str() {
            "move north" | "mn" => Command::Move(Direction::North),
            "move south" | "ms" => Command::Move(Direction::South),
            "move east" | "me" => Command::Move(Direction::East),
            "move west" | "mw" => Command::Move(Direction::West),
            "shoot north" | "sn" => Command::Shoot(Direction::North),
            "shoot south" | "ss" => Command::Shoot(Direction::South),
            "shoot east" | "se" => Command::Shoot(Direction::East),
            "shoot west" | "sw" => Command::Shoot(Direction::West),
            "enable fountain" | "ef" => Command::EnableFountain,
            _ => return None,
        };
        Some(command)
    }

    /// Help text listing every command.
    pub fn help_text() -> &'static str {
        "Commands:\n\
         \x20 move north|south|east|west   (mn, ms, me, mw)\n\
         \x20 shoot north|south|east|west  (sn, ss, se, sw)\n\
         \x20 enable fountain              (ef)\n\
         \x20 help                         (h, ?)\n\
         \x20 quit                         (q)"
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(direction) => write!(f, "move {}", direction),
            Command::Shoot(direction) => write!(f, "shoot {}", direction),
            Command::EnableFountain => f.write_str("enable fountain"),
        }
    }
}
