//! # Player
//!
//! The adventurer: where they stand and how many arrows are left.

use crate::config::STARTING_ARROWS;
use crate::{Direction, Position};
use serde::{Deserialize, Serialize};

/// The player character.
///
/// Movement is unchecked; the controller is responsible for refusing moves
/// that would walk through the cavern walls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    position: Position,
    arrows: u32,
}

impl Player {
    /// Creates a player standing at `start` with a full quiver.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{Player, Position};
    ///
    /// let player = Player::new(Position::new(0, 3));
    /// assert_eq!(player.position(), Position::new(0, 3));
    /// assert_eq!(player.arrows(), 5);
    /// ```
    pub fn new(start: Position) -> Self {
        Self::with_arrows(start, STARTING_ARROWS)
    }

    pub fn with_arrows(start: Position, arrows: u32) -> Self {
        Self {
            position: start,
            arrows,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn arrows(&self) -> u32 {
        self.arrows
    }

    /// Steps one room in `direction`.
    pub fn move_in(&mut self, direction: Direction) {
        self.position = self.position.step(direction);
    }

    /// Nocks and fires an arrow.
    ///
    /// Returns the room the arrow flies into, or `None` when the quiver is
    /// empty. An empty quiver leaves the player untouched.
    pub fn shoot(&mut self, direction: Direction) -> Option<Position> {
        if self.arrows == 0 {
            return None;
        }
        self.arrows -= 1;
        Some(self.position.step(direction))
    }

    /// One-line summary shown above every room description.
    pub fn status_line(&self) -> String {
        let noun = if self.arrows == 1 { "arrow" } else { "arrows" };
        format!(
            "You are in the room at {} with {} {} in your quiver.",
            self.position, self.arrows, noun
        )
    }
}
