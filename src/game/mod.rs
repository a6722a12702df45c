//! # Game Module
//!
//! Core game state management, world representation, and the player.
//!
//! This module contains the fundamental building blocks of the cavern:
//! - The room grid and its hazards
//! - The player and their quiver
//! - The controller that turns commands into narrated outcomes

pub mod messages;
pub mod player;
pub mod state;
pub mod world;

pub use messages::*;
pub use player::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A room coordinate in the cavern grid.
///
/// Rows grow towards the south and columns grow towards the east, so `(0, 0)` is
/// the north-west corner.
///
/// # Examples
///
/// ```
/// use fountain::Position;
///
/// let pos = Position::new(2, 1);
/// assert_eq!(pos.row, 2);
/// assert_eq!(pos.column, 1);
///
/// let neighbours = pos.adjacent_positions();
/// assert_eq!(neighbours.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self + direction.to_delta()
    }

    /// Chebyshev distance, i.e. the number of king moves between two rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::Position;
    ///
    /// assert_eq!(Position::new(0, 0).chebyshev_distance(Position::new(1, 1)), 1);
    /// assert_eq!(Position::new(0, 0).chebyshev_distance(Position::new(3, 1)), 3);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.row - other.row)
            .unsigned_abs()
            .max((self.column - other.column).unsigned_abs())
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.row - 1, self.column - 1), // NW
            Position::new(self.row - 1, self.column),     // N
            Position::new(self.row - 1, self.column + 1), // NE
            Position::new(self.row, self.column - 1),     // W
            Position::new(self.row, self.column + 1),     // E
            Position::new(self.row + 1, self.column - 1), // SW
            Position::new(self.row + 1, self.column),     // S
            Position::new(self.row + 1, self.column + 1), // SE
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.row + other.row, self.column + other.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Row={}, Column={})", self.row, self.column)
    }
}

/// Compass directions the player can walk or shoot in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(-1, 0));
    /// assert_eq!(Direction::East.to_delta(), Position::new(0, 1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(-1, 0),
            Direction::South => Position::new(1, 0),
            Direction::East => Position::new(0, 1),
            Direction::West => Position::new(0, -1),
        }
    }

    /// Lowercase name used in narration ("north", "east", ...).
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.row, 5);
        assert_eq!(pos.column, 10);
    }

    #[test]
    fn test_position_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.adjacent_positions();
        assert_eq!(adjacent.len(), 8);
        assert!(adjacent.contains(&Position::new(4, 4)));
        assert!(adjacent.contains(&Position::new(6, 6)));
        assert!(!adjacent.contains(&pos));
        assert!(adjacent.iter().all(|p| p.chebyshev_distance(pos) == 1));
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::North.to_delta(), Position::new(-1, 0));
        assert_eq!(Direction::South.to_delta(), Position::new(1, 0));
        assert_eq!(Direction::East.to_delta(), Position::new(0, 1));
        assert_eq!(Direction::West.to_delta(), Position::new(0, -1));
    }

    #[test]
    fn test_step_is_unit_move() {
        let pos = Position::new(2, 2);
        for direction in Direction::all() {
            let next = pos.step(direction);
            assert_eq!(next.chebyshev_distance(pos), 1);
            assert!(next.row == pos.row || next.column == pos.column);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(0, 3).to_string(), "(Row=0, Column=3)");
        assert_eq!(Direction::West.to_string(), "west");
    }
}
