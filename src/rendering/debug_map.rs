//! # Debug Map
//!
//! Renders the whole cavern as a walled ASCII grid. Used with `--debug`;
//! it reveals every hazard, so it is never shown in a normal game.

use crate::{Position, RoomType, World};

/// Single-character marker for a room on the debug map.
///
/// Dead amaroks and empty rooms render blank.
pub fn room_marker(room: RoomType) -> char {
    match room {
        RoomType::Fountain => 'F',
        RoomType::Entrance => 'E',
        RoomType::Maelstrom => 'M',
        RoomType::Pit => 'O',
        RoomType::Amarok => 'A',
        RoomType::Empty | RoomType::DeadAmarok => ' ',
    }
}

/// Draws the cavern with the player marked `P`.
///
/// Only the outer walls are drawn solid; rooms inside a row are separated by
/// spaces and rows by open `+   +` lines.
///
/// # Examples
///
/// ```
/// use fountain::{render_debug_map, Position, World};
///
/// let world: World = "EF".parse().unwrap();
/// let map = render_debug_map(&world, Position::new(0, 0));
/// assert_eq!(map, "+---+---+\n| P   F |\n+---+---+");
/// ```
pub fn render_debug_map(world: &World, player: Position) -> String {
    let columns = world.columns().max(1);
    let outer_wall = format!("+{}", "---+".repeat(columns));
    let inner_wall = format!("+{}", "   +".repeat(columns));

    let markers: Vec<char> = world
        .positions()
        .map(|pos| {
            if pos == player {
                'P'
            } else {
                world.room_type(pos).map(room_marker).unwrap_or(' ')
            }
        })
        .collect();

    let rows: Vec<String> = markers
        .chunks(columns)
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|marker| format!(" {} ", marker)).collect();
            format!("|{}|", cells.join(" "))
        })
        .collect();

    let body = rows.join(&format!("\n{}\n", inner_wall));
    format!("{}\n{}\n{}", outer_wall, body, outer_wall)
}
