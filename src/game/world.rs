//! # World Module
//!
//! The cavern: a fixed-size grid of rooms holding the fountain, the entrance and
//! the hazards, plus everything the player can sense from inside a room.

use crate::{FountainError, FountainResult, Message, MessageTone, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What occupies a single room of the cavern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Empty,
    Entrance,
    Fountain,
    Pit,
    Maelstrom,
    Amarok,
    /// An amarok that has been shot. Harmless and no longer sensed from afar.
    DeadAmarok,
}

impl RoomType {
    /// Layout character used by [`World::from_str`] and the debug map.
    pub fn layout_char(self) -> char {
        match self {
            RoomType::Empty => '.',
            RoomType::Entrance => 'E',
            RoomType::Fountain => 'F',
            RoomType::Pit => 'O',
            RoomType::Maelstrom => 'M',
            RoomType::Amarok => 'A',
            RoomType::DeadAmarok => 'X',
        }
    }

    /// Inverse of [`RoomType::layout_char`].
    pub fn from_layout_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(RoomType::Empty),
            'E' => Some(RoomType::Entrance),
            'F' => Some(RoomType::Fountain),
            'O' => Some(RoomType::Pit),
            'M' => Some(RoomType::Maelstrom),
            'A' => Some(RoomType::Amarok),
            'X' => Some(RoomType::DeadAmarok),
            _ => None,
        }
    }
}

/// The three cavern sizes offered at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapSize {
    Small,
    Medium,
    Large,
}

impl MapSize {
    /// Dimensions and hazard counts for this size.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::MapSize;
    ///
    /// let layout = MapSize::Medium.layout();
    /// assert_eq!((layout.rows, layout.columns), (6, 6));
    /// assert_eq!(layout.amaroks, 2);
    /// ```
    pub fn layout(self) -> MapLayout {
        match self {
            MapSize::Small => MapLayout::new(4, 4, 1, 1, 1),
            MapSize::Medium => MapLayout::new(6, 6, 2, 1, 2),
            MapSize::Large => MapLayout::new(8, 8, 4, 2, 3),
        }
    }
}

impl FromStr for MapSize {
    type Err = FountainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(MapSize::Small),
            "medium" => Ok(MapSize::Medium),
            "large" => Ok(MapSize::Large),
            other => Err(FountainError::InvalidInput(format!(
                "unknown map size '{}', expected small, medium or large",
                other
            ))),
        }
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapSize::Small => "small",
            MapSize::Medium => "medium",
            MapSize::Large => "large",
        };
        f.write_str(name)
    }
}

/// Grid dimensions and how many of each hazard to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    pub rows: usize,
    pub columns: usize,
    pub pits: usize,
    pub maelstroms: usize,
    pub amaroks: usize,
}

impl MapLayout {
    pub fn new(rows: usize, columns: usize, pits: usize, maelstroms: usize, amaroks: usize) -> Self {
        Self {
            rows,
            columns,
            pits,
            maelstroms,
            amaroks,
        }
    }

    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of hazard rooms this layout asks for.
    pub fn hazard_count(&self) -> usize {
        self.pits + self.maelstroms + self.amaroks
    }
}

/// Hazards sensed in the rooms surrounding the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyHazards {
    pub pit: bool,
    pub maelstrom: bool,
    pub amarok: bool,
}

impl NearbyHazards {
    pub fn any(&self) -> bool {
        self.pit || self.maelstrom || self.amarok
    }
}

/// What an arrow fired into a room ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// The arrow killed an amarok
    Killed,
    /// The arrow vanished into a maelstrom without effect
    Deflected,
    /// The room held nothing to hit
    Missed,
}

impl ShotOutcome {
    /// Whether the arrow struck something.
    pub fn hit(self) -> bool {
        !matches!(self, ShotOutcome::Missed)
    }

    /// Narration for this outcome, starting with the arrow leaving the bow.
    pub fn narration(self) -> Vec<Message> {
        let mut messages = vec![Message::narrative(
            "The arrow flies into the darkness of the next room.",
        )];
        let text = match self {
            ShotOutcome::Killed => {
                "Before you can lower your bow, you hear a sickening *SQUISH* followed by a\n\
                 thunderous, glottal scream from beyond the darkness. Your bow arm falls by your\n\
                 side, and a tremor shakes the stone floor as whatever creature was in the arrow's\n\
                 path falls over dead."
            }
            ShotOutcome::Deflected => {
                "In an instant, you feel a blast of wind from the direction of your shot. In the\n\
                 midst of the nearby roaring tempest, you can hear the unmistakable sound of an\n\
                 arrow being thrown around the room, clattering as it bounces off of wall after wall.\n\
                 It seems your arrow had no effect, save for angering the source of the wind."
            }
            ShotOutcome::Missed => {
                "A moment later, you hear the sound of the arrow striking stone before clattering\n\
                 broken and useless to the ground. It seems you fired into an empty room."
            }
        };
        messages.push(Message::narrative(text));
        messages
    }
}

/// Result of trying to reactivate the fountain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FountainOutcome {
    Enabled,
    AlreadyEnabled,
    NoFountainHere,
}

impl FountainOutcome {
    pub fn message(self) -> Message {
        match self {
            FountainOutcome::Enabled => Message::new(
                "You turn the ancient valves. With a deep groan, the Fountain of Objects \
                 begins to flow again!",
                MessageTone::Fountain,
            ),
            FountainOutcome::AlreadyEnabled => Message::new(
                "The fountain has already been enabled",
                MessageTone::Fountain,
            ),
            FountainOutcome::NoFountainHere => Message::warning("There is no fountain in this room"),
        }
    }
}

/// The cavern grid.
///
/// Rooms are stored row-major in a flat vector. The fountain and entrance
/// locations are fixed for the life of the world; only fountain activation,
/// amarok kills and maelstrom relocation mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    rows: usize,
    columns: usize,
    rooms: Vec<RoomType>,
    fountain: Position,
    entrance: Position,
    fountain_enabled: bool,
}

impl World {
    /// Builds a world from an explicit row-major room list.
    ///
    /// The layout must contain exactly one fountain and one entrance, and the
    /// entrance must sit on the outer wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{Position, RoomType, World};
    /// use RoomType::*;
    ///
    /// let world = World::from_rooms(2, 2, vec![Entrance, Empty, Empty, Fountain]).unwrap();
    /// assert_eq!(world.fountain_location(), Position::new(1, 1));
    /// assert_eq!(world.entrance_location(), Position::new(0, 0));
    /// ```
    pub fn from_rooms(rows: usize, columns: usize, rooms: Vec<RoomType>) -> FountainResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(FountainError::InvalidLayout(
                "the cavern needs at least one row and one column".to_string(),
            ));
        }
        if rooms.len() != rows * columns {
            return Err(FountainError::InvalidLayout(format!(
                "expected {} rooms for a {}x{} cavern, got {}",
                rows * columns,
                rows,
                columns,
                rooms.len()
            )));
        }

        let position_of = |index: usize| Position::new((index / columns) as i32, (index % columns) as i32);
        let find_unique = |kind: RoomType, name: &str| -> FountainResult<Position> {
            let mut found = rooms.iter().enumerate().filter(|(_, r)| **r == kind);
            match (found.next(), found.next()) {
                (Some((index, _)), None) => Ok(position_of(index)),
                (None, _) => Err(FountainError::InvalidLayout(format!("no {} room", name))),
                (Some(_), Some(_)) => Err(FountainError::InvalidLayout(format!(
                    "more than one {} room",
                    name
                ))),
            }
        };

        let fountain = find_unique(RoomType::Fountain, "fountain")?;
        let entrance = find_unique(RoomType::Entrance, "entrance")?;

        let world = Self {
            rows,
            columns,
            rooms,
            fountain,
            entrance,
            fountain_enabled: false,
        };
        world.validate()?;
        Ok(world)
    }

    /// Checks the layout invariants.
    ///
    /// Worlds restored from JSON bypass [`World::from_rooms`], so they are
    /// re-validated through this.
    pub fn validate(&self) -> FountainResult<()> {
        if self.rooms.len() != self.rows * self.columns {
            return Err(FountainError::InvalidLayout(format!(
                "room count {} does not match {}x{}",
                self.rooms.len(),
                self.rows,
                self.columns
            )));
        }
        if self.room_type(self.fountain) != Some(RoomType::Fountain) {
            return Err(FountainError::InvalidLayout(format!(
                "fountain location {} does not hold the fountain",
                self.fountain
            )));
        }
        if self.room_type(self.entrance) != Some(RoomType::Entrance) {
            return Err(FountainError::InvalidLayout(format!(
                "entrance location {} does not hold the entrance",
                self.entrance
            )));
        }
        if !self.is_on_border(self.entrance) {
            return Err(FountainError::InvalidLayout(format!(
                "entrance {} is not on the outer wall",
                self.entrance
            )));
        }
        let fountains = self.count(RoomType::Fountain);
        let entrances = self.count(RoomType::Entrance);
        if fountains != 1 || entrances != 1 {
            return Err(FountainError::InvalidLayout(format!(
                "expected one fountain and one entrance, found {} and {}",
                fountains, entrances
            )));
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn fountain_location(&self) -> Position {
        self.fountain
    }

    pub fn entrance_location(&self) -> Position {
        self.entrance
    }

    pub fn is_fountain_enabled(&self) -> bool {
        self.fountain_enabled
    }

    /// Returns true if `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.column >= 0
            && (pos.row as usize) < self.rows
            && (pos.column as usize) < self.columns
    }

    /// Returns true if `pos` is a room along one of the four outer walls.
    pub fn is_on_border(&self, pos: Position) -> bool {
        self.contains(pos)
            && (pos.row == 0
                || pos.column == 0
                || pos.row as usize == self.rows - 1
                || pos.column as usize == self.columns - 1)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.columns + pos.column as usize)
        } else {
            None
        }
    }

    /// Looks up what occupies a room. `None` outside the grid.
    pub fn room_type(&self, pos: Position) -> Option<RoomType> {
        self.index(pos).map(|i| self.rooms[i])
    }

    /// Number of rooms of the given type.
    pub fn count(&self, kind: RoomType) -> usize {
        self.rooms.iter().filter(|r| **r == kind).count()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| Position::new(row as i32, column as i32))
        })
    }

    /// Overwrites a room. Callers are responsible for keeping the fountain and
    /// entrance intact.
    pub(crate) fn set_room(&mut self, pos: Position, kind: RoomType) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.rooms[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Creates an all-empty grid with the fountain and entrance already placed.
    pub(crate) fn with_landmarks(
        rows: usize,
        columns: usize,
        fountain: Position,
        entrance: Position,
    ) -> FountainResult<Self> {
        let mut world = Self {
            rows,
            columns,
            rooms: vec![RoomType::Empty; rows * columns],
            fountain,
            entrance,
            fountain_enabled: false,
        };
        if fountain == entrance {
            return Err(FountainError::InvalidLayout(
                "fountain and entrance cannot share a room".to_string(),
            ));
        }
        if !world.set_room(fountain, RoomType::Fountain) || !world.set_room(entrance, RoomType::Entrance) {
            return Err(FountainError::InvalidLayout(
                "fountain or entrance lies outside the cavern".to_string(),
            ));
        }
        world.validate()?;
        Ok(world)
    }

    /// Reports which hazards lie in the rooms around `pos`.
    ///
    /// The neighbourhood is every room within Chebyshev distance 1, excluding
    /// `pos` itself and clipped at the cavern walls. Dead amaroks do not count.
    pub fn detect_nearby_hazards(&self, pos: Position) -> NearbyHazards {
        let mut hazards = NearbyHazards::default();
        for neighbour in pos.adjacent_positions() {
            match self.room_type(neighbour) {
                Some(RoomType::Pit) => hazards.pit = true,
                Some(RoomType::Maelstrom) => hazards.maelstrom = true,
                Some(RoomType::Amarok) => hazards.amarok = true,
                _ => {}
            }
        }
        hazards
    }

    /// Describes what the player senses while standing in `pos`.
    ///
    /// Warnings about nearby hazards come first, followed by the room's own
    /// description.
    pub fn describe_room(&self, pos: Position) -> Vec<Message> {
        let mut messages = Vec::new();

        let nearby = self.detect_nearby_hazards(pos);
        if nearby.pit {
            messages.push(Message::warning(
                "You feel a draft. There is a pit in a nearby room.",
            ));
        }
        if nearby.maelstrom {
            messages.push(Message::warning(
                "You hear the growling and groaning of a maelstrom nearby.",
            ));
        }
        if nearby.amarok {
            messages.push(Message::warning(
                "You can smell the rotten stench of an amarok in a nearby room.",
            ));
        }

        let Some(room) = self.room_type(pos) else {
            return messages;
        };

        match room {
            RoomType::Fountain if self.fountain_enabled => messages.push(Message::new(
                "You hear the rushing water from the Fountain of Objects. It has been reactivated!",
                MessageTone::Fountain,
            )),
            RoomType::Fountain => messages.push(Message::new(
                "You hear water dripping in this room. The Fountain of Objects is here!",
                MessageTone::Fountain,
            )),
            RoomType::Entrance if self.fountain_enabled => messages.push(Message::new(
                "The Fountain of Objects has been reactivated, and you have escaped with your life!",
                MessageTone::Victory,
            )),
            RoomType::Entrance => messages.push(Message::new(
                "You see light coming from the cavern entrance.",
                MessageTone::Entrance,
            )),
            RoomType::Pit => messages.push(Message::narrative(
                "As you step into the room, your foot fails to connect to solid ground as you feel your\n\
                 entire body weight fall forward.",
            )),
            RoomType::Maelstrom => {
                messages.push(Message::narrative(
                    "Within seconds of entering the room, a powerful gust of wind throws you against\n\
                     the wall, and just as quickly, slams you against the opposite wall.",
                ));
                messages.push(Message::narrative(
                    "It seems you've encountered a malevolent, sentient wind - a Maelstrom!",
                ));
            }
            RoomType::Amarok | RoomType::DeadAmarok => {
                messages.push(Message::narrative(
                    "Stepping across the threshold of the room, your senses are overwhelmed by a fetid odor\n\
                     of organic rot and decay.",
                ));
                if room == RoomType::Amarok {
                    messages.push(Message::narrative(
                        "Somewhere in the darkness nearby, you hear the approach of plodding footsteps\n\
                         and wheezing that could only belong to an amarok.",
                    ));
                } else {
                    messages.push(Message::narrative(
                        "Lying in the center of the room is the unmistakable shape of a large, dead creature.\n\
                         It looks like your arrow found its mark; the fletching sticking out of what remains\n\
                         of its right eye, and the arrowhead embedded deep in the amarok's tiny brain.",
                    ));
                }
            }
            RoomType::Empty => messages.push(Message::new(
                "You stand in a dark, empty room.",
                MessageTone::EmptyRoom,
            )),
        }

        messages
    }

    /// Moves the maelstrom out of `from` after it has thrown the player around.
    ///
    /// The maelstrom always drifts one room south and two rooms west, stopping
    /// at the walls. If that room is the fountain or the entrance, it stays in
    /// `from`. Returns where the maelstrom ended up.
    pub fn relocate_maelstrom(&mut self, from: Position) -> Position {
        if !self.contains(from) {
            return from;
        }

        let target = Position::new(
            (from.row + 1).min(self.rows as i32 - 1),
            (from.column - 2).max(0),
        );

        match self.room_type(target) {
            Some(RoomType::Fountain) | Some(RoomType::Entrance) => {
                log::debug!("maelstrom at {} cannot drift onto a landmark, staying put", from);
                self.set_room(from, RoomType::Maelstrom);
                from
            }
            _ => {
                log::debug!("maelstrom drifts from {} to {}", from, target);
                self.set_room(from, RoomType::Empty);
                self.set_room(target, RoomType::Maelstrom);
                target
            }
        }
    }

    /// Resolves an arrow fired into `target`.
    ///
    /// Amaroks die and leave a [`RoomType::DeadAmarok`] behind. A maelstrom
    /// swallows the arrow without changing. Anything else is a miss.
    pub fn shoot_into_room(&mut self, target: Position) -> ShotOutcome {
        match self.room_type(target) {
            Some(RoomType::Amarok) => {
                self.set_room(target, RoomType::DeadAmarok);
                log::debug!("amarok at {} killed", target);
                ShotOutcome::Killed
            }
            Some(RoomType::Maelstrom) => ShotOutcome::Deflected,
            _ => ShotOutcome::Missed,
        }
    }

    /// Reactivates the fountain if `pos` is the fountain room.
    pub fn enable_fountain(&mut self, pos: Position) -> FountainOutcome {
        if pos != self.fountain {
            FountainOutcome::NoFountainHere
        } else if self.fountain_enabled {
            FountainOutcome::AlreadyEnabled
        } else {
            self.fountain_enabled = true;
            FountainOutcome::Enabled
        }
    }
}

/// Writes the layout in the same format [`World::from_str`] accepts.
impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.rooms.chunks(self.columns).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for room in chunk {
                write!(f, "{}", room.layout_char())?;
            }
        }
        Ok(())
    }
}

/// Parses a hand-drawn layout, one line per row, using the characters of
/// [`RoomType::layout_char`]. Blank lines and surrounding whitespace are ignored.
///
/// # Examples
///
/// ```
/// use fountain::{Position, RoomType, World};
///
/// let world: World = "\
///     ...E
///     ....
///     .F..
///     ...."
///     .parse()
///     .unwrap();
/// assert_eq!(world.room_type(Position::new(2, 1)), Some(RoomType::Fountain));
/// ```
impl FromStr for World {
    type Err = FountainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let rows = lines.len();
        let columns = lines.first().map(|l| l.chars().count()).unwrap_or(0);

        let mut rooms = Vec::with_capacity(rows * columns);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != columns {
                return Err(FountainError::InvalidLayout(format!(
                    "row {} has {} rooms, expected {}",
                    row,
                    line.chars().count(),
                    columns
                )));
            }
            for c in line.chars() {
                let room = RoomType::from_layout_char(c).ok_or_else(|| {
                    FountainError::InvalidLayout(format!("unknown room marker '{}'", c))
                })?;
                rooms.push(room);
            }
        }

        World::from_rooms(rows, columns, rooms)
    }
}
