//! # Game State Module
//!
//! Central game state and the turn controller.
//!
//! [`GameState`] owns the world, the player and the random number generator.
//! It applies one [`Command`] at a time, resolves whatever the player walks
//! into, and decides when the game has been won or lost.

use crate::config::MAX_ENCOUNTER_CASCADE;
use crate::generation::utils::create_rng;
use crate::{
    CavernGenerator, Command, Direction, FountainError, FountainOutcome, FountainResult,
    GenerationConfig, Generator, Message, MessageTone, Player, RoomType, ShotOutcome, World,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Death narratives for walking into a live amarok. One is picked at random.
const AMAROK_DEATHS: [&str; 3] = [
    "Before your eyes can adjust, a massive shape lunges from the dark. The amarok's jaws close\n\
     around your shoulder and drag you to the cold stone floor. Your struggle is brief.",
    "You hear the wheezing stop. For a moment there is only silence, then a weight like a\n\
     falling boulder slams into your back and the amarok's teeth find your throat.",
    "The stench becomes unbearable as two pale eyes open an arm's length from your face. You\n\
     reach for your bow, but the amarok is faster, and the darkness swallows your last scream.",
];

const PIT_DEATH: &str =
    "At long last, you hit the bottom of the pit to the sound of every bone in your body breaking\n\
     and the acute, agonizing pain of every organ rupturing. With your concussed head whirring in the\n\
     pitch darkness, you realize in your final moments of clarity that death is now inevitable.";

const MAELSTROM_THROW: &str =
    "With a sudden, violent upheaval the Maelstrom lifts you off the ground and ingests you in its\n\
     raging currents. Shortly after losing any sense of which way is up, you're tossed about in the darkness\n\
     like a ragdoll. The winds finally subside; the Maelstrom has let you go somewhere in the darkness, with a\n\
     few bruises as souvenirs.";

/// Forced steps applied after a maelstrom throws the player.
const MAELSTROM_PUSH: [Direction; 3] = [Direction::North, Direction::East, Direction::East];

/// Game completion state for handling endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Fountain reactivated and the player is back at the entrance
    Won,
    /// Player fell into a pit or met a live amarok
    Dead,
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Rooms walked into by the player's own choice
    pub steps_taken: u32,
    /// Moves refused because of a wall
    pub wall_bumps: u32,
    /// Arrows that left the quiver
    pub arrows_fired: u32,
    /// Amaroks killed
    pub amaroks_slain: u32,
    /// Times the player was thrown by a maelstrom
    pub maelstrom_encounters: u32,
}

/// Central game state containing all game data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    world: World,
    player: Player,
    completion_state: GameCompletionState,
    /// Number of commands that consumed a turn
    turn_number: u64,
    statistics: GameStatistics,
    /// Seed the game was created with
    rng_seed: u64,
    #[serde(skip, default = "unseeded_rng")]
    rng: StdRng,
}

fn unseeded_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

impl GameState {
    /// Generates a new cavern and places the player at its entrance.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{GameCompletionState, GameState, GenerationConfig};
    ///
    /// let state = GameState::new(&GenerationConfig::for_testing(12345)).unwrap();
    /// assert_eq!(state.turn_number(), 0);
    /// assert_eq!(state.player().position(), state.world().entrance_location());
    /// assert_eq!(state.completion_state(), GameCompletionState::Playing);
    /// ```
    pub fn new(config: &GenerationConfig) -> FountainResult<Self> {
        let mut rng = create_rng(config);
        let world = CavernGenerator::new().generate(config, &mut rng)?;
        let player = Player::new(world.entrance_location());
        log::info!(
            "new {} cavern with seed {}, entrance at {}",
            config.map_size,
            config.seed,
            world.entrance_location()
        );
        Ok(Self::assemble(world, player, config.seed, rng))
    }

    /// Creates a game state from a prepared world and player.
    pub fn from_parts(world: World, player: Player, seed: u64) -> Self {
        Self::assemble(world, player, seed, StdRng::seed_from_u64(seed))
    }

    fn assemble(world: World, player: Player, seed: u64, rng: StdRng) -> Self {
        Self {
            world,
            player,
            completion_state: GameCompletionState::Playing,
            turn_number: 0,
            statistics: GameStatistics::default(),
            rng_seed: seed,
            rng,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn completion_state(&self) -> GameCompletionState {
        self.completion_state
    }

    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    pub fn seed(&self) -> u64 {
        self.rng_seed
    }

    /// Checks whether the game is over.
    pub fn is_game_ended(&self) -> bool {
        self.completion_state != GameCompletionState::Playing
    }

    /// Returns the ending, if one has been reached.
    pub fn check_game_over(&self) -> Option<GameCompletionState> {
        if self.is_game_ended() {
            Some(self.completion_state)
        } else {
            None
        }
    }

    /// Status line followed by everything the player senses in their room.
    pub fn describe_current_room(&self) -> Vec<Message> {
        let mut messages = vec![Message::descriptive(self.player.status_line())];
        messages.extend(self.world.describe_room(self.player.position()));
        messages
    }

    /// Parses player text and applies it.
    ///
    /// Text outside the command vocabulary changes nothing. Blank lines produce
    /// no narration at all.
    pub fn apply_input(&mut self, text: &str) -> Vec<Message> {
        match Command::parse(text) {
            Some(command) => self.execute(command),
            None if text.trim().is_empty() => Vec::new(),
            None => {
                log::debug!("ignoring unrecognized input {:?}", text.trim());
                vec![Message::warning(format!(
                    "You don't know how to '{}'. Type 'help' for a list of commands.",
                    text.trim()
                ))]
            }
        }
    }

    /// Applies a single command and returns the narration it produced.
    ///
    /// Once the game has ended every command is ignored.
    pub fn execute(&mut self, command: Command) -> Vec<Message> {
        if self.is_game_ended() {
            return Vec::new();
        }
        log::debug!("turn {}: {}", self.turn_number, command);

        let mut messages = match command {
            Command::Move(direction) => self.move_player(direction),
            Command::Shoot(direction) => self.shoot(direction),
            Command::EnableFountain => self.enable_fountain(),
        };

        self.update_completion_state(&mut messages);
        messages
    }

    fn move_player(&mut self, direction: Direction) -> Vec<Message> {
        let target = self.player.position().step(direction);
        if !self.world.contains(target) {
            self.statistics.wall_bumps += 1;
            return vec![Message::warning(format!(
                "There is a wall, you cannot go {}!",
                direction
            ))];
        }

        self.player.move_in(direction);
        self.turn_number += 1;
        self.statistics.steps_taken += 1;
        self.enter_room()
    }

    /// Describes the room the player just entered and resolves any hazard in it.
    fn enter_room(&mut self) -> Vec<Message> {
        let mut messages = Vec::new();

        for _ in 0..MAX_ENCOUNTER_CASCADE {
            messages.extend(self.describe_current_room());

            let here = self.player.position();
            match self.world.room_type(here) {
                Some(RoomType::Pit) => {
                    messages.push(Message::fatal(PIT_DEATH));
                    self.completion_state = GameCompletionState::Dead;
                    return messages;
                }
                Some(RoomType::Amarok) => {
                    let text = AMAROK_DEATHS
                        .choose(&mut self.rng)
                        .copied()
                        .unwrap_or(AMAROK_DEATHS[0]);
                    messages.push(Message::fatal(text));
                    self.completion_state = GameCompletionState::Dead;
                    return messages;
                }
                Some(RoomType::Maelstrom) => {
                    messages.push(Message::narrative(MAELSTROM_THROW));
                    self.statistics.maelstrom_encounters += 1;
                    self.world.relocate_maelstrom(here);
                    self.push_player_clamped(&MAELSTROM_PUSH);
                    if self.player.position() == here {
                        return messages;
                    }
                }
                _ => return messages,
            }
        }

        log::warn!(
            "stopped resolving maelstrom encounters after {} throws",
            MAX_ENCOUNTER_CASCADE
        );
        messages
    }

    /// Moves the player along `steps`, silently skipping any step into a wall.
    fn push_player_clamped(&mut self, steps: &[Direction]) {
        for &direction in steps {
            if self.world.contains(self.player.position().step(direction)) {
                self.player.move_in(direction);
            }
        }
        log::debug!("maelstrom dropped the player at {}", self.player.position());
    }

    fn shoot(&mut self, direction: Direction) -> Vec<Message> {
        let Some(target) = self.player.shoot(direction) else {
            return vec![Message::warning("You are out of arrows!")];
        };

        self.turn_number += 1;
        self.statistics.arrows_fired += 1;

        let outcome = self.world.shoot_into_room(target);
        if outcome == ShotOutcome::Killed {
            self.statistics.amaroks_slain += 1;
        }
        outcome.narration()
    }

    fn enable_fountain(&mut self) -> Vec<Message> {
        let outcome = self.world.enable_fountain(self.player.position());
        if outcome == FountainOutcome::Enabled {
            self.turn_number += 1;
        }
        vec![outcome.message()]
    }

    fn update_completion_state(&mut self, messages: &mut Vec<Message>) {
        if self.completion_state == GameCompletionState::Playing
            && self.world.is_fountain_enabled()
            && self.player.position() == self.world.entrance_location()
        {
            self.completion_state = GameCompletionState::Won;
        }

        match self.completion_state {
            GameCompletionState::Won => {
                log::info!("player won after {} turns", self.turn_number);
                messages.push(Message::new("You win!", MessageTone::Victory));
            }
            GameCompletionState::Dead => {
                log::info!("player died at {}", self.player.position());
                messages.push(Message::fatal("You died!"));
            }
            GameCompletionState::Playing => {}
        }
    }

    /// Serializes the game state to JSON.
    pub fn save_to_json(&self) -> FountainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a game state from JSON produced by [`GameState::save_to_json`].
    ///
    /// The random number generator is re-seeded from the stored seed and turn
    /// number.
    pub fn load_from_json(json: &str) -> FountainResult<Self> {
        let mut state: GameState = serde_json::from_str(json)?;
        state.world.validate()?;
        if !state.world.contains(state.player.position()) {
            return Err(FountainError::InvalidState(format!(
                "player at {} is outside the {}x{} cavern",
                state.player.position(),
                state.world.rows(),
                state.world.columns()
            )));
        }
        state.rng = StdRng::seed_from_u64(state.rng_seed.wrapping_add(state.turn_number));
        Ok(state)
    }

    /// Writes a JSON snapshot of the game to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> FountainResult<()> {
        let path = path.as_ref();
        fs::write(path, self.save_to_json()?)?;
        log::info!("saved game at turn {} to {}", self.turn_number, path.display());
        Ok(())
    }

    /// Resumes a game written by [`GameState::save_to_file`].
    pub fn load_from_file(path: impl AsRef<Path>) -> FountainResult<Self> {
        let path = path.as_ref();
        let state = Self::load_from_json(&fs::read_to_string(path)?)?;
        log::info!("loaded game at turn {} from {}", state.turn_number, path.display());
        Ok(state)
    }

    #[cfg(test)]
    pub(crate) fn place_player(&mut self, pos: crate::Position) {
        self.player = Player::with_arrows(pos, self.player.arrows());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mentions, MapSize, Position};

    fn state_from(layout: &str, start: Position) -> GameState {
        let world: World = layout.parse().unwrap();
        GameState::from_parts(world, Player::new(start), 7)
    }

    #[test]
    fn test_game_state_creation() {
        let state = GameState::new(&GenerationConfig::new(12345, MapSize::Medium)).unwrap();
        assert_eq!(state.turn_number(), 0);
        assert_eq!(state.world().rows(), 6);
        assert_eq!(state.player().arrows(), 5);
        assert_eq!(state.check_game_over(), None);
        assert_eq!(state.seed(), 12345);
    }

    #[test]
    fn test_wall_collision_does_not_move() {
        let mut state = state_from("E...\n....\n.F..\n....", Position::new(0, 0));

        let messages = state.execute(Command::Move(Direction::North));
        assert!(mentions(&messages, "There is a wall, you cannot go north!"));
        let messages = state.execute(Command::Move(Direction::West));
        assert!(mentions(&messages, "you cannot go west!"));

        assert_eq!(state.player().position(), Position::new(0, 0));
        assert_eq!(state.turn_number(), 0);
        assert_eq!(state.statistics().wall_bumps, 2);
    }

    #[test]
    fn test_wall_collision_far_edges() {
        let mut state = state_from("...\n...\nF.E", Position::new(2, 2));
        assert!(mentions(&state.execute(Command::Move(Direction::South)), "cannot go south"));
        assert!(mentions(&state.execute(Command::Move(Direction::East)), "cannot go east"));
        assert_eq!(state.player().position(), Position::new(2, 2));
    }

    #[test]
    fn test_move_describes_new_room() {
        let mut state = state_from("E...\n....\n.F..\n....", Position::new(0, 0));
        let messages = state.execute(Command::Move(Direction::South));
        assert_eq!(state.player().position(), Position::new(1, 0));
        assert_eq!(messages[0].tone, MessageTone::Descriptive);
        assert!(mentions(&messages, "dark, empty room"));
        assert_eq!(state.turn_number(), 1);
    }

    #[test]
    fn test_pit_is_fatal() {
        let mut state = state_from("EO..\n....\n.F..\n....", Position::new(0, 0));
        let messages = state.execute(Command::Move(Direction::East));
        assert!(mentions(&messages, "bottom of the pit"));
        assert!(mentions(&messages, "You died!"));
        assert_eq!(state.check_game_over(), Some(GameCompletionState::Dead));

        // Nothing happens after death
        assert!(state.execute(Command::Move(Direction::West)).is_empty());
        assert_eq!(state.player().position(), Position::new(0, 1));
    }

    #[test]
    fn test_amarok_is_fatal_with_a_listed_narrative() {
        let mut state = state_from("EA..\n....\n.F..\n....", Position::new(0, 0));
        let messages = state.execute(Command::Move(Direction::East));
        assert_eq!(state.completion_state(), GameCompletionState::Dead);
        let fatal: Vec<_> = messages.iter().filter(|m| m.tone == MessageTone::Fatal).collect();
        assert_eq!(fatal.len(), 2);
        assert!(AMAROK_DEATHS.contains(&fatal[0].text.as_str()));
    }

    #[test]
    fn test_dead_amarok_is_safe() {
        let mut state = state_from("EA..\n....\n.F..\n....", Position::new(0, 0));
        let messages = state.execute(Command::Shoot(Direction::East));
        assert!(mentions(&messages, "falls over dead"));
        assert_eq!(state.statistics().amaroks_slain, 1);

        let messages = state.execute(Command::Move(Direction::East));
        assert!(mentions(&messages, "dead creature"));
        assert_eq!(state.completion_state(), GameCompletionState::Playing);
    }

    #[test]
    fn test_out_of_arrows_consumes_nothing() {
        let world: World = "E...\n....\n.F..\n....".parse().unwrap();
        let mut state = GameState::from_parts(world, Player::with_arrows(Position::new(0, 0), 1), 1);

        let messages = state.execute(Command::Shoot(Direction::South));
        assert!(mentions(&messages, "empty room"));
        assert_eq!(state.turn_number(), 1);

        let messages = state.execute(Command::Shoot(Direction::South));
        assert!(mentions(&messages, "You are out of arrows!"));
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.statistics().arrows_fired, 1);
        assert_eq!(state.player().arrows(), 0);
    }

    #[test]
    fn test_shooting_into_wall_uses_an_arrow() {
        let mut state = state_from("E...\n....\n.F..\n....", Position::new(0, 0));
        let messages = state.execute(Command::Shoot(Direction::North));
        assert!(mentions(&messages, "empty room"));
        assert_eq!(state.player().arrows(), 4);
    }

    #[test]
    fn test_maelstrom_relocates_player_and_itself() {
        let mut state = state_from(
            "\
            ......
            ......
            E.....
            ..M...
            ......
            .....F",
            Position::new(3, 1),
        );
        let messages = state.execute(Command::Move(Direction::East));

        assert!(mentions(&messages, "sentient wind"));
        assert!(mentions(&messages, "ragdoll"));
        assert_eq!(state.player().position(), Position::new(2, 4));
        assert_eq!(state.world().room_type(Position::new(3, 2)), Some(RoomType::Empty));
        assert_eq!(state.world().room_type(Position::new(4, 0)), Some(RoomType::Maelstrom));
        assert_eq!(state.statistics().maelstrom_encounters, 1);
        assert_eq!(state.completion_state(), GameCompletionState::Playing);
    }

    #[test]
    fn test_maelstrom_push_is_clamped_at_walls() {
        let mut state = state_from("..M\n...\nE.F", Position::new(0, 1));
        state.execute(Command::Move(Direction::East));

        // North and both east steps would leave the grid
        assert_eq!(state.player().position(), Position::new(0, 2));
        assert!(state.world().contains(state.player().position()));
        assert_eq!(state.world().room_type(Position::new(0, 2)), Some(RoomType::Empty));
        assert_eq!(state.world().room_type(Position::new(1, 0)), Some(RoomType::Maelstrom));
        assert_eq!(state.completion_state(), GameCompletionState::Playing);
    }

    #[test]
    fn test_pinned_maelstrom_throws_only_once() {
        // The maelstrom's drift target is the entrance, and every push step hits a wall
        let mut state = state_from("..M\nE..\n..F", Position::new(0, 1));
        state.execute(Command::Move(Direction::East));

        assert_eq!(state.player().position(), Position::new(0, 2));
        assert_eq!(state.world().room_type(Position::new(0, 2)), Some(RoomType::Maelstrom));
        assert_eq!(state.world().room_type(Position::new(1, 0)), Some(RoomType::Entrance));
        assert_eq!(state.statistics().maelstrom_encounters, 1);
    }

    #[test]
    fn test_maelstrom_can_throw_player_into_a_pit() {
        let mut state = state_from(
            "\
            E.....
            ....O.
            ..M...
            ......
            ......
            .....F",
            Position::new(2, 1),
        );
        let messages = state.execute(Command::Move(Direction::East));
        assert_eq!(state.player().position(), Position::new(1, 4));
        assert!(mentions(&messages, "bottom of the pit"));
        assert_eq!(state.completion_state(), GameCompletionState::Dead);
    }

    #[test]
    fn test_enable_fountain() {
        let mut state = state_from("...E\n....\n.F..\n....", Position::new(0, 3));

        let messages = state.execute(Command::EnableFountain);
        assert!(mentions(&messages, "There is no fountain in this room"));
        assert!(!state.world().is_fountain_enabled());

        state.place_player(Position::new(2, 1));
        state.execute(Command::EnableFountain);
        assert!(state.world().is_fountain_enabled());

        let messages = state.execute(Command::EnableFountain);
        assert!(mentions(&messages, "already been enabled"));
        assert!(state.world().is_fountain_enabled());
    }

    #[test]
    fn test_apply_input_ignores_unknown_text() {
        let mut state = state_from("E...\n....\n.F..\n....", Position::new(0, 0));
        let messages = state.apply_input("fly away");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].tone, MessageTone::Warning);
        assert_eq!(state.player().position(), Position::new(0, 0));
        assert_eq!(state.turn_number(), 0);

        state.apply_input("ms");
        assert_eq!(state.player().position(), Position::new(1, 0));
    }

    #[test]
    fn test_blank_input_is_silent() {
        let mut state = state_from("E...\n....\n.F..\n....", Position::new(0, 0));
        assert!(state.apply_input("").is_empty());
        assert!(state.apply_input("   \n").is_empty());
        assert_eq!(state.turn_number(), 0);
    }

    #[test]
    fn test_win_requires_fountain_and_entrance() {
        let mut state = state_from("E.F\n...\n...", Position::new(0, 0));

        state.execute(Command::Move(Direction::East));
        state.execute(Command::Move(Direction::West));
        assert_eq!(state.check_game_over(), None, "entrance without fountain is not a win");

        state.execute(Command::Move(Direction::East));
        state.execute(Command::Move(Direction::East));
        state.execute(Command::EnableFountain);
        assert_eq!(state.check_game_over(), None, "fountain without entrance is not a win");

        state.execute(Command::Move(Direction::West));
        let messages = state.execute(Command::Move(Direction::West));
        assert!(mentions(&messages, "escaped with your life"));
        assert!(mentions(&messages, "You win!"));
        assert_eq!(state.check_game_over(), Some(GameCompletionState::Won));
    }

    #[test]
    fn test_game_state_serialization() {
        let mut state = GameState::new(&GenerationConfig::for_testing(12345)).unwrap();
        state.execute(Command::Shoot(Direction::North));
        let json = state.save_to_json().unwrap();

        let _: serde_json::Value = serde_json::from_str(&json).unwrap();

        let loaded = GameState::load_from_json(&json).unwrap();
        assert_eq!(loaded.world(), state.world());
        assert_eq!(loaded.player(), state.player());
        assert_eq!(loaded.turn_number(), state.turn_number());
        assert_eq!(loaded.statistics(), state.statistics());
    }

    #[test]
    fn test_load_rejects_corrupt_world() {
        let state = state_from("E..\n...\n..F", Position::new(0, 0));
        let json = state.save_to_json().unwrap().replace("\"Fountain\"", "\"Empty\"");
        assert!(GameState::load_from_json(&json).is_err());
    }

    #[test]
    fn test_load_rejects_player_outside_cavern() {
        let mut state = state_from("E..\n...\n..F", Position::new(0, 0));
        state.place_player(Position::new(3, 0));
        let json = state.save_to_json().unwrap();
        assert!(matches!(
            GameState::load_from_json(&json),
            Err(FountainError::InvalidState(_))
        ));
    }
}
