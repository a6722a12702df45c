//! # Scene Management System
//!
//! Drives one game from the opening description to an ending (or until the
//! player quits or input runs out), wiring input, game state and display.

use crate::{
    Command, FountainResult, GameCompletionState, GameState, InputHandler, Message, PlayerInput,
    TextDisplay,
};
use std::io::{BufRead, Write};

const PROMPT: &str = "What do you want to do?";

/// Represents the current scene in the game
#[derive(Debug, Clone, PartialEq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// The game reached an ending
    GameOver(GameCompletionState),
    /// The player quit or input ended before an ending
    Abandoned,
}

/// The main scene manager that coordinates a game session
pub struct SceneManager<R, W> {
    current_scene: SceneType,
    game_state: GameState,
    display: TextDisplay<W>,
    input_handler: InputHandler<R>,
}

impl<R: BufRead, W: Write> SceneManager<R, W> {
    /// Creates a new scene manager with the given game state, input and display
    pub fn new(game_state: GameState, input_handler: InputHandler<R>, display: TextDisplay<W>) -> Self {
        Self {
            current_scene: SceneType::Playing,
            game_state,
            display,
            input_handler,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn current_scene(&self) -> &SceneType {
        &self.current_scene
    }

    /// Runs the turn loop until the game ends, the player quits, or input is exhausted.
    pub fn run(&mut self) -> FountainResult<SceneType> {
        self.display
            .add_message(Message::descriptive("Type 'help' for a list of commands."));
        self.display.add_messages(self.game_state.describe_current_room());
        self.display.render_game(&self.game_state)?;

        while self.current_scene == SceneType::Playing {
            self.display.prompt(PROMPT)?;
            let Some(input) = self.input_handler.next_input()? else {
                log::info!("input closed, leaving the cavern");
                self.current_scene = SceneType::Abandoned;
                break;
            };
            self.update_playing_scene(input)?;
        }

        Ok(self.current_scene.clone())
    }

    /// Applies one line of input and renders the result.
    ///
    /// Moving into a room already describes it. Every other input is followed by
    /// the status line and the current room so the arrow count stays visible.
    fn update_playing_scene(&mut self, input: PlayerInput) -> FountainResult<()> {
        let steps_before = self.game_state.statistics().steps_taken;
        match input {
            PlayerInput::Quit => {
                log::info!("player quit after {} turns", self.game_state.turn_number());
                self.current_scene = SceneType::Abandoned;
                return Ok(());
            }
            PlayerInput::Help => {
                self.display
                    .add_message(Message::descriptive(Command::help_text()));
            }
            PlayerInput::Command(command) => {
                let messages = self.game_state.execute(command);
                self.display.add_messages(messages);
            }
            PlayerInput::Unrecognized(text) => {
                let messages = self.game_state.apply_input(&text);
                self.display.add_messages(messages);
            }
        }

        if let Some(ending) = self.game_state.check_game_over() {
            self.current_scene = SceneType::GameOver(ending);
        } else if self.game_state.statistics().steps_taken == steps_before {
            self.display.add_messages(self.game_state.describe_current_room());
        }
        self.display.render_game(&self.game_state)
    }

    /// Consumes the manager and returns the game, e.g. to save it after quitting.
    pub fn into_game_state(self) -> GameState {
        self.game_state
    }

    /// Consumes the manager and returns the display, mainly for inspecting output.
    pub fn into_display(self) -> TextDisplay<W> {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, World};

    fn manager(script: &str) -> SceneManager<&[u8], Vec<u8>> {
        let world: World = "E.\n.F".parse().unwrap();
        let state = GameState::from_parts(world, Player::new(Position::new(0, 0)), 3);
        SceneManager::new(
            state,
            InputHandler::new(script.as_bytes()),
            TextDisplay::new(Vec::new(), false),
        )
    }

    #[test]
    fn test_quit_abandons() {
        let mut scenes = manager("help\nquit\nms\n");
        assert_eq!(scenes.run().unwrap(), SceneType::Abandoned);
        assert_eq!(scenes.game_state().turn_number(), 0);
        let out = String::from_utf8(scenes.into_display().into_inner()).unwrap();
        assert!(out.contains("enable fountain"));
    }

    #[test]
    fn test_eof_abandons() {
        let mut scenes = manager("ms\n");
        assert_eq!(scenes.run().unwrap(), SceneType::Abandoned);
        assert_eq!(scenes.game_state().player().position(), Position::new(1, 0));
    }

    fn run_to_output(script: &str) -> String {
        let mut scenes = manager(script);
        scenes.run().unwrap();
        String::from_utf8(scenes.into_display().into_inner()).unwrap()
    }

    #[test]
    fn test_status_follows_shot() {
        let out = run_to_output("sn\n");
        assert!(out.contains("You are in the room at (Row=0, Column=0) with 5 arrows"));
        let after_shot = &out[out.find("The arrow flies").unwrap()..];
        assert!(after_shot.contains("with 4 arrows in your quiver"));
    }

    #[test]
    fn test_status_follows_wall_bump_and_help() {
        let out = run_to_output("mn\nhelp\n\n");
        let after_wall = &out[out.find("There is a wall").unwrap()..];
        assert!(after_wall.contains("You are in the room at (Row=0, Column=0)"));
        assert!(after_wall.contains("light coming from the cavern entrance"));
        // Opening, wall bump, help and the blank line each show the status once
        assert_eq!(out.matches("You are in the room at").count(), 4);
        assert!(!out.contains("You don't know how to"));
    }

    #[test]
    fn test_move_describes_room_once() {
        let out = run_to_output("ms\n");
        assert_eq!(out.matches("(Row=1, Column=0)").count(), 1);
    }

    #[test]
    fn test_win_ends_loop() {
        let mut scenes = manager("ms\nme\nef\nmn\nmw\nmn\n");
        let ending = scenes.run().unwrap();
        assert_eq!(ending, SceneType::GameOver(GameCompletionState::Won));
        assert_eq!(scenes.current_scene(), &ending);
        // The trailing command was never read
        assert_eq!(scenes.game_state().player().position(), Position::new(0, 0));
    }
}
