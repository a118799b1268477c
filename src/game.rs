use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{thread::sleep, time::Instant};

use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::input::{Command, Key, KeySource};
use crate::screen::Screen;
use crate::state::{GameState, MoveOutcome, Status};

const INTRO_LINES: &[&str] = &[
    "Welcome to Gluttonous Snake!",
    "Use WASD or the arrow keys to control the snake",
    "Eat the food (*) to grow and increase your score",
    "Don't hit the walls or yourself!",
    "P or Esc pauses, Q quits",
    "",
    "Press any key to start...",
];

/// How a session ended
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Finished { score: u32, won: bool },
    Quit { score: u32 },
    Interrupted,
}

pub struct SnakeGame<K, S, R> {
    config: GameConfig,
    keys: K,
    screen: S,
    state: GameState<R>,
    /// Raised from outside (signal handler) to end the session
    shutdown: Arc<AtomicBool>,
}

impl<K: KeySource, S: Screen, R: Rng> SnakeGame<K, S, R> {
    pub fn new(config: GameConfig, keys: K, screen: S, rng: R, shutdown: Arc<AtomicBool>) -> Self {
        let state = GameState::with_rng(&config, rng);
        SnakeGame { config, keys, screen, state, shutdown }
    }

    pub fn run(&mut self) -> Result<Ending> {
        info!("New game on a {}x{} board", self.config.width, self.config.height);

        if let Some(ending) = self.show_intro()? {
            return Ok(ending);
        }

        while !self.state.is_over() {
            if self.shutdown.load(Ordering::SeqCst) {
                info!("Stopped by signal with score {}", self.state.score());
                return Ok(Ending::Interrupted);
            }

            let tick_start = Instant::now();
            self.screen.show(&self.state.render())?;

            if let Some(key) = self.keys.read_key(self.config.input_timeout)? {
                match Command::from_key(key) {
                    Some(Command::Turn(dir)) => {
                        if self.state.change_direction(dir) {
                            debug!("Heading {:?}", self.state.direction());
                        }
                    },
                    Some(Command::TogglePause) => {
                        self.state.toggle_pause();
                        info!("{}", if self.state.is_paused() { "Paused" } else { "Resumed" });
                    },
                    Some(Command::Quit) => {
                        info!("Quit with score {}", self.state.score());
                        return Ok(Ending::Quit { score: self.state.score() });
                    },
                    Some(Command::Interrupt) => {
                        info!("Interrupted with score {}", self.state.score());
                        return Ok(Ending::Interrupted);
                    },
                    None => {},
                }
            }

            match self.state.move_snake() {
                MoveOutcome::Ate => {
                    debug!("Ate, score {} and new food at {:?}", self.state.score(), self.state.food());
                },
                MoveOutcome::Crashed(collision) => info!("Crashed: {:?}", collision),
                MoveOutcome::Won => info!("Board filled"),
                MoveOutcome::Moved | MoveOutcome::Idle => {},
            }

            sleep(self.config.tick_interval.checked_sub(tick_start.elapsed()).unwrap_or_default());
        }

        self.game_over()
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_intro(&mut self) -> Result<Option<Ending>> {
        self.screen.show(&INTRO_LINES.join("\n"))?;

        let key = match self.keys.wait_key(self.config.input_timeout, &self.shutdown)? {
            Some(key) => key,
            None => return Ok(Some(Ending::Interrupted)),
        };

        match Command::from_key(key) {
            Some(Command::Quit) => Ok(Some(Ending::Quit { score: 0 })),
            Some(Command::Interrupt) => Ok(Some(Ending::Interrupted)),
            _ => Ok(None),
        }
    }

    fn game_over(&mut self) -> Result<Ending> {
        let score = self.state.score();
        let won = self.state.status() == Status::Won;
        info!("Game over, score {} with a snake of {}", score, self.state.snake().len());

        self.screen.show(&self.state.render())?;

        // Any key leaves, but an interrupt still says goodbye as one
        match self.keys.wait_key(self.config.input_timeout, &self.shutdown)? {
            Some(Key::Interrupt) | None => return Ok(Ending::Interrupted),
            Some(_) => {},
        }

        Ok(Ending::Finished { score, won })
    }
}
