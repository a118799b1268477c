use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};

use crate::Coord;

pub const BOARD_WIDTH: Coord = 20;
pub const BOARD_HEIGHT: Coord = 10;
pub const TICK_INTERVAL_MS: u64 = 200;
pub const INPUT_TIMEOUT_MS: u64 = 100;
pub const LOG_FILE: &str = "snake.log";

// Frames are drawn with u16 terminal coordinates
const MAX_BOARD_SIDE: Coord = 1000;

/// Settings for a single game session
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    /// Time between two snake moves, input wait included
    pub tick_interval: Duration,
    /// Longest a tick waits for a keypress
    pub input_timeout: Duration,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            input_timeout: Duration::from_millis(INPUT_TIMEOUT_MS),
            log_file: PathBuf::from(LOG_FILE),
        }
    }
}

impl GameConfig {
    #[cfg(test)]
    pub fn new(width: Coord, height: Coord) -> Self {
        GameConfig { width, height, ..Default::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 1 || self.height < 1 {
            bail!("board must be at least 1x1, got {}x{}", self.width, self.height);
        }
        if self.width * self.height < 2 {
            bail!("board needs room for the snake and one piece of food");
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            bail!("board side cannot exceed {}", MAX_BOARD_SIDE);
        }
        if self.input_timeout > self.tick_interval {
            bail!("input timeout cannot be longer than the tick interval");
        }
        Ok(())
    }
}
