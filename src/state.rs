use rand::{seq::SliceRandom, Rng};

use crate::config::GameConfig;
use crate::snake::{Collision, Direction, MoveResult, Snake};
use crate::{Coord, Coords};

const HEAD_CHAR: char = 'O';
const BODY_CHAR: char = 'o';
const FOOD_CHAR: char = '*';
const EMPTY_CHAR: char = ' ';

const CONTROLS_LINE: &str = "Use WASD or arrow keys to move, P to pause, Q to quit";
const PAUSED_LINE: &str = "Paused - press P to resume";
const EXIT_LINE: &str = "Press any key to exit...";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Crashed(Collision),
    /// The snake fills the whole board
    Won,
}

/// What a single call to [`GameState::move_snake`] did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Ate,
    Crashed(Collision),
    Won,
    /// Game over or paused
    Idle,
}

pub struct GameState<R> {
    width: Coord,
    height: Coord,
    snake: Snake,
    food: Option<Coords>,
    score: u32,
    status: Status,
    paused: bool,
    rng: R,
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        let center = (config.width / 2, config.height / 2);

        let mut state = GameState {
            width: config.width,
            height: config.height,
            snake: Snake::new(center, Direction::Right),
            food: None,
            score: 0,
            status: Status::Running,
            paused: false,
            rng,
        };

        state.food = state.generate_food();
        if state.food.is_none() {
            state.status = Status::Won;
        }

        state
    }

    /// Picks a free cell uniformly at random, or `None` when the snake covers the board.
    pub fn generate_food(&mut self) -> Option<Coords> {
        let (width, height) = (self.width, self.height);
        let snake = &self.snake;

        let free: Vec<Coords> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&pos| !snake.contains(pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }

    pub fn change_direction(&mut self, requested: Direction) -> bool {
        self.snake.set_direction(requested)
    }

    pub fn move_snake(&mut self) -> MoveOutcome {
        if self.is_over() || self.paused {
            return MoveOutcome::Idle;
        }

        match self.snake.move_step(self.width, self.height, self.food) {
            MoveResult::Crashed(collision) => {
                self.status = Status::Crashed(collision);
                MoveOutcome::Crashed(collision)
            },
            MoveResult::Moved { old_tail: Some(_), .. } => MoveOutcome::Moved,
            MoveResult::Moved { old_tail: None, .. } => {
                self.score += 1;
                self.food = self.generate_food();

                if self.food.is_none() {
                    self.status = Status::Won;
                    MoveOutcome::Won
                } else {
                    MoveOutcome::Ate
                }
            },
        }
    }

    /// Returns the new pause flag. A finished game cannot be paused.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.is_over() {
            self.paused = !self.paused;
        }
        self.paused
    }
}

impl<R> GameState<R> {
    pub fn render(&self) -> String {
        let border = format!("+{}+", "-".repeat(self.width as usize));
        let mut lines = Vec::with_capacity(self.height as usize + 5);

        lines.push(format!("Score: {}", self.score));
        lines.push(border.clone());

        for y in 0..self.height {
            let row: String = (0..self.width).map(|x| self.cell_char((x, y))).collect();
            lines.push(format!("|{}|", row));
        }

        lines.push(border);

        match self.status {
            Status::Running if self.paused => lines.push(PAUSED_LINE.to_string()),
            Status::Running => lines.push(CONTROLS_LINE.to_string()),
            Status::Crashed(_) => {
                lines.push("GAME OVER!".to_string());
                lines.push(EXIT_LINE.to_string());
            },
            Status::Won => {
                lines.push("YOU WIN!".to_string());
                lines.push(EXIT_LINE.to_string());
            },
        }

        lines.join("\n")
    }

    fn cell_char(&self, pos: Coords) -> char {
        match self.snake.body().iter().position(|&p| p == pos) {
            Some(0) => HEAD_CHAR,
            Some(_) => BODY_CHAR,
            None if self.food == Some(pos) => FOOD_CHAR,
            None => EMPTY_CHAR,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Running
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.snake.get_direction()
    }
}
