use std::collections::VecDeque;

use crate::{Coord, Coords};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// `old_tail` is `None` when the snake grew this step.
    Moved { new_head: Coords, old_tail: Option<Coords> },
    Crashed(Collision)
}

pub struct Snake {
    body: VecDeque<Coords>, // head first
    direction: Direction,
}

impl Direction {
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        (dx, dy) == (-ox, -oy)
    }
}

impl Snake {
    pub fn new(pos: Coords, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(pos);
        Snake { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Advances the head one cell. The snake grows when the new head lands on `food`.
    /// Nothing changes on a crash.
    pub fn move_step(&mut self, width: Coord, height: Coord, food: Option<Coords>) -> MoveResult {
        let (hx, hy) = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (hx + dx, hy + dy);

        if new_head.0 < 0 || new_head.1 < 0 || new_head.0 >= width || new_head.1 >= height {
            return Crashed(Collision::Wall);
        }

        let growing = food == Some(new_head);

        // The tail leaves its cell this step unless we grow. On a two-cell
        // snake the tail is also the neck, so it always counts.
        let len = self.body.len();
        let checked = if growing || len <= 2 { len } else { len - 1 };
        if self.body.iter().take(checked).any(|&pos| pos == new_head) {
            return Crashed(Collision::SelfBite);
        }

        self.body.push_front(new_head);

        if growing {
            Moved { new_head, old_tail: None }
        } else {
            Moved { new_head, old_tail: self.body.pop_back() }
        }
    }

    /// Returns whether the heading actually changed. Reversals are ignored.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_opposite(self.direction) {
            return false;
        }

        let changed = new_direction != self.direction;
        self.direction = new_direction;
        changed
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn from_body(body: &[Coords], direction: Direction) -> Self {
        Snake { body: body.iter().copied().collect(), direction }
    }
}
