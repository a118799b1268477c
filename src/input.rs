use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;

use crate::snake::Direction;

/// A key as delivered by the terminal, before the game gives it a meaning
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Esc,
    Char(char),
    /// Ctrl+C, which raw mode delivers as a keypress instead of a signal
    Interrupt,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
    Interrupt,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Command> {
        match key {
            Key::Up => Some(Command::Turn(Direction::Up)),
            Key::Down => Some(Command::Turn(Direction::Down)),
            Key::Left => Some(Command::Turn(Direction::Left)),
            Key::Right => Some(Command::Turn(Direction::Right)),
            Key::Esc => Some(Command::TogglePause),
            Key::Interrupt => Some(Command::Interrupt),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Command::Turn(Direction::Up)),
                'a' => Some(Command::Turn(Direction::Left)),
                's' => Some(Command::Turn(Direction::Down)),
                'd' => Some(Command::Turn(Direction::Right)),
                'p' => Some(Command::TogglePause),
                'q' => Some(Command::Quit),
                _ => None,
            },
        }
    }
}

pub trait KeySource {
    /// Returns `None` if nothing was pressed within `timeout`.
    fn read_key(&mut self, timeout: Duration) -> Result<Option<Key>>;

    /// Blocks until a key arrives, checking every `poll_interval`.
    /// Gives up with `None` once `stop` is raised.
    fn wait_key(&mut self, poll_interval: Duration, stop: &AtomicBool) -> Result<Option<Key>> {
        while !stop.load(Ordering::SeqCst) {
            if let Some(key) = self.read_key(poll_interval)? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn read_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        (**self).read_key(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Option<Key>>);

    impl KeySource for Scripted {
        fn read_key(&mut self, _timeout: Duration) -> Result<Option<Key>> {
            Ok(self.0.pop_front().unwrap_or(Some(Key::Interrupt)))
        }
    }

    #[test]
    fn arrow_keys() {
        assert_eq!(Command::from_key(Key::Up), Some(Command::Turn(Direction::Up)));
        assert_eq!(Command::from_key(Key::Down), Some(Command::Turn(Direction::Down)));
        assert_eq!(Command::from_key(Key::Left), Some(Command::Turn(Direction::Left)));
        assert_eq!(Command::from_key(Key::Right), Some(Command::Turn(Direction::Right)));
    }

    #[test]
    fn wasd_keys_in_either_case() {
        for &(lower, dir) in [('w', Direction::Up), ('a', Direction::Left), ('s', Direction::Down), ('d', Direction::Right)].iter() {
            assert_eq!(Command::from_key(Key::Char(lower)), Some(Command::Turn(dir)));
            assert_eq!(Command::from_key(Key::Char(lower.to_ascii_uppercase())), Some(Command::Turn(dir)));
        }
    }

    #[test]
    fn control_keys() {
        assert_eq!(Command::from_key(Key::Char('q')), Some(Command::Quit));
        assert_eq!(Command::from_key(Key::Char('Q')), Some(Command::Quit));
        assert_eq!(Command::from_key(Key::Char('p')), Some(Command::TogglePause));
        assert_eq!(Command::from_key(Key::Esc), Some(Command::TogglePause));
        assert_eq!(Command::from_key(Key::Interrupt), Some(Command::Interrupt));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(Command::from_key(Key::Char('x')), None);
        assert_eq!(Command::from_key(Key::Char(' ')), None);
    }

    #[test]
    fn wait_key_skips_empty_polls() {
        let mut keys = Scripted(vec![None, None, Some(Key::Char('x'))].into());
        let stop = AtomicBool::new(false);
        assert_eq!(keys.wait_key(Duration::ZERO, &stop).unwrap(), Some(Key::Char('x')));
        assert!(keys.0.is_empty());
    }

    #[test]
    fn wait_key_gives_up_when_stopped() {
        let mut keys = Scripted(vec![Some(Key::Char('x'))].into());
        let stop = AtomicBool::new(true);
        assert_eq!(keys.wait_key(Duration::ZERO, &stop).unwrap(), None);
        assert_eq!(keys.0.len(), 1);
    }
}
