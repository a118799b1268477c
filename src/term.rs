use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use log::warn;

use crate::input::{Key, KeySource};
use crate::screen::Screen;

/// Owns the terminal while a game is on screen
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

/// Reads keypresses from the terminal's event queue
pub struct KeyReader;

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.active = true;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }
}

impl Screen for TermManager {
    fn show(&mut self, frame: &str) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;

        // Raw mode does not turn '\n' into a carriage return, so place every line
        for (y, line) in frame.lines().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(line))
                .context("Error drawing frame")?;
        }

        self.stdout.flush().context("Error flushing")
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Could not restore the terminal: {:#}", e);
        }
    }
}

impl KeySource for KeyReader {
    fn read_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        if !poll(timeout).context("Error polling for input")? {
            return Ok(None);
        }

        match read().context("Error reading input")? {
            Event::Key(ev) => Ok(key_from_event(ev)),
            _ => Ok(None),
        }
    }
}

fn key_from_event(ev: KeyEvent) -> Option<Key> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        },
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Enter => Some(Key::Char('\n')),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        }
    }
}
