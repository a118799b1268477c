mod config;
mod game;
mod input;
mod screen;
mod snake;
mod state;
mod term;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{fs::File, panic};

use anyhow::Result;
use log::{error, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::GameConfig;
use crate::game::{Ending, SnakeGame};
use crate::term::{KeyReader, TermManager};

pub type Coord = i32;
pub type Coords = (Coord, Coord);

fn main() {
    let config = GameConfig::default();
    init_logging(&config);

    // The terminal is in raw mode while a panic unwinds, so keep the report for the log
    panic::set_hook(Box::new(|info| error!("Panic: {}", info)));

    // SIGINT/SIGTERM from outside; Ctrl+C typed in raw mode arrives as a key instead
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        warn!("No signal handler installed: {}", e);
    }

    // Everything ends here with a single line and exit code 0
    let message = match panic::catch_unwind(move || play(&config, shutdown)) {
        Ok(Ok(ending)) => farewell(ending),
        Ok(Err(e)) => {
            error!("{:#}", e);
            format!("An error occurred: {:#}", e)
        },
        Err(_) => "An error occurred: the game crashed unexpectedly".to_string(),
    };

    info!("Exiting");
    println!("{}", message);
}

fn init_logging(config: &GameConfig) {
    // Logging is optional; the game runs without it
    match File::create(&config.log_file) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
        },
        Err(e) => eprintln!("Logging disabled, cannot create {}: {}", config.log_file.display(), e),
    }
}

fn play(config: &GameConfig, shutdown: Arc<AtomicBool>) -> Result<Ending> {
    config.validate()?;

    let mut term = TermManager::new();
    term.setup()?;

    let ending = SnakeGame::new(config.clone(), KeyReader, &mut term, rand::thread_rng(), shutdown).run();

    if let Err(e) = term.restore() {
        warn!("{:#}", e);
    }

    ending
}

fn farewell(ending: Ending) -> String {
    match ending {
        Ending::Finished { score, won: true } => format!("You won! Final score: {}\nThanks for playing!", score),
        Ending::Finished { score, won: false } => format!("Game over! Final score: {}\nThanks for playing!", score),
        Ending::Quit { score } => format!("Thanks for playing! Final score: {}", score),
        Ending::Interrupted => "Game interrupted. Thanks for playing!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farewell_messages() {
        assert_eq!(farewell(Ending::Quit { score: 3 }), "Thanks for playing! Final score: 3");
        assert_eq!(farewell(Ending::Interrupted), "Game interrupted. Thanks for playing!");
        assert!(farewell(Ending::Finished { score: 7, won: false }).starts_with("Game over! Final score: 7"));
        assert!(farewell(Ending::Finished { score: 199, won: true }).starts_with("You won!"));
    }
}
