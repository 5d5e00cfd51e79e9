mod input;
mod session;

use color_eyre::Result;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::info;

use tuno::{error::SaveError, game::Game, save};

use crate::session::SessionEnd;

const SAVE_FILE: &str = "save.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
enum MenuChoice {
    #[strum(serialize = "New Game")]
    NewGame,
    #[strum(serialize = "Continue Game")]
    ContinueGame,
    #[strum(serialize = "Exit")]
    Exit,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    loop {
        match read_menu_choice()? {
            MenuChoice::NewGame => {
                let player_count = input::read_player_count()?;
                let game = Game::new(player_count, &mut rand::thread_rng())?;
                info!(player_count, "new game started");
                finish(session::run(game, SAVE_FILE)?);
                break;
            }
            MenuChoice::ContinueGame => {
                let game = match save::load_from_file(SAVE_FILE) {
                    Ok(game) => game,
                    Err(SaveError::Missing) => {
                        println!("No saved game found.");
                        continue;
                    }
                    Err(error) => {
                        info!(%error, "save file rejected");
                        println!("Save file is corrupted.");
                        continue;
                    }
                };
                println!("Game loaded from {SAVE_FILE}");
                finish(session::run(game, SAVE_FILE)?);
                break;
            }
            MenuChoice::Exit => break,
        }
    }

    println!("Exiting...");
    Ok(())
}

fn finish(end: SessionEnd) {
    match end {
        SessionEnd::Won(seat) => info!(seat, "session ended with a win"),
        SessionEnd::Saved => info!("session ended on a save request"),
        SessionEnd::PilesExhausted => info!("session ended with both piles empty"),
    }
}

fn read_menu_choice() -> Result<MenuChoice> {
    loop {
        println!("--- UNO ---");
        for (index, entry) in MenuChoice::iter().enumerate() {
            println!("[{}] {entry}", index + 1);
        }

        let choice = input::read_number("Choose: ")?;
        if choice >= 1 {
            if let Some(entry) = MenuChoice::iter().nth(choice as usize - 1) {
                return Ok(entry);
            }
        }
        println!("Invalid choice. Try again.");
    }
}
