//! One round of UNO at the terminal: display, prompt, validate, delegate to
//! the engine, loop until a win, a save request or exhausted piles.

use color_eyre::Result;
use rand::rngs::ThreadRng;
use tracing::info;

use tuno::{
    game::Game,
    rules::{is_uno_declaration, CardEffect},
    save,
};

use crate::input;

pub enum SessionEnd {
    Won(usize),
    Saved,
    PilesExhausted,
}

pub fn run(mut game: Game, save_path: &str) -> Result<SessionEnd> {
    let mut rng = rand::thread_rng();

    loop {
        print_table(&game);

        // A loaded save could in principle hold an already-empty hand.
        if game.current_player_wins() {
            return Ok(win(&game));
        }

        if !game.current_player_has_legal_move() {
            println!("No suitable cards. Automatically drawing 1 card...");

            let drawn = match game.draw_for_current(&mut rng) {
                Ok(card) => card,
                Err(_) => {
                    println!("No cards left to draw.");
                    return Ok(SessionEnd::PilesExhausted);
                }
            };
            println!("Drawn card: {drawn}");

            if game.is_legal_play(&drawn)
                && input::read_yes_no("You can play the drawn card. Play it now? (y/n): ")?
            {
                // The drawn card sits at the end of the hand.
                let index = game.current_player().cards_count() - 1;
                if let Some(end) = play_and_resolve(&mut game, index, &mut rng)? {
                    return Ok(end);
                }
            } else {
                game.advance_turn(CardEffect::default(), &mut rng);
            }
            continue;
        }

        let choice = input::read_number("Choose card index to play (or -1 to Save & Exit): ")?;

        if choice == -1 {
            match save::save_to_file(&game, save_path) {
                Ok(()) => {
                    info!(path = save_path, "game saved on request");
                    println!("Game saved to {save_path}");
                }
                Err(error) => println!("Failed to save game: {error}"),
            }
            return Ok(SessionEnd::Saved);
        }

        if choice < 0 {
            println!("Invalid move. Try again.");
            continue;
        }

        if let Some(end) = play_and_resolve(&mut game, choice as usize, &mut rng)? {
            return Ok(end);
        }
    }
}

/// Plays the card at `index` for the current player and resolves everything
/// that follows: color choice on wilds, the UNO declaration, the win check
/// and the turn advance. `None` keeps the round going; an invalid or
/// illegal index re-prompts the same player.
fn play_and_resolve(
    game: &mut Game,
    index: usize,
    rng: &mut ThreadRng,
) -> Result<Option<SessionEnd>> {
    let Some(card) = game.current_player().card(index).copied() else {
        println!("Invalid move. Try again.");
        return Ok(None);
    };

    let chosen_color = if card.is_wild() {
        Some(input::read_color()?)
    } else {
        None
    };

    let effect = match game.play_card(index, chosen_color) {
        Ok(effect) => effect,
        Err(_) => {
            println!("Invalid move. Try again.");
            return Ok(None);
        }
    };
    println!("> You used {card}");

    if game.needs_uno_declaration() {
        let declaration = input::read_line("Type 'uno' to declare UNO: ")?;
        if is_uno_declaration(&declaration) {
            println!("UNO declared!");
        } else {
            println!("You forgot to declare UNO! Drawing 1 penalty card...");
            match game.apply_uno_penalty(rng) {
                Some(penalty) => println!("Penalty card: {penalty}"),
                None => println!("No cards left to draw."),
            }
        }
    }

    if game.current_player_wins() {
        return Ok(Some(win(game)));
    }

    let advance = game.advance_turn(effect, rng);
    if advance.reversed {
        println!("Turn order reversed.");
    }
    if let Some(penalty) = advance.penalty {
        println!("Player {} draws {} cards.", penalty.seat + 1, penalty.drawn);
        if penalty.short() {
            println!("No cards left to draw.");
        }
    }
    if let Some(seat) = advance.skipped_seat {
        println!("Player {} is skipped.", seat + 1);
    }

    Ok(None)
}

fn win(game: &Game) -> SessionEnd {
    let seat = game.current_seat();
    info!(seat, "round won");
    println!("Player {} wins!", seat + 1);
    SessionEnd::Won(seat)
}

fn print_table(game: &Game) {
    println!();
    println!("--- UNO ---");
    println!("Current card: {}", game.top_card());
    if game.top_card().is_wild() {
        println!("Active color: {}", game.active_color());
    }

    println!("Player {} - Your cards:", game.current_seat() + 1);
    for (index, card) in game.current_player().hand.iter().enumerate() {
        print!("[{index}] {card}  ");
    }
    println!();
}
