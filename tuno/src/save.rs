//! Plain-text save format, whitespace-delimited, fixed field order:
//! header tag; player count; current player and direction; active color
//! code; top card; per player the hand size followed by its cards; draw
//! pile size and cards; discard pile size and cards. Every card is a
//! `(color, rank)` integer pair.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::Path;
use std::str::SplitWhitespace;

use tracing::debug;

use crate::card::{Card, CardColor};
use crate::constants::{MAX_PLAYERS, MIN_PLAYERS, SAVE_TAG, TOTAL_CARDS_IN_DECK};
use crate::deck::{Deck, DiscardPile};
use crate::error::SaveError;
use crate::game::{Direction, Game};
use crate::player::Player;

pub fn serialize(game: &Game) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{SAVE_TAG}");
    let _ = writeln!(out, "{}", game.player_count());
    let _ = writeln!(
        out,
        "{} {}",
        game.current_seat(),
        game.direction().as_int()
    );
    let _ = writeln!(out, "{}", game.active_color().code());
    write_card(&mut out, game.top_card());

    for player in game.players() {
        let _ = writeln!(out, "{}", player.cards_count());
        for card in &player.hand {
            write_card(&mut out, card);
        }
    }

    let _ = writeln!(out, "{}", game.deck_size());
    for card in &game.deck.0 {
        write_card(&mut out, card);
    }

    let _ = writeln!(out, "{}", game.discard_size());
    for card in &game.discard.0 {
        write_card(&mut out, card);
    }

    out
}

/// Parses a save back into a game. Any structural problem leaves no partial
/// state behind; an out-of-range current player clamps to seat 0 and a
/// direction other than plus or minus one resets to forward.
pub fn deserialize(text: &str) -> Result<Game, SaveError> {
    let mut tokens = Tokens(text.split_whitespace());

    if tokens.next()? != SAVE_TAG {
        return Err(SaveError::BadTag);
    }

    let player_count = tokens.next_int()?;
    if player_count < MIN_PLAYERS as i64 || player_count > MAX_PLAYERS as i64 {
        return Err(SaveError::PlayerCountOutOfRange);
    }
    let player_count = player_count as usize;

    let current_player = tokens.next_int()?;
    let direction = tokens.next_int()?;

    let active_color = u8::try_from(tokens.next_int()?)
        .ok()
        .and_then(CardColor::from_code)
        .ok_or(SaveError::BadColor)?;

    let top_card = tokens.next_card()?;

    let mut players = Vec::with_capacity(player_count);
    for seat in 0..player_count {
        let hand = tokens.next_card_list()?;
        players.push(Player::new(seat, hand));
    }

    let deck = Deck::from_cards(tokens.next_card_list()?);
    let discard = DiscardPile::from_cards(tokens.next_card_list()?);

    // Normalization rather than rejection.
    let current_player = usize::try_from(current_player)
        .ok()
        .filter(|seat| *seat < player_count)
        .unwrap_or(0);
    let direction = Direction::from_int(direction);

    Ok(Game {
        players,
        deck,
        discard,
        top_card,
        active_color,
        current_player,
        direction,
    })
}

pub fn save_to_file(game: &Game, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    std::fs::write(path, serialize(game))?;
    debug!(path = %path.display(), "game saved");
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Game, SaveError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|error| {
        if error.kind() == ErrorKind::NotFound {
            SaveError::Missing
        } else {
            SaveError::Io(error)
        }
    })?;
    let game = deserialize(&text)?;
    debug!(path = %path.display(), "game loaded");
    Ok(game)
}

fn write_card(out: &mut String, card: &Card) {
    let (color, rank) = card.codes();
    let _ = writeln!(out, "{color} {rank}");
}

struct Tokens<'a>(SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next(&mut self) -> Result<&'a str, SaveError> {
        self.0.next().ok_or(SaveError::Malformed)
    }

    fn next_int(&mut self) -> Result<i64, SaveError> {
        self.next()?.parse().map_err(|_| SaveError::Malformed)
    }

    fn next_card(&mut self) -> Result<Card, SaveError> {
        let color = self.next_int()?;
        let rank = self.next_int()?;
        u8::try_from(color)
            .ok()
            .zip(u8::try_from(rank).ok())
            .and_then(|(color, rank)| Card::from_codes(color, rank))
            .ok_or(SaveError::BadCard)
    }

    /// A size field bounded by the full deck, then that many cards.
    fn next_card_list(&mut self) -> Result<Vec<Card>, SaveError> {
        let size = self.next_int()?;
        if size < 0 || size > TOTAL_CARDS_IN_DECK as i64 {
            return Err(SaveError::SizeOutOfRange);
        }
        let mut cards = Vec::with_capacity(size as usize);
        for _ in 0..size {
            cards.push(self.next_card()?);
        }
        Ok(cards)
    }
}
