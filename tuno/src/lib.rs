//! Turn-resolution engine for a console UNO game: cards, deck and discard
//! lifecycle, play legality, card effects, turn order, the UNO-declaration
//! penalty and a plain-text save format. All console I/O lives in the
//! frontend crate.

pub mod card;
pub mod constants;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod rules;
pub mod save;
