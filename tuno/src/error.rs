use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Card index {0} is out of range")]
    InvalidCardIndex(usize),
    #[error("That card cannot be played on the current top card")]
    IllegalMove,
    #[error("A wild play requires a color choice")]
    ColorChoiceRequired,
    #[error("Both the draw pile and the discard pile are empty")]
    PileExhausted,
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("No save file found")]
    Missing,
    #[error("Failed to access the save file")]
    Io(#[from] std::io::Error),
    #[error("Save data does not start with the expected tag")]
    BadTag,
    #[error("Save data holds a player count outside 2..=4")]
    PlayerCountOutOfRange,
    #[error("Save data holds a pile or hand size outside 0..=108")]
    SizeOutOfRange,
    #[error("Save data holds an invalid card encoding")]
    BadCard,
    #[error("Save data holds an invalid color code")]
    BadColor,
    #[error("Save data is truncated or malformed")]
    Malformed,
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
