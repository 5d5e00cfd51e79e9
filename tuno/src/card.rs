use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

#[derive(Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq)]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CardColor {
    /// The single-letter form used by the console color prompt.
    pub fn letter(&self) -> char {
        match self {
            CardColor::Red => 'R',
            CardColor::Green => 'G',
            CardColor::Blue => 'B',
            CardColor::Yellow => 'Y',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(CardColor::Red),
            'G' => Some(CardColor::Green),
            'B' => Some(CardColor::Blue),
            'Y' => Some(CardColor::Yellow),
            _ => None,
        }
    }

    pub(crate) fn code(&self) -> u8 {
        match self {
            CardColor::Red => 0,
            CardColor::Green => 1,
            CardColor::Blue => 2,
            CardColor::Yellow => 3,
        }
    }

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CardColor::Red),
            1 => Some(CardColor::Green),
            2 => Some(CardColor::Blue),
            3 => Some(CardColor::Yellow),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColoredRank {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

/// A single UNO card. Wild ranks have no color of their own, so the shape of
/// the type makes a "Red Wild" or a "colorless 7" unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Card {
    Colored(CardColor, ColoredRank),
    Wild,
    WildDrawFour,
}

// Wire codes used by the save format.
const RANK_SKIP: u8 = 10;
const RANK_REVERSE: u8 = 11;
const RANK_DRAW_TWO: u8 = 12;
const RANK_WILD: u8 = 13;
const RANK_WILD_DRAW_FOUR: u8 = 14;
const COLOR_WILD: u8 = 4;

impl Card {
    /// The color printed on the card, `None` for wilds.
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    /// Rank equality regardless of color: a Red 5 matches a Blue 5, a Green
    /// Skip matches a Yellow Skip.
    pub fn matches_rank(&self, other: &Card) -> bool {
        match (self, other) {
            (Card::Colored(_, rank), Card::Colored(_, other_rank)) => rank == other_rank,
            (Card::Wild, Card::Wild) => true,
            (Card::WildDrawFour, Card::WildDrawFour) => true,
            _ => false,
        }
    }

    /// Encodes the card as the `(color, rank)` integer pair of the save
    /// format.
    pub(crate) fn codes(&self) -> (u8, u8) {
        match self {
            Card::Colored(color, rank) => {
                let rank_code = match rank {
                    ColoredRank::Number(number) => *number,
                    ColoredRank::Skip => RANK_SKIP,
                    ColoredRank::Reverse => RANK_REVERSE,
                    ColoredRank::DrawTwo => RANK_DRAW_TWO,
                };
                (color.code(), rank_code)
            }
            Card::Wild => (COLOR_WILD, RANK_WILD),
            Card::WildDrawFour => (COLOR_WILD, RANK_WILD_DRAW_FOUR),
        }
    }

    /// Decodes a `(color, rank)` pair, rejecting pairings the deck cannot
    /// contain (a wild color with a number rank, a real color with a wild
    /// rank).
    pub(crate) fn from_codes(color: u8, rank: u8) -> Option<Self> {
        if color == COLOR_WILD {
            return match rank {
                RANK_WILD => Some(Card::Wild),
                RANK_WILD_DRAW_FOUR => Some(Card::WildDrawFour),
                _ => None,
            };
        }

        let color = CardColor::from_code(color)?;
        let rank = match rank {
            number @ 0..=9 => ColoredRank::Number(number),
            RANK_SKIP => ColoredRank::Skip,
            RANK_REVERSE => ColoredRank::Reverse,
            RANK_DRAW_TWO => ColoredRank::DrawTwo,
            _ => return None,
        };
        Some(Card::Colored(color, rank))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, rank) => {
                write!(f, "{} {}", color, {
                    match rank {
                        ColoredRank::Number(number) => number.to_string(),
                        ColoredRank::Skip => "Skip".to_string(),
                        ColoredRank::Reverse => "Reverse".to_string(),
                        ColoredRank::DrawTwo => "Draw Two".to_string(),
                    }
                })
            }
            Card::Wild => write!(f, "Wild"),
            Card::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}
