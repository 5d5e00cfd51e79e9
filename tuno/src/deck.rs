use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    card::{Card, CardColor, ColoredRank},
    constants::*,
};

/// The draw pile. Cards are drawn from the top, which is the end of the
/// backing vector.
#[derive(Debug)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    /// Builds the standard 108-card deck: per color one 0, two each of 1-9,
    /// two Skip, two Reverse and two Draw Two, plus four Wild and four Wild
    /// Draw Four. Composition is fixed; only shuffling changes the order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        for color in CardColor::iter() {
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredRank::Skip));
            }

            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredRank::Reverse));
            }

            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredRank::DrawTwo));
            }

            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::Colored(color, ColoredRank::Number(*number)));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::Wild);
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::WildDrawFour);
        }

        Self(cards)
    }

    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.0.shuffle(rng);
    }

    /// Draws the top card, refilling from the discard pile when the deck is
    /// empty. Returns `None` only when both piles are exhausted.
    pub fn draw_or_refill(
        &mut self,
        discard: &mut DiscardPile,
        rng: &mut impl Rng,
    ) -> Option<Card> {
        if self.0.is_empty() {
            if discard.is_empty() {
                return None;
            }
            self.refill_from(discard, rng);
        }
        self.0.pop()
    }

    /// Moves the entire discard pile into the deck and reshuffles, leaving
    /// the discard pile empty.
    pub(crate) fn refill_from(&mut self, discard: &mut DiscardPile, rng: &mut impl Rng) {
        debug!(
            discarded = discard.cards_count(),
            "refilling draw pile from discard pile"
        );
        self.0.append(&mut discard.0);
        self.shuffle(rng);
    }

    /// Removes and returns the first non-wild card, leaving wilds in place.
    /// Used to expose the initial top card.
    pub(crate) fn draw_first_colored(&mut self) -> Option<Card> {
        self.0
            .iter()
            .position(|card| matches!(card, Card::Colored(_, _)))
            .map(|position| self.0.remove(position))
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Previously played cards, most recent last. The current top card lives
/// outside this pile and only joins it once the next card is played.
#[derive(Debug, Default)]
pub struct DiscardPile(pub(crate) Vec<Card>);

impl DiscardPile {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
