use crate::card::{Card, CardColor, ColoredRank};

/// The structured consequence of playing a card.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CardEffect {
    pub draw_count: u8,
    pub skip_next: bool,
    pub reverse_direction: bool,
    pub requires_color_choice: bool,
}

pub fn card_effect(card: &Card) -> CardEffect {
    let mut effect = CardEffect::default();

    match card {
        Card::Wild => {
            effect.requires_color_choice = true;
        }
        Card::WildDrawFour => {
            effect.requires_color_choice = true;
            effect.draw_count = 4;
            effect.skip_next = true;
        }
        Card::Colored(_, ColoredRank::Skip) => {
            effect.skip_next = true;
        }
        Card::Colored(_, ColoredRank::DrawTwo) => {
            effect.draw_count = 2;
            effect.skip_next = true;
        }
        Card::Colored(_, ColoredRank::Reverse) => {
            effect.reverse_direction = true;
        }
        Card::Colored(_, ColoredRank::Number(_)) => {}
    }

    effect
}

/// Legality rule: wilds always play; otherwise the card must share the
/// active color or the top card's rank. Rank matching applies across colors
/// (a Red 5 plays on a Blue 5). The broad rank rule is intentional.
pub fn is_legal(card: &Card, top_card: &Card, active_color: CardColor) -> bool {
    if card.is_wild() {
        return true;
    }
    if card.color() == Some(active_color) {
        return true;
    }
    card.matches_rank(top_card)
}

pub fn has_legal_move(hand: &[Card], top_card: &Card, active_color: CardColor) -> bool {
    hand.iter()
        .any(|card| is_legal(card, top_card, active_color))
}

/// A declaration counts only as the exact three letters "uno", any case,
/// nothing trailing.
pub fn is_uno_declaration(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("uno")
}
