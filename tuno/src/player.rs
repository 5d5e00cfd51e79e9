use crate::card::Card;

#[derive(Debug)]
pub struct Player {
    pub seat: usize,
    pub hand: Vec<Card>,
}

impl Player {
    pub fn new(seat: usize, cards: Vec<Card>) -> Self {
        Self { seat, hand: cards }
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Removes the card at `index`, shifting later cards down so their
    /// relative order is preserved. `None` if the index is out of range.
    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::card::{CardColor, ColoredRank};

    use super::*;

    fn sample_hand() -> Vec<Card> {
        vec![
            Card::Colored(CardColor::Red, ColoredRank::Number(1)),
            Card::Colored(CardColor::Green, ColoredRank::Skip),
            Card::Colored(CardColor::Blue, ColoredRank::Number(7)),
        ]
    }

    #[test]
    fn add_card_appends_to_the_hand() {
        let mut player = Player::new(0, sample_hand());
        player.add_card(Card::Wild);

        assert_eq!(player.cards_count(), 4);
        assert_eq!(player.card(3), Some(&Card::Wild));
    }

    #[test]
    fn remove_card_preserves_the_order_of_the_rest() {
        let mut player = Player::new(0, sample_hand());

        let removed = player.remove_card(1);

        assert_eq!(
            removed,
            Some(Card::Colored(CardColor::Green, ColoredRank::Skip))
        );
        assert_eq!(
            player.hand,
            vec![
                Card::Colored(CardColor::Red, ColoredRank::Number(1)),
                Card::Colored(CardColor::Blue, ColoredRank::Number(7)),
            ]
        );
    }

    #[test]
    fn remove_card_rejects_an_out_of_range_index() {
        let mut player = Player::new(0, sample_hand());

        assert_eq!(player.remove_card(3), None);
        assert_eq!(player.cards_count(), 3);
    }
}
