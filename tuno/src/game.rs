use rand::Rng;
use tracing::debug;

use crate::card::{Card, CardColor};
use crate::constants::{INITIAL_HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::deck::{Deck, DiscardPile};
use crate::error::{GameError, Result};
use crate::player::Player;
use crate::rules::{self, CardEffect};

/// Turn order around the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_int(&self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Anything other than -1 normalizes to `Forward`.
    pub(crate) fn from_int(value: i64) -> Self {
        if value == -1 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Cards forced onto a seat by a Draw Two or Wild Draw Four. `drawn` falls
/// short of `requested` when both piles ran dry mid-draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyDraw {
    pub seat: usize,
    pub requested: u8,
    pub drawn: u8,
}

impl PenaltyDraw {
    pub fn short(&self) -> bool {
        self.drawn < self.requested
    }
}

/// What happened while moving on to the next turn, for display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TurnAdvance {
    pub reversed: bool,
    pub penalty: Option<PenaltyDraw>,
    pub skipped_seat: Option<usize>,
}

/// The whole mutable state of one game: players, piles, top card, active
/// color and turn order. Owned by the session loop and passed by reference
/// to every operation; there are no globals.
#[derive(Debug)]
pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) deck: Deck,
    pub(crate) discard: DiscardPile,
    pub(crate) top_card: Card,
    pub(crate) active_color: CardColor,
    pub(crate) current_player: usize,
    pub(crate) direction: Direction,
}

impl Game {
    /// Starts a fresh game: shuffled standard deck, seven cards per player,
    /// first non-wild card exposed as the top. Wild cards that would have
    /// surfaced stay in the deck, so the 108-card total is preserved.
    pub fn new(player_count: usize, rng: &mut impl Rng) -> Result<Self> {
        if player_count < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if player_count > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }

        let mut deck = Deck::standard();
        deck.shuffle(rng);

        let mut players = Vec::with_capacity(player_count);
        for seat in 0..player_count {
            players.push(Player::new(seat, Vec::with_capacity(INITIAL_HAND_SIZE)));
        }

        for _ in 0..INITIAL_HAND_SIZE {
            for player in &mut players {
                let card = deck
                    .0
                    .pop()
                    .expect("A fresh deck always covers the initial deal.");
                player.add_card(card);
            }
        }

        let top_card = deck
            .draw_first_colored()
            .expect("A fresh deck always holds a colored card.");
        let active_color = top_card
            .color()
            .expect("The initial top card is never wild.");

        Ok(Game {
            players,
            deck,
            discard: DiscardPile::new(),
            top_card,
            active_color,
            current_player: 0,
            direction: Direction::Forward,
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn current_seat(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn top_card(&self) -> &Card {
        &self.top_card
    }

    pub fn active_color(&self) -> CardColor {
        self.active_color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn deck_size(&self) -> usize {
        self.deck.cards_count()
    }

    pub fn discard_size(&self) -> usize {
        self.discard.cards_count()
    }

    pub fn is_legal_play(&self, card: &Card) -> bool {
        rules::is_legal(card, &self.top_card, self.active_color)
    }

    pub fn current_player_has_legal_move(&self) -> bool {
        rules::has_legal_move(
            &self.current_player().hand,
            &self.top_card,
            self.active_color,
        )
    }

    /// Plays the card at `index` from the current player's hand. The old top
    /// card moves onto the discard pile and the played card becomes the new
    /// top. Wild plays must bring a color choice; for everything else the
    /// card's own color becomes active. The turn does not advance here.
    pub fn play_card(&mut self, index: usize, chosen_color: Option<CardColor>) -> Result<CardEffect> {
        let player = &self.players[self.current_player];
        let card = *player
            .card(index)
            .ok_or(GameError::InvalidCardIndex(index))?;

        if !self.is_legal_play(&card) {
            return Err(GameError::IllegalMove);
        }

        let effect = rules::card_effect(&card);
        let active_color = if effect.requires_color_choice {
            chosen_color.ok_or(GameError::ColorChoiceRequired)?
        } else {
            card.color().expect("Non-wild cards always carry a color.")
        };

        self.players[self.current_player].remove_card(index);
        self.discard.push(self.top_card);
        self.top_card = card;
        self.active_color = active_color;

        debug!(seat = self.current_player, card = %card, "card played");

        Ok(effect)
    }

    /// True iff the current player's hand just emptied; terminal.
    pub fn current_player_wins(&self) -> bool {
        self.current_player().cards_count() == 0
    }

    /// A play that leaves exactly one card triggers the UNO declaration.
    pub fn needs_uno_declaration(&self) -> bool {
        self.current_player().cards_count() == 1
    }

    /// One penalty card for a missed UNO declaration, if the piles permit.
    pub fn apply_uno_penalty(&mut self, rng: &mut impl Rng) -> Option<Card> {
        let card = self.deck.draw_or_refill(&mut self.discard, rng)?;
        debug!(seat = self.current_player, card = %card, "uno penalty drawn");
        self.players[self.current_player].add_card(card);
        Some(card)
    }

    /// The current player draws one card because they had no legal move.
    pub fn draw_for_current(&mut self, rng: &mut impl Rng) -> Result<Card> {
        let card = self
            .deck
            .draw_or_refill(&mut self.discard, rng)
            .ok_or(GameError::PileExhausted)?;
        self.players[self.current_player].add_card(card);
        Ok(card)
    }

    /// Moves on to the next turn, applying the effect of the card just
    /// played. With exactly two players a Reverse acts as a Skip. A pending
    /// draw lands on the next seat before it is skipped; when the piles run
    /// dry mid-draw the shortage is reported, not fatal.
    pub fn advance_turn(&mut self, effect: CardEffect, rng: &mut impl Rng) -> TurnAdvance {
        let mut effect = effect;
        if effect.reverse_direction && self.players.len() == 2 {
            effect.reverse_direction = false;
            effect.skip_next = true;
        }

        if effect.reverse_direction {
            self.direction = self.direction.flipped();
        }

        let mut advance = TurnAdvance {
            reversed: effect.reverse_direction,
            ..TurnAdvance::default()
        };

        if effect.draw_count > 0 || effect.skip_next {
            self.current_player = self.seat_after(self.current_player);

            if effect.draw_count > 0 {
                let mut drawn = 0;
                for _ in 0..effect.draw_count {
                    match self.deck.draw_or_refill(&mut self.discard, rng) {
                        Some(card) => {
                            self.players[self.current_player].add_card(card);
                            drawn += 1;
                        }
                        None => break,
                    }
                }
                let penalty = PenaltyDraw {
                    seat: self.current_player,
                    requested: effect.draw_count,
                    drawn,
                };
                if penalty.short() {
                    debug!(
                        seat = penalty.seat,
                        requested = penalty.requested,
                        drawn = penalty.drawn,
                        "piles ran dry during a forced draw"
                    );
                }
                advance.penalty = Some(penalty);
            }

            if effect.skip_next {
                advance.skipped_seat = Some(self.current_player);
                self.current_player = self.seat_after(self.current_player);
            }
        } else {
            self.current_player = self.seat_after(self.current_player);
        }

        advance
    }

    /// Draw pile + discard pile + every hand + the top card. Stays at 108
    /// for the life of a game.
    pub fn total_cards(&self) -> usize {
        let in_hands: usize = self.players.iter().map(Player::cards_count).sum();
        self.deck.cards_count() + self.discard.cards_count() + in_hands + 1
    }

    fn seat_after(&self, seat: usize) -> usize {
        let count = self.players.len() as isize;
        ((seat as isize + self.direction.as_int() as isize + count) % count) as usize
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::card::ColoredRank;
    use crate::constants::TOTAL_CARDS_IN_DECK;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn return_ok_if_enough_players() {
        let result = Game::new(2, &mut rng());
        assert!(matches!(result, Result::Ok(_)));
    }

    #[test]
    fn return_err_if_not_enough_players() {
        let error = Game::new(1, &mut rng()).unwrap_err();
        assert!(matches!(error, GameError::NotEnoughPlayers));
    }

    #[test]
    fn return_err_if_too_many_players() {
        let error = Game::new(5, &mut rng()).unwrap_err();
        assert!(matches!(error, GameError::TooManyPlayers));
    }

    #[test]
    fn all_players_start_with_7_cards() {
        let game = Game::new(4, &mut rng()).unwrap();
        for player in game.players() {
            assert_eq!(player.cards_count(), 7);
        }
    }

    #[test]
    fn dealing_4_players_leaves_79_in_the_draw_pile() {
        let game = Game::new(4, &mut rng()).unwrap();
        // 108 - 4 * 7 - 1 top card.
        assert_eq!(game.deck_size(), 79);
        assert!(game.discard.is_empty());
    }

    #[test]
    fn new_game_exposes_a_non_wild_top_card() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let game = Game::new(3, &mut rng).unwrap();
            assert!(!game.top_card().is_wild());
            assert_eq!(game.top_card().color(), Some(game.active_color()));
        }
    }

    #[test]
    fn card_total_stays_at_108_through_a_game() {
        let mut rng = rng();
        let mut game = Game::new(3, &mut rng).unwrap();
        assert_eq!(game.total_cards(), TOTAL_CARDS_IN_DECK as usize);

        game.draw_for_current(&mut rng).unwrap();
        assert_eq!(game.total_cards(), TOTAL_CARDS_IN_DECK as usize);

        // Play whatever the hand allows; wilds need a color.
        let index = game
            .current_player()
            .hand
            .iter()
            .position(|card| game.is_legal_play(card))
            .or(Some(0));
        if let Some(index) = index {
            let card = *game.current_player().card(index).unwrap();
            if game.is_legal_play(&card) {
                let chosen = card.is_wild().then_some(CardColor::Red);
                let effect = game.play_card(index, chosen).unwrap();
                assert_eq!(game.total_cards(), TOTAL_CARDS_IN_DECK as usize);
                game.advance_turn(effect, &mut rng);
                assert_eq!(game.total_cards(), TOTAL_CARDS_IN_DECK as usize);
            }
        }
    }

    #[test]
    fn play_card_rejects_an_out_of_range_index() {
        let mut game = Game::new(2, &mut rng()).unwrap();
        let error = game.play_card(42, None).unwrap_err();
        assert!(matches!(error, GameError::InvalidCardIndex(42)));
    }

    #[test]
    fn play_card_requires_a_color_for_wilds() {
        let mut game = Game::new(2, &mut rng()).unwrap();
        game.players[0].hand[0] = Card::Wild;
        game.current_player = 0;

        let error = game.play_card(0, None).unwrap_err();
        assert!(matches!(error, GameError::ColorChoiceRequired));

        game.play_card(0, Some(CardColor::Blue)).unwrap();
        assert_eq!(game.active_color(), CardColor::Blue);
        assert_eq!(game.top_card(), &Card::Wild);
    }

    #[test]
    fn play_card_moves_the_old_top_onto_the_discard() {
        let mut game = Game::new(2, &mut rng()).unwrap();
        let old_top = *game.top_card();
        let color = game.active_color();
        game.players[0].hand[0] = Card::Colored(color, ColoredRank::Number(5));
        game.current_player = 0;

        game.play_card(0, None).unwrap();

        assert_eq!(game.discard_size(), 1);
        assert_eq!(game.discard.0[0], old_top);
        assert_eq!(
            game.top_card(),
            &Card::Colored(color, ColoredRank::Number(5))
        );
    }

    #[test]
    fn play_card_rejects_an_illegal_move() {
        let mut game = Game::new(2, &mut rng()).unwrap();
        // Force a guaranteed mismatch: active color red, top card a 1, hand
        // card a blue 2.
        game.top_card = Card::Colored(CardColor::Red, ColoredRank::Number(1));
        game.active_color = CardColor::Red;
        game.players[0].hand[0] = Card::Colored(CardColor::Blue, ColoredRank::Number(2));
        game.current_player = 0;

        let error = game.play_card(0, None).unwrap_err();
        assert!(matches!(error, GameError::IllegalMove));
    }

    #[test]
    fn advance_moves_one_seat_forward_by_default() {
        let mut rng = rng();
        let mut game = Game::new(4, &mut rng).unwrap();
        game.current_player = 0;

        game.advance_turn(CardEffect::default(), &mut rng);
        assert_eq!(game.current_seat(), 1);

        game.current_player = 3;
        game.advance_turn(CardEffect::default(), &mut rng);
        assert_eq!(game.current_seat(), 0);
    }

    #[test]
    fn advance_respects_a_backward_direction() {
        let mut rng = rng();
        let mut game = Game::new(4, &mut rng).unwrap();
        game.current_player = 0;
        game.direction = Direction::Backward;

        game.advance_turn(CardEffect::default(), &mut rng);
        assert_eq!(game.current_seat(), 3);
    }

    #[test]
    fn skip_jumps_over_the_next_seat() {
        let mut rng = rng();
        let mut game = Game::new(4, &mut rng).unwrap();
        game.current_player = 0;

        let effect = CardEffect {
            skip_next: true,
            ..CardEffect::default()
        };
        let advance = game.advance_turn(effect, &mut rng);

        assert_eq!(advance.skipped_seat, Some(1));
        assert_eq!(game.current_seat(), 2);
    }

    #[test]
    fn reverse_flips_direction_with_three_or_more_players() {
        let mut rng = rng();
        let mut game = Game::new(3, &mut rng).unwrap();
        game.current_player = 0;

        let effect = CardEffect {
            reverse_direction: true,
            ..CardEffect::default()
        };
        let advance = game.advance_turn(effect, &mut rng);

        assert!(advance.reversed);
        assert_eq!(game.direction(), Direction::Backward);
        assert_eq!(game.current_seat(), 2);
    }

    #[test]
    fn reverse_with_two_players_acts_as_a_skip() {
        let mut rng = rng();
        let mut game = Game::new(2, &mut rng).unwrap();
        game.current_player = 0;

        let effect = CardEffect {
            reverse_direction: true,
            ..CardEffect::default()
        };
        let advance = game.advance_turn(effect, &mut rng);

        assert!(!advance.reversed);
        assert_eq!(game.direction(), Direction::Forward);
        assert_eq!(advance.skipped_seat, Some(1));
        // The opponent was skipped; the turn comes straight back.
        assert_eq!(game.current_seat(), 0);
    }

    #[test]
    fn draw_two_lands_on_the_next_seat_then_skips_it() {
        let mut rng = rng();
        let mut game = Game::new(3, &mut rng).unwrap();
        game.current_player = 0;
        let before = game.player(1).unwrap().cards_count();

        let effect = CardEffect {
            draw_count: 2,
            skip_next: true,
            ..CardEffect::default()
        };
        let advance = game.advance_turn(effect, &mut rng);

        assert_eq!(
            advance.penalty,
            Some(PenaltyDraw {
                seat: 1,
                requested: 2,
                drawn: 2
            })
        );
        assert_eq!(game.player(1).unwrap().cards_count(), before + 2);
        assert_eq!(advance.skipped_seat, Some(1));
        assert_eq!(game.current_seat(), 2);
    }

    #[test]
    fn uno_penalty_draws_exactly_one_card() {
        let mut rng = rng();
        let mut game = Game::new(2, &mut rng).unwrap();
        game.players[0].hand.truncate(1);
        game.current_player = 0;
        assert!(game.needs_uno_declaration());

        let card = game.apply_uno_penalty(&mut rng);

        assert!(card.is_some());
        assert_eq!(game.current_player().cards_count(), 2);
    }
}
