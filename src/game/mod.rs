use crate::config::TableConfig;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::hand::{Hand, HandStatus, Outcome};
use crate::player::{Dealer, Player};
use serde::{Deserialize, Serialize};

/// Where the round currently is. `Dealing` only exists inside
/// `start_round`; between calls the table sits in one of the other five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Betting,
    Dealing,
    PlayerTurns,
    DealerResolution,
    Settlement,
    RoundOver,
}

/// The round engine: one instance per match. Owns the deck, the dealer and
/// the seats, and drives turn order across (player, hand) pairs.
///
/// Every mutating operation validates its own preconditions and leaves the
/// table untouched when it rejects; the decision-gate predicates are
/// advisory only.
#[derive(Debug)]
pub struct Game {
    pub deck: Deck,
    pub dealer: Dealer,
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub current_hand_index: usize,
    pub phase: RoundPhase,
}

impl Game {
    pub fn new(config: &TableConfig) -> Self {
        Self::with_deck(config, Deck::new())
    }

    /// Build a table over a specific deck (seeded decks for tests and
    /// replayable simulations).
    pub fn with_deck(config: &TableConfig, deck: Deck) -> Self {
        let players = (0..config.clamped_player_count())
            .map(|id| Player::new(id, config.starting_chips))
            .collect();
        Self {
            deck,
            dealer: Dealer::new(),
            players,
            current_player_index: 0,
            current_hand_index: 0,
            phase: RoundPhase::Betting,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, seat: usize) -> &Player {
        &self.players[seat]
    }

    pub fn player_mut(&mut self, seat: usize) -> &mut Player {
        &mut self.players[seat]
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn current_hand(&self) -> &Hand {
        self.players[self.current_player_index].hand_for(self.current_hand_index)
    }

    pub fn dealer_up_card(&self) -> Option<&crate::card::Card> {
        self.dealer.hand.cards.first()
    }

    /// The peek rule: with a ten-like or ace up-card, a two-card dealer
    /// hand worth 21 is a blackjack and ends the round before any player
    /// acts.
    pub fn check_dealer_blackjack(&self) -> bool {
        if self.dealer.hand.size() < 2 {
            return false;
        }
        let up = &self.dealer.hand.cards[0];
        up.value() >= 10 && self.dealer.hand.value() == 21
    }

    /// Set the main bet for a seat during the betting phase. Chips move
    /// into escrow immediately (see `Player::set_bet`).
    pub fn place_bet(&mut self, seat: usize, amount: u32) -> Result<(), EngineError> {
        if self.phase != RoundPhase::Betting {
            return Err(EngineError::IllegalAction(
                "bets can only change during the betting phase",
            ));
        }
        let player = self
            .players
            .get_mut(seat)
            .ok_or(EngineError::IllegalAction("no such seat"))?;
        player.set_bet(amount)
    }

    /// Deal the round: two cards to every live bettor, then two to the
    /// dealer. Ends in `PlayerTurns`, or directly in `Settlement` when the
    /// dealer peek finds a blackjack.
    pub fn start_round(&mut self) -> Result<(), EngineError> {
        if self.phase != RoundPhase::Betting {
            return Err(EngineError::IllegalAction("round already in progress"));
        }
        if !self.players.iter().any(|p| !p.bankrupt && p.bet > 0) {
            return Err(EngineError::IllegalAction("no live bets at the table"));
        }

        self.phase = RoundPhase::Dealing;
        self.dealer.clear_hand();
        for player in &mut self.players {
            player.clear_hands();
        }

        if self.deck.needs_shuffle() {
            log::debug!(
                "reshuffling deck with {} cards remaining",
                self.deck.remaining()
            );
            self.deck.reset();
        }

        for seat in 0..self.players.len() {
            if self.players[seat].bankrupt || self.players[seat].bet == 0 {
                continue;
            }
            self.deck.deal_to(&mut self.players[seat].hand)?;
            self.deck.deal_to(&mut self.players[seat].hand)?;
        }
        self.deck.deal_to(&mut self.dealer.hand)?;
        self.deck.deal_to(&mut self.dealer.hand)?;

        self.current_player_index = 0;
        self.current_hand_index = 0;
        for (seat, player) in self.players.iter().enumerate() {
            if !player.bankrupt && player.bet > 0 && !player.hand.is_empty() {
                self.current_player_index = seat;
                break;
            }
        }

        if self.check_dealer_blackjack() {
            log::debug!("dealer peeked a blackjack, round settles immediately");
            self.phase = RoundPhase::Settlement;
        } else {
            self.phase = RoundPhase::PlayerTurns;
        }
        Ok(())
    }

    /// Draw one card into the active hand. A resulting value of 21 or more
    /// stands the hand implicitly and the turn moves on.
    pub fn hit(&mut self) -> Result<(), EngineError> {
        self.ensure_player_turn()?;
        let hand_index = self.current_hand_index;
        let player = &self.players[self.current_player_index];
        if player.bet_for(hand_index) == 0 {
            return Err(EngineError::IllegalAction("no bet on this hand"));
        }
        if player.hand_for(hand_index).value() >= 21 {
            return Err(EngineError::IllegalAction("hand cannot take another card"));
        }

        let seat = self.current_player_index;
        self.deck
            .deal_to(self.players[seat].hand_for_mut(hand_index))?;
        self.players[seat].mark_acted(hand_index);

        let value = self.players[seat].hand_for(hand_index).value();
        if value > 21 {
            self.players[seat].hand_for_mut(hand_index).status = HandStatus::Busted;
            self.advance_turn();
        } else if value == 21 {
            self.stand_current();
        }
        Ok(())
    }

    /// Stand on the active hand and move to the next (player, hand) pair.
    pub fn stand(&mut self) -> Result<(), EngineError> {
        self.ensure_player_turn()?;
        let player = &self.players[self.current_player_index];
        if player.bet_for(self.current_hand_index) == 0 {
            return Err(EngineError::IllegalAction("no bet on this hand"));
        }
        if player.hand_for(self.current_hand_index).is_empty() {
            return Err(EngineError::IllegalAction("nothing to stand on"));
        }
        self.stand_current();
        Ok(())
    }

    /// Double the bet on the active hand, draw exactly one card, and stand.
    /// Only legal as the hand's first action.
    pub fn double_down(&mut self) -> Result<(), EngineError> {
        self.ensure_player_turn()?;
        let hand_index = self.current_hand_index;
        let seat = self.current_player_index;
        let player = &self.players[seat];
        if player.has_acted(hand_index) {
            return Err(EngineError::IllegalAction(
                "double down must be the hand's first action",
            ));
        }
        if player.hand_for(hand_index).size() != 2 {
            return Err(EngineError::IllegalAction(
                "double down requires a two-card hand",
            ));
        }
        let bet = player.bet_for(hand_index);
        if bet == 0 {
            return Err(EngineError::IllegalAction("no bet on this hand"));
        }
        if player.chips < bet {
            return Err(EngineError::IllegalAction(
                "not enough chips to double down",
            ));
        }

        let player = &mut self.players[seat];
        player.chips -= bet;
        if hand_index == 0 {
            player.bet = bet * 2;
        } else {
            player.split_bet = bet * 2;
        }
        player.mark_acted(hand_index);

        self.deck
            .deal_to(self.players[seat].hand_for_mut(hand_index))?;
        if self.players[seat].hand_for(hand_index).value() > 21 {
            self.players[seat].hand_for_mut(hand_index).status = HandStatus::Busted;
            self.advance_turn();
        } else {
            self.stand_current();
        }
        Ok(())
    }

    /// Split the main hand's pair into two one-card hands with matching
    /// bets. Both hands are marked acted: no re-split and no double-down
    /// after a split.
    pub fn split(&mut self) -> Result<(), EngineError> {
        self.ensure_player_turn()?;
        if self.current_hand_index != 0 {
            return Err(EngineError::IllegalAction("cannot split a split hand"));
        }
        let seat = self.current_player_index;
        let player = &self.players[seat];
        if player.has_split {
            return Err(EngineError::IllegalAction("player has already split"));
        }
        if player.hand.size() != 2 || !player.hand.can_split() {
            return Err(EngineError::IllegalAction(
                "split requires a two-card matching pair",
            ));
        }
        let bet = player.bet;
        if bet == 0 {
            return Err(EngineError::IllegalAction("no bet on this hand"));
        }
        if player.chips < bet {
            return Err(EngineError::IllegalAction("not enough chips to split"));
        }

        let player = &mut self.players[seat];
        let second = player
            .hand
            .cards
            .pop()
            .ok_or(EngineError::IllegalAction("split requires two cards"))?;
        player.split_hand.clear();
        player.split_hand.add_card(second);
        player.has_split = true;
        player.chips -= bet;
        player.split_bet = bet;
        player.mark_acted(0);
        player.mark_acted(1);
        Ok(())
    }

    /// Move to the next playable (player, hand) pair: the split hand of
    /// the current player first, then hand 0 of the next seat with a live
    /// main bet. Returns false when nobody is left, which hands the round
    /// to the dealer.
    pub fn advance_turn(&mut self) -> bool {
        let player = &self.players[self.current_player_index];
        if self.current_hand_index == 0
            && player.has_split
            && player.split_bet > 0
            && !player.bankrupt
        {
            self.current_hand_index = 1;
            return true;
        }

        self.current_hand_index = 0;
        for seat in self.current_player_index + 1..self.players.len() {
            let next = &self.players[seat];
            if !next.bankrupt && next.bet > 0 && !next.hand.is_empty() {
                self.current_player_index = seat;
                return true;
            }
        }
        self.phase = RoundPhase::DealerResolution;
        false
    }

    /// Reveal-and-draw for the dealer: hit below 17, stand at 17 or more,
    /// soft or hard.
    pub fn resolve_dealer_hand(&mut self) -> Result<(), EngineError> {
        if self.phase != RoundPhase::DealerResolution {
            return Err(EngineError::IllegalAction(
                "player turns are not finished",
            ));
        }
        while self.dealer.hand.value() < 17 {
            self.deck.deal_to(&mut self.dealer.hand)?;
        }
        let value = self.dealer.hand.value();
        self.dealer.hand.status = if value > 21 {
            HandStatus::Busted
        } else {
            HandStatus::Stood
        };
        log::debug!("dealer finishes at {}", value);
        self.phase = RoundPhase::Settlement;
        Ok(())
    }

    /// Pay out every staked hand against the dealer. A win returns twice
    /// the stake, a push returns it, a loss returns nothing (the stake was
    /// escrowed when the bet was placed).
    pub fn settle_bets(&mut self) -> Result<(), EngineError> {
        if self.phase != RoundPhase::Settlement {
            return Err(EngineError::IllegalAction("nothing to settle"));
        }
        let dealer_value = self.dealer.hand.value();

        for player in &mut self.players {
            player.outcome_main = None;
            player.outcome_split = None;

            if player.bet > 0 {
                let outcome = outcome_against_dealer(player.hand.value(), dealer_value);
                match outcome {
                    Outcome::Win => player.add_chips(player.bet * 2),
                    Outcome::Push => player.add_chips(player.bet),
                    Outcome::Loss => {}
                }
                player.outcome_main = Some(outcome);
            }

            if player.has_split && player.split_bet > 0 {
                let outcome = outcome_against_dealer(player.split_hand.value(), dealer_value);
                match outcome {
                    Outcome::Win => player.add_chips(player.split_bet * 2),
                    Outcome::Push => player.add_chips(player.split_bet),
                    Outcome::Loss => {}
                }
                player.outcome_split = Some(outcome);
            }

            log::debug!(
                "player {} settles: main {:?}, split {:?}, {} chips",
                player.id,
                player.outcome_main,
                player.outcome_split,
                player.chips
            );
        }
        self.phase = RoundPhase::RoundOver;
        Ok(())
    }

    /// Clear the table for the next betting phase: hands, bets, turn
    /// pointers, and a reshuffle when the deck has run low. Chip balances
    /// persist. Idempotent.
    pub fn reset_for_next_round(&mut self) {
        let refund_stakes = self.phase == RoundPhase::Betting;
        self.dealer.clear_hand();
        for player in &mut self.players {
            if refund_stakes {
                // un-dealt stakes go back to the wallet; settled stakes
                // were already resolved by the payout
                player.chips += player.bet + player.split_bet;
            }
            player.bet = 0;
            player.split_bet = 0;
            player.clear_hands();
        }

        if self.deck.needs_shuffle() {
            log::debug!(
                "reshuffling deck with {} cards remaining",
                self.deck.remaining()
            );
            self.deck.reset();
        }

        self.current_player_index = 0;
        self.current_hand_index = 0;
        self.phase = RoundPhase::Betting;
    }

    fn ensure_player_turn(&self) -> Result<(), EngineError> {
        if self.phase != RoundPhase::PlayerTurns {
            return Err(EngineError::IllegalAction("no player turn in progress"));
        }
        Ok(())
    }

    fn stand_current(&mut self) {
        let seat = self.current_player_index;
        let hand_index = self.current_hand_index;
        self.players[seat].mark_acted(hand_index);
        let hand = self.players[seat].hand_for_mut(hand_index);
        if hand.status == HandStatus::Active {
            hand.status = HandStatus::Stood;
        }
        self.advance_turn();
    }
}

/// A one-sided bust decides first, then the value comparison. Anything
/// left, including both sides busting, lands in the push branch and the
/// stake comes back.
fn outcome_against_dealer(player_value: u8, dealer_value: u8) -> Outcome {
    if player_value > 21 && dealer_value <= 21 {
        Outcome::Loss
    } else if dealer_value > 21 && player_value <= 21 {
        Outcome::Win
    } else if player_value > dealer_value && player_value <= 21 {
        Outcome::Win
    } else if player_value < dealer_value && dealer_value <= 21 {
        Outcome::Loss
    } else {
        Outcome::Push
    }
}
