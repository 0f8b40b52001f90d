use crate::error::EngineError;
use crate::hand::{Hand, Outcome};
use serde::{Deserialize, Serialize};

/// A seat at the table: wallet, main hand, optional split hand, and the
/// round-scoped flags the turn machine reads.
///
/// Bets are escrowed: staked chips leave `chips` the moment the bet is
/// set and only come back through settlement payouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub chips: u32,
    pub hand: Hand,
    pub split_hand: Hand,
    pub has_split: bool,
    pub bet: u32,
    pub split_bet: u32,
    pub acted_main: bool,
    pub acted_split: bool,
    pub bankrupt: bool,
    pub outcome_main: Option<Outcome>,
    pub outcome_split: Option<Outcome>,
}

impl Player {
    pub fn new(id: usize, initial_chips: u32) -> Self {
        Self {
            id,
            chips: initial_chips,
            hand: Hand::new(),
            split_hand: Hand::new(),
            has_split: false,
            bet: 0,
            split_bet: 0,
            acted_main: false,
            acted_split: false,
            bankrupt: false,
            outcome_main: None,
            outcome_split: None,
        }
    }

    /// Replace the main bet. The previous stake is refunded before the new
    /// one is taken, so the call either moves the wallet to the new stake
    /// level or leaves everything untouched.
    pub fn set_bet(&mut self, amount: u32) -> Result<(), EngineError> {
        if self.bankrupt && amount > 0 {
            return Err(EngineError::IllegalAction("bankrupt player cannot bet"));
        }
        let wallet = self.chips + self.bet;
        if amount > wallet {
            return Err(EngineError::InvalidBet("bet exceeds available chips"));
        }
        self.chips = wallet - amount;
        self.bet = amount;
        Ok(())
    }

    pub fn set_split_bet(&mut self, amount: u32) -> Result<(), EngineError> {
        if self.bankrupt && amount > 0 {
            return Err(EngineError::IllegalAction("bankrupt player cannot bet"));
        }
        let wallet = self.chips + self.split_bet;
        if amount > wallet {
            return Err(EngineError::InvalidBet("bet exceeds available chips"));
        }
        self.chips = wallet - amount;
        self.split_bet = amount;
        Ok(())
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips += amount;
    }

    /// Clear both hands and every round-scoped flag. Bets and the wallet
    /// survive; they belong to the betting/settlement cycle.
    pub fn clear_hands(&mut self) {
        self.hand.clear();
        self.split_hand.clear();
        self.has_split = false;
        self.acted_main = false;
        self.acted_split = false;
        self.outcome_main = None;
        self.outcome_split = None;
    }

    pub fn hand_for(&self, hand_index: usize) -> &Hand {
        if hand_index == 0 {
            &self.hand
        } else {
            &self.split_hand
        }
    }

    pub fn hand_for_mut(&mut self, hand_index: usize) -> &mut Hand {
        if hand_index == 0 {
            &mut self.hand
        } else {
            &mut self.split_hand
        }
    }

    pub fn bet_for(&self, hand_index: usize) -> u32 {
        if hand_index == 0 {
            self.bet
        } else {
            self.split_bet
        }
    }

    /// Whether an irreversible action (hit, double, split) was already
    /// taken on the given hand; gates double-down and split eligibility.
    pub fn has_acted(&self, hand_index: usize) -> bool {
        if hand_index == 0 {
            self.acted_main
        } else {
            self.acted_split
        }
    }

    pub fn mark_acted(&mut self, hand_index: usize) {
        if hand_index == 0 {
            self.acted_main = true;
        } else {
            self.acted_split = true;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealer {
    pub hand: Hand,
}

impl Dealer {
    pub fn new() -> Self {
        Self { hand: Hand::new() }
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}
