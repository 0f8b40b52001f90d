use crate::game::Game;
use serde::{Deserialize, Serialize};

/// Cross-round bookkeeping: bankruptcy marking, goal detection, and the
/// continue-or-end decision after every settled round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSupervisor {
    pub goal_amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    /// Nobody won yet and somebody can still bet: open the next betting
    /// phase.
    Continue,
    /// Every seat is out of chips.
    AllBankrupt,
    /// One or more players reached the goal; ties share the win.
    GoalReached { seats: Vec<usize>, chips: u32 },
}

impl MatchSupervisor {
    pub fn new(goal_amount: u32) -> Self {
        Self { goal_amount }
    }

    /// Mark every seat with an empty wallet as bankrupt. Sticky: once set
    /// it is never cleared, and dealing and turn order skip the seat for
    /// the rest of the match.
    pub fn mark_bankrupt_players(&self, game: &mut Game) {
        for player in &mut game.players {
            if player.chips == 0 && !player.bankrupt {
                log::info!("player {} is bankrupt", player.id);
                player.bankrupt = true;
            }
        }
    }

    /// Seats tied at the highest chip count among non-bankrupt players at
    /// or above the goal. Empty when nobody has reached it.
    pub fn check_goal_winners(&self, game: &Game) -> Vec<usize> {
        let mut best: Option<u32> = None;
        let mut seats = Vec::new();

        for player in &game.players {
            if player.bankrupt || player.chips < self.goal_amount {
                continue;
            }
            match best {
                Some(amount) if player.chips < amount => {}
                Some(amount) if player.chips == amount => seats.push(player.id),
                _ => {
                    best = Some(player.chips);
                    seats = vec![player.id];
                }
            }
        }
        seats
    }

    pub fn any_active_players(&self, game: &Game) -> bool {
        game.players.iter().any(|p| !p.bankrupt && p.chips > 0)
    }

    /// End-of-round pass: drop the settled stakes, mark bankrupts, then
    /// decide whether the match goes on.
    pub fn evaluate(&self, game: &mut Game) -> MatchVerdict {
        for player in &mut game.players {
            // stakes were resolved by the settlement payouts
            player.bet = 0;
            player.split_bet = 0;
        }
        self.mark_bankrupt_players(game);

        let seats = self.check_goal_winners(game);
        if let Some(&seat) = seats.first() {
            let chips = game.players[seat].chips;
            log::info!("goal reached by {:?} with {} chips", seats, chips);
            return MatchVerdict::GoalReached { seats, chips };
        }
        if !self.any_active_players(game) {
            log::info!("all players are out of chips");
            return MatchVerdict::AllBankrupt;
        }
        MatchVerdict::Continue
    }
}
