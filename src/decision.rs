//! Advisory predicates for enabling player actions. All are pure reads
//! over (player, game); the engine's action methods re-validate on their
//! own and never trust these answers.

use crate::game::{Game, RoundPhase};
use crate::player::Player;

fn can_act(player: &Player, game: &Game) -> bool {
    !player.bankrupt
        && game.phase == RoundPhase::PlayerTurns
        && player.id == game.current_player().id
}

pub fn can_hit(player: &Player, game: &Game) -> bool {
    if !can_act(player, game) {
        return false;
    }
    let hand_index = game.current_hand_index;
    player.hand_for(hand_index).value() < 21 && player.bet_for(hand_index) > 0
}

pub fn can_stand(player: &Player, game: &Game) -> bool {
    if !can_act(player, game) {
        return false;
    }
    let hand_index = game.current_hand_index;
    player.hand_for(hand_index).value() > 0 && player.bet_for(hand_index) > 0
}

pub fn can_double_down(player: &Player, game: &Game) -> bool {
    if !can_act(player, game) {
        return false;
    }
    let hand_index = game.current_hand_index;
    let bet = player.bet_for(hand_index);
    !player.has_acted(hand_index)
        && player.hand_for(hand_index).size() == 2
        && bet > 0
        && player.chips >= bet
}

pub fn can_split(player: &Player, game: &Game) -> bool {
    if !can_act(player, game) {
        return false;
    }
    game.current_hand_index == 0
        && !player.has_split
        && player.hand.can_split()
        && player.bet > 0
        && player.chips >= player.bet
}
