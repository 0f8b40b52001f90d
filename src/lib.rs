mod card;
mod config;
mod deck;
mod decision;
mod error;
mod game;
mod hand;
mod player;
mod supervisor;

pub use card::{Card, Rank, Suit};
pub use config::{TableConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use deck::{Deck, RESHUFFLE_THRESHOLD};
pub use decision::{can_double_down, can_hit, can_split, can_stand};
pub use error::EngineError;
pub use game::{Game, RoundPhase};
pub use hand::{
    calculate_hand_value, can_split_cards, is_blackjack, is_busted, is_soft_hand, Hand, HandStatus,
    Outcome,
};
pub use player::{Dealer, Player};
pub use supervisor::{MatchSupervisor, MatchVerdict};
