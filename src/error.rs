use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The draw cursor reached the end of the deck. The reshuffle policy
    /// keeps this out of normal play; hitting it means an invariant broke.
    #[error("deck exhausted")]
    DeckExhausted,
    #[error("invalid bet: {0}")]
    InvalidBet(&'static str),
    #[error("illegal action: {0}")]
    IllegalAction(&'static str),
}
