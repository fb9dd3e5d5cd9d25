#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Need at least {needed} studied cards for a challenge, have {have}")]
    NotEnoughStudied { needed: usize, have: usize },

    #[error("No active challenge")]
    NoActiveChallenge,
}
