use thiserror::Error;

/// Why a command was refused. A rejected command leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("tower cannot be placed there")]
    InvalidPlacement,
    #[error("not enough money: need {cost}, have {have}")]
    InsufficientFunds { cost: u32, have: u32 },
    #[error("tower is already at max level {level}")]
    MaxLevel { level: u8 },
    #[error("no such tower")]
    UnknownTower,
    #[error("a wave is already in progress")]
    WaveInProgress,
    #[error("game is over")]
    GameOver,
}
