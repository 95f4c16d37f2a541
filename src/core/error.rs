use thiserror::Error;

#[derive(Error, Debug)]
pub enum MechlabError {
    #[error("Pulse train period must be positive, got {0}")]
    NonPositivePeriod(f64),

    #[error("Weapon is not jam capable: {0}")]
    NotJamCapable(String),

    #[error("Range factor must be non-negative, got {0}")]
    NegativeRangeFactor(f64),

    #[error("Invalid critical roll table: {0}")]
    InvalidRollTable(String),

    #[error("Invalid simulation tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T> = std::result::Result<T, MechlabError>;
