//! Error types for transmitter simulation

use phy_mode::ModeError;
use phy_timing::TimingError;
use thiserror::Error;

/// Errors raised while configuring or running virtual transmitters
#[derive(Debug, Error)]
pub enum SimError {
    #[error("airtime computation failed: {0}")]
    Timing(#[from] TimingError),

    #[error("mode lookup failed: {0}")]
    Mode(#[from] ModeError),

    #[error("invalid transmission vector: {0}")]
    InvalidTxVector(String),

    #[error("aggregate contains no MPDUs")]
    EmptyAggregate,

    #[error("unknown transmitter: {0}")]
    UnknownTransmitter(String),

    #[error("duplicate transmitter: {0}")]
    DuplicateTransmitter(String),

    #[error("transmitter task for {0} stopped unexpectedly")]
    TaskStopped(String),

    #[error("scenario I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Json(#[from] serde_json::Error),
}
