//! Crate error type
//!
//! The simulation itself never fails; these cover loading tuning files and
//! spending resources from the ledger.

use crate::sim::ResourceKind;

/// Errors raised outside the per-tick simulation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reading a tuning file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tuning values are out of range
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// A spend asked for more than the ledger holds
    #[error("not enough {kind}: need {needed}, have {available}")]
    InsufficientResources {
        kind: ResourceKind,
        needed: u32,
        available: u32,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
