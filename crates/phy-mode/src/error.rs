//! Error types for mode lookup

use thiserror::Error;

use crate::ModulationClass;

/// Errors raised while resolving modes from the catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// No descriptor carries this name
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// MCS index outside the range defined for the class
    #[error("invalid {class} MCS index: {index}")]
    InvalidMcsIndex {
        /// Class the index was looked up in
        class: ModulationClass,
        /// Requested index
        index: u8,
    },

    /// No preamble carries this name
    #[error("unknown preamble: {0}")]
    UnknownPreamble(String),

    /// The class has no PLCP header mode
    #[error("no PLCP header mode for {0}")]
    NoHeaderMode(ModulationClass),
}
