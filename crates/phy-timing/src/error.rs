//! Error types for the airtime engine

use phy_mode::{CodeRate, ModulationClass, Preamble};
use thiserror::Error;

use crate::aggregation::MpduPosition;

/// Errors raised while computing durations
///
/// All of these describe a caller or configuration mistake. None of them is
/// transient, so retrying the same call yields the same error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimingError {
    /// The class has no rule for the requested computation
    #[error("{operation} is not defined for {class}")]
    UnsupportedModulationClass {
        /// Class of the payload mode
        class: ModulationClass,
        /// Computation that was requested
        operation: &'static str,
    },

    /// Aggregate position and preamble contradict each other
    #[error("inconsistent aggregation: {position} MPDU with {preamble} preamble")]
    InconsistentAggregation {
        /// Position of the frame in its aggregate
        position: MpduPosition,
        /// Preamble the frame was given
        preamble: Preamble,
    },

    /// The closing frame of an aggregate found nothing, or too much, accumulated
    #[error(
        "aggregate accumulator underflow: {accumulated_symbols} symbols accumulated, closing total {closing_symbols}"
    )]
    AccumulatorUnderflow {
        /// Symbols recorded by the earlier frames
        accumulated_symbols: f64,
        /// Whole symbols the complete aggregate occupies
        closing_symbols: f64,
    },

    /// The class has no block layout for this constellation
    #[error("unsupported constellation size {constellation_size} for {class}")]
    UnsupportedConstellation {
        /// Class of the payload mode
        class: ModulationClass,
        /// Constellation size of the payload mode
        constellation_size: u16,
    },

    /// The class has no coding rule for this code rate
    #[error("unsupported code rate {code_rate} for {class}")]
    UnsupportedCodeRate {
        /// Class of the payload mode
        class: ModulationClass,
        /// Code rate of the payload mode
        code_rate: CodeRate,
    },

    /// Payload too small for the class framing
    #[error("{class} payload of {size} bytes is shorter than the {minimum} byte minimum")]
    PayloadTooShort {
        /// Class of the payload mode
        class: ModulationClass,
        /// Requested payload size
        size: u32,
        /// Smallest size the class can frame
        minimum: u32,
    },
}
