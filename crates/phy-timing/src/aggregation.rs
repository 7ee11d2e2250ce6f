//! A-MPDU aggregation state
//!
//! Frames inside an aggregate share one preamble and one tail, so only the
//! closing frame can round the aggregate up to a whole number of symbols.
//! Earlier frames report their fractional symbol counts, which are summed in
//! an [`AmpduAccumulator`] owned by the transmitter and handed to every call.

use std::fmt;

use phy_mode::Preamble;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TimingError;

/// Position of an MPDU relative to its aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MpduPosition {
    /// Not aggregated
    #[default]
    Normal,
    /// First (or only) MPDU of an aggregate
    FirstInAggregate,
    /// Any MPDU between the first and the last
    MiddleInAggregate,
    /// Closing MPDU of an aggregate
    LastInAggregate,
}

impl MpduPosition {
    /// Whether a frame at this position carries its own preamble
    pub fn carries_preamble(&self) -> bool {
        matches!(self, MpduPosition::Normal | MpduPosition::FirstInAggregate)
    }

    /// Reject position/preamble pairs that cannot occur on air
    ///
    /// Normal and first frames need a preamble; middle and last frames ride
    /// on the preamble of the first and must use [`Preamble::None`].
    pub fn check_preamble(&self, preamble: Preamble) -> Result<(), TimingError> {
        if self.carries_preamble() == preamble.is_present() {
            Ok(())
        } else {
            Err(TimingError::InconsistentAggregation {
                position: *self,
                preamble,
            })
        }
    }
}

impl fmt::Display for MpduPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MpduPosition::Normal => "normal",
            MpduPosition::FirstInAggregate => "first",
            MpduPosition::MiddleInAggregate => "middle",
            MpduPosition::LastInAggregate => "last",
        };
        f.write_str(name)
    }
}

/// Running totals of the aggregate being transmitted
///
/// `symbols` is fractional because first and middle frames are not rounded.
/// It never exceeds the symbol count implied by `size_bytes` and returns to
/// zero once the closing frame is recorded or the aggregate is cleared.
/// Each transmitter owns exactly one accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AmpduAccumulator {
    size_bytes: u64,
    symbols: f64,
}

impl AmpduAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of the MPDUs recorded so far
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Fractional symbols of the MPDUs recorded so far
    pub fn symbols(&self) -> f64 {
        self.symbols
    }

    /// True when no MPDU has been recorded since the last reset
    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0 && self.symbols == 0.0
    }

    /// Drop the aggregate in progress
    pub fn clear(&mut self) {
        self.size_bytes = 0;
        self.symbols = 0.0;
    }

    /// Apply the effect of one transmitted MPDU
    ///
    /// First and middle frames add their size and symbols, the last frame
    /// closes the aggregate, normal frames leave the state untouched.
    pub fn record(&mut self, position: MpduPosition, size: u32, symbols: f64) {
        match position {
            MpduPosition::FirstInAggregate | MpduPosition::MiddleInAggregate => {
                self.size_bytes += u64::from(size);
                self.symbols += symbols;
                trace!(
                    "aggregate now {} bytes over {:.3} symbols",
                    self.size_bytes,
                    self.symbols
                );
            }
            MpduPosition::LastInAggregate => {
                trace!("aggregate closed after {} bytes", self.size_bytes + u64::from(size));
                self.clear();
            }
            MpduPosition::Normal => {}
        }
    }
}
