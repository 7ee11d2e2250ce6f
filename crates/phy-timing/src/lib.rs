//! 802.11 Airtime Engine
//!
//! This crate computes how long a PPDU occupies the medium, field by field,
//! for every modulation class described by `phy_mode`.
//!
//! # Architecture
//!
//! A PPDU is timed as the sum of:
//!
//! - **Preamble and header fields**: legacy preamble, L-SIG/SIGNAL, HT-SIG,
//!   HT/VHT training fields and VHT-SIG-A/B ([`plcp`])
//! - **Payload**: SERVICE, PSDU and tail bits rounded to whole symbols,
//!   or the block/codeword layout of the DMG PHYs ([`payload`], [`dmg`])
//!
//! # Aggregation
//!
//! MPDUs inside an A-MPDU share one preamble and one tail. Their payload
//! durations are computed with an [`AmpduAccumulator`] that the caller owns
//! and passes to every call, so the last MPDU rounds the whole aggregate up
//! to a symbol boundary:
//!
//! - [`MpduPosition::FirstInAggregate`] carries the preamble
//! - [`MpduPosition::MiddleInAggregate`] and [`MpduPosition::LastInAggregate`]
//!   use [`Preamble::None`](phy_mode::Preamble::None)
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use phy_mode::{catalog, Preamble, TxVector};
//! use phy_timing::{total_tx_duration, tx_duration, AmpduAccumulator, MpduPosition};
//!
//! let tx = TxVector::new(catalog::OFDM_RATE_54MBPS);
//! let single = tx_duration(1000, &tx, Preamble::Long, 5180).unwrap();
//! assert_eq!(single, Duration::from_micros(172));
//!
//! // The same 1000 bytes sent as two aggregated MPDUs
//! let mut acc = AmpduAccumulator::new();
//! let first = total_tx_duration(
//!     500, &tx, Preamble::Long, 5180, MpduPosition::FirstInAggregate, &mut acc,
//! ).unwrap();
//! let last = total_tx_duration(
//!     500, &tx, Preamble::None, 5180, MpduPosition::LastInAggregate, &mut acc,
//! ).unwrap();
//! assert_eq!(first + last, single);
//! ```

pub mod aggregation;
pub mod dmg;
pub mod encoders;
pub mod engine;
pub mod error;
pub mod payload;
pub mod plcp;

pub use aggregation::{AmpduAccumulator, MpduPosition};
pub use dmg::transmitted_bits;
pub use encoders::bcc_encoders;
pub use engine::{payload_duration, total_tx_duration, tx_duration};
pub use error::TimingError;
pub use payload::{payload_timing, PayloadTiming};
pub use plcp::{
    header_duration, ht_sig_duration, preamble_and_header_duration, preamble_duration,
    training_symbol_duration, vht_sig_a1_duration, vht_sig_a2_duration, vht_sig_b_duration,
};
