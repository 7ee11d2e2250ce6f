//! Whole-PPDU airtime
//!
//! These entry points combine the preamble/header fields with the payload
//! and apply the aggregate bookkeeping to the caller's accumulator.

use std::time::Duration;

use phy_mode::{Preamble, TxVector};
use tracing::debug;

use crate::aggregation::{AmpduAccumulator, MpduPosition};
use crate::error::TimingError;
use crate::payload::payload_timing;
use crate::plcp::preamble_and_header_duration;

/// Payload duration of one frame, recorded into `accumulator`
///
/// First and middle frames of an aggregate add themselves to the
/// accumulator, the last frame resets it. To compute a duration without
/// changing the accumulator, use [`payload_timing`] directly.
pub fn payload_duration(
    size: u32,
    tx: &TxVector,
    preamble: Preamble,
    frequency_mhz: u16,
    position: MpduPosition,
    accumulator: &mut AmpduAccumulator,
) -> Result<Duration, TimingError> {
    let timing = payload_timing(size, tx, preamble, frequency_mhz, position, accumulator)?;
    if let Some(symbols) = timing.symbols {
        accumulator.record(position, size, symbols);
    }
    Ok(timing.duration)
}

/// Time on air of one frame: preamble, header fields and payload
///
/// Frames after the first in an aggregate use [`Preamble::None`] and so
/// only contribute their payload.
pub fn total_tx_duration(
    size: u32,
    tx: &TxVector,
    preamble: Preamble,
    frequency_mhz: u16,
    position: MpduPosition,
    accumulator: &mut AmpduAccumulator,
) -> Result<Duration, TimingError> {
    let payload = payload_duration(size, tx, preamble, frequency_mhz, position, accumulator)?;
    let total = preamble_and_header_duration(tx, preamble) + payload;
    debug!(
        "{} {} bytes ({}, {} preamble) at {} MHz: {:?}",
        tx.mode, size, position, preamble, frequency_mhz, total
    );
    Ok(total)
}

/// Time on air of a frame that is not part of an aggregate
pub fn tx_duration(
    size: u32,
    tx: &TxVector,
    preamble: Preamble,
    frequency_mhz: u16,
) -> Result<Duration, TimingError> {
    let timing = payload_timing(
        size,
        tx,
        preamble,
        frequency_mhz,
        MpduPosition::Normal,
        &AmpduAccumulator::new(),
    )?;
    Ok(preamble_and_header_duration(tx, preamble) + timing.duration)
}
