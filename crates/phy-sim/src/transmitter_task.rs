//! Virtual transmitter actor task
//!
//! This module provides an async task that owns a VirtualTransmitter and
//! receives transmit requests over an mpsc channel. Every PPDU sent emits an
//! [`AirtimeEvent`] on a broadcast channel.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::error::SimError;
use crate::VirtualTransmitter;

/// Commands that can be sent to a virtual transmitter actor
#[derive(Debug, Clone)]
pub enum TransmitterCommand {
    /// Send one PPDU carrying a single MPDU of the given size
    Transmit(u32),
    /// Send one A-MPDU with the given MPDU sizes
    TransmitAggregate(Vec<u32>),
    /// Drop any aggregate in progress
    ClearAggregate,
    /// Shutdown the transmitter actor
    Shutdown,
}

/// Event emitted for every PPDU a transmitter sends
#[derive(Debug, Clone, PartialEq)]
pub struct AirtimeEvent {
    /// Transmitter identifier
    pub transmitter: String,
    /// MPDUs carried by the PPDU
    pub mpdus: usize,
    /// Payload bytes carried by the PPDU
    pub bytes: u64,
    /// Time on air
    pub airtime: Duration,
}

/// Run the virtual transmitter actor task
///
/// The task ends when the command channel closes or a shutdown command
/// arrives, and hands the transmitter back so its statistics can be read.
/// A failed transmission ends the task with that error.
pub async fn run_transmitter_task(
    mut transmitter: VirtualTransmitter,
    mut cmd_rx: mpsc::Receiver<TransmitterCommand>,
    event_tx: broadcast::Sender<AirtimeEvent>,
) -> Result<VirtualTransmitter, SimError> {
    info!("Starting transmitter task for {}", transmitter.id());

    while let Some(cmd) = cmd_rx.recv().await {
        let sizes = match cmd {
            TransmitterCommand::Transmit(size) => vec![size],
            TransmitterCommand::TransmitAggregate(sizes) => sizes,
            TransmitterCommand::ClearAggregate => {
                transmitter.clear_aggregate();
                continue;
            }
            TransmitterCommand::Shutdown => {
                info!("Shutdown requested for transmitter {}", transmitter.id());
                break;
            }
        };

        let airtime = match transmitter.transmit_aggregate(&sizes) {
            Ok(airtime) => airtime,
            Err(e) => {
                warn!("Transmitter {} failed: {}", transmitter.id(), e);
                return Err(e);
            }
        };

        let event = AirtimeEvent {
            transmitter: transmitter.id().to_string(),
            mpdus: sizes.len(),
            bytes: sizes.iter().map(|&s| u64::from(s)).sum(),
            airtime,
        };
        debug!(
            "Transmitter {} PPDU: {} MPDU(s), {} bytes, {:?}",
            event.transmitter, event.mpdus, event.bytes, event.airtime
        );
        // No subscribers is fine
        let _ = event_tx.send(event);
    }

    info!("Transmitter task ended for {}", transmitter.id());
    Ok(transmitter)
}
