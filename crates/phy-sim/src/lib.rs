//! 802.11 Transmitter Simulation Library
//!
//! This crate drives the airtime engine with simulated transmitters. It
//! includes:
//!
//! - **VirtualTransmitter**: Sends PPDUs and A-MPDUs with a fixed
//!   transmission vector, owning its aggregate state
//! - **Transmitter tasks**: Async actors that own a transmitter and take
//!   transmit requests over a channel
//! - **Scenario**: JSON-described transmitters and bursts, run to an
//!   [`AirtimeReport`]
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use phy_mode::catalog;
//! use phy_sim::{TransmitterConfig, VirtualTransmitter};
//!
//! let mut ap = VirtualTransmitter::new(TransmitterConfig {
//!     id: "AP".to_string(),
//!     mode: catalog::OFDM_RATE_54MBPS,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! // Two aggregated MPDUs take as long as one frame of the same total size
//! let airtime = ap.transmit_aggregate(&[500, 500]).unwrap();
//! assert_eq!(airtime, Duration::from_micros(172));
//! assert_eq!(ap.stats().mpdus, 2);
//! ```

pub mod error;
pub mod scenario;
pub mod transmitter;
pub mod transmitter_task;

pub use error::SimError;
pub use scenario::{AirtimeReport, BurstConfig, Scenario, TransmitterReport};
pub use transmitter::{TransmitterConfig, TransmitterStats, VirtualTransmitter};
pub use transmitter_task::{run_transmitter_task, AirtimeEvent, TransmitterCommand};
