//! Airtime scenarios
//!
//! A scenario names a set of transmitters and the bursts each one sends.
//! Running it spawns one transmitter task per transmitter and collects the
//! final statistics into an [`AirtimeReport`].

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use phy_mode::WifiMode;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::error::SimError;
use crate::transmitter::{TransmitterConfig, TransmitterStats, VirtualTransmitter};
use crate::transmitter_task::{run_transmitter_task, AirtimeEvent, TransmitterCommand};

/// Capacity of each transmitter's command channel
const COMMAND_CHANNEL_SIZE: usize = 32;

/// A burst of PPDUs from one transmitter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BurstConfig {
    /// Identifier of the sending transmitter
    pub transmitter: String,
    /// MPDU sizes of one PPDU; more than one size forms an A-MPDU
    pub sizes: Vec<u32>,
    /// Number of times the PPDU is sent
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

/// Transmitters and the bursts they send
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Scenario name, for display
    #[serde(default)]
    pub name: String,
    /// Transmitters taking part
    pub transmitters: Vec<TransmitterConfig>,
    /// Bursts, sent in order per transmitter
    #[serde(default)]
    pub bursts: Vec<BurstConfig>,
}

impl Scenario {
    /// Parse a scenario from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Run the scenario and report the airtime of every transmitter
    pub async fn run(&self) -> Result<AirtimeReport, SimError> {
        let (event_tx, _) = broadcast::channel(1);
        self.run_with_events(event_tx).await
    }

    /// Run the scenario, publishing every PPDU on `event_tx`
    pub async fn run_with_events(
        &self,
        event_tx: broadcast::Sender<AirtimeEvent>,
    ) -> Result<AirtimeReport, SimError> {
        let transmitters = self.build_transmitters()?;
        info!(
            "Running scenario '{}' with {} transmitters and {} bursts",
            self.name,
            transmitters.len(),
            self.bursts.len()
        );

        let mut senders = HashMap::new();
        let mut handles = Vec::with_capacity(transmitters.len());
        for transmitter in transmitters {
            let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
            let id = transmitter.id().to_string();
            let handle = tokio::spawn(run_transmitter_task(
                transmitter,
                cmd_rx,
                event_tx.clone(),
            ));
            senders.insert(id.clone(), cmd_tx);
            handles.push((id, handle));
        }

        for burst in &self.bursts {
            let Some(cmd_tx) = senders.get(&burst.transmitter) else {
                return Err(SimError::UnknownTransmitter(burst.transmitter.clone()));
            };
            for _ in 0..burst.repeat {
                let cmd = TransmitterCommand::TransmitAggregate(burst.sizes.clone());
                if cmd_tx.send(cmd).await.is_err() {
                    // The task already ended; its error is collected below
                    debug!("Transmitter {} stopped accepting bursts", burst.transmitter);
                    break;
                }
            }
        }
        drop(senders);

        let mut report = AirtimeReport {
            scenario: self.name.clone(),
            transmitters: Vec::with_capacity(handles.len()),
        };
        for (id, handle) in handles {
            let transmitter = handle
                .await
                .map_err(|_| SimError::TaskStopped(id))??;
            report.transmitters.push(TransmitterReport::from(&transmitter));
        }
        info!(
            "Scenario '{}' finished: {:?} total airtime",
            self.name,
            report.total_airtime()
        );
        Ok(report)
    }

    /// Create every transmitter, checking identifiers before anything runs
    fn build_transmitters(&self) -> Result<Vec<VirtualTransmitter>, SimError> {
        let mut seen = HashSet::new();
        for config in &self.transmitters {
            if !seen.insert(config.id.as_str()) {
                return Err(SimError::DuplicateTransmitter(config.id.clone()));
            }
        }
        if let Some(burst) = self
            .bursts
            .iter()
            .find(|b| !seen.contains(b.transmitter.as_str()))
        {
            return Err(SimError::UnknownTransmitter(burst.transmitter.clone()));
        }
        self.transmitters
            .iter()
            .cloned()
            .map(VirtualTransmitter::new)
            .collect()
    }
}

/// Final statistics of one transmitter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransmitterReport {
    /// Transmitter identifier
    pub id: String,
    /// Payload mode
    pub mode: WifiMode,
    /// Running totals at the end of the scenario
    pub stats: TransmitterStats,
    /// Time on air of the last PPDU in nanoseconds
    pub last_tx_duration_ns: u64,
}

impl From<&VirtualTransmitter> for TransmitterReport {
    fn from(transmitter: &VirtualTransmitter) -> Self {
        Self {
            id: transmitter.id().to_string(),
            mode: transmitter.tx_vector().mode,
            stats: transmitter.stats(),
            last_tx_duration_ns: transmitter.last_tx_duration().as_nanos() as u64,
        }
    }
}

/// Airtime of every transmitter in a scenario, in configuration order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirtimeReport {
    /// Scenario name
    pub scenario: String,
    /// One entry per transmitter
    pub transmitters: Vec<TransmitterReport>,
}

impl AirtimeReport {
    /// Sum of the airtime of every transmitter
    pub fn total_airtime(&self) -> Duration {
        self.transmitters.iter().map(|t| t.stats.airtime()).sum()
    }

    /// Report for one transmitter
    pub fn transmitter(&self, id: &str) -> Option<&TransmitterReport> {
        self.transmitters.iter().find(|t| t.id == id)
    }
}

impl fmt::Display for AirtimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scenario.is_empty() {
            writeln!(f, "Scenario: {}", self.scenario)?;
        }
        writeln!(
            f,
            "{:<20} {:<14} {:>8} {:>8} {:>12} {:>16}",
            "transmitter", "mode", "ppdus", "mpdus", "bytes", "airtime"
        )?;
        for t in &self.transmitters {
            writeln!(
                f,
                "{:<20} {:<14} {:>8} {:>8} {:>12} {:>16}",
                t.id,
                t.mode.name(),
                t.stats.ppdus,
                t.stats.mpdus,
                t.stats.bytes,
                format!("{:?}", t.stats.airtime())
            )?;
        }
        write!(f, "total airtime: {:?}", self.total_airtime())
    }
}
