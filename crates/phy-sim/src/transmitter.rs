//! Virtual transmitter
//!
//! A transmitter sends PPDUs with one fixed transmission vector and keeps
//! its own A-MPDU accumulator, so aggregates from different transmitters
//! never interfere with each other.

use std::time::Duration;

use phy_mode::{catalog, ModulationClass, Preamble, TxVector, WifiMode};
use phy_timing::{total_tx_duration, transmitted_bits, AmpduAccumulator, MpduPosition};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SimError;

/// Configuration for creating a virtual transmitter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransmitterConfig {
    /// Display name/identifier
    pub id: String,
    /// Payload mode, by its catalog name
    pub mode: WifiMode,
    /// Channel width in MHz, the mode's usual width when absent
    #[serde(default)]
    pub channel_width_mhz: Option<u16>,
    /// Number of spatial streams
    #[serde(default = "default_nss")]
    pub nss: u8,
    /// Number of extension spatial streams
    #[serde(default)]
    pub ness: u8,
    /// Short guard interval
    #[serde(default)]
    pub short_guard_interval: bool,
    /// Space-time block coding
    #[serde(default)]
    pub stbc: bool,
    /// DMG training field length
    #[serde(default)]
    pub training_field_length: u16,
    /// Operating frequency in MHz
    #[serde(default = "default_frequency")]
    pub frequency_mhz: u16,
    /// Preamble, the mode's usual preamble when absent
    #[serde(default)]
    pub preamble: Option<Preamble>,
}

fn default_nss() -> u8 {
    1
}

fn default_frequency() -> u16 {
    5180
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            id: "Virtual Transmitter".to_string(),
            mode: catalog::OFDM_RATE_6MBPS,
            channel_width_mhz: None,
            nss: 1,
            ness: 0,
            short_guard_interval: false,
            stbc: false,
            training_field_length: 0,
            frequency_mhz: 5180, // channel 36
            preamble: None,
        }
    }
}

impl TransmitterConfig {
    /// Build the transmission vector described by this configuration
    pub fn tx_vector(&self) -> TxVector {
        let mut tx = TxVector::new(self.mode)
            .with_nss(self.nss)
            .with_ness(self.ness)
            .with_short_guard_interval(self.short_guard_interval)
            .with_stbc(self.stbc)
            .with_training_field_length(self.training_field_length);
        if let Some(width) = self.channel_width_mhz {
            tx = tx.with_channel_width(width);
        }
        tx
    }
}

/// Preamble a PPDU of this class carries when none is configured
pub fn default_preamble(class: ModulationClass) -> Preamble {
    match class {
        ModulationClass::Dsss
        | ModulationClass::HrDsss
        | ModulationClass::ErpOfdm
        | ModulationClass::Ofdm => Preamble::Long,
        ModulationClass::Ht => Preamble::HtMixed,
        ModulationClass::Vht => Preamble::Vht,
        ModulationClass::DmgCtrl
        | ModulationClass::DmgSc
        | ModulationClass::DmgOfdm
        | ModulationClass::DmgLpSc => Preamble::Dmg,
    }
}

/// Running totals for one transmitter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmitterStats {
    /// PPDUs sent, each aggregate counting once
    pub ppdus: u64,
    /// MPDUs sent
    pub mpdus: u64,
    /// Payload bytes sent
    pub bytes: u64,
    /// Total time on air in nanoseconds
    pub airtime_ns: u64,
    /// Bits put on air by DMG SC and OFDM PPDUs
    pub transmitted_bits: u64,
}

impl TransmitterStats {
    /// Total time on air
    pub fn airtime(&self) -> Duration {
        Duration::from_nanos(self.airtime_ns)
    }

    fn record_ppdu(&mut self, sizes: &[u32], airtime: Duration, bits: u64) {
        self.ppdus += 1;
        self.mpdus += sizes.len() as u64;
        self.bytes += sizes.iter().map(|&s| u64::from(s)).sum::<u64>();
        self.airtime_ns += airtime.as_nanos() as u64;
        self.transmitted_bits += bits;
    }
}

/// A simulated transmitter that times every PPDU it sends
#[derive(Debug)]
pub struct VirtualTransmitter {
    /// Unique identifier for this transmitter
    id: String,
    /// Transmission vector used for every PPDU
    tx: TxVector,
    /// Operating frequency in MHz
    frequency_mhz: u16,
    /// Preamble carried by each PPDU
    preamble: Preamble,
    /// Aggregate in progress
    accumulator: AmpduAccumulator,
    /// Running totals
    stats: TransmitterStats,
    /// Time on air of the most recent PPDU
    last_tx_duration: Duration,
}

impl VirtualTransmitter {
    /// Create a transmitter, rejecting forbidden transmission vectors
    pub fn new(config: TransmitterConfig) -> Result<Self, SimError> {
        let tx = config.tx_vector();
        if !tx.is_valid() {
            return Err(SimError::InvalidTxVector(format!(
                "{} at {} MHz with {} streams",
                tx.mode, tx.channel_width_mhz, tx.nss
            )));
        }
        let preamble = config
            .preamble
            .unwrap_or_else(|| default_preamble(tx.mode.class()));
        if !preamble.is_present() {
            return Err(SimError::InvalidTxVector(format!(
                "{} needs a preamble",
                config.id
            )));
        }
        info!(
            "Created transmitter {} ({} at {} MHz, {} MHz wide, {} preamble)",
            config.id, tx.mode, config.frequency_mhz, tx.channel_width_mhz, preamble
        );
        Ok(Self {
            id: config.id,
            tx,
            frequency_mhz: config.frequency_mhz,
            preamble,
            accumulator: AmpduAccumulator::new(),
            stats: TransmitterStats::default(),
            last_tx_duration: Duration::ZERO,
        })
    }

    /// Get the transmitter's unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the transmission vector
    pub fn tx_vector(&self) -> &TxVector {
        &self.tx
    }

    /// Get the operating frequency in MHz
    pub fn frequency_mhz(&self) -> u16 {
        self.frequency_mhz
    }

    /// Get the preamble carried by each PPDU
    pub fn preamble(&self) -> Preamble {
        self.preamble
    }

    /// Get the aggregate in progress
    pub fn accumulator(&self) -> &AmpduAccumulator {
        &self.accumulator
    }

    /// Get the running totals
    pub fn stats(&self) -> TransmitterStats {
        self.stats
    }

    /// Get the time on air of the most recent PPDU
    pub fn last_tx_duration(&self) -> Duration {
        self.last_tx_duration
    }

    /// Send one PPDU carrying a single MPDU
    pub fn transmit(&mut self, size: u32) -> Result<Duration, SimError> {
        let airtime = total_tx_duration(
            size,
            &self.tx,
            self.preamble,
            self.frequency_mhz,
            MpduPosition::Normal,
            &mut self.accumulator,
        )?;
        let bits = self.dmg_bits(size)?;
        self.finish_ppdu(&[size], airtime, bits);
        Ok(airtime)
    }

    /// Send one A-MPDU, returning its total time on air
    ///
    /// A single MPDU is sent as a normal PPDU. If any MPDU fails the
    /// aggregate is abandoned and the accumulator cleared.
    pub fn transmit_aggregate(&mut self, sizes: &[u32]) -> Result<Duration, SimError> {
        match sizes {
            [] => Err(SimError::EmptyAggregate),
            [size] => self.transmit(*size),
            _ => {
                let airtime = match self.send_mpdus(sizes) {
                    Ok(airtime) => airtime,
                    Err(e) => {
                        warn!("Transmitter {} abandoned aggregate: {}", self.id, e);
                        self.accumulator.clear();
                        return Err(e);
                    }
                };
                // Each DMG MPDU is timed on its own, so its bits are too
                let bits = sizes
                    .iter()
                    .map(|&size| self.dmg_bits(size))
                    .sum::<Result<u64, SimError>>()?;
                self.finish_ppdu(sizes, airtime, bits);
                Ok(airtime)
            }
        }
    }

    /// Drop the aggregate in progress
    pub fn clear_aggregate(&mut self) {
        if !self.accumulator.is_empty() {
            debug!(
                "Transmitter {} clearing {} accumulated bytes",
                self.id,
                self.accumulator.size_bytes()
            );
        }
        self.accumulator.clear();
    }

    fn send_mpdus(&mut self, sizes: &[u32]) -> Result<Duration, SimError> {
        let last = sizes.len() - 1;
        let mut airtime = Duration::ZERO;
        for (i, &size) in sizes.iter().enumerate() {
            let (position, preamble) = match i {
                0 => (MpduPosition::FirstInAggregate, self.preamble),
                i if i == last => (MpduPosition::LastInAggregate, Preamble::None),
                _ => (MpduPosition::MiddleInAggregate, Preamble::None),
            };
            airtime += total_tx_duration(
                size,
                &self.tx,
                preamble,
                self.frequency_mhz,
                position,
                &mut self.accumulator,
            )?;
        }
        Ok(airtime)
    }

    fn dmg_bits(&self, size: u32) -> Result<u64, SimError> {
        match self.tx.mode.class() {
            ModulationClass::DmgSc | ModulationClass::DmgOfdm => {
                Ok(transmitted_bits(size, &self.tx)?)
            }
            _ => Ok(0),
        }
    }

    fn finish_ppdu(&mut self, sizes: &[u32], airtime: Duration, bits: u64) {
        self.stats.record_ppdu(sizes, airtime, bits);
        self.last_tx_duration = airtime;
        debug!(
            "Transmitter {} sent {} MPDU(s) in {:?}",
            self.id,
            sizes.len(),
            airtime
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phy_timing::tx_duration;

    fn config(mode: WifiMode) -> TransmitterConfig {
        TransmitterConfig {
            id: "test".to_string(),
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_transmit_single_frame() {
        let mut tx = VirtualTransmitter::new(config(catalog::OFDM_RATE_54MBPS)).unwrap();
        assert_eq!(tx.transmit(1000).unwrap(), Duration::from_micros(172));
        assert_eq!(tx.last_tx_duration(), Duration::from_micros(172));

        let stats = tx.stats();
        assert_eq!(stats.ppdus, 1);
        assert_eq!(stats.mpdus, 1);
        assert_eq!(stats.bytes, 1000);
        assert_eq!(stats.airtime(), Duration::from_micros(172));
        assert_eq!(stats.transmitted_bits, 0);
    }

    #[test]
    fn test_aggregate_matches_single_frame() {
        let mut tx = VirtualTransmitter::new(config(catalog::OFDM_RATE_54MBPS)).unwrap();
        let airtime = tx.transmit_aggregate(&[250, 250, 500]).unwrap();
        assert_eq!(airtime, Duration::from_micros(172));
        assert!(tx.accumulator().is_empty());
        assert_eq!(tx.stats().ppdus, 1);
        assert_eq!(tx.stats().mpdus, 3);
    }

    #[test]
    fn test_single_frame_aggregate_is_normal() {
        let mut tx = VirtualTransmitter::new(config(catalog::HT_MCS7)).unwrap();
        let airtime = tx.transmit_aggregate(&[1500]).unwrap();
        assert_eq!(
            airtime,
            tx_duration(1500, tx.tx_vector(), Preamble::HtMixed, 5180).unwrap()
        );
    }

    #[test]
    fn test_empty_aggregate() {
        let mut tx = VirtualTransmitter::new(config(catalog::HT_MCS7)).unwrap();
        assert!(matches!(
            tx.transmit_aggregate(&[]),
            Err(SimError::EmptyAggregate)
        ));
        assert_eq!(tx.stats(), TransmitterStats::default());
    }

    #[test]
    fn test_default_preambles() {
        assert_eq!(default_preamble(ModulationClass::HrDsss), Preamble::Long);
        assert_eq!(default_preamble(ModulationClass::Ht), Preamble::HtMixed);
        assert_eq!(default_preamble(ModulationClass::Vht), Preamble::Vht);
        assert_eq!(default_preamble(ModulationClass::DmgLpSc), Preamble::Dmg);

        let tx = VirtualTransmitter::new(config(catalog::VHT_MCS3)).unwrap();
        assert_eq!(tx.preamble(), Preamble::Vht);
    }

    #[test]
    fn test_rejects_forbidden_vector() {
        let result = VirtualTransmitter::new(TransmitterConfig {
            channel_width_mhz: Some(20),
            ..config(catalog::VHT_MCS9)
        });
        assert!(matches!(result, Err(SimError::InvalidTxVector(_))));
    }

    #[test]
    fn test_rejects_missing_preamble() {
        let result = VirtualTransmitter::new(TransmitterConfig {
            preamble: Some(Preamble::None),
            ..config(catalog::OFDM_RATE_6MBPS)
        });
        assert!(matches!(result, Err(SimError::InvalidTxVector(_))));
    }

    #[test]
    fn test_dmg_transmitted_bits() {
        let mut tx = VirtualTransmitter::new(TransmitterConfig {
            frequency_mhz: 60480,
            ..config(catalog::DMG_MCS13)
        })
        .unwrap();
        tx.transmit(1000).unwrap();
        tx.transmit(1000).unwrap();
        assert_eq!(tx.stats().transmitted_bits, 2 * 20_128);
        assert_eq!(tx.stats().airtime(), Duration::from_nanos(2 * 13_749));
    }

    #[test]
    fn test_dmg_aggregate_bits_are_per_mpdu() {
        let mut tx = VirtualTransmitter::new(TransmitterConfig {
            frequency_mhz: 60480,
            ..config(catalog::DMG_MCS13)
        })
        .unwrap();
        tx.transmit_aggregate(&[1000, 1000]).unwrap();
        assert_eq!(tx.stats().transmitted_bits, 2 * 20_128);
        assert_eq!(tx.stats().mpdus, 2);
    }

    #[test]
    fn test_dmg_aggregate_larger_than_u32() {
        let mut tx = VirtualTransmitter::new(TransmitterConfig {
            frequency_mhz: 60480,
            ..config(catalog::DMG_MCS12)
        })
        .unwrap();
        let sizes = [u32::MAX - 10, 100];
        tx.transmit_aggregate(&sizes).unwrap();
        let stats = tx.stats();
        assert_eq!(stats.bytes, u64::from(u32::MAX) + 90);
        assert_eq!(
            stats.transmitted_bits,
            transmitted_bits(sizes[0], tx.tx_vector()).unwrap()
                + transmitted_bits(sizes[1], tx.tx_vector()).unwrap()
        );
        assert!(tx.accumulator().is_empty());
    }

    #[test]
    fn test_failed_aggregate_clears_accumulator() {
        let mut tx = VirtualTransmitter::new(TransmitterConfig {
            frequency_mhz: 60480,
            ..config(catalog::DMG_MCS0)
        })
        .unwrap();
        // The control PHY rejects the short second MPDU
        assert!(tx.transmit_aggregate(&[100, 2]).is_err());
        assert!(tx.accumulator().is_empty());
        assert_eq!(tx.stats().ppdus, 0);
    }

    #[test]
    fn test_clear_aggregate() {
        let mut tx = VirtualTransmitter::new(config(catalog::HT_MCS3)).unwrap();
        tx.clear_aggregate();
        assert!(tx.accumulator().is_empty());
    }
}
