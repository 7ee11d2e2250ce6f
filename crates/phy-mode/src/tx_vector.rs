//! Per-transmission parameter vector

use tracing::debug;

use crate::{ModulationClass, WifiMode};

/// Default channel width for each class, in MHz
fn default_channel_width(mode: &WifiMode) -> u16 {
    match mode.class() {
        ModulationClass::Dsss | ModulationClass::HrDsss => 22,
        ModulationClass::DmgCtrl
        | ModulationClass::DmgSc
        | ModulationClass::DmgOfdm
        | ModulationClass::DmgLpSc => 2160,
        _ => 20,
    }
}

/// Parameters that describe how one PPDU is transmitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxVector {
    /// Payload mode
    pub mode: WifiMode,
    /// Channel width in MHz
    pub channel_width_mhz: u16,
    /// Number of spatial streams
    pub nss: u8,
    /// Number of extension spatial streams
    pub ness: u8,
    /// Short (400 ns) guard interval
    pub short_guard_interval: bool,
    /// Space-time block coding
    pub stbc: bool,
    /// Length of the DMG beam refinement training field, 0 when absent
    pub training_field_length: u16,
}

impl TxVector {
    /// Single-stream vector on the mode's usual channel width
    pub fn new(mode: WifiMode) -> Self {
        Self {
            mode,
            channel_width_mhz: default_channel_width(&mode),
            nss: 1,
            ness: 0,
            short_guard_interval: false,
            stbc: false,
            training_field_length: 0,
        }
    }

    /// Set the channel width in MHz
    pub fn with_channel_width(mut self, channel_width_mhz: u16) -> Self {
        self.channel_width_mhz = channel_width_mhz;
        self
    }

    /// Set the spatial stream count
    pub fn with_nss(mut self, nss: u8) -> Self {
        self.nss = nss;
        self
    }

    /// Set the extension spatial stream count
    pub fn with_ness(mut self, ness: u8) -> Self {
        self.ness = ness;
        self
    }

    /// Enable or disable the short guard interval
    pub fn with_short_guard_interval(mut self, enabled: bool) -> Self {
        self.short_guard_interval = enabled;
        self
    }

    /// Enable or disable STBC
    pub fn with_stbc(mut self, enabled: bool) -> Self {
        self.stbc = enabled;
        self
    }

    /// Request a DMG training field of the given length
    pub fn with_training_field_length(mut self, length: u16) -> Self {
        self.training_field_length = length;
        self
    }

    /// Data rate of this vector in bits per second
    pub fn data_rate(&self) -> u64 {
        self.mode
            .data_rate(self.channel_width_mhz, self.short_guard_interval, self.nss)
    }

    /// Check the vector against the VHT combinations the standard excludes
    ///
    /// Some VHT MCS/width/stream combinations do not produce a whole number
    /// of data bits per symbol and are forbidden. Every other combination,
    /// including every non-VHT vector, is accepted. The duration engine never
    /// calls this itself; unchecked vectors are computed as given.
    pub fn is_valid(&self) -> bool {
        let name = self.mode.name();
        let valid = match (self.channel_width_mhz, self.nss) {
            (20, nss) if nss != 3 && nss != 6 => name != "VhtMcs9",
            (80, 3 | 7) => name != "VhtMcs6",
            (80, 6) => name != "VhtMcs9",
            (160, 3) => name != "VhtMcs9",
            _ => true,
        };
        if !valid {
            debug!(
                "forbidden combination: {} at {} MHz with {} streams",
                name, self.channel_width_mhz, self.nss
            );
        }
        valid
    }
}
