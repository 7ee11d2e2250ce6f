//! MCS descriptors and data-rate arithmetic

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ModulationClass;

/// DSSS symbol rate (Barker code, 1 Mbaud)
const DSSS_SYMBOL_RATE: u64 = 1_000_000;

/// HR-DSSS symbol rate (CCK, 11 Mchip/s over 8-chip codewords)
const HR_DSSS_SYMBOL_RATE: u64 = 1_375_000;

/// Data subcarriers of a legacy OFDM symbol
const OFDM_DATA_SUBCARRIERS: u64 = 48;

/// Forward error correction code rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CodeRate {
    /// No convolutional code (DSSS and HR-DSSS)
    Undefined,
    /// Rate 1/2
    Rate1_2,
    /// Rate 2/3
    Rate2_3,
    /// Rate 3/4
    Rate3_4,
    /// Rate 5/6
    Rate5_6,
    /// Rate 1/4 (DMG SC, 1/2 with two-fold repetition)
    Rate1_4,
    /// Rate 5/8 (DMG)
    Rate5_8,
    /// Rate 13/16 (DMG)
    Rate13_16,
    /// Rate 13/28 (DMG low-power SC)
    Rate13_28,
    /// Rate 13/21 (DMG low-power SC)
    Rate13_21,
    /// Rate 52/63 (DMG low-power SC)
    Rate52_63,
    /// Rate 13/14 (DMG low-power SC)
    Rate13_14,
}

impl CodeRate {
    /// Numerator and denominator of the rate, `None` when undefined
    pub const fn ratio(&self) -> Option<(u64, u64)> {
        match self {
            CodeRate::Undefined => None,
            CodeRate::Rate1_2 => Some((1, 2)),
            CodeRate::Rate2_3 => Some((2, 3)),
            CodeRate::Rate3_4 => Some((3, 4)),
            CodeRate::Rate5_6 => Some((5, 6)),
            CodeRate::Rate1_4 => Some((1, 4)),
            CodeRate::Rate5_8 => Some((5, 8)),
            CodeRate::Rate13_16 => Some((13, 16)),
            CodeRate::Rate13_28 => Some((13, 28)),
            CodeRate::Rate13_21 => Some((13, 21)),
            CodeRate::Rate52_63 => Some((52, 63)),
            CodeRate::Rate13_14 => Some((13, 14)),
        }
    }

    /// The rate as a fraction
    pub fn as_f64(&self) -> Option<f64> {
        self.ratio().map(|(num, den)| num as f64 / den as f64)
    }
}

impl fmt::Display for CodeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ratio() {
            Some((num, den)) => write!(f, "{}/{}", num, den),
            None => f.write_str("undefined"),
        }
    }
}

/// Explicit bandwidth and rate carried by DMG descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplicitRate {
    /// Occupied bandwidth in Hz
    pub bandwidth_hz: u64,
    /// PHY data rate in bits per second
    pub data_rate_bps: u64,
}

/// An immutable modulation and coding scheme descriptor
///
/// Descriptors are created at compile time in [`crate::catalog`] and are
/// identified by their unique name: two descriptors compare equal exactly
/// when their names do.
#[derive(Debug, Clone, Copy)]
pub struct WifiMode {
    name: &'static str,
    class: ModulationClass,
    mandatory: bool,
    code_rate: CodeRate,
    constellation_size: u16,
    mcs: Option<u8>,
    explicit: Option<ExplicitRate>,
}

impl WifiMode {
    /// Descriptor for a rate-named legacy mode (DSSS, HR-DSSS, OFDM, ERP-OFDM)
    pub(crate) const fn legacy(
        name: &'static str,
        class: ModulationClass,
        mandatory: bool,
        code_rate: CodeRate,
        constellation_size: u16,
    ) -> Self {
        Self {
            name,
            class,
            mandatory,
            code_rate,
            constellation_size,
            mcs: None,
            explicit: None,
        }
    }

    /// Descriptor for an HT or VHT MCS; modulation follows from the index
    pub(crate) const fn with_mcs(name: &'static str, class: ModulationClass, mcs: u8) -> Self {
        let index = match class {
            ModulationClass::Vht => mcs,
            _ => mcs % 8,
        };
        let (code_rate, constellation_size) = mcs_modulation(index);
        Self {
            name,
            class,
            mandatory: mcs <= 7,
            code_rate,
            constellation_size,
            mcs: Some(mcs),
            explicit: None,
        }
    }

    /// Descriptor for a DMG MCS with its rate spelled out
    pub(crate) const fn dmg(
        name: &'static str,
        class: ModulationClass,
        mcs: u8,
        mandatory: bool,
        data_rate_bps: u64,
        code_rate: CodeRate,
        constellation_size: u16,
    ) -> Self {
        Self {
            name,
            class,
            mandatory,
            code_rate,
            constellation_size,
            mcs: Some(mcs),
            explicit: Some(ExplicitRate {
                bandwidth_hz: DMG_BANDWIDTH_HZ,
                data_rate_bps,
            }),
        }
    }

    /// Unique name, e.g. `OfdmRate54Mbps` or `DMG_MCS13`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Modulation class
    pub fn class(&self) -> ModulationClass {
        self.class
    }

    /// Whether every station of the class must support the mode
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Code rate
    pub fn code_rate(&self) -> CodeRate {
        self.code_rate
    }

    /// Constellation size M (2 for BPSK, 4 for QPSK, 16/64/256 for QAM)
    pub fn constellation_size(&self) -> u16 {
        self.constellation_size
    }

    /// Bits carried per constellation point, log2(M)
    pub fn bits_per_point(&self) -> u32 {
        u32::from(self.constellation_size).trailing_zeros()
    }

    /// MCS index for HT, VHT and DMG modes
    pub fn mcs(&self) -> Option<u8> {
        self.mcs
    }

    /// Explicit bandwidth/rate pair (DMG only)
    pub fn explicit_rate(&self) -> Option<ExplicitRate> {
        self.explicit
    }

    /// PHY data rate in bits per second
    ///
    /// `channel_width_mhz` selects the symbol duration of legacy OFDM and the
    /// data subcarrier count of HT/VHT. `short_guard_interval` and `nss` only
    /// apply to HT/VHT. Rates are computed with exact integer arithmetic and
    /// rounded up to a whole bit per second before the stream multiplier.
    pub fn data_rate(&self, channel_width_mhz: u16, short_guard_interval: bool, nss: u8) -> u64 {
        let bits = u64::from(self.bits_per_point());
        match self.class {
            ModulationClass::Dsss => DSSS_SYMBOL_RATE * bits,
            ModulationClass::HrDsss => HR_DSSS_SYMBOL_RATE * bits,
            ModulationClass::Ofdm | ModulationClass::ErpOfdm => coded_rate(
                OFDM_DATA_SUBCARRIERS,
                bits,
                self.code_rate,
                ofdm_symbol_ns(channel_width_mhz),
            ),
            ModulationClass::Ht | ModulationClass::Vht => {
                coded_rate(
                    ht_data_subcarriers(channel_width_mhz),
                    bits,
                    self.code_rate,
                    ht_symbol_ns(short_guard_interval),
                ) * u64::from(nss)
            }
            ModulationClass::DmgCtrl
            | ModulationClass::DmgSc
            | ModulationClass::DmgOfdm
            | ModulationClass::DmgLpSc => self.explicit.map_or(0, |rate| rate.data_rate_bps),
        }
    }
}

impl PartialEq for WifiMode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for WifiMode {}

impl Hash for WifiMode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for WifiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl std::str::FromStr for WifiMode {
    type Err = crate::ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::ModeDatabase::by_name(s).ok_or_else(|| crate::ModeError::UnknownMode(s.to_string()))
    }
}

/// Occupied bandwidth of every DMG channel
const DMG_BANDWIDTH_HZ: u64 = 1_880_000_000;

/// Legacy OFDM symbol duration in ns for a channel width in MHz
///
/// Half- and quarter-clocked channels stretch the 4 us symbol; any other
/// width uses the 20 MHz timing.
pub fn ofdm_symbol_ns(channel_width_mhz: u16) -> u64 {
    match channel_width_mhz {
        10 => 8_000,
        5 => 16_000,
        _ => 4_000,
    }
}

/// HT/VHT symbol duration in ns (3.6 us with the short guard interval)
pub fn ht_symbol_ns(short_guard_interval: bool) -> u64 {
    if short_guard_interval {
        3_600
    } else {
        4_000
    }
}

/// HT/VHT data subcarriers for a channel width in MHz
pub fn ht_data_subcarriers(channel_width_mhz: u16) -> u64 {
    match channel_width_mhz {
        40 => 108,
        80 => 234,
        160 => 468,
        _ => 52,
    }
}

fn coded_rate(subcarriers: u64, bits: u64, code_rate: CodeRate, symbol_ns: u64) -> u64 {
    let (num, den) = code_rate.ratio().unwrap_or((1, 1));
    (subcarriers * bits * num * 1_000_000_000).div_ceil(den * symbol_ns)
}

/// Code rate and constellation of HT/VHT MCS indices
///
/// HT repeats the eight single-stream modulations for every stream count,
/// VHT adds 256-QAM as MCS 8 and 9.
const fn mcs_modulation(index: u8) -> (CodeRate, u16) {
    match index {
        0 => (CodeRate::Rate1_2, 2),
        1 => (CodeRate::Rate1_2, 4),
        2 => (CodeRate::Rate3_4, 4),
        3 => (CodeRate::Rate1_2, 16),
        4 => (CodeRate::Rate3_4, 16),
        5 => (CodeRate::Rate2_3, 64),
        6 => (CodeRate::Rate3_4, 64),
        7 => (CodeRate::Rate5_6, 64),
        8 => (CodeRate::Rate3_4, 256),
        _ => (CodeRate::Rate5_6, 256),
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::WifiMode;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for WifiMode {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for WifiMode {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let name = String::deserialize(deserializer)?;
            crate::ModeDatabase::by_name(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown mode: {}", name)))
        }
    }
}
