//! 802.11 PHY Mode Library
//!
//! This crate describes the modulation and coding schemes (MCS) used by the
//! 802.11 physical layers modeled by the airtime tools:
//!
//! - **DSSS / HR-DSSS**: 1, 2, 5.5 and 11 Mb/s (Clauses 16 and 17)
//! - **OFDM**: 6-54 Mb/s at 20 MHz plus the 10 and 5 MHz variants (Clause 18)
//! - **ERP-OFDM**: 6-54 Mb/s in the 2.4 GHz band (Clause 19)
//! - **HT**: MCS 0-31 (Clause 20)
//! - **VHT**: MCS 0-9 (Clause 22)
//! - **DMG**: 60 GHz control, single carrier, OFDM and low-power SC (Clause 21)
//!
//! # Architecture
//!
//! - [`WifiMode`] is an immutable, `Copy` descriptor identified by its unique name
//! - [`ModeDatabase`] looks descriptors up in a compile-time table; every
//!   descriptor is also exposed as a named constant in [`catalog`]
//! - [`TxVector`] bundles the per-transmission parameters and knows which
//!   VHT combinations the standard forbids
//!
//! # Example
//!
//! ```rust
//! use phy_mode::{catalog, ModeDatabase, TxVector};
//!
//! let mode = ModeDatabase::by_name("OfdmRate54Mbps").unwrap();
//! assert_eq!(mode, catalog::OFDM_RATE_54MBPS);
//! assert_eq!(mode.data_rate(20, false, 1), 54_000_000);
//!
//! let tx = TxVector::new(catalog::VHT_MCS9).with_channel_width(20);
//! assert!(!tx.is_valid());
//! ```

pub mod catalog;
pub mod error;
pub mod mode;
pub mod tx_vector;

pub use catalog::ModeDatabase;
pub use error::ModeError;
pub use mode::{CodeRate, ExplicitRate, WifiMode};
pub use tx_vector::TxVector;

/// Family of 802.11 PHY a mode belongs to
///
/// Every timing rule in the airtime engine is selected by this class, so each
/// variant maps to exactly one clause of the standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModulationClass {
    /// Direct-sequence spread spectrum (Clause 16)
    Dsss,
    /// High-rate DSSS with CCK (Clause 17)
    HrDsss,
    /// Extended-rate PHY OFDM in 2.4 GHz (Clause 19)
    ErpOfdm,
    /// Legacy OFDM (Clause 18)
    Ofdm,
    /// High throughput (Clause 20)
    Ht,
    /// Very high throughput (Clause 22)
    Vht,
    /// DMG control PHY (Clause 21.4)
    DmgCtrl,
    /// DMG single carrier PHY (Clause 21.6)
    DmgSc,
    /// DMG OFDM PHY (Clause 21.5)
    DmgOfdm,
    /// DMG low-power single carrier PHY (Clause 21.7)
    DmgLpSc,
}

impl ModulationClass {
    /// Returns a human-readable name for the class
    pub fn name(&self) -> &'static str {
        match self {
            ModulationClass::Dsss => "DSSS",
            ModulationClass::HrDsss => "HR-DSSS",
            ModulationClass::ErpOfdm => "ERP-OFDM",
            ModulationClass::Ofdm => "OFDM",
            ModulationClass::Ht => "HT",
            ModulationClass::Vht => "VHT",
            ModulationClass::DmgCtrl => "DMG control",
            ModulationClass::DmgSc => "DMG SC",
            ModulationClass::DmgOfdm => "DMG OFDM",
            ModulationClass::DmgLpSc => "DMG low-power SC",
        }
    }

    /// True for the 60 GHz directional multi-gigabit classes
    pub fn is_dmg(&self) -> bool {
        matches!(
            self,
            ModulationClass::DmgCtrl
                | ModulationClass::DmgSc
                | ModulationClass::DmgOfdm
                | ModulationClass::DmgLpSc
        )
    }

    /// True for classes whose modes are addressed by MCS index (HT and VHT)
    pub fn uses_mcs_index(&self) -> bool {
        matches!(self, ModulationClass::Ht | ModulationClass::Vht)
    }
}

impl std::fmt::Display for ModulationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// PLCP preamble variant a PPDU is sent with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preamble {
    /// No preamble: a non-first MPDU inside an A-MPDU
    None,
    /// Short DSSS preamble
    Short,
    /// Long DSSS preamble, also used for legacy OFDM
    #[default]
    Long,
    /// HT mixed format
    HtMixed,
    /// HT greenfield format
    HtGreenfield,
    /// VHT format
    Vht,
    /// DMG (60 GHz) preamble
    Dmg,
}

impl Preamble {
    /// True unless this is [`Preamble::None`]
    pub fn is_present(&self) -> bool {
        !matches!(self, Preamble::None)
    }
}

impl std::fmt::Display for Preamble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Preamble::None => "none",
            Preamble::Short => "short",
            Preamble::Long => "long",
            Preamble::HtMixed => "HT mixed",
            Preamble::HtGreenfield => "HT greenfield",
            Preamble::Vht => "VHT",
            Preamble::Dmg => "DMG",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Preamble {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "none" => Ok(Preamble::None),
            "short" => Ok(Preamble::Short),
            "long" => Ok(Preamble::Long),
            "ht-mixed" | "htmixed" => Ok(Preamble::HtMixed),
            "ht-greenfield" | "htgreenfield" => Ok(Preamble::HtGreenfield),
            "vht" => Ok(Preamble::Vht),
            "dmg" => Ok(Preamble::Dmg),
            _ => Err(ModeError::UnknownPreamble(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_from_str() {
        assert_eq!("long".parse::<Preamble>(), Ok(Preamble::Long));
        assert_eq!("HT mixed".parse::<Preamble>(), Ok(Preamble::HtMixed));
        assert_eq!("ht_greenfield".parse::<Preamble>(), Ok(Preamble::HtGreenfield));
        assert_eq!("VHT".parse::<Preamble>(), Ok(Preamble::Vht));
        assert_eq!(
            "ofdm".parse::<Preamble>(),
            Err(ModeError::UnknownPreamble("ofdm".to_string()))
        );
        for preamble in [Preamble::None, Preamble::Short, Preamble::HtMixed, Preamble::Dmg] {
            assert_eq!(preamble.to_string().parse::<Preamble>(), Ok(preamble));
        }
    }

    #[test]
    fn test_dmg_classification() {
        assert!(ModulationClass::DmgCtrl.is_dmg());
        assert!(ModulationClass::DmgLpSc.is_dmg());
        assert!(!ModulationClass::Vht.is_dmg());
        assert!(!ModulationClass::Ofdm.is_dmg());
    }

    #[test]
    fn test_mcs_indexed_classes() {
        assert!(ModulationClass::Ht.uses_mcs_index());
        assert!(ModulationClass::Vht.uses_mcs_index());
        assert!(!ModulationClass::DmgSc.uses_mcs_index());
    }

    #[test]
    fn test_preamble_presence() {
        assert!(!Preamble::None.is_present());
        assert!(Preamble::Dmg.is_present());
        assert_eq!(Preamble::default(), Preamble::Long);
    }
}
