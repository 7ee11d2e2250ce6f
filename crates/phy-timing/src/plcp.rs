//! PLCP preamble, header and training field durations
//!
//! Every function returns zero for [`Preamble::None`] where the field
//! belongs to the preamble of the first MPDU of an aggregate.

use std::time::Duration;

use phy_mode::{ModulationClass, Preamble, TxVector};

const DMG_CTRL_PREAMBLE: Duration = Duration::from_nanos(4291);
const DMG_SC_PREAMBLE: Duration = Duration::from_nanos(1891);
const DMG_OFDM_PREAMBLE: Duration = Duration::from_nanos(1891);

const DMG_CTRL_HEADER: Duration = Duration::from_nanos(4654);
const DMG_SC_HEADER: Duration = Duration::from_nanos(582);
const DMG_OFDM_HEADER: Duration = Duration::from_nanos(242);

/// DSSS rate the short preamble is only used above (bits/s)
const DSSS_SHORT_PREAMBLE_MIN_RATE: u64 = 1_000_000;

/// DSSS short preamble and header only apply to rates above 1 Mb/s
fn uses_short_dsss_framing(tx: &TxVector, preamble: Preamble) -> bool {
    preamble == Preamble::Short && tx.mode.data_rate(22, false, 1) > DSSS_SHORT_PREAMBLE_MIN_RATE
}

/// Duration of the PLCP preamble
pub fn preamble_duration(tx: &TxVector, preamble: Preamble) -> Duration {
    if !preamble.is_present() {
        return Duration::ZERO;
    }
    match tx.mode.class() {
        // Table 18-5: 10 and 5 MHz channels stretch the training symbols
        ModulationClass::Ofdm => match tx.channel_width_mhz {
            10 => Duration::from_micros(32),
            5 => Duration::from_micros(64),
            _ => Duration::from_micros(16),
        },
        ModulationClass::Ht | ModulationClass::Vht | ModulationClass::ErpOfdm => {
            Duration::from_micros(16)
        }
        ModulationClass::Dsss | ModulationClass::HrDsss => {
            if uses_short_dsss_framing(tx, preamble) {
                Duration::from_micros(72)
            } else {
                Duration::from_micros(144)
            }
        }
        ModulationClass::DmgCtrl => DMG_CTRL_PREAMBLE,
        ModulationClass::DmgSc | ModulationClass::DmgLpSc => DMG_SC_PREAMBLE,
        ModulationClass::DmgOfdm => DMG_OFDM_PREAMBLE,
    }
}

/// Duration of the PLCP header
///
/// For OFDM-based classes this is the SIGNAL field only; the SERVICE field
/// is sent at the payload rate and counted with the payload.
pub fn header_duration(tx: &TxVector, preamble: Preamble) -> Duration {
    if !preamble.is_present() {
        return Duration::ZERO;
    }
    match tx.mode.class() {
        ModulationClass::Ofdm => match tx.channel_width_mhz {
            10 => Duration::from_micros(8),
            5 => Duration::from_micros(16),
            _ => Duration::from_micros(4),
        },
        // L-SIG, absent in greenfield
        ModulationClass::Ht => match preamble {
            Preamble::HtGreenfield => Duration::ZERO,
            _ => Duration::from_micros(4),
        },
        ModulationClass::Vht | ModulationClass::ErpOfdm => Duration::from_micros(4),
        ModulationClass::Dsss | ModulationClass::HrDsss => {
            if uses_short_dsss_framing(tx, preamble) {
                Duration::from_micros(24)
            } else {
                Duration::from_micros(48)
            }
        }
        ModulationClass::DmgCtrl => DMG_CTRL_HEADER,
        ModulationClass::DmgSc | ModulationClass::DmgLpSc => DMG_SC_HEADER,
        ModulationClass::DmgOfdm => DMG_OFDM_HEADER,
    }
}

/// Duration of HT-SIG (mixed and greenfield formats)
pub fn ht_sig_duration(preamble: Preamble) -> Duration {
    match preamble {
        Preamble::HtMixed | Preamble::HtGreenfield => Duration::from_micros(8),
        _ => Duration::ZERO,
    }
}

/// Duration of VHT-SIG-A1
pub fn vht_sig_a1_duration(preamble: Preamble) -> Duration {
    vht_only(preamble)
}

/// Duration of VHT-SIG-A2
pub fn vht_sig_a2_duration(preamble: Preamble) -> Duration {
    vht_only(preamble)
}

/// Duration of VHT-SIG-B
pub fn vht_sig_b_duration(preamble: Preamble) -> Duration {
    vht_only(preamble)
}

fn vht_only(preamble: Preamble) -> Duration {
    match preamble {
        Preamble::Vht => Duration::from_micros(4),
        _ => Duration::ZERO,
    }
}

/// Number of data HT-LTFs for a stream count
fn data_ltf_count(nss: u8) -> u64 {
    match nss {
        0..=2 => u64::from(nss),
        3 | 4 => 4,
        5 | 6 => 6,
        _ => 8,
    }
}

/// Number of extension HT-LTFs for an extension stream count
fn extension_ltf_count(ness: u8) -> u64 {
    if ness < 3 {
        u64::from(ness)
    } else {
        4
    }
}

/// Duration of the HT/VHT training fields (STF plus LTFs)
pub fn training_symbol_duration(tx: &TxVector, preamble: Preamble) -> Duration {
    let ndltf = data_ltf_count(tx.nss);
    let neltf = extension_ltf_count(tx.ness);
    let micros = match preamble {
        Preamble::HtMixed => 4 + 4 * ndltf + 4 * neltf,
        Preamble::HtGreenfield => 4 * ndltf + 4 * neltf,
        Preamble::Vht => 4 + 4 * ndltf,
        _ => 0,
    };
    Duration::from_micros(micros)
}

/// Sum of every field sent before the payload
pub fn preamble_and_header_duration(tx: &TxVector, preamble: Preamble) -> Duration {
    preamble_duration(tx, preamble)
        + header_duration(tx, preamble)
        + ht_sig_duration(preamble)
        + training_symbol_duration(tx, preamble)
        + vht_sig_a1_duration(preamble)
        + vht_sig_a2_duration(preamble)
        + vht_sig_b_duration(preamble)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phy_mode::catalog;

    #[test]
    fn test_legacy_ofdm_20mhz() {
        let tx = TxVector::new(catalog::OFDM_RATE_54MBPS);
        assert_eq!(preamble_duration(&tx, Preamble::Long), Duration::from_micros(16));
        assert_eq!(header_duration(&tx, Preamble::Long), Duration::from_micros(4));
        assert_eq!(
            preamble_and_header_duration(&tx, Preamble::Long),
            Duration::from_micros(20)
        );
    }

    #[test]
    fn test_legacy_ofdm_narrow_channels() {
        let tx10 = TxVector::new(catalog::OFDM_RATE_3MBPS_BW10MHZ).with_channel_width(10);
        assert_eq!(
            preamble_and_header_duration(&tx10, Preamble::Long),
            Duration::from_micros(40)
        );
        let tx5 = TxVector::new(catalog::OFDM_RATE_1_5MBPS_BW5MHZ).with_channel_width(5);
        assert_eq!(
            preamble_and_header_duration(&tx5, Preamble::Long),
            Duration::from_micros(80)
        );
    }

    #[test]
    fn test_no_preamble_is_zero() {
        for tx in [
            TxVector::new(catalog::OFDM_RATE_6MBPS),
            TxVector::new(catalog::HT_MCS7),
            TxVector::new(catalog::DSSS_RATE_11MBPS),
            TxVector::new(catalog::DMG_MCS0),
        ] {
            assert_eq!(preamble_and_header_duration(&tx, Preamble::None), Duration::ZERO);
        }
    }

    #[test]
    fn test_ht_mixed_single_stream() {
        let tx = TxVector::new(catalog::HT_MCS0);
        assert_eq!(ht_sig_duration(Preamble::HtMixed), Duration::from_micros(8));
        assert_eq!(
            training_symbol_duration(&tx, Preamble::HtMixed),
            Duration::from_micros(8)
        );
        assert_eq!(
            preamble_and_header_duration(&tx, Preamble::HtMixed),
            Duration::from_micros(36)
        );
    }

    #[test]
    fn test_ht_greenfield_has_no_lsig() {
        let tx = TxVector::new(catalog::HT_MCS9).with_nss(2);
        assert_eq!(header_duration(&tx, Preamble::HtGreenfield), Duration::ZERO);
        // 16 preamble + 8 HT-SIG + 2 LTFs
        assert_eq!(
            preamble_and_header_duration(&tx, Preamble::HtGreenfield),
            Duration::from_micros(32)
        );
    }

    #[test]
    fn test_ltf_counts() {
        assert_eq!(data_ltf_count(1), 1);
        assert_eq!(data_ltf_count(2), 2);
        assert_eq!(data_ltf_count(3), 4);
        assert_eq!(data_ltf_count(4), 4);
        assert_eq!(data_ltf_count(5), 6);
        assert_eq!(data_ltf_count(6), 6);
        assert_eq!(data_ltf_count(7), 8);
        assert_eq!(data_ltf_count(8), 8);
        assert_eq!(extension_ltf_count(0), 0);
        assert_eq!(extension_ltf_count(2), 2);
        assert_eq!(extension_ltf_count(3), 4);
    }

    #[test]
    fn test_ht_mixed_with_extension_streams() {
        let tx = TxVector::new(catalog::HT_MCS16).with_nss(3).with_ness(1);
        // 4 + 4*4 + 4*1
        assert_eq!(
            training_symbol_duration(&tx, Preamble::HtMixed),
            Duration::from_micros(24)
        );
    }

    #[test]
    fn test_vht_fields() {
        let tx = TxVector::new(catalog::VHT_MCS9).with_channel_width(80).with_nss(3);
        assert_eq!(vht_sig_a1_duration(Preamble::Vht), Duration::from_micros(4));
        assert_eq!(vht_sig_a2_duration(Preamble::Vht), Duration::from_micros(4));
        assert_eq!(vht_sig_b_duration(Preamble::Vht), Duration::from_micros(4));
        assert_eq!(vht_sig_b_duration(Preamble::HtMixed), Duration::ZERO);
        // 16 + 4 L-SIG + 4 + 4*4 training + 12 SIG fields, extension streams ignored
        assert_eq!(
            preamble_and_header_duration(&tx.with_ness(2), Preamble::Vht),
            Duration::from_micros(52)
        );
    }

    #[test]
    fn test_dsss_framing() {
        let fast = TxVector::new(catalog::DSSS_RATE_11MBPS);
        assert_eq!(preamble_duration(&fast, Preamble::Short), Duration::from_micros(72));
        assert_eq!(header_duration(&fast, Preamble::Short), Duration::from_micros(24));
        assert_eq!(preamble_duration(&fast, Preamble::Long), Duration::from_micros(144));
        assert_eq!(header_duration(&fast, Preamble::Long), Duration::from_micros(48));

        let slow = TxVector::new(catalog::DSSS_RATE_1MBPS);
        assert_eq!(preamble_duration(&slow, Preamble::Short), Duration::from_micros(144));
        assert_eq!(header_duration(&slow, Preamble::Short), Duration::from_micros(48));
    }

    #[test]
    fn test_erp_framing() {
        let tx = TxVector::new(catalog::ERP_OFDM_RATE_54MBPS);
        assert_eq!(
            preamble_and_header_duration(&tx, Preamble::Long),
            Duration::from_micros(20)
        );
    }

    #[test]
    fn test_dmg_framing() {
        let ctrl = TxVector::new(catalog::DMG_MCS0);
        assert_eq!(preamble_duration(&ctrl, Preamble::Dmg), Duration::from_nanos(4291));
        assert_eq!(header_duration(&ctrl, Preamble::Dmg), Duration::from_nanos(4654));

        let sc = TxVector::new(catalog::DMG_MCS8);
        assert_eq!(preamble_duration(&sc, Preamble::Dmg), Duration::from_nanos(1891));
        assert_eq!(header_duration(&sc, Preamble::Dmg), Duration::from_nanos(582));

        let lp = TxVector::new(catalog::DMG_MCS27);
        assert_eq!(header_duration(&lp, Preamble::Dmg), Duration::from_nanos(582));

        let ofdm = TxVector::new(catalog::DMG_MCS20);
        assert_eq!(preamble_duration(&ofdm, Preamble::Dmg), Duration::from_nanos(1891));
        assert_eq!(header_duration(&ofdm, Preamble::Dmg), Duration::from_nanos(242));
        assert_eq!(
            preamble_and_header_duration(&ofdm, Preamble::Dmg),
            Duration::from_nanos(2133)
        );
    }
}
