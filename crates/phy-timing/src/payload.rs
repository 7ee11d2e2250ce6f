//! Payload durations for every modulation class

use std::time::Duration;

use phy_mode::mode::{ht_symbol_ns, ofdm_symbol_ns};
use phy_mode::{ModulationClass, Preamble, TxVector};
use tracing::debug;

use crate::aggregation::{AmpduAccumulator, MpduPosition};
use crate::dmg;
use crate::encoders::bcc_encoders;
use crate::error::TimingError;

/// SERVICE field bits preceding the PSDU
const SERVICE_BITS: f64 = 16.0;

/// Tail bits per BCC encoder
const TAIL_BITS: f64 = 6.0;

/// Signal extension after ERP-OFDM and 2.4 GHz HT frames
const SIGNAL_EXTENSION: Duration = Duration::from_micros(6);

/// Payload duration of one frame and its share of the aggregate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadTiming {
    /// Time on air of the payload
    pub duration: Duration,
    /// Symbols the frame occupies within its aggregate, `None` for classes
    /// that are never aggregated
    pub symbols: Option<f64>,
}

impl PayloadTiming {
    fn standalone(duration: Duration) -> Self {
        Self {
            duration,
            symbols: None,
        }
    }
}

/// Compute the payload duration of one frame without touching the accumulator
///
/// `frequency_mhz` only matters for HT in the 2.4 GHz band. `position` and
/// `accumulator` only matter for the OFDM-based classes (legacy OFDM,
/// ERP-OFDM, HT and VHT); the other classes are never aggregated.
pub fn payload_timing(
    size: u32,
    tx: &TxVector,
    preamble: Preamble,
    frequency_mhz: u16,
    position: MpduPosition,
    accumulator: &AmpduAccumulator,
) -> Result<PayloadTiming, TimingError> {
    match tx.mode.class() {
        ModulationClass::Ofdm | ModulationClass::ErpOfdm => {
            ofdm_payload(size, tx, preamble, position, accumulator)
        }
        ModulationClass::Ht | ModulationClass::Vht => {
            ht_payload(size, tx, preamble, frequency_mhz, position, accumulator)
        }
        ModulationClass::Dsss | ModulationClass::HrDsss => {
            Ok(PayloadTiming::standalone(dsss_payload(size, tx)))
        }
        ModulationClass::DmgCtrl => dmg::control_payload(size, tx).map(PayloadTiming::standalone),
        ModulationClass::DmgSc => dmg::sc_payload(size, tx).map(PayloadTiming::standalone),
        ModulationClass::DmgOfdm => dmg::ofdm_payload(size, tx).map(PayloadTiming::standalone),
        ModulationClass::DmgLpSc => dmg::lp_sc_payload(size, tx).map(PayloadTiming::standalone),
    }
}

/// Symbol count of a frame at `position` inside its aggregate
///
/// `stbc` is the STBC symbol multiple (1 or 2), `ndbps` the data bits per
/// symbol and `tail_bits` the tail of all encoders. First and middle frames
/// stay fractional; only the closing frame and normal frames round up.
fn aggregate_symbols(
    size: u32,
    position: MpduPosition,
    preamble: Preamble,
    accumulator: &AmpduAccumulator,
    stbc: f64,
    ndbps: f64,
    tail_bits: f64,
) -> Result<f64, TimingError> {
    position.check_preamble(preamble)?;
    let bits = f64::from(size) * 8.0;
    match position {
        MpduPosition::Normal => {
            Ok(stbc * ((SERVICE_BITS + bits + tail_bits) / (stbc * ndbps)).ceil())
        }
        MpduPosition::FirstInAggregate => {
            Ok(stbc * (SERVICE_BITS + bits + tail_bits) / (stbc * ndbps))
        }
        MpduPosition::MiddleInAggregate => Ok(stbc * bits / (stbc * ndbps)),
        MpduPosition::LastInAggregate => {
            let total_bits = (accumulator.size_bytes() + u64::from(size)) as f64 * 8.0;
            let closing = stbc * ((SERVICE_BITS + total_bits + tail_bits) / (stbc * ndbps)).ceil();
            if accumulator.is_empty() || accumulator.symbols() > closing {
                return Err(TimingError::AccumulatorUnderflow {
                    accumulated_symbols: accumulator.symbols(),
                    closing_symbols: closing,
                });
            }
            Ok(closing - accumulator.symbols())
        }
    }
}

/// Convert a (possibly fractional) symbol count to the nearest nanosecond
///
/// First and middle MPDUs carry fractional symbols; rounding keeps an
/// aggregate's total within a nanosecond of the single-frame total, where
/// truncation would drift low.
fn symbols_to_duration(symbols: f64, symbol_ns: u64) -> Duration {
    Duration::from_nanos((symbols * symbol_ns as f64).round() as u64)
}

/// Data bits per symbol: rate times symbol duration
fn data_bits_per_symbol(data_rate: u64, symbol_ns: u64) -> f64 {
    data_rate as f64 * symbol_ns as f64 / 1e9
}

/// Legacy OFDM and ERP-OFDM (Table 18-5)
fn ofdm_payload(
    size: u32,
    tx: &TxVector,
    preamble: Preamble,
    position: MpduPosition,
    accumulator: &AmpduAccumulator,
) -> Result<PayloadTiming, TimingError> {
    let symbol_ns = ofdm_symbol_ns(tx.channel_width_mhz);
    let ndbps = data_bits_per_symbol(tx.mode.data_rate(tx.channel_width_mhz, false, 1), symbol_ns);
    let symbols = aggregate_symbols(size, position, preamble, accumulator, 1.0, ndbps, TAIL_BITS)?;

    let mut duration = symbols_to_duration(symbols, symbol_ns);
    if tx.mode.class() == ModulationClass::ErpOfdm {
        duration += SIGNAL_EXTENSION;
    }
    debug!(
        "{} {} bytes ({}): {:.3} symbols, {:?}",
        tx.mode, size, position, symbols, duration
    );
    Ok(PayloadTiming {
        duration,
        symbols: Some(symbols),
    })
}

/// HT and VHT (equation 20-32)
fn ht_payload(
    size: u32,
    tx: &TxVector,
    preamble: Preamble,
    frequency_mhz: u16,
    position: MpduPosition,
    accumulator: &AmpduAccumulator,
) -> Result<PayloadTiming, TimingError> {
    let symbol_ns = ht_symbol_ns(tx.short_guard_interval);
    let stbc = if tx.stbc { 2.0 } else { 1.0 };
    let encoders = bcc_encoders(tx);
    let ndbps = data_bits_per_symbol(tx.data_rate(), symbol_ns);
    let tail_bits = TAIL_BITS * f64::from(encoders);
    let symbols = aggregate_symbols(size, position, preamble, accumulator, stbc, ndbps, tail_bits)?;

    let mut duration = symbols_to_duration(symbols, symbol_ns);
    let closes_ppdu = matches!(
        position,
        MpduPosition::Normal | MpduPosition::LastInAggregate
    );
    if tx.mode.class() == ModulationClass::Ht
        && (2400..=2500).contains(&frequency_mhz)
        && closes_ppdu
    {
        duration += SIGNAL_EXTENSION;
    }
    debug!(
        "{} {} bytes ({}, Nes={}): {:.3} symbols, {:?}",
        tx.mode, size, position, encoders, symbols, duration
    );
    Ok(PayloadTiming {
        duration,
        symbols: Some(symbols),
    })
}

/// DSSS and HR-DSSS (Section 17.2.3.6): whole microseconds
fn dsss_payload(size: u32, tx: &TxVector) -> Duration {
    let rate = tx.mode.data_rate(22, false, 1).max(1);
    Duration::from_micros((u64::from(size) * 8 * 1_000_000).div_ceil(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use phy_mode::catalog;

    fn normal(size: u32, tx: &TxVector, preamble: Preamble, frequency_mhz: u16) -> Duration {
        payload_timing(
            size,
            tx,
            preamble,
            frequency_mhz,
            MpduPosition::Normal,
            &AmpduAccumulator::new(),
        )
        .unwrap()
        .duration
    }

    #[test]
    fn test_ofdm_54mbps_1000_bytes() {
        let tx = TxVector::new(catalog::OFDM_RATE_54MBPS);
        let timing = payload_timing(
            1000,
            &tx,
            Preamble::Long,
            5180,
            MpduPosition::Normal,
            &AmpduAccumulator::new(),
        )
        .unwrap();
        assert_eq!(timing.symbols, Some(38.0));
        assert_eq!(timing.duration, Duration::from_micros(152));
    }

    #[test]
    fn test_ofdm_6mbps() {
        // (16 + 8*100 + 6) / 24 = 34.25 -> 35 symbols
        let tx = TxVector::new(catalog::OFDM_RATE_6MBPS);
        assert_eq!(normal(100, &tx, Preamble::Long, 5180), Duration::from_micros(140));
    }

    #[test]
    fn test_ofdm_half_clocked() {
        // 27 Mb/s over 8 us symbols: 216 bits per symbol
        let tx = TxVector::new(catalog::OFDM_RATE_27MBPS_BW10MHZ).with_channel_width(10);
        assert_eq!(normal(1000, &tx, Preamble::Long, 5890), Duration::from_micros(304));
    }

    #[test]
    fn test_erp_adds_signal_extension() {
        let tx = TxVector::new(catalog::ERP_OFDM_RATE_54MBPS);
        assert_eq!(normal(1000, &tx, Preamble::Long, 2412), Duration::from_micros(158));
    }

    #[test]
    fn test_ht_mcs7() {
        // 260 bits per symbol: (16 + 12000 + 6) / 260 = 46.2 -> 47 symbols
        let tx = TxVector::new(catalog::HT_MCS7);
        assert_eq!(normal(1500, &tx, Preamble::HtMixed, 5180), Duration::from_micros(188));
    }

    #[test]
    fn test_ht_signal_extension_at_2_4ghz() {
        let tx = TxVector::new(catalog::HT_MCS7);
        assert_eq!(normal(1500, &tx, Preamble::HtMixed, 2412), Duration::from_micros(194));
        assert_eq!(normal(1500, &tx, Preamble::HtMixed, 2500), Duration::from_micros(194));
        assert_eq!(normal(1500, &tx, Preamble::HtMixed, 2501), Duration::from_micros(188));
    }

    #[test]
    fn test_vht_never_extended() {
        let tx = TxVector::new(catalog::VHT_MCS7);
        assert_eq!(
            normal(1500, &tx, Preamble::Vht, 2412),
            normal(1500, &tx, Preamble::Vht, 5180)
        );
    }

    #[test]
    fn test_ht_short_guard_interval() {
        // 72.222223 Mb/s * 3.6 us = 260.0000028 bits per symbol, 47 symbols of 3.6 us
        let tx = TxVector::new(catalog::HT_MCS7).with_short_guard_interval(true);
        assert_eq!(normal(1500, &tx, Preamble::HtMixed, 5180), Duration::from_nanos(169_200));
    }

    #[test]
    fn test_ht_stbc_rounds_to_symbol_pairs() {
        // 47 symbols become 48 with STBC
        let tx = TxVector::new(catalog::HT_MCS7).with_stbc(true);
        assert_eq!(normal(1500, &tx, Preamble::HtMixed, 5180), Duration::from_micros(192));
    }

    #[test]
    fn test_vht_multiple_encoders() {
        // VHT MCS9 80 MHz 3 streams: 1170 Mb/s, 4680 bits per symbol, Nes = 3
        let tx = TxVector::new(catalog::VHT_MCS9)
            .with_channel_width(80)
            .with_nss(3);
        // (16 + 8*4680 + 18) / 4680 = 8.007 -> 9 symbols
        assert_eq!(normal(4680, &tx, Preamble::Vht, 5180), Duration::from_micros(36));
    }

    #[test]
    fn test_dsss_payload() {
        let tx = TxVector::new(catalog::DSSS_RATE_1MBPS);
        assert_eq!(normal(100, &tx, Preamble::Long, 2412), Duration::from_micros(800));
        let tx = TxVector::new(catalog::DSSS_RATE_11MBPS);
        // 8000 / 11 = 727.3 -> 728 us
        assert_eq!(normal(1000, &tx, Preamble::Short, 2412), Duration::from_micros(728));
        let tx = TxVector::new(catalog::DSSS_RATE_5_5MBPS);
        assert_eq!(normal(11, &tx, Preamble::Long, 2412), Duration::from_micros(16));
    }

    #[test]
    fn test_dsss_ignores_aggregation_state() {
        let tx = TxVector::new(catalog::DSSS_RATE_2MBPS);
        let timing = payload_timing(
            100,
            &tx,
            Preamble::None,
            2412,
            MpduPosition::LastInAggregate,
            &AmpduAccumulator::new(),
        )
        .unwrap();
        assert_eq!(timing.duration, Duration::from_micros(400));
        assert_eq!(timing.symbols, None);
    }

    #[test]
    fn test_fractional_symbols_round_to_nearest() {
        assert_eq!(symbols_to_duration(1.0 / 3.0, 4000), Duration::from_nanos(1333));
        assert_eq!(symbols_to_duration(2.0 / 3.0, 4000), Duration::from_nanos(2667));
        assert_eq!(
            symbols_to_duration(1.0 / 3.0, 4000) + symbols_to_duration(2.0 / 3.0, 4000),
            symbols_to_duration(1.0, 4000)
        );
    }

    #[test]
    fn test_inconsistent_aggregation() {
        let tx = TxVector::new(catalog::OFDM_RATE_24MBPS);
        let acc = AmpduAccumulator::new();
        let err = payload_timing(100, &tx, Preamble::None, 5180, MpduPosition::Normal, &acc)
            .unwrap_err();
        assert!(matches!(err, TimingError::InconsistentAggregation { .. }));

        let tx = TxVector::new(catalog::HT_MCS3);
        let err = payload_timing(
            100,
            &tx,
            Preamble::HtMixed,
            5180,
            MpduPosition::MiddleInAggregate,
            &acc,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TimingError::InconsistentAggregation {
                position: MpduPosition::MiddleInAggregate,
                preamble: Preamble::HtMixed,
            }
        );
    }

    #[test]
    fn test_last_on_empty_accumulator_underflows() {
        let tx = TxVector::new(catalog::OFDM_RATE_54MBPS);
        let err = payload_timing(
            1000,
            &tx,
            Preamble::None,
            5180,
            MpduPosition::LastInAggregate,
            &AmpduAccumulator::new(),
        )
        .unwrap_err();
        assert!(matches!(err, TimingError::AccumulatorUnderflow { .. }));
    }

    #[test]
    fn test_aggregate_fractional_then_closing() {
        let tx = TxVector::new(catalog::OFDM_RATE_54MBPS);
        let mut acc = AmpduAccumulator::new();

        let first =
            payload_timing(500, &tx, Preamble::Long, 5180, MpduPosition::FirstInAggregate, &acc)
                .unwrap();
        // (16 + 4000 + 6) / 216
        let expected = 4022.0 / 216.0;
        assert_eq!(first.symbols, Some(expected));
        acc.record(MpduPosition::FirstInAggregate, 500, expected);

        let last =
            payload_timing(500, &tx, Preamble::None, 5180, MpduPosition::LastInAggregate, &acc)
                .unwrap();
        // The whole aggregate is the 1000 byte frame: 38 symbols
        let closing = last.symbols.unwrap();
        assert!((expected + closing - 38.0).abs() < 1e-9);
        assert_eq!(
            first.duration + last.duration,
            Duration::from_micros(152)
        );
    }
}
