//! Integration tests for transmitter simulation
//!
//! These tests verify end-to-end behavior of the simulation layer including:
//! - Transmitters with independent aggregate state
//! - Scenario parsing and execution
//! - Event publication while a scenario runs

use std::time::Duration;

use phy_mode::{catalog, Preamble, TxVector, WifiMode};
use phy_sim::{AirtimeReport, Scenario, SimError, TransmitterConfig, VirtualTransmitter};
use phy_timing::tx_duration;
use tokio::sync::broadcast;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// Create a transmitter with the given id and mode
    pub fn transmitter(id: &str, mode: WifiMode) -> VirtualTransmitter {
        VirtualTransmitter::new(TransmitterConfig {
            id: id.to_string(),
            mode,
            ..Default::default()
        })
        .unwrap()
    }

    /// Airtime of one transmitter in a report
    pub fn airtime_of(report: &AirtimeReport, id: &str) -> Duration {
        report.transmitter(id).unwrap().stats.airtime()
    }
}

// ============================================================================
// Transmitter Tests
// ============================================================================

mod transmitter_tests {
    use super::*;

    #[test]
    fn test_transmitters_keep_separate_aggregates() {
        let mut a = helpers::transmitter("a", catalog::HT_MCS5);
        let mut b = helpers::transmitter("b", catalog::HT_MCS5);

        let airtime_a = a.transmit_aggregate(&[700, 800, 900]).unwrap();
        let airtime_b = b.transmit_aggregate(&[700, 800, 900]).unwrap();
        assert_eq!(airtime_a, airtime_b);
        assert!(a.accumulator().is_empty());
        assert!(b.accumulator().is_empty());
    }

    #[test]
    fn test_repeated_aggregates_take_equal_time() {
        let mut tx = helpers::transmitter("ap", catalog::VHT_MCS7);
        let first = tx.transmit_aggregate(&[1500; 4]).unwrap();
        let second = tx.transmit_aggregate(&[1500; 4]).unwrap();
        assert_eq!(first, second);
        assert_eq!(tx.stats().airtime(), first + second);
        assert_eq!(tx.stats().mpdus, 8);
    }

    #[test]
    fn test_transmit_matches_engine() {
        let mut tx = VirtualTransmitter::new(TransmitterConfig {
            id: "legacy".to_string(),
            mode: catalog::DSSS_RATE_11MBPS,
            frequency_mhz: 2412,
            preamble: Some(Preamble::Short),
            ..Default::default()
        })
        .unwrap();
        let expected = tx_duration(
            1500,
            &TxVector::new(catalog::DSSS_RATE_11MBPS),
            Preamble::Short,
            2412,
        )
        .unwrap();
        assert_eq!(tx.transmit(1500).unwrap(), expected);
    }

    #[test]
    fn test_config_round_trips_mode_by_name() {
        let config = TransmitterConfig {
            id: "dmg".to_string(),
            mode: catalog::DMG_MCS12,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"DMG_MCS12\""));
        let parsed: TransmitterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;

    const MIXED: &str = r#"{
        "name": "mixed cell",
        "transmitters": [
            { "id": "legacy", "mode": "DsssRate1Mbps", "frequency_mhz": 2412 },
            { "id": "vht", "mode": "VhtMcs9", "channel_width_mhz": 80, "nss": 3 },
            { "id": "dmg", "mode": "DMG_MCS13", "frequency_mhz": 60480 }
        ],
        "bursts": [
            { "transmitter": "legacy", "sizes": [14] },
            { "transmitter": "vht", "sizes": [4680] },
            { "transmitter": "dmg", "sizes": [1000], "repeat": 2 }
        ]
    }"#;

    #[tokio::test]
    async fn test_mixed_scenario() {
        let report = Scenario::from_json_str(MIXED).unwrap().run().await.unwrap();

        assert_eq!(helpers::airtime_of(&report, "legacy"), Duration::from_micros(304));
        assert_eq!(helpers::airtime_of(&report, "vht"), Duration::from_micros(88));
        assert_eq!(
            helpers::airtime_of(&report, "dmg"),
            Duration::from_nanos(2 * 13_749)
        );
        assert_eq!(
            report.transmitter("dmg").unwrap().stats.transmitted_bits,
            2 * 20_128
        );
    }

    #[tokio::test]
    async fn test_report_keeps_configuration_order() {
        let report = Scenario::from_json_str(MIXED).unwrap().run().await.unwrap();
        let ids: Vec<_> = report.transmitters.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["legacy", "vht", "dmg"]);
    }

    #[tokio::test]
    async fn test_forbidden_vector_fails_before_running() {
        let json = r#"{
            "transmitters": [ { "id": "bad", "mode": "VhtMcs9", "channel_width_mhz": 20 } ]
        }"#;
        let result = Scenario::from_json_str(json).unwrap().run().await;
        assert!(matches!(result, Err(SimError::InvalidTxVector(_))));
    }

    #[tokio::test]
    async fn test_events_published() {
        let scenario = Scenario::from_json_str(MIXED).unwrap();
        let (event_tx, mut event_rx) = broadcast::channel(16);
        scenario.run_with_events(event_tx).await.unwrap();

        let mut total = Duration::ZERO;
        let mut count = 0;
        while let Ok(event) = event_rx.try_recv() {
            total += event.airtime;
            count += 1;
        }
        assert_eq!(count, 4);
        assert_eq!(
            total,
            Duration::from_micros(304 + 88) + Duration::from_nanos(2 * 13_749)
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scenario::load("/nonexistent/scenario.json"),
            Err(SimError::Io(_))
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn aggregating_mode() -> impl Strategy<Value = WifiMode> {
        prop_oneof![
            Just(catalog::OFDM_RATE_12MBPS),
            Just(catalog::OFDM_RATE_48MBPS),
            Just(catalog::HT_MCS2),
            Just(catalog::HT_MCS7),
            Just(catalog::VHT_MCS4),
            Just(catalog::VHT_MCS8),
        ]
    }

    proptest! {
        #[test]
        fn stats_track_every_mpdu(
            mode in aggregating_mode(),
            bursts in prop::collection::vec(prop::collection::vec(1u32..3000, 1..6), 1..5),
        ) {
            let mut tx = helpers::transmitter("p", mode);
            let mut airtime = Duration::ZERO;
            for sizes in &bursts {
                airtime += tx.transmit_aggregate(sizes).unwrap();
                prop_assert!(tx.accumulator().is_empty());
            }
            let stats = tx.stats();
            prop_assert_eq!(stats.ppdus, bursts.len() as u64);
            prop_assert_eq!(stats.mpdus, bursts.iter().map(|b| b.len() as u64).sum::<u64>());
            prop_assert_eq!(
                stats.bytes,
                bursts.iter().flatten().map(|&s| u64::from(s)).sum::<u64>()
            );
            prop_assert_eq!(stats.airtime(), airtime);
        }

        #[test]
        fn aggregate_never_beats_preamble(mode in aggregating_mode(), sizes in prop::collection::vec(1000u32..3000, 2..6)) {
            let mut tx = helpers::transmitter("p", mode);
            let vector = *tx.tx_vector();
            let airtime = tx.transmit_aggregate(&sizes).unwrap();
            let empty = tx_duration(0, &vector, tx.preamble(), tx.frequency_mhz()).unwrap();
            prop_assert!(airtime >= empty);
        }
    }
}
