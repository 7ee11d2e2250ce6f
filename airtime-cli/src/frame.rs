//! Field-by-field breakdown of one PPDU

use std::fmt;
use std::time::Duration;

use phy_mode::{ModeDatabase, Preamble, TxVector, WifiMode};
use phy_sim::{SimError, TransmitterConfig, VirtualTransmitter};
use phy_timing::{
    bcc_encoders, header_duration, ht_sig_duration, preamble_duration, training_symbol_duration,
    vht_sig_a1_duration, vht_sig_a2_duration, vht_sig_b_duration,
};

use crate::args::FrameArgs;

/// Durations of every field of a PPDU
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBreakdown {
    pub tx: TxVector,
    pub preamble: Preamble,
    pub size: u32,
    pub data_rate: u64,
    pub header_mode: Option<WifiMode>,
    pub bcc_encoders: u32,
    pub preamble_field: Duration,
    pub header: Duration,
    pub ht_sig: Duration,
    pub training: Duration,
    pub vht_sig_a: Duration,
    pub vht_sig_b: Duration,
    pub payload: Duration,
    pub total: Duration,
}

impl FrameBreakdown {
    /// Time one PPDU described on the command line
    pub fn compute(args: &FrameArgs) -> Result<Self, SimError> {
        let mut transmitter = VirtualTransmitter::new(TransmitterConfig {
            id: "frame".to_string(),
            mode: args.mode,
            channel_width_mhz: args.channel_width_mhz,
            nss: args.nss,
            ness: args.ness,
            short_guard_interval: args.short_guard_interval,
            stbc: args.stbc,
            training_field_length: args.training_field_length,
            frequency_mhz: args.frequency_mhz,
            preamble: args.preamble,
        })?;
        let total = transmitter.transmit(args.size)?;

        let tx = *transmitter.tx_vector();
        let preamble = transmitter.preamble();
        let preamble_field = preamble_duration(&tx, preamble);
        let header = header_duration(&tx, preamble);
        let ht_sig = ht_sig_duration(preamble);
        let training = training_symbol_duration(&tx, preamble);
        let vht_sig_a = vht_sig_a1_duration(preamble) + vht_sig_a2_duration(preamble);
        let vht_sig_b = vht_sig_b_duration(preamble);
        let fields = preamble_field + header + ht_sig + training + vht_sig_a + vht_sig_b;

        Ok(Self {
            tx,
            preamble,
            size: args.size,
            data_rate: tx.data_rate(),
            header_mode: ModeDatabase::header_mode(tx.mode, preamble, tx.channel_width_mhz).ok(),
            bcc_encoders: bcc_encoders(&tx),
            preamble_field,
            header,
            ht_sig,
            training,
            vht_sig_a,
            vht_sig_b,
            payload: total.saturating_sub(fields),
            total,
        })
    }
}

impl fmt::Display for FrameBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}), {} bytes, {} MHz, {} stream(s), {} preamble",
            self.tx.mode,
            self.tx.mode.class(),
            self.size,
            self.tx.channel_width_mhz,
            self.tx.nss,
            self.preamble
        )?;
        writeln!(f, "  data rate      {} b/s", self.data_rate)?;
        if let Some(mode) = self.header_mode {
            writeln!(f, "  header mode    {}", mode)?;
        }
        if self.tx.mode.class().uses_mcs_index() {
            writeln!(f, "  BCC encoders   {}", self.bcc_encoders)?;
        }
        let fields = [
            ("preamble", self.preamble_field),
            ("header", self.header),
            ("HT-SIG", self.ht_sig),
            ("training", self.training),
            ("VHT-SIG-A", self.vht_sig_a),
            ("VHT-SIG-B", self.vht_sig_b),
            ("payload", self.payload),
        ];
        for (name, duration) in fields.iter().filter(|(_, d)| !d.is_zero()) {
            writeln!(f, "  {:<14} {:?}", name, duration)?;
        }
        write!(f, "  {:<14} {:?}", "total", self.total)
    }
}
