//! DMG (60 GHz) payload timing and transmitted bit counts
//!
//! All four DMG PHYs run at a chip rate of 1.76 GHz. Durations are computed
//! in whole chips and converted to nanoseconds with exact integer rounding.

use std::time::Duration;

use phy_mode::{CodeRate, ModulationClass, TxVector, WifiMode};
use tracing::debug;

use crate::error::TimingError;

/// LDPC codeword length in bits
const LDPC_CODEWORD_BITS: u64 = 672;

/// Control PHY LDPC information bits per codeword (shortened 3/4 code)
const CONTROL_INFO_BITS: i64 = 168;

/// Control PHY LDPC parity bits per codeword
const CONTROL_PARITY_BITS: i64 = 168;

/// Control PHY needs a payload beyond the 6 bytes carried in the header codeword
const CONTROL_MIN_PAYLOAD: u32 = 7;

/// Chips per SC symbol block, and the guard interval closing the last block
const SC_BLOCK_CHIPS: u64 = 512;
const SC_GUARD_CHIPS: u64 = 64;

/// Data symbols per low-power SC block
const LP_SC_DATA_SYMBOLS: u64 = 392;

/// OFDM symbol duration (Tsys)
const OFDM_SYMBOL_NS: u64 = 242;

/// Shortest SC payload ahead of a training field:
/// (aBRPminSCblocks * 512 + 64) chips of 0.57 ns, truncated
const SC_BRP_MIN_NS: u64 = 5289;

/// Shortest OFDM payload ahead of a training field: aBRPminOFDMblocks symbols
const OFDM_BRP_MIN_NS: u64 = 20 * OFDM_SYMBOL_NS;

/// Bits of the STF, CEF and header that precede every SC or OFDM payload
const PRE_PAYLOAD_BITS: u64 = 3328;

/// Convert chips at 1.76 GHz to nanoseconds, rounding up
fn chips_to_ns(chips: u64) -> u64 {
    (chips * 25).div_ceil(44)
}

/// Coded bits per 512-chip SC block (Table 21-20)
fn sc_coded_bits_per_block(mode: &WifiMode) -> Result<u64, TimingError> {
    match mode.constellation_size() {
        2 => Ok(448),
        4 => Ok(2 * 448),
        16 => Ok(4 * 448),
        64 => Ok(6 * 448),
        256 => Ok(8 * 448),
        other => Err(TimingError::UnsupportedConstellation {
            class: mode.class(),
            constellation_size: other,
        }),
    }
}

/// Coded bits per OFDM symbol (Table 21-14)
fn ofdm_coded_bits_per_symbol(mode: &WifiMode) -> Result<u64, TimingError> {
    match mode.constellation_size() {
        2 => Ok(336),
        4 => Ok(2 * 336),
        16 => Ok(4 * 336),
        64 => Ok(6 * 336),
        other => Err(TimingError::UnsupportedConstellation {
            class: mode.class(),
            constellation_size: other,
        }),
    }
}

/// LDPC coded bits for `data_bits` payload bits
fn coded_bits(mode: &WifiMode, data_bits: u64) -> Result<u64, TimingError> {
    match mode.code_rate() {
        CodeRate::Rate1_4 => Ok(data_bits * 4),
        CodeRate::Rate1_2 => Ok(data_bits * 2),
        CodeRate::Rate13_16 => Ok((data_bits * 16).div_ceil(13)),
        CodeRate::Rate3_4 => Ok((data_bits * 4).div_ceil(3)),
        CodeRate::Rate5_8 => Ok((data_bits * 8).div_ceil(5)),
        code_rate => Err(TimingError::UnsupportedCodeRate {
            class: mode.class(),
            code_rate,
        }),
    }
}

/// Number of LDPC codewords for a payload
fn codewords(mode: &WifiMode, size: u32) -> Result<u64, TimingError> {
    let data_bits = u64::from(size) * 8;
    Ok(coded_bits(mode, data_bits)?.div_ceil(LDPC_CODEWORD_BITS))
}

#[derive(Debug, Clone, Copy)]
struct ScLayout {
    blocks: u64,
    coded_bits_per_block: u64,
}

fn sc_layout(size: u32, mode: &WifiMode) -> Result<ScLayout, TimingError> {
    let coded_bits_per_block = sc_coded_bits_per_block(mode)?;
    let ncw = codewords(mode, size)?;
    Ok(ScLayout {
        blocks: (ncw * LDPC_CODEWORD_BITS).div_ceil(coded_bits_per_block),
        coded_bits_per_block,
    })
}

#[derive(Debug, Clone, Copy)]
struct OfdmLayout {
    symbols: u64,
    coded_bits_per_symbol: u64,
}

fn ofdm_layout(size: u32, mode: &WifiMode) -> Result<OfdmLayout, TimingError> {
    let coded_bits_per_symbol = ofdm_coded_bits_per_symbol(mode)?;
    let ncw = codewords(mode, size)?;
    Ok(OfdmLayout {
        symbols: (ncw * LDPC_CODEWORD_BITS).div_ceil(coded_bits_per_symbol),
        coded_bits_per_symbol,
    })
}

/// Duration of the data blocks of an SC or low-power SC payload
fn sc_blocks_ns(blocks: u64, tx: &TxVector) -> u64 {
    let ns = chips_to_ns(blocks * SC_BLOCK_CHIPS + SC_GUARD_CHIPS);
    if tx.training_field_length != 0 {
        ns.max(SC_BRP_MIN_NS)
    } else {
        ns
    }
}

/// Control PHY payload (Clause 21.4.3.3)
///
/// The first codeword carries 6 payload bytes alongside the header, so the
/// payload accounts for `size - 6` bytes spread over the remaining codewords.
pub fn control_payload(size: u32, tx: &TxVector) -> Result<Duration, TimingError> {
    if size < CONTROL_MIN_PAYLOAD {
        return Err(TimingError::PayloadTooShort {
            class: ModulationClass::DmgCtrl,
            size,
            minimum: CONTROL_MIN_PAYLOAD,
        });
    }
    let bits = i64::from(size - 6) * 8;
    let ncw = 1 + (bits + CONTROL_INFO_BITS - 1) / CONTROL_INFO_BITS;

    let ns = if tx.training_field_length == 0 {
        // Bits in every codeword after the first except the last, then the last
        let ldpcw = (bits + ncw - 2) / (ncw - 1);
        let ldplcw = bits - (ncw - 2) * ldpcw;
        let encoded_symbols =
            (CONTROL_PARITY_BITS + ldpcw) * (ncw - 2) + (CONTROL_PARITY_BITS + ldplcw);
        let chips = (encoded_symbols * 32) as u64;
        debug!(
            "control payload {} bytes: {} codewords, {} encoded symbols",
            size, ncw, encoded_symbols
        );
        chips_to_ns(chips)
    } else {
        // (88 + bits + 168 Ncw) * 0.57 ns * 32
        let units = (88 + bits + ncw * CONTROL_INFO_BITS) as u64;
        (units * 456).div_ceil(25)
    };
    Ok(Duration::from_nanos(ns))
}

/// Single carrier payload (Clause 21.6.3.2.3.3)
pub fn sc_payload(size: u32, tx: &TxVector) -> Result<Duration, TimingError> {
    let layout = sc_layout(size, &tx.mode)?;
    let ns = sc_blocks_ns(layout.blocks, tx);
    debug!(
        "{} {} bytes: {} blocks, {} ns",
        tx.mode, size, layout.blocks, ns
    );
    Ok(Duration::from_nanos(ns))
}

/// OFDM payload (Clause 21.5.3.2.3.3)
pub fn ofdm_payload(size: u32, tx: &TxVector) -> Result<Duration, TimingError> {
    let layout = ofdm_layout(size, &tx.mode)?;
    let mut ns = layout.symbols * OFDM_SYMBOL_NS;
    if tx.training_field_length != 0 {
        ns = ns.max(OFDM_BRP_MIN_NS);
    }
    debug!(
        "{} {} bytes: {} symbols, {} ns",
        tx.mode, size, layout.symbols, ns
    );
    Ok(Duration::from_nanos(ns))
}

/// Low-power single carrier payload (Clause 21.7.2.3)
///
/// RS(224,208) outer code over bytes, then an (Nsbc, 8) inner block code,
/// packed 392 data symbols per 512-chip block.
pub fn lp_sc_payload(size: u32, tx: &TxVector) -> Result<Duration, TimingError> {
    let mode = &tx.mode;
    let block_code_bits = match mode.code_rate() {
        CodeRate::Rate13_28 => 16,
        CodeRate::Rate13_21 => 12,
        CodeRate::Rate52_63 => 9,
        CodeRate::Rate13_14 => 8,
        code_rate => {
            return Err(TimingError::UnsupportedCodeRate {
                class: mode.class(),
                code_rate,
            })
        }
    };
    let bits_per_symbol = match mode.constellation_size() {
        2 => 1,
        4 => 2,
        other => {
            return Err(TimingError::UnsupportedConstellation {
                class: mode.class(),
                constellation_size: other,
            })
        }
    };

    let rs_codewords = u64::from(size).div_ceil(208);
    let rs_bytes = u64::from(size) + 16 * rs_codewords;
    let encoded_bits = rs_bytes * block_code_bits;
    let blocks = encoded_bits.div_ceil(LP_SC_DATA_SYMBOLS * bits_per_symbol);
    let ns = sc_blocks_ns(blocks, tx);
    debug!(
        "{} {} bytes: {} RS codewords, {} blocks, {} ns",
        mode, size, rs_codewords, blocks, ns
    );
    Ok(Duration::from_nanos(ns))
}

/// Bits put on air for a DMG SC or OFDM PPDU, preamble and header included
pub fn transmitted_bits(size: u32, tx: &TxVector) -> Result<u64, TimingError> {
    match tx.mode.class() {
        ModulationClass::DmgSc => {
            let layout = sc_layout(size, &tx.mode)?;
            Ok(PRE_PAYLOAD_BITS
                + 1024
                + (layout.blocks + 1) * 64
                + layout.blocks * layout.coded_bits_per_block)
        }
        ModulationClass::DmgOfdm => {
            let layout = ofdm_layout(size, &tx.mode)?;
            Ok(PRE_PAYLOAD_BITS + 672 + layout.symbols * layout.coded_bits_per_symbol)
        }
        class => Err(TimingError::UnsupportedModulationClass {
            class,
            operation: "transmitted bit count",
        }),
    }
}
