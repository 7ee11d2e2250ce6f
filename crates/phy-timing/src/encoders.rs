//! Number of BCC encoders (Nes) for HT and VHT payloads
//!
//! Taken from the HT tables 20-35/20-36 and the VHT tables 22-30 to 22-61.
//! The rules are evaluated in order and the last matching rule wins, so a
//! later, more specific rule overrides an earlier one. VHT with more than
//! four streams is not covered and keeps a single encoder.

use phy_mode::{ModulationClass, TxVector};

#[derive(Debug, Clone, Copy)]
enum McsMatch {
    AtLeast(u8),
    Exactly(u8),
    OneOf(&'static [u8]),
}

#[derive(Debug, Clone, Copy)]
struct EncoderRule {
    class: Option<ModulationClass>,
    channel_width_mhz: Option<u16>,
    nss: Option<u8>,
    mcs: McsMatch,
    encoders: u32,
}

impl EncoderRule {
    const fn new(channel_width_mhz: u16, nss: u8, mcs: McsMatch, encoders: u32) -> Self {
        Self {
            class: None,
            channel_width_mhz: Some(channel_width_mhz),
            nss: Some(nss),
            mcs,
            encoders,
        }
    }

    fn matches(&self, tx: &TxVector, mcs: u8) -> bool {
        self.class.map_or(true, |class| class == tx.mode.class())
            && self
                .channel_width_mhz
                .map_or(true, |width| width == tx.channel_width_mhz)
            && self.nss.map_or(true, |nss| nss == tx.nss)
            && match self.mcs {
                McsMatch::AtLeast(min) => mcs >= min,
                McsMatch::Exactly(value) => mcs == value,
                McsMatch::OneOf(values) => values.contains(&mcs),
            }
    }
}

static ENCODER_RULES: &[EncoderRule] = &[
    EncoderRule {
        class: Some(ModulationClass::Ht),
        channel_width_mhz: None,
        nss: None,
        mcs: McsMatch::OneOf(&[21, 22, 23, 28, 29, 30, 31]),
        encoders: 2,
    },
    EncoderRule::new(40, 3, McsMatch::AtLeast(8), 2),
    EncoderRule::new(80, 2, McsMatch::AtLeast(7), 2),
    EncoderRule::new(80, 3, McsMatch::AtLeast(7), 2),
    EncoderRule::new(80, 3, McsMatch::Exactly(9), 3),
    EncoderRule::new(80, 4, McsMatch::AtLeast(4), 2),
    EncoderRule::new(80, 4, McsMatch::AtLeast(7), 3),
    EncoderRule {
        class: Some(ModulationClass::Vht),
        channel_width_mhz: Some(160),
        nss: None,
        mcs: McsMatch::Exactly(7),
        encoders: 2,
    },
    EncoderRule::new(160, 2, McsMatch::AtLeast(4), 2),
    EncoderRule::new(160, 2, McsMatch::AtLeast(7), 3),
    EncoderRule::new(160, 3, McsMatch::AtLeast(3), 2),
    EncoderRule::new(160, 3, McsMatch::AtLeast(5), 3),
    EncoderRule::new(160, 3, McsMatch::AtLeast(7), 4),
    EncoderRule::new(160, 4, McsMatch::AtLeast(2), 2),
    EncoderRule::new(160, 4, McsMatch::AtLeast(4), 3),
    EncoderRule::new(160, 4, McsMatch::AtLeast(5), 4),
    EncoderRule::new(160, 4, McsMatch::AtLeast(7), 6),
];

/// Number of BCC encoders for an HT or VHT vector (1 for anything else)
pub fn bcc_encoders(tx: &TxVector) -> u32 {
    let Some(mcs) = tx.mode.mcs() else {
        return 1;
    };
    ENCODER_RULES
        .iter()
        .rev()
        .find(|rule| rule.matches(tx, mcs))
        .map_or(1, |rule| rule.encoders)
}
