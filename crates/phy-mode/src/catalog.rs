//! Built-in MCS catalog
//!
//! Every descriptor the airtime tools know about is a `pub const` in this
//! module and an entry of a single static table. The table is built at
//! compile time, so lookups never race with registration and always return
//! equal values for the same name.

use tracing::trace;

use crate::mode::{CodeRate, WifiMode};
use crate::{ModeError, ModulationClass, Preamble};

// Clause 16 and 17: DSSS and HR-DSSS

pub const DSSS_RATE_1MBPS: WifiMode =
    WifiMode::legacy("DsssRate1Mbps", ModulationClass::Dsss, true, CodeRate::Undefined, 2);
pub const DSSS_RATE_2MBPS: WifiMode =
    WifiMode::legacy("DsssRate2Mbps", ModulationClass::Dsss, true, CodeRate::Undefined, 4);
pub const DSSS_RATE_5_5MBPS: WifiMode =
    WifiMode::legacy("DsssRate5_5Mbps", ModulationClass::HrDsss, true, CodeRate::Undefined, 16);
pub const DSSS_RATE_11MBPS: WifiMode =
    WifiMode::legacy("DsssRate11Mbps", ModulationClass::HrDsss, true, CodeRate::Undefined, 256);

// Clause 19: ERP-OFDM

pub const ERP_OFDM_RATE_6MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate6Mbps", ModulationClass::ErpOfdm, true, CodeRate::Rate1_2, 2);
pub const ERP_OFDM_RATE_9MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate9Mbps", ModulationClass::ErpOfdm, false, CodeRate::Rate3_4, 2);
pub const ERP_OFDM_RATE_12MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate12Mbps", ModulationClass::ErpOfdm, true, CodeRate::Rate1_2, 4);
pub const ERP_OFDM_RATE_18MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate18Mbps", ModulationClass::ErpOfdm, false, CodeRate::Rate3_4, 4);
pub const ERP_OFDM_RATE_24MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate24Mbps", ModulationClass::ErpOfdm, true, CodeRate::Rate1_2, 16);
pub const ERP_OFDM_RATE_36MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate36Mbps", ModulationClass::ErpOfdm, false, CodeRate::Rate3_4, 16);
pub const ERP_OFDM_RATE_48MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate48Mbps", ModulationClass::ErpOfdm, false, CodeRate::Rate2_3, 64);
pub const ERP_OFDM_RATE_54MBPS: WifiMode =
    WifiMode::legacy("ErpOfdmRate54Mbps", ModulationClass::ErpOfdm, false, CodeRate::Rate3_4, 64);

// Clause 18: OFDM, 20 MHz channels

pub const OFDM_RATE_6MBPS: WifiMode =
    WifiMode::legacy("OfdmRate6Mbps", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 2);
pub const OFDM_RATE_9MBPS: WifiMode =
    WifiMode::legacy("OfdmRate9Mbps", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 2);
pub const OFDM_RATE_12MBPS: WifiMode =
    WifiMode::legacy("OfdmRate12Mbps", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 4);
pub const OFDM_RATE_18MBPS: WifiMode =
    WifiMode::legacy("OfdmRate18Mbps", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 4);
pub const OFDM_RATE_24MBPS: WifiMode =
    WifiMode::legacy("OfdmRate24Mbps", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 16);
pub const OFDM_RATE_36MBPS: WifiMode =
    WifiMode::legacy("OfdmRate36Mbps", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 16);
pub const OFDM_RATE_48MBPS: WifiMode =
    WifiMode::legacy("OfdmRate48Mbps", ModulationClass::Ofdm, false, CodeRate::Rate2_3, 64);
pub const OFDM_RATE_54MBPS: WifiMode =
    WifiMode::legacy("OfdmRate54Mbps", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 64);

// Clause 18: OFDM, 10 MHz channels

pub const OFDM_RATE_3MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate3MbpsBW10MHz", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 2);
pub const OFDM_RATE_4_5MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate4_5MbpsBW10MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 2);
pub const OFDM_RATE_6MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate6MbpsBW10MHz", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 4);
pub const OFDM_RATE_9MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate9MbpsBW10MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 4);
pub const OFDM_RATE_12MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate12MbpsBW10MHz", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 16);
pub const OFDM_RATE_18MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate18MbpsBW10MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 16);
pub const OFDM_RATE_24MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate24MbpsBW10MHz", ModulationClass::Ofdm, false, CodeRate::Rate2_3, 64);
pub const OFDM_RATE_27MBPS_BW10MHZ: WifiMode =
    WifiMode::legacy("OfdmRate27MbpsBW10MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 64);

// Clause 18: OFDM, 5 MHz channels

pub const OFDM_RATE_1_5MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate1_5MbpsBW5MHz", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 2);
pub const OFDM_RATE_2_25MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate2_25MbpsBW5MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 2);
pub const OFDM_RATE_3MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate3MbpsBW5MHz", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 4);
pub const OFDM_RATE_4_5MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate4_5MbpsBW5MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 4);
pub const OFDM_RATE_6MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate6MbpsBW5MHz", ModulationClass::Ofdm, true, CodeRate::Rate1_2, 16);
pub const OFDM_RATE_9MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate9MbpsBW5MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 16);
pub const OFDM_RATE_12MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate12MbpsBW5MHz", ModulationClass::Ofdm, false, CodeRate::Rate2_3, 64);
pub const OFDM_RATE_13_5MBPS_BW5MHZ: WifiMode =
    WifiMode::legacy("OfdmRate13_5MbpsBW5MHz", ModulationClass::Ofdm, false, CodeRate::Rate3_4, 64);

// Clause 20: HT

pub const HT_MCS0: WifiMode = WifiMode::with_mcs("HtMcs0", ModulationClass::Ht, 0);
pub const HT_MCS1: WifiMode = WifiMode::with_mcs("HtMcs1", ModulationClass::Ht, 1);
pub const HT_MCS2: WifiMode = WifiMode::with_mcs("HtMcs2", ModulationClass::Ht, 2);
pub const HT_MCS3: WifiMode = WifiMode::with_mcs("HtMcs3", ModulationClass::Ht, 3);
pub const HT_MCS4: WifiMode = WifiMode::with_mcs("HtMcs4", ModulationClass::Ht, 4);
pub const HT_MCS5: WifiMode = WifiMode::with_mcs("HtMcs5", ModulationClass::Ht, 5);
pub const HT_MCS6: WifiMode = WifiMode::with_mcs("HtMcs6", ModulationClass::Ht, 6);
pub const HT_MCS7: WifiMode = WifiMode::with_mcs("HtMcs7", ModulationClass::Ht, 7);
pub const HT_MCS8: WifiMode = WifiMode::with_mcs("HtMcs8", ModulationClass::Ht, 8);
pub const HT_MCS9: WifiMode = WifiMode::with_mcs("HtMcs9", ModulationClass::Ht, 9);
pub const HT_MCS10: WifiMode = WifiMode::with_mcs("HtMcs10", ModulationClass::Ht, 10);
pub const HT_MCS11: WifiMode = WifiMode::with_mcs("HtMcs11", ModulationClass::Ht, 11);
pub const HT_MCS12: WifiMode = WifiMode::with_mcs("HtMcs12", ModulationClass::Ht, 12);
pub const HT_MCS13: WifiMode = WifiMode::with_mcs("HtMcs13", ModulationClass::Ht, 13);
pub const HT_MCS14: WifiMode = WifiMode::with_mcs("HtMcs14", ModulationClass::Ht, 14);
pub const HT_MCS15: WifiMode = WifiMode::with_mcs("HtMcs15", ModulationClass::Ht, 15);
pub const HT_MCS16: WifiMode = WifiMode::with_mcs("HtMcs16", ModulationClass::Ht, 16);
pub const HT_MCS17: WifiMode = WifiMode::with_mcs("HtMcs17", ModulationClass::Ht, 17);
pub const HT_MCS18: WifiMode = WifiMode::with_mcs("HtMcs18", ModulationClass::Ht, 18);
pub const HT_MCS19: WifiMode = WifiMode::with_mcs("HtMcs19", ModulationClass::Ht, 19);
pub const HT_MCS20: WifiMode = WifiMode::with_mcs("HtMcs20", ModulationClass::Ht, 20);
pub const HT_MCS21: WifiMode = WifiMode::with_mcs("HtMcs21", ModulationClass::Ht, 21);
pub const HT_MCS22: WifiMode = WifiMode::with_mcs("HtMcs22", ModulationClass::Ht, 22);
pub const HT_MCS23: WifiMode = WifiMode::with_mcs("HtMcs23", ModulationClass::Ht, 23);
pub const HT_MCS24: WifiMode = WifiMode::with_mcs("HtMcs24", ModulationClass::Ht, 24);
pub const HT_MCS25: WifiMode = WifiMode::with_mcs("HtMcs25", ModulationClass::Ht, 25);
pub const HT_MCS26: WifiMode = WifiMode::with_mcs("HtMcs26", ModulationClass::Ht, 26);
pub const HT_MCS27: WifiMode = WifiMode::with_mcs("HtMcs27", ModulationClass::Ht, 27);
pub const HT_MCS28: WifiMode = WifiMode::with_mcs("HtMcs28", ModulationClass::Ht, 28);
pub const HT_MCS29: WifiMode = WifiMode::with_mcs("HtMcs29", ModulationClass::Ht, 29);
pub const HT_MCS30: WifiMode = WifiMode::with_mcs("HtMcs30", ModulationClass::Ht, 30);
pub const HT_MCS31: WifiMode = WifiMode::with_mcs("HtMcs31", ModulationClass::Ht, 31);

// Clause 22: VHT

pub const VHT_MCS0: WifiMode = WifiMode::with_mcs("VhtMcs0", ModulationClass::Vht, 0);
pub const VHT_MCS1: WifiMode = WifiMode::with_mcs("VhtMcs1", ModulationClass::Vht, 1);
pub const VHT_MCS2: WifiMode = WifiMode::with_mcs("VhtMcs2", ModulationClass::Vht, 2);
pub const VHT_MCS3: WifiMode = WifiMode::with_mcs("VhtMcs3", ModulationClass::Vht, 3);
pub const VHT_MCS4: WifiMode = WifiMode::with_mcs("VhtMcs4", ModulationClass::Vht, 4);
pub const VHT_MCS5: WifiMode = WifiMode::with_mcs("VhtMcs5", ModulationClass::Vht, 5);
pub const VHT_MCS6: WifiMode = WifiMode::with_mcs("VhtMcs6", ModulationClass::Vht, 6);
pub const VHT_MCS7: WifiMode = WifiMode::with_mcs("VhtMcs7", ModulationClass::Vht, 7);
pub const VHT_MCS8: WifiMode = WifiMode::with_mcs("VhtMcs8", ModulationClass::Vht, 8);
pub const VHT_MCS9: WifiMode = WifiMode::with_mcs("VhtMcs9", ModulationClass::Vht, 9);

// Clause 21.4: DMG control PHY

pub const DMG_MCS0: WifiMode = WifiMode::dmg(
    "DMG_MCS0",
    ModulationClass::DmgCtrl,
    0,
    true,
    27_500_000,
    CodeRate::Rate1_2,
    2,
);

// Clause 21.6: DMG single carrier PHY

pub const DMG_MCS1: WifiMode = WifiMode::dmg(
    "DMG_MCS1",
    ModulationClass::DmgSc,
    1,
    true,
    385_000_000,
    CodeRate::Rate1_4,
    2,
);
pub const DMG_MCS2: WifiMode = WifiMode::dmg(
    "DMG_MCS2",
    ModulationClass::DmgSc,
    2,
    true,
    770_000_000,
    CodeRate::Rate1_2,
    2,
);
pub const DMG_MCS3: WifiMode = WifiMode::dmg(
    "DMG_MCS3",
    ModulationClass::DmgSc,
    3,
    true,
    962_500_000,
    CodeRate::Rate5_8,
    2,
);
pub const DMG_MCS4: WifiMode = WifiMode::dmg(
    "DMG_MCS4",
    ModulationClass::DmgSc,
    4,
    true,
    1_155_000_000,
    CodeRate::Rate3_4,
    2,
);
pub const DMG_MCS5: WifiMode = WifiMode::dmg(
    "DMG_MCS5",
    ModulationClass::DmgSc,
    5,
    false,
    1_251_250_000,
    CodeRate::Rate13_16,
    2,
);
pub const DMG_MCS6: WifiMode = WifiMode::dmg(
    "DMG_MCS6",
    ModulationClass::DmgSc,
    6,
    false,
    1_540_000_000,
    CodeRate::Rate1_2,
    4,
);
pub const DMG_MCS7: WifiMode = WifiMode::dmg(
    "DMG_MCS7",
    ModulationClass::DmgSc,
    7,
    false,
    1_925_000_000,
    CodeRate::Rate5_8,
    4,
);
pub const DMG_MCS8: WifiMode = WifiMode::dmg(
    "DMG_MCS8",
    ModulationClass::DmgSc,
    8,
    false,
    2_310_000_000,
    CodeRate::Rate3_4,
    4,
);
pub const DMG_MCS9: WifiMode = WifiMode::dmg(
    "DMG_MCS9",
    ModulationClass::DmgSc,
    9,
    false,
    2_502_500_000,
    CodeRate::Rate13_16,
    4,
);
pub const DMG_MCS10: WifiMode = WifiMode::dmg(
    "DMG_MCS10",
    ModulationClass::DmgSc,
    10,
    false,
    3_080_000_000,
    CodeRate::Rate1_2,
    16,
);
pub const DMG_MCS11: WifiMode = WifiMode::dmg(
    "DMG_MCS11",
    ModulationClass::DmgSc,
    11,
    false,
    3_850_000_000,
    CodeRate::Rate5_8,
    16,
);
pub const DMG_MCS12: WifiMode = WifiMode::dmg(
    "DMG_MCS12",
    ModulationClass::DmgSc,
    12,
    false,
    4_620_000_000,
    CodeRate::Rate3_4,
    16,
);

// Clause 21.5: DMG OFDM PHY

pub const DMG_MCS13: WifiMode = WifiMode::dmg(
    "DMG_MCS13",
    ModulationClass::DmgOfdm,
    13,
    true,
    693_000_000,
    CodeRate::Rate1_2,
    2,
);
pub const DMG_MCS14: WifiMode = WifiMode::dmg(
    "DMG_MCS14",
    ModulationClass::DmgOfdm,
    14,
    false,
    866_250_000,
    CodeRate::Rate5_8,
    2,
);
pub const DMG_MCS15: WifiMode = WifiMode::dmg(
    "DMG_MCS15",
    ModulationClass::DmgOfdm,
    15,
    false,
    1_386_000_000,
    CodeRate::Rate1_2,
    4,
);
pub const DMG_MCS16: WifiMode = WifiMode::dmg(
    "DMG_MCS16",
    ModulationClass::DmgOfdm,
    16,
    false,
    1_732_500_000,
    CodeRate::Rate5_8,
    4,
);
pub const DMG_MCS17: WifiMode = WifiMode::dmg(
    "DMG_MCS17",
    ModulationClass::DmgOfdm,
    17,
    false,
    2_079_000_000,
    CodeRate::Rate3_4,
    4,
);
pub const DMG_MCS18: WifiMode = WifiMode::dmg(
    "DMG_MCS18",
    ModulationClass::DmgOfdm,
    18,
    false,
    2_772_000_000,
    CodeRate::Rate1_2,
    16,
);
pub const DMG_MCS19: WifiMode = WifiMode::dmg(
    "DMG_MCS19",
    ModulationClass::DmgOfdm,
    19,
    false,
    3_465_000_000,
    CodeRate::Rate5_8,
    16,
);
pub const DMG_MCS20: WifiMode = WifiMode::dmg(
    "DMG_MCS20",
    ModulationClass::DmgOfdm,
    20,
    false,
    4_158_000_000,
    CodeRate::Rate3_4,
    16,
);
pub const DMG_MCS21: WifiMode = WifiMode::dmg(
    "DMG_MCS21",
    ModulationClass::DmgOfdm,
    21,
    false,
    4_504_500_000,
    CodeRate::Rate13_16,
    16,
);
pub const DMG_MCS22: WifiMode = WifiMode::dmg(
    "DMG_MCS22",
    ModulationClass::DmgOfdm,
    22,
    false,
    5_197_500_000,
    CodeRate::Rate5_8,
    64,
);
pub const DMG_MCS23: WifiMode = WifiMode::dmg(
    "DMG_MCS23",
    ModulationClass::DmgOfdm,
    23,
    false,
    6_237_000_000,
    CodeRate::Rate3_4,
    64,
);
pub const DMG_MCS24: WifiMode = WifiMode::dmg(
    "DMG_MCS24",
    ModulationClass::DmgOfdm,
    24,
    false,
    6_756_750_000,
    CodeRate::Rate13_16,
    64,
);

// Clause 21.7: DMG low-power single carrier PHY

pub const DMG_MCS25: WifiMode = WifiMode::dmg(
    "DMG_MCS25",
    ModulationClass::DmgLpSc,
    25,
    false,
    626_000_000,
    CodeRate::Rate13_28,
    2,
);
pub const DMG_MCS26: WifiMode = WifiMode::dmg(
    "DMG_MCS26",
    ModulationClass::DmgLpSc,
    26,
    false,
    834_000_000,
    CodeRate::Rate13_21,
    2,
);
pub const DMG_MCS27: WifiMode = WifiMode::dmg(
    "DMG_MCS27",
    ModulationClass::DmgLpSc,
    27,
    false,
    1_112_000_000,
    CodeRate::Rate52_63,
    2,
);
pub const DMG_MCS28: WifiMode = WifiMode::dmg(
    "DMG_MCS28",
    ModulationClass::DmgLpSc,
    28,
    false,
    1_251_000_000,
    CodeRate::Rate13_28,
    4,
);
pub const DMG_MCS29: WifiMode = WifiMode::dmg(
    "DMG_MCS29",
    ModulationClass::DmgLpSc,
    29,
    false,
    1_668_000_000,
    CodeRate::Rate13_21,
    4,
);
pub const DMG_MCS30: WifiMode = WifiMode::dmg(
    "DMG_MCS30",
    ModulationClass::DmgLpSc,
    30,
    false,
    2_224_000_000,
    CodeRate::Rate52_63,
    4,
);
pub const DMG_MCS31: WifiMode = WifiMode::dmg(
    "DMG_MCS31",
    ModulationClass::DmgLpSc,
    31,
    false,
    2_503_000_000,
    CodeRate::Rate13_14,
    4,
);

/// Every built-in descriptor
static ALL_MODES: &[WifiMode] = &[
    DSSS_RATE_1MBPS,
    DSSS_RATE_2MBPS,
    DSSS_RATE_5_5MBPS,
    DSSS_RATE_11MBPS,
    ERP_OFDM_RATE_6MBPS,
    ERP_OFDM_RATE_9MBPS,
    ERP_OFDM_RATE_12MBPS,
    ERP_OFDM_RATE_18MBPS,
    ERP_OFDM_RATE_24MBPS,
    ERP_OFDM_RATE_36MBPS,
    ERP_OFDM_RATE_48MBPS,
    ERP_OFDM_RATE_54MBPS,
    OFDM_RATE_6MBPS,
    OFDM_RATE_9MBPS,
    OFDM_RATE_12MBPS,
    OFDM_RATE_18MBPS,
    OFDM_RATE_24MBPS,
    OFDM_RATE_36MBPS,
    OFDM_RATE_48MBPS,
    OFDM_RATE_54MBPS,
    OFDM_RATE_3MBPS_BW10MHZ,
    OFDM_RATE_4_5MBPS_BW10MHZ,
    OFDM_RATE_6MBPS_BW10MHZ,
    OFDM_RATE_9MBPS_BW10MHZ,
    OFDM_RATE_12MBPS_BW10MHZ,
    OFDM_RATE_18MBPS_BW10MHZ,
    OFDM_RATE_24MBPS_BW10MHZ,
    OFDM_RATE_27MBPS_BW10MHZ,
    OFDM_RATE_1_5MBPS_BW5MHZ,
    OFDM_RATE_2_25MBPS_BW5MHZ,
    OFDM_RATE_3MBPS_BW5MHZ,
    OFDM_RATE_4_5MBPS_BW5MHZ,
    OFDM_RATE_6MBPS_BW5MHZ,
    OFDM_RATE_9MBPS_BW5MHZ,
    OFDM_RATE_12MBPS_BW5MHZ,
    OFDM_RATE_13_5MBPS_BW5MHZ,
    HT_MCS0,
    HT_MCS1,
    HT_MCS2,
    HT_MCS3,
    HT_MCS4,
    HT_MCS5,
    HT_MCS6,
    HT_MCS7,
    HT_MCS8,
    HT_MCS9,
    HT_MCS10,
    HT_MCS11,
    HT_MCS12,
    HT_MCS13,
    HT_MCS14,
    HT_MCS15,
    HT_MCS16,
    HT_MCS17,
    HT_MCS18,
    HT_MCS19,
    HT_MCS20,
    HT_MCS21,
    HT_MCS22,
    HT_MCS23,
    HT_MCS24,
    HT_MCS25,
    HT_MCS26,
    HT_MCS27,
    HT_MCS28,
    HT_MCS29,
    HT_MCS30,
    HT_MCS31,
    VHT_MCS0,
    VHT_MCS1,
    VHT_MCS2,
    VHT_MCS3,
    VHT_MCS4,
    VHT_MCS5,
    VHT_MCS6,
    VHT_MCS7,
    VHT_MCS8,
    VHT_MCS9,
    DMG_MCS0,
    DMG_MCS1,
    DMG_MCS2,
    DMG_MCS3,
    DMG_MCS4,
    DMG_MCS5,
    DMG_MCS6,
    DMG_MCS7,
    DMG_MCS8,
    DMG_MCS9,
    DMG_MCS10,
    DMG_MCS11,
    DMG_MCS12,
    DMG_MCS13,
    DMG_MCS14,
    DMG_MCS15,
    DMG_MCS16,
    DMG_MCS17,
    DMG_MCS18,
    DMG_MCS19,
    DMG_MCS20,
    DMG_MCS21,
    DMG_MCS22,
    DMG_MCS23,
    DMG_MCS24,
    DMG_MCS25,
    DMG_MCS26,
    DMG_MCS27,
    DMG_MCS28,
    DMG_MCS29,
    DMG_MCS30,
    DMG_MCS31,
];

/// Database of built-in modes
pub struct ModeDatabase;

impl ModeDatabase {
    /// Look up a descriptor by its unique name
    pub fn by_name(name: &str) -> Option<WifiMode> {
        let found = ALL_MODES.iter().find(|mode| mode.name() == name).copied();
        if found.is_none() {
            trace!("no mode named {}", name);
        }
        found
    }

    /// All built-in descriptors, grouped by clause
    pub fn all() -> &'static [WifiMode] {
        ALL_MODES
    }

    /// Descriptors of one modulation class, in catalog order
    pub fn for_class(class: ModulationClass) -> impl Iterator<Item = WifiMode> {
        ALL_MODES
            .iter()
            .filter(move |mode| mode.class() == class)
            .copied()
    }

    /// HT MCS 0-31
    pub fn ht_mcs(index: u8) -> Result<WifiMode, ModeError> {
        Self::by_mcs(&[ModulationClass::Ht], index)
    }

    /// VHT MCS 0-9
    pub fn vht_mcs(index: u8) -> Result<WifiMode, ModeError> {
        Self::by_mcs(&[ModulationClass::Vht], index)
    }

    /// DMG MCS 0-31 across the control, SC, OFDM and low-power SC PHYs
    pub fn dmg_mcs(index: u8) -> Result<WifiMode, ModeError> {
        Self::by_mcs(
            &[
                ModulationClass::DmgCtrl,
                ModulationClass::DmgSc,
                ModulationClass::DmgOfdm,
                ModulationClass::DmgLpSc,
            ],
            index,
        )
    }

    fn by_mcs(classes: &[ModulationClass], index: u8) -> Result<WifiMode, ModeError> {
        ALL_MODES
            .iter()
            .find(|mode| classes.contains(&mode.class()) && mode.mcs() == Some(index))
            .copied()
            .ok_or(ModeError::InvalidMcsIndex {
                class: classes[0],
                index,
            })
    }

    /// Mode used to send the PLCP header of a PPDU carrying `payload`
    ///
    /// For OFDM-based classes only the SIGNAL field uses this mode; the
    /// SERVICE field travels at the payload rate.
    pub fn header_mode(
        payload: WifiMode,
        preamble: Preamble,
        channel_width_mhz: u16,
    ) -> Result<WifiMode, ModeError> {
        match payload.class() {
            ModulationClass::Ofdm | ModulationClass::Ht | ModulationClass::Vht => {
                Ok(match channel_width_mhz {
                    5 => OFDM_RATE_1_5MBPS_BW5MHZ,
                    10 => OFDM_RATE_3MBPS_BW10MHZ,
                    _ => OFDM_RATE_6MBPS,
                })
            }
            ModulationClass::ErpOfdm => Ok(ERP_OFDM_RATE_6MBPS),
            ModulationClass::Dsss | ModulationClass::HrDsss => {
                if preamble == Preamble::Long || payload == DSSS_RATE_1MBPS {
                    Ok(DSSS_RATE_1MBPS)
                } else {
                    Ok(DSSS_RATE_2MBPS)
                }
            }
            ModulationClass::DmgCtrl => Ok(DMG_MCS0),
            ModulationClass::DmgSc => Ok(DMG_MCS1),
            ModulationClass::DmgOfdm => Ok(DMG_MCS13),
            ModulationClass::DmgLpSc => Err(ModeError::NoHeaderMode(payload.class())),
        }
    }

    /// Mode of the HT-SIG field
    pub fn ht_header_mode() -> WifiMode {
        HT_MCS0
    }

    /// Mode of the VHT-SIG fields
    pub fn vht_header_mode() -> WifiMode {
        VHT_MCS0
    }
}
