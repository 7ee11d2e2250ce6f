//! Command line arguments

use std::path::PathBuf;

use argh::FromArgs;
use phy_mode::{Preamble, WifiMode};

/// Compute 802.11 PPDU airtime.
#[derive(FromArgs, Debug, PartialEq)]
pub struct AirtimeArgs {
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
pub enum Command {
    Frame(FrameArgs),
    Scenario(ScenarioArgs),
    Modes(ModesArgs),
}

/// Time one PPDU field by field.
#[derive(FromArgs, Debug, Clone, PartialEq)]
#[argh(subcommand, name = "frame")]
pub struct FrameArgs {
    /// payload mode, by catalog name (e.g. HtMcs7)
    #[argh(positional)]
    pub mode: WifiMode,

    /// payload size in bytes
    #[argh(positional)]
    pub size: u32,

    /// channel width in MHz, the mode's usual width by default
    #[argh(option, long = "width")]
    pub channel_width_mhz: Option<u16>,

    /// number of spatial streams
    #[argh(option, default = "1")]
    pub nss: u8,

    /// number of extension spatial streams
    #[argh(option, default = "0")]
    pub ness: u8,

    /// use the short guard interval
    #[argh(switch, long = "sgi")]
    pub short_guard_interval: bool,

    /// use space-time block coding
    #[argh(switch)]
    pub stbc: bool,

    /// DMG training field length
    #[argh(option, long = "training", default = "0")]
    pub training_field_length: u16,

    /// preamble (long, short, ht-mixed, ht-greenfield, vht, dmg)
    #[argh(option)]
    pub preamble: Option<Preamble>,

    /// operating frequency in MHz
    #[argh(option, long = "freq", default = "5180")]
    pub frequency_mhz: u16,
}

/// Run a JSON scenario and print the airtime report.
#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand, name = "scenario")]
pub struct ScenarioArgs {
    /// scenario file
    #[argh(positional)]
    pub path: PathBuf,

    /// print the report as JSON
    #[argh(switch)]
    pub json: bool,
}

/// List catalog modes.
#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand, name = "modes")]
pub struct ModesArgs {
    /// only list modes whose name or class contains this text
    #[argh(positional)]
    pub filter: Option<String>,
}
