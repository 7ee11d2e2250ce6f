//! 802.11 Airtime Calculator
//!
//! Times single PPDUs field by field, runs JSON transmitter scenarios and
//! lists the mode catalog.

mod args;
mod frame;

use anyhow::Context;
use args::{AirtimeArgs, Command, FrameArgs, ModesArgs, ScenarioArgs};
use frame::FrameBreakdown;
use phy_mode::{ModeDatabase, TxVector};
use phy_sim::Scenario;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Include all our crates in the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "airtime=info,phy_mode=info,phy_timing=info,phy_sim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: AirtimeArgs = argh::from_env();
    match args.command {
        Command::Frame(frame) => print_frame(&frame),
        Command::Scenario(scenario) => run_scenario(&scenario).await,
        Command::Modes(modes) => {
            list_modes(&modes);
            Ok(())
        }
    }
}

fn print_frame(args: &FrameArgs) -> anyhow::Result<()> {
    let breakdown = FrameBreakdown::compute(args)?;
    println!("{}", breakdown);
    Ok(())
}

async fn run_scenario(args: &ScenarioArgs) -> anyhow::Result<()> {
    let scenario = Scenario::load(&args.path)
        .with_context(|| format!("failed to load scenario {}", args.path.display()))?;
    tracing::info!(
        "Loaded scenario '{}' from {}",
        scenario.name,
        args.path.display()
    );
    let report = scenario.run().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn list_modes(args: &ModesArgs) {
    let filter = args.filter.as_deref().map(str::to_ascii_lowercase);
    for mode in ModeDatabase::all() {
        let matches = filter.as_deref().map_or(true, |f| {
            mode.name().to_ascii_lowercase().contains(f)
                || mode.class().name().to_ascii_lowercase().contains(f)
        });
        if !matches {
            continue;
        }
        // Rates at the mode's usual width, long guard interval, one stream
        let width = TxVector::new(*mode).channel_width_mhz;
        println!(
            "{:<26} {:<18} {:>14} b/s{}",
            mode.name(),
            mode.class().name(),
            mode.data_rate(width, false, 1),
            if mode.is_mandatory() { "  mandatory" } else { "" }
        );
    }
}
