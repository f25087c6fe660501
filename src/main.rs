//! xrprog - XRP7724 PMIC programmer
//!
//! Programs the PMIC's runtime register space and non-volatile flash over
//! the management bus, and forwards raw bus transactions through a
//! validating bridge. All chip logic lives in `xrprog-core`; this binary
//! picks a bus backend, parses arguments and reports progress.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use xrprog_core::bus::PmicBus;
use xrprog_dummy::DummyPmic;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let mut bus = open_bus(&cli.bus)?;

    match cli.command {
        Commands::Boot => commands::run_boot(&mut bus, cli.dev),
        Commands::Program => commands::run_program(&mut bus, cli.dev),
        Commands::Hex { input } => commands::run_hex(&mut bus, cli.dev, &input),
        Commands::Flash { input } => commands::run_flash(&mut bus, cli.dev, input.as_deref()),
        Commands::Dump => commands::run_dump(&mut bus, cli.dev),
        Commands::Xact { words } => commands::run_xact(&mut bus, &words),
    }
}

/// Open the named bus backend
///
/// Only the in-memory emulator is wired up so far; a hardware backend
/// slots in here once one exists.
fn open_bus(name: &str) -> Result<Box<dyn PmicBus + Send>, Box<dyn std::error::Error>> {
    match name {
        "dummy" => Ok(Box::new(DummyPmic::new())),
        other => Err(format!("Unknown bus backend: {} (available: dummy)", other).into()),
    }
}
