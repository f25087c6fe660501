//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u16
pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u16>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a string as a hex or decimal u8
fn parse_hex_u8(s: &str) -> Result<u8, String> {
    parse_hex_u16(s).and_then(|v| {
        u8::try_from(v).map_err(|_| format!("Value 0x{:X} does not fit in a byte", v))
    })
}

#[derive(Parser)]
#[command(name = "xrprog")]
#[command(author, version, about = "XRP7724 PMIC programmer", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Bus backend to use [available: dummy]
    #[arg(short, long, global = true, default_value = "dummy")]
    pub bus: String,

    /// PMIC bus address
    #[arg(short, long, global = true, default_value = "0x28", value_parser = parse_hex_u8)]
    pub dev: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Program the runtime configuration unless the chip is already up
    Boot,

    /// Program the runtime configuration and enable operate mode
    Program,

    /// Feed a hex record file into runtime register space
    Hex {
        /// Input file path ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Program a flash image page by page
    Flash {
        /// Input image (defaults to the compiled-in factory image)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Dump the chip's status and telemetry registers
    Dump,

    /// Run one raw bus transaction through the bridge
    ///
    /// Words are hex: addr_wr, command, then data bytes for a write, or
    /// 0x100 (repeat start), addr_rd and 0x101 (read one) followed by one
    /// word per byte to read.
    Xact {
        /// Transaction descriptor words
        #[arg(required = true, value_parser = parse_hex_u16)]
        words: Vec<u16>,
    },
}
