//! CLI command implementations
//!
//! Thin wrappers around the core operations: open the bus, pick a marker
//! byte, report progress. All chip logic lives in `xrprog-core`.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use xrprog_core::bus::PmicBus;
use xrprog_core::flash::PAGE_SIZE;
use xrprog_core::{boot, bridge, flash, image, protocol, regs};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Write limits enforced on bridge transactions to the PMIC
///
/// PWR_CHIP_READY only has two meaningful values; anything else through
/// the raw transaction path is a typo, not an experiment.
pub const PMIC_LIMITS: bridge::LimitSet<'static> = bridge::LimitSet {
    devices: &[bridge::DeviceLimits {
        addr: 0x50,
        limits: &[bridge::RegLimit {
            cmd: regs::PWR_CHIP_READY,
            min: 0x0000,
            max: 0x0001,
        }],
    }],
};

/// Fresh marker byte for the scratch-register corruption check
///
/// Varies per run so a stale value from an earlier attempt cannot mask
/// corruption; the exact value is irrelevant.
fn marker() -> u8 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u8)
        .unwrap_or(0x93)
}

pub fn run_boot<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> CmdResult {
    boot::boot(bus, dev, marker())?;
    Ok(())
}

pub fn run_program<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> CmdResult {
    boot::go(bus, dev, marker())?;
    println!("Runtime configuration programmed");
    Ok(())
}

pub fn run_hex<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, input: &Path) -> CmdResult {
    let bytes = if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(input)?
    };
    boot::hex_in(bus, dev, bytes, marker())?;
    println!("Hex stream programmed");
    Ok(())
}

pub fn run_flash<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, input: Option<&Path>) -> CmdResult {
    let file_image;
    let img: &[u8] = match input {
        Some(path) => {
            file_image = std::fs::read(path)?;
            &file_image
        }
        None => image::FLASH_IMAGE,
    };
    if img.is_empty() || img.len() % PAGE_SIZE != 0 {
        return Err(format!(
            "Image length {} is not a whole number of {}-byte pages",
            img.len(),
            PAGE_SIZE
        )
        .into());
    }

    let pages = img.len() / PAGE_SIZE;
    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({eta}) Programming")?
            .progress_chars("#>-"),
    );
    for (page_no, page) in img.chunks_exact(PAGE_SIZE).enumerate() {
        flash::program_page(bus, dev, page_no as u8, page)?;
        pb.inc(1);
    }
    pb.finish_with_message("Flash programming complete");
    Ok(())
}

pub fn run_dump<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> CmdResult {
    protocol::dump(bus, dev)?;
    Ok(())
}

pub fn run_xact<B: PmicBus + ?Sized>(bus: &mut B, words: &[u16]) -> CmdResult {
    let xact = bridge::sanitize(words, &PMIC_LIMITS)?;
    // Empty for now; device-specific observers slot in here.
    let mut hooks = bridge::HookRegistry::new();
    let resp = bridge::execute_hooked(bus, &xact, &mut hooks)?;
    match &xact {
        bridge::Xact::Write { addr, cmd, data } => {
            println!("(0x{:02x}) 0x{:02x} <= {} bytes written", addr, cmd, data.len());
        }
        bridge::Xact::Read { addr, cmd, .. } => {
            print!("(0x{:02x}) 0x{:02x}:", addr, cmd);
            for b in &resp {
                print!(" 0x{:02x}", b);
            }
            println!();
        }
    }
    Ok(())
}
