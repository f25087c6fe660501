//! PMIC bring-up: push the runtime configuration and flip the chip to
//! operate mode.
//!
//! Both entry points bracket the record stream with a marker byte written
//! to a scratch register. The marker is read back after programming; a
//! mismatch means the act of programming corrupted unrelated chip state,
//! in which case the chip is left out of operate mode.

use crate::bus::PmicBus;
use crate::error::{Error, Result};
use crate::record::dispatch;
use crate::{protocol, regs};
use maybe_async::maybe_async;

/// Program the compiled-in runtime configuration into device `dev`.
///
/// `marker` should vary from run to run so a stale scratch value from an
/// earlier attempt cannot mask corruption.
#[maybe_async]
pub async fn go<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, marker: u8) -> Result<()> {
    log::info!("XRP7724 go [{:02x}]", dev);
    // Chip must not already be in operate mode.
    protocol::reg_write_check(bus, dev, regs::PWR_CHIP_READY, 0x0000).await?;
    protocol::set_runtime(bus, dev, regs::SCRATCH, marker).await?;
    dispatch::run_static(bus, dev).await?;
    finish(bus, dev, marker).await
}

/// Feed an external hex byte stream to device `dev`, runtime records only.
///
/// Same marker bracketing as [`go`]; the stream replaces the compiled-in
/// image.
#[maybe_async]
pub async fn hex_in<B, I>(bus: &mut B, dev: u8, bytes: I, marker: u8) -> Result<()>
where
    B: PmicBus + ?Sized,
    I: IntoIterator<Item = u8>,
{
    log::info!("XRP7724 hex in [{:02x}]", dev);
    protocol::reg_write_check(bus, dev, regs::PWR_CHIP_READY, 0x0000).await?;
    protocol::set_runtime(bus, dev, regs::SCRATCH, marker).await?;
    dispatch::run_hex(bus, dev, bytes).await?;
    finish(bus, dev, marker).await
}

#[maybe_async]
async fn finish<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, marker: u8) -> Result<()> {
    let v = protocol::read_runtime(bus, dev, regs::SCRATCH).await?;
    if v != marker {
        log::error!("write corrupted (0x{:02x} != 0x{:02x})", marker, v);
        return Err(Error::VerifyMismatch {
            addr: regs::SCRATCH,
            expected: marker,
            found: v,
        });
    }
    protocol::reg_write_check(bus, dev, regs::PWR_CHIP_READY, 0x0001).await?;
    Ok(())
}

/// Boot the PMIC unless any channel is already regulating.
///
/// A chip with live outputs was configured by an earlier run (or came up
/// from its own flash); reprogramming it under load is not safe, so this
/// logs and returns without touching it.
#[maybe_async]
pub async fn boot<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, marker: u8) -> Result<()> {
    let mut pwr_on = false;
    for chn in 1..=4 {
        pwr_on |= protocol::ch_status(bus, dev, chn).await?;
    }
    if pwr_on {
        log::info!("XRP already ON. Skipping autoboot...");
        return Ok(());
    }
    go(bus, dev, marker).await?;
    // Let the regulators come up before anyone polls channel status.
    bus.sleep_ms(1000).await;
    Ok(())
}
