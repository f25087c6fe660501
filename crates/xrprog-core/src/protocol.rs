//! XRP7724 wire protocol helpers
//!
//! Small command sequences shared by the record dispatcher, the flash
//! programmer and the boot path. Two transaction shapes (see ANP-38/39):
//! one-byte commands with 16-bit big-endian data words, and 16-bit runtime
//! addresses with single data bytes.
//!
//! Uses `maybe_async` to support both sync and async modes:
//! - With `is_sync` feature: blocking/synchronous
//! - Without `is_sync` feature: async

use crate::bus::PmicBus;
use crate::error::Result;
use crate::regs;
use maybe_async::maybe_async;

/// Write one byte to a runtime register, with a logged readback check
///
/// The chip wants 10 ms between the write and any following access. The
/// immediate readback only warns on mismatch; authoritative verification
/// is the dispatcher's separate verify pass.
#[maybe_async]
pub async fn set_runtime<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    addr: u16,
    value: u8,
) -> Result<()> {
    bus.write_reg16(dev, addr, value).await?;
    bus.sleep_ms(10).await;
    let chk = bus.read_reg16(dev, addr).await?;
    if chk != value {
        log::warn!(
            "r[{:04X}] <= {:02X}, readback {:02X}",
            addr,
            value,
            chk
        );
    }
    Ok(())
}

/// Read one byte from a runtime register
#[maybe_async]
pub async fn read_runtime<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, addr: u16) -> Result<u8> {
    bus.read_reg16(dev, addr).await
}

/// Write a 16-bit word to a standard command register
#[maybe_async]
pub async fn reg_write<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    regno: u8,
    value: u16,
) -> Result<()> {
    let data = [(value >> 8) as u8, value as u8];
    bus.write(dev, regno, &data).await
}

/// Read a 16-bit word from a standard command register
#[maybe_async]
pub async fn reg_read<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, regno: u8) -> Result<u16> {
    let mut data = [0u8; 2];
    bus.read(dev, regno, &mut data).await?;
    Ok(((data[0] as u16) << 8) | data[1] as u16)
}

/// Write a command register and confirm it reads back the same word
#[maybe_async]
pub async fn reg_write_check<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    regno: u8,
    value: u16,
) -> Result<bool> {
    reg_write(bus, dev, regno, value).await?;
    bus.sleep_ms(10).await;
    let readback = reg_read(bus, dev, regno).await?;
    if readback != value {
        log::warn!(
            "r[{:02X}] = 0x{:04X} (hoped for 0x{:04X})",
            regno,
            readback,
            value
        );
    }
    Ok(readback == value)
}

/// In-regulation status for XRP channels 1-4
///
/// Invalid channel numbers report not-regulating.
#[maybe_async]
pub async fn ch_status<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, chn: u8) -> Result<bool> {
    if !(1..=4).contains(&chn) {
        return Ok(false);
    }
    let mut data = [0u8; 2];
    bus.read(dev, regs::PWR_GET_STATUS, &mut data).await?;
    Ok((data[0] & !data[1]) & (1 << (chn - 1)) != 0)
}

/// Write the guard sentinel to YFLASHPGMDELAY
#[maybe_async]
pub async fn write_guard<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> Result<()> {
    set_runtime(bus, dev, regs::YFLASHPGMDELAY, regs::GUARD_SENTINEL).await
}

/// Read the guard register back
#[maybe_async]
pub async fn read_guard<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> Result<u8> {
    bus.read_reg16(dev, regs::YFLASHPGMDELAY).await
}

/// Status and telemetry registers worth dumping, with datasheet names
pub const DUMP_TABLE: &[(u8, &str)] = &[
    (regs::HOST_STS, "HOST_STS"),
    (regs::FAULT_STATUS, "FAULT_STATUS"),
    (regs::PWR_GET_STATUS, "STATUS"),
    (regs::PWR_CHIP_READY, "CHIP_READY"),
    (0x10, "VOLTAGE_CH1"),
    (0x11, "VOLTAGE_CH2"),
    (0x12, "VOLTAGE_CH3"),
    (0x13, "VOLTAGE_CH4"),
    (0x14, "VOLTAGE_VIN"),
    (0x15, "TEMP_VTJ"),
    (0x16, "CURRENT_CH1"),
    (0x17, "CURRENT_CH2"),
    (0x18, "CURRENT_CH3"),
    (0x19, "CURRENT_CH4"),
    (regs::READ_GPIO, "READ_GPIO"),
    (regs::FLASH_PROGRAM_ADDRESS, "FLASH_PROGRAM_ADDRESS"),
    (regs::FLASH_PAGE_CLEAR, "FLASH_PAGE_CLEAR"),
    (regs::FLASH_PAGE_ERASE, "FLASH_PAGE_ERASE"),
];

/// Read and log the named status registers (see ANP-38)
///
/// Unreadable registers are reported, not fatal.
#[maybe_async]
pub async fn dump<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> Result<()> {
    log::info!("XRP7724 dump [{:02x}]", dev);
    for &(regno, name) in DUMP_TABLE {
        match reg_read(bus, dev, regno).await {
            Ok(value) => log::info!("r[{:02X}] = 0x{:04X} = {:5}   ({})", regno, value, value, name),
            Err(_) => log::info!("r[{:02X}]    unread          ({})", regno, name),
        }
    }
    Ok(())
}
