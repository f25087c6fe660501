//! Flash page programming state machine
//!
//! Pages are written as whole 64-byte units and every phase runs in strict
//! order: clear, erase, program-mode init, write stream, verify. The chip
//! gives no way to observe page state, so nothing is cached - each phase
//! confirms itself by readback, and a guard register bracketing the flash
//! commands detects write-path corruption (see ANP-38, Figures 3-5).
//!
//! Retry budgets are part of the protocol, not tuning knobs:
//! - clear/erase: 20 busy polls per command, 10 command attempts when the
//!   status word is stuck, 5 restarts of the whole sub-protocol when the
//!   guard register is corrupted;
//! - the write stream never retries - a readback mismatch fails the page
//!   and the caller restarts from the clear phase.

use crate::bus::PmicBus;
use crate::error::{Error, Result};
use crate::protocol;
use crate::regs;
use maybe_async::maybe_async;

/// Flash page size in bytes; pages are written as whole units
pub const PAGE_SIZE: usize = 64;

/// Busy polls per page command before declaring a timeout
pub const POLL_BUDGET: usize = 20;

/// Page command attempts while the status word reads the stuck sentinel
pub const ATTEMPT_BUDGET: usize = 10;

/// Restarts of the clear/erase sub-protocol on guard corruption
pub const GUARD_BUDGET: usize = 5;

/// Status value that marks a failed clear/erase round
const STATUS_STUCK: u8 = 0xFF;

/// The two retryable page operations sharing one sub-protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOp {
    /// FLASH_PAGE_CLEAR: mode 1, 10 ms dwell (ANP-38 Figure 3)
    Clear,
    /// FLASH_PAGE_ERASE: mode 5, 50 ms dwell (ANP-38 Figure 4)
    Erase,
}

impl PageOp {
    fn cmd(self) -> u8 {
        match self {
            PageOp::Clear => regs::FLASH_PAGE_CLEAR,
            PageOp::Erase => regs::FLASH_PAGE_ERASE,
        }
    }

    fn mode(self) -> u8 {
        match self {
            PageOp::Clear => 1,
            PageOp::Erase => 5,
        }
    }

    fn dwell_ms(self) -> u32 {
        match self {
            PageOp::Clear => 10,
            PageOp::Erase => 50,
        }
    }
}

/// Run one clear or erase operation against a page, with full retry budget
///
/// Timeout (busy never clearing) is fatal with no further retries; a stuck
/// status word retries the page command; a corrupted guard register
/// restarts the whole sub-protocol including the guard rewrite.
#[maybe_async]
pub async fn process_page<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    page_no: u8,
    op: PageOp,
) -> Result<()> {
    for retry in 0..GUARD_BUDGET {
        protocol::write_guard(bus, dev).await?;
        bus.write(dev, regs::FLASH_INIT, &[0, op.mode()]).await?;
        bus.sleep_ms(50).await;

        let mut status = STATUS_STUCK;
        for _attempt in 0..ATTEMPT_BUDGET {
            bus.write(dev, op.cmd(), &[0, page_no]).await?;
            bus.sleep_ms(500).await;

            let mut busy = 1u8;
            let mut polls = 0;
            while polls < POLL_BUDGET {
                let mut word = [0u8; 2];
                bus.read(dev, op.cmd(), &mut word).await?;
                status = word[0];
                busy = word[1];
                polls += 1;
                if busy == 0 {
                    break;
                }
                bus.sleep_ms(op.dwell_ms()).await;
            }
            log::debug!(
                "page {}: {} polls, status 0x{:02X}",
                page_no,
                polls,
                status
            );
            if busy != 0 {
                log::error!("page {} {:?}: busy never cleared", page_no, op);
                return Err(Error::Timeout);
            }
            if status != STATUS_STUCK {
                break;
            }
        }
        if status == STATUS_STUCK {
            log::error!("page {} {:?}: status stuck at 0xFF", page_no, op);
            return Err(Error::StatusStuck);
        }

        // The command round looked clean; the guard register tells us
        // whether the write path survived it
        let v = protocol::read_guard(bus, dev).await?;
        if v == regs::GUARD_SENTINEL {
            log::debug!("page {} {:?} complete", page_no, op);
            return Ok(());
        }
        log::warn!(
            "guard read 0x{:02X} after {:?}; fault {}",
            v,
            op,
            retry
        );
    }
    Err(Error::PageFailed { page: page_no })
}

/// Stream a payload into flash at a byte address, verifying twice
///
/// Two bytes at a time through the data port, read straight back from the
/// auto-incrementing port (catches transient bus corruption immediately),
/// then a second full top-to-bottom pass (catches drift in the chip's
/// auto-increment addressing, which is not otherwise observable). Any
/// mismatch fails the page; there is no finer-grained retry.
#[maybe_async]
pub async fn push_low<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    addr: u16,
    data: &[u8],
) -> Result<()> {
    if data.len() % 2 != 0 {
        return Err(Error::OddLength);
    }
    if !protocol::reg_write_check(bus, dev, regs::FLASH_PROGRAM_ADDRESS, addr).await? {
        log::error!("can't set flash program address");
        return Err(Error::FlashAddress);
    }
    for (jx, pair) in data.chunks_exact(2).enumerate() {
        bus.sleep_ms(12).await;
        bus.write(dev, regs::FLASH_PROGRAM_DATA, pair).await?;
        bus.sleep_ms(12).await;

        let mut rd = [0u8; 2];
        bus.read(dev, regs::FLASH_PROGRAM_DATA_INC_ADDRESS, &mut rd)
            .await?;
        bus.sleep_ms(12).await;
        if rd[..] != *pair {
            log::error!(
                "readback fail: 0x{:02X}:0x{:02X}  0x{:02X}:0x{:02X}",
                rd[0],
                pair[0],
                rd[1],
                pair[1]
            );
            return Err(Error::VerifyMismatch {
                addr: addr + (jx as u16) * 2,
                expected: pair[0],
                found: rd[0],
            });
        }
    }
    log::debug!("page data streamed, double-checking");
    bus.sleep_ms(12).await;
    if !protocol::reg_write_check(bus, dev, regs::FLASH_PROGRAM_ADDRESS, addr).await? {
        log::error!("can't set flash program address");
        return Err(Error::FlashAddress);
    }
    for (jx, pair) in data.chunks_exact(2).enumerate() {
        bus.sleep_ms(10).await;
        let mut rd = [0u8; 2];
        bus.read(dev, regs::FLASH_PROGRAM_DATA_INC_ADDRESS, &mut rd)
            .await?;
        if rd[..] != *pair {
            log::error!(
                "verify-pass fail: 0x{:02X}:0x{:02X}  0x{:02X}:0x{:02X}",
                rd[0],
                pair[0],
                rd[1],
                pair[1]
            );
            return Err(Error::VerifyMismatch {
                addr: addr + (jx as u16) * 2,
                expected: pair[0],
                found: rd[0],
            });
        }
    }
    Ok(())
}

/// Clear, erase, program and verify one 64-byte page
#[maybe_async]
pub async fn program_page<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    page_no: u8,
    data: &[u8],
) -> Result<()> {
    log::info!("FLASH_PAGE_CLEAR {}", page_no);
    process_page(bus, dev, page_no, PageOp::Clear).await?;
    log::info!("FLASH_PAGE_ERASE {}", page_no);
    process_page(bus, dev, page_no, PageOp::Erase).await?;

    // On to programming (ANP-38 Figure 5)
    protocol::write_guard(bus, dev).await?;
    bus.sleep_ms(12).await;
    let v = protocol::read_guard(bus, dev).await?;
    if v != regs::GUARD_SENTINEL {
        log::error!("guard read 0x{:02X} before programming", v);
        return Err(Error::GuardFault { found: v });
    }
    bus.sleep_ms(12).await;
    protocol::reg_write(bus, dev, regs::FLASH_INIT, 1).await?;
    bus.sleep_ms(10).await;
    push_low(bus, dev, (page_no as u16) * PAGE_SIZE as u16, data).await?;
    let v = protocol::read_guard(bus, dev).await?;
    if v != regs::GUARD_SENTINEL {
        log::error!("guard read 0x{:02X} after programming", v);
        return Err(Error::GuardFault { found: v });
    }
    Ok(())
}

/// Program a whole flash image as consecutive pages starting at page 0
///
/// The image length must be a whole number of pages; the first page
/// failure aborts the rest.
#[maybe_async]
pub async fn program_image<B: PmicBus + ?Sized>(bus: &mut B, dev: u8, image: &[u8]) -> Result<()> {
    if image.is_empty() || image.len() % PAGE_SIZE != 0 {
        return Err(Error::ImageSize { found: image.len() });
    }
    for (page_no, page) in image.chunks_exact(PAGE_SIZE).enumerate() {
        program_page(bus, dev, page_no as u8, page).await?;
    }
    log::info!("flash programming complete");
    Ok(())
}
