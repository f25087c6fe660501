//! Record dispatcher
//!
//! Validates one raw record and routes it: runtime (high) addresses are
//! written byte-by-byte over the two-byte-address protocol and verified
//! with a full readback pass; flash (low) addresses are not reachable
//! through the record path and fault - flash images go through
//! [`crate::flash`] as whole pages.

use super::decoder::HexDecoder;
use super::{Record, TYPE_DATA};
use crate::bus::PmicBus;
use crate::error::{Error, Result};
use crate::protocol;
use crate::regs;
use maybe_async::maybe_async;

/// Non-fault dispatch outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Record consumed; feed the next one
    Continue,
    /// Terminator record seen; clean end of stream
    EndOfStream,
}

/// Validate and route one raw record
///
/// Order matters: the record type is inspected first (a terminator ends the
/// stream without touching the bus), then the checksum must validate before
/// the address or payload are used.
#[maybe_async]
pub async fn dispatch<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    raw: &[u8],
) -> Result<Dispatch> {
    let rec = Record::parse(raw)?;
    if rec.record_type() != TYPE_DATA {
        log::debug!("record type {}, end of stream", rec.record_type());
        return Ok(Dispatch::EndOfStream);
    }
    let addr = rec.address();
    if addr < regs::RUNTIME_BASE {
        log::error!("flash record at 0x{:04X} not handled on the record path", addr);
        return Err(Error::FlashRecord);
    }
    push_high(bus, dev, addr, rec.payload()).await?;
    Ok(Dispatch::Continue)
}

/// Write a payload into runtime register space and verify by readback
///
/// Register 0xD022 is never written (Exar's UnivPMIC code base says so) and
/// 0xFFAD is written but excluded from verification (undocumented; treated
/// as a documented exception, not a guess at its semantics).
#[maybe_async]
async fn push_high<B: PmicBus + ?Sized>(
    bus: &mut B,
    dev: u8,
    addr: u16,
    data: &[u8],
) -> Result<()> {
    for (jx, &byte) in data.iter().enumerate() {
        let addr1 = addr.wrapping_add(jx as u16);
        if addr1 == regs::SKIP_WRITE {
            continue;
        }
        protocol::set_runtime(bus, dev, addr1, byte).await?;
    }
    // Double-check
    for (jx, &byte) in data.iter().enumerate() {
        let addr1 = addr.wrapping_add(jx as u16);
        if addr1 == regs::SKIP_WRITE || addr1 == regs::SKIP_VERIFY {
            continue;
        }
        let v = protocol::read_runtime(bus, dev, addr1).await?;
        if v != byte {
            log::error!("r[{:04X}] fault {:02X} != {:02X}", addr1, v, byte);
            return Err(Error::VerifyMismatch {
                addr: addr1,
                expected: byte,
                found: v,
            });
        }
    }
    Ok(())
}

/// Program the compiled-in factory runtime image
///
/// The static table is consumed exactly as a streamed file would be; its
/// trailing terminator record folds into success.
#[maybe_async]
pub async fn run_static<B: PmicBus + ?Sized>(bus: &mut B, dev: u8) -> Result<()> {
    for raw in crate::image::RUNTIME_IMAGE {
        match dispatch(bus, dev, raw).await? {
            Dispatch::Continue => {}
            Dispatch::EndOfStream => break,
        }
    }
    Ok(())
}

/// Decode and dispatch a hex record byte stream
///
/// Runs until a terminator record, a fault, or the stream runs dry. The
/// decoder's own errors (operator abort, overflow) surface unchanged.
#[maybe_async]
pub async fn run_hex<B, I>(bus: &mut B, dev: u8, bytes: I) -> Result<()>
where
    B: PmicBus + ?Sized,
    I: IntoIterator<Item = u8>,
{
    let mut dec = HexDecoder::new();
    for ch in bytes {
        if let Some(raw) = dec.push(ch)? {
            match dispatch(bus, dev, &raw).await? {
                Dispatch::Continue => {}
                Dispatch::EndOfStream => return Ok(()),
            }
        }
    }
    Ok(())
}
