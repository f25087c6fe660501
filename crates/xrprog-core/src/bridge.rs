//! Bus transaction bridge: validate externally supplied transaction
//! descriptors against the wire grammar, apply per-device write limits,
//! then execute them on the bus.
//!
//! A descriptor is an ordered list of 16-bit words. Real bus bytes occupy
//! 0x00..=0xFF; the values above that range are control sentinels, so they
//! can never collide with an address or command byte:
//!
//! ```text
//! write:  [addr_wr, cmd, data0, data1, ...]
//! read:   [addr_wr, cmd, REPEAT_START, addr_rd, READ_ONE, pad...]
//! ```
//!
//! For a read, the number of bytes fetched is the word count minus the
//! four-word header. Validation is pure: no bus traffic happens until a
//! descriptor has passed every grammar rule and (for writes) the limit
//! tables.

use crate::bus::PmicBus;
use crate::error::{Error, Result};
use bitflags::bitflags;
use maybe_async::maybe_async;

/// Control sentinel: repeated-start condition, switches a descriptor from
/// write to read.
pub const REPEAT_START: u16 = 0x0100;
/// Control sentinel: read the following words as single bytes.
pub const READ_ONE: u16 = 0x0101;
/// Control sentinel: block read. Recognized by the grammar but not
/// implemented by [`execute`].
pub const READ_BLOCK: u16 = 0x0102;

/// Hard cap on descriptor length in words.
pub const XACT_MAX_ITEMS: usize = 24;
/// Maximum payload bytes a write descriptor can carry.
pub const XACT_MAX_DATA: usize = XACT_MAX_ITEMS - 2;

bitflags! {
    /// Grammar rules a descriptor can violate. Checks are independent and
    /// the failures are OR-combined, so one diagnostic reports everything
    /// wrong with a descriptor at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyntaxViolation: u8 {
        /// Write address above 0xEE (reserved for 10-bit addressing).
        const ADDR_RESERVED = 1;
        /// Write address has the read bit set; every transaction starts
        /// with a write.
        const ADDR_NOT_WRITE = 1 << 1;
        /// Command code does not fit in one byte.
        const CMD_WIDTH = 1 << 2;
        /// Read marker in a position where a plain data byte is expected.
        const MARKER_MISPLACED = 1 << 3;
        /// `REPEAT_START` not followed by a read address and a read marker.
        const BAD_READ_TAIL = 1 << 4;
        /// `REPEAT_START` with fewer than two words after it.
        const TRUNCATED_READ = 1 << 5;
    }
}

/// Read-mode marker carried by a validated read descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One byte per remaining descriptor word.
    Single,
    /// SMBus-style block read. Parsed but rejected at execution.
    Block,
}

/// A validated transaction, ready for [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Xact {
    /// Write `data` to register `cmd` on device `addr`.
    Write {
        /// Device write address.
        addr: u8,
        /// Command/register code.
        cmd: u8,
        /// Payload bytes following the command.
        data: heapless::Vec<u8, XACT_MAX_DATA>,
    },
    /// Write `cmd` to `addr`, repeated-start, then read `count` bytes.
    Read {
        /// Device write address used for the command phase.
        addr: u8,
        /// Command/register code.
        cmd: u8,
        /// Device read address after the repeated start.
        addr_rd: u8,
        /// Read-mode marker.
        mode: ReadMode,
        /// Number of bytes to fetch.
        count: usize,
    },
}

impl Xact {
    /// Device write address this transaction targets.
    pub fn addr(&self) -> u8 {
        match self {
            Self::Write { addr, .. } | Self::Read { addr, .. } => *addr,
        }
    }
}

fn is_marker(word: u16) -> bool {
    word > 0xFF
}

/// Check a raw descriptor against the wire grammar and decode it.
///
/// Pure; performs no bus traffic. All grammar failures are collected into
/// one [`Error::InvalidXact`] bitmask.
pub fn parse(words: &[u16]) -> Result<Xact> {
    if words.len() < 2 {
        return Err(Error::XactTooShort);
    }
    if words.len() > XACT_MAX_ITEMS {
        return Err(Error::XactTooLong);
    }
    let mut bad = SyntaxViolation::empty();
    let mut read = false;
    // Addresses above 8-bit 0xEE are reserved for 10-bit addressing.
    if words[0] > 0xEE {
        bad |= SyntaxViolation::ADDR_RESERVED;
    }
    // Even read transactions start with a write.
    if words[0] & 1 != 0 {
        bad |= SyntaxViolation::ADDR_NOT_WRITE;
    }
    if words[1] > 0xFF {
        bad |= SyntaxViolation::CMD_WIDTH;
    }
    if words.len() > 2 {
        if words[2] == REPEAT_START {
            read = true;
            if words.len() > 4 {
                if words[3] & 1 == 0 {
                    bad |= SyntaxViolation::BAD_READ_TAIL;
                }
                if words[4] != READ_ONE && words[4] != READ_BLOCK {
                    bad |= SyntaxViolation::BAD_READ_TAIL;
                }
            } else {
                bad |= SyntaxViolation::TRUNCATED_READ;
            }
        } else if words[2..].iter().any(|&w| is_marker(w)) {
            // A marker anywhere in the data tail means the caller lost
            // track of the framing.
            bad |= SyntaxViolation::MARKER_MISPLACED;
        }
    }
    if !bad.is_empty() {
        return Err(Error::InvalidXact(bad));
    }
    if read {
        let mode = if words[4] == READ_BLOCK {
            ReadMode::Block
        } else {
            ReadMode::Single
        };
        Ok(Xact::Read {
            addr: words[0] as u8,
            cmd: words[1] as u8,
            addr_rd: words[3] as u8,
            mode,
            // Words past the four-word header each stand for one byte
            // to be read back.
            count: words.len() - 4,
        })
    } else {
        let mut data = heapless::Vec::new();
        // The item cap above leaves at most XACT_MAX_DATA payload words.
        for &w in &words[2..] {
            data.push(w as u8).map_err(|_| Error::XactTooLong)?;
        }
        Ok(Xact::Write {
            addr: words[0] as u8,
            cmd: words[1] as u8,
            data,
        })
    }
}

/// Inclusive bounds on the value written to one register.
#[derive(Debug, Clone, Copy)]
pub struct RegLimit {
    /// Command/register code the bounds apply to.
    pub cmd: u8,
    /// Smallest permitted value.
    pub min: u16,
    /// Largest permitted value.
    pub max: u16,
}

/// Limit table for one bus device.
#[derive(Debug, Clone, Copy)]
pub struct DeviceLimits<'a> {
    /// Device write address the table applies to.
    pub addr: u8,
    /// Per-register bounds.
    pub limits: &'a [RegLimit],
}

/// Write-limit policy: the set of guarded devices.
///
/// Devices and registers with no entry are not policed (fail open); an
/// out-of-range value on a guarded register rejects the whole transaction
/// before any bus traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitSet<'a> {
    /// Guarded devices.
    pub devices: &'a [DeviceLimits<'a>],
}

impl LimitSet<'_> {
    /// Check a write transaction against the policy. Reads pass untouched.
    ///
    /// One-byte payloads are compared as-is; two-byte payloads as a
    /// little-endian word, matching the chip's register width.
    pub fn check(&self, xact: &Xact) -> Result<()> {
        let (addr, cmd, data) = match xact {
            Xact::Write { addr, cmd, data } => (*addr, *cmd, data.as_slice()),
            Xact::Read { .. } => return Ok(()),
        };
        let Some(dev) = self.devices.iter().find(|d| d.addr == addr) else {
            return Ok(());
        };
        let Some(limit) = dev.limits.iter().find(|l| l.cmd == cmd) else {
            return Ok(());
        };
        let value = match data {
            [] => return Ok(()),
            [b] => u16::from(*b),
            [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        };
        if value < limit.min || value > limit.max {
            return Err(Error::LimitViolation { addr, cmd, value });
        }
        Ok(())
    }
}

/// Parse a raw descriptor and vet it against the write-limit policy.
///
/// With the `remove-safeguards` feature the policy step is compiled out
/// and only the grammar is enforced.
pub fn sanitize(words: &[u16], limits: &LimitSet<'_>) -> Result<Xact> {
    let xact = parse(words)?;
    #[cfg(not(feature = "remove-safeguards"))]
    limits.check(&xact)?;
    #[cfg(feature = "remove-safeguards")]
    let _ = limits;
    Ok(xact)
}

/// Bytes read back by a transaction; empty for writes.
pub type XactResponse = heapless::Vec<u8, XACT_MAX_DATA>;

/// Execute a validated transaction on the bus.
///
/// Only hand this a value produced by [`sanitize`] (or [`parse`] when the
/// policy is intentionally bypassed); it assumes the grammar already held.
#[maybe_async]
pub async fn execute<B>(bus: &mut B, xact: &Xact) -> Result<XactResponse>
where
    B: PmicBus + ?Sized,
{
    let mut resp = XactResponse::new();
    match xact {
        Xact::Write { addr, cmd, data } => {
            bus.write(*addr, *cmd, data).await?;
        }
        Xact::Read {
            mode: ReadMode::Block,
            ..
        } => return Err(Error::ReadBlockUnimplemented),
        Xact::Read {
            addr, cmd, count, ..
        } => {
            resp.resize_default(*count).map_err(|_| Error::XactTooLong)?;
            bus.read(*addr, *cmd, &mut resp).await?;
        }
    }
    Ok(resp)
}

/// Post-transaction side effect for one device, keyed by write address.
///
/// Hooks observe traffic after the bus primitive has succeeded; they fail
/// open, so a device nobody registered a hook for is simply not acted on.
#[cfg(feature = "alloc")]
pub trait XactHook {
    /// Device write address this hook watches.
    fn addr(&self) -> u8;
    /// Called after a successful write of `data` to register `cmd`.
    fn on_write(&mut self, cmd: u8, data: &[u8]);
    /// Called after a successful read of `data` from register `cmd`.
    fn on_read(&mut self, cmd: u8, data: &[u8]);
}

/// Registry of per-device transaction hooks.
#[cfg(feature = "alloc")]
#[derive(Default)]
pub struct HookRegistry {
    hooks: alloc::vec::Vec<alloc::boxed::Box<dyn XactHook>>,
}

#[cfg(feature = "alloc")]
impl HookRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook. Multiple hooks may watch the same address.
    pub fn register(&mut self, hook: alloc::boxed::Box<dyn XactHook>) {
        self.hooks.push(hook);
    }

    fn dispatch(&mut self, xact: &Xact, resp: &[u8]) {
        for hook in self.hooks.iter_mut().filter(|h| h.addr() == xact.addr()) {
            match xact {
                Xact::Write { cmd, data, .. } => hook.on_write(*cmd, data),
                Xact::Read { cmd, .. } => hook.on_read(*cmd, resp),
            }
        }
    }
}

/// [`execute`], then run the registered hooks over the result.
#[cfg(feature = "alloc")]
#[maybe_async]
pub async fn execute_hooked<B>(
    bus: &mut B,
    xact: &Xact,
    hooks: &mut HookRegistry,
) -> Result<XactResponse>
where
    B: PmicBus + ?Sized,
{
    let resp = execute(bus, xact).await?;
    hooks.dispatch(xact, &resp);
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_descriptor_parses() {
        let xact = parse(&[0x5A, 0x10, 0x12, 0x34]).unwrap();
        match xact {
            Xact::Write { addr, cmd, data } => {
                assert_eq!(addr, 0x5A);
                assert_eq!(cmd, 0x10);
                assert_eq!(data.as_slice(), &[0x12, 0x34]);
            }
            other => panic!("expected write, got {:?}", other),
        }
    }

    #[test]
    fn send_byte_descriptor_parses() {
        // Two words is the legal minimum (SMBus send-byte shape).
        let xact = parse(&[0x5A, 0x09]).unwrap();
        assert!(matches!(xact, Xact::Write { ref data, .. } if data.is_empty()));
    }

    #[test]
    fn read_descriptor_parses_with_count() {
        let xact = parse(&[0x5A, 0x30, REPEAT_START, 0x5B, READ_ONE, 0, 0]).unwrap();
        match xact {
            Xact::Read {
                addr,
                cmd,
                addr_rd,
                mode,
                count,
            } => {
                assert_eq!((addr, cmd, addr_rd), (0x5A, 0x30, 0x5B));
                assert_eq!(mode, ReadMode::Single);
                assert_eq!(count, 3);
            }
            other => panic!("expected read, got {:?}", other),
        }
    }

    #[test]
    fn too_short_rejected() {
        assert_eq!(parse(&[0x5A]), Err(Error::XactTooShort));
        assert_eq!(parse(&[]), Err(Error::XactTooShort));
    }

    #[test]
    fn too_long_rejected() {
        // A 30-word read descriptor would ask for more bytes than a
        // response buffer can hold; it must die in parse, not truncate.
        let mut long_read = [READ_ONE; 30];
        long_read[0] = 0x5A;
        long_read[1] = 0x10;
        long_read[2] = REPEAT_START;
        long_read[3] = 0x5B;
        assert_eq!(parse(&long_read), Err(Error::XactTooLong));

        // Same cap for writes: 25 words is one payload byte too many.
        let long_write = [0x5Au16; 25];
        assert_eq!(parse(&long_write), Err(Error::XactTooLong));

        // Exactly at the cap is still fine.
        let mut full_write = [0x00u16; XACT_MAX_ITEMS];
        full_write[0] = 0x5A;
        full_write[1] = 0x10;
        assert!(parse(&full_write).is_ok());
    }

    #[test]
    fn violations_are_or_combined() {
        // Reserved address, read bit set, and an oversized command all at
        // once: one diagnostic must carry all three bits.
        let err = parse(&[0xF1, 0x1FF, 0x00]).unwrap_err();
        let Error::InvalidXact(bad) = err else {
            panic!("expected InvalidXact, got {:?}", err);
        };
        assert!(bad.contains(SyntaxViolation::ADDR_RESERVED));
        assert!(bad.contains(SyntaxViolation::ADDR_NOT_WRITE));
        assert!(bad.contains(SyntaxViolation::CMD_WIDTH));
    }

    #[test]
    fn marker_in_data_tail_rejected() {
        for deep in [
            &[0x5A, 0x10, READ_ONE][..],
            &[0x5A, 0x10, 0x00, READ_BLOCK][..],
            &[0x5A, 0x10, 0x00, 0x00, REPEAT_START][..],
        ] {
            assert_eq!(
                parse(deep),
                Err(Error::InvalidXact(SyntaxViolation::MARKER_MISPLACED)),
                "descriptor {:?}",
                deep
            );
        }
    }

    #[test]
    fn truncated_read_rejected() {
        assert_eq!(
            parse(&[0x5A, 0x10, REPEAT_START, 0x5B]),
            Err(Error::InvalidXact(SyntaxViolation::TRUNCATED_READ))
        );
    }

    #[test]
    fn bad_read_tail_rejected() {
        // Read address with the read bit clear.
        assert_eq!(
            parse(&[0x5A, 0x10, REPEAT_START, 0x5A, READ_ONE]),
            Err(Error::InvalidXact(SyntaxViolation::BAD_READ_TAIL))
        );
        // Garbage where the read marker belongs.
        assert_eq!(
            parse(&[0x5A, 0x10, REPEAT_START, 0x5B, 0x00]),
            Err(Error::InvalidXact(SyntaxViolation::BAD_READ_TAIL))
        );
    }

    #[test]
    fn block_read_parses() {
        let xact = parse(&[0x5A, 0x30, REPEAT_START, 0x5B, READ_BLOCK, 0]).unwrap();
        assert!(matches!(
            xact,
            Xact::Read {
                mode: ReadMode::Block,
                ..
            }
        ));
    }

    const GUARDED: LimitSet<'static> = LimitSet {
        devices: &[DeviceLimits {
            addr: 0x5A,
            limits: &[RegLimit {
                cmd: 0x10,
                min: 0x0000,
                max: 0x0080,
            }],
        }],
    };

    #[test]
    fn limit_rejects_out_of_range_write() {
        let err = sanitize(&[0x5A, 0x10, 0xAB], &GUARDED).unwrap_err();
        assert_eq!(
            err,
            Error::LimitViolation {
                addr: 0x5A,
                cmd: 0x10,
                value: 0xAB,
            }
        );
    }

    #[test]
    fn limit_passes_in_range_write() {
        assert!(sanitize(&[0x5A, 0x10, 0x7F], &GUARDED).is_ok());
    }

    #[test]
    fn limit_compares_word_writes_little_endian() {
        // 0x34, 0x00 -> 0x0034, in range; 0x34, 0x12 -> 0x1234, out.
        assert!(sanitize(&[0x5A, 0x10, 0x34, 0x00], &GUARDED).is_ok());
        assert!(sanitize(&[0x5A, 0x10, 0x34, 0x12], &GUARDED).is_err());
    }

    #[test]
    fn limit_fails_open_for_unknown_device_and_cmd() {
        // Unlisted device.
        assert!(sanitize(&[0x5C, 0x10, 0xFF], &GUARDED).is_ok());
        // Listed device, unlisted register.
        assert!(sanitize(&[0x5A, 0x11, 0xFF], &GUARDED).is_ok());
        // Reads bypass the policy even on a guarded register.
        assert!(sanitize(&[0x5A, 0x10, REPEAT_START, 0x5B, READ_ONE, 0], &GUARDED).is_ok());
    }

    #[test]
    fn sanitize_is_idempotent_on_valid_input() {
        let words = [0x5A, 0x10, 0x40];
        let a = sanitize(&words, &GUARDED).unwrap();
        let b = sanitize(&words, &GUARDED).unwrap();
        assert_eq!(a, b);
    }
}
