//! Management bus trait definitions
//!
//! These traits use `maybe_async` to support both sync and async modes.
//! - By default, the trait is async (suitable for Embassy, tokio)
//! - With the `is_sync` feature, it becomes synchronous
//!
//! The XRP7724 speaks two transaction shapes on the same bus: the standard
//! one-byte-command interface (flash programming, status words) and a
//! two-byte-address one-byte-data interface (runtime register space).
//! Both are expressed here; a HAL maps them onto its I2C peripheral.

use crate::error::Result;
use maybe_async::maybe_async;

/// Management bus master (sync or async depending on `is_sync` feature)
///
/// One implementor owns the bus: all calls are serialized by construction
/// and there is no internal locking. Implementations must not cache device
/// state - every read goes to the wire.
#[maybe_async(AFIT)]
pub trait PmicBus {
    /// Write `data` to the device under a one-byte command code
    async fn write(&mut self, dev: u8, cmd: u8, data: &[u8]) -> Result<()>;

    /// Read `buf.len()` bytes from the device under a one-byte command code
    async fn read(&mut self, dev: u8, cmd: u8, buf: &mut [u8]) -> Result<()>;

    /// Write one byte to a 16-bit runtime register address
    async fn write_reg16(&mut self, dev: u8, addr: u16, value: u8) -> Result<()>;

    /// Read one byte from a 16-bit runtime register address
    async fn read_reg16(&mut self, dev: u8, addr: u16) -> Result<u8>;

    /// Sleep for the specified number of milliseconds
    ///
    /// The chip mandates settle and dwell times between flash operations;
    /// no other bus activity may occur during these.
    async fn sleep_ms(&mut self, ms: u32);
}

// Blanket impl for boxed bus masters to allow trait objects (sync mode only)
// In async mode, traits with async fn are not object-safe
#[cfg(all(feature = "alloc", feature = "is_sync"))]
impl PmicBus for alloc::boxed::Box<dyn PmicBus + Send> {
    fn write(&mut self, dev: u8, cmd: u8, data: &[u8]) -> Result<()> {
        (**self).write(dev, cmd, data)
    }

    fn read(&mut self, dev: u8, cmd: u8, buf: &mut [u8]) -> Result<()> {
        (**self).read(dev, cmd, buf)
    }

    fn write_reg16(&mut self, dev: u8, addr: u16, value: u8) -> Result<()> {
        (**self).write_reg16(dev, addr, value)
    }

    fn read_reg16(&mut self, dev: u8, addr: u16) -> Result<u8> {
        (**self).read_reg16(dev, addr)
    }

    fn sleep_ms(&mut self, ms: u32) {
        (**self).sleep_ms(ms)
    }
}
