//! xrprog-dummy - In-memory XRP7724 emulator for testing
//!
//! This crate provides a dummy PMIC that models the chip's runtime
//! register space, flash pages and the flash command state machine in
//! memory. It's useful for testing and development without real hardware,
//! and its fault knobs reproduce the failure modes the programming code
//! has retry budgets for.

use std::collections::BTreeMap;

use xrprog_core::bus::PmicBus;
use xrprog_core::error::{Error, Result};
use xrprog_core::flash::PAGE_SIZE;
use xrprog_core::regs;

/// Emulated flash size: seven 64-byte pages, like the real part.
pub const FLASH_PAGES: usize = 7;
const FLASH_SIZE: usize = FLASH_PAGES * PAGE_SIZE;

/// Fault injection knobs. All off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    /// Page clear/erase never reports idle.
    pub always_busy: bool,
    /// Page clear/erase completes but always reports status 0xFF.
    pub stuck_status: bool,
    /// Reads of the guard register return garbage instead of the sentinel.
    pub corrupt_guard: bool,
    /// Reads of the scratch register return the stored value with a bit
    /// flipped, as if programming trampled it.
    pub corrupt_scratch: bool,
    /// Flip the low bit of the Nth data byte pushed through the flash
    /// write port (counting from 0).
    pub flip_write_at: Option<usize>,
    /// Every bus primitive fails.
    pub fail_bus: bool,
}

/// In-memory PMIC emulator
///
/// Models just enough of the chip to exercise the record dispatcher, the
/// flash page state machine and the transaction bridge: a sparse runtime
/// register map, a 16-bit word per command register, and the program
/// address / auto-incrementing read pointer pair behind the flash data
/// ports.
pub struct DummyPmic {
    runtime: BTreeMap<u16, u8>,
    cmd_regs: BTreeMap<u8, u16>,
    flash: [u8; FLASH_SIZE],
    write_ptr: usize,
    read_ptr: usize,
    /// Busy polls a clear/erase reports before going idle.
    pub busy_polls: u32,
    busy_left: u32,
    page_status: u8,
    /// PWR_GET_STATUS power-good byte.
    pub power_good: u8,
    /// PWR_GET_STATUS fault byte.
    pub power_fault: u8,
    faults: Faults,
    write_counts: BTreeMap<u8, u32>,
    read_counts: BTreeMap<u8, u32>,
    flash_bytes_written: usize,
    /// Total write_reg16 calls.
    pub runtime_writes: u32,
    /// Total read_reg16 calls.
    pub runtime_reads: u32,
    /// Milliseconds the caller asked to sleep (not actually slept).
    pub slept_ms: u64,
}

impl Default for DummyPmic {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyPmic {
    /// Fresh chip: erased flash, empty runtime space, no faults.
    pub fn new() -> Self {
        Self {
            runtime: BTreeMap::new(),
            cmd_regs: BTreeMap::new(),
            flash: [0xFF; FLASH_SIZE],
            write_ptr: 0,
            read_ptr: 0,
            busy_polls: 1,
            busy_left: 0,
            page_status: 0,
            power_good: 0,
            power_fault: 0,
            faults: Faults::default(),
            write_counts: BTreeMap::new(),
            read_counts: BTreeMap::new(),
            flash_bytes_written: 0,
            runtime_writes: 0,
            runtime_reads: 0,
            slept_ms: 0,
        }
    }

    /// Chip with fault injection enabled.
    pub fn with_faults(faults: Faults) -> Self {
        Self {
            faults,
            ..Self::new()
        }
    }

    /// Runtime register content, if anything was ever written there.
    pub fn runtime(&self, addr: u16) -> Option<u8> {
        self.runtime.get(&addr).copied()
    }

    /// 16-bit command register content (0 if never written).
    pub fn cmd_reg(&self, cmd: u8) -> u16 {
        self.cmd_regs.get(&cmd).copied().unwrap_or(0)
    }

    /// Flash contents.
    pub fn flash(&self) -> &[u8] {
        &self.flash
    }

    /// Number of `write` calls issued under a command code.
    pub fn writes_to(&self, cmd: u8) -> u32 {
        self.write_counts.get(&cmd).copied().unwrap_or(0)
    }

    /// Number of `read` calls issued under a command code.
    pub fn reads_of(&self, cmd: u8) -> u32 {
        self.read_counts.get(&cmd).copied().unwrap_or(0)
    }

    /// Total bus primitive calls of any kind.
    pub fn total_ops(&self) -> u64 {
        let w: u32 = self.write_counts.values().sum();
        let r: u32 = self.read_counts.values().sum();
        u64::from(w) + u64::from(r) + u64::from(self.runtime_writes) + u64::from(self.runtime_reads)
    }

    fn word(data: &[u8]) -> u16 {
        match data {
            [] => 0,
            [b] => u16::from(*b),
            [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
        }
    }

    fn start_page_op(&mut self, page: u8) {
        self.busy_left = if self.faults.always_busy {
            u32::MAX
        } else {
            self.busy_polls
        };
        self.page_status = if self.faults.stuck_status { 0xFF } else { 0 };
        let base = usize::from(page) * PAGE_SIZE;
        if base + PAGE_SIZE <= FLASH_SIZE {
            // Clear and erase both leave the page in the erased state.
            self.flash[base..base + PAGE_SIZE].fill(0xFF);
        }
    }
}

impl PmicBus for DummyPmic {
    fn write(&mut self, _dev: u8, cmd: u8, data: &[u8]) -> Result<()> {
        *self.write_counts.entry(cmd).or_insert(0) += 1;
        if self.faults.fail_bus {
            return Err(Error::Transport);
        }
        match cmd {
            regs::FLASH_PROGRAM_ADDRESS => {
                let addr = Self::word(data);
                self.write_ptr = usize::from(addr);
                self.read_ptr = usize::from(addr);
                self.cmd_regs.insert(cmd, addr);
            }
            regs::FLASH_PROGRAM_DATA => {
                for &b in data {
                    let mut b = b;
                    if self.faults.flip_write_at == Some(self.flash_bytes_written) {
                        b ^= 0x01;
                    }
                    self.flash_bytes_written += 1;
                    if self.write_ptr < FLASH_SIZE {
                        self.flash[self.write_ptr] = b;
                    }
                    self.write_ptr += 1;
                }
            }
            regs::FLASH_PAGE_CLEAR | regs::FLASH_PAGE_ERASE => {
                let page = data.get(1).copied().unwrap_or(0);
                self.start_page_op(page);
                self.cmd_regs.insert(cmd, Self::word(data));
            }
            _ => {
                self.cmd_regs.insert(cmd, Self::word(data));
            }
        }
        Ok(())
    }

    fn read(&mut self, _dev: u8, cmd: u8, buf: &mut [u8]) -> Result<()> {
        *self.read_counts.entry(cmd).or_insert(0) += 1;
        if self.faults.fail_bus {
            return Err(Error::Transport);
        }
        match cmd {
            regs::FLASH_PROGRAM_DATA_INC_ADDRESS => {
                for slot in buf.iter_mut() {
                    *slot = if self.read_ptr < FLASH_SIZE {
                        self.flash[self.read_ptr]
                    } else {
                        0xFF
                    };
                    self.read_ptr += 1;
                }
            }
            regs::FLASH_PAGE_CLEAR | regs::FLASH_PAGE_ERASE => {
                let busy = if self.busy_left > 0 {
                    self.busy_left = self.busy_left.saturating_sub(1);
                    1
                } else {
                    0
                };
                if let Some(b) = buf.first_mut() {
                    *b = self.page_status;
                }
                if let Some(b) = buf.get_mut(1) {
                    *b = busy;
                }
            }
            regs::PWR_GET_STATUS => {
                if let Some(b) = buf.first_mut() {
                    *b = self.power_good;
                }
                if let Some(b) = buf.get_mut(1) {
                    *b = self.power_fault;
                }
            }
            _ => {
                let v = self.cmd_reg(cmd).to_be_bytes();
                for (slot, b) in buf.iter_mut().zip(v) {
                    *slot = b;
                }
            }
        }
        Ok(())
    }

    fn write_reg16(&mut self, _dev: u8, addr: u16, value: u8) -> Result<()> {
        if self.faults.fail_bus {
            return Err(Error::Transport);
        }
        self.runtime_writes += 1;
        self.runtime.insert(addr, value);
        Ok(())
    }

    fn read_reg16(&mut self, _dev: u8, addr: u16) -> Result<u8> {
        if self.faults.fail_bus {
            return Err(Error::Transport);
        }
        self.runtime_reads += 1;
        let stored = self.runtime.get(&addr).copied().unwrap_or(0);
        if self.faults.corrupt_guard && addr == regs::YFLASHPGMDELAY {
            return Ok(stored ^ 0xA5);
        }
        if self.faults.corrupt_scratch && addr == regs::SCRATCH {
            return Ok(stored ^ 0x40);
        }
        Ok(stored)
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.slept_ms += u64::from(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;
    use xrprog_core::record::dispatch::{self, Dispatch};
    use xrprog_core::{boot, bridge, flash, image, protocol};

    const DEV: u8 = 0x28;

    fn hex_line(raw: &[u8]) -> String {
        let mut s = String::from(":");
        for b in raw {
            let _ = write!(s, "{:02X}", b);
        }
        s.push('\n');
        s
    }

    #[test]
    fn hex_stream_lands_in_runtime_space() {
        let mut bus = DummyPmic::new();
        let first = image::RUNTIME_IMAGE[0];
        let text = hex_line(first);
        dispatch::run_hex(&mut bus, DEV, text.into_bytes()).unwrap();
        // length, addr hi/lo, type, payload...
        let addr = (u16::from(first[1]) << 8) | u16::from(first[2]);
        for (jx, &b) in first[4..4 + usize::from(first[0])].iter().enumerate() {
            assert_eq!(bus.runtime(addr + jx as u16), Some(b));
        }
    }

    #[test]
    fn terminator_record_touches_no_bus() {
        let mut bus = DummyPmic::new();
        let out = dispatch::dispatch(&mut bus, DEV, &[0x00, 0x00, 0x00, 0x01, 0xFF]).unwrap();
        assert_eq!(out, Dispatch::EndOfStream);
        assert_eq!(bus.total_ops(), 0);
    }

    #[test]
    fn bad_checksum_never_reaches_bus() {
        let mut bus = DummyPmic::new();
        let mut raw = image::RUNTIME_IMAGE[0].to_vec();
        let last = raw.len() - 1;
        raw[last] ^= 0x10;
        let err = dispatch::dispatch(&mut bus, DEV, &raw).unwrap_err();
        assert!(matches!(err, Error::RecordChecksum { .. }));
        assert_eq!(bus.total_ops(), 0);
    }

    #[test]
    fn flash_record_rejected_on_record_path() {
        let mut bus = DummyPmic::new();
        // 1 byte at 0x0100, type 0, valid checksum
        let raw = [0x01, 0x01, 0x00, 0x00, 0xAA, 0x54];
        let err = dispatch::dispatch(&mut bus, DEV, &raw).unwrap_err();
        assert_eq!(err, Error::FlashRecord);
        assert_eq!(bus.total_ops(), 0);
    }

    #[test]
    fn static_image_issues_433_runtime_writes() {
        let mut bus = DummyPmic::new();
        dispatch::run_static(&mut bus, DEV).unwrap();
        // 434 payload bytes across the table, one of them at the 0xD022
        // never-write register.
        assert_eq!(bus.runtime_writes, 433);
        assert_eq!(bus.runtime(regs::SKIP_WRITE), None);
    }

    #[test]
    fn program_page_roundtrip() {
        let mut bus = DummyPmic::new();
        let data: Vec<u8> = (0..PAGE_SIZE as u8).map(|b| b.wrapping_mul(3)).collect();
        flash::program_page(&mut bus, DEV, 2, &data).unwrap();
        let base = 2 * PAGE_SIZE;
        assert_eq!(&bus.flash()[base..base + PAGE_SIZE], &data[..]);
        // Neighbours untouched (still erased).
        assert!(bus.flash()[..base].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn program_image_rejects_ragged_length() {
        let mut bus = DummyPmic::new();
        let err = flash::program_image(&mut bus, DEV, &[0u8; 63]).unwrap_err();
        assert_eq!(err, Error::ImageSize { found: 63 });
        assert_eq!(bus.total_ops(), 0);
    }

    #[test]
    fn factory_flash_image_programs_whole_chip() {
        let mut bus = DummyPmic::new();
        flash::program_image(&mut bus, DEV, image::FLASH_IMAGE).unwrap();
        assert_eq!(bus.flash(), image::FLASH_IMAGE);
    }

    #[test]
    fn always_busy_times_out_after_poll_budget() {
        let mut bus = DummyPmic::with_faults(Faults {
            always_busy: true,
            ..Faults::default()
        });
        let err = flash::process_page(&mut bus, DEV, 0, flash::PageOp::Clear).unwrap_err();
        assert_eq!(err, Error::Timeout);
        // One command attempt, the full poll budget, then a hard stop.
        assert_eq!(bus.writes_to(regs::FLASH_PAGE_CLEAR), 1);
        assert_eq!(
            bus.reads_of(regs::FLASH_PAGE_CLEAR),
            flash::POLL_BUDGET as u32
        );
    }

    #[test]
    fn stuck_status_exhausts_attempt_budget() {
        let mut bus = DummyPmic::with_faults(Faults {
            stuck_status: true,
            ..Faults::default()
        });
        let err = flash::process_page(&mut bus, DEV, 0, flash::PageOp::Erase).unwrap_err();
        assert_eq!(err, Error::StatusStuck);
        assert_eq!(
            bus.writes_to(regs::FLASH_PAGE_ERASE),
            flash::ATTEMPT_BUDGET as u32
        );
    }

    #[test]
    fn corrupt_guard_exhausts_restart_budget() {
        let mut bus = DummyPmic::with_faults(Faults {
            corrupt_guard: true,
            ..Faults::default()
        });
        let err = flash::process_page(&mut bus, DEV, 3, flash::PageOp::Clear).unwrap_err();
        assert_eq!(err, Error::PageFailed { page: 3 });
        // One sub-protocol restart (guard rewrite + INIT) per budget slot.
        assert_eq!(bus.writes_to(regs::FLASH_INIT), flash::GUARD_BUDGET as u32);
    }

    #[test]
    fn inline_readback_mismatch_fails_page() {
        let mut bus = DummyPmic::with_faults(Faults {
            flip_write_at: Some(3),
            ..Faults::default()
        });
        let data = [0x5Au8; PAGE_SIZE];
        let err = flash::program_page(&mut bus, DEV, 0, &data).unwrap_err();
        assert!(matches!(err, Error::VerifyMismatch { .. }));
    }

    #[test]
    fn go_programs_image_and_enables_chip() {
        let mut bus = DummyPmic::new();
        boot::go(&mut bus, DEV, 0x93).unwrap();
        assert_eq!(bus.runtime(regs::SCRATCH), Some(0x93));
        assert_eq!(bus.cmd_reg(regs::PWR_CHIP_READY), 0x0001);
        assert_eq!(bus.runtime_writes, 433 + 1);
    }

    #[test]
    fn go_detects_scratch_corruption() {
        let mut bus = DummyPmic::with_faults(Faults {
            corrupt_scratch: true,
            ..Faults::default()
        });
        let err = boot::go(&mut bus, DEV, 0x93).unwrap_err();
        assert!(matches!(
            err,
            Error::VerifyMismatch {
                addr: regs::SCRATCH,
                ..
            }
        ));
        // Operate mode must not have been enabled.
        assert_ne!(bus.cmd_reg(regs::PWR_CHIP_READY), 0x0001);
    }

    #[test]
    fn boot_skips_a_regulating_chip() {
        let mut bus = DummyPmic::new();
        bus.power_good = 0b0001;
        boot::boot(&mut bus, DEV, 0x93).unwrap();
        assert_eq!(bus.runtime_writes, 0);
    }

    #[test]
    fn hex_in_feeds_stream_with_marker_bracket() {
        let mut bus = DummyPmic::new();
        let mut text = String::new();
        for raw in image::RUNTIME_IMAGE {
            text.push_str(&hex_line(raw));
        }
        boot::hex_in(&mut bus, DEV, text.into_bytes(), 0x95).unwrap();
        assert_eq!(bus.runtime(regs::SCRATCH), Some(0x95));
        assert_eq!(bus.cmd_reg(regs::PWR_CHIP_READY), 0x0001);
    }

    #[test]
    fn out_of_limit_write_never_reaches_bus() {
        let limits = bridge::LimitSet {
            devices: &[bridge::DeviceLimits {
                addr: 0x5A,
                limits: &[bridge::RegLimit {
                    cmd: 0x10,
                    min: 0x0000,
                    max: 0x0080,
                }],
            }],
        };
        let mut bus = DummyPmic::new();
        let err = bridge::sanitize(&[0x5A, 0x10, 0xAB], &limits).unwrap_err();
        assert_eq!(
            err,
            Error::LimitViolation {
                addr: 0x5A,
                cmd: 0x10,
                value: 0xAB,
            }
        );
        assert_eq!(bus.total_ops(), 0);
        // The in-range version goes through.
        let xact = bridge::sanitize(&[0x5A, 0x10, 0x40], &limits).unwrap();
        bridge::execute(&mut bus, &xact).unwrap();
        assert_eq!(bus.cmd_reg(0x10), 0x0040);
    }

    #[test]
    fn bridge_read_returns_register_bytes() {
        let mut bus = DummyPmic::new();
        protocol::reg_write(&mut bus, 0x5A, 0x30, 0x1234).unwrap();
        let xact =
            bridge::parse(&[0x5A, 0x30, bridge::REPEAT_START, 0x5B, bridge::READ_ONE, 0, 0])
                .unwrap();
        // Three words past the header ask for three bytes; the register is
        // only two wide, so the tail byte stays zero.
        let resp = bridge::execute(&mut bus, &xact).unwrap();
        assert_eq!(resp.as_slice(), &[0x12, 0x34, 0x00]);
    }

    #[test]
    fn block_read_rejected_at_execution() {
        let mut bus = DummyPmic::new();
        let xact =
            bridge::parse(&[0x5A, 0x30, bridge::REPEAT_START, 0x5B, bridge::READ_BLOCK, 0]).unwrap();
        let err = bridge::execute(&mut bus, &xact).unwrap_err();
        assert_eq!(err, Error::ReadBlockUnimplemented);
        assert_eq!(bus.total_ops(), 0);
    }

    #[test]
    fn transport_faults_propagate() {
        let mut bus = DummyPmic::with_faults(Faults {
            fail_bus: true,
            ..Faults::default()
        });
        let err = dispatch::run_static(&mut bus, DEV).unwrap_err();
        assert_eq!(err, Error::Transport);
    }

    #[test]
    fn write_hook_observes_traffic() {
        struct Recorder {
            seen: std::rc::Rc<std::cell::RefCell<Vec<(u8, Vec<u8>)>>>,
        }
        impl bridge::XactHook for Recorder {
            fn addr(&self) -> u8 {
                0x5A
            }
            fn on_write(&mut self, cmd: u8, data: &[u8]) {
                self.seen.borrow_mut().push((cmd, data.to_vec()));
            }
            fn on_read(&mut self, _cmd: u8, _data: &[u8]) {}
        }
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut hooks = bridge::HookRegistry::new();
        hooks.register(Box::new(Recorder { seen: seen.clone() }));
        let mut bus = DummyPmic::new();
        let xact = bridge::parse(&[0x5A, 0x10, 0x01]).unwrap();
        bridge::execute_hooked(&mut bus, &xact, &mut hooks).unwrap();
        // A device nobody registered is silently ignored.
        let other = bridge::parse(&[0x5C, 0x10, 0x02]).unwrap();
        bridge::execute_hooked(&mut bus, &other, &mut hooks).unwrap();
        assert_eq!(seen.borrow().as_slice(), &[(0x10, vec![0x01])]);
    }
}
