//! XRP7724 command codes and runtime register addresses
//!
//! One-byte "standard" commands (ANP-38) carry 16-bit data words and drive
//! flash programming; 16-bit "runtime" addresses (ANP-39) carry single data
//! bytes and live above 0x8000.

// ============================================================================
// Standard commands (one-byte command, two-byte data)
// ============================================================================

/// Host status word
pub const HOST_STS: u8 = 0x02;
/// Latched fault status
pub const FAULT_STATUS: u8 = 0x05;
/// Per-channel power-good / fault status
pub const PWR_GET_STATUS: u8 = 0x09;
/// Chip ready flag; 0 while programming, 1 for operate mode
pub const PWR_CHIP_READY: u8 = 0x0E;
/// GPIO pin state
pub const READ_GPIO: u8 = 0x30;
/// Byte address the flash data port reads/writes at
pub const FLASH_PROGRAM_ADDRESS: u8 = 0x40;
/// Flash data port, two bytes per transaction
pub const FLASH_PROGRAM_DATA: u8 = 0x41;
/// Flash data port with auto-incrementing read pointer
pub const FLASH_PROGRAM_DATA_INC_ADDRESS: u8 = 0x42;
/// Flash controller init; data selects clear/erase/program mode
pub const FLASH_INIT: u8 = 0x4D;
/// Clear one 64-byte flash page
pub const FLASH_PAGE_CLEAR: u8 = 0x4E;
/// Erase one 64-byte flash page
pub const FLASH_PAGE_ERASE: u8 = 0x4F;

// ============================================================================
// Runtime register space (two-byte address, one-byte data)
// ============================================================================

/// Runtime addresses have the high bit set; below this is flash
pub const RUNTIME_BASE: u16 = 0x8000;

/// Scratch register used as a corruption canary around whole-image programs
pub const SCRATCH: u16 = 0x8000;

/// Flash programming delay guard register (YFLASHPGMDELAY, ANP-38)
///
/// Written with [`GUARD_SENTINEL`] before flash operations and re-read
/// afterwards to detect write-path corruption.
pub const YFLASHPGMDELAY: u16 = 0x8068;

/// Value the guard register must hold across a flash operation
pub const GUARD_SENTINEL: u8 = 0xFF;

/// Do not write: Exar's UnivPMIC code base says so
pub const SKIP_WRITE: u16 = 0xD022;

/// Excluded from readback verification; undocumented, ask MaxLinear
pub const SKIP_VERIFY: u16 = 0xFFAD;
