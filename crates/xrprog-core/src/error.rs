//! Error types for xrprog-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use crate::bridge::SyntaxViolation;
use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Transport faults
    /// Bus primitive returned non-OK
    Transport,

    // Flash state machine terminal states
    /// Busy flag never cleared within the poll budget
    Timeout,
    /// Page status stuck at the 0xFF sentinel after all attempts
    StatusStuck,
    /// Guard register did not read back its sentinel
    GuardFault {
        /// Value the guard register read back (expected 0xFF)
        found: u8,
    },
    /// Page clear/erase failed after exhausting the guard-level retries
    PageFailed {
        /// Page number that could not be processed
        page: u8,
    },
    /// Could not seat the flash program address
    FlashAddress,
    /// Flash payloads are written two bytes at a time; odd length not allowed
    OddLength,
    /// Image length is not a whole number of pages
    ImageSize {
        /// Length that was supplied
        found: usize,
    },

    // Verification faults
    /// Readback differs from what was written
    VerifyMismatch {
        /// Register or flash address of the first differing byte
        addr: u16,
        /// Byte that was written
        expected: u8,
        /// Byte that was read back
        found: u8,
    },

    // Record format faults
    /// Record checksum did not sum to zero
    RecordChecksum {
        /// The (non-zero) low byte of the record sum
        sum: u8,
    },
    /// Record shorter than its length field claims
    RecordTruncated,
    /// Decoder accumulated more bytes than the record buffer holds
    DecodeOverflow,
    /// Operator cancelled the transfer with the escape byte
    Aborted,
    /// Record targets the flash address space; not handled on the record path
    FlashRecord,

    // Bridge validation faults
    /// Transaction descriptor shorter than the two-word minimum
    XactTooShort,
    /// Transaction descriptor longer than the descriptor word cap
    XactTooLong,
    /// Transaction descriptor violates the wire grammar
    InvalidXact(SyntaxViolation),
    /// Block-read transactions are recognized but not implemented
    ReadBlockUnimplemented,

    // Policy faults
    /// Write value outside the configured limits for this register
    LimitViolation {
        /// Device write address
        addr: u8,
        /// Command/register code
        cmd: u8,
        /// Offending value
        value: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => write!(f, "bus transaction failed"),
            Self::Timeout => write!(f, "flash operation timed out (busy never cleared)"),
            Self::StatusStuck => write!(f, "flash status stuck at 0xFF"),
            Self::GuardFault { found } => {
                write!(f, "guard register read 0x{:02X}, expected 0xFF", found)
            }
            Self::PageFailed { page } => write!(f, "flash page {} failed", page),
            Self::FlashAddress => write!(f, "can't set flash program address"),
            Self::OddLength => write!(f, "odd flash payload length not allowed"),
            Self::ImageSize { found } => {
                write!(f, "image length {} is not a whole number of pages", found)
            }
            Self::VerifyMismatch {
                addr,
                expected,
                found,
            } => write!(
                f,
                "verify failed at 0x{:04X}: wrote 0x{:02X}, read 0x{:02X}",
                addr, expected, found
            ),
            Self::RecordChecksum { sum } => {
                write!(f, "hex format checksum fault 0x{:02X}", sum)
            }
            Self::RecordTruncated => write!(f, "record shorter than its length field"),
            Self::DecodeOverflow => write!(f, "record buffer overflow"),
            Self::Aborted => write!(f, "transfer aborted by operator"),
            Self::FlashRecord => write!(f, "flash-address record not handled on this path"),
            Self::XactTooShort => write!(f, "transaction shorter than min length (2)"),
            Self::XactTooLong => write!(f, "transaction longer than max length (24)"),
            Self::InvalidXact(v) => write!(f, "invalid transaction syntax: 0x{:x}", v.bits()),
            Self::ReadBlockUnimplemented => write!(f, "READ_BLOCK not yet implemented"),
            Self::LimitViolation { addr, cmd, value } => write!(
                f,
                "write 0x{:04X} to (0x{:02X}) 0x{:02X} outside configured limits",
                value, addr, cmd
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
