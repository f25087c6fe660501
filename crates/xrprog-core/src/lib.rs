//! xrprog-core - Core library for XRP7724 PMIC programming
//!
//! This crate implements the programming and transport subsystem for the
//! XRP7724 power-management controller: a streaming hex-record decoder and
//! dispatcher, the flash page program/erase/verify state machine, and the
//! PMBridge transaction validator. It is designed to be `no_std` compatible
//! for use on management controllers.
//!
//! All bus I/O goes through the [`bus::PmicBus`] trait; the physical
//! transport (I2C peripheral, simulator, ...) is supplied by the caller.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc`)
//! - `alloc` - Enable heap allocation (bridge hook registry, boxed bus objects)
//! - `is_sync` - Compile the async bus trait and protocol as blocking code
//! - `remove-safeguards` - Skip write-limit policy checks on bridge writes

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
// Allow async fn in traits - we use maybe-async for dual sync/async support
#![allow(async_fn_in_trait)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod boot;
pub mod bridge;
pub mod bus;
pub mod error;
pub mod flash;
pub mod image;
pub mod protocol;
pub mod record;
pub mod regs;

pub use error::{Error, Result};
