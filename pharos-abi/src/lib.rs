//! Wire contract between Pharos userspace clients and the kernel drivers
//!
//! The kernel exposes each peripheral driver behind three syscalls plus a
//! blocking yield. Every call is addressed by a driver number and a
//! driver-local minor number:
//!
//! ```text
//! ┌────────────┬───────────────┬─────────────────────────────────────┐
//! │ syscall    │ minor number  │ meaning (dots display, 0xa0001)     │
//! ├────────────┼───────────────┼─────────────────────────────────────┤
//! │ command    │ 0             │ driver presence check               │
//! │ command    │ 1             │ display value / start text scroll   │
//! │ command    │ 2             │ display counter digit               │
//! │ allow (ro) │ 0             │ text buffer to scroll               │
//! │ subscribe  │ 0             │ scroll-finished upcall              │
//! └────────────┴───────────────┴─────────────────────────────────────┘
//! ```
//!
//! The numeric values in this crate are shared with the kernel-resident
//! drivers and must not change. Everything above the numbers (traits,
//! clients) lives in `pharos-syscall` and `pharos-drivers`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod dots;
pub mod driver;
pub mod error;

// Re-export key types
pub use driver::DriverId;
pub use error::{from_statuscode, into_statuscode, ErrorCode};
