//! Userspace driver clients for Pharos
//!
//! Each client wraps one kernel-resident driver behind the syscall
//! boundary:
//!
//! - [`dots::DotsDisplay`] drives the 5x5 dot-matrix display, including the
//!   asynchronous text-scroll protocol (share buffer, subscribe, dispatch,
//!   yield, reclaim buffer)
//! - [`buttons::Buttons`] wires up board-button interrupts and delivers
//!   transitions through a static mailbox
//!
//! Clients are generic over [`pharos_syscall::Kernel`] and never talk to
//! hardware themselves.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod dots;

// Re-export key types
pub use buttons::{ButtonEvent, ButtonEvents, Buttons};
pub use dots::{DotsDisplay, DotsError};
