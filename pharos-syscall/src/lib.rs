//! Syscall boundary for Pharos userspace clients
//!
//! This crate provides:
//! - `Kernel` trait covering the four boundary primitives (command,
//!   read-only allow, subscribe, blocking yield)
//! - `Upcall` trait for kernel completion callbacks
//! - `CompletionFlag`, the single-shot latch a blocked caller waits on
//! - `FakeKernel`, a scripted host-side implementation for tests
//!   (behind the `std` feature)
//!
//! # Architecture
//!
//! Driver clients in `pharos-drivers` are generic over [`Kernel`], so the
//! same client code runs against the real trap layer on a target and
//! against [`fake::FakeKernel`] on the host. Upcall targets are handed to
//! the kernel as `&'static` references: a registered callback can never
//! dangle because it must live in static storage.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod kernel;
pub mod upcall;

#[cfg(feature = "std")]
pub mod fake;

// Re-export key types
pub use kernel::{Kernel, WaitError};
pub use upcall::{CompletionFlag, Upcall, UpcallArgs};
