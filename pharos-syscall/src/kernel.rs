//! The kernel boundary trait

use pharos_abi::{DriverId, ErrorCode};

use crate::upcall::{CompletionFlag, Upcall};

/// Failure of a bounded blocking wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitError {
    /// The deadline elapsed before the completion was signalled. The
    /// operation may still be running kernel-side.
    TimedOut,
}

/// The three driver syscalls plus the blocking yield, as seen from
/// userspace.
///
/// Implementations translate these into the platform trap interface; the
/// `FakeKernel` in [`crate::fake`] provides a scripted host-side
/// implementation. Driver clients stay generic over this trait so the same
/// protocol code runs in both places.
pub trait Kernel {
    /// Synchronous request to a driver, addressed by driver number and
    /// command number. On success the kernel may return a driver-defined
    /// value (e.g. a resource count); commands without a value return 0.
    fn command(
        &self,
        driver: DriverId,
        command_num: usize,
        arg1: usize,
        arg2: usize,
    ) -> Result<usize, ErrorCode>;

    /// Lend `buffer` to `driver` read-only, replacing whatever was shared
    /// in `slot` before. `None` revokes the current share.
    ///
    /// Returns the base pointer of the region the kernel hands back (null
    /// when the slot was empty). The caller uses it to verify the kernel
    /// returned exactly the region that was lent; it is only ever compared,
    /// never dereferenced.
    ///
    /// The swap is atomic kernel-side: once the call returns, the kernel
    /// holds no reference to the previous region, even if an operation on
    /// it was still pending.
    fn allow_readonly(
        &self,
        driver: DriverId,
        slot: usize,
        buffer: Option<&[u8]>,
    ) -> Result<*const u8, ErrorCode>;

    /// Register `upcall` for completions in `slot`, replacing any previous
    /// registration. `None` unsubscribes; once an unsubscribe returns, the
    /// kernel will not invoke the previous target again.
    fn subscribe(
        &self,
        driver: DriverId,
        slot: usize,
        upcall: Option<&'static dyn Upcall>,
    ) -> Result<(), ErrorCode>;

    /// Yield until `flag` is set, letting the kernel deliver pending
    /// upcalls in the meantime.
    ///
    /// With `timeout_ms = None` the wait is unbounded. With a deadline,
    /// [`WaitError::TimedOut`] is returned if the flag is still clear when
    /// it expires.
    fn yield_wait(&self, flag: &CompletionFlag, timeout_ms: Option<u32>) -> Result<(), WaitError>;
}
