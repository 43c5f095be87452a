//! Completion upcalls and the single-shot latch

use portable_atomic::{AtomicBool, AtomicUsize, Ordering};

/// Arguments delivered with a kernel upcall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpcallArgs {
    pub arg0: usize,
    pub arg1: usize,
    pub arg2: usize,
}

impl UpcallArgs {
    /// Arguments for a plain success completion (status code 0).
    pub const fn success() -> Self {
        UpcallArgs {
            arg0: 0,
            arg1: 0,
            arg2: 0,
        }
    }
}

/// A target the kernel invokes when a subscribed operation completes.
///
/// Subscriptions hand the kernel a `&'static dyn Upcall`, so targets must
/// live in static storage and be `Sync`. Upcalls are delivered while the
/// subscribing thread is yielded, never concurrently with it.
pub trait Upcall: Sync {
    fn upcall(&self, args: UpcallArgs);
}

/// Single-shot completion latch.
///
/// Holds the first status signalled after a [`reset`](CompletionFlag::reset)
/// and ignores later signals until reset again. This is the predicate cell a
/// blocked caller hands to [`Kernel::yield_wait`](crate::Kernel::yield_wait).
///
/// The latch is `const`-constructible so it can live in a `static`, which is
/// what keeps the kernel-held reference valid for as long as the kernel
/// might invoke it.
pub struct CompletionFlag {
    fired: AtomicBool,
    status: AtomicUsize,
}

impl CompletionFlag {
    pub const fn new() -> Self {
        CompletionFlag {
            fired: AtomicBool::new(false),
            status: AtomicUsize::new(0),
        }
    }

    /// Arm the latch for the next completion.
    pub fn reset(&self) {
        self.fired.store(false, Ordering::Release);
    }

    /// Whether a completion has been signalled since the last reset.
    pub fn is_set(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Status code of the completion, if one has arrived.
    pub fn status(&self) -> Option<usize> {
        if self.is_set() {
            Some(self.status.load(Ordering::Acquire))
        } else {
            None
        }
    }

    /// Latch a completion. Only the first signal after a reset takes
    /// effect; the kernel contract is at most one upcall per subscription,
    /// so a second signal means a re-signalled shared latch (see
    /// `ButtonEvents` in `pharos-drivers`) rather than a protocol breach.
    pub fn signal(&self, status: usize) {
        if !self.is_set() {
            self.status.store(status, Ordering::Release);
            self.fired.store(true, Ordering::Release);
        }
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl Upcall for CompletionFlag {
    fn upcall(&self, args: UpcallArgs) {
        self.signal(args.arg0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_starts_clear() {
        let flag = CompletionFlag::new();
        assert!(!flag.is_set());
        assert_eq!(flag.status(), None);
    }

    #[test]
    fn test_first_signal_wins() {
        let flag = CompletionFlag::new();
        flag.signal(0);
        flag.signal(6);
        assert!(flag.is_set());
        assert_eq!(flag.status(), Some(0));
    }

    #[test]
    fn test_reset_rearms() {
        let flag = CompletionFlag::new();
        flag.signal(2);
        flag.reset();
        assert!(!flag.is_set());
        assert_eq!(flag.status(), None);

        flag.signal(0);
        assert_eq!(flag.status(), Some(0));
    }

    #[test]
    fn test_upcall_stores_status() {
        let flag = CompletionFlag::new();
        flag.upcall(UpcallArgs {
            arg0: 9,
            arg1: 0,
            arg2: 0,
        });
        assert_eq!(flag.status(), Some(9));
    }
}
