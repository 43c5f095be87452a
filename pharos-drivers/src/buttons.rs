//! Client for the board button driver
//!
//! Button transitions arrive as upcalls while the application is yielded.
//! They land in a [`ButtonEvents`] mailbox: a fixed-capacity queue plus a
//! readiness latch, both in static storage so the kernel-held reference
//! stays valid for the life of the subscription.

use heapless::mpmc::MpMcQueue;

use pharos_abi::{buttons, DriverId, ErrorCode};
use pharos_syscall::{CompletionFlag, Kernel, Upcall, UpcallArgs};

/// Pending transitions kept per mailbox. Transitions arriving while the
/// queue is full are dropped.
const MAILBOX_CAPACITY: usize = 8;

/// One button transition reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: usize,
    pub pressed: bool,
}

/// Static mailbox for button upcalls.
pub struct ButtonEvents {
    queue: MpMcQueue<ButtonEvent, MAILBOX_CAPACITY>,
    ready: CompletionFlag,
}

impl ButtonEvents {
    pub const fn new() -> Self {
        ButtonEvents {
            queue: MpMcQueue::new(),
            ready: CompletionFlag::new(),
        }
    }

    /// Latch to pass to [`Kernel::yield_wait`]. Callers arm it with
    /// [`CompletionFlag::reset`] before checking the queue, then wait; a
    /// transition queued after the reset re-sets it.
    pub fn ready(&self) -> &CompletionFlag {
        &self.ready
    }

    /// Pop the oldest undrained transition.
    pub fn take(&self) -> Option<ButtonEvent> {
        self.queue.dequeue()
    }
}

impl Default for ButtonEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl Upcall for ButtonEvents {
    fn upcall(&self, args: UpcallArgs) {
        let event = ButtonEvent {
            button: args.arg0,
            pressed: args.arg1 == buttons::PRESSED,
        };
        // Full queue: drop the transition rather than block in upcall
        // context.
        let _ = self.queue.enqueue(event);
        self.ready.signal(0);
    }
}

/// Userspace handle to the button driver.
pub struct Buttons<'k, K: Kernel> {
    kernel: &'k K,
}

impl<'k, K: Kernel> Buttons<'k, K> {
    pub fn new(kernel: &'k K) -> Self {
        Buttons { kernel }
    }

    /// Number of buttons on the board.
    pub fn count(&self) -> Result<usize, ErrorCode> {
        self.kernel
            .command(DriverId::BUTTONS, buttons::Command::Count.number(), 0, 0)
    }

    /// Enable press/release interrupts for `button`.
    pub fn enable_interrupt(&self, button: usize) -> Result<(), ErrorCode> {
        self.kernel
            .command(
                DriverId::BUTTONS,
                buttons::Command::EnableInterrupt.number(),
                button,
                0,
            )
            .map(|_| ())
    }

    /// Disable interrupts for `button`.
    pub fn disable_interrupt(&self, button: usize) -> Result<(), ErrorCode> {
        self.kernel
            .command(
                DriverId::BUTTONS,
                buttons::Command::DisableInterrupt.number(),
                button,
                0,
            )
            .map(|_| ())
    }

    /// Route transition upcalls for every button into `events`.
    pub fn subscribe(&self, events: &'static ButtonEvents) -> Result<(), ErrorCode> {
        self.kernel
            .subscribe(DriverId::BUTTONS, buttons::SUBSCRIBE_PRESS, Some(events))
    }

    /// Stop transition upcalls. The kernel drops the mailbox reference
    /// before this returns.
    pub fn unsubscribe(&self) -> Result<(), ErrorCode> {
        self.kernel
            .subscribe(DriverId::BUTTONS, buttons::SUBSCRIBE_PRESS, None)
    }
}
