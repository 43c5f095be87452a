//! Scripted kernel double for host-side tests
//!
//! `FakeKernel` records every syscall in invocation order and can be
//! scripted per step: queue command outcomes, fail the next allow or
//! subscribe, substitute the pointer handed back by a revoke, or queue
//! upcalls that are delivered while the caller is yielded.
//!
//! An unbounded `yield_wait` with nothing left to deliver panics instead of
//! hanging, so a test that would deadlock fails loudly.

use core::cell::{Cell, RefCell};
use core::ptr;
use std::vec::Vec;

use pharos_abi::{DriverId, ErrorCode};

use crate::kernel::{Kernel, WaitError};
use crate::upcall::{CompletionFlag, Upcall, UpcallArgs};

/// One recorded syscall, in invocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallEvent {
    Command {
        driver: DriverId,
        command_num: usize,
        arg1: usize,
        arg2: usize,
    },
    /// `base` is null for a revoke.
    Allow {
        driver: DriverId,
        slot: usize,
        base: *const u8,
        len: usize,
    },
    Subscribe {
        driver: DriverId,
        slot: usize,
        registered: bool,
    },
    Yield,
}

type Slot = (DriverId, usize);

/// A queued upcall, delivered to the matching subscriber during a yield.
struct PendingUpcall {
    driver: DriverId,
    slot: usize,
    args: UpcallArgs,
}

#[derive(Default)]
pub struct FakeKernel {
    log: RefCell<Vec<SyscallEvent>>,
    command_results: RefCell<Vec<Result<usize, ErrorCode>>>,
    next_allow_error: Cell<Option<ErrorCode>>,
    next_subscribe_error: Cell<Option<ErrorCode>>,
    shared: RefCell<Vec<(Slot, (*const u8, usize))>>,
    subscriptions: RefCell<Vec<(Slot, &'static dyn Upcall)>>,
    pending: RefCell<Vec<PendingUpcall>>,
    revoke_substitute: Cell<Option<*const u8>>,
}

impl FakeKernel {
    pub fn new() -> Self {
        Self::default()
    }

    // --- scripting ---

    /// Queue the outcome of the next command; unqueued commands succeed
    /// with value 0.
    pub fn queue_command_result(&self, result: Result<usize, ErrorCode>) {
        self.command_results.borrow_mut().push(result);
    }

    /// Reject the next allow call with `code`.
    pub fn fail_next_allow(&self, code: ErrorCode) {
        self.next_allow_error.set(Some(code));
    }

    /// Reject the next subscribe call with `code`.
    pub fn fail_next_subscribe(&self, code: ErrorCode) {
        self.next_subscribe_error.set(Some(code));
    }

    /// Queue an upcall for `(driver, slot)`, delivered during the next
    /// yield. Upcalls with no matching subscriber are dropped, as the
    /// kernel drops them after an unsubscribe.
    pub fn upcall_during_yield(&self, driver: DriverId, slot: usize, args: UpcallArgs) {
        self.pending.borrow_mut().push(PendingUpcall { driver, slot, args });
    }

    /// Hand back `base` instead of the lent region on the next revoke.
    pub fn substitute_revoked_ptr(&self, base: *const u8) {
        self.revoke_substitute.set(Some(base));
    }

    // --- inspection ---

    /// Every syscall issued so far, in order.
    pub fn events(&self) -> Vec<SyscallEvent> {
        self.log.borrow().clone()
    }

    /// Whether a buffer is currently lent in `(driver, slot)`.
    pub fn is_shared(&self, driver: DriverId, slot: usize) -> bool {
        self.shared
            .borrow()
            .iter()
            .any(|(key, _)| *key == (driver, slot))
    }

    /// Whether an upcall target is currently registered for `(driver, slot)`.
    pub fn has_subscriber(&self, driver: DriverId, slot: usize) -> bool {
        self.subscriptions
            .borrow()
            .iter()
            .any(|(key, _)| *key == (driver, slot))
    }

    /// Queued upcalls not yet delivered.
    pub fn pending_upcalls(&self) -> usize {
        self.pending.borrow().len()
    }

    fn subscriber_for(&self, driver: DriverId, slot: usize) -> Option<&'static dyn Upcall> {
        self.subscriptions
            .borrow()
            .iter()
            .find(|(key, _)| *key == (driver, slot))
            .map(|(_, upcall)| *upcall)
    }
}

impl Kernel for FakeKernel {
    fn command(
        &self,
        driver: DriverId,
        command_num: usize,
        arg1: usize,
        arg2: usize,
    ) -> Result<usize, ErrorCode> {
        self.log.borrow_mut().push(SyscallEvent::Command {
            driver,
            command_num,
            arg1,
            arg2,
        });
        let mut queued = self.command_results.borrow_mut();
        if queued.is_empty() {
            Ok(0)
        } else {
            queued.remove(0)
        }
    }

    fn allow_readonly(
        &self,
        driver: DriverId,
        slot: usize,
        buffer: Option<&[u8]>,
    ) -> Result<*const u8, ErrorCode> {
        let (base, len) = buffer
            .map(|b| (b.as_ptr(), b.len()))
            .unwrap_or((ptr::null(), 0));
        self.log.borrow_mut().push(SyscallEvent::Allow {
            driver,
            slot,
            base,
            len,
        });

        if let Some(code) = self.next_allow_error.take() {
            return Err(code);
        }

        let key = (driver, slot);
        let mut shared = self.shared.borrow_mut();
        let previous = shared
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, (prev, _))| *prev)
            .unwrap_or(ptr::null());
        shared.retain(|(k, _)| *k != key);
        if let Some(b) = buffer {
            shared.push((key, (b.as_ptr(), b.len())));
        }

        if buffer.is_none() {
            if let Some(substitute) = self.revoke_substitute.take() {
                return Ok(substitute);
            }
        }
        Ok(previous)
    }

    fn subscribe(
        &self,
        driver: DriverId,
        slot: usize,
        upcall: Option<&'static dyn Upcall>,
    ) -> Result<(), ErrorCode> {
        self.log.borrow_mut().push(SyscallEvent::Subscribe {
            driver,
            slot,
            registered: upcall.is_some(),
        });

        if let Some(code) = self.next_subscribe_error.take() {
            return Err(code);
        }

        let key = (driver, slot);
        let mut subscriptions = self.subscriptions.borrow_mut();
        subscriptions.retain(|(k, _)| *k != key);
        if let Some(target) = upcall {
            subscriptions.push((key, target));
        }
        Ok(())
    }

    fn yield_wait(&self, flag: &CompletionFlag, timeout_ms: Option<u32>) -> Result<(), WaitError> {
        self.log.borrow_mut().push(SyscallEvent::Yield);

        while !flag.is_set() {
            let next = {
                let mut pending = self.pending.borrow_mut();
                if pending.is_empty() {
                    None
                } else {
                    Some(pending.remove(0))
                }
            };
            let Some(upcall) = next else { break };
            if let Some(target) = self.subscriber_for(upcall.driver, upcall.slot) {
                target.upcall(upcall.args);
            }
        }

        if flag.is_set() {
            Ok(())
        } else if timeout_ms.is_some() {
            Err(WaitError::TimedOut)
        } else {
            panic!("yield_wait would block forever: latch clear and no pending upcalls");
        }
    }
}
