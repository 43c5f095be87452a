//! Client for the dots display driver
//!
//! Single digits and counter digits are one synchronous command each. Text
//! goes through the asynchronous scroll protocol: the buffer is lent to the
//! kernel, a completion upcall is registered, the scroll command is
//! dispatched, and the caller yields until the driver reports the scroll
//! finished. The buffer is reclaimed before the call returns no matter
//! which step failed, and the reclaimed pointer must match the one lent.

use core::cell::Cell;

use pharos_abi::{dots, DriverId, ErrorCode};
use pharos_syscall::{CompletionFlag, Kernel};

/// Milliseconds the driver spends rendering each glyph of a scrolled text.
/// Passed verbatim as the pace argument of the scroll command.
pub const GLYPH_MS: u32 = 500;

/// Extra glyphs-worth of wait budget beyond the text length, covering the
/// gap between the last glyph and the completion upcall.
const WAIT_SLACK_GLYPHS: u32 = 2;

/// Errors surfaced by display operations.
///
/// All of these are recoverable by the caller; the client never retries on
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DotsError {
    /// A text request is already in flight on this client.
    Busy,
    /// Lending the text buffer to the kernel was rejected.
    Grant(ErrorCode),
    /// Registering the completion upcall was rejected.
    Subscribe(ErrorCode),
    /// The display command was not accepted.
    Command(ErrorCode),
    /// No completion arrived within the wait budget. The driver may still
    /// be rendering, but the buffer has already been reclaimed.
    Timeout,
    /// Reclaiming the shared buffer failed.
    Revoke(ErrorCode),
    /// The kernel handed back a different buffer than the one lent.
    BufferMismatch,
}

/// Userspace handle to the dots display.
///
/// One request at a time: `display_text` refuses to run while another text
/// request on the same client is still in flight.
pub struct DotsDisplay<'k, K: Kernel> {
    kernel: &'k K,
    done: &'static CompletionFlag,
    in_flight: Cell<bool>,
}

impl<'k, K: Kernel> DotsDisplay<'k, K> {
    /// `done` is the latch the scroll-finished upcall sets. It must live in
    /// static storage because the kernel holds a reference to it while a
    /// subscription is active.
    pub fn new(kernel: &'k K, done: &'static CompletionFlag) -> Self {
        DotsDisplay {
            kernel,
            done,
            in_flight: Cell::new(false),
        }
    }

    /// Probe for the driver.
    pub fn exists(&self) -> bool {
        self.kernel
            .command(DriverId::DOTS, dots::Command::Exists.number(), 0, 0)
            .is_ok()
    }

    /// Show a single digit. Synchronous; the digit is not range-checked
    /// here, the driver rejects values it cannot render.
    pub fn display_digit(&self, digit: char) -> Result<(), DotsError> {
        self.kernel
            .command(
                DriverId::DOTS,
                dots::Command::Display.number(),
                digit as usize,
                0,
            )
            .map(|_| ())
            .map_err(DotsError::Command)
    }

    /// Show the digit for a counter/button index.
    pub fn counter_digit(&self, button: usize) -> Result<(), DotsError> {
        self.kernel
            .command(
                DriverId::DOTS,
                dots::Command::CounterDigit.number(),
                button,
                0,
            )
            .map(|_| ())
            .map_err(DotsError::Command)
    }

    /// Scroll `text` glyph by glyph, blocking until the driver reports the
    /// scroll finished.
    ///
    /// The buffer is lent to the kernel for the duration of the call and is
    /// reclaimed before returning, on failure as well as on success. A
    /// rejected step short-circuits the rest of the protocol but never the
    /// cleanup.
    pub fn display_text(&self, text: &[u8]) -> Result<(), DotsError> {
        if self.in_flight.replace(true) {
            return Err(DotsError::Busy);
        }
        let result = self.text_request(text);
        self.in_flight.set(false);
        result
    }

    fn text_request(&self, text: &[u8]) -> Result<(), DotsError> {
        // Lend the buffer first; if this fails there is nothing to unwind.
        self.kernel
            .allow_readonly(DriverId::DOTS, dots::ALLOW_TEXT, Some(text))
            .map_err(DotsError::Grant)?;

        let outcome = self.scroll_shared(text);

        // Unwind in reverse order of acquisition, regardless of outcome:
        // drop the upcall registration, then reclaim the buffer.
        let _ = self
            .kernel
            .subscribe(DriverId::DOTS, dots::SUBSCRIBE_DONE, None);
        let reclaimed = self
            .kernel
            .allow_readonly(DriverId::DOTS, dots::ALLOW_TEXT, None);

        outcome?;
        match reclaimed {
            Ok(base) if base == text.as_ptr() => Ok(()),
            Ok(_) => Err(DotsError::BufferMismatch),
            Err(code) => Err(DotsError::Revoke(code)),
        }
    }

    /// Steps between grant and cleanup: subscribe, dispatch, wait.
    fn scroll_shared(&self, text: &[u8]) -> Result<(), DotsError> {
        self.done.reset();
        self.kernel
            .subscribe(DriverId::DOTS, dots::SUBSCRIBE_DONE, Some(self.done))
            .map_err(DotsError::Subscribe)?;

        self.kernel
            .command(
                DriverId::DOTS,
                dots::Command::Display.number(),
                text.len(),
                GLYPH_MS as usize,
            )
            .map_err(DotsError::Command)?;

        self.kernel
            .yield_wait(self.done, Some(wait_budget_ms(text.len())))
            .map_err(|_| DotsError::Timeout)
    }
}

/// Wait budget for a scroll of `len` glyphs, saturating on absurd lengths.
fn wait_budget_ms(len: usize) -> u32 {
    let glyphs = u32::try_from(len)
        .unwrap_or(u32::MAX)
        .saturating_add(WAIT_SLACK_GLYPHS);
    glyphs.saturating_mul(GLYPH_MS)
}
