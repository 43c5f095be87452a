//! Dots display driver contract
//!
//! Minor numbers understood by the kernel-resident dots display driver
//! (driver number `0xa0001`). Command 1 does double duty: with no text
//! buffer shared it displays a single value synchronously; with a buffer
//! shared in allow slot [`ALLOW_TEXT`] it starts an asynchronous scroll of
//! that buffer, with `arg1` carrying the text length and `arg2` the
//! per-glyph render pace in milliseconds. The driver reports the end of a
//! scroll through subscribe slot [`SUBSCRIBE_DONE`].

/// Command numbers for the dots display driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum Command {
    /// Driver presence check.
    Exists = 0,
    /// Display a single value, or scroll the shared text buffer.
    Display = 1,
    /// Display the digit associated with a counter/button index.
    CounterDigit = 2,
}

impl Command {
    /// The raw command number passed to the kernel.
    pub const fn number(self) -> usize {
        self as usize
    }
}

/// Read-only allow slot holding the text to scroll.
pub const ALLOW_TEXT: usize = 0;

/// Subscribe slot for the scroll-finished upcall. The upcall's first
/// argument is a status code (0 on success).
pub const SUBSCRIBE_DONE: usize = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_numbers_pinned() {
        assert_eq!(Command::Exists.number(), 0);
        assert_eq!(Command::Display.number(), 1);
        assert_eq!(Command::CounterDigit.number(), 2);
    }
}
