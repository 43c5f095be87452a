//! Button driver contract
//!
//! Minor numbers for the kernel button driver (driver number `0x3`).
//! Button transitions arrive through subscribe slot [`SUBSCRIBE_PRESS`]
//! with upcall arguments `(button_index, new_value, _)`.

/// Command numbers for the button driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum Command {
    /// Number of buttons on the board. The count is returned as the
    /// command's success value.
    Count = 0,
    /// Enable press/release interrupts for the button in `arg1`.
    EnableInterrupt = 1,
    /// Disable interrupts for the button in `arg1`.
    DisableInterrupt = 2,
}

impl Command {
    /// The raw command number passed to the kernel.
    pub const fn number(self) -> usize {
        self as usize
    }
}

/// Subscribe slot for button transition upcalls.
pub const SUBSCRIBE_PRESS: usize = 0;

/// Upcall `new_value` for a press.
pub const PRESSED: usize = 1;

/// Upcall `new_value` for a release.
pub const RELEASED: usize = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_numbers_pinned() {
        assert_eq!(Command::Count.number(), 0);
        assert_eq!(Command::EnableInterrupt.number(), 1);
        assert_eq!(Command::DisableInterrupt.number(), 2);
    }

    #[test]
    fn test_transition_values() {
        assert_eq!(PRESSED, 1);
        assert_eq!(RELEASED, 0);
    }
}
