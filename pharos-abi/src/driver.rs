//! Driver addressing

/// Driver number assigned by the kernel platform.
///
/// A newtype rather than a bare `usize` so a driver number cannot be
/// confused with a minor number or a command argument at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverId(pub usize);

impl DriverId {
    /// The 5x5 dot-matrix display driver.
    pub const DOTS: DriverId = DriverId(0xa0001);

    /// The board button driver.
    pub const BUTTONS: DriverId = DriverId(0x3);

    /// The raw driver number passed to the kernel.
    pub const fn number(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_numbers_pinned() {
        assert_eq!(DriverId::DOTS.number(), 0xa0001);
        assert_eq!(DriverId::BUTTONS.number(), 0x3);
    }
}
