//! Syscall error codes
//!
//! The kernel reports failures with the same numeric codes in two places:
//! the synchronous return of a syscall, and the first argument of a
//! completion upcall (the "status code", where 0 means success).

/// Error codes returned across the syscall boundary.
///
/// Numeric values are fixed by the kernel ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum ErrorCode {
    /// Unspecified failure
    Fail = 1,
    /// The driver is busy with another request
    Busy = 2,
    /// The operation was already set up
    Already = 3,
    /// The peripheral is powered off
    Off = 4,
    /// An argument was out of range
    Invalid = 6,
    /// A buffer or value was too large
    TooLarge = 7,
    /// The operation was cancelled
    Cancel = 8,
    /// The kernel could not allocate memory for the request
    NoMem = 9,
    /// The driver does not support this minor number
    NoSupport = 10,
    /// No such driver is installed
    NoDevice = 11,
}

/// Upcall status code for a successful completion.
pub const STATUS_SUCCESS: usize = 0;

/// Decode an upcall status code.
///
/// Unknown non-zero codes collapse to [`ErrorCode::Fail`]; the decode is
/// total so a misbehaving driver cannot produce an unrepresentable status.
pub fn from_statuscode(status: usize) -> Result<(), ErrorCode> {
    match status {
        0 => Ok(()),
        1 => Err(ErrorCode::Fail),
        2 => Err(ErrorCode::Busy),
        3 => Err(ErrorCode::Already),
        4 => Err(ErrorCode::Off),
        6 => Err(ErrorCode::Invalid),
        7 => Err(ErrorCode::TooLarge),
        8 => Err(ErrorCode::Cancel),
        9 => Err(ErrorCode::NoMem),
        10 => Err(ErrorCode::NoSupport),
        11 => Err(ErrorCode::NoDevice),
        _ => Err(ErrorCode::Fail),
    }
}

/// Encode an outcome as an upcall status code.
pub fn into_statuscode(result: Result<(), ErrorCode>) -> usize {
    match result {
        Ok(()) => STATUS_SUCCESS,
        Err(code) => code as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_success_roundtrip() {
        assert_eq!(into_statuscode(Ok(())), STATUS_SUCCESS);
        assert_eq!(from_statuscode(STATUS_SUCCESS), Ok(()));
    }

    #[test]
    fn test_known_codes_roundtrip() {
        let codes = [
            ErrorCode::Fail,
            ErrorCode::Busy,
            ErrorCode::Already,
            ErrorCode::Off,
            ErrorCode::Invalid,
            ErrorCode::TooLarge,
            ErrorCode::Cancel,
            ErrorCode::NoMem,
            ErrorCode::NoSupport,
            ErrorCode::NoDevice,
        ];
        for code in codes {
            assert_eq!(from_statuscode(into_statuscode(Err(code))), Err(code));
        }
    }

    #[test]
    fn test_wire_values_pinned() {
        assert_eq!(ErrorCode::Fail as usize, 1);
        assert_eq!(ErrorCode::Busy as usize, 2);
        assert_eq!(ErrorCode::NoSupport as usize, 10);
    }

    proptest! {
        #[test]
        fn test_decode_is_total(status in any::<usize>()) {
            let decoded = from_statuscode(status);
            if status == 0 {
                prop_assert_eq!(decoded, Ok(()));
            } else {
                prop_assert!(decoded.is_err());
            }
        }
    }
}
