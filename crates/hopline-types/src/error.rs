//! Wire-level error types.

use thiserror::Error;

/// Errors arising from decoding wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WireError {
    /// The failure reason byte does not name a known fail code.
    #[error("unknown fail code: {0:#04x}")]
    UnknownFailCode(u8),

    /// A fail message carried an empty reason field.
    #[error("empty failure reason")]
    EmptyFailReason,

    /// A HopId string did not start with the `hop1` prefix.
    #[error("invalid hop id prefix: {0}")]
    InvalidHopIdPrefix(String),

    /// Base58 decoding failed.
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    /// Decoded value has the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WireError::UnknownFailCode(0x7f);
        assert_eq!(format!("{}", err), "unknown fail code: 0x7f");

        let err = WireError::InvalidLength {
            expected: 20,
            actual: 19,
        };
        assert_eq!(format!("{}", err), "invalid length: expected 20 bytes, got 19");
    }
}
