//! Error types for lanealu boundary conversions.
//!
//! The ALU core itself has no fault path: every (operation, width, operand,
//! mask) combination produces a lane. Errors only arise where raw values from
//! a decoder, a trace file or a caller-built slice are turned into the typed
//! inputs the core accepts.

use std::fmt;

/// Errors that can occur while building ALU inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AluError {
    /// A numeric operation code outside the supported set.
    UnknownOpcode {
        /// The raw code that failed to decode.
        code: u8,
    },
    /// A textual mnemonic that names no supported operation.
    UnknownMnemonic {
        /// The mnemonic as supplied by the caller.
        mnemonic: String,
    },
    /// An element width other than 8, 16, 32 or 64 bits.
    InvalidWidth {
        /// The rejected width in bits.
        bits: u32,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for AluError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AluError::UnknownOpcode { code } => {
                write!(f, "Unknown operation code: {code:#04x}")
            }
            AluError::UnknownMnemonic { mnemonic } => {
                write!(f, "Unknown operation mnemonic: {mnemonic:?}")
            }
            AluError::InvalidWidth { bits } => write!(
                f,
                "Invalid element width: {bits} bits (expected 8, 16, 32 or 64)"
            ),
            AluError::ValidationError { message } => {
                write!(f, "Validation error: {message}")
            }
        }
    }
}

impl std::error::Error for AluError {}

/// Result type alias for lanealu operations.
pub type Result<T> = std::result::Result<T, AluError>;

/// Creates an unknown-opcode error.
pub fn unknown_opcode(code: u8) -> AluError {
    AluError::UnknownOpcode { code }
}

/// Creates an unknown-mnemonic error.
pub fn unknown_mnemonic(mnemonic: impl Into<String>) -> AluError {
    AluError::UnknownMnemonic {
        mnemonic: mnemonic.into(),
    }
}

/// Creates an invalid-width error.
pub fn invalid_width(bits: u32) -> AluError {
    AluError::InvalidWidth { bits }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> AluError {
    AluError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_opcode_display() {
        let error = unknown_opcode(0xfe);
        let display = format!("{}", error);
        assert!(display.contains("Unknown operation code"));
        assert!(display.contains("0xfe"));
    }

    #[test]
    fn test_unknown_mnemonic_display() {
        let error = unknown_mnemonic("vfmacc");
        let display = format!("{}", error);
        assert!(display.contains("Unknown operation mnemonic"));
        assert!(display.contains("\"vfmacc\""));
    }

    #[test]
    fn test_invalid_width_display() {
        let error = invalid_width(12);
        let display = format!("{}", error);
        assert!(display.contains("Invalid element width"));
        assert!(display.contains("12 bits"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("register lengths differ");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("register lengths differ"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(invalid_width(7), invalid_width(7));
        assert_ne!(invalid_width(7), invalid_width(9));
        assert_ne!(unknown_opcode(1), invalid_width(1));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = validation_error("test error");

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
