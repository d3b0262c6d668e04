//! Errors raised while resolving option tokens.

use thiserror::Error;

/// Configuration errors from option declaration and Parse/Bind.
///
/// All of these are fatal for the configuration phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// Two descriptors share a name within one resolution scope.
    #[error("Option '{name}' is declared more than once")]
    DuplicateOption { name: String },

    /// A flag token was never matched by any declared option.
    #[error("Unrecognised option '{token}'")]
    UnknownFlag { token: String },

    /// A valued flag ran out of trailing tokens.
    #[error("Option '{option}' requires a value of type {expected}")]
    MissingValue {
        option: String,
        expected: &'static str,
    },

    /// A value token could not be coerced to the declared type.
    #[error("Option '{option}' expects a value of type {expected}, got '{token}'")]
    TypeMismatch {
        option: String,
        token: String,
        expected: &'static str,
    },

    /// A recorded command line has an unterminated quote or trailing escape.
    #[error("Cannot split command line '{line}': unbalanced quote or trailing backslash")]
    MalformedCommandLine { line: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_option_and_token() {
        let err = OptionError::TypeMismatch {
            option: "bit_precision".to_string(),
            token: "big".to_string(),
            expected: "u32",
        };
        let message = err.to_string();
        assert!(message.contains("bit_precision"));
        assert!(message.contains("'big'"));
    }

    #[test]
    fn malformed_line_is_quoted_in_message() {
        let err = OptionError::MalformedCommandLine {
            line: "--data 'x".to_string(),
        };
        assert!(err.to_string().contains("'--data 'x'"));
    }
}
