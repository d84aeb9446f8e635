//! Submodule defining the errors used across the crate.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;

use crate::machine::Pattern;
use crate::token::TokenKind;

/// Errors that abort a parse.
///
/// Every error aborts the whole parse: statements closed before the failure
/// are discarded together with the one in progress.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The first token of a statement does not select any statement kind.
    #[error("Invalid statement parser \"{value}\" at position {position}")]
    UnrecognizedLeadingToken {
        /// Literal value of the offending token.
        value: String,
        /// Offset of the offending token.
        position: usize,
    },
    /// A step requires a predecessor token of a kind that was not seen.
    #[error(
        "Expected any of these tokens {} before \"{value}\" (currentStep={step})",
        join(.required, " or ")
    )]
    MissingRequiredPredecessor {
        /// Index of the step that failed.
        step: usize,
        /// Token kinds accepted as the immediate predecessor.
        required: Vec<TokenKind>,
        /// Literal value of the token that was being processed.
        value: String,
        /// Offset of the token that was being processed.
        position: usize,
    },
    /// A token did not match any pattern accepted by the current step.
    #[error(
        "Expected any of these tokens {} instead of type=\"{found_kind}\" value=\"{found_value}\" (currentStep={step})",
        join(.expected, " or ")
    )]
    UnexpectedToken {
        /// Index of the step that failed.
        step: usize,
        /// Patterns accepted by the step.
        expected: Vec<Pattern>,
        /// Kind of the offending token.
        found_kind: TokenKind,
        /// Literal value of the offending token.
        found_value: String,
        /// Offset of the offending token.
        position: usize,
    },
    /// A token was fed to a statement that was already terminated.
    #[error("This statement has already got to the end (token at position {position})")]
    AlreadyTerminatedStatement {
        /// Offset of the rejected token.
        position: usize,
    },
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    use core::fmt::Write;

    let mut joined = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        let _ = write!(joined, "{item}");
    }
    joined
}
