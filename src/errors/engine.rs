//! Top-level error type tying together every fallible component (§7).

use crate::errors::{eigen::EigenError, input::InputError};

/// The error type returned by the engine façade ([`crate::engine::Engine`])
/// and consumed by the CLI to choose an exit code.
///
/// `Input` (including configuration-file errors) maps to exit code 1;
/// `Eigen` and `InvariantViolation` map to exit code 2. Cooperative
/// cancellation is not
/// represented here: it is not an error, so it is reported through
/// [`crate::engine::RunOutcome::canceled`] instead of this type (§7).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A parser or configuration-loading failure (§7 `InputError`).
    #[error(transparent)]
    Input(#[from] InputError),

    /// The eigensolver was asked to operate on a degenerate system
    /// (§7 `EmptySystem`).
    #[error(transparent)]
    Eigen(#[from] EigenError),

    /// A community was observed with exactly one child, which can never
    /// happen if the divider is implemented correctly (§7
    /// `InvariantViolation`). This always indicates an implementation bug,
    /// not a bad input.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Asserts an internal invariant, turning a violation into
/// [`EngineError::InvariantViolation`] instead of a panic in release
/// builds, while still panicking immediately in debug builds so that the
/// bug is caught close to its source during development.
macro_rules! invariant {
    ($cond:expr, $($message:tt)*) => {
        debug_assert!($cond, $($message)*);
        if !$cond {
            return Err($crate::errors::EngineError::InvariantViolation(
                ::std::format!($($message)*),
            ));
        }
    };
}

pub(crate) use invariant;
