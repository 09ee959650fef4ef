//! Errors produced by the eigensolver (§4.2, §7).

/// Errors produced by [`crate::eigen::leading_eigenpair`] and the full-EVD
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EigenError {
    /// An eigen operation was requested on a zero-dimension matrix.
    #[error("cannot compute an eigenpair of an empty (0x0) matrix")]
    EmptySystem,
}
