//! Error types surfaced by [`crate::solve`] and [`crate::solve_with_logger`].

use std::fmt;

/// Errors returned by the solver.
///
/// Input errors ([`PcstError::InvalidArgument`], [`PcstError::IndexOutOfRange`])
/// are raised at entry, before any simulation state exists. [`PcstError::Internal`]
/// surfaces an invariant violation detected mid-run; it is always a defect in the
/// solver itself, never a consequence of caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcstError {
    /// Shape, sign, or parameter inconsistency in the input (e.g. a negative
    /// prize, a rooted problem with a nonzero target cluster count).
    InvalidArgument(String),
    /// A node or root index fell outside `[0, N)`.
    IndexOutOfRange(String),
    /// An internal invariant was violated mid-run (e.g. the cross-cluster
    /// event queue and a cluster's local heap disagree, or a time delta went
    /// negative beyond tolerance). Fatal to the invocation.
    Internal(String),
}

impl fmt::Display for PcstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcstError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            PcstError::IndexOutOfRange(msg) => write!(f, "index out of range: {msg}"),
            PcstError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for PcstError {}
