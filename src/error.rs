//! Error type shared by every solver and engine in the crate.

use thiserror::Error;

/// Errors reported by tree constructors, solvers and statistic engines.
///
/// Every precondition is checked before any algorithmic work starts, so a
/// returned error never leaves partial results behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinarrError {
    /// The input does not satisfy a structural precondition: malformed tree,
    /// arrangement of the wrong size, or a position map that is not a
    /// permutation.
    #[error("precondition violation: {0}")]
    PreconditionViolation(String),

    /// A rational was constructed with a zero denominator, or a mean was
    /// requested for a degenerate input (for example an edgeless tree).
    #[error("division by zero")]
    DivisionByZero,

    /// Two independent computations of the same value disagree.
    ///
    /// This is raised by the solver dispatch layer when the cost accumulated
    /// by an algorithm does not match the cost recomputed from the returned
    /// arrangement. It indicates a defect, not bad input.
    #[error("algorithm mismatch: {0}")]
    AlgorithmMismatch(String),

    /// A rooted-tree operation needs valid subtree sizes, but they were never
    /// computed or were invalidated by a mutation.
    #[error("subtree sizes are stale or missing; call compute_subtree_sizes()")]
    StaleOrMissingSubtreeSizes,

    /// Canonical edge enumeration was requested on a tree whose adjacency
    /// lists are not sorted. Call `normalize()` first.
    #[error("tree is not normalized")]
    NotNormalized,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LinarrError>;
