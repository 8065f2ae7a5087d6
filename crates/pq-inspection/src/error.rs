//! The error taxonomy for inspection (§7).

use pq_ast::MapError;
use pq_ast::NodeKind;
use thiserror::Error;

/// Everything that can cause [`crate::try_from`] to return `Err`.
///
/// Absent caret context and an unresolved identifier at the caret are *not*
/// errors (§7); they are represented in a successful
/// [`crate::Inspected`] instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InspectionError {
    /// A structural contradiction in the `NodeIdMap` (missing expected
    /// parent, wrong node variant). The caller should treat this as a bug in
    /// whatever produced the map.
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] MapError),

    /// A visitor step encountered a node kind its visitation table has no
    /// handling for.
    #[error("traversal failure: no inspection handling for node kind {kind}")]
    UnhandledKind {
        /// The node kind the visitor did not know how to process.
        kind: NodeKind,
    },
}

/// The result of a `tryFrom` call (§6).
pub type TriedInspection<'a> = Result<crate::Inspected<'a>, InspectionError>;
