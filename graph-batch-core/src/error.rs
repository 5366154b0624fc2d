//! Error types for graph-batch operations

use thiserror::Error;

/// Result type for graph-batch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for graph-batch operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input that violates a caller-side contract
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Adjacency matrix dimensions inconsistent with a component's entity count
    #[error("Adjacency shape mismatch for relation '{relation}': {rows}x{cols} for {entities} entities")]
    AdjacencyShape {
        /// Name of the offending relation
        relation: String,
        /// Rows of the adjacency matrix
        rows: usize,
        /// Columns of the adjacency matrix
        cols: usize,
        /// Entity count the matrix should match
        entities: usize,
    },

    /// Component id outside the source's range
    #[error("Component id {id} out of range ({count} components)")]
    ComponentOutOfRange {
        /// Requested component id
        id: usize,
        /// Number of components in the source
        count: usize,
    },

    /// Field name not present in the field spec
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Post-stack invariant failure; indicates a packer/stacker logic bug
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
