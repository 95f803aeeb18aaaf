//! Error types for shape discovery

use thiserror::Error;

use crate::shape::ScalarKind;

/// Errors from generality-graph construction
///
/// A malformed promotion-edge configuration is a construction-time invariant
/// violation, never a per-call condition: discovery and unification
/// themselves are total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The promotion edge list contains a cycle
    #[error("promotion edges contain a cycle through {kind}")]
    Cycle { kind: ScalarKind },
}

/// Errors from JSON sample ingestion
#[derive(Error, Debug, Clone)]
pub enum DiscoverError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for DiscoverError {
    fn from(e: serde_json::Error) -> Self {
        DiscoverError::JsonParse(e.to_string())
    }
}
