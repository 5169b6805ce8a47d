//! Error taxonomy for lineage graphs.
//!
//! Every fallible operation returns [`Result`]. Failures are reported
//! synchronously and never leave a graph half-mutated.

use thiserror::Error;

/// Errors raised while building, loading, or highlighting a graph.
#[derive(Error, Debug)]
pub enum LineageError {
    /// Two nodes share the same id.
    #[error("duplicate node id: {id}")]
    DuplicateId { id: String },

    /// An edge endpoint or a highlight target does not exist.
    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    /// The graph description is structurally invalid.
    #[error("malformed graph: {reason}")]
    MalformedGraph { reason: String },

    /// A configuration value was rejected.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LineageError {
    /// Wrap a model-level failure as a load failure, keeping its message.
    pub fn into_malformed(self) -> Self {
        match self {
            Self::MalformedGraph { .. } => self,
            other => Self::MalformedGraph {
                reason: other.to_string(),
            },
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LineageError>;
