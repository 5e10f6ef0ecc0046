// Error taxonomy shared by every layer of the reconciliation engine
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A series could not be built from the coordinates it was given.
    #[error("invalid series: {0}")]
    Validation(String),

    /// A response or series lacked metadata that is required.
    #[error("schema error: {0}")]
    Schema(String),

    /// Network failure, timeout, non-2xx status or an undecodable body.
    #[error("fetch from {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The repository cannot answer this shape of query.
    #[error("{operation} is not supported by {repository}")]
    NotSupported {
        repository: &'static str,
        operation: &'static str,
    },

    #[error("no {material} graph for {property_x} / {property_y}")]
    UnknownGraph {
        material: String,
        property_x: String,
        property_y: String,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
