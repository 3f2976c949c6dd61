use thiserror::Error;

/// Failure raised anywhere in the request pipeline.
///
/// Every variant is terminal for the request; the handler turns it into an
/// [`ErrorEnvelope`](crate::handler::ErrorEnvelope).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryError {
    /// Malformed or missing request fields. No model code has run.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Coordinate dimensionality differs between points of one request.
    #[error("inconsistent point shape: {0}")]
    Shape(String),
    /// The classifier refused to fit the training set.
    #[error("training failed: {0}")]
    Training(String),
    /// Prediction or geometry extraction failed after a successful fit.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl BoundaryError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            BoundaryError::Validation(_) => "validation",
            BoundaryError::Shape(_) => "data preparation",
            BoundaryError::Training(_) => "training",
            BoundaryError::Inference(_) => "inference",
        }
    }
}

pub type Result<T> = std::result::Result<T, BoundaryError>;
