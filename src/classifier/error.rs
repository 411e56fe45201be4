use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("could not read or write model file: {0}")]
    Load(#[from] std::io::Error),

    #[error("model file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("input has {got} values but the classifier expects {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("classifier returned {got} scores for {expected} labels")]
    OutputLength { expected: usize, got: usize },

    #[error("classifier returned an invalid probability vector: {0}")]
    InvalidOutput(String),

    /// Failure inside a classifier backend not covered above.
    #[error("classifier failed: {0}")]
    Backend(String),
}
