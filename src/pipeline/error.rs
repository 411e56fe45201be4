use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::imaging::DecodeError;

/// Why a single prediction request failed. Gate rejections are not errors.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("No file uploaded")]
    MissingInput,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl PredictError {
    /// Short stage name for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            PredictError::MissingInput => "input",
            PredictError::Decode(_) => "decode",
            PredictError::Classifier(_) => "classifier",
        }
    }
}
