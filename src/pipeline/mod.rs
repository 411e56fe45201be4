pub mod error;
pub mod pipeline;
pub mod prediction;

pub use error::PredictError;
pub use pipeline::Pipeline;
pub use prediction::{Prediction, UNKNOWN_LABEL};
