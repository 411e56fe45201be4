pub mod config;
pub mod imaging;
pub mod skin;
pub mod texture;
pub mod gate;
pub mod tensor;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod classifier;
pub mod pipeline;

#[cfg(test)]
mod test_images;

// Convenience re-exports
pub use config::{ConfigError, ModelContract, PipelineConfig};
pub use imaging::{decode_image, DecodeError};
pub use skin::detect_skin;
pub use texture::has_skin_texture;
pub use gate::{evaluate_gates, GateDecision, GateRejection};
pub use tensor::{build_tensor, ModelInput};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{ModelMetadata, Network};
pub use classifier::{ClassifierError, NetworkClassifier, SkinClassifier};
pub use pipeline::{Pipeline, PredictError, Prediction, UNKNOWN_LABEL};
