pub mod classifier;
pub mod error;
pub mod network_classifier;

pub use classifier::SkinClassifier;
pub use error::ClassifierError;
pub use network_classifier::NetworkClassifier;
