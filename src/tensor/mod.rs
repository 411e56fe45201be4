pub mod preprocess;

pub use preprocess::{build_tensor, ModelInput, CHANNELS};
