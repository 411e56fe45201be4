use serde::{Deserialize, Serialize};

use crate::config::ModelContract;

/// Optional annotations attached to a saved Network.
/// All fields are optional so bare models (weights only) deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// Preprocessing the network was trained with.
    #[serde(default)]
    pub input: Option<ModelContract>,
    /// Class labels for the output layer, in output order.
    #[serde(default)]
    pub output_labels: Option<Vec<String>>,
}
