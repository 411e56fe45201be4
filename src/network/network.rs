use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::classifier::ClassifierError;
use crate::{activation::activation::ActivationFunction, layers::dense::Layer};
use crate::network::metadata::ModelMetadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    /// Builds a network from (size, input_size, activation) tuples.
    pub fn new<R: Rng + ?Sized>(layer_specs: Vec<(usize, usize, ActivationFunction)>, rng: &mut R) -> Network {
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation, rng))
            .collect();
        Network { layers, metadata: None }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Checks that every layer is well formed and feeds the next one.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.layers.is_empty() {
            return Err(ClassifierError::Malformed("network has no layers".to_string()));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if let Some(problem) = layer.shape_error() {
                return Err(ClassifierError::Malformed(format!("layer {i}: {problem}")));
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[1].input_size() != pair[0].size {
                return Err(ClassifierError::Malformed(format!(
                    "layer {} expects {} inputs but layer {} has {} neurons",
                    i + 1, pair[1].input_size(), i, pair[0].size
                )));
            }
        }
        Ok(())
    }

    /// Forward pass. `input` must have `input_size()` values.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a network previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network, ClassifierError> {
        let reader = BufReader::new(File::open(path)?);
        let network: Network = serde_json::from_reader(reader)?;
        network.validate()?;
        Ok(network)
    }
}
