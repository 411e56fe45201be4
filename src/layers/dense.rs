use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = σ(x · W + b)`.
///
/// Inference only; a layer holds no per-call state, so one instance can serve
/// many threads at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    /// `input_size × size`.
    pub weights: Matrix,
    /// `1 × size`.
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    /// Xavier-initialised weights, zero biases.
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, activation: ActivationFunction, rng: &mut R) -> Layer {
        Layer {
            size,
            weights: Matrix::xavier(input_size, size, rng),
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Problems that would make `feed_from` produce garbage, if any.
    pub fn shape_error(&self) -> Option<String> {
        if !self.weights.is_well_formed() || !self.biases.is_well_formed() {
            return Some("ragged weight or bias matrix".to_string());
        }
        if self.weights.cols != self.size {
            return Some(format!("weights have {} columns for {} neurons", self.weights.cols, self.size));
        }
        if self.biases.rows != 1 || self.biases.cols != self.size {
            return Some(format!(
                "biases are {}×{} for {} neurons",
                self.biases.rows, self.biases.cols, self.size
            ));
        }
        None
    }

    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        let z: Vec<f64> = self.weights.left_mul(input)
            .into_iter()
            .zip(&self.biases.data[0])
            .map(|(wx, b)| wx + b)
            .collect();
        self.activator.apply(z)
    }
}
