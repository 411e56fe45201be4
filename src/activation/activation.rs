use serde::{Serialize, Deserialize};
use std::f64::consts::{E, PI};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
    Identity,
    /// Vector-valued; normalised over the whole layer in `apply()`.
    Softmax,
    Tanh,
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
    Gelu,
    Swish,
}

impl ActivationFunction {
    /// Element-wise activation. `Softmax` is the identity here; the
    /// normalisation happens in `apply()`.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 { x } else { alpha * (E.powf(x) - 1.0) }
            }
            ActivationFunction::Gelu => {
                let c = (2.0_f64 / PI).sqrt();
                0.5 * x * (1.0 + (c * (x + 0.044715 * x.powi(3))).tanh())
            }
            ActivationFunction::Swish => x / (1.0 + E.powf(-x)),
        }
    }

    /// Activates a whole layer of pre-activations.
    pub fn apply(&self, z: Vec<f64>) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.into_iter().map(|x| self.function(x)).collect(),
        }
    }
}

/// Numerically stable softmax (max subtracted before exponentiating).
fn softmax(z: Vec<f64>) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.into_iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one_and_keeps_order() {
        let p = ActivationFunction::Softmax.apply(vec![1.0, 3.0, 2.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[1] > p[2] && p[2] > p[0]);
    }

    #[test]
    fn softmax_survives_large_logits() {
        let p = ActivationFunction::Softmax.apply(vec![1000.0, 1000.0]);
        assert_eq!(p, vec![0.5, 0.5]);
    }

    #[test]
    fn element_wise_functions() {
        assert_eq!(ActivationFunction::ReLU.apply(vec![-1.0, 2.0]), vec![0.0, 2.0]);
        assert_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_eq!(ActivationFunction::LeakyReLU { alpha: 0.1 }.function(-2.0), -0.2);
    }
}
