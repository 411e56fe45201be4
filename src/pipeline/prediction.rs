use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;

/// Label reported when a gate turns the image away.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Probabilities may drift this far from summing to 1 before a warning is logged.
const SUM_TOLERANCE: f32 = 1e-3;

/// Final answer for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    /// `{"label": "unknown", "confidence": 0.0}`.
    pub fn unknown() -> Prediction {
        Prediction { label: UNKNOWN_LABEL.to_string(), confidence: 0.0 }
    }

    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }

    /// Picks the most probable label. Ties go to the earliest label.
    ///
    /// Fails when the vector does not have one entry per label, or any entry
    /// is not a finite value in [0, 1].
    pub fn from_probabilities(probabilities: &[f32], labels: &[String]) -> Result<Prediction, ClassifierError> {
        if probabilities.len() != labels.len() || labels.is_empty() {
            return Err(ClassifierError::OutputLength { expected: labels.len(), got: probabilities.len() });
        }
        if let Some((i, p)) = probabilities.iter().enumerate().find(|(_, p)| !(p.is_finite() && (0.0..=1.0).contains(*p))) {
            return Err(ClassifierError::InvalidOutput(format!("score {i} is {p}")));
        }

        let sum: f32 = probabilities.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            tracing::warn!(sum, "classifier probabilities do not sum to 1");
        }

        let (best, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold((0, probabilities[0]), |(bi, bp), (i, p)| if p > bp { (i, p) } else { (bi, bp) });

        Ok(Prediction { label: labels[best].clone(), confidence })
    }
}
