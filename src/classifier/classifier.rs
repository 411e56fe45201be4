use std::sync::Arc;

use crate::classifier::ClassifierError;
use crate::config::ModelContract;
use crate::tensor::ModelInput;

/// A loaded, ready-to-run skin-type model.
///
/// `predict` takes `&self` and implementations must be `Send + Sync`: the
/// server shares one instance across request threads without locking.
pub trait SkinClassifier: Send + Sync {
    /// Probability per label, in label order.
    fn predict(&self, input: &ModelInput) -> Result<Vec<f32>, ClassifierError>;

    /// Input layout the model was trained with, when it declares one.
    fn contract(&self) -> Option<&ModelContract> {
        None
    }

    /// Output labels the model was trained with, when it declares them.
    fn labels(&self) -> Option<&[String]> {
        None
    }

    /// Number of input values the model accepts, when fixed.
    fn input_len(&self) -> Option<usize> {
        None
    }
}

impl<C: SkinClassifier + ?Sized> SkinClassifier for Arc<C> {
    fn predict(&self, input: &ModelInput) -> Result<Vec<f32>, ClassifierError> {
        (**self).predict(input)
    }

    fn contract(&self) -> Option<&ModelContract> {
        (**self).contract()
    }

    fn labels(&self) -> Option<&[String]> {
        (**self).labels()
    }

    fn input_len(&self) -> Option<usize> {
        (**self).input_len()
    }
}

impl<C: SkinClassifier + ?Sized> SkinClassifier for Box<C> {
    fn predict(&self, input: &ModelInput) -> Result<Vec<f32>, ClassifierError> {
        (**self).predict(input)
    }

    fn contract(&self) -> Option<&ModelContract> {
        (**self).contract()
    }

    fn labels(&self) -> Option<&[String]> {
        (**self).labels()
    }

    fn input_len(&self) -> Option<usize> {
        (**self).input_len()
    }
}
