use std::path::Path;

use crate::classifier::{ClassifierError, SkinClassifier};
use crate::config::ModelContract;
use crate::network::Network;
use crate::tensor::ModelInput;

/// Runs a bundled dense [`Network`] over the flattened NHWC tensor.
#[derive(Debug, Clone)]
pub struct NetworkClassifier {
    network: Network,
}

impl NetworkClassifier {
    pub fn load(path: impl AsRef<Path>) -> Result<NetworkClassifier, ClassifierError> {
        let path = path.as_ref();
        let network = Network::load_json(path)?;
        tracing::info!(
            path = %path.display(),
            inputs = network.input_size(),
            outputs = network.output_size(),
            layers = network.layers.len(),
            "loaded skin-type model"
        );
        Ok(NetworkClassifier { network })
    }

    pub fn from_network(network: Network) -> Result<NetworkClassifier, ClassifierError> {
        network.validate()?;
        Ok(NetworkClassifier { network })
    }
}

impl SkinClassifier for NetworkClassifier {
    fn predict(&self, input: &ModelInput) -> Result<Vec<f32>, ClassifierError> {
        let expected = self.network.input_size();
        if input.len() != expected {
            return Err(ClassifierError::ShapeMismatch { expected, got: input.len() });
        }
        let x: Vec<f64> = input.as_array().iter().map(|&v| f64::from(v)).collect();
        Ok(self.network.forward(&x).into_iter().map(|p| p as f32).collect())
    }

    fn contract(&self) -> Option<&ModelContract> {
        self.network.metadata.as_ref().and_then(|m| m.input.as_ref())
    }

    fn labels(&self) -> Option<&[String]> {
        self.network.metadata.as_ref().and_then(|m| m.output_labels.as_deref())
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.network.input_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::network::ModelMetadata;
    use crate::tensor::build_tensor;
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny_contract() -> ModelContract {
        ModelContract { input_width: 4, input_height: 4, ..ModelContract::default() }
    }

    fn tiny_network() -> Network {
        let mut net = Network::new(
            vec![(6, 64, ActivationFunction::ReLU), (3, 6, ActivationFunction::Softmax)],
            &mut StdRng::seed_from_u64(5),
        );
        net.metadata = Some(ModelMetadata {
            description: None,
            input: Some(tiny_contract()),
            output_labels: Some(vec!["dry".into(), "normal".into(), "oily".into()]),
        });
        net
    }

    #[test]
    fn predicts_a_distribution() {
        let clf = NetworkClassifier::from_network(tiny_network()).unwrap();
        let input = build_tensor(&RgbImage::from_pixel(10, 10, Rgb([200, 150, 120])), &tiny_contract());
        let p = clf.predict(&input).unwrap();
        assert_eq!(p.len(), 3);
        assert!((p.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wrong_input_size_is_an_error() {
        let clf = NetworkClassifier::from_network(tiny_network()).unwrap();
        let contract = ModelContract { input_width: 5, ..tiny_contract() };
        let input = build_tensor(&RgbImage::new(5, 4), &contract);
        match clf.predict(&input) {
            Err(ClassifierError::ShapeMismatch { expected: 64, got: 80 }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exposes_metadata() {
        let clf = NetworkClassifier::from_network(tiny_network()).unwrap();
        assert_eq!(clf.contract(), Some(&tiny_contract()));
        assert_eq!(clf.labels().map(<[String]>::len), Some(3));
    }

    #[test]
    fn bare_network_declares_nothing() {
        let mut net = tiny_network();
        net.metadata = None;
        let clf = NetworkClassifier::from_network(net).unwrap();
        assert!(clf.contract().is_none());
        assert!(clf.labels().is_none());
    }
}
