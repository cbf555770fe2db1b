//! Tests for architecture configuration and network construction.

use backprop_mlp::architecture::{load_architecture, ArchitectureConfig, LayerConfig};
use backprop_mlp::layers::Layer;
use backprop_mlp::network::Network;
use backprop_mlp::utils::Activation;
use backprop_mlp::MlpError;
use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;

mod loading_tests {
    use super::*;

    #[test]
    fn test_load_bundled_architecture() {
        let arch = load_architecture("config/architectures/mlp_2_3_3_1.json").unwrap();
        assert_eq!(arch, ArchitectureConfig::default_topology());
    }

    #[test]
    fn test_connection_mismatch_detected_at_load() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"layers": [
                {{"input_size": 2, "output_size": 3, "activation": "relu"}},
                {{"input_size": 2, "output_size": 1, "activation": "sigmoid"}}
            ]}}"#
        )
        .unwrap();

        assert!(matches!(
            load_architecture(file.path()),
            Err(MlpError::LayerConnection {
                index: 1,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_unknown_activation_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"layers": [{{"input_size": 2, "output_size": 1, "activation": "tanh"}}]}}"#
        )
        .unwrap();
        assert!(matches!(load_architecture(file.path()), Err(MlpError::Json(_))));
    }
}

mod building_tests {
    use super::*;

    #[test]
    fn test_build_default_topology() {
        let mut rng = StdRng::seed_from_u64(42);
        let network =
            Network::from_architecture(&ArchitectureConfig::default_topology(), &mut rng).unwrap();

        let activations: Vec<_> = network.layers().iter().map(|l| l.activation()).collect();
        assert_eq!(
            activations,
            vec![Activation::Relu, Activation::Relu, Activation::Sigmoid]
        );
        let sizes: Vec<_> = network
            .layers()
            .iter()
            .map(|l| (l.input_size(), l.output_size()))
            .collect();
        assert_eq!(sizes, vec![(2, 3), (3, 3), (3, 1)]);
    }

    #[test]
    fn test_biases_start_at_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let network = Network::default_topology(&mut rng);
        for layer in network.layers() {
            assert_eq!(layer.bias().nrows(), 1);
            assert!(layer.bias().iter().all(|&b| b == 0.0));
        }
    }

    #[test]
    fn test_same_seed_same_network() {
        let a = Network::default_topology(&mut StdRng::seed_from_u64(5));
        let b = Network::default_topology(&mut StdRng::seed_from_u64(5));
        let input = array![[1.0, 0.0]];
        assert_eq!(a.predict(&input).unwrap(), b.predict(&input).unwrap());
    }

    #[test]
    fn test_build_rejects_invalid_architecture() {
        let arch = ArchitectureConfig {
            layers: vec![
                LayerConfig {
                    input_size: 2,
                    output_size: 4,
                    activation: Activation::Relu,
                },
                LayerConfig {
                    input_size: 3,
                    output_size: 1,
                    activation: Activation::Identity,
                },
            ],
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Network::from_architecture(&arch, &mut rng).is_err());
    }
}
