use backprop_mlp::architecture::ArchitectureConfig;
use backprop_mlp::config::{load_config, TrainingConfig};
use backprop_mlp::network::Network;
use backprop_mlp::training::{classify, Trainer};
use backprop_mlp::utils::{mean_squared_error, Matrix};
use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

// Single-sample demo: 2 -> 3 -> 3 -> 1 (ReLU, ReLU, Sigmoid) learning [1, 0] -> 1.
// Usage: mlp_relu_sigmoid [training_config.json]

// Print one matrix row by row.
fn print_matrix(label: &str, matrix: &Matrix) {
    println!("{}:", label);
    for row in matrix.rows() {
        let values: Vec<String> = row.iter().map(|v| format!("{:>9.5}", v)).collect();
        println!("  [{}]", values.join(" "));
    }
}

fn print_parameters(network: &Network) {
    for (index, layer) in network.layers().iter().enumerate() {
        print_matrix(&format!("Layer {} weights", index), layer.weights());
        print_matrix(&format!("Layer {} bias", index), layer.bias());
    }
}

fn run(config: &TrainingConfig, architecture: &ArchitectureConfig) -> backprop_mlp::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut network = Network::from_architecture(architecture, &mut rng)?;

    let input = array![[1.0, 0.0]];
    let target = array![[1.0]];

    println!("Initial parameters:");
    print_parameters(&network);

    let mut trainer = Trainer::from_config(config);
    println!("\nLearning rate: {}", trainer.learning_rate());
    let report = trainer.train(&mut network, &input, &target, config.iterations)?;

    let prediction = network.predict(&input)?;
    let loss = mean_squared_error(&target, &prediction)?;
    let classes = classify(&prediction, config.threshold());

    println!("\nTrained parameters:");
    print_parameters(&network);
    println!(
        "\nIterations: {}, Final training loss: {:.6}",
        report.losses.len(),
        report.final_loss().unwrap_or(f64::NAN)
    );
    print_matrix("Prediction", &prediction);
    println!("Loss: {:.6}", loss);
    println!("Class (threshold {}): {:?}", config.threshold(), classes);
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => load_config(path).unwrap_or_else(|err| {
            error!(path = %path, %err, "failed to load training config");
            process::exit(1);
        }),
        None => TrainingConfig {
            iterations: 200,
            log_every: Some(50),
            ..TrainingConfig::default()
        },
    };

    if let Err(err) = run(&config, &ArchitectureConfig::default_topology()) {
        error!(%err, "training failed");
        process::exit(1);
    }
}
