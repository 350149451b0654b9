use anyhow::Context;
use perceptron_classifiers::math::Array2;
use perceptron_classifiers::models::{Perceptron, PerceptronCriterion, Relaxation, TrainingAlgorithm};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // AND gate: one sample per column
    let x = Array2::from_shape_vec(
        (2, 4),
        vec![
            0.0, 0.0, 1.0, 1.0, // x1
            0.0, 1.0, 0.0, 1.0, // x2
        ],
    )
    .context("failed to create feature matrix")?;
    let y = vec![-1.0, -1.0, -1.0, 1.0];

    println!("AND gate X shape: {:?}", x.shape());

    let strategies: Vec<Box<dyn TrainingAlgorithm>> = vec![
        Box::new(PerceptronCriterion::new(1000, 0.25)),
        // under-relaxation (< 1) only approaches the margin, so step past it
        Box::new(Relaxation::new(1000, 1.5, 0.5)),
    ];

    for strategy in strategies {
        let mut perceptron = Perceptron::new(2, (-1.0, 1.0))?;
        let report = perceptron.train(strategy.as_ref(), &x, &y)?;

        println!(
            "{}: converged={} after {} iterations",
            strategy.name(),
            report.converged,
            report.iterations
        );
        println!("  initial weights = {}", perceptron.initial_weights().column(0));
        println!("  final weights   = {}", perceptron.weights().column(0));
        println!("  scores          = {:?}", perceptron.decision_function(&x)?);
        println!("  predictions     = {:?}", perceptron.predict(&x)?);
    }

    Ok(())
}
