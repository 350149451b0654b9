pub mod classifier;
pub mod classifier_trait;
pub mod factory;
pub mod perceptron;
pub mod training;

pub use perceptron::Perceptron;
pub use training::{
    perceptron_criterion_algorithm, relaxation_algorithm, PerceptronCriterion, Relaxation, TrainingAlgorithm,
    TrainingReport,
};
