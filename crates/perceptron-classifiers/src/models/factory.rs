use crate::config::{AlgorithmType, ModelConfig};
use crate::models::classifier::PerceptronClassifier;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::training::{PerceptronCriterion, Relaxation, TrainingAlgorithm};

/// Build the training strategy described by `params`.
pub fn build_algorithm(params: &ModelConfig) -> Box<dyn TrainingAlgorithm> {
    match params.algorithm {
        AlgorithmType::PerceptronCriterion => Box::new(PerceptronCriterion::new(
            params.max_iter,
            params.learning_rate,
        )),
        AlgorithmType::Relaxation { bias_value } => Box::new(Relaxation::new(
            params.max_iter,
            params.learning_rate,
            bias_value,
        )),
    }
}

/// Build a boxed classifier model from a `ModelConfig`.
pub fn build_model(params: ModelConfig) -> Box<dyn ClassifierModel> {
    Box::new(PerceptronClassifier::new(params))
}
