use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::perceptron::DEFAULT_WEIGHT_RANGE;
use crate::models::training::{DEFAULT_BIAS_VALUE, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITER};

/// Central configuration for perceptron models in the crate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub learning_rate: f64,
    pub max_iter: usize,

    /// Inclusive range the initial weights are drawn from.
    pub weight_init_range: (f64, f64),

    /// Seed for weight initialization; `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    pub algorithm: AlgorithmType,
}

/// Supported training algorithms and their specific hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub enum AlgorithmType {
    #[default]
    PerceptronCriterion,
    Relaxation {
        bias_value: f64,
    },
}

impl FromStr for AlgorithmType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "criterion" | "perceptron_criterion" => Ok(AlgorithmType::PerceptronCriterion),
            "relaxation" => Ok(AlgorithmType::Relaxation {
                bias_value: DEFAULT_BIAS_VALUE,
            }),
            _ => Err(format!(
                "Unknown training algorithm: {}. Valid options are: criterion, perceptron_criterion, relaxation",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f64, max_iter: usize, algorithm: AlgorithmType) -> Self {
        Self {
            learning_rate,
            max_iter,
            weight_init_range: DEFAULT_WEIGHT_RANGE,
            seed: None,
            algorithm,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_weight_init_range(mut self, range: (f64, f64)) -> Self {
        self.weight_init_range = range;
        self
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITER, AlgorithmType::default())
    }
}
