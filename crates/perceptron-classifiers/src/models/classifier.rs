use crate::config::ModelConfig;
use crate::error::{Result, TrainingError};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::build_algorithm;
use crate::models::perceptron::Perceptron;
use crate::models::training::TrainingReport;

/// Perceptron driven by a [`ModelConfig`].
///
/// The perceptron is created on the first `fit`, sized from the number of
/// feature rows. Later fits keep training the same weights as long as the
/// number of features does not change.
pub struct PerceptronClassifier {
    model: Option<Perceptron>,
    params: ModelConfig,
}

impl PerceptronClassifier {
    pub fn new(params: ModelConfig) -> Self {
        PerceptronClassifier { model: None, params }
    }

    pub fn params(&self) -> &ModelConfig {
        &self.params
    }

    /// The fitted perceptron, if any.
    pub fn perceptron(&self) -> Option<&Perceptron> {
        self.model.as_ref()
    }

    fn init_perceptron(&self, n_inputs: usize) -> Result<Perceptron> {
        match self.params.seed {
            Some(seed) => Perceptron::with_seed(n_inputs, self.params.weight_init_range, seed),
            None => Perceptron::new(n_inputs, self.params.weight_init_range),
        }
    }

    fn fitted(&self) -> Result<&Perceptron> {
        self.model
            .as_ref()
            .ok_or_else(|| TrainingError::invalid("model has not been fitted"))
    }
}

impl ClassifierModel for PerceptronClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[f64]) -> Result<TrainingReport> {
        let mut perceptron = match self.model.take() {
            Some(p) if p.n_inputs() == x.nrows() => p,
            _ => self.init_perceptron(x.nrows())?,
        };

        let algorithm = build_algorithm(&self.params);
        log::info!(
            "Fitting perceptron on {} samples with {} features using {}",
            x.ncols(),
            x.nrows(),
            algorithm.name()
        );
        let report = perceptron.train(algorithm.as_ref(), x, y);
        self.model = Some(perceptron);
        report
    }

    fn decision_function(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        self.fitted()?.decision_function(x)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        self.fitted()?.predict(x)
    }

    fn name(&self) -> &str {
        "perceptron"
    }
}
