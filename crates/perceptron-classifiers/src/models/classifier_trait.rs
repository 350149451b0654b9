use crate::error::Result;
use crate::math::Array2;
use crate::models::training::TrainingReport;

/// A small trait abstraction for binary classifiers.
///
/// `x` is `n_features x n_samples` (one sample per column) and `y` holds one
/// signed label per sample (negative for the negative class).
pub trait ClassifierModel {
    /// Fit the model and report whether training converged.
    fn fit(&mut self, x: &Array2<f64>, y: &[f64]) -> Result<TrainingReport>;

    /// Raw scores, one per sample.
    fn decision_function(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Predicted labels (`1.0` / `-1.0`).
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
