//! Error-correction training for [`Perceptron`].
//!
//! Both algorithms work on the same augmented sample matrix: every sample
//! column `x` becomes `[1, x1, .., xN]`, and columns with a negative label
//! are negated so that a correctly classified sample always satisfies
//! `w^T x > threshold`. Each iteration collects the columns that violate the
//! threshold and moves the weights by `learning_rate * correction`.
//!
//! * [`perceptron_criterion_algorithm`]: threshold 0, the correction is the
//!   sum of the misclassified columns.
//! * [`relaxation_algorithm`]: threshold `bias_value`, each misclassified
//!   column contributes `(bias_value - w^T y) / |y|^2 * y`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainingError};
use crate::math::tools::{power, sum_cols};
use crate::math::Array2;
use crate::models::perceptron::Perceptron;

pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_LEARNING_RATE: f64 = 0.25;
pub const DEFAULT_BIAS_VALUE: f64 = 0.5;

/// Outcome of a training run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Weight updates performed.
    pub iterations: usize,
    /// Samples still violating the threshold when training stopped.
    pub misclassified: usize,
    /// `true` when no sample violates the threshold.
    pub converged: bool,
}

/// A training strategy that updates a perceptron's weights in place.
///
/// `inputs` is `n_inputs x n_samples` (one sample per column) and `labels`
/// holds one signed label per column.
pub trait TrainingAlgorithm {
    fn train(&self, perceptron: &mut Perceptron, inputs: &Array2<f64>, labels: &[f64]) -> Result<TrainingReport>;

    fn name(&self) -> &str {
        "training algorithm"
    }
}

/// Perceptron criterion (batch perceptron) strategy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerceptronCriterion {
    pub max_iter: usize,
    pub learning_rate: f64,
}

impl PerceptronCriterion {
    pub fn new(max_iter: usize, learning_rate: f64) -> Self {
        Self {
            max_iter,
            learning_rate,
        }
    }
}

impl Default for PerceptronCriterion {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITER, DEFAULT_LEARNING_RATE)
    }
}

impl TrainingAlgorithm for PerceptronCriterion {
    fn train(&self, perceptron: &mut Perceptron, inputs: &Array2<f64>, labels: &[f64]) -> Result<TrainingReport> {
        perceptron_criterion_algorithm(perceptron, inputs, labels, self.max_iter, self.learning_rate)
    }

    fn name(&self) -> &str {
        "perceptron criterion"
    }
}

/// Relaxation-with-margin strategy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relaxation {
    pub max_iter: usize,
    pub learning_rate: f64,
    pub bias_value: f64,
}

impl Relaxation {
    pub fn new(max_iter: usize, learning_rate: f64, bias_value: f64) -> Self {
        Self {
            max_iter,
            learning_rate,
            bias_value,
        }
    }
}

impl Default for Relaxation {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITER, DEFAULT_LEARNING_RATE, DEFAULT_BIAS_VALUE)
    }
}

impl TrainingAlgorithm for Relaxation {
    fn train(&self, perceptron: &mut Perceptron, inputs: &Array2<f64>, labels: &[f64]) -> Result<TrainingReport> {
        relaxation_algorithm(
            perceptron,
            inputs,
            labels,
            self.max_iter,
            self.learning_rate,
            self.bias_value,
        )
    }

    fn name(&self) -> &str {
        "relaxation"
    }
}

/// Train with the perceptron criterion.
///
/// Stops when no sample scores below zero or after `max_iter` updates,
/// whichever comes first. Argument errors are reported before the weights
/// are touched.
pub fn perceptron_criterion_algorithm(
    perceptron: &mut Perceptron,
    inputs: &Array2<f64>,
    labels: &[f64],
    max_iter: usize,
    learning_rate: f64,
) -> Result<TrainingReport> {
    train_with(
        "perceptron criterion",
        perceptron,
        inputs,
        labels,
        max_iter,
        learning_rate,
        0.0,
        |_, misclassified| Ok(criterion_correction(misclassified)),
    )
}

/// Train with the relaxation rule and margin `bias_value`.
///
/// A misclassified column whose squared norm is zero or not finite stops
/// training with [`TrainingError::Numeric`] naming that sample's column in
/// `inputs`; the weights keep the value of the last completed iteration.
/// Finite inputs always carry the bias entry, so this needs a hand-built
/// sample matrix to happen.
pub fn relaxation_algorithm(
    perceptron: &mut Perceptron,
    inputs: &Array2<f64>,
    labels: &[f64],
    max_iter: usize,
    learning_rate: f64,
    bias_value: f64,
) -> Result<TrainingReport> {
    check_finite("bias value", bias_value)?;
    train_with(
        "relaxation",
        perceptron,
        inputs,
        labels,
        max_iter,
        learning_rate,
        bias_value,
        |weights, misclassified| relaxation_correction(weights, misclassified, bias_value),
    )
}

#[allow(clippy::too_many_arguments)]
fn train_with<F>(
    algorithm: &str,
    perceptron: &mut Perceptron,
    inputs: &Array2<f64>,
    labels: &[f64],
    max_iter: usize,
    learning_rate: f64,
    threshold: f64,
    correction: F,
) -> Result<TrainingReport>
where
    F: Fn(&Array2<f64>, &Array2<f64>) -> Result<Array2<f64>>,
{
    check_arguments(perceptron, inputs, labels)?;
    check_finite("learning rate", learning_rate)?;

    let samples = scoring_samples(inputs, labels)?;
    let (mut misclassified, mut columns) = select_misclassified(perceptron.weights(), &samples, threshold)?;
    log::debug!(
        "{}: {} samples, {} below threshold {} before training",
        algorithm,
        samples.ncols(),
        misclassified.ncols(),
        threshold
    );

    let mut iterations = 0;
    while iterations < max_iter && misclassified.ncols() != 0 {
        let step = correction(perceptron.weights(), &misclassified)
            .map_err(|err| match err {
                TrainingError::Numeric { column, squared_norm } => TrainingError::Numeric {
                    column: columns[column],
                    squared_norm,
                },
                other => other,
            })?
            .scale(learning_rate);
        perceptron.weights_mut().try_add_assign(&step)?;
        (misclassified, columns) = select_misclassified(perceptron.weights(), &samples, threshold)?;
        iterations += 1;
        log::trace!(
            "{}: iteration {} leaves {} misclassified",
            algorithm,
            iterations,
            misclassified.ncols()
        );
    }

    let report = TrainingReport {
        iterations,
        misclassified: misclassified.ncols(),
        converged: misclassified.ncols() == 0,
    };
    if report.converged {
        log::debug!(
            "{}: converged after {} iterations, weights {}",
            algorithm,
            iterations,
            perceptron.weights().column(0)
        );
    } else {
        log::warn!(
            "{}: stopped at max_iter={} with {} misclassified samples",
            algorithm,
            max_iter,
            report.misclassified
        );
    }
    Ok(report)
}

fn check_arguments(perceptron: &Perceptron, inputs: &Array2<f64>, labels: &[f64]) -> Result<()> {
    if inputs.nrows() != perceptron.n_inputs() {
        return Err(TrainingError::invalid(format!(
            "wrong number of inputs: perceptron has {}, inputs have {} rows",
            perceptron.n_inputs(),
            inputs.nrows()
        )));
    }
    if labels.len() != inputs.ncols() {
        return Err(TrainingError::invalid(format!(
            "labels parameter has wrong size: {} labels for {} samples",
            labels.len(),
            inputs.ncols()
        )));
    }
    // a NaN sample never scores below the threshold and would pass as classified
    if let Some(idx) = inputs.as_slice().iter().position(|v| !v.is_finite()) {
        let (row, col) = (idx / inputs.ncols(), idx % inputs.ncols());
        return Err(TrainingError::invalid(format!(
            "inputs must be finite, got {} for input {} of sample {}",
            inputs[(row, col)],
            row,
            col
        )));
    }
    if let Some(col) = labels.iter().position(|v| !v.is_finite()) {
        return Err(TrainingError::invalid(format!(
            "labels must be finite, got {} for sample {}",
            labels[col], col
        )));
    }
    Ok(())
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(TrainingError::invalid(format!("{} must be finite, got {}", name, value)));
    }
    Ok(())
}

/// Build the `(N + 2) x M` working matrix `[bias; features..; label]` and
/// sign-normalize it.
pub(crate) fn augmented_samples(inputs: &Array2<f64>, labels: &[f64]) -> Result<Array2<f64>> {
    let label_row = inputs.nrows() + 1;

    let mut in_temp = Array2::row_vector(labels.to_vec());
    for row in inputs.rows() {
        in_temp.push_row(row.as_slice())?;
    }
    in_temp.push_row(&vec![1.0; labels.len()])?;
    in_temp.swap_rows(0, label_row)?;

    sign_normalize(&mut in_temp);
    Ok(in_temp)
}

/// Negate every row but the last (label) row in columns with a negative
/// label.
///
/// The label row itself is left untouched, so applying this twice undoes it:
/// it must run exactly once on a freshly built matrix.
pub(crate) fn sign_normalize(in_temp: &mut Array2<f64>) {
    let Some(label_row) = in_temp.nrows().checked_sub(1) else {
        return;
    };
    for col in 0..in_temp.ncols() {
        if in_temp[(label_row, col)] < 0.0 {
            for row in 0..label_row {
                in_temp[(row, col)] *= -1.0;
            }
        }
    }
}

/// Bias and feature rows of the normalized matrix, i.e. the part that is
/// scored against the weights.
fn scoring_samples(inputs: &Array2<f64>, labels: &[f64]) -> Result<Array2<f64>> {
    let in_temp = augmented_samples(inputs, labels)?;
    let rows: Vec<usize> = (0..=inputs.nrows()).collect();
    Ok(in_temp.select_rows(&rows))
}

/// Columns of `samples` whose score `w^T x` is below `threshold`, together
/// with their indices in `samples`.
fn select_misclassified(
    weights: &Array2<f64>,
    samples: &Array2<f64>,
    threshold: f64,
) -> Result<(Array2<f64>, Vec<usize>)> {
    let filter = weights.transpose().dot(samples)?.lt_scalar(threshold).row(0)?;
    let columns = filter
        .iter()
        .enumerate()
        .filter(|(_, below)| **below)
        .map(|(col, _)| col)
        .collect();
    Ok((samples.select_columns_by_mask(&filter)?, columns))
}

/// Per-row sum across the misclassified columns, as an `(N + 1) x 1` column.
fn criterion_correction(misclassified: &Array2<f64>) -> Array2<f64> {
    Array2::column_vector(
        (0..misclassified.nrows())
            .map(|row| misclassified.row_slice(row).iter().sum())
            .collect(),
    )
}

/// Relaxation step: every column `y` adds `(bias_value - w^T y) / |y|^2 * y`.
///
/// Each column is divided by its largest magnitude `m` first, so the step is
/// evaluated as `(bias_value / m - w^T y') / |y'|^2 * y'` and large finite
/// features do not overflow the squared norm. `column` in the error is the
/// index inside the misclassified set.
pub(crate) fn relaxation_correction(
    weights: &Array2<f64>,
    misclassified: &Array2<f64>,
    bias_value: f64,
) -> Result<Array2<f64>> {
    let scales: Vec<f64> = (0..misclassified.ncols())
        .map(|col| {
            misclassified
                .column(col)
                .iter()
                .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        })
        .collect();
    let scaled = Array2::from_shape_vec(
        misclassified.shape(),
        misclassified
            .as_slice()
            .iter()
            .enumerate()
            .map(|(idx, v)| v / scales[idx % misclassified.ncols()])
            .collect(),
    )?;
    let squared_norms = sum_cols(&power(&scaled));
    let criteria = weights.transpose().dot(&scaled)?;

    let mut correction = vec![0.0; misclassified.nrows()];
    for (col, &scale) in scales.iter().enumerate() {
        let squared_norm = squared_norms[(0, col)];
        if scale == 0.0 || !squared_norm.is_finite() {
            return Err(TrainingError::Numeric {
                column: col,
                squared_norm: if scale == 0.0 { 0.0 } else { squared_norm },
            });
        }
        let step = (bias_value / scale - criteria[(0, col)]) / squared_norm;
        for (row, acc) in correction.iter_mut().enumerate() {
            *acc += step * scaled[(row, col)];
        }
    }
    Ok(Array2::column_vector(correction))
}
