use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TrainingError};
use crate::math::Array2;
use crate::models::training::{TrainingAlgorithm, TrainingReport};

/// Range the initial weights are drawn from when none is given.
pub const DEFAULT_WEIGHT_RANGE: (f64, f64) = (-1.0, 1.0);

/// Number of inputs used by `Perceptron::default()`.
pub const DEFAULT_INPUTS: usize = 2;

/// Single-layer linear classifier.
///
/// The weight vector is an `(n_inputs + 1) x 1` column; element 0 is the
/// bias weight and element `i + 1` weighs input `i`. A sample `x` is
/// assigned to the positive class when `w0 + sum(w[i+1] * x[i]) >= 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Perceptron {
    n_inputs: usize,
    weights: Array2<f64>,
    initial_weights: Array2<f64>,
}

impl Perceptron {
    /// Create a perceptron with `n_inputs` inputs and weights drawn uniformly
    /// from `scope` (inclusive), using a generator seeded from OS entropy.
    pub fn new(n_inputs: usize, scope: (f64, f64)) -> Result<Self> {
        let mut rng = StdRng::from_entropy();
        Self::with_rng(n_inputs, scope, &mut rng)
    }

    /// Same as [`Perceptron::new`] but reproducible.
    pub fn with_seed(n_inputs: usize, scope: (f64, f64), seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(n_inputs, scope, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(n_inputs: usize, scope: (f64, f64), rng: &mut R) -> Result<Self> {
        if n_inputs == 0 {
            return Err(TrainingError::invalid("perceptron needs at least one input"));
        }
        let (lo, hi) = scope;
        if !lo.is_finite() || !hi.is_finite() || lo > hi || !(hi - lo).is_finite() {
            return Err(TrainingError::invalid(format!(
                "weight init range ({}, {}) must be finite with low <= high",
                lo, hi
            )));
        }

        Ok(Self::draw_weights(n_inputs, scope, rng))
    }

    /// Draw `n_inputs + 1` weights uniformly from `scope`, which must already
    /// be a finite range with `lo <= hi`.
    fn draw_weights<R: Rng + ?Sized>(n_inputs: usize, scope: (f64, f64), rng: &mut R) -> Self {
        let (lo, hi) = scope;
        let dist = Uniform::new_inclusive(lo, hi);
        let weights: Vec<f64> = (0..=n_inputs).map(|_| dist.sample(&mut *rng)).collect();
        log::debug!(
            "Initialized perceptron with {} inputs, weights drawn from [{}, {}]",
            n_inputs,
            lo,
            hi
        );
        Self::from_column(n_inputs, Array2::column_vector(weights))
    }

    /// Build a perceptron from explicit initial weights `[bias, w1, .., wN]`.
    pub fn from_weights(weights: Vec<f64>) -> Result<Self> {
        if weights.len() < 2 {
            return Err(TrainingError::invalid(format!(
                "expected a bias weight and at least one input weight, got {} weights",
                weights.len()
            )));
        }
        let n_inputs = weights.len() - 1;
        Ok(Self::from_column(n_inputs, Array2::column_vector(weights)))
    }

    fn from_column(n_inputs: usize, weights: Array2<f64>) -> Self {
        Perceptron {
            n_inputs,
            initial_weights: weights.clone(),
            weights,
        }
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    /// Current `(n_inputs + 1) x 1` weight column.
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Weights as they were right after construction.
    pub fn initial_weights(&self) -> &Array2<f64> {
        &self.initial_weights
    }

    pub(crate) fn weights_mut(&mut self) -> &mut Array2<f64> {
        &mut self.weights
    }

    /// Restore the weights drawn at construction.
    pub fn reset(&mut self) {
        self.weights = self.initial_weights.clone();
    }

    /// Train with the given strategy. The perceptron is borrowed mutably for
    /// the whole run; the report tells whether training converged.
    pub fn train<A>(&mut self, algorithm: &A, inputs: &Array2<f64>, labels: &[f64]) -> Result<TrainingReport>
    where
        A: TrainingAlgorithm + ?Sized,
    {
        algorithm.train(self, inputs, labels)
    }

    /// Raw score `w0 + sum(w[i+1] * x[i])` for every column of `inputs`
    /// (`n_inputs x n_samples`).
    pub fn decision_function(&self, inputs: &Array2<f64>) -> Result<Vec<f64>> {
        if inputs.nrows() != self.n_inputs {
            return Err(TrainingError::invalid(format!(
                "wrong number of inputs: expected {}, got {}",
                self.n_inputs,
                inputs.nrows()
            )));
        }

        let mut augmented = Array2::ones(1, inputs.ncols());
        for row in inputs.rows() {
            augmented.push_row(row.as_slice())?;
        }
        let scores = self.weights.transpose().dot(&augmented)?;
        Ok(scores.to_vec())
    }

    /// Class labels (`1.0` / `-1.0`) for every column of `inputs`.
    pub fn predict(&self, inputs: &Array2<f64>) -> Result<Vec<f64>> {
        Ok(self
            .decision_function(inputs)?
            .into_iter()
            .map(|score| if score < 0.0 { -1.0 } else { 1.0 })
            .collect())
    }
}

impl Default for Perceptron {
    fn default() -> Self {
        Self::draw_weights(DEFAULT_INPUTS, DEFAULT_WEIGHT_RANGE, &mut StdRng::from_entropy())
    }
}
