//! perceptron-classifiers: a single-layer perceptron trained by error
//! correction.
//!
//! The crate provides small matrix types, the [`Perceptron`] model, and two
//! batch training algorithms: the perceptron criterion and the relaxation
//! rule with margin. A config-driven [`models::classifier::PerceptronClassifier`]
//! wraps both behind the [`models::classifier_trait::ClassifierModel`] trait.
//!
//! ```
//! use perceptron_classifiers::math::Array2;
//! use perceptron_classifiers::models::{Perceptron, PerceptronCriterion};
//!
//! // AND gate, one sample per column
//! let inputs = Array2::from_shape_vec((2, 4), vec![0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0]).unwrap();
//! let labels = [-1.0, -1.0, -1.0, 1.0];
//!
//! let mut perceptron = Perceptron::with_seed(2, (-1.0, 1.0), 3).unwrap();
//! let report = perceptron
//!     .train(&PerceptronCriterion::new(1000, 0.25), &inputs, &labels)
//!     .unwrap();
//! assert!(report.converged);
//! ```
pub mod config;
pub mod error;
pub mod math;
pub mod models;

pub use error::TrainingError;
pub use models::Perceptron;
