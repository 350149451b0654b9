use thiserror::Error;

use crate::math::ShapeError;

/// Errors raised while building or training a perceptron.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingError {
    /// Inputs that do not match the model or each other (wrong number of
    /// feature rows, label count differing from sample count, bad
    /// hyper-parameters). Raised before any weight is touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The relaxation step would divide by a zero or non-finite squared norm.
    /// `column` is the sample's column in the training inputs.
    #[error("relaxation step undefined for misclassified sample {column}: squared norm is {squared_norm}")]
    Numeric { column: usize, squared_norm: f64 },
}

impl TrainingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TrainingError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, TrainingError>;
