//! Errors reported by the optimizer and its operators.
//!
//! Configuration errors are detected before the first generation runs.
//! Evaluation errors abort the run in the generation they occur in, so no
//! partially scored population ever reaches selection or the archive.

use thiserror::Error;

/// A `Result` alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error that stops an optimization run.
#[derive(Debug, Error)]
pub enum Error {
  /// The run was configured with invalid parameters.
  #[error("invalid configuration: {0}")]
  Config(#[from] ConfigError),

  /// An evaluator could not score a solution.
  #[error("failed to evaluate individual {index}")]
  Evaluation {
    /// Position of the individual in the evaluated batch.
    index: usize,
    /// Reason reported by the evaluator.
    #[source]
    source: EvaluationError,
  },

  /// An individual without valid fitness reached an operator that requires
  /// it, such as selection or the archive.
  #[error("individual {index} has no valid fitness")]
  Unevaluated {
    /// Position of the individual in the offending slice.
    index: usize,
  },
}

/// Invalid run parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
  /// Population size `mu` is zero.
  #[error("population size `mu` must be positive")]
  ZeroMu,

  /// Offspring count `lambda` is zero while generations are requested.
  #[error("offspring count `lambda` must be positive when generations are run")]
  ZeroLambda,

  /// A probability lies outside of `[0, 1]` or is NaN.
  #[error("probability `{name}` must lie in [0, 1], got {value}")]
  Probability {
    /// Name of the parameter.
    name: &'static str,
    /// Rejected value.
    value: f64,
  },

  /// The item universe is empty.
  #[error("item universe must not be empty")]
  EmptyUniverse,

  /// More distinct items are requested than the universe holds.
  #[error("cannot draw {size} distinct items from a universe of {universe}")]
  InitialSizeTooLarge {
    /// Requested genome cardinality.
    size: usize,
    /// Universe size.
    universe: usize,
  },

  /// The selection pool is smaller than the number of survivors requested.
  #[error(
    "selection pool of {pool} individuals cannot fill a quota of {quota}"
  )]
  InsufficientPool {
    /// Pool size.
    pool: usize,
    /// Requested number of survivors.
    quota: usize,
  },
}

/// Failure of an evaluator to score a solution.
///
/// A poor but valid score, like a penalty for an infeasible solution, is not
/// an error. This type is reserved for solutions that cannot be scored at all.
#[derive(Debug, Error)]
pub enum EvaluationError {
  /// A genome refers to an item that doesn't exist.
  #[error("item {item} is outside of the universe of {universe} items")]
  UnknownItem {
    /// Offending item.
    item: usize,
    /// Universe size.
    universe: usize,
  },

  /// An objective evaluated to NaN, which can't be ranked.
  #[error("objective {objective} evaluated to NaN")]
  NotANumber {
    /// Index of the objective.
    objective: usize,
  },

  /// Any other failure reported by a user-supplied evaluator.
  #[error(transparent)]
  Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_error_converts_into_error() {
    let err: Error = ConfigError::ZeroMu.into();
    assert!(matches!(err, Error::Config(ConfigError::ZeroMu)));
    assert_eq!(
      err.to_string(),
      "invalid configuration: population size `mu` must be positive"
    );
  }

  #[test]
  fn test_evaluation_error_keeps_source() {
    use std::error::Error as _;

    let err = Error::Evaluation {
      index: 3,
      source: EvaluationError::NotANumber { objective: 1 },
    };
    assert_eq!(err.to_string(), "failed to evaluate individual 3");
    assert_eq!(
      err.source().map(ToString::to_string).as_deref(),
      Some("objective 1 evaluated to NaN")
    );
  }

  #[test]
  fn test_boxed_errors_are_transparent() {
    let err: EvaluationError = Box::<dyn std::error::Error + Send + Sync>::from(
      "sensor offline",
    )
    .into();
    assert_eq!(err.to_string(), "sensor offline");
  }
}
