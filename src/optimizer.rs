//! Abstract optimizer and its outcome.

mod mu_plus_lambda;
mod parameters;

pub use mu_plus_lambda::MuPlusLambda;
pub use parameters::Parameters;

use crate::{
  archive::ParetoFront,
  error::Result,
  individual::Individual,
  statistics::Logbook,
};

/// Represents an abstract optimizer.
pub trait Optimizer<S, const N: usize>: Sized {
  /// Runs the optimizer for the configured number of generations.
  ///
  /// # Errors
  ///
  /// Fails before the first generation on invalid configuration, and aborts
  /// the run as soon as an evaluator fails.
  fn optimize(self) -> Result<Evolution<S, N>>;
}

/// Outcome of a finished run.
#[derive(Clone, Debug)]
pub struct Evolution<S, const N: usize> {
  /// The last population.
  pub population: Vec<Individual<S, N>>,
  /// Statistics of every generation, the initial population included.
  pub logbook: Logbook<N>,
  /// Every non-dominated individual seen during the run.
  pub archive: ParetoFront<S, N>,
}
