use typed_builder::TypedBuilder;

use crate::error::ConfigError;

/// Run parameters of a [`MuPlusLambda`] optimizer.
///
/// # Examples
/// ```
/// # use setmoga::optimizer::Parameters;
/// let parameters =
///   Parameters::builder().mu(20).generations(10).seed(42).build();
/// assert_eq!(parameters.lambda, 100);
/// assert!(parameters.validate().is_ok());
/// ```
///
/// [`MuPlusLambda`]: super::MuPlusLambda
#[derive(TypedBuilder, Clone, Copy, PartialEq, Debug)]
pub struct Parameters {
  /// Population size.
  #[builder(default = 50)]
  pub mu: usize,
  /// Number of offspring created each generation.
  #[builder(default = 100)]
  pub lambda: usize,
  /// Probability that an offspring is created by crossover.
  #[builder(default = 0.7)]
  pub cxpb: f64,
  /// Probability that an offspring is created by mutation.
  #[builder(default = 0.2)]
  pub mutpb: f64,
  /// Number of generations to run.
  #[builder(default = 100)]
  pub generations: usize,
  /// Seed of the run's random source.
  #[builder(default = 0)]
  pub seed: u64,
}

impl Default for Parameters {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl Parameters {
  /// Checks that parameters describe a runnable configuration.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::ZeroMu`] if `mu` is zero,
  /// [`ConfigError::ZeroLambda`] if `lambda` is zero while generations are
  /// requested, and [`ConfigError::Probability`] if `cxpb` or `mutpb` is NaN
  /// or lies outside of `[0, 1]`.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.mu == 0 {
      return Err(ConfigError::ZeroMu);
    }
    if self.lambda == 0 && self.generations > 0 {
      return Err(ConfigError::ZeroLambda);
    }
    for (name, value) in [("cxpb", self.cxpb), ("mutpb", self.mutpb)] {
      if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Probability { name, value });
      }
    }
    Ok(())
  }
}
