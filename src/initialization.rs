//! Initial population operators.

use rand::{seq::index, RngCore};

use crate::{error::ConfigError, genome::Genome};

/// An operator that creates a random solution for the initial population.
///
/// # Examples
/// ```
/// # use rand::{Rng, RngCore};
/// # use setmoga::initialization::Initialization;
/// let i = |rng: &mut dyn RngCore| rng.gen_range(0.0..100.0_f32);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Initialization<S> {
  /// Creates a new solution.
  fn initialize(&self, rng: &mut dyn RngCore) -> S;
}

impl<S, F> Initialization<S> for F
where
  F: Fn(&mut dyn RngCore) -> S,
{
  fn initialize(&self, rng: &mut dyn RngCore) -> S {
    self(rng)
  }
}

/// Creates genomes of `size` distinct items drawn uniformly from the
/// universe `[0, universe)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RandomSet {
  universe: usize,
  size: usize,
}

impl RandomSet {
  /// Creates a genome initializer.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::EmptyUniverse`] if `universe` is zero and
  /// [`ConfigError::InitialSizeTooLarge`] if `size` exceeds `universe`.
  pub fn new(universe: usize, size: usize) -> Result<Self, ConfigError> {
    if universe == 0 {
      return Err(ConfigError::EmptyUniverse);
    }
    if size > universe {
      return Err(ConfigError::InitialSizeTooLarge { size, universe });
    }
    Ok(Self { universe, size })
  }

  /// Returns the universe size.
  pub fn universe(&self) -> usize {
    self.universe
  }

  /// Returns the number of items in each created genome.
  pub fn size(&self) -> usize {
    self.size
  }
}

impl Initialization<Genome> for RandomSet {
  fn initialize(&self, rng: &mut dyn RngCore) -> Genome {
    index::sample(rng, self.universe, self.size)
      .into_iter()
      .collect()
  }
}
