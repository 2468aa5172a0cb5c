//! Mutation operators and utilities.

use rand::{Rng, RngCore};

use crate::{
  error::ConfigError,
  genome::{Genome, Item},
};

/// An operator that mutates a single solution in place.
///
/// The optimizer mutates a clone of a parent through
/// [`Individual::solution_mut`], so the offspring's fitness is invalidated
/// even if the mutation turns out to be a no-op.
///
/// # Examples
/// ```
/// # use rand::{Rng, RngCore};
/// # use setmoga::mutation::Mutation;
/// let m = |v: &mut i32, rng: &mut dyn RngCore| *v += rng.gen_range(-1..=1);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
///
/// [`Individual::solution_mut`]: crate::individual::Individual::solution_mut
pub trait Mutation<S> {
  /// Mutates given solution.
  fn mutate(&self, solution: &mut S, rng: &mut dyn RngCore);
}

impl<S, F> Mutation<S> for F
where
  F: Fn(&mut S, &mut dyn RngCore),
{
  fn mutate(&self, solution: &mut S, rng: &mut dyn RngCore) {
    self(solution, rng)
  }
}

/// Set mutation. With equal probability either removes a random item from a
/// genome or adds a random item of the universe `[0, universe)` to it.
///
/// Removing from an empty genome and adding an item that is already present
/// leave the genome unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SetMutation {
  universe: usize,
}

impl SetMutation {
  /// Creates a mutation drawing new items from `[0, universe)`.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::EmptyUniverse`] if `universe` is zero.
  pub fn new(universe: usize) -> Result<Self, ConfigError> {
    match universe {
      0 => Err(ConfigError::EmptyUniverse),
      _ => Ok(Self { universe }),
    }
  }

  /// Returns the universe size.
  pub fn universe(&self) -> usize {
    self.universe
  }
}

impl Mutation<Genome> for SetMutation {
  fn mutate(&self, genome: &mut Genome, rng: &mut dyn RngCore) {
    if rng.gen_bool(0.5) {
      if genome.is_empty() {
        return;
      }
      let n = rng.gen_range(0..genome.len());
      if let Some(item) = genome.nth(n) {
        genome.remove(item);
      }
    } else {
      let item: Item = rng.gen_range(0..self.universe);
      genome.insert(item);
    }
  }
}
