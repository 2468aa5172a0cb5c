//! Crossover operators and utilities.

use rand::RngCore;

use crate::genome::Genome;

/// An operator that creates two offsprings from two parents.
///
/// Parents are passed by value: the optimizer hands over clones, so the
/// individuals they were cloned from are never altered. Offsprings always
/// come out with invalid fitness.
///
/// # Examples
/// ```
/// # use rand::RngCore;
/// # use setmoga::crossover::Crossover;
/// // swaps parents
/// let c = |a: u32, b: u32, _: &mut dyn RngCore| (b, a);
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Crossover<S> {
  /// Takes two parents and returns two offsprings.
  fn cross(&self, a: S, b: S, rng: &mut dyn RngCore) -> (S, S);
}

impl<S, F> Crossover<S> for F
where
  F: Fn(S, S, &mut dyn RngCore) -> (S, S),
{
  fn cross(&self, a: S, b: S, rng: &mut dyn RngCore) -> (S, S) {
    self(a, b, rng)
  }
}

/// Set crossover. The first offspring is the intersection of the parents,
/// the second one is their symmetric difference. See [`Genome::cross`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SetCrossover;

impl Crossover<Genome> for SetCrossover {
  fn cross(
    &self,
    a: Genome,
    b: Genome,
    _: &mut dyn RngCore,
  ) -> (Genome, Genome) {
    a.cross(b)
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  fn takes_crossover<S, C: Crossover<S>>(c: &C, a: S, b: S) -> (S, S) {
    c.cross(a, b, &mut StdRng::seed_from_u64(0))
  }

  #[test]
  fn test_crossover_from_closure() {
    let c = |a: u32, b: u32, _: &mut dyn RngCore| (a.min(b), a.max(b));
    assert_eq!(takes_crossover(&c, 7, 3), (3, 7));
  }

  #[test]
  fn test_set_crossover() {
    let a = Genome::from_iter([0, 1, 2, 5]);
    let b = Genome::from_iter([1, 2, 3]);
    let (common, unique) = takes_crossover(&SetCrossover, a.clone(), b.clone());
    assert_eq!(common, Genome::from_iter([1, 2]));
    assert_eq!(unique, Genome::from_iter([0, 3, 5]));
    // parents were cloned, the originals stay intact
    assert_eq!(a, Genome::from_iter([0, 1, 2, 5]));
    assert_eq!(b, Genome::from_iter([1, 2, 3]));
  }

  #[test]
  fn test_custom_crossover() {
    struct KeepParents;
    impl<S> Crossover<S> for KeepParents {
      fn cross(&self, a: S, b: S, _: &mut dyn RngCore) -> (S, S) {
        (a, b)
      }
    }
    assert_eq!(takes_crossover(&KeepParents, "a", "b"), ("a", "b"));
  }
}
