//! Fitness scores, objective directions and Pareto dominance.

use std::cmp::Ordering;

/// An alias for a fitness score.
pub type Score = f32;

/// An alias for an array of `N` values of `Score` type, one per objective.
pub type Scores<const N: usize> = [Score; N];

/// Direction in which an objective is optimized.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Objective {
  /// Lower scores are better.
  Minimize,
  /// Higher scores are better.
  Maximize,
}

impl Objective {
  /// Returns `-1.0` for [`Objective::Minimize`] and `1.0` for
  /// [`Objective::Maximize`]. Multiplying a score by its weight makes larger
  /// values better regardless of the direction.
  pub const fn weight(self) -> Score {
    match self {
      Objective::Minimize => -1.0,
      Objective::Maximize => 1.0,
    }
  }
}

/// Directions of all `N` objectives of a run. Shared by every individual.
///
/// # Examples
/// ```
/// # use setmoga::score::{FitnessSpec, Objective};
/// // minimize weight, maximize value
/// let spec = FitnessSpec::new([Objective::Minimize, Objective::Maximize]);
/// assert!(spec.dominates(&[1.0, 10.0], &[2.0, 10.0]));
/// assert!(!spec.dominates(&[1.0, 5.0], &[2.0, 10.0]));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FitnessSpec<const N: usize>([Objective; N]);

impl<const N: usize> FitnessSpec<N> {
  /// Creates a spec from objective directions.
  pub const fn new(objectives: [Objective; N]) -> Self {
    Self(objectives)
  }

  /// Returns objective directions.
  pub fn objectives(&self) -> &[Objective; N] {
    &self.0
  }

  /// Returns objective weights, see [`Objective::weight`].
  pub fn weights(&self) -> Scores<N> {
    self.0.map(Objective::weight)
  }

  /// Multiplies each score by its objective's weight, so that larger values
  /// are better in every dimension of the result.
  pub fn weigh(&self, scores: &Scores<N>) -> Scores<N> {
    std::array::from_fn(|i| scores[i] * self.0[i].weight())
  }

  /// Returns `Less` if `a` dominates `b`, `Greater` if `b` dominates `a`,
  /// otherwise `Equal`.
  pub fn dominance(&self, a: &Scores<N>, b: &Scores<N>) -> Ordering {
    self.weigh(a).dominance(&self.weigh(b))
  }

  /// Returns `true` if `a` dominates `b`.
  pub fn dominates(&self, a: &Scores<N>, b: &Scores<N>) -> bool {
    self.dominance(a, b) == Ordering::Less
  }
}

/// Describes pareto dominance for arrays of weighted `Score`s.
pub(crate) trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. `self` dominates `other` if no
  /// `self` value is smaller than the respective `other` value and at least
  /// one is greater.
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      // reversed, since greater weighted values are better
      match (ord, b.partial_cmp(a).unwrap_or(Ordering::Equal)) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}
