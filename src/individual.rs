//! Solutions paired with their cached fitness.

use crate::score::Scores;

/// A solution and its cached fitness scores.
///
/// Cached scores are only kept while the solution is untouched: any mutable
/// access through [`Individual::solution_mut`] drops them, so an invalid
/// fitness can never be mistaken for a valid one.
#[derive(Clone, PartialEq, Debug)]
pub struct Individual<S, const N: usize> {
  solution: S,
  fitness: Option<Scores<N>>,
}

impl<S, const N: usize> Individual<S, N> {
  /// Wraps a solution that is yet to be evaluated.
  pub fn new(solution: S) -> Self {
    Self {
      solution,
      fitness: None,
    }
  }

  /// Returns a reference to the solution.
  pub fn solution(&self) -> &S {
    &self.solution
  }

  /// Returns a mutable reference to the solution, invalidating fitness.
  pub fn solution_mut(&mut self) -> &mut S {
    self.fitness = None;
    &mut self.solution
  }

  /// Unwraps the solution.
  pub fn into_solution(self) -> S {
    self.solution
  }

  /// Returns fitness scores if they are valid.
  pub fn fitness(&self) -> Option<&Scores<N>> {
    self.fitness.as_ref()
  }

  /// Returns `true` if fitness scores are valid.
  pub fn is_valid(&self) -> bool {
    self.fitness.is_some()
  }

  /// Marks fitness as invalid.
  pub fn invalidate(&mut self) {
    self.fitness = None;
  }

  pub(crate) fn set_fitness(&mut self, scores: Scores<N>) {
    self.fitness = Some(scores);
  }

  #[cfg(test)]
  pub(crate) fn evaluated(solution: S, scores: Scores<N>) -> Self {
    Self {
      solution,
      fitness: Some(scores),
    }
  }
}

impl<S, const N: usize> From<S> for Individual<S, N> {
  fn from(solution: S) -> Self {
    Self::new(solution)
  }
}
