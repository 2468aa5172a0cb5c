//! Pareto front archive of the best individuals seen during a run.

use std::cmp::Ordering;

use log::trace;

use crate::{
  error::{Error, Result},
  individual::Individual,
  score::{FitnessSpec, Scores},
};

/// A set of mutually non-dominated individuals.
///
/// Individuals with equal scores but different solutions are all retained.
/// An individual equal to a member in both solution and scores is a twin and
/// is never inserted twice.
///
/// Members are stored as clones, so later changes to the population never
/// affect the archive.
#[derive(Clone, Debug)]
pub struct ParetoFront<S, const N: usize> {
  spec: FitnessSpec<N>,
  members: Vec<Individual<S, N>>,
}

impl<S, const N: usize> ParetoFront<S, N>
where
  S: Clone + PartialEq,
{
  /// Creates an empty archive.
  pub fn new(spec: FitnessSpec<N>) -> Self {
    Self {
      spec,
      members: Vec::new(),
    }
  }

  /// Offers each candidate to the archive in order. A candidate is inserted
  /// unless a member dominates it or it is a twin of a member. Members
  /// dominated by an inserted candidate are removed.
  ///
  /// Returns the number of inserted candidates.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Unevaluated`] if any candidate has invalid fitness.
  /// The archive is left untouched in that case.
  pub fn update(&mut self, candidates: &[Individual<S, N>]) -> Result<usize> {
    let scores = candidates
      .iter()
      .enumerate()
      .map(|(index, ind)| {
        ind.fitness().copied().ok_or(Error::Unevaluated { index })
      })
      .collect::<Result<Vec<_>>>()?;

    let mut inserted = 0;
    for (candidate, scores) in candidates.iter().zip(&scores) {
      if self.offer(candidate, scores) {
        inserted += 1;
      }
    }
    trace!(
      "{inserted} of {} candidates entered the archive of {} members",
      candidates.len(),
      self.members.len()
    );
    Ok(inserted)
  }

  fn offer(
    &mut self,
    candidate: &Individual<S, N>,
    scores: &Scores<N>,
  ) -> bool {
    let mut dominated = Vec::new();
    for (idx, member) in self.members.iter().enumerate() {
      let Some(member_scores) = member.fitness() else {
        continue;
      };
      match self.spec.dominance(member_scores, scores) {
        Ordering::Less => return false,
        Ordering::Greater => dominated.push(idx),
        Ordering::Equal => {
          if member_scores == scores
            && member.solution() == candidate.solution()
          {
            return false;
          }
        }
      }
    }

    let mut idx = 0;
    self.members.retain(|_| {
      let keep = dominated.binary_search(&idx).is_err();
      idx += 1;
      keep
    });
    self.members.push(candidate.clone());
    true
  }
}

impl<S, const N: usize> ParetoFront<S, N> {
  /// Returns the number of members.
  pub fn len(&self) -> usize {
    self.members.len()
  }

  /// Returns `true` if the archive has no members.
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  /// Returns the members in insertion order.
  pub fn members(&self) -> &[Individual<S, N>] {
    &self.members
  }

  /// Iterates over the members in insertion order.
  pub fn iter(&self) -> std::slice::Iter<'_, Individual<S, N>> {
    self.members.iter()
  }

  /// Moves the members out of the archive.
  pub fn into_members(self) -> Vec<Individual<S, N>> {
    self.members
  }

  /// Returns objective directions the archive compares individuals with.
  pub fn spec(&self) -> &FitnessSpec<N> {
    &self.spec
  }
}

impl<S, const N: usize> IntoIterator for ParetoFront<S, N> {
  type Item = Individual<S, N>;
  type IntoIter = std::vec::IntoIter<Individual<S, N>>;

  fn into_iter(self) -> Self::IntoIter {
    self.members.into_iter()
  }
}

impl<'a, S, const N: usize> IntoIterator for &'a ParetoFront<S, N> {
  type Item = &'a Individual<S, N>;
  type IntoIter = std::slice::Iter<'a, Individual<S, N>>;

  fn into_iter(self) -> Self::IntoIter {
    self.members.iter()
  }
}

#[cfg(test)]
mod tests {
  use itertools::Itertools;
  use proptest::prelude::*;

  use super::*;
  use crate::score::Objective;

  const SPEC: FitnessSpec<2> =
    FitnessSpec::new([Objective::Minimize, Objective::Maximize]);

  fn ind(id: u32, scores: Scores<2>) -> Individual<u32, 2> {
    Individual::evaluated(id, scores)
  }

  fn ids(front: &ParetoFront<u32, 2>) -> Vec<u32> {
    front.iter().map(|ind| *ind.solution()).collect()
  }

  #[test]
  fn test_empty_archive() {
    let mut front = ParetoFront::<u32, 2>::new(SPEC);
    assert!(front.is_empty());
    assert_eq!(front.update(&[]).unwrap(), 0);
    assert!(front.is_empty());
    assert_eq!(front.spec(), &SPEC);
  }

  #[test]
  fn test_dominated_candidates_are_rejected() {
    let mut front = ParetoFront::new(SPEC);
    assert_eq!(front.update(&[ind(0, [1.0, 10.0])]).unwrap(), 1);
    // heavier and less valuable
    assert_eq!(front.update(&[ind(1, [2.0, 5.0])]).unwrap(), 0);
    assert_eq!(ids(&front), [0]);
  }

  #[test]
  fn test_dominating_candidate_evicts_members() {
    let mut front = ParetoFront::new(SPEC);
    front
      .update(&[ind(0, [2.0, 5.0]), ind(1, [5.0, 8.0]), ind(2, [9.0, 20.0])])
      .unwrap();
    assert_eq!(ids(&front), [0, 1, 2]);

    assert_eq!(front.update(&[ind(3, [1.0, 9.0])]).unwrap(), 1);
    assert_eq!(ids(&front), [2, 3]);
  }

  #[test]
  fn test_equal_scores_are_retained() {
    let mut front = ParetoFront::new(SPEC);
    front
      .update(&[ind(0, [1.0, 1.0]), ind(1, [1.0, 1.0])])
      .unwrap();
    assert_eq!(ids(&front), [0, 1]);
  }

  #[test]
  fn test_twins_are_suppressed() {
    let mut front = ParetoFront::new(SPEC);
    let a = ind(0, [1.0, 1.0]);
    assert_eq!(front.update(&[a.clone(), a.clone()]).unwrap(), 1);
    assert_eq!(front.update(&[a]).unwrap(), 0);
    assert_eq!(front.len(), 1);
  }

  #[test]
  fn test_members_are_independent_clones() {
    let mut front = ParetoFront::new(SPEC);
    let mut population = vec![ind(7, [1.0, 1.0])];
    front.update(&population).unwrap();
    *population[0].solution_mut() = 8;
    assert_eq!(ids(&front), [7]);
    assert_eq!(front.members()[0].fitness(), Some(&[1.0, 1.0]));
  }

  #[test]
  fn test_unevaluated_candidates_leave_archive_untouched() {
    let mut front = ParetoFront::new(SPEC);
    front.update(&[ind(0, [5.0, 5.0])]).unwrap();
    let candidates = [ind(1, [1.0, 9.0]), Individual::new(2)];
    assert!(matches!(
      front.update(&candidates),
      Err(Error::Unevaluated { index: 1 })
    ));
    assert_eq!(ids(&front), [0]);
  }

  #[test]
  fn test_into_members() {
    let mut front = ParetoFront::new(SPEC);
    front.update(&[ind(0, [1.0, 1.0]), ind(1, [2.0, 2.0])]).unwrap();
    let solutions: Vec<u32> =
      front.into_iter().map(Individual::into_solution).collect();
    assert_eq!(solutions, [0, 1]);
  }

  proptest! {
    #[test]
    fn archive_stays_non_dominated(
      batches in prop::collection::vec(
        prop::collection::vec((0u32..6, 0u8..6, 0u8..6), 0..12),
        1..6,
      ),
    ) {
      let mut front = ParetoFront::new(SPEC);
      let mut offered = Vec::new();
      for batch in batches {
        let batch: Vec<_> = batch
          .into_iter()
          .map(|(id, w, v)| ind(id, [w.into(), v.into()]))
          .collect();
        front.update(&batch).unwrap();
        offered.extend(batch);

        for (a, b) in front.iter().tuple_combinations() {
          let (a, b) = (a.fitness().unwrap(), b.fitness().unwrap());
          prop_assert!(!SPEC.dominates(a, b) && !SPEC.dominates(b, a));
        }
        // f32 isn't hashable, compare bit patterns instead
        let all_unique = front
          .iter()
          .map(|ind| {
            let bits = ind.fitness().map(|f| f.map(f32::to_bits));
            (*ind.solution(), bits)
          })
          .all_unique();
        prop_assert!(all_unique);
        // nothing offered so far dominates a member
        for member in &front {
          let m = member.fitness().unwrap();
          prop_assert!(offered
            .iter()
            .all(|o| !SPEC.dominates(o.fitness().unwrap(), m)));
        }
      }
    }
  }
}
