//! Survivor selection operators and utilities.
//!
//! The main selector is [`Nsga2`]. Its building blocks,
//! [`non_dominated_sort`] and [`crowding_distances`], are exposed as well.

use std::cmp::Ordering;

use itertools::Itertools;
use log::trace;

use crate::{
  error::{ConfigError, Error, Result},
  individual::Individual,
  score::{FitnessSpec, ParetoDominance, Scores},
};

/// An operator that picks `quota` survivors from a pool of evaluated
/// individuals.
///
/// A selector never evaluates individuals. Every individual in the pool must
/// have valid fitness.
///
/// **Note that you always can implement this trait instead of using closures.**
pub trait Selector<S, const N: usize> {
  /// Takes a pool of individuals and returns `quota` of them.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InsufficientPool`] if the pool is smaller than
  /// `quota` and [`Error::Unevaluated`] if an individual has invalid fitness.
  fn select(
    &self,
    pool: Vec<Individual<S, N>>,
    quota: usize,
    spec: &FitnessSpec<N>,
  ) -> Result<Vec<Individual<S, N>>>;
}

impl<S, const N: usize, F> Selector<S, N> for F
where
  F: Fn(
    Vec<Individual<S, N>>,
    usize,
    &FitnessSpec<N>,
  ) -> Result<Vec<Individual<S, N>>>,
{
  fn select(
    &self,
    pool: Vec<Individual<S, N>>,
    quota: usize,
    spec: &FitnessSpec<N>,
  ) -> Result<Vec<Individual<S, N>>> {
    self(pool, quota, spec)
  }
}

/// Index of an individual in the pool.
pub type SolutionIndex = usize;
/// Crowding distance of an individual. The greater - the more isolated.
pub type CrowdingDistance = f64;
/// Indices of individuals of a front, in ascending order.
pub type Front = Vec<SolutionIndex>;
// number of solution's dominators
type DominanceCounter = u32;
// dominated by each solution solutions' indices
type DominanceList = Vec<SolutionIndex>;

/// Partitions scores into fronts of non-dominated solutions.
///
/// The first front holds the solutions dominated by no one, the second one
/// holds those dominated only by the first front, and so on. Indices in each
/// front are listed in ascending order.
///
/// # Examples
/// ```
/// # use setmoga::{
/// #   score::{FitnessSpec, Objective},
/// #   selection::non_dominated_sort,
/// # };
/// let spec = FitnessSpec::new([Objective::Minimize; 2]);
/// let scores = [[1.0, 5.0], [3.0, 3.0], [5.0, 1.0], [4.0, 4.0], [6.0, 6.0]];
/// let fronts = non_dominated_sort(&scores, &spec);
/// assert_eq!(fronts, [vec![0, 1, 2], vec![3], vec![4]]);
/// ```
pub fn non_dominated_sort<const N: usize>(
  scores: &[Scores<N>],
  spec: &FitnessSpec<N>,
) -> Vec<Front> {
  let weighted: Vec<Scores<N>> =
    scores.iter().map(|sc| spec.weigh(sc)).collect();
  let mut dominance_lists: Vec<DominanceList> =
    vec![Vec::new(); weighted.len()];
  let mut dominance_counters: Vec<DominanceCounter> = vec![0; weighted.len()];
  let mut first_front: Front = Vec::new();

  // fill dominance lists and counters
  for p_idx in 0..weighted.len() {
    // for each unique pair of solutions `p`...
    let p_sc = &weighted[p_idx];
    // and `q`...
    for (i, q_sc) in weighted[p_idx + 1..].iter().enumerate() {
      let q_idx = p_idx + i + 1;
      match p_sc.dominance(q_sc) {
        // if solution `p` dominates solution `q`...
        Ordering::Less => {
          // put solution `q` into list of solutions dominated by `p`
          dominance_lists[p_idx].push(q_idx);
          // and increment counter of solutions dominating `q`
          dominance_counters[q_idx] += 1;
        }
        // if solution `q` dominates solution `p`...
        Ordering::Greater => {
          dominance_lists[q_idx].push(p_idx);
          dominance_counters[p_idx] += 1;
        }
        Ordering::Equal => {}
      }
    }
    // `p` has been compared with everyone by now
    if dominance_counters[p_idx] == 0 {
      first_front.push(p_idx);
    }
  }

  let mut fronts = Vec::new();
  let mut last_front = first_front;
  while !last_front.is_empty() {
    let mut next_front = Front::new();
    // for each solution `p` in last front...
    for &p_idx in &last_front {
      // for each solution `q` dominated by `p`...
      for &q_idx in &dominance_lists[p_idx] {
        dominance_counters[q_idx] -= 1;
        // if no more solutions dominate `q`, it belongs to the next front
        if dominance_counters[q_idx] == 0 {
          next_front.push(q_idx);
        }
      }
    }
    next_front.sort_unstable();
    fronts.push(std::mem::replace(&mut last_front, next_front));
  }

  debug_assert_eq!(
    fronts.iter().map(Vec::len).sum::<usize>(),
    scores.len(),
    "each solution must belong to exactly one front"
  );
  fronts
}

/// Calculates crowding distance of each solution of a front.
///
/// For each objective, solutions are sorted by their score. The boundary ones
/// get an infinite distance, each interior one adds the normalized distance
/// between its neighbours. An objective whose scores are all equal adds
/// nothing to interior solutions.
///
/// # Examples
/// ```
/// # use setmoga::selection::crowding_distances;
/// let distances = crowding_distances(&[[0.0, 4.0], [1.0, 3.0], [4.0, 0.0]]);
/// assert!(distances[0].is_infinite());
/// assert_eq!(distances[1], 2.0);
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distances<const N: usize>(
  scores: &[Scores<N>],
) -> Vec<CrowdingDistance> {
  let len = scores.len();
  if len <= 2 {
    return vec![CrowdingDistance::INFINITY; len];
  }

  let mut distances: Vec<CrowdingDistance> = vec![0.0; len];
  for o_idx in 0..N {
    let score = |idx: SolutionIndex| CrowdingDistance::from(scores[idx][o_idx]);
    // sort solutions by their scores of objective `o`
    let mut order: Vec<SolutionIndex> = (0..len).collect();
    order.sort_by(|&a, &b| {
      score(a).partial_cmp(&score(b)).unwrap_or(Ordering::Equal)
    });

    let (first_idx, last_idx) = (order[0], order[len - 1]);
    distances[first_idx] = CrowdingDistance::INFINITY;
    distances[last_idx] = CrowdingDistance::INFINITY;

    let range = score(last_idx) - score(first_idx);
    if range <= 0.0 {
      continue;
    }
    for (&prev, &cur, &next) in order.iter().tuple_windows() {
      distances[cur] += (score(next) - score(prev)) / range;
    }
  }
  distances
}

/// NSGA-II survivor selection.
///
/// Fronts of non-dominated individuals are taken whole while they fit into
/// the quota. The front that doesn't fit is cut, preferring individuals with
/// greater crowding distance. Ties keep the order of the pool, so the result
/// is reproducible.
///
/// Survivors are returned front by front. Within a whole front they keep the
/// order of the pool, the members of the cut front come last, sorted by
/// descending crowding distance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Nsga2;

impl<S, const N: usize> Selector<S, N> for Nsga2 {
  fn select(
    &self,
    pool: Vec<Individual<S, N>>,
    quota: usize,
    spec: &FitnessSpec<N>,
  ) -> Result<Vec<Individual<S, N>>> {
    if pool.len() < quota {
      return Err(
        ConfigError::InsufficientPool {
          pool: pool.len(),
          quota,
        }
        .into(),
      );
    }
    let scores = pool
      .iter()
      .enumerate()
      .map(|(index, ind)| {
        ind.fitness().copied().ok_or(Error::Unevaluated { index })
      })
      .collect::<Result<Vec<_>>>()?;

    let mut chosen: Vec<SolutionIndex> = Vec::with_capacity(quota);
    let fronts = non_dominated_sort(&scores, spec);
    for (front_idx, front) in fronts.into_iter().enumerate() {
      let remaining = quota - chosen.len();
      if remaining == 0 {
        break;
      }
      if front.len() <= remaining {
        chosen.extend(front);
        continue;
      }

      let front_scores: Vec<Scores<N>> =
        front.iter().map(|&idx| scores[idx]).collect();
      let mut crowded: Vec<(SolutionIndex, CrowdingDistance)> =
        front.into_iter().zip(crowding_distances(&front_scores)).collect();
      // stable, so equally crowded solutions keep their order
      crowded.sort_by(|a, b| b.1.total_cmp(&a.1));
      trace!(
        "front {front_idx} is cut to {remaining} of {} solutions",
        crowded.len()
      );
      chosen.extend(crowded.into_iter().take(remaining).map(|(idx, _)| idx));
      break;
    }

    debug_assert_eq!(chosen.len(), quota, "quota must be filled exactly");
    debug_assert!(
      chosen.iter().all_unique(),
      "chosen indices must be unique"
    );

    let mut some_pool: Vec<_> = pool.into_iter().map(Some).collect();
    Ok(
      chosen
        .into_iter()
        .filter_map(|idx| some_pool[idx].take())
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;
  use crate::score::Objective;

  const MIN_MIN: FitnessSpec<2> =
    FitnessSpec::new([Objective::Minimize, Objective::Minimize]);
  const MIN_MAX: FitnessSpec<2> =
    FitnessSpec::new([Objective::Minimize, Objective::Maximize]);

  fn pool(scores: &[Scores<2>]) -> Vec<Individual<usize, 2>> {
    scores
      .iter()
      .enumerate()
      .map(|(i, sc)| Individual::evaluated(i, *sc))
      .collect()
  }

  fn ids(individuals: &[Individual<usize, 2>]) -> Vec<usize> {
    individuals.iter().map(|ind| *ind.solution()).collect()
  }

  #[test]
  fn test_sort_empty_and_single() {
    assert!(non_dominated_sort::<2>(&[], &MIN_MIN).is_empty());
    assert_eq!(non_dominated_sort(&[[1.0, 2.0]], &MIN_MIN), [vec![0]]);
  }

  #[test]
  fn test_sort_clear_dominance() {
    let scores = [[3.0, 3.0], [1.0, 1.0], [2.0, 2.0]];
    assert_eq!(
      non_dominated_sort(&scores, &MIN_MIN),
      [vec![1], vec![2], vec![0]]
    );
  }

  #[test]
  fn test_sort_respects_directions() {
    // minimize weight, maximize value
    let scores = [[1.0, 5.0], [2.0, 9.0], [2.0, 4.0], [3.0, 9.0]];
    assert_eq!(
      non_dominated_sort(&scores, &MIN_MAX),
      [vec![0, 1], vec![2, 3]]
    );
  }

  #[test]
  fn test_sort_equal_scores_share_a_front() {
    let scores = [[2.0, 2.0]; 4];
    assert_eq!(non_dominated_sort(&scores, &MIN_MIN), [vec![0, 1, 2, 3]]);
  }

  #[test]
  fn test_crowding_small_fronts() {
    assert!(crowding_distances::<2>(&[]).is_empty());
    assert!(crowding_distances(&[[1.0, 2.0]])[0].is_infinite());
    assert!(crowding_distances(&[[1.0, 3.0], [3.0, 1.0]])
      .iter()
      .all(|d| d.is_infinite()));
  }

  #[test]
  fn test_crowding_evenly_spaced() {
    let scores = [[0.0, 4.0], [1.0, 3.0], [2.0, 2.0], [3.0, 1.0], [4.0, 0.0]];
    let distances = crowding_distances(&scores);
    assert!(distances[0].is_infinite());
    assert!(distances[4].is_infinite());
    for d in &distances[1..4] {
      assert!((d - 1.0).abs() < 1e-9, "expected 1.0, got {d}");
    }
  }

  #[test]
  fn test_crowding_zero_range_objective() {
    let distances = crowding_distances(&[[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]]);
    assert_eq!(distances[1], 1.0);
    assert!(distances[0].is_infinite());
    assert!(distances[2].is_infinite());
  }

  #[test]
  fn test_select_whole_fronts() {
    let fronts =
      pool(&[[4.0, 4.0], [1.0, 5.0], [5.0, 1.0], [6.0, 6.0], [3.0, 3.0]]);
    let selected = Nsga2.select(fronts, 4, &MIN_MIN).unwrap();
    // first front in pool order, then the second front
    assert_eq!(ids(&selected), [1, 2, 4, 0]);
  }

  #[test]
  fn test_select_cuts_front_by_crowding() {
    let pool = pool(&[
      [0.0, 4.0],
      [1.0, 3.0],
      [1.5, 2.5],
      [2.0, 2.0],
      [4.0, 0.0],
    ]);
    let selected = Nsga2.select(pool, 3, &MIN_MIN).unwrap();
    // boundaries first, then the most isolated interior solution
    assert_eq!(ids(&selected), [0, 4, 3]);
  }

  #[test]
  fn test_select_ties_keep_pool_order() {
    // boundaries come first, equally crowded interiors keep pool order
    let equal = pool(&[[1.0, 1.0]; 6]);
    let selected = Nsga2.select(equal, 3, &MIN_MIN).unwrap();
    assert_eq!(ids(&selected), [0, 5, 1]);

    let evenly_spaced =
      pool(&[[0.0, 4.0], [1.0, 3.0], [2.0, 2.0], [3.0, 1.0], [4.0, 0.0]]);
    let selected = Nsga2.select(evenly_spaced, 3, &MIN_MIN).unwrap();
    assert_eq!(ids(&selected), [0, 4, 1]);
  }

  #[test]
  fn test_select_zero_quota() {
    assert!(Nsga2.select(pool(&[[1.0, 1.0]]), 0, &MIN_MIN).unwrap().is_empty());
    assert!(Nsga2.select(pool(&[]), 0, &MIN_MIN).unwrap().is_empty());
  }

  #[test]
  fn test_select_insufficient_pool() {
    let err = Nsga2.select(pool(&[[1.0, 1.0]]), 2, &MIN_MIN).unwrap_err();
    assert!(matches!(
      err,
      Error::Config(ConfigError::InsufficientPool { pool: 1, quota: 2 })
    ));
    assert!(Nsga2.select(pool(&[]), 1, &MIN_MIN).is_err());
  }

  #[test]
  fn test_select_requires_valid_fitness() {
    let mut pool = pool(&[[1.0, 1.0], [2.0, 2.0]]);
    pool[1].invalidate();
    assert!(matches!(
      Nsga2.select(pool, 1, &MIN_MIN),
      Err(Error::Unevaluated { index: 1 })
    ));
  }

  #[test]
  fn test_selector_from_closure() {
    fn takes_selector<L: Selector<usize, 2>>(l: &L) -> Vec<usize> {
      let pool = pool(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
      ids(&l.select(pool, 2, &MIN_MIN).unwrap())
    }

    let last = |mut pool: Vec<Individual<usize, 2>>,
                quota: usize,
                _: &FitnessSpec<2>|
     -> Result<Vec<Individual<usize, 2>>> {
      Ok(pool.split_off(pool.len() - quota))
    };
    assert_eq!(takes_selector(&last), [1, 2]);
    assert_eq!(takes_selector(&Nsga2), [0, 1]);
  }

  fn scores_strategy() -> impl Strategy<Value = Vec<Scores<2>>> {
    // small integer grid, so that ties and duplicates are common
    prop::collection::vec((0u8..8, 0u8..8), 1..40)
      .prop_map(|v| v.into_iter().map(|(a, b)| [a.into(), b.into()]).collect())
  }

  proptest! {
    #[test]
    fn first_front_is_mutually_non_dominated(scores in scores_strategy()) {
      let fronts = non_dominated_sort(&scores, &MIN_MAX);
      for (&a, &b) in fronts[0].iter().tuple_combinations() {
        prop_assert!(!MIN_MAX.dominates(&scores[a], &scores[b]));
        prop_assert!(!MIN_MAX.dominates(&scores[b], &scores[a]));
      }
      // each later front is dominated by the preceding one
      for (prev, next) in fronts.iter().tuple_windows() {
        for &q in next {
          prop_assert!(prev
            .iter()
            .any(|&p| MIN_MAX.dominates(&scores[p], &scores[q])));
        }
      }
    }

    #[test]
    fn selection_prefers_better_fronts_and_isolation(
      scores in scores_strategy(),
      quota_ratio in 0.0f64..=1.0,
    ) {
      let quota = (scores.len() as f64 * quota_ratio) as usize;
      let selected = Nsga2.select(pool(&scores), quota, &MIN_MAX).unwrap();
      prop_assert_eq!(selected.len(), quota);

      let fronts = non_dominated_sort(&scores, &MIN_MAX);
      let rank_of =
        |idx: usize| fronts.iter().position(|f| f.contains(&idx)).unwrap();
      let chosen = ids(&selected);
      let rejected: Vec<usize> =
        (0..scores.len()).filter(|i| !chosen.contains(i)).collect();

      let worst_chosen = chosen.iter().map(|&i| rank_of(i)).max();
      let best_rejected = rejected.iter().map(|&i| rank_of(i)).min();
      if let (Some(worst), Some(best)) = (worst_chosen, best_rejected) {
        prop_assert!(worst <= best);
        if worst == best {
          // the front was cut, rejected ones are not more isolated
          let front = &fronts[worst];
          let front_scores: Vec<_> = front.iter().map(|&i| scores[i]).collect();
          let distances = crowding_distances(&front_scores);
          let distance_of = |idx: usize| {
            distances[front.iter().position(|&f| f == idx).unwrap()]
          };
          let min_chosen = chosen
            .iter()
            .filter(|&&i| rank_of(i) == worst)
            .map(|&i| distance_of(i))
            .fold(f64::INFINITY, f64::min);
          for &r in rejected.iter().filter(|&&i| rank_of(i) == worst) {
            prop_assert!(distance_of(r) <= min_chosen);
          }
        }
      }
    }
  }
}
