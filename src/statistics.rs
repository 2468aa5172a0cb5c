//! Per-generation fitness statistics.

use std::fmt;

use itertools::Itertools;

use crate::{
  individual::Individual,
  score::{Score, Scores},
};

/// Summary of a population's fitness at one generation. Each statistic holds
/// one value per objective.
#[derive(Clone, PartialEq, Debug)]
pub struct Record<const N: usize> {
  /// Generation number, `0` for the initial population.
  pub generation: usize,
  /// Number of evaluations performed in this generation.
  pub evaluations: usize,
  /// Mean score.
  pub avg: Scores<N>,
  /// Population standard deviation of scores.
  pub std: Scores<N>,
  /// Lowest score.
  pub min: Scores<N>,
  /// Highest score.
  pub max: Scores<N>,
}

impl<const N: usize> Record<N> {
  /// Summarizes fitness of evaluated individuals. Individuals with invalid
  /// fitness are skipped. If there are none left, every statistic is NaN.
  pub fn compile<S>(
    generation: usize,
    evaluations: usize,
    individuals: &[Individual<S, N>],
  ) -> Self {
    let scores: Vec<&Scores<N>> =
      individuals.iter().filter_map(Individual::fitness).collect();
    let count = scores.len() as f64;

    let mut avg = [Score::NAN; N];
    let mut std = [Score::NAN; N];
    let mut min = [Score::NAN; N];
    let mut max = [Score::NAN; N];
    for o_idx in 0..N {
      let column = || scores.iter().map(|sc| f64::from(sc[o_idx]));
      let Some((lo, hi)) = column().minmax_by(f64::total_cmp).into_option()
      else {
        continue;
      };
      let mean = column().sum::<f64>() / count;
      let variance = column().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
      (min[o_idx], max[o_idx]) = (lo as Score, hi as Score);
      avg[o_idx] = mean as Score;
      std[o_idx] = variance.sqrt() as Score;
    }

    Self {
      generation,
      evaluations,
      avg,
      std,
      min,
      max,
    }
  }
}

/// History of per-generation [`Record`]s.
///
/// Renders as a tab-separated table with a header row:
///
/// ```text
/// gen	nevals	avg	std	min	max
/// 0	50	[12.3, 201.5]	[3.1, 40.2]	[5, 120]	[20, 290]
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Logbook<const N: usize> {
  records: Vec<Record<N>>,
}

impl<const N: usize> Default for Logbook<N> {
  fn default() -> Self {
    Self {
      records: Vec::new(),
    }
  }
}

impl<const N: usize> Logbook<N> {
  /// Creates an empty logbook.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a record.
  pub fn record(&mut self, record: Record<N>) {
    self.records.push(record);
  }

  /// Returns all records, oldest first.
  pub fn records(&self) -> &[Record<N>] {
    &self.records
  }

  /// Iterates over records, oldest first.
  pub fn iter(&self) -> std::slice::Iter<'_, Record<N>> {
    self.records.iter()
  }

  /// Returns the number of records.
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// Returns `true` if nothing was recorded.
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Returns the latest record.
  pub fn last(&self) -> Option<&Record<N>> {
    self.records.last()
  }
}

impl<'a, const N: usize> IntoIterator for &'a Logbook<N> {
  type Item = &'a Record<N>;
  type IntoIter = std::slice::Iter<'a, Record<N>>;

  fn into_iter(self) -> Self::IntoIter {
    self.records.iter()
  }
}

fn fmt_scores<const N: usize>(scores: &Scores<N>) -> String {
  format!("[{}]", scores.iter().join(", "))
}

impl<const N: usize> fmt::Display for Logbook<N> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "gen\tnevals\tavg\tstd\tmin\tmax")?;
    for r in &self.records {
      write!(
        f,
        "\n{}\t{}\t{}\t{}\t{}\t{}",
        r.generation,
        r.evaluations,
        fmt_scores(&r.avg),
        fmt_scores(&r.std),
        fmt_scores(&r.min),
        fmt_scores(&r.max),
      )?;
    }
    Ok(())
  }
}
