//! Multi-objective knapsack problem.
//!
//! A solution is a [`Genome`] of article indices. It is scored by its total
//! weight, to be minimized, and its total value, to be maximized. A knapsack
//! holding too many articles or weighing too much gets the [`INFEASIBLE`]
//! scores, which every feasible one dominates.

use rand::{Rng, RngCore};

use crate::{
  error::{ConfigError, EvaluationError},
  evaluation::Evaluator,
  genome::Genome,
  score::{FitnessSpec, Objective, Score, Scores},
};

/// Scores of a knapsack that breaks [`Limits`]: huge weight, no value.
pub const INFEASIBLE: Scores<2> = [10_000.0, 0.0];

/// An article that can be put into a knapsack.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Article {
  /// Weight of the article.
  pub weight: u32,
  /// Value of the article.
  pub value: f32,
}

/// Feasibility thresholds of a knapsack.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Limits {
  /// Greatest number of articles.
  pub max_articles: usize,
  /// Greatest total weight.
  pub max_weight: u32,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      max_articles: 50,
      max_weight: 50,
    }
  }
}

/// A problem instance: the table of available articles and the limits.
///
/// # Examples
/// ```
/// # use setmoga::{evaluation::Evaluator, genome::Genome, knapsack::*};
/// let knapsack = Knapsack::new(
///   vec![
///     Article { weight: 3, value: 10.0 },
///     Article { weight: 4, value: 2.5 },
///   ],
///   Limits::default(),
/// )
/// .unwrap();
/// let genome = Genome::from_iter([0, 1]);
/// assert_eq!(knapsack.evaluate(&genome).unwrap(), [7.0, 12.5]);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Knapsack {
  articles: Vec<Article>,
  limits: Limits,
}

impl Knapsack {
  /// Creates a problem instance.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::EmptyUniverse`] if there are no articles.
  pub fn new(
    articles: Vec<Article>,
    limits: Limits,
  ) -> Result<Self, ConfigError> {
    if articles.is_empty() {
      return Err(ConfigError::EmptyUniverse);
    }
    Ok(Self { articles, limits })
  }

  /// Creates `count` articles with weights in `[1, 10]` and values in
  /// `[0, 100)`.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::EmptyUniverse`] if `count` is zero.
  pub fn random(
    count: usize,
    limits: Limits,
    rng: &mut dyn RngCore,
  ) -> Result<Self, ConfigError> {
    let articles = (0..count)
      .map(|_| Article {
        weight: rng.gen_range(1..=10),
        value: rng.gen_range(0.0..100.0),
      })
      .collect();
    Self::new(articles, limits)
  }

  /// Returns the article table.
  pub fn articles(&self) -> &[Article] {
    &self.articles
  }

  /// Returns the number of articles, which is the universe of genomes.
  pub fn universe(&self) -> usize {
    self.articles.len()
  }

  /// Returns feasibility thresholds.
  pub fn limits(&self) -> &Limits {
    &self.limits
  }

  /// Returns objective directions: minimize weight, maximize value.
  pub fn objectives() -> FitnessSpec<2> {
    FitnessSpec::new([Objective::Minimize, Objective::Maximize])
  }
}

impl Evaluator<Genome, 2> for Knapsack {
  fn evaluate(&self, genome: &Genome) -> Result<Scores<2>, EvaluationError> {
    let (mut weight, mut value) = (0u32, 0.0);
    for item in genome.iter() {
      let article =
        self.articles.get(item).ok_or(EvaluationError::UnknownItem {
          item,
          universe: self.universe(),
        })?;
      weight = weight.saturating_add(article.weight);
      value += article.value;
    }
    if genome.len() > self.limits.max_articles
      || weight > self.limits.max_weight
    {
      return Ok(INFEASIBLE);
    }
    Ok([weight as Score, value])
  }
}
