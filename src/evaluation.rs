//! Fitness evaluation operators and utilities.

use executor::EvaluationExecutor;
use rayon::prelude::*;

use crate::{
  error::{Error, EvaluationError, Result},
  execution::strategy::*,
  individual::Individual,
  operator::{ParBatch, ParBatchOperator, ParEach, ParEachOperator},
  score::{Score, Scores},
};

/// An operator that evaluates a solution's fitness, calculating an array of
/// its scores, one per objective. Whether an objective is minimized or
/// maximized is decided by the run's [`FitnessSpec`].
///
/// An evaluator must be deterministic and free of side effects visible to the
/// optimizer. Infeasible solutions should get poor scores, not errors: return
/// an [`EvaluationError`] only when a solution can't be scored at all, as it
/// aborts the run.
///
/// Can be applied in parallel to each individual or to batches of
/// individuals by converting it into a parallelized operator with
/// `par_each()` or `par_batch()` methods.
///
/// # Examples
/// ```
/// # use setmoga::{genome::Genome, operator::*};
/// // the number of items and the sum of their ids
/// let e = |g: &Genome| [g.len() as f32, g.iter().sum::<usize>() as f32];
/// // or use an array of closures that return a single score
/// let e = [
///   |g: &Genome| g.len() as f32,
///   |g: &Genome| g.iter().sum::<usize>() as f32,
/// ];
/// let e = e.par_batch();
/// ```
///
/// **Note that you always can implement this trait instead of using closures.**
///
/// [`FitnessSpec`]: crate::score::FitnessSpec
pub trait Evaluator<S, const N: usize> {
  /// Returns an array of fitness scores for given solution.
  fn evaluate(&self, solution: &S) -> Result<Scores<N>, EvaluationError>;
}

impl<S, const N: usize, F> Evaluator<S, N> for [F; N]
where
  F: Fn(&S) -> Score,
{
  fn evaluate(&self, solution: &S) -> Result<Scores<N>, EvaluationError> {
    Ok(self.each_ref().map(|f| f(solution)))
  }
}

impl<S, const N: usize, F> Evaluator<S, N> for F
where
  F: Fn(&S) -> Scores<N>,
{
  fn evaluate(&self, solution: &S) -> Result<Scores<N>, EvaluationError> {
    Ok(self(solution))
  }
}

/// Turns a closure that may fail into an [`Evaluator`].
///
/// # Examples
/// ```
/// # use setmoga::{evaluation::Fallible, genome::Genome};
/// let e = Fallible(|g: &Genome| match g.len() {
///   0 => Err("cannot score an empty selection"),
///   n => Ok([n as f32]),
/// });
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(pub F);

impl<S, const N: usize, F, E> Evaluator<S, N> for Fallible<F>
where
  F: Fn(&S) -> Result<Scores<N>, E>,
  E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
  fn evaluate(&self, solution: &S) -> Result<Scores<N>, EvaluationError> {
    (self.0)(solution).map_err(|e| EvaluationError::Other(e.into()))
  }
}

impl<S, const N: usize, E> ParEach<S, N> for E
where
  S: Sync + Send,
  E: Evaluator<S, N> + Sync,
{
}

impl<S, const N: usize, E> ParBatch<S, N> for E
where
  S: Sync + Send,
  E: Evaluator<S, N> + Sync,
{
}

/// Evaluates one individual, rejecting NaN scores.
fn evaluate_individual<S, const N: usize, E>(
  evaluator: &E,
  index: usize,
  individual: &mut Individual<S, N>,
) -> Result<()>
where
  E: Evaluator<S, N> + ?Sized,
{
  let scores = evaluator
    .evaluate(individual.solution())
    .and_then(|scores| match scores.iter().position(|s| s.is_nan()) {
      Some(objective) => Err(EvaluationError::NotANumber { objective }),
      None => Ok(scores),
    })
    .map_err(|source| Error::Evaluation { index, source })?;
  individual.set_fitness(scores);
  Ok(())
}

/// This private module prevents exposing the `Executor` to a user.
pub(crate) mod executor {
  use crate::{error::Result, individual::Individual};

  /// An internal evaluation executor.
  pub trait EvaluationExecutor<S, const N: usize, ExecutionStrategy> {
    /// Evaluates every individual with invalid fitness, optionally
    /// parallelizing operator's application. Returns the number of
    /// evaluations performed.
    fn execute_evaluations(
      &self,
      individuals: &mut [Individual<S, N>],
    ) -> Result<usize>;
  }
}

impl<S, const N: usize, E> EvaluationExecutor<S, N, SequentialExecutionStrategy>
  for E
where
  E: Evaluator<S, N>,
{
  fn execute_evaluations(
    &self,
    individuals: &mut [Individual<S, N>],
  ) -> Result<usize> {
    individuals
      .iter_mut()
      .enumerate()
      .filter(|(_, ind)| !ind.is_valid())
      .try_fold(0, |count, (index, ind)| -> Result<usize> {
        evaluate_individual(self, index, ind)?;
        Ok(count + 1)
      })
  }
}

impl<S, const N: usize, E>
  EvaluationExecutor<S, N, ParallelEachExecutionStrategy>
  for ParEachOperator<S, E>
where
  S: Sync + Send,
  E: Evaluator<S, N> + Sync,
{
  fn execute_evaluations(
    &self,
    individuals: &mut [Individual<S, N>],
  ) -> Result<usize> {
    individuals
      .par_iter_mut()
      .enumerate()
      .filter(|(_, ind)| !ind.is_valid())
      .map(|(index, ind)| {
        evaluate_individual(self.operator(), index, ind).map(|()| 1)
      })
      .try_reduce(|| 0, |a, b| Ok(a + b))
  }
}

impl<S, const N: usize, E>
  EvaluationExecutor<S, N, ParallelBatchExecutionStrategy>
  for ParBatchOperator<S, E>
where
  S: Sync + Send,
  E: Evaluator<S, N> + Sync,
{
  fn execute_evaluations(
    &self,
    individuals: &mut [Individual<S, N>],
  ) -> Result<usize> {
    let chunk_size = (individuals.len() / rayon::current_num_threads()).max(1);
    individuals
      .par_chunks_mut(chunk_size)
      .enumerate()
      .map(|(chunk_idx, chunk)| {
        chunk
          .iter_mut()
          .enumerate()
          .filter(|(_, ind)| !ind.is_valid())
          .try_fold(0, |count, (i, ind)| -> Result<usize> {
            evaluate_individual(
              self.operator(),
              chunk_idx * chunk_size + i,
              ind,
            )?;
            Ok(count + 1)
          })
      })
      .try_reduce(|| 0, |a, b| Ok(a + b))
  }
}
