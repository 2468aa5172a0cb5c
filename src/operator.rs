//! Wrappers that mark operators for parallel execution.

use std::marker::PhantomData;

/// A wrapper around an operator that marks it to be executed in parallel for
/// **each** individual.
pub struct ParEachOperator<S, O> {
  operator: O,
  _solution: PhantomData<S>,
}

impl<S, O> ParEachOperator<S, O> {
  pub(crate) fn operator(&self) -> &O {
    &self.operator
  }
}

/// A wrapper around an operator that marks it to be executed in parallel for
/// each **batch** of individuals.
pub struct ParBatchOperator<S, O> {
  operator: O,
  _solution: PhantomData<S>,
}

impl<S, O> ParBatchOperator<S, O> {
  pub(crate) fn operator(&self) -> &O {
    &self.operator
  }
}

/// Converts an operator into one executed in parallel for **each**
/// individual.
pub trait ParEach<S, const N: usize>: Sized {
  /// Creates a wrapper around given operator that marks it to be executed in
  /// parallel for **each** individual.
  ///
  /// **Parallelization is implemented with [rayon]. As a result, for simple
  /// functions, parallelization may only decrease performance because of
  /// additional overhead introduced. Benchmark if in doubt.**
  fn par_each(self) -> ParEachOperator<S, Self> {
    ParEachOperator {
      operator: self,
      _solution: PhantomData,
    }
  }
}

/// Converts an operator into one executed in parallel for each **batch** of
/// individuals.
pub trait ParBatch<S, const N: usize>: Sized {
  /// Creates a wrapper around given operator that marks it to be executed in
  /// parallel for each **batch** of individuals. The batch size is chosen so
  /// that the work is evenly distributed across all available threads.
  ///
  /// **Parallelization is implemented with [rayon]. As a result, for simple
  /// functions, parallelization may only decrease performance because of
  /// additional overhead introduced. Benchmark if in doubt.**
  fn par_batch(self) -> ParBatchOperator<S, Self> {
    ParBatchOperator {
      operator: self,
      _solution: PhantomData,
    }
  }
}
