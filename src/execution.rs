/// Execution strategy markers. They let an executor pick the way an operator
/// is applied at compile time, without the user naming them.
pub(crate) mod strategy {
  /// Sequential execution strategy, i.e. no parallelization involved.
  pub enum SequentialExecutionStrategy {}

  /// Parallel execution strategy, applies an operator to **each** individual
  /// on rayon's thread pool.
  pub enum ParallelEachExecutionStrategy {}

  /// Parallel execution strategy, applies an operator to **batches** of
  /// individuals. The work is split equally between available threads.
  pub enum ParallelBatchExecutionStrategy {}
}
