//! **SetMOGA** is a Multi-Objective Genetic Algorithm for problems whose
//! solutions are sets of items, like choosing what to put into a knapsack.
//! It evolves a population with the (mu + lambda) scheme, ranks individuals
//! with [NSGA-II] and keeps every Pareto optimal individual it has ever met in
//! an archive.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Workflow
//!
//! A run is driven by an [`Optimizer`], namely [`MuPlusLambda`], which owns
//! the population and performs a typical loop:
//! 1. **Initialize** `mu` random solutions and **evaluate** them
//! 2. Create `lambda` offspring, each one by **crossover**, **mutation** or by
//!    copying a random parent
//! 3. **Evaluate** the offspring whose fitness is no longer valid
//! 4. **Select** `mu` survivors from parents and offspring combined
//! 5. **Update the archive** and **record statistics** of the generation
//!
//! Once the configured number of generations has passed, the optimizer returns
//! an [`Evolution`]: the last population, a [`Logbook`] of per-generation
//! statistics and the [`ParetoFront`] archive.
//!
//! # Operators
//!
//! Each step is performed by an **operator**, represented with a trait. Each
//! trait is implemented for closures, so a problem can be wired up without
//! declaring a single type:
//!
//! | Operator          | Trait                | Closure                                              | Set implementation |
//! |:------------------|:---------------------|:-----------------------------------------------------|:-------------------|
//! | Initialization    | [`Initialization`]   | `Fn(&mut dyn RngCore) -> S`                          | [`RandomSet`]      |
//! | Evaluation        | [`Evaluator`]        | `Fn(&S) -> [f32; N]` or `[Fn(&S) -> f32; N]`          | [`Knapsack`]       |
//! | Crossover         | [`Crossover`]        | `Fn(S, S, &mut dyn RngCore) -> (S, S)`               | [`SetCrossover`]   |
//! | Mutation          | [`Mutation`]         | `Fn(&mut S, &mut dyn RngCore)`                       | [`SetMutation`]    |
//! | Selection         | [`Selector`]         | `Fn(Vec<Individual<S, N>>, usize, &FitnessSpec<N>) -> Result<..>` | [`Nsga2`] |
//!
//! Operators that need randomness receive the run's random source, so a run
//! is fully reproduced from its [seed](crate::optimizer::Parameters::seed).
//!
//! Evaluators that may fail are wrapped into [`Fallible`]. A failed
//! evaluation aborts the run: there's no sensible fitness to guess. For
//! infeasible solutions return poor scores instead, as [`Knapsack`] does.
//!
//! # Parallelization
//!
//! Evaluation is the only step worth parallelizing. Call [`par_each()`] or
//! [`par_batch()`] on an evaluator to have it applied in parallel to each
//! individual or to batches of individuals. Both the evaluator and the
//! solution must be `Sync + Send`. Results don't depend on the strategy.
//!
//! For simple evaluators, the overhead introduced by parallelization usually
//! only decreases performance. Benchmark, if in doubt.
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: the start and the end of a run
//! at `info` level, each generation at `debug` level and selection details at
//! `trace` level. Install any logger to see them.
//!
//! # Example
//!
//! A knapsack of 20 random articles. Weight is minimized and value is
//! maximized.
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use setmoga::{
//!   crossover::SetCrossover,
//!   initialization::RandomSet,
//!   knapsack::{Knapsack, Limits},
//!   mutation::SetMutation,
//!   operator::ParEach,
//!   optimizer::{MuPlusLambda, Optimizer, Parameters},
//!   score::Objective,
//!   selection::Nsga2,
//! };
//!
//! let knapsack =
//!   Knapsack::random(20, Limits::default(), &mut StdRng::seed_from_u64(64))?;
//! let evolution = MuPlusLambda::builder()
//!   .parameters(Parameters::builder().generations(20).seed(7).build())
//!   .objectives([Objective::Minimize, Objective::Maximize])
//!   // genomes of 5 distinct articles
//!   .initializer(RandomSet::new(20, 5)?)
//!   // scored concurrently for each individual
//!   .evaluator(knapsack.par_each())
//!   .crossover(SetCrossover)
//!   .mutation(SetMutation::new(20)?)
//!   .selector(Nsga2)
//!   .build()
//!   .optimize()?;
//!
//! println!("{}", evolution.logbook);
//! for individual in &evolution.archive {
//!   println!("{} {:?}", individual.solution(), individual.fitness());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [NSGA-II]: https://sci2s.ugr.es/sites/default/files/files/Teaching/OtherPostGraduateCourses/Metaheuristicas/Deb_NSGAII.pdf
//! [`Optimizer`]: crate::optimizer::Optimizer
//! [`MuPlusLambda`]: crate::optimizer::MuPlusLambda
//! [`Parameters`]: crate::optimizer::Parameters
//! [`Evolution`]: crate::optimizer::Evolution
//! [`Logbook`]: crate::statistics::Logbook
//! [`ParetoFront`]: crate::archive::ParetoFront
//! [`Initialization`]: crate::initialization::Initialization
//! [`RandomSet`]: crate::initialization::RandomSet
//! [`Evaluator`]: crate::evaluation::Evaluator
//! [`Fallible`]: crate::evaluation::Fallible
//! [`Knapsack`]: crate::knapsack::Knapsack
//! [`Crossover`]: crate::crossover::Crossover
//! [`SetCrossover`]: crate::crossover::SetCrossover
//! [`Mutation`]: crate::mutation::Mutation
//! [`SetMutation`]: crate::mutation::SetMutation
//! [`Selector`]: crate::selection::Selector
//! [`Nsga2`]: crate::selection::Nsga2
//! [`par_each()`]: crate::operator::ParEach::par_each
//! [`par_batch()`]: crate::operator::ParBatch::par_batch

#![warn(missing_docs)]

pub mod archive;
pub mod crossover;
pub mod error;
pub mod evaluation;
mod execution;
pub mod genome;
pub mod individual;
pub mod initialization;
pub mod knapsack;
pub mod mutation;
pub mod operator;
pub mod optimizer;
pub mod score;
pub mod selection;
pub mod statistics;
