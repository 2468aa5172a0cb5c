//! The (mu + lambda) evolutionary loop.

use std::marker::PhantomData;

use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use typed_builder::TypedBuilder;

use super::{Evolution, Optimizer, Parameters};
use crate::{
  archive::ParetoFront,
  crossover::Crossover,
  error::Result,
  evaluation::executor::EvaluationExecutor,
  individual::Individual,
  initialization::Initialization,
  mutation::Mutation,
  score::{FitnessSpec, Objective},
  selection::Selector,
  statistics::{Logbook, Record},
};

/// (mu + lambda) optimizer.
///
/// Each generation `lambda` offspring are created from the `mu` parents, and
/// the next `mu` parents are selected from both parents and offspring. An
/// offspring is created by crossover with probability `cxpb`, by mutation
/// with probability `mutpb`, and is a plain copy of a parent otherwise.
/// Probabilities are checked against a single draw, so crossover takes
/// precedence when they sum to more than one. DEAP's `varOr` rejects such
/// settings, here they are accepted with a warning.
///
/// All randomness comes from one generator seeded with
/// [`Parameters::seed`]. Evaluators never touch it, so a run is reproduced
/// exactly regardless of the evaluation strategy.
///
/// # Examples
/// ```
/// # use setmoga::{
/// #   crossover::SetCrossover, initialization::RandomSet, knapsack::*,
/// #   mutation::SetMutation, optimizer::*, score::Objective, selection::Nsga2,
/// # };
/// # use rand::{rngs::StdRng, SeedableRng};
/// let knapsack =
///   Knapsack::random(20, Limits::default(), &mut StdRng::seed_from_u64(64))?;
/// let evolution = MuPlusLambda::builder()
///   .parameters(
///     Parameters::builder().mu(20).lambda(40).generations(10).build(),
///   )
///   .objectives([Objective::Minimize, Objective::Maximize])
///   .initializer(RandomSet::new(20, 5)?)
///   .evaluator(knapsack)
///   .crossover(SetCrossover)
///   .mutation(SetMutation::new(20)?)
///   .selector(Nsga2)
///   .build()
///   .optimize()?;
/// assert_eq!(evolution.population.len(), 20);
/// assert_eq!(evolution.logbook.len(), 11);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(TypedBuilder)]
pub struct MuPlusLambda<
  S,
  Ini: Initialization<S>,
  Evl: EvaluationExecutor<S, N, EvlExecStrat>,
  Crs: Crossover<S>,
  Mut: Mutation<S>,
  Sel: Selector<S, N>,
  EvlExecStrat,
  const N: usize,
> {
  #[builder(default)]
  parameters: Parameters,
  #[builder(setter(
    transform = |objectives: [Objective; N]| FitnessSpec::new(objectives),
    doc = "Objective directions, one per score returned by the evaluator.",
  ))]
  objectives: FitnessSpec<N>,
  initializer: Ini,
  evaluator: Evl,
  crossover: Crs,
  mutation: Mut,
  selector: Sel,
  #[builder(setter(skip), default)]
  _solution: PhantomData<S>,
  #[builder(setter(skip), default)]
  _evl_es: PhantomData<EvlExecStrat>,
}

impl<
    S: Clone + PartialEq,
    Ini: Initialization<S>,
    Evl: EvaluationExecutor<S, N, EvlExecStrat>,
    Crs: Crossover<S>,
    Mut: Mutation<S>,
    Sel: Selector<S, N>,
    EvlExecStrat,
    const N: usize,
  > MuPlusLambda<S, Ini, Evl, Crs, Mut, Sel, EvlExecStrat, N>
{
  /// Creates `lambda` offspring from a non-empty population.
  fn vary(
    &self,
    population: &[Individual<S, N>],
    rng: &mut StdRng,
  ) -> Vec<Individual<S, N>> {
    let Parameters {
      lambda,
      cxpb,
      mutpb,
      ..
    } = self.parameters;

    let mut offspring = Vec::with_capacity(lambda);
    for _ in 0..lambda {
      let u: f64 = rng.gen();
      let child = if u < cxpb {
        let a = population[rng.gen_range(0..population.len())].solution();
        let b = population[rng.gen_range(0..population.len())].solution();
        let (child, _) = self.crossover.cross(a.clone(), b.clone(), rng);
        Individual::new(child)
      } else if u < cxpb + mutpb {
        let mut child = population[rng.gen_range(0..population.len())].clone();
        self.mutation.mutate(child.solution_mut(), rng);
        child
      } else {
        population[rng.gen_range(0..population.len())].clone()
      };
      offspring.push(child);
    }
    offspring
  }
}

impl<
    S: Clone + PartialEq,
    Ini: Initialization<S>,
    Evl: EvaluationExecutor<S, N, EvlExecStrat>,
    Crs: Crossover<S>,
    Mut: Mutation<S>,
    Sel: Selector<S, N>,
    EvlExecStrat,
    const N: usize,
  > Optimizer<S, N>
  for MuPlusLambda<S, Ini, Evl, Crs, Mut, Sel, EvlExecStrat, N>
{
  fn optimize(self) -> Result<Evolution<S, N>> {
    let params = self.parameters;
    params.validate()?;
    if params.cxpb + params.mutpb > 1.0 {
      warn!(
        "cxpb + mutpb = {} exceeds 1, mutation gets only the remaining {}",
        params.cxpb + params.mutpb,
        1.0 - params.cxpb
      );
    }
    info!(
      "starting (mu + lambda) run: mu = {}, lambda = {}, generations = {}, \
       seed = {}",
      params.mu, params.lambda, params.generations, params.seed
    );

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut population: Vec<Individual<S, N>> = (0..params.mu)
      .map(|_| Individual::new(self.initializer.initialize(&mut rng)))
      .collect();
    let evaluations = self.evaluator.execute_evaluations(&mut population)?;

    let mut logbook = Logbook::new();
    logbook.record(Record::compile(0, evaluations, &population));
    let mut archive = ParetoFront::new(self.objectives);
    archive.update(&population)?;

    for generation in 1..=params.generations {
      let mut offspring = self.vary(&population, &mut rng);
      let evaluations = self.evaluator.execute_evaluations(&mut offspring)?;

      population.append(&mut offspring);
      population =
        self.selector.select(population, params.mu, &self.objectives)?;

      archive.update(&population)?;
      logbook.record(Record::compile(generation, evaluations, &population));
      debug!(
        "generation {generation}: {evaluations} evaluations, \
         archive of {} members",
        archive.len()
      );
    }

    info!(
      "finished after {} generations with {} archived individuals",
      params.generations,
      archive.len()
    );
    Ok(Evolution {
      population,
      logbook,
      archive,
    })
  }
}
