//! Multi-objective knapsack solved with (mu + lambda) and NSGA-II.
//!
//! Run with `RUST_LOG=debug cargo run --example knapsack [seed]` to follow
//! the generations.

use rand::{rngs::StdRng, SeedableRng};
use setmoga::{
  crossover::SetCrossover,
  initialization::RandomSet,
  knapsack::{Knapsack, Limits},
  mutation::SetMutation,
  optimizer::{MuPlusLambda, Optimizer, Parameters},
  score::Objective,
  selection::Nsga2,
};

// number of articles to choose from
const NBR_ITEMS: usize = 20;
// number of articles in each initial knapsack
const IND_INIT_SIZE: usize = 5;
const MAX_ITEM: usize = 50;
const MAX_WEIGHT: u32 = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  let seed = match std::env::args().nth(1) {
    Some(arg) => arg.parse()?,
    None => 0,
  };
  let mut rng = StdRng::seed_from_u64(seed);

  // weights lie between 1 and 10, values between 0 and 100
  let knapsack = Knapsack::random(
    NBR_ITEMS,
    Limits {
      max_articles: MAX_ITEM,
      max_weight: MAX_WEIGHT,
    },
    &mut rng,
  )?;
  println!("articles:");
  for (idx, article) in knapsack.articles().iter().enumerate() {
    println!(
      "  {idx:>2}: weight {:>2}, value {:>6.2}",
      article.weight, article.value
    );
  }

  let parameters = Parameters::builder()
    .mu(50)
    .lambda(100)
    .cxpb(0.7)
    .mutpb(0.2)
    .generations(100)
    .seed(seed)
    .build();

  // builder with compile time verification from `typed-builder` crate
  let evolution = MuPlusLambda::builder()
    .parameters(parameters)
    // minimize weight, maximize value
    .objectives([Objective::Minimize, Objective::Maximize])
    .initializer(RandomSet::new(NBR_ITEMS, IND_INIT_SIZE)?)
    .evaluator(knapsack)
    .crossover(SetCrossover)
    .mutation(SetMutation::new(NBR_ITEMS)?)
    .selector(Nsga2)
    .build()
    .optimize()?;

  println!("\npopulation:");
  for individual in &evolution.population {
    println!("  {}", individual.solution());
  }

  println!("\nstatistics:\n{}", evolution.logbook);

  println!("\npareto front:");
  for individual in &evolution.archive {
    if let Some([weight, value]) = individual.fitness() {
      println!("  {weight:>4} {value:>8.2} {}", individual.solution());
    }
  }
  Ok(())
}
