//! Parameter sweep: many trials per configuration, reduced to sample stats.

use crate::config::Config;
use crate::error::{Result, SimError};
use crate::evolution::run_trial;
use crate::fitness::FitnessFunction;
use crate::genetics::BreedingFunction;
use crate::stats::{aggregate, SampleStats};
use crate::termination::Termination;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};

/// One cell of the parameter grid
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Setup {
    pub male_chance: f64,
    pub fitness: FitnessFunction,
    pub finish: Termination,
    pub breeding: BreedingFunction,
}

/// Result of running every trial of one setup
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Converged(SampleStats),
    /// A trial hit the safety cap
    DidNotConverge { trial: usize, eggs: u64 },
    Failed { reason: String },
}

impl Outcome {
    /// Report cell text, e.g. `"143.2 std dev 120.9"`
    pub fn describe(&self) -> String {
        match self {
            Outcome::Converged(stats) => stats.to_string(),
            Outcome::DidNotConverge { eggs, .. } => format!("did not converge after {} eggs", eggs),
            Outcome::Failed { reason } => format!("failed: {}", reason),
        }
    }

    pub fn stats(&self) -> Option<&SampleStats> {
        match self {
            Outcome::Converged(stats) => Some(stats),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SweepEntry {
    #[serde(flatten)]
    pub setup: Setup,
    pub outcome: Outcome,
}

/// All outcomes of a sweep, in grid order
#[derive(Clone, Debug, Serialize)]
pub struct SweepReport {
    pub seed: u64,
    pub trials: usize,
    pub entries: Vec<SweepEntry>,
}

impl SweepReport {
    /// Nested mapping: male chance → fitness → finish → breeding → summary
    pub fn to_nested(&self) -> Value {
        let mut root = Map::new();
        for entry in &self.entries {
            let s = &entry.setup;
            let by_fitness = child(&mut root, &s.male_chance.to_string());
            let by_finish = child(by_fitness, s.fitness.as_str());
            let by_breeding = child(by_finish, s.finish.as_str());
            by_breeding.insert(
                s.breeding.as_str().to_string(),
                Value::String(entry.outcome.describe()),
            );
        }
        Value::Object(root)
    }

    /// Pretty JSON of the nested mapping
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_nested())?)
    }

    /// Setups that hit the safety cap or failed
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.stats().is_none())
            .count()
    }

    pub fn get(&self, setup: &Setup) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|e| &e.setup == setup)
            .map(|e| &e.outcome)
    }
}

fn child<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let value = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(inner) => inner,
        _ => unreachable!("value replaced by an object above"),
    }
}

/// Sweep driver
pub struct Sweep {
    config: Config,
    seed: u64,
}

impl Sweep {
    /// Create a sweep; the seed comes from config or a fresh random draw
    pub fn new(config: Config) -> Self {
        let seed = config
            .sweep
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        Self { config, seed }
    }

    /// Every setup in grid order (male chance outermost, breeding innermost)
    pub fn setups(&self) -> Vec<Setup> {
        let sweep = &self.config.sweep;
        let mut setups = Vec::with_capacity(sweep.combinations());
        for &male_chance in &sweep.male_chances {
            for &fitness in &sweep.fitness_functions {
                for &finish in &sweep.finish_conditions {
                    for &breeding in &sweep.breeding_functions {
                        setups.push(Setup {
                            male_chance,
                            fitness,
                            finish,
                            breeding,
                        });
                    }
                }
            }
        }
        setups
    }

    /// Run the whole grid. A setup that does not converge is recorded and
    /// the sweep moves on.
    pub fn run(&self) -> SweepReport {
        log::info!(
            "Sweep: {} configurations x {} trials (seed {})",
            self.config.sweep.combinations(),
            self.config.sweep.trials,
            self.seed
        );

        let entries = self
            .setups()
            .into_iter()
            .enumerate()
            .map(|(index, setup)| SweepEntry {
                setup,
                outcome: self.run_setup(index as u64, &setup),
            })
            .collect();

        SweepReport {
            seed: self.seed,
            trials: self.config.sweep.trials,
            entries,
        }
    }

    /// Run all trials of one setup and reduce them
    pub fn run_setup(&self, index: u64, setup: &Setup) -> Outcome {
        if self.config.logging.progress {
            log::info!(
                "Generating samples for {}, {}, {}, {}",
                setup.male_chance,
                setup.fitness,
                setup.finish,
                setup.breeding
            );
        }

        let trials = self.config.sweep.trials;
        let run = |trial| self.run_one(index, trial, setup);
        let eggs = match collect_trials(trials, self.config.sweep.parallel, run) {
            Ok(eggs) => eggs,
            Err((trial, SimError::DidNotConverge { context, eggs })) => {
                log::warn!(
                    "trial {} did not converge after {} eggs ({})",
                    trial,
                    eggs,
                    context
                );
                return Outcome::DidNotConverge { trial, eggs };
            }
            Err((_, e)) => return Outcome::Failed { reason: e.to_string() },
        };

        match aggregate(&eggs) {
            Ok(stats) => {
                log::debug!("{} / {}: {}", setup.finish, setup.breeding, stats.summary());
                Outcome::Converged(stats)
            }
            Err(e) => Outcome::Failed { reason: e.to_string() },
        }
    }

    fn run_one(&self, index: u64, trial: usize, setup: &Setup) -> Result<u64> {
        let mut rng = trial_rng(self.seed, index, trial);
        let breeder = setup.breeding.breeder(&self.config.breeding);
        run_trial(
            setup.male_chance,
            &setup.finish,
            &setup.fitness,
            &breeder,
            &mut rng,
            self.config.safety.max_eggs,
        )
    }
}

/// Egg counts of trials `0..trials`, stopping at the first failure.
///
/// Sequential runs report the lowest failing trial; parallel runs report
/// whichever failure is seen first and skip trials not yet started.
fn collect_trials<F>(
    trials: usize,
    parallel: bool,
    run: F,
) -> std::result::Result<Vec<u64>, (usize, SimError)>
where
    F: Fn(usize) -> Result<u64> + Sync,
{
    let tagged = |trial: usize| run(trial).map_err(|e| (trial, e));
    if parallel {
        (0..trials).into_par_iter().map(tagged).collect()
    } else {
        (0..trials).map(tagged).collect()
    }
}

/// Independent generator per (setup, trial), stable under any scheduling
pub fn trial_rng(seed: u64, setup_index: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(setup_index));
    rng.set_stream(trial as u64);
    rng
}
