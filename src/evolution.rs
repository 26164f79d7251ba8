//! Seeding, selection and the single-trial hill climb.

use crate::error::{Result, SimError};
use crate::fitness::FitnessEvaluator;
use crate::genetics::{BreedingOperator, Individual, Sex};
use crate::random::UniformSource;
use crate::termination::FinishCondition;
use serde::Serialize;

/// Seeding never gives up before generating this many individuals
pub const MIN_SEED_LIMIT: u64 = 1_000;

/// Initial batches produced by the seeder
#[derive(Clone, Debug, Default)]
pub struct Population {
    pub males: Vec<Individual>,
    pub females: Vec<Individual>,
}

impl Population {
    pub fn len(&self) -> usize {
        self.males.len() + self.females.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generate random individuals until both sexes are present.
///
/// Overshoot is kept. Returns `None` if `limit` individuals were generated
/// without both sexes showing up.
pub fn seed_population<R: UniformSource + ?Sized>(
    male_chance: f64,
    source: &mut R,
    limit: Option<u64>,
) -> Option<Population> {
    let mut population = Population::default();
    let mut generated = 0u64;

    while population.males.is_empty() || population.females.is_empty() {
        if limit.is_some_and(|max| generated >= max) {
            return None;
        }
        let individual = Individual::random(source, male_chance);
        generated += 1;
        match individual.sex() {
            Sex::Male => population.males.push(individual),
            Sex::Female => population.females.push(individual),
        }
    }

    Some(population)
}

/// Fittest individual of a batch; ties go to the earliest one
pub fn select_fittest<'a, F: FitnessEvaluator + ?Sized>(
    batch: &'a [Individual],
    fitness: &F,
) -> Option<&'a Individual> {
    let mut best: Option<(&Individual, f64)> = None;
    for individual in batch {
        let score = fitness.score(individual);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((individual, score)),
        }
    }
    best.map(|(individual, _)| individual)
}

/// Outcome of one trial
#[derive(Clone, Debug, Serialize)]
pub struct TrialRecord {
    /// Breeding attempts until the finish condition held
    pub eggs: u64,
    /// Individuals generated by the seeder
    pub seeded: usize,
    pub best_male: Individual,
    pub best_female: Individual,
    /// Times the tracked male was replaced
    pub male_improvements: u64,
    /// Times the tracked female was replaced
    pub female_improvements: u64,
}

/// Run one trial and return only the egg count
pub fn run_trial<C, F, B>(
    male_chance: f64,
    finish: &C,
    fitness: &F,
    breeding: &B,
    source: &mut dyn UniformSource,
    max_eggs: Option<u64>,
) -> Result<u64>
where
    C: FinishCondition + ?Sized,
    F: FitnessEvaluator + ?Sized,
    B: BreedingOperator + ?Sized,
{
    run_trial_detailed(male_chance, finish, fitness, breeding, source, max_eggs)
        .map(|record| record.eggs)
}

/// Seed, select the best pair, then breed until `finish` holds.
///
/// An offspring replaces the tracked parent of its sex only when it scores
/// strictly higher. Reaching `max_eggs` yields `DidNotConverge`, as does
/// failing to seed both sexes within `max_eggs` (at least
/// [`MIN_SEED_LIMIT`]) individuals.
pub fn run_trial_detailed<C, F, B>(
    male_chance: f64,
    finish: &C,
    fitness: &F,
    breeding: &B,
    source: &mut dyn UniformSource,
    max_eggs: Option<u64>,
) -> Result<TrialRecord>
where
    C: FinishCondition + ?Sized,
    F: FitnessEvaluator + ?Sized,
    B: BreedingOperator + ?Sized,
{
    let context = || {
        format!(
            "male chance {}, {} / {} / {}",
            male_chance,
            fitness.name(),
            finish.name(),
            breeding.name()
        )
    };

    let seed_limit = max_eggs.map(|max| max.max(MIN_SEED_LIMIT));
    let population = seed_population(male_chance, source, seed_limit).ok_or_else(|| {
        SimError::DidNotConverge {
            context: context(),
            eggs: 0,
        }
    })?;

    // both batches are non-empty once seeding returns
    let (mut best_male, mut best_female) = match (
        select_fittest(&population.males, fitness),
        select_fittest(&population.females, fitness),
    ) {
        (Some(m), Some(f)) => (m.clone(), f.clone()),
        _ => {
            return Err(SimError::DidNotConverge {
                context: context(),
                eggs: 0,
            })
        }
    };
    let mut male_score = fitness.score(&best_male);
    let mut female_score = fitness.score(&best_female);

    let mut eggs = 0u64;
    let mut male_improvements = 0u64;
    let mut female_improvements = 0u64;

    while !finish.is_finished(&best_male, &best_female) {
        if max_eggs.is_some_and(|max| eggs >= max) {
            return Err(SimError::DidNotConverge {
                context: context(),
                eggs,
            });
        }

        let baby = breeding.breed(&best_male, &best_female, male_chance, source);
        eggs += 1;

        let score = fitness.score(&baby);
        match baby.sex() {
            Sex::Male if score > male_score => {
                log::trace!("egg {}: male {} ({:.4})", eggs, baby, score);
                best_male = baby;
                male_score = score;
                male_improvements += 1;
            }
            Sex::Female if score > female_score => {
                log::trace!("egg {}: female {} ({:.4})", eggs, baby, score);
                best_female = baby;
                female_score = score;
                female_improvements += 1;
            }
            _ => {}
        }
    }

    Ok(TrialRecord {
        eggs,
        seeded: population.len(),
        best_male,
        best_female,
        male_improvements,
        female_improvements,
    })
}
