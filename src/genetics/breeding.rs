//! Breeding operators and their configuration-facing names.

use super::crossover::{
    AdaptiveInheritance, PartialInheritance, ZeroInheritance, BASE_INHERITED, BOOSTED_INHERITED,
};
use super::individual::Individual;
use super::mutation::{IndependentMutation, MutationConfig};
use crate::random::UniformSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Produces one offspring from a male and a female parent
pub trait BreedingOperator {
    fn breed(
        &self,
        male: &Individual,
        female: &Individual,
        male_chance: f64,
        source: &mut dyn UniformSource,
    ) -> Individual;

    /// Stable name used as a report key
    fn name(&self) -> &str;
}

/// Named breeding strategies selectable from configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreedingFunction {
    /// Three inherited loci, no boost
    #[serde(rename = "partial_inheritance_3")]
    PartialInheritance3,
    /// Five inherited loci, boost always on
    #[serde(rename = "partial_inheritance_5")]
    PartialInheritance5,
    /// Boost only when the parents carry more than three maxed loci
    #[serde(rename = "adaptive_partial_inheritance")]
    AdaptivePartialInheritance,
    /// Every locus inherited, then mutated
    #[serde(rename = "independent_mutation")]
    IndependentMutation,
}

impl BreedingFunction {
    pub const ALL: [BreedingFunction; 4] = [
        BreedingFunction::PartialInheritance3,
        BreedingFunction::PartialInheritance5,
        BreedingFunction::AdaptivePartialInheritance,
        BreedingFunction::IndependentMutation,
    ];

    /// Functions covered by the default sweep
    pub const DEFAULT_SWEEP: [BreedingFunction; 3] = [
        BreedingFunction::PartialInheritance5,
        BreedingFunction::AdaptivePartialInheritance,
        BreedingFunction::IndependentMutation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BreedingFunction::PartialInheritance3 => "partial_inheritance_3",
            BreedingFunction::PartialInheritance5 => "partial_inheritance_5",
            BreedingFunction::AdaptivePartialInheritance => "adaptive_partial_inheritance",
            BreedingFunction::IndependentMutation => "independent_mutation",
        }
    }

    /// Build the concrete operator for this function
    pub fn breeder(&self, config: &BreedingConfig) -> Breeder {
        let zero = config.zero_inheritance;
        match self {
            BreedingFunction::PartialInheritance3 => {
                Breeder::Partial(PartialInheritance::new(BASE_INHERITED, zero))
            }
            BreedingFunction::PartialInheritance5 => {
                Breeder::Partial(PartialInheritance::new(BOOSTED_INHERITED, zero))
            }
            BreedingFunction::AdaptivePartialInheritance => {
                Breeder::Adaptive(AdaptiveInheritance::new(zero))
            }
            BreedingFunction::IndependentMutation => {
                Breeder::Mutation(IndependentMutation::new(config.mutation))
            }
        }
    }
}

impl fmt::Display for BreedingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BreedingFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BreedingFunction::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| format!("unknown breeding function: {}", s))
    }
}

/// Breeding configuration shared by all operators
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedingConfig {
    /// Treatment of inherited zeros under partial inheritance
    #[serde(default)]
    pub zero_inheritance: ZeroInheritance,
    /// Drift parameters for independent mutation
    #[serde(default)]
    pub mutation: MutationConfig,
}

/// A concrete breeding operator
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Breeder {
    Partial(PartialInheritance),
    Adaptive(AdaptiveInheritance),
    Mutation(IndependentMutation),
}

impl BreedingOperator for Breeder {
    fn breed(
        &self,
        male: &Individual,
        female: &Individual,
        male_chance: f64,
        source: &mut dyn UniformSource,
    ) -> Individual {
        match self {
            Breeder::Partial(op) => op.breed(male, female, male_chance, source),
            Breeder::Adaptive(op) => op.breed(male, female, male_chance, source),
            Breeder::Mutation(op) => op.breed(male, female, male_chance, source),
        }
    }

    fn name(&self) -> &str {
        match self {
            Breeder::Partial(op) => op.name(),
            Breeder::Adaptive(op) => op.name(),
            Breeder::Mutation(op) => op.name(),
        }
    }
}
