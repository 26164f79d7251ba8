//! Sex determination for seeded and bred individuals.

use crate::random::UniformSource;
use serde::{Deserialize, Serialize};

/// Biological sex of an individual
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Draw a sex: male when the uniform draw falls below `male_chance`
    pub fn roll<R: UniformSource + ?Sized>(source: &mut R, male_chance: f64) -> Self {
        if source.chance(male_chance) {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    /// Get display character
    pub fn char(&self) -> char {
        match self {
            Sex::Male => '♂',
            Sex::Female => '♀',
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Sex::Male)
    }
}
