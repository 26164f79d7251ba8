//! Fitness evaluators scoring an individual's genetic quality.

use crate::genetics::{Individual, Locus, LOCUS_COUNT, MAX_LOCUS_VALUE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Divisor applied to non-maxed loci in the maxed-locus score
const CONSOLATION_DIVISOR: f64 = 200.0;

/// Scores an individual; higher is better
pub trait FitnessEvaluator {
    fn score(&self, individual: &Individual) -> f64;

    /// Stable name used as a report key
    fn name(&self) -> &str;
}

/// Sum of all loci over the maximum possible sum. Range `[0, 1]`.
pub fn average_quality(individual: &Individual) -> f64 {
    individual.total() as f64 / (MAX_LOCUS_VALUE as f64 * LOCUS_COUNT as f64)
}

/// One sixth per maxed locus, plus `value / 200` sixths for every other locus.
///
/// Reaches exactly 1.0 only when all six loci are 31. Shared by the finish
/// conditions.
pub fn maxed_locus(individual: &Individual) -> f64 {
    let mut fitness = 0.0;
    for (_, value) in individual.loci() {
        if value == MAX_LOCUS_VALUE {
            fitness += 1.0;
        } else {
            fitness += value as f64 / CONSOLATION_DIVISOR;
        }
    }
    fitness / LOCUS_COUNT as f64
}

/// Experimental weighted score that penalizes speed. Never part of the
/// default sweep and not known to rank individuals sensibly.
pub fn linear_combo(individual: &Individual) -> f64 {
    let mut total = 0.0;
    for (locus, value) in individual.loci() {
        let weight = if locus == Locus::Speed { -1.0 } else { 0.2 };
        total += value as f64 * weight;
    }
    total / MAX_LOCUS_VALUE as f64
}

/// Named fitness functions selectable from configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessFunction {
    AverageQuality,
    MaxedLocus,
    LinearCombo,
}

impl FitnessFunction {
    /// Functions covered by the default sweep
    pub const DEFAULT_SWEEP: [FitnessFunction; 2] =
        [FitnessFunction::AverageQuality, FitnessFunction::MaxedLocus];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessFunction::AverageQuality => "average_quality",
            FitnessFunction::MaxedLocus => "maxed_locus",
            FitnessFunction::LinearCombo => "linear_combo",
        }
    }
}

impl FitnessEvaluator for FitnessFunction {
    fn score(&self, individual: &Individual) -> f64 {
        match self {
            FitnessFunction::AverageQuality => average_quality(individual),
            FitnessFunction::MaxedLocus => maxed_locus(individual),
            FitnessFunction::LinearCombo => linear_combo(individual),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FitnessFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FitnessFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "average_quality" => Ok(FitnessFunction::AverageQuality),
            "maxed_locus" => Ok(FitnessFunction::MaxedLocus),
            "linear_combo" => Ok(FitnessFunction::LinearCombo),
            other => Err(format!("unknown fitness function: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::Sex;

    fn ind(loci: [u8; 6]) -> Individual {
        Individual::new(Sex::Male, loci).unwrap()
    }

    #[test]
    fn test_average_quality_bounds() {
        assert_eq!(average_quality(&ind([31; 6])), 1.0);
        assert_eq!(average_quality(&ind([0; 6])), 0.0);
    }

    #[test]
    fn test_average_quality_linear() {
        let half = average_quality(&ind([31, 31, 31, 0, 0, 0]));
        assert!((half - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_maxed_locus_all_maxed() {
        assert_eq!(maxed_locus(&ind([31; 6])), 1.0);
        assert_eq!(maxed_locus(&ind([0; 6])), 0.0);
    }

    #[test]
    fn test_maxed_locus_consolation() {
        let score = maxed_locus(&ind([30, 0, 0, 0, 0, 0]));
        assert!((score - 30.0 / 200.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_maxed_locus_monotone() {
        let mut loci = [20u8; 6];
        let mut previous = maxed_locus(&ind(loci));
        for i in 0..6 {
            loci[i] = 31;
            let current = maxed_locus(&ind(loci));
            assert!(current > previous, "step {} did not increase", i);
            previous = current;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_five_maxed_reaches_near_maxed_threshold() {
        assert!(maxed_locus(&ind([31, 31, 31, 31, 31, 0])) >= 5.0 / 6.0);
        assert!(maxed_locus(&ind([31, 31, 31, 31, 30, 30])) < 5.0 / 6.0);
    }

    #[test]
    fn test_linear_combo_penalizes_speed() {
        let slow = linear_combo(&ind([31, 31, 31, 31, 31, 0]));
        let fast = linear_combo(&ind([31, 31, 31, 31, 31, 31]));
        assert!(slow > fast);
    }

    #[test]
    fn test_names_round_trip() {
        for f in [
            FitnessFunction::AverageQuality,
            FitnessFunction::MaxedLocus,
            FitnessFunction::LinearCombo,
        ] {
            assert_eq!(f.as_str().parse::<FitnessFunction>().unwrap(), f);
        }
        assert!("nope".parse::<FitnessFunction>().is_err());
    }
}
