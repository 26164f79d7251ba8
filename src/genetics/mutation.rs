//! Independent-locus mutation: every locus is inherited, then drifts.

use super::breeding::BreedingOperator;
use super::individual::{Individual, Locus, LOCUS_COUNT, MAX_LOCUS_VALUE};
use super::sex::Sex;
use crate::random::UniformSource;
use serde::{Deserialize, Serialize};

/// Configuration for locus drift
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Draws below this split drift downward, above it upward
    pub downward_split: f64,
    /// Probability of one more step in the chosen direction
    pub step_chance: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            downward_split: 0.25,
            step_chance: 0.05,
        }
    }
}

impl MutationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.downward_split) {
            return Err("mutation.downward_split must be in [0, 1]".to_string());
        }
        // a step chance of 1 would never stop drifting
        if !(0.0..1.0).contains(&self.step_chance) {
            return Err("mutation.step_chance must be in [0, 1)".to_string());
        }
        Ok(())
    }
}

/// Each locus comes from a random parent and then takes a geometric number
/// of unit steps in a per-locus direction
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IndependentMutation {
    config: MutationConfig,
}

impl IndependentMutation {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }
}

impl BreedingOperator for IndependentMutation {
    fn breed(
        &self,
        male: &Individual,
        female: &Individual,
        male_chance: f64,
        source: &mut dyn UniformSource,
    ) -> Individual {
        let sex = Sex::roll(source, male_chance);

        let mut loci = [0u8; LOCUS_COUNT];
        for locus in Locus::ALL {
            let parent = if source.chance(0.5) { male } else { female };
            loci[locus.index()] = drift(parent.locus(locus), &self.config, source);
        }
        Individual::from_clamped(sex, loci)
    }

    fn name(&self) -> &str {
        "independent_mutation"
    }
}

/// Apply one locus worth of mutation. Clamping happens after all steps.
fn drift<R: UniformSource + ?Sized>(base: u8, config: &MutationConfig, source: &mut R) -> u8 {
    let direction = direction(source.next_uniform() - config.downward_split);

    let mut value = base as i32;
    while source.chance(config.step_chance) {
        value = value.saturating_add(direction);
    }
    value.clamp(0, MAX_LOCUS_VALUE as i32) as u8
}

/// Sign of the offset draw; exactly zero means no drift
fn direction(offset: f64) -> i32 {
    if offset > 0.0 {
        1
    } else if offset < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// sex draw followed by the same five draws for every locus
    fn script(sex: f64, per_locus: [f64; 5]) -> ScriptedSource {
        let mut values = vec![sex];
        for _ in 0..LOCUS_COUNT {
            values.extend_from_slice(&per_locus);
        }
        ScriptedSource::new(values)
    }

    #[test]
    fn test_stays_in_range_for_boundary_parents() {
        let low = Individual::new(Sex::Male, [0; 6]).unwrap();
        let high = Individual::new(Sex::Female, [31; 6]).unwrap();
        let mixed = Individual::new(Sex::Female, [0, 31, 0, 31, 0, 31]).unwrap();
        let op = IndependentMutation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for (male, female) in [(&low, &high), (&low, &mixed), (&low, &low)] {
            for _ in 0..5_000 {
                let baby = op.breed(male, female, 0.5, &mut rng);
                assert!(baby.loci().iter().all(|&(_, v)| v <= MAX_LOCUS_VALUE));
            }
        }
    }

    #[test]
    fn test_downward_drift_clamps_at_zero() {
        let male = Individual::new(Sex::Male, [1; 6]).unwrap();
        let female = Individual::new(Sex::Female, [20; 6]).unwrap();
        // coin male, direction down, two steps, stop
        let mut source = script(0.9, [0.1, 0.1, 0.01, 0.01, 0.9]);
        let baby = IndependentMutation::default().breed(&male, &female, 0.5, &mut source);

        assert_eq!(baby.sex(), Sex::Female);
        assert_eq!(baby.loci().map(|(_, v)| v), [0; 6]);
        assert_eq!(source.draws(), 31);
    }

    #[test]
    fn test_upward_drift_clamps_at_max() {
        let male = Individual::new(Sex::Male, [5; 6]).unwrap();
        let female = Individual::new(Sex::Female, [30; 6]).unwrap();
        // coin female, direction up, two steps, stop
        let mut source = script(0.1, [0.9, 0.5, 0.01, 0.01, 0.9]);
        let baby = IndependentMutation::default().breed(&male, &female, 0.5, &mut source);

        assert_eq!(baby.sex(), Sex::Male);
        assert_eq!(baby.loci().map(|(_, v)| v), [31; 6]);
    }

    #[test]
    fn test_zero_direction_does_not_drift() {
        let male = Individual::new(Sex::Male, [17; 6]).unwrap();
        let female = Individual::new(Sex::Female, [3; 6]).unwrap();
        let mut source = script(0.1, [0.1, 0.25, 0.01, 0.01, 0.9]);
        let baby = IndependentMutation::default().breed(&male, &female, 0.5, &mut source);

        assert_eq!(baby.loci().map(|(_, v)| v), [17; 6]);
    }

    #[test]
    fn test_mostly_inherits_unchanged() {
        let male = Individual::new(Sex::Male, [10; 6]).unwrap();
        let female = Individual::new(Sex::Female, [10; 6]).unwrap();
        let op = IndependentMutation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let trials = 20_000;
        let mut up = 0usize;
        let mut down = 0usize;
        for _ in 0..trials {
            let baby = op.breed(&male, &female, 0.5, &mut rng);
            for (_, v) in baby.loci() {
                if v > 10 {
                    up += 1;
                } else if v < 10 {
                    down += 1;
                }
            }
        }

        let loci = (trials * LOCUS_COUNT) as f64;
        // about 5% of loci mutate, three times as often upward
        let changed = (up + down) as f64 / loci;
        assert!(changed > 0.04 && changed < 0.06, "changed = {}", changed);
        assert!(up > 2 * down);
    }

    #[test]
    fn test_config_validation() {
        assert!(MutationConfig::default().validate().is_ok());
        let runaway = MutationConfig {
            step_chance: 1.0,
            ..MutationConfig::default()
        };
        assert!(runaway.validate().is_err());
    }
}
