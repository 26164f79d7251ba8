//! Partial inheritance: a subset of loci is passed down, the rest are rerolled.

use super::breeding::BreedingOperator;
use super::individual::{roll_locus, Individual, Locus, LOCUS_COUNT, MAX_LOCUS_VALUE};
use super::sex::Sex;
use crate::random::UniformSource;
use serde::{Deserialize, Serialize};

/// Loci inherited without any boost
pub const BASE_INHERITED: usize = 3;
/// Loci inherited with the boost active
pub const BOOSTED_INHERITED: usize = 5;
/// Combined maxed loci above which the adaptive operator boosts
pub const ADAPTIVE_THRESHOLD: usize = 3;

/// What an inherited locus value of zero turns into
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroInheritance {
    /// Inherited zeros are treated as unassigned and rerolled
    #[default]
    Reroll,
    /// Inherited zeros are kept like any other value
    Keep,
}

/// Per-locus inheritance state before the offspring is assembled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Assigned(u8),
    Unassigned,
}

/// Inherit exactly `count` randomly chosen loci from the parents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartialInheritance {
    count: usize,
    zero_policy: ZeroInheritance,
}

impl PartialInheritance {
    /// `count` is capped at six
    pub fn new(count: usize, zero_policy: ZeroInheritance) -> Self {
        Self {
            count: count.min(LOCUS_COUNT),
            zero_policy,
        }
    }
}

impl BreedingOperator for PartialInheritance {
    fn breed(
        &self,
        male: &Individual,
        female: &Individual,
        male_chance: f64,
        source: &mut dyn UniformSource,
    ) -> Individual {
        inherit(male, female, male_chance, self.count, self.zero_policy, source)
    }

    fn name(&self) -> &str {
        match self.count {
            BASE_INHERITED => "partial_inheritance_3",
            BOOSTED_INHERITED => "partial_inheritance_5",
            _ => "partial_inheritance",
        }
    }
}

/// Boost inheritance only once the parents carry enough maxed loci
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdaptiveInheritance {
    zero_policy: ZeroInheritance,
}

impl AdaptiveInheritance {
    pub fn new(zero_policy: ZeroInheritance) -> Self {
        Self { zero_policy }
    }

    /// Inheritance count for a given pair of parents
    pub fn count_for(male: &Individual, female: &Individual) -> usize {
        if male.maxed_count() + female.maxed_count() > ADAPTIVE_THRESHOLD {
            BOOSTED_INHERITED
        } else {
            BASE_INHERITED
        }
    }
}

impl BreedingOperator for AdaptiveInheritance {
    fn breed(
        &self,
        male: &Individual,
        female: &Individual,
        male_chance: f64,
        source: &mut dyn UniformSource,
    ) -> Individual {
        let count = Self::count_for(male, female);
        inherit(male, female, male_chance, count, self.zero_policy, source)
    }

    fn name(&self) -> &str {
        "adaptive_partial_inheritance"
    }
}

/// Draw order: locus picks, one parent coin per pick, sex, then rerolls for
/// every locus left unassigned in canonical order.
fn inherit<R: UniformSource + ?Sized>(
    male: &Individual,
    female: &Individual,
    male_chance: f64,
    count: usize,
    zero_policy: ZeroInheritance,
    source: &mut R,
) -> Individual {
    let slots = assign_slots(male, female, count, source);
    let sex = Sex::roll(source, male_chance);

    let mut loci = [0u8; LOCUS_COUNT];
    for (value, slot) in loci.iter_mut().zip(slots) {
        *value = match slot {
            Slot::Assigned(v) if keeps(v, zero_policy) => v,
            _ => roll_locus(source),
        };
    }
    Individual::from_clamped(sex, loci)
}

fn keeps(value: u8, zero_policy: ZeroInheritance) -> bool {
    debug_assert!(value <= MAX_LOCUS_VALUE);
    value != 0 || zero_policy == ZeroInheritance::Keep
}

fn assign_slots<R: UniformSource + ?Sized>(
    male: &Individual,
    female: &Individual,
    count: usize,
    source: &mut R,
) -> [Slot; LOCUS_COUNT] {
    let mut slots = [Slot::Unassigned; LOCUS_COUNT];
    for locus in pick_loci(count, source) {
        let parent = if source.chance(0.5) { male } else { female };
        slots[locus.index()] = Slot::Assigned(parent.locus(locus));
    }
    slots
}

/// Choose `count` distinct loci without replacement, in draw order
fn pick_loci<R: UniformSource + ?Sized>(count: usize, source: &mut R) -> Vec<Locus> {
    let mut pool = Locus::ALL.to_vec();
    let count = count.min(pool.len());
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let index = source.index_below(pool.len());
        chosen.push(pool.remove(index));
    }
    chosen
}
