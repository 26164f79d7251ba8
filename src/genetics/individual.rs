//! Individual genotype: six bounded loci plus sex.

use super::sex::Sex;
use crate::error::{Result, SimError};
use crate::random::UniformSource;
use serde::Serialize;
use std::fmt;

/// Highest value a locus can take
pub const MAX_LOCUS_VALUE: u8 = 31;

/// Number of loci per individual
pub const LOCUS_COUNT: usize = 6;

/// One of the six independent trait loci
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Locus {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Locus {
    /// All loci in canonical order
    pub const ALL: [Locus; LOCUS_COUNT] = [
        Locus::Hp,
        Locus::Attack,
        Locus::Defense,
        Locus::SpecialAttack,
        Locus::SpecialDefense,
        Locus::Speed,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Locus::Hp => "hp",
            Locus::Attack => "attack",
            Locus::Defense => "defense",
            Locus::SpecialAttack => "special_attack",
            Locus::SpecialDefense => "special_defense",
            Locus::Speed => "speed",
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw a fresh uniform locus value in `[0, 31]`
#[inline]
pub fn roll_locus<R: UniformSource + ?Sized>(source: &mut R) -> u8 {
    let value = (source.next_uniform() * (MAX_LOCUS_VALUE as f64 + 1.0)) as u8;
    value.min(MAX_LOCUS_VALUE)
}

/// Immutable individual. Loci are validated on construction and never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Individual {
    sex: Sex,
    loci: [u8; LOCUS_COUNT],
}

impl Individual {
    /// Create an individual, rejecting any locus above 31
    pub fn new(sex: Sex, loci: [u8; LOCUS_COUNT]) -> Result<Self> {
        for locus in Locus::ALL {
            let value = loci[locus.index()];
            if value > MAX_LOCUS_VALUE {
                return Err(SimError::InvalidTraitValue { locus, value });
            }
        }
        Ok(Self { sex, loci })
    }

    /// Create from values already known to be in range (breeding output)
    pub(crate) fn from_clamped(sex: Sex, loci: [u8; LOCUS_COUNT]) -> Self {
        debug_assert!(loci.iter().all(|&v| v <= MAX_LOCUS_VALUE));
        Self { sex, loci }
    }

    /// Generate a random individual: sex first, then loci in canonical order
    pub fn random<R: UniformSource + ?Sized>(source: &mut R, male_chance: f64) -> Self {
        let sex = Sex::roll(source, male_chance);
        let mut loci = [0u8; LOCUS_COUNT];
        for value in loci.iter_mut() {
            *value = roll_locus(source);
        }
        Self::from_clamped(sex, loci)
    }

    #[inline]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[inline]
    pub fn locus(&self, locus: Locus) -> u8 {
        self.loci[locus.index()]
    }

    /// All `(locus, value)` pairs in canonical order
    pub fn loci(&self) -> [(Locus, u8); LOCUS_COUNT] {
        Locus::ALL.map(|locus| (locus, self.locus(locus)))
    }

    /// Number of loci at the maximum value
    pub fn maxed_count(&self) -> usize {
        self.loci.iter().filter(|&&v| v == MAX_LOCUS_VALUE).count()
    }

    /// Sum of all locus values
    pub fn total(&self) -> u32 {
        self.loci.iter().map(|&v| v as u32).sum()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sex.char())?;
        for (i, value) in self.loci.iter().enumerate() {
            let sep = if i == 0 { ' ' } else { '/' };
            write!(f, "{}{}", sep, value)?;
        }
        Ok(())
    }
}
