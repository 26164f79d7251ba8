//! Finish conditions deciding when the best pair is good enough.

use crate::fitness::maxed_locus;
use crate::genetics::Individual;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maxed-locus score of an individual with five of six loci maxed
pub const NEAR_MAXED_SCORE: f64 = 5.0 / 6.0;

/// Decides whether a trial can stop
pub trait FinishCondition {
    fn is_finished(&self, male: &Individual, female: &Individual) -> bool;

    /// Stable name used as a report key
    fn name(&self) -> &str;
}

/// Named finish conditions selectable from configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Both parents fully maxed
    BothMaxed,
    /// Either parent fully maxed
    EitherMaxed,
    /// Either parent has at least five maxed loci
    EitherNearMaxed,
}

impl Termination {
    pub const ALL: [Termination; 3] = [
        Termination::BothMaxed,
        Termination::EitherMaxed,
        Termination::EitherNearMaxed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::BothMaxed => "both_maxed",
            Termination::EitherMaxed => "either_maxed",
            Termination::EitherNearMaxed => "either_near_maxed",
        }
    }
}

impl FinishCondition for Termination {
    fn is_finished(&self, male: &Individual, female: &Individual) -> bool {
        match self {
            Termination::BothMaxed => maxed_locus(male) == 1.0 && maxed_locus(female) == 1.0,
            Termination::EitherMaxed => maxed_locus(male) == 1.0 || maxed_locus(female) == 1.0,
            Termination::EitherNearMaxed => {
                maxed_locus(male) >= NEAR_MAXED_SCORE || maxed_locus(female) >= NEAR_MAXED_SCORE
            }
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Termination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Termination::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown finish condition: {}", s))
    }
}
