//! Configuration system for the breeding sweep.
//!
//! Supports YAML configuration files; defaults reproduce the standard
//! sweep of 54 configurations at 10,000 trials each.

use crate::error::{Result, SimError};
use crate::fitness::FitnessFunction;
use crate::genetics::{BreedingConfig, BreedingFunction};
use crate::termination::Termination;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub sweep: SweepConfig,
    #[serde(default)]
    pub breeding: BreedingConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameter grid and trial count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Probabilities that an individual is male
    pub male_chances: Vec<f64>,
    pub fitness_functions: Vec<FitnessFunction>,
    pub finish_conditions: Vec<Termination>,
    pub breeding_functions: Vec<BreedingFunction>,
    /// Independent trials per configuration
    pub trials: usize,
    /// Base seed; drawn at random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Spread trials across all CPU cores
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

/// Limits that keep a trial from running forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Maximum eggs per trial; `None` removes the cap
    pub max_eggs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log a line for every configuration as it starts
    pub progress: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            male_chances: vec![0.249, 0.502, 0.8814],
            fitness_functions: FitnessFunction::DEFAULT_SWEEP.to_vec(),
            finish_conditions: Termination::ALL.to_vec(),
            breeding_functions: BreedingFunction::DEFAULT_SWEEP.to_vec(),
            trials: 10_000,
            seed: None,
            parallel: true,
        }
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_eggs: Some(1_000_000),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            progress: true,
        }
    }
}

impl SweepConfig {
    /// Number of configurations in the grid
    pub fn combinations(&self) -> usize {
        self.male_chances.len()
            * self.fitness_functions.len()
            * self.finish_conditions.len()
            * self.breeding_functions.len()
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate().map_err(SimError::Config)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        let sweep = &self.sweep;
        if sweep.combinations() == 0 {
            return Err("sweep grid must have at least one entry per dimension".to_string());
        }
        // both sexes must be able to appear
        if let Some(p) = sweep.male_chances.iter().find(|p| !(**p > 0.0 && **p < 1.0)) {
            return Err(format!("male chance {} must be strictly between 0 and 1", p));
        }
        if sweep.trials < 2 {
            return Err("trials must be at least 2".to_string());
        }
        if self.safety.max_eggs == Some(0) {
            return Err("safety.max_eggs must be > 0".to_string());
        }
        self.breeding.mutation.validate()?;
        Ok(())
    }
}
