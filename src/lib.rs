//! # EGGSIM
//!
//! Monte Carlo estimate of how many eggs it takes to breed a maxed-out
//! individual from a random starting population.
//!
//! ## Features
//!
//! - **Pluggable**: fitness functions, finish conditions and breeding
//!   operators are traits with named built-in strategies
//! - **Parallel**: trials of each configuration run across all cores via Rayon
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: every trial owns a seeded ChaCha generator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use eggsim::{Config, Sweep};
//!
//! let mut config = Config::default();
//! config.sweep.trials = 1_000;
//!
//! let report = Sweep::new(config).run();
//! println!("{}", report.to_json().unwrap());
//! ```
//!
//! ## Single trial
//!
//! ```rust
//! use eggsim::evolution::run_trial;
//! use eggsim::fitness::FitnessFunction;
//! use eggsim::genetics::{BreedingConfig, BreedingFunction};
//! use eggsim::termination::Termination;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let breeder = BreedingFunction::AdaptivePartialInheritance.breeder(&BreedingConfig::default());
//! let eggs = run_trial(
//!     0.502,
//!     &Termination::EitherNearMaxed,
//!     &FitnessFunction::MaxedLocus,
//!     &breeder,
//!     &mut rng,
//!     Some(1_000_000),
//! )
//! .unwrap();
//! println!("{} eggs", eggs);
//! ```

pub mod config;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genetics;
pub mod random;
pub mod stats;
pub mod sweep;
pub mod termination;

// Re-export main types
pub use config::Config;
pub use error::{Result, SimError};
pub use genetics::Individual;
pub use stats::{aggregate, SampleStats};
pub use sweep::{Sweep, SweepReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time one setup of the default grid
pub fn benchmark(trials: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.sweep.male_chances = vec![0.502];
    config.sweep.fitness_functions = vec![fitness::FitnessFunction::MaxedLocus];
    config.sweep.finish_conditions = vec![termination::Termination::EitherNearMaxed];
    config.sweep.breeding_functions = vec![genetics::BreedingFunction::AdaptivePartialInheritance];
    config.sweep.trials = trials.max(2);
    config.logging.progress = false;

    let sweep = Sweep::new(config);

    let start = Instant::now();
    let report = sweep.run();
    let elapsed = start.elapsed();

    let mean_eggs = report
        .entries
        .first()
        .and_then(|e| e.outcome.stats())
        .map(|s| s.mean)
        .unwrap_or(f64::NAN);

    BenchmarkResult {
        trials: report.trials,
        elapsed_secs: elapsed.as_secs_f64(),
        trials_per_second: report.trials as f64 / elapsed.as_secs_f64(),
        mean_eggs,
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub trials: usize,
    pub elapsed_secs: f64,
    pub trials_per_second: f64,
    pub mean_eggs: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Trials: {}", self.trials)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} trials/s", self.trials_per_second)?;
        writeln!(f, "Mean eggs: {:.2}", self.mean_eggs)?;
        Ok(())
    }
}
