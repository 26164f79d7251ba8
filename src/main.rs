//! EGGSIM - CLI Entry Point
//!
//! Breeding cost simulator.

use clap::{Parser, Subcommand};
use eggsim::evolution::run_trial_detailed;
use eggsim::fitness::{FitnessEvaluator, FitnessFunction};
use eggsim::genetics::BreedingFunction;
use eggsim::sweep::trial_rng;
use eggsim::termination::Termination;
use eggsim::{benchmark, Config, Sweep};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "eggsim")]
#[command(version)]
#[command(about = "Estimate how many eggs it takes to breed a maxed-out individual")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full parameter sweep
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Trials per configuration (overrides config)
        #[arg(short, long)]
        trials: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run trials on a single thread
        #[arg(long)]
        sequential: bool,

        /// Quiet mode (warnings only)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a single trial and print its record
    Trial {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Probability that an offspring is male
        #[arg(short, long, default_value = "0.502")]
        male_chance: f64,

        #[arg(long, default_value = "maxed_locus")]
        fitness: FitnessFunction,

        #[arg(long, default_value = "either_near_maxed")]
        finish: Termination,

        #[arg(long, default_value = "adaptive_partial_inheritance")]
        breeding: BreedingFunction,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of trials
        #[arg(short, long, default_value = "2000")]
        trials: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            trials,
            seed,
            output,
            sequential,
            quiet,
        } => {
            let mut config = load_config(&config)?;
            init_logging(if quiet { "warn" } else { &config.logging.log_level });

            if let Some(trials) = trials {
                config.sweep.trials = trials;
            }
            if seed.is_some() {
                config.sweep.seed = seed;
            }
            if sequential {
                config.sweep.parallel = false;
            }
            config.validate()?;

            run_sweep(config, output)
        }

        Commands::Trial {
            config,
            male_chance,
            fitness,
            finish,
            breeding,
            seed,
        } => {
            let config = load_config(&config)?;
            init_logging(&config.logging.log_level);
            run_single(config, male_chance, fitness, finish, breeding, seed)
        }

        Commands::Benchmark { trials } => {
            init_logging("warn");
            run_benchmark(trials)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        eprintln!("Loading config from: {:?}", path);
        Ok(Config::from_file(path)?)
    } else {
        Ok(Config::default())
    }
}

fn run_sweep(config: Config, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let sweep = Sweep::new(config);

    let start = Instant::now();
    let report = sweep.run();
    let elapsed = start.elapsed();

    log::info!(
        "Sweep complete: {} configurations in {:.2}s (seed {})",
        report.entries.len(),
        elapsed.as_secs_f64(),
        report.seed
    );
    if report.failures() > 0 {
        log::warn!("{} configurations did not converge", report.failures());
    }

    let json = report.to_json()?;
    println!("{}", json);

    if let Some(path) = output {
        std::fs::write(&path, &json)?;
        log::info!("Report saved to: {:?}", path);
    }

    Ok(())
}

fn run_single(
    config: Config,
    male_chance: f64,
    fitness: FitnessFunction,
    finish: Termination,
    breeding: BreedingFunction,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(male_chance > 0.0 && male_chance < 1.0) {
        return Err(format!("male chance {} must be strictly between 0 and 1", male_chance).into());
    }

    let seed = seed
        .or(config.sweep.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = trial_rng(seed, 0, 0);
    let breeder = breeding.breeder(&config.breeding);

    let record = run_trial_detailed(
        male_chance,
        &finish,
        &fitness,
        &breeder,
        &mut rng,
        config.safety.max_eggs,
    )?;

    println!("=== Trial ===");
    println!("Seed: {}", seed);
    println!("Setup: {} / {} / {} / {}", male_chance, fitness, finish, breeding);
    println!("Seeded: {} individuals", record.seeded);
    println!("Eggs: {}", record.eggs);
    println!(
        "Best male:   {} ({:.4}), {} improvements",
        record.best_male,
        fitness.score(&record.best_male),
        record.male_improvements
    );
    println!(
        "Best female: {} ({:.4}), {} improvements",
        record.best_female,
        fitness.score(&record.best_female),
        record.female_improvements
    );

    Ok(())
}

fn run_benchmark(trials: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== EGGSIM Benchmark ===");
    println!("Trials: {}", trials);
    println!();

    let result = benchmark(trials);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
