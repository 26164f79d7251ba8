//! Integration tests for EGGSIM

use eggsim::evolution::{run_trial, run_trial_detailed};
use eggsim::fitness::FitnessFunction;
use eggsim::genetics::{
    BreedingConfig, BreedingFunction, BreedingOperator, Individual, Sex, ZeroInheritance,
};
use eggsim::random::ScriptedSource;
use eggsim::sweep::{Outcome, Setup, Sweep};
use eggsim::termination::{FinishCondition, Termination};
use eggsim::{aggregate, Config, SimError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct NeverFinished;

impl FinishCondition for NeverFinished {
    fn is_finished(&self, _: &Individual, _: &Individual) -> bool {
        false
    }

    fn name(&self) -> &str {
        "never"
    }
}

fn quick_config(trials: usize) -> Config {
    let mut config = Config::default();
    config.sweep.trials = trials;
    config.sweep.seed = Some(2024);
    config.logging.progress = false;
    config
}

#[test]
fn test_aggregate_known_values() {
    let stats = aggregate(&[1, 2, 3]).unwrap();
    assert_eq!(stats.mean, 2.0);
    assert_eq!(stats.std_dev, 1.0);

    assert!(matches!(
        aggregate(&[]),
        Err(SimError::InsufficientSamples { .. })
    ));
}

#[test]
fn test_pre_finished_seed_takes_zero_eggs() {
    // male with every locus at 31, then a female with every locus at 31
    let mut values = vec![0.4999];
    values.extend(std::iter::repeat(0.999).take(6));
    values.push(0.5001);
    values.extend(std::iter::repeat(0.999).take(6));
    let mut source = ScriptedSource::new(values);

    let breeder = BreedingFunction::IndependentMutation.breeder(&BreedingConfig::default());
    let eggs = run_trial(
        0.5,
        &Termination::EitherNearMaxed,
        &FitnessFunction::AverageQuality,
        &breeder,
        &mut source,
        Some(1_000),
    )
    .unwrap();

    assert_eq!(eggs, 0);
}

#[test]
fn test_never_finished_hits_cap_exactly() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for function in BreedingFunction::ALL {
        let breeder = function.breeder(&BreedingConfig::default());
        let err = run_trial(
            0.502,
            &NeverFinished,
            &FitnessFunction::MaxedLocus,
            &breeder,
            &mut rng,
            Some(1_000),
        )
        .unwrap_err();

        match err {
            SimError::DidNotConverge { eggs, .. } => assert_eq!(eggs, 1_000),
            other => panic!("{}: unexpected error {}", function, other),
        }
    }
}

#[test]
fn test_every_default_setup_converges_once() {
    let sweep = Sweep::new(quick_config(2));
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for setup in sweep.setups() {
        let breeder = setup.breeding.breeder(&BreedingConfig::default());
        let record = run_trial_detailed(
            setup.male_chance,
            &setup.finish,
            &setup.fitness,
            &breeder,
            &mut rng,
            Some(5_000_000),
        )
        .unwrap_or_else(|e| panic!("{:?}: {}", setup, e));

        assert!(setup.finish.is_finished(&record.best_male, &record.best_female));
        assert_eq!(record.best_male.sex(), Sex::Male);
        assert_eq!(record.best_female.sex(), Sex::Female);
    }
}

#[test]
fn test_boosted_inheritance_is_cheaper() {
    let mut config = quick_config(300);
    config.sweep.male_chances = vec![0.502];
    config.sweep.fitness_functions = vec![FitnessFunction::MaxedLocus];
    config.sweep.finish_conditions = vec![Termination::EitherNearMaxed];
    config.sweep.breeding_functions = vec![
        BreedingFunction::PartialInheritance3,
        BreedingFunction::PartialInheritance5,
    ];

    let report = Sweep::new(config).run();
    let mean = |breeding| {
        report
            .get(&Setup {
                male_chance: 0.502,
                fitness: FitnessFunction::MaxedLocus,
                finish: Termination::EitherNearMaxed,
                breeding,
            })
            .and_then(Outcome::stats)
            .map(|s| s.mean)
            .unwrap()
    };

    assert!(mean(BreedingFunction::PartialInheritance5) < mean(BreedingFunction::PartialInheritance3));
}

#[test]
fn test_zero_policies_both_converge() {
    for policy in [ZeroInheritance::Reroll, ZeroInheritance::Keep] {
        let mut config = quick_config(50);
        config.breeding.zero_inheritance = policy;
        config.sweep.male_chances = vec![0.249];
        config.sweep.finish_conditions = vec![Termination::EitherMaxed];
        config.sweep.breeding_functions = vec![BreedingFunction::AdaptivePartialInheritance];

        let report = Sweep::new(config).run();
        assert_eq!(report.failures(), 0, "{:?}", policy);
    }
}

#[test]
fn test_report_covers_full_grid() {
    let mut config = quick_config(2);
    // keep the full grid shape but stop early
    config.sweep.finish_conditions = vec![Termination::EitherNearMaxed];

    let report = Sweep::new(config).run();
    let nested = report.to_nested();

    for chance in ["0.249", "0.502", "0.8814"] {
        for fitness in ["average_quality", "maxed_locus"] {
            let cells = nested[chance][fitness]["either_near_maxed"].as_object().unwrap();
            assert_eq!(cells.len(), 3);
            for text in cells.values() {
                assert!(text.as_str().unwrap().contains("std dev"));
            }
        }
    }
}

#[test]
fn test_config_file_roundtrip() {
    let path = std::env::temp_dir().join("eggsim_test_config.yaml");
    let mut config = Config::default();
    config.sweep.trials = 123;
    config.breeding.zero_inheritance = ZeroInheritance::Keep;
    config.save(&path).expect("Failed to save config");

    let loaded = Config::from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.sweep.trials, 123);
    assert_eq!(loaded.breeding.zero_inheritance, ZeroInheritance::Keep);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_invalid_config_file_rejected() {
    let path = std::env::temp_dir().join("eggsim_test_bad_config.yaml");
    let mut config = Config::default();
    config.sweep.male_chances = vec![1.0];
    config.save(&path).unwrap();

    assert!(matches!(Config::from_file(&path), Err(SimError::Config(_))));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_custom_operator_plugs_in() {
    /// Always produces an all-31 offspring of the drawn sex
    struct Perfect;

    impl BreedingOperator for Perfect {
        fn breed(
            &self,
            _: &Individual,
            _: &Individual,
            male_chance: f64,
            source: &mut dyn eggsim::random::UniformSource,
        ) -> Individual {
            Individual::new(Sex::roll(source, male_chance), [31; 6]).unwrap()
        }

        fn name(&self) -> &str {
            "perfect"
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let record = run_trial_detailed(
        0.5,
        &Termination::BothMaxed,
        &FitnessFunction::MaxedLocus,
        &Perfect,
        &mut rng,
        Some(1_000),
    )
    .unwrap();

    assert_eq!(record.best_male.maxed_count(), 6);
    assert_eq!(record.best_female.maxed_count(), 6);
}
