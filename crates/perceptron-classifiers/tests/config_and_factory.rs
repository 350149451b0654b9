//! Integration tests for config types and the model factory.

use perceptron_classifiers::config::{AlgorithmType, ModelConfig};
use perceptron_classifiers::math::Array2;
use perceptron_classifiers::models::factory::{build_algorithm, build_model};

fn and_gate() -> (Array2<f64>, Vec<f64>) {
    let x = Array2::from_shape_vec((2, 4), vec![0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0])
        .expect("failed to create feature matrix");
    (x, vec![-1.0, -1.0, -1.0, 1.0])
}

// ---------------------------------------------------------------------------
// Config / AlgorithmType
// ---------------------------------------------------------------------------

#[test]
fn algorithm_type_default_is_criterion() {
    assert_eq!(AlgorithmType::default(), AlgorithmType::PerceptronCriterion);
}

#[test]
fn algorithm_type_from_str() {
    let mt: AlgorithmType = "relaxation".parse().unwrap();
    assert_eq!(mt, AlgorithmType::Relaxation { bias_value: 0.5 });

    let mt: AlgorithmType = "Perceptron_Criterion".parse().unwrap();
    assert_eq!(mt, AlgorithmType::PerceptronCriterion);

    let mt: AlgorithmType = "criterion".parse().unwrap();
    assert_eq!(mt, AlgorithmType::PerceptronCriterion);
}

#[test]
fn algorithm_type_from_str_unknown_errors() {
    let result: Result<AlgorithmType, _> = "adaline".parse();
    assert!(result.unwrap_err().contains("adaline"));
}

#[test]
fn model_config_default_values() {
    let cfg = ModelConfig::default();
    assert!((cfg.learning_rate - 0.25).abs() < 1e-12);
    assert_eq!(cfg.max_iter, 100);
    assert_eq!(cfg.weight_init_range, (-1.0, 1.0));
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.algorithm, AlgorithmType::PerceptronCriterion);
}

#[test]
fn model_config_builders() {
    let cfg = ModelConfig::new(1.5, 10, AlgorithmType::Relaxation { bias_value: 1.0 })
        .with_seed(3)
        .with_weight_init_range((-0.1, 0.1));
    assert_eq!(cfg.seed, Some(3));
    assert_eq!(cfg.weight_init_range, (-0.1, 0.1));
    assert_eq!(cfg.max_iter, 10);
}

#[test]
fn model_config_round_trips_json() {
    let cfg = ModelConfig::new(0.5, 250, AlgorithmType::Relaxation { bias_value: 0.75 }).with_seed(17);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("learning_rate"));
    assert!(json.contains("Relaxation"));

    let cfg2: ModelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}

#[test]
fn model_config_seed_is_optional_in_json() {
    let json = r#"{
        "learning_rate": 0.25,
        "max_iter": 100,
        "weight_init_range": [-1.0, 1.0],
        "algorithm": "PerceptronCriterion"
    }"#;
    let cfg: ModelConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg, ModelConfig::default());
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[test]
fn build_algorithm_matches_config() {
    let criterion = build_algorithm(&ModelConfig::default());
    assert_eq!(criterion.name(), "perceptron criterion");

    let relaxation = build_algorithm(&ModelConfig::new(
        0.25,
        100,
        AlgorithmType::Relaxation { bias_value: 0.5 },
    ));
    assert_eq!(relaxation.name(), "relaxation");
}

#[test]
fn factory_builds_and_predicts() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (x, y) = and_gate();

    for algorithm in [
        AlgorithmType::PerceptronCriterion,
        AlgorithmType::Relaxation { bias_value: 0.5 },
    ] {
        let params = ModelConfig::new(1.5, 1000, algorithm).with_seed(4);
        let mut model = build_model(params);
        assert_eq!(model.name(), "perceptron");

        let report = model.fit(&x, &y)?;
        assert!(report.converged);
        assert_eq!(model.predict(&x)?, y);
        assert_eq!(model.decision_function(&x)?.len(), x.ncols());
    }
    Ok(())
}

#[test]
fn seeded_models_are_reproducible() -> anyhow::Result<()> {
    let (x, y) = and_gate();
    let params = ModelConfig::default().with_seed(99);

    let mut a = build_model(params.clone());
    let mut b = build_model(params);
    a.fit(&x, &y)?;
    b.fit(&x, &y)?;

    assert_eq!(a.decision_function(&x)?, b.decision_function(&x)?);
    Ok(())
}
