use super::*;

#[test]
fn can_use_defaults() {
    let config = SolverConfig::default();

    assert_eq!(config.working_window, 480);
    assert_eq!(config.distance_weight, 0.1);
    assert_eq!(config.validate(), Ok(DistanceWeight::new(1, 10).unwrap()));
}

#[test]
fn can_build_config() {
    let config = SolverConfig::default()
        .with_working_window(600)
        .with_distance_weight(0.5)
        .with_max_time(Some(10.))
        .with_parallelism(Some(2));

    assert_eq!(config.working_window, 600);
    assert_eq!(config.max_time, Some(10.));
    assert_eq!(config.parallelism, Some(2));
    assert_eq!(config.validate(), Ok(DistanceWeight::new(1, 2).unwrap()));
}

parameterized_test! {can_detect_invalid_config, (config, expected_errors), {
    let errors = config.validate().err().unwrap_or_default();

    assert_eq!(errors.len(), expected_errors);
    assert!(errors.iter().all(|err| err.code == "E1009"));
}}

can_detect_invalid_config! {
    case01_valid: (SolverConfig::default(), 0),
    case02_negative_window: (SolverConfig::default().with_working_window(-1), 1),
    case03_negative_weight: (SolverConfig::default().with_distance_weight(-0.5), 1),
    case04_not_finite_weight: (SolverConfig::default().with_distance_weight(f64::NAN), 1),
    case05_zero_parallelism: (SolverConfig::default().with_parallelism(Some(0)), 1),
    case06_negative_time: (SolverConfig::default().with_max_time(Some(-1.)), 1),
    case07_many: (SolverConfig::default().with_working_window(-1).with_distance_weight(f64::INFINITY), 2),
}
