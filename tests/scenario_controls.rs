use icucast::{DelayParams, Population, PopulationConfig};

#[test]
fn rejects_invalid_configs() {
    let invalid = [
        PopulationConfig {
            size: 0,
            ..Default::default()
        },
        PopulationConfig {
            size: 1000,
            initial_infected: 1001,
            ..Default::default()
        },
        PopulationConfig {
            max_treatment_days: 0,
            ..Default::default()
        },
        PopulationConfig {
            r0: -0.1,
            ..Default::default()
        },
        PopulationConfig {
            ic_admission_probability: 1.5,
            ..Default::default()
        },
        PopulationConfig {
            serial_interval: DelayParams { mean: 7.5, sd: 0.0 },
            ..Default::default()
        },
    ];
    for cfg in invalid {
        assert!(Population::new(cfg.clone()).is_err(), "accepted {:?}", cfg);
    }
}

#[test]
fn window_retention_keeps_series_in_lockstep_and_stepping_resumes() {
    let mut population = Population::new(PopulationConfig::default()).unwrap();
    population.run(30);

    let len = population.history().len();
    population.retain_history_window(len - 20..len - 5).unwrap();

    let history = population.history();
    assert_eq!(history.len(), 15);
    assert_eq!(history.infected().len(), 15);
    assert_eq!(history.ic().len(), 15);
    assert_eq!(history.susceptible().len(), 15);
    assert_eq!(history.new_infected().len(), 15);
    assert_eq!(history.new_ic().len(), 15);

    population.run(5);
    assert_eq!(population.history().len(), 20);
}

#[test]
fn rejects_empty_or_out_of_range_windows() {
    let mut population = Population::new(PopulationConfig::default()).unwrap();
    population.run(10);

    assert!(population.retain_history_window(5..5).is_err());
    assert!(population.retain_history_window(0..12).is_err());
}

#[test]
fn event_marks_record_the_current_history_length() {
    let mut population = Population::new(PopulationConfig::default()).unwrap();
    population.run(12);
    population.set_r0(0.9);
    population.mark_lockdown();
    population.run(8);
    population.set_r0(2.2);
    population.mark_openup();

    assert_eq!(population.events().lockdowns(), &[13]);
    assert_eq!(population.events().openups(), &[21]);
}

#[test]
fn discounting_recent_infections_damps_transmission() {
    let mut baseline = Population::new(PopulationConfig::default()).unwrap();
    let mut tested = Population::new(PopulationConfig::default()).unwrap();

    baseline.run(5);
    tested.run(5);
    for _ in 0..25 {
        tested.discount_new_infections(3, 0.5).unwrap();
        tested.step();
    }
    baseline.run(25);

    assert!(tested.infected() < baseline.infected());
}

#[test]
fn discounting_past_the_record_is_rejected() {
    let mut population = Population::new(PopulationConfig::default()).unwrap();
    assert!(population.discount_new_infections(3, 0.5).is_err());
}

#[test]
fn loads_partial_config_files_with_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("forecast.json");
    std::fs::write(&path, r#"{"size": 1000000, "r0": 1.4}"#).unwrap();

    let cfg = icucast::io::config::load_config(&path).unwrap();
    assert_eq!(cfg.size, 1_000_000);
    assert!((cfg.r0 - 1.4).abs() < 1e-12);
    assert_eq!(cfg.initial_infected, 100);
    assert_eq!(cfg.max_treatment_days, 30);
}
