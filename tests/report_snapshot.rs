use icucast::io::report::write_run_report;
use icucast::{Population, PopulationConfig};

#[test]
fn flat_epidemic_report_is_byte_stable() {
    let cfg = PopulationConfig {
        size: 1000,
        initial_infected: 100,
        r0: 0.0,
        ic_admission_probability: 0.0,
        max_treatment_days: 5,
        ..Default::default()
    };

    let mut population = Population::new(cfg).expect("population config invalid");
    population.run(3);

    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_run_report(tmp.path(), "flat", &population).expect("write report");

    let csv = std::fs::read_to_string(&path).expect("read report");
    insta::assert_snapshot!(csv, @r###"
    day,infected,ic,susceptible,new_infected,new_ic
    0,100.000000,0.000000,900.000000,100.000000,0.000000
    1,100.000000,0.000000,900.000000,0.000000,0.000000
    2,100.000000,0.000000,900.000000,0.000000,0.000000
    3,100.000000,0.000000,900.000000,0.000000,0.000000
    "###);

    let meta = std::fs::read_to_string(tmp.path().join("flat.json")).expect("read metadata");
    assert!(meta.contains("\"size\": 1000.0"));
    assert!(meta.contains("\"days\": 4"));
}
