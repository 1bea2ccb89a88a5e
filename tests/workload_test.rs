//! End-to-end tests: generate scripts and read them back the way the
//! benchmark harness does.

use workload_gen::parser::{split_phases, Statement};
use workload_gen::{generate_script, GeneratorConfig, Workload, WorkloadError};

fn script(mode: &str, params: &[&str], seed: u64) -> String {
    let workload = Workload::from_args(mode, params).unwrap();
    generate_script(&workload, &GeneratorConfig::new().with_seed(seed)).unwrap()
}

#[test]
fn test_no_vectors_structure() {
    let (n, q) = (25, 40);
    let workload = Workload::NoVectors { n, q };
    let text = script("no_vectors", &["25", "40"], 1);
    let phases = split_phases(&text).unwrap();

    assert_eq!(phases.shape(), workload.expected_shape());
    assert_eq!(text.lines().count(), 2 + n + 1 + q + 1);

    // Ids are the insertion index, no gaps
    let ids: Vec<u64> = phases
        .inserts
        .iter()
        .map(|s| match s {
            Statement::Insert { id, vector, typed: false, .. } => {
                assert_eq!(vector.len(), workload.dimension());
                *id
            }
            other => panic!("unexpected insert-phase statement: {:?}", other),
        })
        .collect();
    assert_eq!(ids, (0..n as u64).collect::<Vec<_>>());

    for stmt in &phases.search {
        match stmt {
            Statement::Lookup { id, .. } => assert!(*id < n as u64),
            other => panic!("unexpected search-phase statement: {:?}", other),
        }
    }
}

#[test]
fn test_simple_workload_structure() {
    let (dim, n, q) = (7, 12, 9);
    let workload = Workload::SimpleWorkload { dim, n, q };
    let text = script("simple_workload", &["7", "12", "9"], 2);
    let phases = split_phases(&text).unwrap();

    assert_eq!(phases.shape(), workload.expected_shape());
    assert_eq!(text.lines().count(), 3 + n + 1 + q + 1);
    assert!(phases
        .setup
        .iter()
        .any(|s| matches!(s, Statement::CreateTable { dim: Some(7), .. })));
    assert!(phases
        .setup
        .iter()
        .any(|s| matches!(s, Statement::CreateIndex { name, .. } if name == "x_idx")));

    for (i, stmt) in phases.inserts.iter().enumerate() {
        assert!(matches!(stmt, Statement::Insert { id, typed: true, .. } if *id == i as u64));
    }
    for stmt in &phases.search {
        assert!(matches!(stmt, Statement::NearestNeighbor { k: 1, .. }));
    }

    let vectors: Vec<&[f64]> = phases.vectors().collect();
    assert_eq!(vectors.len(), n + q);
    for v in vectors {
        assert_eq!(v.len(), workload.dimension());
        assert!(v.iter().all(|x| (0.0..1.0).contains(x)));
    }
}

#[test]
fn test_structure_is_stable_across_runs() {
    let a = split_phases(&script("simple_workload", &["16", "30", "10"], 5)).unwrap();
    let b = split_phases(&script("simple_workload", &["16", "30", "10"], 6)).unwrap();
    assert_eq!(a.shape(), b.shape());
    assert_ne!(a, b);

    let unseeded = Workload::NoVectors { n: 5, q: 5 };
    let c = generate_script(&unseeded, &GeneratorConfig::new()).unwrap();
    let d = generate_script(&unseeded, &GeneratorConfig::new()).unwrap();
    assert_eq!(c.lines().count(), d.lines().count());
}

#[test]
fn test_seed_reproduces_output() {
    assert_eq!(
        script("no_vectors", &["10", "10"], 42),
        script("no_vectors", &["10", "10"], 42)
    );
}

#[test]
fn test_boundaries() {
    let phases = split_phases(&script("no_vectors", &["0", "0"], 0)).unwrap();
    assert_eq!(phases.setup.len(), 2);
    assert!(phases.inserts.is_empty());
    assert!(phases.search.is_empty());

    let phases = split_phases(&script("simple_workload", &["3", "4", "0"], 0)).unwrap();
    assert_eq!(phases.inserts.len(), 4);
    assert!(phases.search.is_empty());
}

#[test]
fn test_lookup_ids_cover_small_table() {
    // n = 1 forces every lookup onto id 0
    let phases = split_phases(&script("no_vectors", &["1", "20"], 3)).unwrap();
    assert!(phases
        .search
        .iter()
        .all(|s| matches!(s, Statement::Lookup { id: 0, .. })));
}

#[test]
fn test_invalid_invocations() {
    let err = Workload::from_args("bogus_mode", &["1", "1"]).unwrap_err();
    assert!(matches!(err, WorkloadError::UnknownMode(_)));

    let err = Workload::from_args("no_vectors", &["abc", "1"]).unwrap_err();
    assert!(err.is_parameter_error());
    assert!(err.to_string().contains("abc"));

    let err = Workload::from_args("simple_workload", &["4", "2.5", "1"]).unwrap_err();
    assert!(err.is_parameter_error());
}
