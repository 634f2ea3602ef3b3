use apollonius::gasket::{circle_count, MAX_DEPTH};
use apollonius::io::{read_json, write_json};
use apollonius::{
    build_configuration, check_gasket, generate_gasket, generate_gaskets, ApolloniusError,
    Generation, Pnt2d, SolverConfig,
};
use approx::assert_relative_eq;
use proptest::prelude::*;

fn scalene() -> [Pnt2d; 3] {
    [
        Pnt2d::from_coords(1.0, 2.0),
        Pnt2d::from_coords(7.0, 3.0),
        Pnt2d::from_coords(4.0, 8.0),
    ]
}

#[test]
fn test_gasket_counts_for_every_set() {
    let config = SolverConfig::default();
    let configuration = build_configuration(scalene(), &config).unwrap();
    for depth in 0..=3 {
        let gaskets = generate_gaskets(&configuration, depth, &config).unwrap();
        assert_eq!(gaskets.len(), configuration.len());
        for gasket in &gaskets {
            assert_eq!(gasket.len(), circle_count(depth));
        }
    }
}

#[test]
fn test_gasket_circles_touch_their_parents() {
    let config = SolverConfig::default();
    let configuration = build_configuration(scalene(), &config).unwrap();
    for gasket in generate_gaskets(&configuration, 5, &config).unwrap() {
        let findings = check_gasket(&gasket, 1e-9);
        assert!(findings.is_empty(), "set {}: {:?}", gasket.solution_set(), findings);
    }
}

#[test]
fn test_gasket_starts_with_base_circles() {
    let config = SolverConfig::default();
    let configuration = build_configuration(scalene(), &config).unwrap();
    let set = &configuration.solution_sets()[0];
    let gasket = generate_gasket(set, 2, &config).unwrap();
    for (circle, base) in gasket.circles().iter().zip(set.base_circles()) {
        assert_eq!(circle.center(), base.center());
        assert_eq!(circle.generation(), Generation::Base);
        assert_relative_eq!(circle.radius(), base.radius(), max_relative = 1e-12);
    }
    assert!(gasket.circles()[5..]
        .iter()
        .all(|c| matches!(c.generation(), Generation::Gasket { stage } if stage >= 1)));
}

#[test]
fn test_gasket_depth_limit() {
    let config = SolverConfig::default();
    let configuration = build_configuration(scalene(), &config).unwrap();
    let set = &configuration.solution_sets()[0];
    let result = generate_gasket(set, MAX_DEPTH + 1, &config);
    assert!(matches!(result, Err(ApolloniusError::InvalidConfig(_))));
}

#[test]
fn test_gasket_json_round_trip() {
    let config = SolverConfig::default();
    let configuration = build_configuration(scalene(), &config).unwrap();
    let gasket = generate_gasket(&configuration.solution_sets()[0], 1, &config).unwrap();
    let path = std::env::temp_dir().join("apollonius_gasket.json");
    write_json(gasket.circles(), &path).expect("Failed to write JSON");
    let loaded = read_json(&path).expect("Failed to read JSON");
    assert_eq!(loaded, gasket.circles());
    assert!(loaded
        .iter()
        .any(|c| c.generation() == Generation::Gasket { stage: 1 }));
}

proptest! {
    #[test]
    fn prop_gasket_is_tangent(coords in prop::array::uniform6(-10.0..10.0f64)) {
        let points = [
            Pnt2d::from_coords(coords[0], coords[1]),
            Pnt2d::from_coords(coords[2], coords[3]),
            Pnt2d::from_coords(coords[4], coords[5]),
        ];
        let twice_area = points[0].cross(&points[1], &points[2]).abs();
        let longest = points[0]
            .distance(&points[1])
            .max(points[1].distance(&points[2]))
            .max(points[0].distance(&points[2]));
        prop_assume!(longest > 0.1 && twice_area > 0.05 * longest * longest);

        let config = SolverConfig::default();
        let configuration = build_configuration(points, &config);
        prop_assume!(configuration.is_ok());
        let configuration = configuration.unwrap();
        let set = configuration.solution_sets().iter().find(|s| s.is_external()).unwrap();

        let gasket = generate_gasket(set, 2, &config);
        prop_assume!(gasket.is_ok());
        let gasket = gasket.unwrap();
        prop_assert_eq!(gasket.len(), circle_count(2));
        let findings = check_gasket(&gasket, 1e-7 * (1.0 + longest));
        prop_assert!(findings.is_empty(), "{:?}", findings);
    }
}
