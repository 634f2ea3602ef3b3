use apollonius::check::check_soddy_circle;
use apollonius::{
    build_configuration, compute_soddy_circles, enumerate_tangency_matrices,
    solve_solution_sets, GeometricDomainError, Generation, Pnt2d, SoddyKind, SolverConfig,
};
use approx::assert_relative_eq;
use proptest::prelude::*;

fn equilateral() -> [Pnt2d; 3] {
    [
        Pnt2d::from_coords(0.0, 0.0),
        Pnt2d::from_coords(1.0, 0.0),
        Pnt2d::from_coords(0.5, 3.0_f64.sqrt() / 2.0),
    ]
}

#[test]
fn test_equilateral_soddy_circles() {
    let (inner, outer) = compute_soddy_circles(&equilateral(), &[0.5; 3], 0).unwrap();

    let centroid = Pnt2d::from_coords(0.5, 3.0_f64.sqrt() / 6.0);
    assert!(inner.center().is_equal(&centroid, 1e-12));
    assert!(outer.center().is_equal(&centroid, 1e-12));

    // Circumradius of the unit triangle is 1/sqrt(3)
    let circumradius = 1.0 / 3.0_f64.sqrt();
    assert_relative_eq!(inner.radius(), circumradius - 0.5, epsilon = 1e-12);
    assert_relative_eq!(outer.signed_radius(), -(circumradius + 0.5), epsilon = 1e-12);
    assert_eq!(
        outer.generation(),
        Generation::Soddy(SoddyKind::Outer { enclosing: true })
    );
}

#[test]
fn test_right_triangle_soddy_circles() {
    let points = [
        Pnt2d::from_coords(0.0, 0.0),
        Pnt2d::from_coords(4.0, 0.0),
        Pnt2d::from_coords(0.0, 3.0),
    ];
    let (inner, outer) = compute_soddy_circles(&points, &[1.0, 3.0, 2.0], 0).unwrap();

    assert_relative_eq!(inner.radius(), 6.0 / 23.0, epsilon = 1e-12);
    assert_relative_eq!(inner.center().x(), 20.0 / 23.0, epsilon = 1e-12);
    assert_relative_eq!(inner.center().y(), 21.0 / 23.0, epsilon = 1e-12);

    assert_relative_eq!(outer.signed_radius(), -6.0, epsilon = 1e-9);
    assert_relative_eq!(outer.center().x(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(outer.center().y(), 3.0, epsilon = 1e-9);
}

#[test]
fn test_non_enclosing_outer_circle() {
    let points = [
        Pnt2d::from_coords(0.0, 0.0),
        Pnt2d::from_coords(4.0, 0.0),
        Pnt2d::from_coords(0.0, 3.0),
    ];
    let (_, outer) = compute_soddy_circles(&points, &[2.0, 6.0, 1.0], 1).unwrap();
    assert_relative_eq!(outer.signed_radius(), 1.5, epsilon = 1e-9);
    assert_eq!(
        outer.generation(),
        Generation::Soddy(SoddyKind::Outer { enclosing: false })
    );
    assert_eq!(outer.solution_set(), 1);
}

#[test]
fn test_straight_line_outer_circle_is_error() {
    // Equal radii of 2 on the 3-4-5 triangle make the outer denominator vanish
    let points = [
        Pnt2d::from_coords(0.0, 0.0),
        Pnt2d::from_coords(4.0, 0.0),
        Pnt2d::from_coords(0.0, 3.0),
    ];
    let result = compute_soddy_circles(&points, &[2.0; 3], 0);
    assert!(matches!(
        result,
        Err(GeometricDomainError::OuterRadiusUndefined { .. })
    ));
}

#[test]
fn test_non_positive_radius_is_error() {
    let result = compute_soddy_circles(&equilateral(), &[0.5, 0.0, 0.5], 0);
    assert_eq!(
        result,
        Err(GeometricDomainError::NonPositiveRadius { index: 1, radius: 0.0 })
    );
}

#[test]
fn test_pipeline_soddy_circles_touch_external_set() {
    let points = [
        Pnt2d::from_coords(1.0, 2.0),
        Pnt2d::from_coords(7.0, 3.0),
        Pnt2d::from_coords(4.0, 8.0),
    ];
    let configuration = build_configuration(points, &SolverConfig::default()).unwrap();
    let set = configuration
        .solution_sets()
        .iter()
        .find(|s| s.is_external())
        .unwrap();
    let (inner, outer) = configuration.soddy_circles(set.index()).unwrap();
    assert!(check_soddy_circle(set, inner, 1e-9).is_empty());
    assert!(check_soddy_circle(set, outer, 1e-9).is_empty());
}

proptest! {
    #[test]
    fn prop_inner_soddy_circle_touches_base_circles(
        coords in prop::array::uniform6(-10.0..10.0f64)
    ) {
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

        let sets = solve_solution_sets(
            &enumerate_tangency_matrices(),
            &points,
            &SolverConfig::default(),
        ).unwrap();
        let set = sets.iter().find(|s| s.is_external()).unwrap();

        let (inner, _) = compute_soddy_circles(set.centroids(), set.radii(), set.index()).unwrap();
        prop_assert!(inner.radius() > 0.0);
        let findings = check_soddy_circle(set, &inner, 1e-7 * (1.0 + longest));
        prop_assert!(findings.is_empty(), "{:?}", findings);
    }
}
