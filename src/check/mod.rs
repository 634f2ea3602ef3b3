//! Solution validity checking
//!
//! Verifies a solved configuration by direct substitution:
//! - Radii are strictly positive
//! - `M · r` reproduces the pairwise distances
//! - Every pair of base circles actually touches, externally or internally
//!   as the sign of its row demands
//! - Optionally, the Soddy circles touch all three base circles
//! - Every gasket circle touches the three circles it was fitted against

use crate::configuration::{Circle, SoddyKind, Generation};
use crate::gasket::Gasket;
use crate::tangency::{pairwise_distances, SolutionSet, ROW_PAIRS};

/// Problems found while checking a solution set
#[derive(Debug, Clone, PartialEq)]
pub enum TangencyFinding {
    /// Radius is zero, negative or not finite
    NonPositiveRadius {
        index: usize,
        radius: f64,
    },

    /// Row of `M · r - d` exceeds the tolerance
    ResidualTooLarge {
        row: usize,
        residual: f64,
    },

    /// Circles `first` and `second` do not touch the way their row says
    NotTangent {
        first: usize,
        second: usize,
        external: bool,
        gap: f64,
    },

    /// A Soddy circle misses one of the base circles
    SoddyNotTangent {
        base: usize,
        kind: SoddyKind,
        gap: f64,
    },

    /// Gasket circle `circle` misses its parent `parent`
    GasketNotTangent {
        circle: usize,
        parent: usize,
        gap: f64,
    },
}

impl std::fmt::Display for TangencyFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TangencyFinding::NonPositiveRadius { index, radius } => {
                write!(f, "Radius #{} is not positive: {}", index, radius)
            }
            TangencyFinding::ResidualTooLarge { row, residual } => {
                write!(f, "Row {} residual {:.2e} exceeds tolerance", row, residual)
            }
            TangencyFinding::NotTangent { first, second, external, gap } => {
                let how = if *external { "externally" } else { "internally" };
                write!(
                    f,
                    "Circles #{} and #{} are not {} tangent: gap = {:.2e}",
                    first, second, how, gap
                )
            }
            TangencyFinding::SoddyNotTangent { base, kind, gap } => {
                write!(
                    f,
                    "{:?} Soddy circle misses base circle #{}: gap = {:.2e}",
                    kind, base, gap
                )
            }
            TangencyFinding::GasketNotTangent { circle, parent, gap } => {
                write!(
                    f,
                    "Gasket circle #{} misses parent #{}: gap = {:.2e}",
                    circle, parent, gap
                )
            }
        }
    }
}

/// Check a solution set and return all findings; empty means valid
pub fn check_solution_set(set: &SolutionSet, tolerance: f64) -> Vec<TangencyFinding> {
    let mut findings = Vec::new();

    for (index, &radius) in set.radii().iter().enumerate() {
        if !radius.is_finite() || radius <= 0.0 {
            findings.push(TangencyFinding::NonPositiveRadius { index, radius });
        }
    }

    let distances = pairwise_distances(set.centroids());
    let residual = set.matrix().residual(set.radii(), &distances);
    for (row, &value) in residual.iter().enumerate() {
        if !(value.abs() <= tolerance) {
            findings.push(TangencyFinding::ResidualTooLarge { row, residual: value });
        }
    }

    let circles = set.base_circles().map(|c| c.to_circ2d());
    for (&(first, second), sign) in ROW_PAIRS.iter().zip(set.signs()) {
        let external = sign.is_external();
        let gap = if external {
            circles[first].external_gap(&circles[second])
        } else {
            circles[first].internal_gap(&circles[second])
        };
        if !(gap.abs() <= tolerance) {
            findings.push(TangencyFinding::NotTangent { first, second, external, gap });
        }
    }

    findings
}

/// Check that a Soddy circle touches all three base circles of `set`
///
/// The inner circle must touch each base circle from outside; the outer one
/// from outside, or from inside when it encloses them. This only holds for
/// externally tangent sets (see [`SolutionSet::is_external`]).
pub fn check_soddy_circle(
    set: &SolutionSet,
    soddy: &Circle,
    tolerance: f64,
) -> Vec<TangencyFinding> {
    let mut findings = Vec::new();
    let kind = match soddy.generation() {
        Generation::Soddy(kind) => kind,
        _ => return findings,
    };
    let encloses = matches!(kind, SoddyKind::Outer { enclosing: true });
    let soddy_circle = soddy.to_circ2d();

    for (base, circle) in set.base_circles().iter().enumerate() {
        let base_circle = circle.to_circ2d();
        let gap = if encloses {
            soddy_circle.internal_gap(&base_circle)
        } else {
            soddy_circle.external_gap(&base_circle)
        };
        if !(gap.abs() <= tolerance) {
            findings.push(TangencyFinding::SoddyNotTangent { base, kind, gap });
        }
    }

    findings
}

/// Check that every gasket circle touches its three parents.
///
/// With signed radii the tangency condition is `|c_a - c_b| = |ρa + ρb|`
/// for both external and internal contact.
pub fn check_gasket(gasket: &Gasket, tolerance: f64) -> Vec<TangencyFinding> {
    let mut findings = Vec::new();
    let circles = gasket.circles();

    for (circle, record) in circles.iter().enumerate() {
        let (Some(parents), Some(rho)) = (gasket.parents(circle), gasket.signed_radius(circle))
        else {
            continue;
        };
        for parent in parents {
            let Some(parent_rho) = gasket.signed_radius(parent) else {
                continue;
            };
            let distance = record.center().distance(&circles[parent].center());
            let gap = distance - (rho + parent_rho).abs();
            if !(gap.abs() <= tolerance) {
                findings.push(TangencyFinding::GasketNotTangent { circle, parent, gap });
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::gp::Pnt2d;
    use crate::gasket::generate_gasket;
    use crate::soddy::compute_soddy_circles;
    use crate::tangency::{enumerate_tangency_matrices, solve_solution_sets};

    fn sets_for(points: [Pnt2d; 3]) -> Vec<SolutionSet> {
        solve_solution_sets(&enumerate_tangency_matrices(), &points, &SolverConfig::default())
            .unwrap()
    }

    fn scalene() -> [Pnt2d; 3] {
        [
            Pnt2d::from_coords(1.0, 2.0),
            Pnt2d::from_coords(7.0, 3.0),
            Pnt2d::from_coords(4.0, 8.0),
        ]
    }

    #[test]
    fn test_all_solution_sets_valid() {
        for set in sets_for(scalene()) {
            let findings = check_solution_set(&set, 1e-9);
            assert!(findings.is_empty(), "set {}: {:?}", set.index(), findings);
        }
    }

    #[test]
    fn test_perturbed_set_reports_findings() {
        let set = sets_for(scalene())[0];
        let moved = [
            set.centroids()[0],
            set.centroids()[1],
            Pnt2d::from_coords(4.0, 9.0),
        ];
        let shifted = solve_solution_sets(
            &enumerate_tangency_matrices(),
            &moved,
            &SolverConfig::default(),
        )
        .unwrap()[0];

        // Radii from one triangle, centroids from another
        let mismatched: SolutionSet = serde_json::from_value(serde_json::json!({
            "index": 0,
            "signs": shifted.signs(),
            "radii": set.radii(),
            "centroids": shifted.centroids(),
        }))
        .unwrap();

        let findings = check_solution_set(&mismatched, 1e-9);
        assert!(findings
            .iter()
            .any(|f| matches!(f, TangencyFinding::ResidualTooLarge { .. })));
        assert!(findings
            .iter()
            .any(|f| matches!(f, TangencyFinding::NotTangent { external: true, .. })));
    }

    #[test]
    fn test_soddy_circles_of_external_set() {
        let set = sets_for(scalene())[0];
        assert!(set.is_external());
        let (inner, outer) = compute_soddy_circles(set.centroids(), set.radii(), 0).unwrap();
        assert!(check_soddy_circle(&set, &inner, 1e-9).is_empty());
        assert!(check_soddy_circle(&set, &outer, 1e-9).is_empty());
    }

    #[test]
    fn test_base_circle_is_not_checked_as_soddy() {
        let set = sets_for(scalene())[0];
        let base = set.base_circles()[0];
        assert!(check_soddy_circle(&set, &base, 1e-9).is_empty());
    }

    #[test]
    fn test_gasket_circles_touch_parents() {
        for set in sets_for(scalene()) {
            let gasket = generate_gasket(&set, 3, &SolverConfig::default()).unwrap();
            let findings = check_gasket(&gasket, 1e-9);
            assert!(findings.is_empty(), "set {}: {:?}", set.index(), findings);
        }
    }

    #[test]
    fn test_gasket_of_wrong_radii_reports_findings() {
        let set = sets_for(scalene())[0];
        // Same signs, radii scaled: the seeds no longer fit the centroids
        let scaled: SolutionSet = serde_json::from_value(serde_json::json!({
            "index": 0,
            "signs": set.signs(),
            "radii": set.radii().map(|r| 1.5 * r),
            "centroids": set.centroids(),
        }))
        .unwrap();
        let gasket = generate_gasket(&scaled, 1, &SolverConfig::default()).unwrap();
        let findings = check_gasket(&gasket, 1e-9);
        assert!(findings
            .iter()
            .any(|f| matches!(f, TangencyFinding::GasketNotTangent { .. })));
    }

    #[test]
    fn test_finding_display() {
        let finding = TangencyFinding::NotTangent {
            first: 0,
            second: 2,
            external: false,
            gap: 0.5,
        };
        assert_eq!(
            finding.to_string(),
            "Circles #0 and #2 are not internally tangent: gap = 5.00e-1"
        );
        let finding = TangencyFinding::NonPositiveRadius { index: 1, radius: -2.0 };
        assert_eq!(finding.to_string(), "Radius #1 is not positive: -2");
        let finding = TangencyFinding::GasketNotTangent { circle: 7, parent: 3, gap: 0.25 };
        assert_eq!(finding.to_string(), "Gasket circle #7 misses parent #3: gap = 2.50e-1");
    }
}
