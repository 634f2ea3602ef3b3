//! Tangency solver
//!
//! Three circles centred on fixed points p0, p1, p2 are mutually tangent
//! when, for every pair (u, v), `±r_u ± r_v = |p_u - p_v|`. Both signs
//! positive is external tangency; one negative sign means the circle with
//! the positive sign encloses the other.
//!
//! Each row of a [`TangencyMatrix`] encodes one such pair equation:
//!
//! ```text
//! row 0: r0, r2  ->  dist(p0, p2)      [ s  0  s ]
//! row 1: r1, r2  ->  dist(p1, p2)      [ 0  s  s ]
//! row 2: r0, r1  ->  dist(p0, p1)      [ s  s  0 ]
//! ```
//!
//! Choosing one [`TangencySign`] per row gives 27 matrices; the 13 that are
//! nonsingular are solved against the distances and kept when all three
//! radii come out strictly positive.

use crate::config::SolverConfig;
use crate::configuration::{Circle, Generation};
use crate::foundation::math::{solve_linear_system_3x3, Matrix3x3};
use crate::gp::Pnt2d;
use crate::{precision, ApolloniusError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Columns coupled by each row, and therefore the pair of centroids whose
/// distance is that row's right-hand side.
pub const ROW_PAIRS: [(usize, usize); 3] = [(0, 2), (1, 2), (0, 1)];

/// Sign pair applied to the two nonzero entries of one matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TangencySign {
    /// `(+1, +1)`: external tangency
    A,
    /// `(-1, +1)`: second circle encloses the first
    B,
    /// `(+1, -1)`: first circle encloses the second
    C,
}

impl TangencySign {
    /// All symbols in generation order.
    pub const ALL: [TangencySign; 3] = [TangencySign::A, TangencySign::B, TangencySign::C];

    /// The `(first, second)` sign pair for this symbol.
    pub const fn signs(self) -> (f64, f64) {
        match self {
            TangencySign::A => (1.0, 1.0),
            TangencySign::B => (-1.0, 1.0),
            TangencySign::C => (1.0, -1.0),
        }
    }

    /// True for external tangency.
    pub const fn is_external(self) -> bool {
        matches!(self, TangencySign::A)
    }
}

/// One sign symbol per matrix row.
pub type SignTriple = [TangencySign; 3];

/// A 3x3 tangency matrix together with the sign triple that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangencyMatrix {
    signs: SignTriple,
    matrix: Matrix3x3,
}

impl TangencyMatrix {
    /// Builds the matrix for a sign triple. Row `i` gets the sign pair of
    /// `signs[i]` in the two columns of `ROW_PAIRS[i]`; the third entry is zero.
    pub fn from_signs(signs: SignTriple) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (row, (&(first, second), sign)) in ROW_PAIRS.iter().zip(signs).enumerate() {
            let (s_first, s_second) = sign.signs();
            rows[row][first] = s_first;
            rows[row][second] = s_second;
        }
        TangencyMatrix {
            signs,
            matrix: Matrix3x3::from_rows(rows),
        }
    }

    pub fn signs(&self) -> SignTriple {
        self.signs
    }

    pub fn matrix(&self) -> &Matrix3x3 {
        &self.matrix
    }

    /// Exact determinant: entries are 0 and ±1, so this is 0 or ±2.
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    pub fn is_singular(&self) -> bool {
        self.determinant() == 0.0
    }

    /// Solves `M · r = distances`.
    pub fn solve(&self, distances: &[f64; 3]) -> Option<[f64; 3]> {
        solve_linear_system_3x3(&self.matrix, distances)
    }

    /// `M · r - distances`, row by row.
    pub fn residual(&self, radii: &[f64; 3], distances: &[f64; 3]) -> [f64; 3] {
        let lhs = self.matrix.multiply_vec(radii);
        [
            lhs[0] - distances[0],
            lhs[1] - distances[1],
            lhs[2] - distances[2],
        ]
    }
}

/// Every nonsingular tangency matrix, in lexicographic order of the sign
/// triples (A < B < C, row 0 most significant).
///
/// Deterministic: always the same 13 matrices.
pub fn enumerate_tangency_matrices() -> Vec<TangencyMatrix> {
    let mut matrices = Vec::new();
    for s0 in TangencySign::ALL {
        for s1 in TangencySign::ALL {
            for s2 in TangencySign::ALL {
                let candidate = TangencyMatrix::from_signs([s0, s1, s2]);
                if candidate.is_singular() {
                    trace!(signs = ?candidate.signs(), "discarding singular tangency matrix");
                    continue;
                }
                matrices.push(candidate);
            }
        }
    }
    matrices
}

/// Distances in row order: `[dist(p0, p2), dist(p1, p2), dist(p0, p1)]`.
pub fn pairwise_distances(points: &[Pnt2d; 3]) -> [f64; 3] {
    ROW_PAIRS.map(|(u, v)| points[u].distance(&points[v]))
}

/// Rejects non-finite and collinear centroid triples.
///
/// Finite points far enough apart that a squared distance overflows are
/// reported as [`ApolloniusError::DistanceOverflow`].
///
/// Collinear means twice the triangle area is below
/// `confusion * longest_side²`, which also covers coincident points.
pub fn ensure_triangle(points: &[Pnt2d; 3], confusion: f64) -> Result<()> {
    for (index, p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(ApolloniusError::NonFinitePoint {
                index,
                x: p.x(),
                y: p.y(),
            });
        }
    }
    let mut longest_sq: f64 = 0.0;
    for &(first, second) in &ROW_PAIRS {
        let square = points[first].square_distance(&points[second]);
        if !square.is_finite() {
            return Err(ApolloniusError::DistanceOverflow { first, second });
        }
        longest_sq = longest_sq.max(square);
    }
    let twice_area = points[0].cross(&points[1], &points[2]).abs();
    if longest_sq == 0.0 || twice_area <= confusion * longest_sq {
        return Err(ApolloniusError::CollinearPoints {
            area: twice_area * 0.5,
        });
    }
    Ok(())
}

/// Solves every matrix against the pairwise distances of `points` and keeps
/// the all-positive radii triples.
///
/// The position of a triple in the output is its solution-set index. An
/// empty output means no configuration exists; collinear or non-finite
/// points are an error.
pub fn solve_radii(matrices: &[TangencyMatrix], points: &[Pnt2d; 3]) -> Result<Vec<[f64; 3]>> {
    ensure_triangle(points, precision::CONFUSION)?;
    Ok(positive_solutions(matrices, points)
        .map(|(_, radii)| radii)
        .collect())
}

/// Like [`solve_radii`], but returns full [`SolutionSet`] records and uses
/// the tolerances from `config`.
pub fn solve_solution_sets(
    matrices: &[TangencyMatrix],
    points: &[Pnt2d; 3],
    config: &SolverConfig,
) -> Result<Vec<SolutionSet>> {
    ensure_triangle(points, config.confusion)?;
    Ok(positive_solutions(matrices, points)
        .enumerate()
        .map(|(index, (signs, radii))| SolutionSet {
            index,
            signs,
            radii,
            centroids: *points,
        })
        .collect())
}

fn positive_solutions<'a>(
    matrices: &'a [TangencyMatrix],
    points: &[Pnt2d; 3],
) -> impl Iterator<Item = (SignTriple, [f64; 3])> + 'a {
    let distances = pairwise_distances(points);
    matrices.iter().filter_map(move |matrix| {
        let radii = matrix.solve(&distances)?;
        if radii.iter().all(|&r| r > 0.0) {
            Some((matrix.signs(), radii))
        } else {
            debug!(signs = ?matrix.signs(), ?radii, "discarding infeasible radii");
            None
        }
    })
}

/// One valid tangency configuration: three strictly positive radii on the
/// shared centroids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolutionSet {
    index: usize,
    signs: SignTriple,
    radii: [f64; 3],
    centroids: [Pnt2d; 3],
}

impl SolutionSet {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sign triple of the matrix this set was solved from.
    pub fn signs(&self) -> SignTriple {
        self.signs
    }

    pub fn radii(&self) -> &[f64; 3] {
        &self.radii
    }

    pub fn centroids(&self) -> &[Pnt2d; 3] {
        &self.centroids
    }

    pub fn matrix(&self) -> TangencyMatrix {
        TangencyMatrix::from_signs(self.signs)
    }

    /// True when all three circles touch from outside.
    pub fn is_external(&self) -> bool {
        self.signs.iter().all(|s| s.is_external())
    }

    /// The three base circles of this set.
    pub fn base_circles(&self) -> [Circle; 3] {
        [0, 1, 2].map(|i| {
            Circle::new(self.centroids[i], self.radii[i], Generation::Base, self.index)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TangencySign::{A, B, C};

    fn right_triangle() -> [Pnt2d; 3] {
        [
            Pnt2d::from_coords(0.0, 0.0),
            Pnt2d::from_coords(4.0, 0.0),
            Pnt2d::from_coords(0.0, 3.0),
        ]
    }

    #[test]
    fn test_sign_pairs() {
        assert_eq!(A.signs(), (1.0, 1.0));
        assert_eq!(B.signs(), (-1.0, 1.0));
        assert_eq!(C.signs(), (1.0, -1.0));
        assert!(A.is_external());
        assert!(!B.is_external());
    }

    #[test]
    fn test_matrix_layout() {
        let m = TangencyMatrix::from_signs([A, B, C]);
        assert_eq!(m.matrix().m[0], [1.0, 0.0, 1.0]);
        assert_eq!(m.matrix().m[1], [0.0, -1.0, 1.0]);
        assert_eq!(m.matrix().m[2], [1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_one_zero_per_row() {
        for matrix in enumerate_tangency_matrices() {
            for (row, &(u, v)) in ROW_PAIRS.iter().enumerate() {
                let entries = matrix.matrix().m[row];
                assert_eq!(entries.iter().filter(|&&e| e == 0.0).count(), 1);
                assert_ne!(entries[u], 0.0);
                assert_ne!(entries[v], 0.0);
            }
        }
    }

    #[test]
    fn test_determinant_is_exact() {
        for s0 in TangencySign::ALL {
            for s1 in TangencySign::ALL {
                for s2 in TangencySign::ALL {
                    let det = TangencyMatrix::from_signs([s0, s1, s2]).determinant();
                    assert!(det == 0.0 || det.abs() == 2.0, "unexpected det {}", det);
                }
            }
        }
    }

    #[test]
    fn test_enumerate_survivors() {
        let signs: Vec<SignTriple> = enumerate_tangency_matrices()
            .iter()
            .map(|m| m.signs())
            .collect();
        assert_eq!(
            signs,
            vec![
                [A, A, A],
                [A, B, B],
                [A, B, C],
                [A, C, B],
                [A, C, C],
                [B, A, B],
                [B, A, C],
                [B, B, A],
                [B, C, A],
                [C, A, B],
                [C, A, C],
                [C, B, A],
                [C, C, A],
            ]
        );
    }

    #[test]
    fn test_enumerate_is_deterministic() {
        assert_eq!(enumerate_tangency_matrices(), enumerate_tangency_matrices());
    }

    #[test]
    fn test_pairwise_distances_order() {
        assert_eq!(pairwise_distances(&right_triangle()), [3.0, 5.0, 4.0]);
    }

    #[test]
    fn test_solve_radii_right_triangle() {
        let matrices = enumerate_tangency_matrices();
        let radii = solve_radii(&matrices, &right_triangle()).unwrap();
        assert_eq!(radii.len(), 4);

        let expected = [
            [1.0, 3.0, 2.0],
            [2.0, 6.0, 1.0],
            [3.0, 1.0, 6.0],
            [6.0, 2.0, 3.0],
        ];
        for (got, want) in radii.iter().zip(expected.iter()) {
            for i in 0..3 {
                assert!((got[i] - want[i]).abs() < 1e-9, "{:?} vs {:?}", got, want);
            }
        }
    }

    #[test]
    fn test_solution_sets_carry_signs() {
        let matrices = enumerate_tangency_matrices();
        let sets = solve_solution_sets(&matrices, &right_triangle(), &SolverConfig::default())
            .unwrap();
        let signs: Vec<SignTriple> = sets.iter().map(|s| s.signs()).collect();
        assert_eq!(signs, vec![[A, A, A], [A, C, B], [B, B, A], [C, A, C]]);
        for (i, set) in sets.iter().enumerate() {
            assert_eq!(set.index(), i);
            assert_eq!(set.centroids(), &right_triangle());
        }
        assert!(sets[0].is_external());
        assert!(!sets[1].is_external());
    }

    #[test]
    fn test_residuals_vanish() {
        let points = right_triangle();
        let distances = pairwise_distances(&points);
        let matrices = enumerate_tangency_matrices();
        let sets = solve_solution_sets(&matrices, &points, &SolverConfig::default()).unwrap();
        for set in &sets {
            let residual = set.matrix().residual(set.radii(), &distances);
            assert!(residual.iter().all(|r| r.abs() < 1e-9), "{:?}", residual);
        }
    }

    #[test]
    fn test_base_circles() {
        let matrices = enumerate_tangency_matrices();
        let sets = solve_solution_sets(&matrices, &right_triangle(), &SolverConfig::default())
            .unwrap();
        let circles = sets[2].base_circles();
        for (i, circle) in circles.iter().enumerate() {
            assert_eq!(circle.solution_set(), 2);
            assert_eq!(circle.generation(), Generation::Base);
            assert_eq!(circle.center(), right_triangle()[i]);
            assert_eq!(circle.radius(), sets[2].radii()[i]);
        }
    }

    #[test]
    fn test_collinear_points_rejected() {
        let matrices = enumerate_tangency_matrices();
        let points = [
            Pnt2d::from_coords(0.0, 0.0),
            Pnt2d::from_coords(1.0, 0.0),
            Pnt2d::from_coords(3.0, 0.0),
        ];
        let result = solve_radii(&matrices, &points);
        assert!(matches!(result, Err(ApolloniusError::CollinearPoints { .. })));
    }

    #[test]
    fn test_coincident_points_rejected() {
        let p = Pnt2d::from_coords(2.0, 2.0);
        let result = solve_radii(&enumerate_tangency_matrices(), &[p, p, p]);
        assert!(matches!(result, Err(ApolloniusError::CollinearPoints { .. })));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let points = [
            Pnt2d::from_coords(0.0, 0.0),
            Pnt2d::from_coords(f64::NAN, 0.0),
            Pnt2d::from_coords(0.0, 3.0),
        ];
        let result = solve_radii(&enumerate_tangency_matrices(), &points);
        assert!(matches!(result, Err(ApolloniusError::NonFinitePoint { index: 1, .. })));
    }

    #[test]
    fn test_huge_coordinates_overflow() {
        let points = [
            Pnt2d::from_coords(-1e200, 0.0),
            Pnt2d::from_coords(1e200, 0.0),
            Pnt2d::from_coords(0.0, 1e200),
        ];
        let result = solve_radii(&enumerate_tangency_matrices(), &points);
        assert!(matches!(
            result,
            Err(ApolloniusError::DistanceOverflow { first: 0, second: 2 })
        ));
    }

    #[test]
    fn test_no_matrices_is_empty_result() {
        let radii = solve_radii(&[], &right_triangle()).unwrap();
        assert!(radii.is_empty());
    }
}
