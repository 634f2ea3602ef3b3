//! Foundation math utilities - 3x3 matrices and linear algebra
//!
//! This module provides:
//! - `Matrix3x3` - 3x3 matrix operations (inverse, determinant, matrix-vector product)
//! - Linear algebra: solve_linear_system_3x3
//!
//! Vectors are plain `[f64; 3]` arrays; the tangency solver only ever needs
//! three unknowns.

use crate::precision::COMPUTATIONAL;

/// A 3x3 matrix
///
/// Stored in row-major order: m[row][col]
/// ```text
/// | m00 m01 m02 |
/// | m10 m11 m12 |
/// | m20 m21 m22 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3x3 {
    /// Create a matrix from its rows
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Matrix3x3 { m: rows }
    }

    /// Determinant of the matrix
    ///
    /// Exact for small-integer entries, which is what the tangency filter
    /// relies on.
    pub fn determinant(&self) -> f64 {
        let m = self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse of the matrix
    ///
    /// Returns None if the matrix is singular (determinant ≈ 0)
    pub fn inverse(&self) -> Option<Matrix3x3> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= COMPUTATIONAL {
            return None;
        }

        let m = self.m;
        let inv_det = 1.0 / det;

        // Adjugate (transposed cofactors) scaled by 1/det
        let m00 = (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det;
        let m01 = -(m[0][1] * m[2][2] - m[0][2] * m[2][1]) * inv_det;
        let m02 = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;

        let m10 = -(m[1][0] * m[2][2] - m[1][2] * m[2][0]) * inv_det;
        let m11 = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
        let m12 = -(m[0][0] * m[1][2] - m[0][2] * m[1][0]) * inv_det;

        let m20 = (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det;
        let m21 = -(m[0][0] * m[2][1] - m[0][1] * m[2][0]) * inv_det;
        let m22 = (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det;

        Some(Matrix3x3 {
            m: [
                [m00, m01, m02],
                [m10, m11, m12],
                [m20, m21, m22],
            ],
        })
    }

    /// Multiply this matrix by a column vector
    pub fn multiply_vec(&self, v: &[f64; 3]) -> [f64; 3] {
        [
            self.m[0][0] * v[0] + self.m[0][1] * v[1] + self.m[0][2] * v[2],
            self.m[1][0] * v[0] + self.m[1][1] * v[1] + self.m[1][2] * v[2],
            self.m[2][0] * v[0] + self.m[2][1] * v[1] + self.m[2][2] * v[2],
        ]
    }
}

/// Solve `a · x = b` for x
///
/// Returns None if `a` is singular.
pub fn solve_linear_system_3x3(a: &Matrix3x3, b: &[f64; 3]) -> Option<[f64; 3]> {
    let a_inv = a.inverse()?;
    Some(a_inv.multiply_vec(b))
}
