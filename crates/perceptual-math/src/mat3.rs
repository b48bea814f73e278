//! 3x3 matrix type for linear color transforms.
//!
//! [`Mat3`] drives the XYZ white point adaptation and the Oklab LMS
//! projections.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use perceptual_math::{Mat3, Trio};
//!
//! let m = Mat3::from_rows([
//!     [2.0, 0.0, 0.0],
//!     [0.0, 4.0, 0.0],
//!     [0.0, 0.0, 8.0],
//! ]);
//! let v = m.inverse().unwrap() * Mat3::create_trio(2.0, 4.0, 8.0);
//! assert_eq!(v, Trio::ONE);
//! ```

use std::ops::{Index, Mul};

/// Column vector used with [`Mat3`].
pub type Trio = glam::DVec3;

/// A 3x3 `f64` matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a column vector.
    #[inline]
    pub const fn create_trio(first: f64, second: f64, third: f64) -> Trio {
        Trio::new(first, second, third)
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse with the closed-form cofactor method.
    ///
    /// Returns `None` if and only if the determinant is exactly zero.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        // Cofactor matrix, transposed and scaled by 1/det
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// Transforms a trio by this matrix.
    #[inline]
    pub fn transform(&self, v: Trio) -> Trio {
        Trio::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Multiplies two matrices.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        result
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Trio> for Mat3 {
    type Output = Trio;

    #[inline]
    fn mul(self, rhs: Trio) -> Trio {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 3] {
        &self.m[i]
    }
}
