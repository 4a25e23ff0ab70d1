//! Two-variable monomial basis and the fitted surface model.
//!
//! Terms are enumerated by increasing total degree, and within one degree by
//! increasing power of the second (column) variable:
//! `1, x, y, x², xy, y², …` where `x` is the pixel row and `y` the pixel
//! column. Coefficient vectors follow the same order.
use serde::{Deserialize, Serialize};

/// Number of monomials of total degree at most `degree`.
pub fn term_count(degree: usize) -> usize {
    (degree + 1) * (degree + 2) / 2
}

/// (row power, column power) pairs in canonical term order.
pub fn basis_powers(degree: usize) -> Vec<(i32, i32)> {
    let mut powers = Vec::with_capacity(term_count(degree));
    for d in 0..=degree as i32 {
        for k in 0..=d {
            powers.push((d - k, k));
        }
    }
    powers
}

/// Polynomial surface fitted to a phase map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolySurface {
    /// Total degree of the fit.
    pub degree: usize,
    /// One coefficient per monomial, in canonical term order.
    pub coeffs: Vec<f64>,
}

impl PolySurface {
    /// Evaluate the surface at a (row, column) coordinate.
    pub fn eval(&self, row: f64, col: f64) -> f64 {
        basis_powers(self.degree)
            .iter()
            .zip(&self.coeffs)
            .map(|(&(p, q), &c)| c * row.powi(p) * col.powi(q))
            .sum()
    }
}
