//! Least-squares polynomial fit and residual deviation map.
//!
//! The fit builds a design matrix over the valid pixels only (invalid and
//! non-finite samples are pruned), with one column per monomial in canonical
//! order, and solves the normal equations `(MᵀM)·c = Mᵀ·z` by LU
//! decomposition. The residual map evaluates the fitted surface over the
//! full grid and reports `observed − fitted`, keeping the source map's
//! invalid pixels invalid.
use super::basis::{basis_powers, PolySurface};
use crate::types::MaskedMap;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;
use thiserror::Error;

/// Degenerate fit configurations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFitError {
    /// Fewer valid pixels than basis terms.
    #[error("degree-{degree} fit needs at least {required} valid pixels, got {got}")]
    NotEnoughPoints {
        degree: usize,
        required: usize,
        got: usize,
    },
    /// The normal equations are numerically singular, e.g. all valid pixels
    /// collinear for the requested degree.
    #[error("normal equations are singular for the requested degree")]
    SingularSystem,
}

/// Fit a polynomial surface of the given total degree to the valid pixels.
pub fn fit_surface(phase: &MaskedMap, degree: usize) -> Result<PolySurface, SurfaceFitError> {
    let powers = basis_powers(degree);
    let terms = powers.len();

    let mut samples: Vec<(f64, f64, f64)> = Vec::new();
    for row in 0..phase.h {
        for col in 0..phase.w {
            let i = phase.idx(col, row);
            if phase.valid[i] && phase.data[i].is_finite() {
                samples.push((row as f64, col as f64, phase.data[i]));
            }
        }
    }

    if samples.len() < terms {
        return Err(SurfaceFitError::NotEnoughPoints {
            degree,
            required: terms,
            got: samples.len(),
        });
    }

    let mut design = DMatrix::<f64>::zeros(samples.len(), terms);
    let mut observed = DVector::<f64>::zeros(samples.len());
    for (r, &(row, col, z)) in samples.iter().enumerate() {
        for (t, &(p, q)) in powers.iter().enumerate() {
            design[(r, t)] = row.powi(p) * col.powi(q);
        }
        observed[r] = z;
    }

    let normal = design.tr_mul(&design);
    let rhs = design.tr_mul(&observed);
    let solution = normal
        .lu()
        .solve(&rhs)
        .ok_or(SurfaceFitError::SingularSystem)?;

    Ok(PolySurface {
        degree,
        coeffs: solution.iter().copied().collect(),
    })
}

/// Evaluate `observed − fitted` over the full grid. Pixels invalid in the
/// source stay invalid; the fitted value is still computed for them.
pub fn deviation_map(phase: &MaskedMap, surface: &PolySurface) -> MaskedMap {
    let (w, h) = (phase.w, phase.h);
    let powers = basis_powers(surface.degree);
    let mut data = vec![0.0f64; w * h];
    data.par_chunks_mut(w).enumerate().for_each(|(row, out)| {
        let rf = row as f64;
        for (col, slot) in out.iter_mut().enumerate() {
            let cf = col as f64;
            let fitted: f64 = powers
                .iter()
                .zip(&surface.coeffs)
                .map(|(&(p, q), &c)| c * rf.powi(p) * cf.powi(q))
                .sum();
            *slot = phase.data[row * w + col] - fitted;
        }
    });
    MaskedMap::from_parts(w, h, data, phase.valid.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from_fn(w: usize, h: usize, f: impl Fn(f64, f64) -> f64) -> MaskedMap {
        let mut data = vec![0.0; w * h];
        for row in 0..h {
            for col in 0..w {
                data[row * w + col] = f(row as f64, col as f64);
            }
        }
        MaskedMap::from_parts(w, h, data, vec![true; w * h])
    }

    #[test]
    fn constant_map_fits_exactly() {
        let map = map_from_fn(8, 6, |_, _| 2.75);
        let surface = fit_surface(&map, 2).unwrap();
        assert!((surface.coeffs[0] - 2.75).abs() < 1e-9);
        for &c in &surface.coeffs[1..] {
            assert!(c.abs() < 1e-9, "higher-order coefficient {c}");
        }
        let dev = deviation_map(&map, &surface);
        for (i, &d) in dev.data.iter().enumerate() {
            assert!(d.abs() < 1e-9, "residual {d} at {i}");
        }
    }

    #[test]
    fn degree_two_coefficients_are_recovered() {
        let truth = [1.5, 0.3, -0.2, 0.05, 0.01, -0.02];
        let map = map_from_fn(20, 20, |x, y| {
            truth[0]
                + truth[1] * x
                + truth[2] * y
                + truth[3] * x * x
                + truth[4] * x * y
                + truth[5] * y * y
        });
        let surface = fit_surface(&map, 2).unwrap();
        for (got, want) in surface.coeffs.iter().zip(&truth) {
            assert!((got - want).abs() < 1e-6, "coefficient {got} vs {want}");
        }
        let dev = deviation_map(&map, &surface);
        for &d in &dev.data {
            assert!(d.abs() < 1e-6, "residual {d}");
        }
    }

    #[test]
    fn invalid_pixels_are_excluded_and_preserved() {
        let mut map = map_from_fn(10, 10, |x, y| 1.0 + 0.5 * x - 0.25 * y);
        // Corrupt some samples and mark them invalid; the fit must ignore them.
        for &i in &[3, 17, 55, 98] {
            map.data[i] = 1e9;
            map.valid[i] = false;
        }
        let surface = fit_surface(&map, 1).unwrap();
        assert!((surface.coeffs[0] - 1.0).abs() < 1e-9);
        assert!((surface.coeffs[1] - 0.5).abs() < 1e-9);
        assert!((surface.coeffs[2] + 0.25).abs() < 1e-9);

        let dev = deviation_map(&map, &surface);
        assert!(!dev.valid[3]);
        assert!(dev.valid[4]);
        assert_eq!(dev.valid_count(), 96);
    }

    #[test]
    fn too_few_valid_pixels_is_an_error() {
        let mut map = map_from_fn(3, 3, |x, y| x + y);
        for i in 5..9 {
            map.valid[i] = false;
        }
        // Degree 2 needs 6 terms but only 5 pixels remain.
        match fit_surface(&map, 2) {
            Err(SurfaceFitError::NotEnoughPoints { required, got, .. }) => {
                assert_eq!(required, 6);
                assert_eq!(got, 5);
            }
            other => panic!("expected NotEnoughPoints, got {other:?}"),
        }
    }

    #[test]
    fn collinear_pixels_make_the_system_singular() {
        // All valid pixels share one row, so row-dependent columns collapse.
        let mut map = map_from_fn(6, 4, |x, y| x + y);
        for row in 1..4 {
            for col in 0..6 {
                map.valid[row * 6 + col] = false;
            }
        }
        assert!(matches!(
            fit_surface(&map, 1),
            Err(SurfaceFitError::SingularSystem)
        ));
    }
}
