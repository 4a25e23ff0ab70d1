//! Flatness deviation analysis of an unwrapped phase map.
//!
//! A nominally flat reference surface produces a phase map that is a smooth,
//! low-order function of the pixel coordinates. Fitting a two-variable
//! polynomial by least squares and subtracting it leaves the residual
//! flatness deviation, with the input's per-pixel validity preserved.
//!
//! Modules
//! - [`basis`] – monomial basis enumeration and the fitted [`PolySurface`].
//! - `fit` – normal-equations fit over the valid pixels and the residual map.

pub mod basis;
mod fit;

pub use basis::PolySurface;
pub use fit::{deviation_map, fit_surface, SurfaceFitError};
