//! N-step phase-shift demodulation.
//!
//! The i-th sine frame is shifted by 2π·i/N. Correlating the stack against
//! one sine and one cosine period gives, per pixel,
//!
//! - `num = Σ frame_i · sin(2π·i/N)` and `den = Σ frame_i · cos(2π·i/N)`,
//! - `modulation = sqrt(num² + den²) / (N/2)`, which recovers the sinusoid's
//!   amplitude for a clean signal,
//! - `atan2(num, den)`, the wrapped phase in (−π, π].
//!
//! Both π-offset branches of the wrapped phase are returned; the fusion
//! stage picks per pixel whichever keeps the working point away from the
//! ±π wrap. `atan2(0, 0) = 0` for dead pixels is accepted here and handled
//! by the modulation mask downstream.
use crate::image::{ImageF64, ImageView};
use rayon::prelude::*;
use std::f64::consts::TAU;

/// Wrapped-phase pair and modulation amplitude for one axis.
#[derive(Clone, Debug)]
pub struct WrappedPhase {
    /// `atan2(num, den)`, zero crossing at phase 0
    pub primary: ImageF64,
    /// `atan2(-num, -den)`, zero crossing at phase ±π
    pub rotated: ImageF64,
    /// Sinusoidal amplitude per pixel
    pub modulation: ImageF64,
}

/// Demodulate `frames.len()` uniformly phase-stepped frames.
pub fn demodulate(frames: &[ImageF64]) -> WrappedPhase {
    let n = frames.len();
    debug_assert!(n >= 3, "demodulation needs at least 3 steps");
    let (w, h) = (frames[0].w, frames[0].h);

    let steps: Vec<(f64, f64)> = (0..n)
        .map(|i| (TAU * i as f64 / n as f64).sin_cos())
        .collect();

    let mut num = ImageF64::new(w, h);
    let mut den = ImageF64::new(w, h);
    num.data
        .par_chunks_mut(w)
        .zip(den.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (num_row, den_row))| {
            for (&(sin_i, cos_i), frame) in steps.iter().zip(frames) {
                let row = frame.row(y);
                for x in 0..w {
                    num_row[x] += row[x] * sin_i;
                    den_row[x] += row[x] * cos_i;
                }
            }
        });

    let half_steps = n as f64 / 2.0;
    let mut primary = ImageF64::new(w, h);
    let mut rotated = ImageF64::new(w, h);
    let mut modulation = ImageF64::new(w, h);
    for i in 0..w * h {
        let (nv, dv) = (num.data[i], den.data[i]);
        modulation.data[i] = (nv * nv + dv * dv).sqrt() / half_steps;
        primary.data[i] = nv.atan2(dv);
        rotated.data[i] = (-nv).atan2(-dv);
    }

    WrappedPhase {
        primary,
        rotated,
        modulation,
    }
}
