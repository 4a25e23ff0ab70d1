//! Modulation-threshold validity masking.
//!
//! A pixel with too little sinusoidal signal has a numerically defined but
//! physically meaningless phase. This stage flags every pixel whose
//! modulation falls below the configured threshold as invalid and leaves the
//! rest untouched. It is the only place the pipeline rejects data.
use crate::image::ImageF64;
use crate::types::MaskedMap;

/// Invalidate pixels with `modulation < threshold`.
pub fn mask_by_modulation(mut phase: MaskedMap, modulation: &ImageF64, threshold: f64) -> MaskedMap {
    debug_assert_eq!((phase.w, phase.h), (modulation.w, modulation.h));
    for (ok, &m) in phase.valid.iter_mut().zip(&modulation.data) {
        if m < threshold {
            *ok = false;
        }
    }
    phase
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_pixels_become_invalid() {
        let phase = MaskedMap::from_parts(
            4,
            1,
            vec![1.0, 2.0, 3.0, 4.0],
            vec![true, true, true, false],
        );
        let modulation = ImageF64::from_vec(4, 1, vec![3.9, 4.0, 10.0, 50.0]);

        let masked = mask_by_modulation(phase, &modulation, 4.0);
        assert_eq!(masked.valid, vec![false, true, true, false]);
        // Values at surviving pixels pass through unchanged.
        assert_eq!(masked.get(1, 0), Some(2.0));
        assert_eq!(masked.get(2, 0), Some(3.0));
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let phase = MaskedMap::from_parts(2, 1, vec![0.5, -0.5], vec![true, true]);
        let modulation = ImageF64::from_vec(2, 1, vec![0.0, 1.0]);
        let masked = mask_by_modulation(phase, &modulation, 0.0);
        assert_eq!(masked.valid_count(), 2);
    }
}
