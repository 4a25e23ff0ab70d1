//! Configuration of the unwrapping pipeline.
//!
//! One immutable value carries the per-axis pattern counts, the nominal sine
//! period lengths and the modulation threshold. It is validated once, before
//! any stage runs, and passed by reference through the pipeline.

use super::UnwrapError;
use crate::stack::StackLayout;
use crate::types::Axis;
use serde::{Deserialize, Serialize};

/// Pattern-sequence configuration for one capture run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UnwrapParams {
    /// Gray-code frames for the x axis (bits of the half-period order).
    pub gc_patterns_x: usize,
    /// Gray-code frames for the y axis.
    pub gc_patterns_y: usize,
    /// Phase-shifted sine frames for the x axis (uniform steps of 2π/N).
    pub sine_patterns_x: usize,
    /// Phase-shifted sine frames for the y axis.
    pub sine_patterns_y: usize,
    /// Nominal sine period along x in projector pixels.
    pub sine_period_length_x: f64,
    /// Nominal sine period along y in projector pixels.
    pub sine_period_length_y: f64,
    /// Minimum modulation amplitude for a pixel to count as measured.
    pub modulation_threshold: f64,
}

impl Default for UnwrapParams {
    fn default() -> Self {
        // Matches a 1280x800 projector with 16-pixel sine periods.
        Self {
            gc_patterns_x: 8,
            gc_patterns_y: 7,
            sine_patterns_x: 16,
            sine_patterns_y: 16,
            sine_period_length_x: 16.0,
            sine_period_length_y: 16.0,
            modulation_threshold: 4.0,
        }
    }
}

impl UnwrapParams {
    /// Derive pattern counts for a projector resolution and sine period.
    ///
    /// The Gray code indexes half periods, so each axis needs
    /// `ceil(log2(extent / (period / 2)))` bits.
    pub fn for_projector(width_px: usize, height_px: usize, period_px: f64, steps: usize) -> Self {
        Self {
            gc_patterns_x: half_period_bits(width_px, period_px),
            gc_patterns_y: half_period_bits(height_px, period_px),
            sine_patterns_x: steps,
            sine_patterns_y: steps,
            sine_period_length_x: period_px,
            sine_period_length_y: period_px,
            ..Self::default()
        }
    }

    /// Check the invariants every stage relies on.
    pub fn validate(&self) -> Result<(), UnwrapError> {
        if !self.modulation_threshold.is_finite() || self.modulation_threshold < 0.0 {
            return Err(UnwrapError::InvalidThreshold(self.modulation_threshold));
        }
        for (axis, gc, steps, period) in [
            (
                Axis::X,
                self.gc_patterns_x,
                self.sine_patterns_x,
                self.sine_period_length_x,
            ),
            (
                Axis::Y,
                self.gc_patterns_y,
                self.sine_patterns_y,
                self.sine_period_length_y,
            ),
        ] {
            if gc == 0 {
                return Err(UnwrapError::NoGrayPatterns { axis });
            }
            if gc > 31 {
                return Err(UnwrapError::TooManyGrayPatterns { axis, patterns: gc });
            }
            if steps < 3 {
                return Err(UnwrapError::TooFewSteps { axis, steps });
            }
            if !period.is_finite() || period <= 0.0 {
                return Err(UnwrapError::InvalidPeriod { axis, period });
            }
        }
        Ok(())
    }

    /// Frame ranges of the four pattern groups.
    pub fn layout(&self) -> StackLayout {
        StackLayout::new(
            self.gc_patterns_x,
            self.sine_patterns_x,
            self.gc_patterns_y,
            self.sine_patterns_y,
        )
    }
}

fn half_period_bits(extent_px: usize, period_px: f64) -> usize {
    (extent_px as f64 / (0.5 * period_px)).log2().ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projector_derivation_counts_half_periods() {
        let params = UnwrapParams::for_projector(1280, 800, 16.0, 16);
        assert_eq!(params.gc_patterns_x, 8);
        assert_eq!(params.gc_patterns_y, 7);
        assert_eq!(params.sine_patterns_x, 16);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let params = UnwrapParams {
            modulation_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(UnwrapError::InvalidThreshold(_))
        ));

        let params = UnwrapParams {
            sine_patterns_y: 2,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(UnwrapError::TooFewSteps {
                axis: Axis::Y,
                steps: 2
            })
        ));

        let params = UnwrapParams {
            gc_patterns_x: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(UnwrapError::NoGrayPatterns { axis: Axis::X })
        ));
    }
}
