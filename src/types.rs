use crate::image::ImageF64;
use serde::Serialize;
use std::fmt;

/// Pattern axis: `X` patterns encode the projector column, `Y` patterns the
/// projector row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Dense f64 map with an explicit per-pixel validity flag.
///
/// Invalidity travels as a parallel boolean mask instead of an in-band NaN so
/// arithmetic over bad pixels can never masquerade as a finite measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedMap {
    /// Map width in pixels
    pub w: usize,
    /// Map height in pixels
    pub h: usize,
    /// Row-major values; content at invalid pixels carries no meaning
    pub data: Vec<f64>,
    /// Per-pixel validity, same layout as `data`
    pub valid: Vec<bool>,
}

impl MaskedMap {
    /// Wrap a fully valid map.
    pub fn from_image(image: ImageF64) -> Self {
        let len = image.data.len();
        Self {
            w: image.w,
            h: image.h,
            data: image.data,
            valid: vec![true; len],
        }
    }

    /// Assemble from raw parts.
    pub fn from_parts(w: usize, h: usize, data: Vec<f64>, valid: Vec<bool>) -> Self {
        assert_eq!(data.len(), w * h, "value buffer length must equal w * h");
        assert_eq!(valid.len(), w * h, "validity buffer length must equal w * h");
        Self { w, h, data, valid }
    }

    #[inline]
    /// Convert (x, y) to a linear index.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Value at (x, y), or `None` for an invalid pixel.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        let i = self.idx(x, y);
        self.valid[i].then_some(self.data[i])
    }

    /// Number of pixels in the map.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the map holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Count valid pixels.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }
}

/// Absolute phase and modulation maps for a single axis.
#[derive(Clone, Debug)]
pub struct AxisMaps {
    /// Absolute (unwrapped) phase, invalid where modulation fell below threshold
    pub phase: MaskedMap,
    /// Sinusoidal signal amplitude per pixel
    pub modulation: ImageF64,
}

/// Full unwrapping result for both pattern axes.
#[derive(Clone, Debug)]
pub struct UnwrapResult {
    pub x: AxisMaps,
    pub y: AxisMaps,
    pub latency_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_map_accessors() {
        let map = MaskedMap::from_parts(2, 2, vec![1.0, 2.0, 3.0, 4.0], vec![true, false, true, true]);
        assert_eq!(map.get(0, 0), Some(1.0));
        assert_eq!(map.get(1, 0), None);
        assert_eq!(map.get(1, 1), Some(4.0));
        assert_eq!(map.valid_count(), 3);
        assert_eq!(map.len(), 4);
    }
}
