//! Frame stack container and the fixed projected-pattern layout.
//!
//! A capture run projects, in order: an all-white and an all-black reference
//! frame, the Gray-code frames for the x axis, the phase-stepped sine frames
//! for the x axis, then the same two groups for the y axis. `StackLayout`
//! derives the frame ranges of each group from the configured pattern counts;
//! `FrameStack` owns the frames in f64 precision and hands out slices per
//! group.
use crate::image::{ImageF64, ImageU8, ImageView};
use std::ops::Range;
use thiserror::Error;

/// Structural defects detected while assembling a stack.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("frame stack is empty")]
    Empty,
    #[error("frame {index} is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    ShapeMismatch {
        index: usize,
        got_w: usize,
        got_h: usize,
        want_w: usize,
        want_h: usize,
    },
}

/// Frame index ranges of the four pattern groups within a stack.
///
/// Frames 0 and 1 are always the white and black reference frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackLayout {
    pub gray_x: Range<usize>,
    pub sine_x: Range<usize>,
    pub gray_y: Range<usize>,
    pub sine_y: Range<usize>,
}

impl StackLayout {
    /// Derive group offsets from per-axis pattern counts.
    pub fn new(gc_x: usize, sine_x: usize, gc_y: usize, sine_y: usize) -> Self {
        let gray_x = 2..2 + gc_x;
        let sine_x = gray_x.end..gray_x.end + sine_x;
        let gray_y = sine_x.end..sine_x.end + gc_y;
        let sine_y = gray_y.end..gray_y.end + sine_y;
        Self {
            gray_x,
            sine_x,
            gray_y,
            sine_y,
        }
    }

    /// Total frame count the layout requires, references included.
    pub fn total_frames(&self) -> usize {
        self.sine_y.end
    }
}

/// Ordered, uniformly shaped stack of camera frames in f64 precision.
#[derive(Clone, Debug)]
pub struct FrameStack {
    w: usize,
    h: usize,
    frames: Vec<ImageF64>,
}

impl FrameStack {
    /// Take ownership of pre-converted frames, validating uniform shape.
    pub fn new(frames: Vec<ImageF64>) -> Result<Self, StackError> {
        let first = frames.first().ok_or(StackError::Empty)?;
        let (w, h) = (first.w, first.h);
        for (index, frame) in frames.iter().enumerate() {
            if frame.w != w || frame.h != h {
                return Err(StackError::ShapeMismatch {
                    index,
                    got_w: frame.w,
                    got_h: frame.h,
                    want_w: w,
                    want_h: h,
                });
            }
        }
        Ok(Self { w, h, frames })
    }

    /// Widen 8-bit camera frames to f64.
    pub fn from_gray_frames(frames: &[ImageU8<'_>]) -> Result<Self, StackError> {
        let converted = frames
            .iter()
            .map(|frame| {
                let mut out = ImageF64::new(frame.w, frame.h);
                for (y, src) in frame.rows().enumerate() {
                    for (x, &v) in src.iter().enumerate() {
                        out.set(x, y, v as f64);
                    }
                }
                out
            })
            .collect();
        Self::new(converted)
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.h
    }

    /// Number of frames in the stack.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Borrow the frames of one layout group.
    pub fn group(&self, range: &Range<usize>) -> &[ImageF64] {
        &self.frames[range.clone()]
    }

    /// Per-pixel binarization threshold: the mean of the white and black
    /// reference frames.
    pub fn reference_average(&self) -> ImageF64 {
        let white = &self.frames[0];
        let black = &self.frames[1];
        let mut avg = ImageF64::new(self.w, self.h);
        for (out, (&a, &b)) in avg.data.iter_mut().zip(white.data.iter().zip(&black.data)) {
            *out = (a + b) / 2.0;
        }
        avg
    }
}
