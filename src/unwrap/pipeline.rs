//! Pipeline driving the unwrapping end-to-end.
//!
//! The [`FringeUnwrapper`] exposes a simple API: feed a frame stack and get
//! per-axis absolute phase and modulation maps with detailed diagnostics.
//! Internally it validates the configuration against the stack layout, then
//! runs Gray-code decoding, phase-shift demodulation, order/phase fusion and
//! modulation masking once per axis.
//!
//! Typical usage:
//! ```no_run
//! use fringe_unwrap::{FringeUnwrapper, UnwrapParams};
//! use fringe_unwrap::stack::FrameStack;
//!
//! # fn example(stack: FrameStack) -> Result<(), fringe_unwrap::UnwrapError> {
//! let unwrapper = FringeUnwrapper::new(UnwrapParams::default());
//! let report = unwrapper.process_with_diagnostics(&stack)?;
//! println!("x valid pixels: {}", report.diagnostics.x.valid_pixels);
//! # Ok(())
//! # }
//! ```
use super::fuse::unwrap_axis;
use super::gray::decode_order_map;
use super::mask::mask_by_modulation;
use super::params::UnwrapParams;
use super::phase_shift::demodulate;
use super::UnwrapError;
use crate::diagnostics::{AxisReport, TimingBreakdown, UnwrapDiagnostics};
use crate::image::ImageF64;
use crate::stack::FrameStack;
use crate::types::{Axis, AxisMaps, UnwrapResult};
use log::debug;
use std::ops::Range;
use std::time::Instant;

/// Unwrapping result together with its run diagnostics.
#[derive(Clone, Debug)]
pub struct UnwrapReport {
    pub result: UnwrapResult,
    pub diagnostics: UnwrapDiagnostics,
}

/// Batch unwrapper for a fixed pattern configuration.
pub struct FringeUnwrapper {
    params: UnwrapParams,
}

impl FringeUnwrapper {
    /// Create an unwrapper with the supplied parameters.
    pub fn new(params: UnwrapParams) -> Self {
        Self { params }
    }

    /// Borrow the active parameters.
    pub fn params(&self) -> &UnwrapParams {
        &self.params
    }

    /// Run the pipeline, returning a compact result.
    pub fn process(&self, stack: &FrameStack) -> Result<UnwrapResult, UnwrapError> {
        self.process_with_diagnostics(stack).map(|r| r.result)
    }

    /// Run the pipeline and return both the result and a detailed report.
    pub fn process_with_diagnostics(
        &self,
        stack: &FrameStack,
    ) -> Result<UnwrapReport, UnwrapError> {
        self.params.validate()?;
        let layout = self.params.layout();
        if stack.len() != layout.total_frames() {
            return Err(UnwrapError::FrameCountMismatch {
                expected: layout.total_frames(),
                got: stack.len(),
            });
        }

        let (width, height) = (stack.width(), stack.height());
        debug!(
            "FringeUnwrapper::process start w={} h={} frames={}",
            width,
            height,
            stack.len()
        );
        let total_start = Instant::now();

        let avg = stack.reference_average();
        let (x, x_report) = run_axis(
            Axis::X,
            stack,
            &avg,
            &layout.gray_x,
            &layout.sine_x,
            self.params.modulation_threshold,
        );
        let (y, y_report) = run_axis(
            Axis::Y,
            stack,
            &avg,
            &layout.gray_y,
            &layout.sine_y,
            self.params.modulation_threshold,
        );

        let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "FringeUnwrapper::process done total_ms={:.3} valid_x={} valid_y={}",
            total_ms, x_report.valid_pixels, y_report.valid_pixels
        );

        Ok(UnwrapReport {
            result: UnwrapResult {
                x,
                y,
                latency_ms: total_ms,
            },
            diagnostics: UnwrapDiagnostics {
                width,
                height,
                total_ms,
                x: x_report,
                y: y_report,
            },
        })
    }
}

fn run_axis(
    axis: Axis,
    stack: &FrameStack,
    avg: &ImageF64,
    gray_range: &Range<usize>,
    sine_range: &Range<usize>,
    threshold: f64,
) -> (AxisMaps, AxisReport) {
    let mut timing = TimingBreakdown::default();
    let axis_start = Instant::now();

    let stage_start = Instant::now();
    let orders = decode_order_map(stack.group(gray_range), avg);
    timing.push("gray_decode", stage_start.elapsed().as_secs_f64() * 1000.0);

    let stage_start = Instant::now();
    let wrapped = demodulate(stack.group(sine_range));
    timing.push("demodulate", stage_start.elapsed().as_secs_f64() * 1000.0);

    let stage_start = Instant::now();
    let fused = unwrap_axis(&orders, &wrapped);
    timing.push("fuse", stage_start.elapsed().as_secs_f64() * 1000.0);

    let stage_start = Instant::now();
    let phase = mask_by_modulation(fused, &wrapped.modulation, threshold);
    timing.push("mask", stage_start.elapsed().as_secs_f64() * 1000.0);

    timing.total_ms = axis_start.elapsed().as_secs_f64() * 1000.0;

    let total_pixels = phase.len();
    let valid_pixels = phase.valid_count();
    let (order_min, order_max) = orders.range();
    let mean_modulation = if total_pixels > 0 {
        wrapped.modulation.data.iter().sum::<f64>() / total_pixels as f64
    } else {
        0.0
    };
    let report = AxisReport {
        axis,
        total_pixels,
        valid_pixels,
        masked_pixels: total_pixels - valid_pixels,
        order_min,
        order_max,
        mean_modulation,
        timing,
    };

    (
        AxisMaps {
            phase,
            modulation: wrapped.modulation,
        },
        report,
    )
}
