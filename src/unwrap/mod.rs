//! Temporal phase unwrapping pipeline.
//!
//! Overview
//! - Decodes the Gray-code frames of each axis into a half-period fringe
//!   order map using dense bit-plane arithmetic.
//! - Demodulates the N-step phase-shifted frames into a wrapped phase pair
//!   (primary and π-rotated branch) plus a modulation amplitude.
//! - Fuses order and wrapped phase per pixel through a four-case
//!   quadrant/parity decision table into a continuous absolute phase.
//! - Flags pixels whose modulation falls below the configured threshold as
//!   invalid; this is the only confidence gate in the pipeline.
//!
//! Modules
//! - [`params`] – validated configuration shared by the pipeline and CLI.
//! - [`gray`] – Gray-code conversion helpers and order-map decoding.
//! - [`phase_shift`] – N-step sinusoidal demodulation.
//! - [`fuse`] – branch selection table and order/phase fusion.
//! - [`mask`] – modulation-threshold validity masking.
//! - `pipeline` – the [`FringeUnwrapper`] orchestrating the stages.
//!
//! Key ideas
//! - The fringe order counts half periods, so branch offsets are multiples
//!   of π rather than 2π.
//! - The wrapped phase is trusted near its own branch cut only; the fusion
//!   table picks whichever of the two π-offset branches keeps the working
//!   point away from the ±π discontinuity.
//! - Bad pixels are data, not errors: they travel as an explicit validity
//!   flag and never abort a run. Structural defects (wrong frame count,
//!   invalid configuration) fail before any stage executes.

pub mod fuse;
pub mod gray;
pub mod mask;
pub mod params;
pub mod phase_shift;
mod pipeline;

pub use params::UnwrapParams;
pub use pipeline::{FringeUnwrapper, UnwrapReport};

use crate::types::Axis;
use thiserror::Error;

/// Fatal configuration or stack-structure defects, surfaced before any
/// stage runs.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum UnwrapError {
    /// Modulation threshold is negative or not finite.
    #[error("modulation threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
    /// Sine period must be a positive length in projector pixels.
    #[error("{axis} axis sine period must be positive and finite, got {period}")]
    InvalidPeriod { axis: Axis, period: f64 },
    /// Demodulation needs at least three uniformly spaced samples.
    #[error("{axis} axis needs at least 3 phase-shift steps, got {steps}")]
    TooFewSteps { axis: Axis, steps: usize },
    /// Without Gray-code frames there is no fringe order to decode.
    #[error("{axis} axis needs at least one Gray-code pattern")]
    NoGrayPatterns { axis: Axis },
    /// Order values are accumulated in a u32.
    #[error("{axis} axis Gray-code pattern count {patterns} exceeds the supported 31 bits")]
    TooManyGrayPatterns { axis: Axis, patterns: usize },
    /// Stack length does not match the layout implied by the configuration.
    #[error("frame stack holds {got} frames but the configured pattern layout requires {expected}")]
    FrameCountMismatch { expected: usize, got: usize },
}
