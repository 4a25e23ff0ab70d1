#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod flatness;
pub mod image;
pub mod stack;
pub mod types;
pub mod unwrap;

// Tool-facing configuration loaders for the demo binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::unwrap::{FringeUnwrapper, UnwrapError, UnwrapParams, UnwrapReport};
pub use crate::types::{AxisMaps, MaskedMap, UnwrapResult};

// Flatness analysis on top of an unwrapped phase map.
pub use crate::flatness::{deviation_map, fit_surface, PolySurface, SurfaceFitError};

// Stack assembly for callers that load their own frames.
pub use crate::stack::{FrameStack, StackError, StackLayout};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use fringe_unwrap::prelude::*;
///
/// # fn main() {
/// let params = UnwrapParams::for_projector(1280, 800, 16.0, 16);
/// let frames: Vec<ImageF64> = (0..params.layout().total_frames())
///     .map(|_| ImageF64::new(64, 48))
///     .collect();
/// let stack = FrameStack::new(frames).expect("uniform frames");
///
/// let unwrapper = FringeUnwrapper::new(params);
/// let result = unwrapper.process(&stack).expect("layout matches");
/// println!(
///     "valid x pixels: {}/{} latency_ms={:.3}",
///     result.x.phase.valid_count(),
///     result.x.phase.len(),
///     result.latency_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageF64;
    pub use crate::stack::FrameStack;
    pub use crate::types::{MaskedMap, UnwrapResult};
    pub use crate::unwrap::{FringeUnwrapper, UnwrapParams};
}
