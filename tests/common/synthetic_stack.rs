use fringe_unwrap::image::ImageF64;
use fringe_unwrap::unwrap::gray::binary_to_gray;
use fringe_unwrap::UnwrapParams;
use std::f64::consts::TAU;

pub const WHITE: f64 = 200.0;
pub const BLACK: f64 = 0.0;

/// Renders a full analytic pattern stack for given per-pixel targets.
///
/// `order_*` supplies the half-period fringe order encoded into the
/// Gray-code frames; `phi_*` the absolute phase driving the sine frames;
/// `amp` the sinusoid amplitude. All closures receive `(col, row)`.
#[allow(clippy::too_many_arguments)]
pub fn analytic_stack(
    w: usize,
    h: usize,
    params: &UnwrapParams,
    offset: f64,
    amp: impl Fn(usize, usize) -> f64,
    order_x: impl Fn(usize, usize) -> u32,
    phi_x: impl Fn(usize, usize) -> f64,
    order_y: impl Fn(usize, usize) -> u32,
    phi_y: impl Fn(usize, usize) -> f64,
) -> Vec<ImageF64> {
    assert!(w > 0 && h > 0, "stack dimensions must be positive");

    let mut frames = Vec::with_capacity(params.layout().total_frames());

    let mut white = ImageF64::new(w, h);
    white.data.fill(WHITE);
    frames.push(white);
    let mut black = ImageF64::new(w, h);
    black.data.fill(BLACK);
    frames.push(black);

    push_gray_frames(&mut frames, w, h, params.gc_patterns_x, &order_x);
    push_sine_frames(&mut frames, w, h, params.sine_patterns_x, offset, &amp, &phi_x);
    push_gray_frames(&mut frames, w, h, params.gc_patterns_y, &order_y);
    push_sine_frames(&mut frames, w, h, params.sine_patterns_y, offset, &amp, &phi_y);

    frames
}

fn push_gray_frames(
    frames: &mut Vec<ImageF64>,
    w: usize,
    h: usize,
    bits: usize,
    order: &impl Fn(usize, usize) -> u32,
) {
    for p in 0..bits {
        let mut frame = ImageF64::new(w, h);
        for row in 0..h {
            for col in 0..w {
                let gray = binary_to_gray(order(col, row));
                assert!(
                    gray < (1 << bits),
                    "order {} needs more than {bits} Gray bits",
                    order(col, row)
                );
                let bit = (gray >> (bits - 1 - p)) & 1;
                frame.set(col, row, if bit == 1 { WHITE } else { BLACK });
            }
        }
        frames.push(frame);
    }
}

fn push_sine_frames(
    frames: &mut Vec<ImageF64>,
    w: usize,
    h: usize,
    steps: usize,
    offset: f64,
    amp: &impl Fn(usize, usize) -> f64,
    phi: &impl Fn(usize, usize) -> f64,
) {
    for i in 0..steps {
        let shift = TAU * i as f64 / steps as f64;
        let mut frame = ImageF64::new(w, h);
        for row in 0..h {
            for col in 0..w {
                frame.set(col, row, offset + amp(col, row) * (phi(col, row) - shift).cos());
            }
        }
        frames.push(frame);
    }
}
