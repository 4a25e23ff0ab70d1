mod common;

use common::synthetic_stack::analytic_stack;
use fringe_unwrap::stack::FrameStack;
use fringe_unwrap::{deviation_map, fit_surface, FringeUnwrapper, SurfaceFitError, UnwrapParams};
use std::f64::consts::TAU;

fn ramp_phase_map() -> fringe_unwrap::MaskedMap {
    let params = UnwrapParams {
        gc_patterns_x: 3,
        gc_patterns_y: 1,
        sine_patterns_x: 16,
        sine_patterns_y: 16,
        modulation_threshold: 4.0,
        ..Default::default()
    };
    let (w, h) = (48, 12);
    let pitch = TAU / 16.0;
    let phi_of_col = move |col: usize| 0.02 + pitch * col as f64;
    let frames = analytic_stack(
        w,
        h,
        &params,
        100.0,
        |_, _| 50.0,
        move |col, _| (phi_of_col(col) / std::f64::consts::PI).floor() as u32,
        move |col, _| phi_of_col(col),
        |_, _| 0,
        |_, _| 0.5,
    );
    let stack = FrameStack::new(frames).unwrap();
    FringeUnwrapper::new(params)
        .process(&stack)
        .unwrap()
        .x
        .phase
}

#[test]
fn unwrapped_ramp_fits_a_plane_with_zero_deviation() {
    let phase = ramp_phase_map();
    let surface = fit_surface(&phase, 1).unwrap();

    // The ramp is linear in the column coordinate only.
    let pitch = TAU / 16.0;
    assert!((surface.coeffs[0] - 0.02).abs() < 1e-6, "constant {}", surface.coeffs[0]);
    assert!(surface.coeffs[1].abs() < 1e-6, "row slope {}", surface.coeffs[1]);
    assert!((surface.coeffs[2] - pitch).abs() < 1e-6, "column slope {}", surface.coeffs[2]);

    let deviation = deviation_map(&phase, &surface);
    for (i, (&d, &ok)) in deviation.data.iter().zip(&deviation.valid).enumerate() {
        assert!(ok, "pixel {i} unexpectedly invalid");
        assert!(d.abs() < 1e-6, "residual {d} at pixel {i}");
    }
}

#[test]
fn deviation_keeps_masked_pixels_invalid() {
    let mut phase = ramp_phase_map();
    for i in (0..phase.len()).step_by(7) {
        phase.valid[i] = false;
    }
    let invalid_before: Vec<usize> = (0..phase.len()).filter(|&i| !phase.valid[i]).collect();

    let surface = fit_surface(&phase, 1).unwrap();
    let deviation = deviation_map(&phase, &surface);

    for &i in &invalid_before {
        assert!(!deviation.valid[i], "pixel {i} should stay invalid");
    }
    assert_eq!(deviation.valid_count(), phase.valid_count());
}

#[test]
fn degenerate_degree_is_reported_with_counts() {
    let mut phase = ramp_phase_map();
    let keep = 4usize;
    for i in keep..phase.len() {
        phase.valid[i] = false;
    }
    match fit_surface(&phase, 2) {
        Err(SurfaceFitError::NotEnoughPoints {
            degree,
            required,
            got,
        }) => {
            assert_eq!(degree, 2);
            assert_eq!(required, 6);
            assert_eq!(got, keep);
        }
        other => panic!("expected NotEnoughPoints, got {other:?}"),
    }
}
