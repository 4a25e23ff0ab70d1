//! Fusion of fringe order and wrapped phase into absolute phase.
//!
//! The wrapped phase fixes the position inside one half period; the decoded
//! order says which half period the pixel is in. Their combination has a
//! two-fold ambiguity because the demodulator cannot distinguish a phase from
//! its π-rotated twin at the wrap boundary. The resolution is a lookup on two
//! booleans per pixel:
//!
//! | primary in [−π/2, π/2) | order parity | branch  | offset       |
//! |------------------------|--------------|---------|--------------|
//! | yes                    | even         | primary | order·π      |
//! | yes                    | odd          | primary | (order+1)·π  |
//! | no                     | even         | rotated | (order+1)·π  |
//! | no                     | odd          | rotated | order·π      |
//!
//! The chosen branch always has its zero crossing at least π/2 away from the
//! pixel's working point, and the parity correction keeps consecutive half
//! periods joining without 2π jumps. The fused value is congruent to the
//! wrapped phase modulo 2π at every pixel.
use super::gray::OrderMap;
use super::phase_shift::WrappedPhase;
use crate::types::MaskedMap;
use std::f64::consts::{FRAC_PI_2, PI};

/// Which of the two π-offset wrapped branches a pixel uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    Primary,
    Rotated,
}

/// One row of the fusion decision table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchChoice {
    pub branch: Branch,
    /// Half periods added on top of the decoded order.
    pub extra_half_periods: u32,
}

/// The four-case decision table on (central band, order parity).
pub const fn choose_branch(central: bool, odd_order: bool) -> BranchChoice {
    match (central, odd_order) {
        (true, false) => BranchChoice {
            branch: Branch::Primary,
            extra_half_periods: 0,
        },
        (true, true) => BranchChoice {
            branch: Branch::Primary,
            extra_half_periods: 1,
        },
        (false, false) => BranchChoice {
            branch: Branch::Rotated,
            extra_half_periods: 1,
        },
        (false, true) => BranchChoice {
            branch: Branch::Rotated,
            extra_half_periods: 0,
        },
    }
}

/// Fuse one pixel's order and wrapped phase pair.
#[inline]
pub fn fuse_pixel(primary: f64, rotated: f64, order: u32) -> f64 {
    let central = (-FRAC_PI_2..FRAC_PI_2).contains(&primary);
    let choice = choose_branch(central, order % 2 == 1);
    let base = match choice.branch {
        Branch::Primary => primary,
        Branch::Rotated => rotated,
    };
    base + (order + choice.extra_half_periods) as f64 * PI
}

/// Fuse a whole axis. Every pixel is defined at this stage; validity is
/// decided afterwards by the modulation mask.
pub fn unwrap_axis(orders: &OrderMap, wrapped: &WrappedPhase) -> MaskedMap {
    let (w, h) = (orders.w, orders.h);
    debug_assert_eq!((wrapped.primary.w, wrapped.primary.h), (w, h));
    let mut data = vec![0.0f64; w * h];
    for (i, out) in data.iter_mut().enumerate() {
        *out = fuse_pixel(
            wrapped.primary.data[i],
            wrapped.rotated.data[i],
            orders.data[i],
        );
    }
    MaskedMap::from_parts(w, h, data, vec![true; w * h])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn decision_table_cases() {
        assert_eq!(
            choose_branch(true, false),
            BranchChoice {
                branch: Branch::Primary,
                extra_half_periods: 0
            }
        );
        assert_eq!(
            choose_branch(true, true),
            BranchChoice {
                branch: Branch::Primary,
                extra_half_periods: 1
            }
        );
        assert_eq!(
            choose_branch(false, false),
            BranchChoice {
                branch: Branch::Rotated,
                extra_half_periods: 1
            }
        );
        assert_eq!(
            choose_branch(false, true),
            BranchChoice {
                branch: Branch::Rotated,
                extra_half_periods: 0
            }
        );
    }

    fn wrap(mut phi: f64) -> f64 {
        while phi > std::f64::consts::PI {
            phi -= TAU;
        }
        while phi <= -std::f64::consts::PI {
            phi += TAU;
        }
        phi
    }

    #[test]
    fn fused_pixel_reconstructs_a_ramp() {
        // Sweep an absolute phase through several half periods and confirm
        // the table puts every sample back where it came from.
        let mut phi = 0.01;
        while phi < 8.0 * PI {
            let order = (phi / PI).floor() as u32;
            let primary = wrap(phi);
            let rotated = wrap(phi - PI);
            let fused = fuse_pixel(primary, rotated, order);
            assert!(
                (fused - phi).abs() < 1e-9,
                "phi={phi}: fused={fused}, order={order}"
            );
            phi += 0.0737;
        }
    }

    #[test]
    fn fused_value_matches_selected_branch_modulo_two_pi() {
        for &phi in &[0.2, 1.9, -2.8, 2.9, -0.4] {
            for order in 0..6u32 {
                let fused = fuse_pixel(phi, wrap(phi - PI), order);
                let reduced = wrap(fused);
                assert!(
                    (reduced - phi).abs() < 1e-9,
                    "phi={phi} order={order}: reduced={reduced}"
                );
            }
        }
    }
}
