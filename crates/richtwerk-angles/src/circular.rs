// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Circular arithmetic on angles in radians.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Beyond this magnitude the shift loops below would spin for a long time,
/// so the bulk of the reduction is done with `rem_euclid` first.
const LOOP_LIMIT: f64 = 64.0 * PI;

/// Map any finite angle into `[-π, π)` by whole-turn shifts.
///
/// Values already inside the range are returned bit-for-bit unchanged, which
/// makes the function exactly idempotent. Non-finite input is passed through.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut x = if angle.abs() > LOOP_LIMIT {
        angle.rem_euclid(TAU)
    } else {
        angle
    };
    while x < -PI {
        x += TAU;
    }
    while x >= PI {
        x -= TAU;
    }
    x
}

/// Shortest unsigned angular separation between `a` and `b`, in `[0, π]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    normalize_angle(a - b).abs()
}

/// Fold a Hough normal angle onto the quarter turn `[0, π/2)`.
///
/// Horizontal and vertical line families of a skewed page sit a quarter
/// turn apart, so after folding both land on the same angle.
pub fn fold_orthogonal(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let mut x = angle;
    while x < 0.0 {
        x += FRAC_PI_2;
    }
    while x >= FRAC_PI_2 {
        x -= FRAC_PI_2;
    }
    x
}

/// Weighted resultant vector `Σ w·(cos θ, sin θ)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resultant {
    x: f64,
    y: f64,
    weight: f64,
}

impl Resultant {
    pub fn push(&mut self, angle: f64, weight: f64) {
        self.x += weight * angle.cos();
        self.y += weight * angle.sin();
        self.weight += weight;
    }

    /// Total weight pushed so far.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Length of the resultant relative to the total weight, in `[0, 1]`.
    /// Close to 1 means tightly concentrated angles.
    pub fn concentration(&self) -> f64 {
        if self.weight <= 0.0 {
            return 0.0;
        }
        self.x.hypot(self.y) / self.weight
    }

    /// Direction of the resultant in `(-π, π]`.
    pub fn phase(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl FromIterator<(f64, f64)> for Resultant {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut resultant = Resultant::default();
        for (angle, weight) in iter {
            resultant.push(angle, weight);
        }
        resultant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBES: [f64; 12] = [
        0.0, 0.3, -0.3, PI, -PI, 3.5, -3.5, 7.0, -12.25, 100.0, 1.0e6, -1.0e9,
    ];

    #[test]
    fn normalize_lands_in_half_open_range() {
        for &x in &PROBES {
            let n = normalize_angle(x);
            assert!((-PI..PI).contains(&n), "normalize({x}) = {n}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for &x in &PROBES {
            let once = normalize_angle(x);
            assert_eq!(normalize_angle(once), once);
        }
    }

    #[test]
    fn normalize_maps_pi_to_minus_pi() {
        assert_eq!(normalize_angle(PI), -PI);
        assert_eq!(normalize_angle(-PI), -PI);
    }

    #[test]
    fn normalize_preserves_direction() {
        for &x in &PROBES {
            let n = normalize_angle(x);
            assert!((n.cos() - x.cos()).abs() < 1e-6);
            assert!((n.sin() - x.sin()).abs() < 1e-6);
        }
    }

    #[test]
    fn distance_is_symmetric_and_bounded() {
        for &a in &PROBES {
            for &b in &PROBES {
                let d = angular_distance(a, b);
                assert!((d - angular_distance(b, a)).abs() < 1e-9);
                assert!((0.0..=PI).contains(&d), "d({a}, {b}) = {d}");
            }
        }
    }

    #[test]
    fn distance_wraps_around() {
        let d = angular_distance(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-12);
    }

    #[test]
    fn fold_puts_both_families_together() {
        let skew = 2.0_f64.to_radians();
        let vertical = fold_orthogonal(skew);
        let horizontal = fold_orthogonal(skew - FRAC_PI_2);
        assert!((vertical - horizontal).abs() < 1e-12);

        let negative = fold_orthogonal(-skew);
        assert!((negative - (FRAC_PI_2 - skew)).abs() < 1e-12);
    }

    #[test]
    fn resultant_of_opposite_unit_vectors_cancels() {
        let r: Resultant = [(0.0, 1.0), (PI, 1.0)].into_iter().collect();
        assert!(r.concentration() < 1e-12);
        assert_eq!(r.weight(), 2.0);
    }

    #[test]
    fn resultant_phase_handles_wraparound() {
        let r: Resultant = [(PI - 0.1, 1.0), (-PI + 0.1, 1.0)].into_iter().collect();
        assert!((r.phase().abs() - PI).abs() < 1e-12);
    }
}
