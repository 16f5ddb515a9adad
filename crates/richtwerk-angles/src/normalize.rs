// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orthogonal normalisation of skew estimates.

/// Fold an estimate in degrees into the canonical skew range around zero.
///
/// Estimates above 45° are taken to come from the vertical line family and
/// lose 90°; estimates below -45° gain 90°. The shift repeats until the value
/// lies in `[-45°, 45°]`, so any finite input is handled.
pub fn normalize_skew_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return degrees;
    }
    let mut x = degrees;
    while x > 45.0 {
        x -= 90.0;
    }
    while x < -45.0 {
        x += 90.0;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_vertical_family() {
        assert_eq!(normalize_skew_degrees(50.0), -40.0);
        assert_eq!(normalize_skew_degrees(-50.0), 40.0);
        assert_eq!(normalize_skew_degrees(30.0), 30.0);
        assert_eq!(normalize_skew_degrees(87.0), -3.0);
        assert_eq!(normalize_skew_degrees(-88.0), 2.0);
    }

    #[test]
    fn boundaries_pass_through() {
        assert_eq!(normalize_skew_degrees(45.0), 45.0);
        assert_eq!(normalize_skew_degrees(-45.0), -45.0);
        assert_eq!(normalize_skew_degrees(0.0), 0.0);
    }

    #[test]
    fn full_turn_estimates_are_folded() {
        assert_eq!(normalize_skew_degrees(178.0), -2.0);
        assert_eq!(normalize_skew_degrees(-179.0), 1.0);
    }
}
