// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate angle lists handed to the Hough collaborator.

use std::f64::consts::FRAC_PI_2;

use richtwerk_core::error::{Result, RichtwerkError};

/// Refuse search spaces large enough to make the Hough vote explode.
const MAX_ANGLES: usize = 1 << 20;

/// Every `start + k·step` strictly below `stop`, in radians.
pub fn span(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(RichtwerkError::InvalidSearchSpace(format!(
            "non-finite bounds: start {start}, stop {stop}, step {step}"
        )));
    }
    if step <= 0.0 {
        return Err(RichtwerkError::InvalidSearchSpace(format!(
            "step must be positive, got {step}"
        )));
    }
    if stop <= start {
        return Err(RichtwerkError::InvalidSearchSpace(format!(
            "empty range [{start}, {stop})"
        )));
    }
    let count = ((stop - start) / step).ceil() as usize;
    if count > MAX_ANGLES {
        return Err(RichtwerkError::InvalidSearchSpace(format!(
            "{count} angles exceeds the limit of {MAX_ANGLES}"
        )));
    }

    Ok((0..count)
        .map(|k| start + k as f64 * step)
        .take_while(|&angle| angle < stop)
        .collect())
}

/// The whole `[-π/2, π/2)` range of Hough normal angles.
pub fn full_span(step: f64) -> Result<Vec<f64>> {
    span(-FRAC_PI_2, FRAC_PI_2, step)
}

/// Two narrow windows for the fine pass: one centred on the folded coarse
/// estimate and one on its orthogonal partner a quarter turn below.
/// Each spans `± multiplier × coarse` and is sampled every `fine` radians.
pub fn refine_windows(
    coarse_degrees: f64,
    coarse: f64,
    fine: f64,
    multiplier: f64,
) -> Result<Vec<f64>> {
    let half_width = multiplier * coarse;
    let mut angles = Vec::new();
    for centre in [coarse_degrees.to_radians(), (coarse_degrees - 90.0).to_radians()] {
        angles.extend(span(centre - half_width, centre + half_width, fine)?);
    }
    Ok(angles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn full_span_at_one_degree_has_180_angles() {
        let angles = full_span(PI / 180.0).unwrap();
        assert_eq!(angles.len(), 180);
        assert_eq!(angles[0], -FRAC_PI_2);
        assert!(angles.iter().all(|&a| a < FRAC_PI_2));
    }

    #[test]
    fn full_span_at_quarter_degree_has_720_angles() {
        assert_eq!(full_span(PI / 720.0).unwrap().len(), 720);
    }

    #[test]
    fn span_excludes_stop() {
        let angles = span(0.0, 1.0, 0.25).unwrap();
        assert_eq!(angles, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn bad_steps_are_rejected() {
        assert!(span(0.0, 1.0, 0.0).is_err());
        assert!(span(0.0, 1.0, -0.1).is_err());
        assert!(span(0.0, 1.0, f64::NAN).is_err());
        assert!(span(1.0, 0.0, 0.1).is_err());
        assert!(span(0.0, 1.0, 1e-12).is_err());
    }

    #[test]
    fn refine_windows_cover_both_families() {
        let coarse = PI / 180.0;
        let fine = PI / 5040.0;
        let angles = refine_windows(6.0, coarse, fine, 3.0).unwrap();

        // 6° wide windows at 1/28° steps.
        assert!((335..=338).contains(&angles.len()), "got {}", angles.len());
        let degrees: Vec<f64> = angles.iter().map(|a| a.to_degrees()).collect();
        assert!(degrees.iter().any(|d| (d - 6.0).abs() < 0.05));
        assert!(degrees.iter().any(|d| (d + 84.0).abs() < 0.05));
        assert!(degrees.iter().all(|d| (d - 6.0).abs() <= 3.0 + 1e-9 || (d + 84.0).abs() <= 3.0 + 1e-9));
    }
}
