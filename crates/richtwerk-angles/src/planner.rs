// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotation planning: turns normalised estimates into the correction angle.
// The correction always counteracts the measured skew, hence the negations.

use richtwerk_core::RotationAngle;

use crate::normalize::normalize_skew_degrees;

/// Combines per-cluster estimates into the final correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationPlanner;

impl RotationPlanner {
    /// Negated mean of two estimates (degrees), each normalised first.
    pub fn two_cluster(&self, first_degrees: f64, second_degrees: f64) -> RotationAngle {
        let first = normalize_skew_degrees(first_degrees);
        let second = normalize_skew_degrees(second_degrees);
        RotationAngle(-(first + second) / 2.0)
    }

    /// Negated normalised estimate (degrees).
    pub fn single(&self, estimate_degrees: f64) -> RotationAngle {
        RotationAngle(-normalize_skew_degrees(estimate_degrees))
    }

    /// Pick the smaller of the direct correction `-θ` and the complement
    /// correction `90° - θ` for a folded estimate `θ` (degrees).
    /// On a tie the direct correction wins.
    pub fn smaller_of_complements(&self, folded_degrees: f64) -> RotationAngle {
        let direct = -folded_degrees;
        let complement = 90.0 - folded_degrees;
        if complement.abs() < direct.abs() {
            RotationAngle(complement)
        } else {
            RotationAngle(direct)
        }
    }
}
