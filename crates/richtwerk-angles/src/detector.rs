// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contract with the Hough collaborator. The estimation core never touches
// pixels; it asks a `LineDetector` for peaks over a list of candidate angles.

use richtwerk_core::config::{HoughConfig, RefineConfig};
use richtwerk_core::error::Result;
use richtwerk_core::HoughPeak;

/// Peak extraction limits for one Hough request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakRequest {
    pub num_peaks: usize,
    /// Peaks below `threshold_ratio × strongest cell` are ignored.
    pub threshold_ratio: f64,
    /// Suppression radius along the candidate-angle list, in entries.
    pub min_angle: usize,
    /// Suppression radius along the offset axis, in pixels.
    pub min_distance: usize,
}

impl PeakRequest {
    /// Limits for a full-span search.
    pub fn full_span(hough: &HoughConfig) -> Self {
        Self {
            num_peaks: hough.num_peaks,
            threshold_ratio: hough.threshold_ratio,
            min_angle: hough.min_angle,
            min_distance: hough.min_distance,
        }
    }

    /// Limits for either refinement stage.
    pub fn refinement(hough: &HoughConfig, refine: &RefineConfig) -> Self {
        Self {
            num_peaks: refine.num_peaks,
            threshold_ratio: refine.threshold_ratio,
            min_angle: hough.min_angle,
            min_distance: hough.min_distance,
        }
    }
}

/// Anything that can report Hough line peaks over a set of candidate angles.
pub trait LineDetector {
    /// Vote over `angles` (radians) and return the peaks, strongest first.
    fn detect_lines(&self, angles: &[f64], request: &PeakRequest) -> Result<Vec<HoughPeak>>;
}

impl<F> LineDetector for F
where
    F: Fn(&[f64], &PeakRequest) -> Result<Vec<HoughPeak>>,
{
    fn detect_lines(&self, angles: &[f64], request: &PeakRequest) -> Result<Vec<HoughPeak>> {
        self(angles, request)
    }
}
