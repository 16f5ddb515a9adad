// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Richtwerk skew estimation.

use serde::{Deserialize, Serialize};

use crate::config::{EstimatorKind, PipelineKind};

/// One candidate line angle with its Hough vote count.
///
/// `angle` is in radians. Depending on the pipeline it is either a raw Hough
/// normal angle in `[-π/2, π/2)` or an orthogonally folded angle in `[0, π/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSample {
    pub angle: f64,
    pub magnitude: f64,
}

impl AngleSample {
    pub fn new(angle: f64, magnitude: f64) -> Self {
        Self { angle, magnitude }
    }

    /// Build a sample from an angle given in degrees.
    pub fn from_degrees(degrees: f64, magnitude: f64) -> Self {
        Self {
            angle: degrees.to_radians(),
            magnitude,
        }
    }

    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// A single peak reported by the Hough collaborator.
///
/// `angle` is the line normal in radians, `offset` its signed distance from
/// the origin in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoughPeak {
    pub magnitude: f64,
    pub angle: f64,
    pub offset: f64,
}

impl From<HoughPeak> for AngleSample {
    fn from(peak: HoughPeak) -> Self {
        AngleSample::new(peak.angle, peak.magnitude)
    }
}

/// A histogram entry selected as the centre of a line family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// Angle in radians.
    pub angle: f64,
    pub magnitude: f64,
}

impl Mode {
    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// The dominant mode and, when one exists, the strongest mode far enough
/// away from it to belong to the orthogonal line family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modes {
    pub primary: Mode,
    pub secondary: Option<Mode>,
}

/// An angle-sorted group of samples belonging to one line family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    samples: Vec<AngleSample>,
}

impl Cluster {
    /// Build a cluster, sorting the samples by ascending angle.
    pub fn from_samples(mut samples: Vec<AngleSample>) -> Self {
        samples.sort_by(|a, b| a.angle.total_cmp(&b.angle));
        Self { samples }
    }

    pub fn samples(&self) -> &[AngleSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngleSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sum of all sample magnitudes.
    pub fn total_weight(&self) -> f64 {
        self.samples.iter().map(|s| s.magnitude).sum()
    }
}

/// Final correction angle in degrees. Positive values rotate the source
/// image clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RotationAngle(pub f64);

impl RotationAngle {
    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for RotationAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Estimate produced for one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterEstimate {
    /// Number of histogram entries in the cluster.
    pub size: usize,
    /// Raw estimator output in degrees.
    pub raw_degrees: f64,
    /// Estimate after folding into the canonical ±45° skew range.
    pub normalized_degrees: f64,
}

impl ClusterEstimate {
    /// The correction this cluster alone would suggest.
    pub fn suggested_rotation(&self) -> RotationAngle {
        RotationAngle(-self.normalized_degrees)
    }
}

/// Structured diagnostics for one skew estimation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkewReport {
    pub pipeline: PipelineKind,
    pub estimator: EstimatorKind,
    /// Number of angle samples fed into the final pass.
    pub sample_count: usize,
    pub modes: Modes,
    pub clusters: Vec<ClusterEstimate>,
    /// Stage-one estimate in folded degrees (iterative pipeline only).
    pub coarse_degrees: Option<f64>,
    /// Stage-two estimate in folded degrees (iterative pipeline only).
    pub refined_degrees: Option<f64>,
    pub rotation: RotationAngle,
}

/// Width and height of a raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}
