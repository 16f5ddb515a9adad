// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Skew estimation pipeline:
//
//   AngleAccumulator → ModeFinder → ClusterAssigner → CircularEstimator (×2)
//     → normalize_skew_degrees → RotationPlanner
//
// The same chain serves the two-cluster and single-pass variants; the
// iterative variant wraps it twice (see `refine`).

use richtwerk_core::config::{EstimatorKind, PipelineKind};
use richtwerk_core::error::Result;
use richtwerk_core::{AngleSample, ClusterEstimate, DeskewConfig, HoughPeak, Modes, SkewReport};
use tracing::{debug, info, instrument};

use crate::accumulator::AngleAccumulator;
use crate::circular::fold_orthogonal;
use crate::cluster::{ClusterAssigner, Clusters};
use crate::detector::{LineDetector, PeakRequest};
use crate::estimator::estimator_for;
use crate::modes::ModeFinder;
use crate::normalize::normalize_skew_degrees;
use crate::planner::RotationPlanner;
use crate::refine::IterativeRefiner;
use crate::search_space::full_span;

/// Everything one accumulate-cluster-estimate pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPass {
    pub sample_count: usize,
    pub modes: Modes,
    pub clusters: Clusters,
    /// Estimates of the first and second cluster, in radians.
    pub estimates: [f64; 2],
}

impl ClusterPass {
    /// Per-cluster diagnostics, first cluster first.
    pub fn cluster_estimates(&self) -> Vec<ClusterEstimate> {
        self.clusters
            .iter()
            .zip(self.estimates)
            .map(|(cluster, estimate)| {
                let raw_degrees = estimate.to_degrees();
                ClusterEstimate {
                    size: cluster.len(),
                    raw_degrees,
                    normalized_degrees: normalize_skew_degrees(raw_degrees),
                }
            })
            .collect()
    }
}

/// Runs the estimation chain with the constants of one [`DeskewConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SkewPipeline<'a> {
    config: &'a DeskewConfig,
}

impl<'a> SkewPipeline<'a> {
    pub fn new(config: &'a DeskewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a DeskewConfig {
        self.config
    }

    /// Accumulate, find modes, assign clusters, and estimate both clusters.
    pub fn cluster_pass(&self, samples: &[AngleSample], kind: EstimatorKind) -> Result<ClusterPass> {
        let histogram =
            AngleAccumulator::new(self.config.quantization_steps_per_degree).accumulate(samples)?;
        let modes = ModeFinder::new(self.config.separation_threshold).find(&histogram)?;
        let clusters = ClusterAssigner.assign(&histogram, &modes);

        let estimator = estimator_for(kind, self.config.trim_fraction);
        let first = estimator.estimate(&clusters.first)?;
        let second = if clusters.single_family {
            first
        } else {
            estimator.estimate(&clusters.second)?
        };

        debug!(
            estimator = %kind,
            first_deg = first.to_degrees(),
            second_deg = second.to_degrees(),
            "Cluster estimates"
        );
        Ok(ClusterPass {
            sample_count: samples.len(),
            modes,
            clusters,
            estimates: [first, second],
        })
    }

    /// Fold every sample onto `[0°, 90°)`, run a cluster pass, and return the
    /// dominant cluster's estimate in folded degrees.
    pub fn folded_pass(
        &self,
        samples: &[AngleSample],
        kind: EstimatorKind,
    ) -> Result<(ClusterPass, f64)> {
        let folded: Vec<AngleSample> = samples
            .iter()
            .map(|s| AngleSample::new(fold_orthogonal(s.angle), s.magnitude))
            .collect();
        let pass = self.cluster_pass(&folded, kind)?;
        let estimate = fold_orthogonal(pass.estimates[0]).to_degrees();
        Ok((pass, estimate))
    }

    /// Two line families: negated mean of both normalised cluster estimates.
    #[instrument(skip_all, fields(samples = samples.len()))]
    pub fn two_cluster(&self, samples: &[AngleSample]) -> Result<SkewReport> {
        let kind = self.config.two_cluster_estimator;
        let pass = self.cluster_pass(samples, kind)?;
        let rotation = RotationPlanner.two_cluster(
            pass.estimates[0].to_degrees(),
            pass.estimates[1].to_degrees(),
        );
        info!(%rotation, "Two-cluster rotation estimated");

        Ok(SkewReport {
            pipeline: PipelineKind::TwoCluster,
            estimator: kind,
            sample_count: pass.sample_count,
            modes: pass.modes,
            clusters: pass.cluster_estimates(),
            coarse_degrees: None,
            refined_degrees: None,
            rotation,
        })
    }

    /// Folded angles, one estimate: the negated normalised dominant estimate.
    #[instrument(skip_all, fields(samples = samples.len()))]
    pub fn single_pass(&self, samples: &[AngleSample]) -> Result<SkewReport> {
        let kind = self.config.single_pass_estimator;
        let (pass, estimate) = self.folded_pass(samples, kind)?;
        let rotation = RotationPlanner.single(estimate);
        info!(%rotation, estimate, "Single-pass rotation estimated");

        let mut clusters = pass.cluster_estimates();
        clusters.truncate(1);
        Ok(SkewReport {
            pipeline: PipelineKind::SinglePass,
            estimator: kind,
            sample_count: pass.sample_count,
            modes: pass.modes,
            clusters,
            coarse_degrees: None,
            refined_degrees: None,
            rotation,
        })
    }

    /// Ask `detector` for peaks and run the configured pipeline over them.
    #[instrument(skip_all, fields(pipeline = %self.config.pipeline))]
    pub fn run(&self, detector: &impl LineDetector) -> Result<SkewReport> {
        match self.config.pipeline {
            PipelineKind::Iterative => IterativeRefiner::new(self.config).refine(detector),
            PipelineKind::TwoCluster | PipelineKind::SinglePass => {
                let angles = full_span(self.config.hough.resolution)?;
                let request = PeakRequest::full_span(&self.config.hough);
                let samples = to_samples(&detector.detect_lines(&angles, &request)?);
                debug!(
                    angles = angles.len(),
                    peaks = samples.len(),
                    "Full-span Hough peaks received"
                );
                if self.config.pipeline == PipelineKind::TwoCluster {
                    self.two_cluster(&samples)
                } else {
                    self.single_pass(&samples)
                }
            }
        }
    }
}

/// Keep only `(angle, magnitude)` of each peak.
pub(crate) fn to_samples(peaks: &[HoughPeak]) -> Vec<AngleSample> {
    peaks.iter().copied().map(AngleSample::from).collect()
}
