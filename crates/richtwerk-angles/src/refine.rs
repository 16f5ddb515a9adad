// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Two-pass refinement.
//
// Stage one searches the full half turn at a coarse step and keeps only the
// strong peaks. Stage two re-asks the detector for two narrow windows, around
// the coarse estimate and a quarter turn below it, at a much finer step. Both
// stages fold peaks onto [0°, 90°) before clustering.

use richtwerk_core::config::PipelineKind;
use richtwerk_core::error::Result;
use richtwerk_core::{DeskewConfig, SkewReport};
use tracing::{debug, info, instrument};

use crate::detector::{LineDetector, PeakRequest};
use crate::pipeline::{SkewPipeline, to_samples};
use crate::planner::RotationPlanner;
use crate::search_space::{full_span, refine_windows};

/// Coarse-then-fine skew estimation through a [`LineDetector`].
#[derive(Debug, Clone, Copy)]
pub struct IterativeRefiner<'a> {
    config: &'a DeskewConfig,
}

impl<'a> IterativeRefiner<'a> {
    pub fn new(config: &'a DeskewConfig) -> Self {
        Self { config }
    }

    /// Stage one: folded estimate (degrees) from a coarse full-span search.
    pub fn coarse(&self, detector: &impl LineDetector) -> Result<f64> {
        let refine = &self.config.refine;
        let angles = full_span(refine.coarse_resolution)?;
        let request = PeakRequest::refinement(&self.config.hough, refine);
        let samples = to_samples(&detector.detect_lines(&angles, &request)?);
        debug!(angles = angles.len(), peaks = samples.len(), "Coarse Hough peaks received");

        let (_, estimate) =
            SkewPipeline::new(self.config).folded_pass(&samples, self.config.coarse_estimator)?;
        Ok(estimate)
    }

    /// Run both stages and pick the smaller of the two complementary
    /// corrections for the refined estimate.
    #[instrument(skip_all)]
    pub fn refine(&self, detector: &impl LineDetector) -> Result<SkewReport> {
        let refine = &self.config.refine;
        let coarse = self.coarse(detector)?;
        info!(coarse_deg = coarse, "Initial guess");

        let angles = refine_windows(
            coarse,
            refine.coarse_resolution,
            refine.fine_resolution,
            refine.window_multiplier,
        )?;
        let request = PeakRequest::refinement(&self.config.hough, refine);
        let samples = to_samples(&detector.detect_lines(&angles, &request)?);
        debug!(angles = angles.len(), peaks = samples.len(), "Fine Hough peaks received");

        let kind = self.config.fine_estimator;
        let (pass, refined) = SkewPipeline::new(self.config).folded_pass(&samples, kind)?;
        let rotation = RotationPlanner.smaller_of_complements(refined);
        info!(refined_deg = refined, %rotation, "Refined rotation estimated");

        let mut clusters = pass.cluster_estimates();
        clusters.truncate(1);
        Ok(SkewReport {
            pipeline: PipelineKind::Iterative,
            estimator: kind,
            sample_count: pass.sample_count,
            modes: pass.modes,
            clusters,
            coarse_degrees: Some(coarse),
            refined_degrees: Some(refined),
            rotation,
        })
    }
}
