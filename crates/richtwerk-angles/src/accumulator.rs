// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Angle accumulation: collapses Hough samples into a weighted histogram keyed
// by a quantised angle, merging near-duplicates produced by float noise.

use std::collections::BTreeMap;

use richtwerk_core::error::{Result, RichtwerkError};
use richtwerk_core::AngleSample;
use tracing::{debug, warn};

/// Weighted histogram of quantised angles.
///
/// Keys are `round(degrees × steps_per_degree)`, so iteration is in ascending
/// angle order and keys are unique by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleHistogram {
    bins: BTreeMap<i64, f64>,
    steps_per_degree: f64,
}

impl AngleHistogram {
    /// Entries as samples, in ascending angle order.
    pub fn entries(&self) -> impl Iterator<Item = AngleSample> + '_ {
        self.bins.iter().map(|(&key, &magnitude)| {
            AngleSample::from_degrees(key as f64 / self.steps_per_degree, magnitude)
        })
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.bins.values().sum()
    }
}

/// Builds an [`AngleHistogram`] from raw samples.
#[derive(Debug, Clone, Copy)]
pub struct AngleAccumulator {
    steps_per_degree: f64,
}

impl AngleAccumulator {
    pub fn new(steps_per_degree: f64) -> Self {
        Self { steps_per_degree }
    }

    /// Sum the magnitudes of all samples that round to the same key.
    ///
    /// Samples with a non-finite angle, or a negative or non-finite magnitude,
    /// are dropped. Fails with `EmptyHistogram` if nothing survives.
    pub fn accumulate(&self, samples: &[AngleSample]) -> Result<AngleHistogram> {
        let mut bins: BTreeMap<i64, f64> = BTreeMap::new();
        let mut dropped = 0usize;

        for sample in samples {
            if !sample.angle.is_finite() || !sample.magnitude.is_finite() || sample.magnitude < 0.0
            {
                dropped += 1;
                continue;
            }
            let key = (sample.degrees() * self.steps_per_degree).round() as i64;
            *bins.entry(key).or_insert(0.0) += sample.magnitude;
        }

        if dropped > 0 {
            warn!(dropped, "Dropped malformed angle samples");
        }
        if bins.is_empty() {
            return Err(RichtwerkError::EmptyHistogram);
        }

        debug!(
            samples = samples.len(),
            bins = bins.len(),
            "Angle histogram built"
        );
        Ok(AngleHistogram {
            bins,
            steps_per_degree: self.steps_per_degree,
        })
    }
}

impl Default for AngleAccumulator {
    fn default() -> Self {
        Self::new(65536.0)
    }
}
