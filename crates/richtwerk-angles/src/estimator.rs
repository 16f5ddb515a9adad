// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Circular estimators: reduce one cluster to a representative angle.

use richtwerk_core::config::EstimatorKind;
use richtwerk_core::error::{Result, RichtwerkError};
use richtwerk_core::Cluster;

use crate::circular::Resultant;

/// Strategy that reduces a cluster to a single angle in radians.
pub trait CircularEstimator {
    fn kind(&self) -> EstimatorKind;

    fn estimate(&self, cluster: &Cluster) -> Result<f64>;
}

/// Build the estimator selected by `kind`.
pub fn estimator_for(kind: EstimatorKind, trim_fraction: f64) -> Box<dyn CircularEstimator> {
    match kind {
        EstimatorKind::WeightedCircularMean => Box::new(WeightedCircularMean),
        EstimatorKind::WeightedMedian => Box::new(WeightedMedian),
        EstimatorKind::TrimmedCircularMean => Box::new(TrimmedCircularMean::new(trim_fraction)),
    }
}

/// Phase of the weighted resultant vector. Wrap-around safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedCircularMean;

impl CircularEstimator for WeightedCircularMean {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::WeightedCircularMean
    }

    fn estimate(&self, cluster: &Cluster) -> Result<f64> {
        if cluster.is_empty() {
            return Err(RichtwerkError::EmptyCluster);
        }
        let resultant: Resultant = cluster.iter().map(|s| (s.angle, s.magnitude)).collect();
        Ok(resultant.phase())
    }
}

/// First angle at which the cumulative magnitude exceeds half the total.
///
/// Walks the cluster in ascending angle order, so it is NOT wrap-around safe:
/// a cluster straddling ±π would be split at the seam. Clusters are built
/// around a mode and kept well inside the seam, which is what makes this
/// acceptable.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMedian;

impl CircularEstimator for WeightedMedian {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::WeightedMedian
    }

    fn estimate(&self, cluster: &Cluster) -> Result<f64> {
        if cluster.is_empty() {
            return Err(RichtwerkError::EmptyCluster);
        }
        let total_weight = cluster.total_weight();
        let half = total_weight / 2.0;
        let mut cumulative = 0.0;

        for sample in cluster.iter() {
            if cumulative + sample.magnitude > half {
                return Ok(sample.angle);
            }
            cumulative += sample.magnitude;
        }

        Err(RichtwerkError::MedianUnreachable { total_weight })
    }
}

/// Circular mean of the central mass after trimming `fraction` of the
/// cumulative weight from each end.
///
/// Whole entries are kept or dropped: an entry survives once the cumulative
/// weight including it passes the lower bound, and the walk stops at the
/// first entry whose cumulative weight passes the upper bound.
#[derive(Debug, Clone, Copy)]
pub struct TrimmedCircularMean {
    fraction: f64,
}

impl TrimmedCircularMean {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }
}

impl Default for TrimmedCircularMean {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl CircularEstimator for TrimmedCircularMean {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::TrimmedCircularMean
    }

    fn estimate(&self, cluster: &Cluster) -> Result<f64> {
        if cluster.is_empty() {
            return Err(RichtwerkError::EmptyCluster);
        }
        let total_weight = cluster.total_weight();
        let lower = total_weight * self.fraction;
        let upper = total_weight * (1.0 - self.fraction);
        let mut cumulative = 0.0;
        let mut resultant = Resultant::default();

        for sample in cluster.iter() {
            let reached = cumulative + sample.magnitude;
            if reached > lower {
                resultant.push(sample.angle, sample.magnitude);
            }
            if reached > upper {
                return Ok(resultant.phase());
            }
            cumulative = reached;
        }

        // With no trimming the upper bound equals the total and is never
        // strictly passed; everything kept so far is the answer.
        if resultant.weight() > 0.0 {
            Ok(resultant.phase())
        } else {
            Err(RichtwerkError::TrimUnreachable {
                fraction: self.fraction,
                total_weight,
            })
        }
    }
}
