// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cluster assignment: every histogram entry joins the line family whose mode
// it is nearest to.

use richtwerk_core::{AngleSample, Cluster, Modes};
use tracing::debug;

use crate::accumulator::AngleHistogram;
use crate::circular::angular_distance;

/// The two line-family clusters handed to the estimators.
#[derive(Debug, Clone, PartialEq)]
pub struct Clusters {
    pub first: Cluster,
    pub second: Cluster,
    /// `second` is a copy of `first` because no separate family was found.
    pub single_family: bool,
}

impl Clusters {
    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        [&self.first, &self.second].into_iter()
    }
}

/// Partitions histogram entries between the two modes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterAssigner;

impl ClusterAssigner {
    /// Raw partition without the empty-cluster fallback.
    ///
    /// An entry goes to the first cluster only when strictly closer to the
    /// primary mode; equal distances go to the second. Without a second mode
    /// everything lands in the first cluster.
    pub fn partition(&self, histogram: &AngleHistogram, modes: &Modes) -> (Cluster, Cluster) {
        let mut first: Vec<AngleSample> = Vec::new();
        let mut second: Vec<AngleSample> = Vec::new();

        for entry in histogram.entries() {
            let to_first = angular_distance(entry.angle, modes.primary.angle);
            match modes.secondary {
                Some(secondary) if to_first >= angular_distance(entry.angle, secondary.angle) => {
                    second.push(entry)
                }
                _ => first.push(entry),
            }
        }

        (Cluster::from_samples(first), Cluster::from_samples(second))
    }

    /// Partition, then duplicate the first cluster into an empty second one
    /// so that downstream averaging degrades to a single estimate.
    pub fn assign(&self, histogram: &AngleHistogram, modes: &Modes) -> Clusters {
        let (first, second) = self.partition(histogram, modes);
        let single_family = second.is_empty();
        let second = if single_family { first.clone() } else { second };

        debug!(
            first = first.len(),
            second = second.len(),
            single_family,
            "Clusters assigned"
        );
        Clusters {
            first,
            second,
            single_family,
        }
    }
}
