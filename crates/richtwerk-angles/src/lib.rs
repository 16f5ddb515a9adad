// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// richtwerk-angles: Skew estimation from Hough line angles.
//
// Turns a weighted, duplicate-laden, wrap-around set of candidate line angles
// into one correction angle: quantised accumulation, two-mode search, nearest
// mode clustering, pluggable circular estimators, orthogonal normalisation and
// an optional two-pass refinement. Pure and synchronous; the Hough transform
// is reached only through the `LineDetector` trait.

pub mod accumulator;
pub mod circular;
pub mod cluster;
pub mod detector;
pub mod estimator;
pub mod modes;
pub mod normalize;
pub mod pipeline;
pub mod planner;
pub mod refine;
pub mod search_space;

pub use accumulator::{AngleAccumulator, AngleHistogram};
pub use cluster::{ClusterAssigner, Clusters};
pub use detector::{LineDetector, PeakRequest};
pub use estimator::{
    CircularEstimator, TrimmedCircularMean, WeightedCircularMean, WeightedMedian, estimator_for,
};
pub use modes::ModeFinder;
pub use normalize::normalize_skew_degrees;
pub use pipeline::{ClusterPass, SkewPipeline};
pub use planner::RotationPlanner;
pub use refine::IterativeRefiner;
