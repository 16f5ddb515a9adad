// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Richtwerk.

use thiserror::Error;

/// Top-level error type for all Richtwerk operations.
#[derive(Debug, Error)]
pub enum RichtwerkError {
    // -- Angle estimation errors --
    #[error("no Hough peaks survived accumulation; the angle histogram is empty")]
    EmptyHistogram,

    /// Recoverable: the cluster assigner falls back to a single cluster.
    #[error("no histogram entry lies more than {separation} rad from the dominant angle")]
    NoSecondMode { separation: f64 },

    #[error("cumulative weight never exceeded half of the cluster total ({total_weight})")]
    MedianUnreachable { total_weight: f64 },

    #[error("cumulative weight never passed the upper trim bound (fraction {fraction}, total {total_weight})")]
    TrimUnreachable { fraction: f64, total_weight: f64 },

    #[error("cannot estimate the angle of an empty cluster")]
    EmptyCluster,

    // -- Configuration errors --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid angle search space: {0}")]
    InvalidSearchSpace(String),

    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- I/O / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RichtwerkError>;
