// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge detection: Canny on the grayscale scan, producing the binary edge map
// the Hough transform votes over.

use image::GrayImage;
use imageproc::edges::canny;
use richtwerk_core::config::EdgeConfig;
use tracing::{debug, instrument};

/// Canny edge detector with fixed hysteresis thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDetector {
    low_threshold: f32,
    high_threshold: f32,
}

impl EdgeDetector {
    pub fn new(config: &EdgeConfig) -> Self {
        Self {
            low_threshold: config.low_threshold,
            high_threshold: config.high_threshold,
        }
    }

    /// Binary edge map: 255 on edges, 0 elsewhere.
    #[instrument(skip_all, fields(width = gray.width(), height = gray.height()))]
    pub fn detect(&self, gray: &GrayImage) -> GrayImage {
        let edges = canny(gray, self.low_threshold, self.high_threshold);
        debug!(edge_pixels = edge_pixel_count(&edges), "Canny edge detection complete");
        edges
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(&EdgeConfig::default())
    }
}

/// Number of non-zero pixels in an edge map.
pub fn edge_pixel_count(edges: &GrayImage) -> usize {
    edges.pixels().filter(|p| p.0[0] > 0).count()
}
