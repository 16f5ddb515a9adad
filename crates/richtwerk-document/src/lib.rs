// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// richtwerk-document: Image-side collaborators of the skew estimator.
//
// Provides image loading, rotation and encoding, Canny edge detection, a
// Hough line transform over arbitrary candidate angles, and the scan deskew
// pipeline that ties them to `richtwerk-angles`.

pub mod image;
pub mod scan;

// Re-export the primary structs so callers can use `richtwerk_document::ScanDeskewer` etc.
pub use crate::image::processor::ImageProcessor;
pub use scan::deskew::ScanDeskewer;
pub use scan::edges::EdgeDetector;
pub use scan::hough::HoughTransform;
