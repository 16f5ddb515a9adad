// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline: edge detection, Hough line voting, and skew correction.

pub mod deskew;
pub mod edges;
pub mod hough;

pub use deskew::ScanDeskewer;
pub use edges::EdgeDetector;
pub use hough::HoughTransform;
