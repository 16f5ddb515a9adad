// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan deskewing: edge detection, Hough voting, skew estimation and the
// corrective rotation for a single scanned page.

use image::{DynamicImage, GrayImage, Rgba};
use richtwerk_angles::SkewPipeline;
use richtwerk_core::error::RichtwerkError;
use richtwerk_core::{DeskewConfig, Dimensions, RotationAngle, SkewReport};
use tracing::{info, instrument};

use crate::image::processor::ImageProcessor;
use crate::scan::edges::EdgeDetector;
use crate::scan::hough::HoughTransform;

/// Detects and corrects the skew of one scanned page.
///
/// The image is only ever read while detecting; `correct` and `deskew`
/// consume the deskewer and hand back an `ImageProcessor` holding the
/// rotated page.
pub struct ScanDeskewer {
    image: DynamicImage,
    config: DeskewConfig,
}

impl ScanDeskewer {
    // -- Construction ---------------------------------------------------------

    /// Decode a scan from raw bytes (PNG, JPEG, TIFF, ...).
    #[instrument(skip(data, config), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8], config: DeskewConfig) -> Result<Self, RichtwerkError> {
        let image = image::load_from_memory(data).map_err(|err| {
            RichtwerkError::ImageError(format!("failed to decode scan image: {}", err))
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            "Scan image loaded"
        );
        Ok(Self { image, config })
    }

    /// Open a scan from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(
        path: impl AsRef<std::path::Path>,
        config: DeskewConfig,
    ) -> Result<Self, RichtwerkError> {
        let image = image::open(path.as_ref()).map_err(|err| {
            RichtwerkError::ImageError(format!(
                "failed to open scan image {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            "Scan image loaded"
        );
        Ok(Self { image, config })
    }

    pub fn from_dynamic(image: DynamicImage, config: DeskewConfig) -> Self {
        Self { image, config }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.image.width(),
            height: self.image.height(),
        }
    }

    pub fn config(&self) -> &DeskewConfig {
        &self.config
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Detection ------------------------------------------------------------

    /// Canny edge map of the grayscale page.
    pub fn edges(&self) -> GrayImage {
        EdgeDetector::new(&self.config.edges).detect(&self.image.to_luma8())
    }

    /// Estimate the skew and the rotation that removes it.
    #[instrument(skip_all, fields(pipeline = %self.config.pipeline))]
    pub fn detect_skew(&self) -> Result<SkewReport, RichtwerkError> {
        self.config.validate()?;
        let hough = HoughTransform::new(&self.edges());
        let report = SkewPipeline::new(&self.config).run(&hough)?;
        info!(
            rotation = report.rotation.degrees(),
            samples = report.sample_count,
            "Skew detected"
        );
        Ok(report)
    }

    // -- Correction -----------------------------------------------------------

    /// Rotate the page by `rotation` using the configured fill and canvas mode.
    pub fn correct(self, rotation: RotationAngle) -> ImageProcessor {
        let output = &self.config.output;
        let fill = Rgba(output.fill);
        let resize_to_fit = output.resize_to_fit;
        ImageProcessor::from_dynamic(self.image).rotate_with_fill(
            rotation.degrees() as f32,
            fill,
            resize_to_fit,
        )
    }

    /// Detect the skew, then correct it.
    pub fn deskew(self) -> Result<(SkewReport, ImageProcessor), RichtwerkError> {
        let report = self.detect_skew()?;
        let corrected = self.correct(report.rotation);
        Ok((report, corrected))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
