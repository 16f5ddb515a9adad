// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: arbitrary-angle rotation with a background fill, optional
// canvas growth, PNG encoding and saving. Operates on in-memory images using
// the `image` and `imageproc` crates.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::geometric_transformations::{self, Interpolation, Projection, warp_into};
use richtwerk_core::error::RichtwerkError;
use tracing::{debug, info, instrument};

/// Rotation below this many degrees is treated as no rotation at all.
const ANGLE_EPSILON: f32 = 0.01;

/// Image processing on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor` wrapping the
/// transformed image, enabling method chaining.
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Rotate the image by `degrees`, clockwise on screen for positive values.
    ///
    /// Pixels exposed by the rotation take the `fill` colour. With
    /// `resize_to_fit` the canvas grows so the whole rotated image stays
    /// visible; otherwise the original dimensions are kept and the corners
    /// are clipped. Multiples of 90° that keep the canvas valid are rotated
    /// losslessly.
    #[instrument(skip(self, fill))]
    pub fn rotate_with_fill(self, degrees: f32, fill: Rgba<u8>, resize_to_fit: bool) -> Self {
        let normalised = degrees.rem_euclid(360.0);
        let near = |target: f32| (normalised - target).abs() < ANGLE_EPSILON;
        let square = self.image.width() == self.image.height();

        if near(0.0) || near(360.0) {
            debug!("Rotation below threshold; image unchanged");
            return self;
        }
        if near(180.0) {
            return Self {
                image: self.image.rotate180(),
            };
        }
        if resize_to_fit || square {
            if near(90.0) {
                return Self {
                    image: self.image.rotate90(),
                };
            }
            if near(270.0) {
                return Self {
                    image: self.image.rotate270(),
                };
            }
        }

        info!(degrees, resize_to_fit, "Rotating image");
        let rgba = self.image.to_rgba8();
        let radians = degrees.to_radians();

        let rotated: RgbaImage = if resize_to_fit {
            let (width, height) = (rgba.width() as f32, rgba.height() as f32);
            let (sin, cos) = radians.sin_cos();
            let out_w = (width * cos.abs() + height * sin.abs()).ceil().max(1.0) as u32;
            let out_h = (width * sin.abs() + height * cos.abs()).ceil().max(1.0) as u32;

            // Move the source centre to the origin, rotate, then move it to
            // the centre of the larger canvas.
            let projection = Projection::translate(out_w as f32 / 2.0, out_h as f32 / 2.0)
                * Projection::rotate(radians)
                * Projection::translate(-width / 2.0, -height / 2.0);
            let mut output = RgbaImage::from_pixel(out_w, out_h, fill);
            warp_into(&rgba, &projection, Interpolation::Bilinear, fill, &mut output);
            output
        } else {
            geometric_transformations::rotate_about_center(
                &rgba,
                radians,
                Interpolation::Bilinear,
                fill,
            )
        };

        debug!(
            new_w = rotated.width(),
            new_h = rotated.height(),
            "General rotation applied"
        );
        Self {
            image: DynamicImage::ImageRgba8(rotated),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, RichtwerkError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| RichtwerkError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), RichtwerkError> {
        self.image.save(path.as_ref()).map_err(|err| {
            RichtwerkError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!("Image saved");
        Ok(())
    }
}
