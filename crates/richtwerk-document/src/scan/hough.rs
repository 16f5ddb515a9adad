// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hough line transform over an arbitrary list of candidate angles.
//
// `imageproc::hough::detect_lines` only votes at whole degrees, which is too
// coarse for the refinement pass, so the accumulator is built here. A line is
// parameterised by its normal: x·cos θ + y·sin θ = ρ.

use image::GrayImage;
use richtwerk_angles::{LineDetector, PeakRequest};
use richtwerk_core::error::Result;
use richtwerk_core::HoughPeak;
use tracing::{debug, instrument};

/// Vote table of `angles × offsets`.
struct Accumulator {
    votes: Vec<u32>,
    offsets: usize,
    max: u32,
}

impl Accumulator {
    fn get(&self, angle: usize, offset: usize) -> u32 {
        self.votes[angle * self.offsets + offset]
    }
}

/// Hough transform over the edge pixels of one edge map.
pub struct HoughTransform {
    /// Coordinates of every edge pixel.
    points: Vec<(f64, f64)>,
    /// Offset added to ρ so that every index is non-negative.
    rho_shift: i64,
}

impl HoughTransform {
    /// Collect the edge pixels (non-zero) of `edges`.
    pub fn new(edges: &GrayImage) -> Self {
        let points: Vec<(f64, f64)> = edges
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] > 0)
            .map(|(x, y, _)| (x as f64, y as f64))
            .collect();
        let (w, h) = edges.dimensions();
        let rho_shift = (w as f64).hypot(h as f64).ceil() as i64;
        Self { points, rho_shift }
    }

    pub fn edge_points(&self) -> usize {
        self.points.len()
    }

    fn accumulate(&self, angles: &[f64]) -> Accumulator {
        let offsets = (2 * self.rho_shift + 1) as usize;
        let mut votes = vec![0u32; angles.len() * offsets];

        for (a, &theta) in angles.iter().enumerate() {
            let (sin, cos) = theta.sin_cos();
            let row = &mut votes[a * offsets..(a + 1) * offsets];
            for &(x, y) in &self.points {
                let rho = (x * cos + y * sin).round() as i64 + self.rho_shift;
                if (0..offsets as i64).contains(&rho) {
                    row[rho as usize] += 1;
                }
            }
        }

        let max = votes.iter().copied().max().unwrap_or(0);
        Accumulator {
            votes,
            offsets,
            max,
        }
    }

    /// Strongest lines over `angles`, with neighbourhood suppression.
    ///
    /// Cells at or above `threshold_ratio × max` are visited in descending
    /// vote order; a cell is dropped if an accepted peak lies within
    /// `min_angle` entries of the angle list and `min_distance` pixels of
    /// offset.
    #[instrument(skip_all, fields(angles = angles.len(), edge_points = self.points.len()))]
    pub fn peaks(&self, angles: &[f64], request: &PeakRequest) -> Vec<HoughPeak> {
        if angles.is_empty() || self.points.is_empty() || request.num_peaks == 0 {
            return Vec::new();
        }
        let acc = self.accumulate(angles);
        if acc.max == 0 {
            return Vec::new();
        }
        let threshold = (request.threshold_ratio * acc.max as f64).max(1.0);

        let mut candidates: Vec<(u32, usize, usize)> = Vec::new();
        for a in 0..angles.len() {
            for r in 0..acc.offsets {
                let v = acc.get(a, r);
                if v as f64 >= threshold {
                    candidates.push((v, a, r));
                }
            }
        }
        // Strongest first; ties resolved by position for determinism.
        candidates.sort_by(|x, y| y.0.cmp(&x.0).then(x.1.cmp(&y.1)).then(x.2.cmp(&y.2)));

        let mut accepted: Vec<(usize, usize)> = Vec::new();
        let mut peaks = Vec::new();
        for (v, a, r) in candidates {
            let suppressed = accepted.iter().any(|&(pa, pr)| {
                pa.abs_diff(a) <= request.min_angle && pr.abs_diff(r) <= request.min_distance
            });
            if suppressed {
                continue;
            }
            accepted.push((a, r));
            peaks.push(HoughPeak {
                magnitude: v as f64,
                angle: angles[a],
                offset: r as f64 - self.rho_shift as f64,
            });
            if peaks.len() >= request.num_peaks {
                break;
            }
        }

        debug!(
            max_votes = acc.max,
            candidates = accepted.len(),
            peaks = peaks.len(),
            "Hough peaks extracted"
        );
        peaks
    }
}

impl LineDetector for HoughTransform {
    fn detect_lines(&self, angles: &[f64], request: &PeakRequest) -> Result<Vec<HoughPeak>> {
        Ok(self.peaks(angles, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use richtwerk_angles::search_space::full_span;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn request(num_peaks: usize, threshold_ratio: f64) -> PeakRequest {
        PeakRequest {
            num_peaks,
            threshold_ratio,
            min_angle: 10,
            min_distance: 9,
        }
    }

    fn edge_map(draw: impl Fn(&mut GrayImage)) -> GrayImage {
        let mut edges = GrayImage::new(100, 100);
        draw(&mut edges);
        edges
    }

    #[test]
    fn horizontal_line_peaks_at_minus_quarter_turn() {
        let edges = edge_map(|img| {
            for x in 10..91 {
                img.put_pixel(x, 50, Luma([255]));
            }
        });
        let hough = HoughTransform::new(&edges);
        let peaks = hough.peaks(&full_span(PI / 180.0).unwrap(), &request(5, 0.5));

        assert_eq!(peaks[0].magnitude, 81.0);
        assert!((peaks[0].angle + FRAC_PI_2).abs() < 1e-12);
        assert_eq!(peaks[0].offset, -50.0);
    }

    #[test]
    fn vertical_line_peaks_at_zero() {
        let edges = edge_map(|img| {
            for y in 5..95 {
                img.put_pixel(30, y, Luma([255]));
            }
        });
        let peaks = HoughTransform::new(&edges).peaks(&full_span(PI / 180.0).unwrap(), &request(5, 0.5));
        assert_eq!(peaks[0].magnitude, 90.0);
        assert!(peaks[0].angle.abs() < 1e-9);
        assert_eq!(peaks[0].offset, 30.0);
    }

    #[test]
    fn threshold_drops_weak_lines() {
        let edges = edge_map(|img| {
            for x in 0..100 {
                img.put_pixel(x, 20, Luma([255]));
            }
            for y in 40..60 {
                img.put_pixel(70, y, Luma([255]));
            }
        });
        let hough = HoughTransform::new(&edges);
        let angles = full_span(PI / 180.0).unwrap();

        let strong_only = hough.peaks(&angles, &request(10, 0.6));
        assert_eq!(strong_only.len(), 1);
        assert_eq!(strong_only[0].magnitude, 100.0);

        // The short vertical segment survives a lower threshold.
        let both = hough.peaks(&angles, &request(10, 0.15));
        assert!(both.iter().any(|p| {
            p.angle.abs() < 0.03 && (68.0..=72.0).contains(&p.offset) && p.magnitude >= 20.0
        }));
    }

    #[test]
    fn parallel_lines_far_apart_are_separate_peaks() {
        let edges = edge_map(|img| {
            for x in 0..100 {
                img.put_pixel(x, 20, Luma([255]));
                img.put_pixel(x, 70, Luma([255]));
            }
        });
        let peaks = HoughTransform::new(&edges).peaks(&full_span(PI / 180.0).unwrap(), &request(2, 0.5));
        assert_eq!(peaks.len(), 2);
        let mut offsets: Vec<f64> = peaks.iter().map(|p| p.offset).collect();
        offsets.sort_by(f64::total_cmp);
        assert_eq!(offsets, vec![-70.0, -20.0]);
    }

    #[test]
    fn peaks_are_strongest_first_and_capped() {
        let edges = edge_map(|img| {
            for x in 0..100 {
                img.put_pixel(x, 10, Luma([255]));
            }
            for x in 0..80 {
                img.put_pixel(x, 40, Luma([255]));
            }
            for x in 0..60 {
                img.put_pixel(x, 80, Luma([255]));
            }
        });
        let peaks = HoughTransform::new(&edges).peaks(&full_span(PI / 180.0).unwrap(), &request(2, 0.1));
        assert_eq!(peaks.len(), 2);
        assert!(peaks[0].magnitude >= peaks[1].magnitude);
        assert_eq!(peaks[0].magnitude, 100.0);
    }

    #[test]
    fn blank_edge_map_has_no_peaks() {
        let hough = HoughTransform::new(&GrayImage::new(50, 50));
        assert_eq!(hough.edge_points(), 0);
        let peaks = hough.detect_lines(&full_span(PI / 180.0).unwrap(), &request(10, 0.5)).unwrap();
        assert!(peaks.is_empty());
    }
}
