// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for skew detection in the richtwerk-document crate.
// Runs the two-cluster and iterative pipelines on a synthetic ruled page.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage, Rgba};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use richtwerk_core::DeskewConfig;
use richtwerk_core::config::PipelineKind;
use richtwerk_document::{ImageProcessor, ScanDeskewer};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 300x300 page of ruled lines, rotated 2° clockwise.
fn ruled_page() -> DynamicImage {
    let mut page = RgbImage::from_pixel(300, 300, Rgb([255, 255, 255]));
    for row in 0..6 {
        draw_filled_rect_mut(
            &mut page,
            Rect::at(40, 50 + row * 40).of_size(220, 3),
            Rgb([0, 0, 0]),
        );
    }
    ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(page))
        .rotate_with_fill(2.0, Rgba([255, 255, 255, 255]), false)
        .into_dynamic()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_detect_skew(c: &mut Criterion) {
    let page = ruled_page();

    for pipeline in [PipelineKind::TwoCluster, PipelineKind::Iterative] {
        let config = DeskewConfig {
            pipeline,
            ..DeskewConfig::default()
        };
        c.bench_function(&format!("detect_skew {pipeline} (300x300)"), |b| {
            b.iter(|| {
                let deskewer = ScanDeskewer::from_dynamic(black_box(page.clone()), config.clone());
                black_box(deskewer.detect_skew().ok());
            });
        });
    }
}

criterion_group!(benches, bench_detect_skew);
criterion_main!(benches);
