// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mode search: the dominant angle and the strongest angle belonging to the
// other (near-orthogonal) line family.

use richtwerk_core::error::{Result, RichtwerkError};
use richtwerk_core::{Mode, Modes};
use tracing::debug;

use crate::accumulator::AngleHistogram;
use crate::circular::angular_distance;

/// Locates the two modes of an [`AngleHistogram`].
#[derive(Debug, Clone, Copy)]
pub struct ModeFinder {
    /// Minimum circular distance (radians) a second mode must keep from the first.
    separation: f64,
}

impl ModeFinder {
    pub fn new(separation: f64) -> Self {
        Self { separation }
    }

    /// Highest-magnitude entry; ties go to the smallest angle.
    pub fn find_primary(&self, histogram: &AngleHistogram) -> Result<Mode> {
        strongest(histogram, |_| true).ok_or(RichtwerkError::EmptyHistogram)
    }

    /// Highest-magnitude entry strictly farther than the separation threshold
    /// from `primary`; ties go to the smallest angle.
    pub fn find_secondary(&self, histogram: &AngleHistogram, primary: &Mode) -> Result<Mode> {
        strongest(histogram, |angle| {
            angular_distance(angle, primary.angle) > self.separation
        })
        .ok_or(RichtwerkError::NoSecondMode {
            separation: self.separation,
        })
    }

    /// Both modes. A missing second mode is not an error here; it is reported
    /// as `secondary: None`.
    pub fn find(&self, histogram: &AngleHistogram) -> Result<Modes> {
        let primary = self.find_primary(histogram)?;
        let secondary = match self.find_secondary(histogram, &primary) {
            Ok(mode) => Some(mode),
            Err(RichtwerkError::NoSecondMode { separation }) => {
                debug!(separation, "No second mode; falling back to a single cluster");
                None
            }
            Err(err) => return Err(err),
        };

        debug!(
            primary_deg = primary.degrees(),
            primary_mag = primary.magnitude,
            secondary_deg = secondary.map(|m| m.degrees()),
            secondary_mag = secondary.map(|m| m.magnitude),
            "Modes selected"
        );
        Ok(Modes { primary, secondary })
    }
}

/// Entries arrive in ascending angle order, so replacing only on a strictly
/// greater magnitude keeps the smallest angle among ties.
fn strongest(histogram: &AngleHistogram, qualifies: impl Fn(f64) -> bool) -> Option<Mode> {
    let mut best: Option<Mode> = None;
    for entry in histogram.entries() {
        if !qualifies(entry.angle) {
            continue;
        }
        if best.is_none_or(|b| entry.magnitude > b.magnitude) {
            best = Some(Mode {
                angle: entry.angle,
                magnitude: entry.magnitude,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::AngleAccumulator;
    use richtwerk_core::AngleSample;
    use std::f64::consts::PI;

    fn histogram(samples: &[AngleSample]) -> AngleHistogram {
        AngleAccumulator::default().accumulate(samples).unwrap()
    }

    #[test]
    fn two_orthogonal_modes() {
        let hist = histogram(&[AngleSample::new(0.0, 10.0), AngleSample::new(1.57, 8.0)]);
        let modes = ModeFinder::new(PI / 8.0).find(&hist).unwrap();

        assert_eq!(modes.primary.angle, 0.0);
        assert_eq!(modes.primary.magnitude, 10.0);
        let secondary = modes.secondary.expect("second mode");
        assert!((secondary.angle - 1.57).abs() < 1e-6);
        assert_eq!(secondary.magnitude, 8.0);
    }

    #[test]
    fn second_mode_prefers_magnitude_over_distance() {
        let hist = histogram(&[
            AngleSample::from_degrees(5.0, 5.0),
            AngleSample::from_degrees(-3.0, 3.0),
            AngleSample::from_degrees(87.0, 9.0),
        ]);
        let modes = ModeFinder::new(45f64.to_radians()).find(&hist).unwrap();
        assert!((modes.primary.degrees() - 87.0).abs() < 1e-4);
        let secondary = modes.secondary.expect("second mode");
        assert!((secondary.degrees() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn ties_go_to_smallest_angle() {
        let hist = histogram(&[
            AngleSample::from_degrees(40.0, 7.0),
            AngleSample::from_degrees(-20.0, 7.0),
            AngleSample::from_degrees(80.0, 2.0),
            AngleSample::from_degrees(-85.0, 2.0),
        ]);
        let modes = ModeFinder::new(PI / 8.0).find(&hist).unwrap();
        assert!((modes.primary.degrees() + 20.0).abs() < 1e-4);
        // 40° is 60° away from -20° and wins on magnitude.
        assert!((modes.secondary.unwrap().degrees() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn secondary_ties_go_to_smallest_angle() {
        let hist = histogram(&[
            AngleSample::from_degrees(0.0, 9.0),
            AngleSample::from_degrees(80.0, 4.0),
            AngleSample::from_degrees(-70.0, 4.0),
        ]);
        let modes = ModeFinder::new(PI / 8.0).find(&hist).unwrap();
        assert!((modes.secondary.unwrap().degrees() + 70.0).abs() < 1e-4);
    }

    #[test]
    fn missing_second_mode_is_reported_not_fatal() {
        let hist = histogram(&[
            AngleSample::from_degrees(1.0, 4.0),
            AngleSample::from_degrees(2.0, 3.0),
        ]);
        let finder = ModeFinder::new(PI / 8.0);
        let primary = finder.find_primary(&hist).unwrap();
        assert!(matches!(
            finder.find_secondary(&hist, &primary),
            Err(RichtwerkError::NoSecondMode { .. })
        ));
        assert!(finder.find(&hist).unwrap().secondary.is_none());
    }

    #[test]
    fn separation_is_measured_around_the_circle() {
        // -170° and 170° are only 20° apart.
        let hist = histogram(&[
            AngleSample::from_degrees(170.0, 5.0),
            AngleSample::from_degrees(-170.0, 4.0),
        ]);
        let modes = ModeFinder::new(PI / 8.0).find(&hist).unwrap();
        assert!(modes.secondary.is_none());
    }
}
