// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deskew configuration. Every constant of the estimation pipeline lives here
// so that a run can be reproduced from a single JSON file.

use std::f64::consts::PI;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RichtwerkError};

/// Which estimation pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineKind {
    /// Two modes, two clusters, mean of the normalised cluster estimates.
    #[default]
    TwoCluster,
    /// Orthogonally folded angles, one estimate.
    SinglePass,
    /// Coarse folded pass followed by a narrow high-resolution pass.
    Iterative,
}

impl FromStr for PipelineKind {
    type Err = RichtwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "two-cluster" | "two_cluster" => Ok(Self::TwoCluster),
            "single-pass" | "single_pass" => Ok(Self::SinglePass),
            "iterative" => Ok(Self::Iterative),
            other => Err(RichtwerkError::InvalidConfig(format!(
                "unknown pipeline '{other}' (expected two-cluster, single-pass or iterative)"
            ))),
        }
    }
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::TwoCluster => "two-cluster",
            Self::SinglePass => "single-pass",
            Self::Iterative => "iterative",
        })
    }
}

/// Which circular estimator reduces a cluster to one angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimatorKind {
    WeightedCircularMean,
    WeightedMedian,
    TrimmedCircularMean,
}

impl FromStr for EstimatorKind {
    type Err = RichtwerkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mean" | "weighted-circular-mean" => Ok(Self::WeightedCircularMean),
            "median" | "weighted-median" => Ok(Self::WeightedMedian),
            "trimmed" | "trimmed-circular-mean" => Ok(Self::TrimmedCircularMean),
            other => Err(RichtwerkError::InvalidConfig(format!(
                "unknown estimator '{other}' (expected mean, median or trimmed)"
            ))),
        }
    }
}

impl std::fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::WeightedCircularMean => "weighted-circular-mean",
            Self::WeightedMedian => "weighted-median",
            Self::TrimmedCircularMean => "trimmed-circular-mean",
        })
    }
}

/// Hough peak search over the full angular span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Angular step of the full `[-π/2, π/2)` search space, in radians.
    pub resolution: f64,
    /// Maximum number of peaks to keep.
    pub num_peaks: usize,
    /// Peaks below `threshold_ratio × max votes` are dropped.
    pub threshold_ratio: f64,
    /// Suppression neighbourhood along the angle axis, in search-space bins.
    pub min_angle: usize,
    /// Suppression neighbourhood along the offset axis, in pixels.
    pub min_distance: usize,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            resolution: PI / 720.0,
            num_peaks: 100,
            threshold_ratio: 0.5,
            min_angle: 10,
            min_distance: 9,
        }
    }
}

/// Two-pass refinement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Stage-one angular step in radians.
    pub coarse_resolution: f64,
    /// Stage-two angular step in radians. Should divide the coarse step.
    pub fine_resolution: f64,
    /// Each stage-two window spans `± window_multiplier × coarse_resolution`.
    pub window_multiplier: f64,
    pub num_peaks: usize,
    pub threshold_ratio: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            coarse_resolution: PI / 180.0,
            fine_resolution: PI / 5040.0,
            window_multiplier: 3.0,
            num_peaks: 10,
            threshold_ratio: 0.15,
        }
    }
}

/// Canny thresholds on the 0..255 gradient scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

/// How the corrected image is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// RGBA colour for pixels exposed by the rotation.
    pub fill: [u8; 4],
    /// Grow the canvas so no corner of the source is cut off.
    pub resize_to_fit: bool,
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fill: [255, 255, 255, 255],
            resize_to_fit: false,
            file_name: "rotated_image.png".into(),
        }
    }
}

/// Complete configuration of one deskew run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskewConfig {
    pub pipeline: PipelineKind,
    /// Minimum circular distance between the two modes, in radians.
    pub separation_threshold: f64,
    /// Histogram keys are angles rounded to `1 / quantization_steps_per_degree`°.
    pub quantization_steps_per_degree: f64,
    pub two_cluster_estimator: EstimatorKind,
    pub single_pass_estimator: EstimatorKind,
    pub coarse_estimator: EstimatorKind,
    pub fine_estimator: EstimatorKind,
    /// Fraction of cumulative weight discarded from each end by the trimmed mean.
    pub trim_fraction: f64,
    pub hough: HoughConfig,
    pub refine: RefineConfig,
    pub edges: EdgeConfig,
    pub output: OutputConfig,
}

impl Default for DeskewConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineKind::TwoCluster,
            separation_threshold: PI / 8.0,
            quantization_steps_per_degree: 65536.0,
            two_cluster_estimator: EstimatorKind::WeightedMedian,
            single_pass_estimator: EstimatorKind::TrimmedCircularMean,
            coarse_estimator: EstimatorKind::WeightedMedian,
            fine_estimator: EstimatorKind::TrimmedCircularMean,
            trim_fraction: 0.25,
            hough: HoughConfig::default(),
            refine: RefineConfig::default(),
            edges: EdgeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl DeskewConfig {
    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// The estimator used by the final pass of the configured pipeline.
    pub fn active_estimator(&self) -> EstimatorKind {
        match self.pipeline {
            PipelineKind::TwoCluster => self.two_cluster_estimator,
            PipelineKind::SinglePass => self.single_pass_estimator,
            PipelineKind::Iterative => self.fine_estimator,
        }
    }

    /// Override the estimator used by the final pass of the configured pipeline.
    pub fn set_active_estimator(&mut self, kind: EstimatorKind) {
        match self.pipeline {
            PipelineKind::TwoCluster => self.two_cluster_estimator = kind,
            PipelineKind::SinglePass => self.single_pass_estimator = kind,
            PipelineKind::Iterative => self.fine_estimator = kind,
        }
    }

    /// Reject constants the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        positive("separation_threshold", self.separation_threshold)?;
        if self.separation_threshold > PI {
            return Err(RichtwerkError::InvalidConfig(format!(
                "separation_threshold {} exceeds π; no angle could qualify as a second mode",
                self.separation_threshold
            )));
        }
        positive("quantization_steps_per_degree", self.quantization_steps_per_degree)?;
        if !(0.0..0.5).contains(&self.trim_fraction) {
            return Err(RichtwerkError::InvalidConfig(format!(
                "trim_fraction must lie in [0, 0.5), got {}",
                self.trim_fraction
            )));
        }
        positive("hough.resolution", self.hough.resolution)?;
        ratio("hough.threshold_ratio", self.hough.threshold_ratio)?;
        positive("refine.coarse_resolution", self.refine.coarse_resolution)?;
        positive("refine.fine_resolution", self.refine.fine_resolution)?;
        positive("refine.window_multiplier", self.refine.window_multiplier)?;
        ratio("refine.threshold_ratio", self.refine.threshold_ratio)?;
        if self.refine.fine_resolution > self.refine.coarse_resolution {
            return Err(RichtwerkError::InvalidConfig(
                "refine.fine_resolution must not be coarser than refine.coarse_resolution".into(),
            ));
        }
        if self.hough.num_peaks == 0 || self.refine.num_peaks == 0 {
            return Err(RichtwerkError::InvalidConfig(
                "num_peaks must be at least 1".into(),
            ));
        }
        if self.edges.low_threshold > self.edges.high_threshold {
            return Err(RichtwerkError::InvalidConfig(format!(
                "edges.low_threshold {} exceeds edges.high_threshold {}",
                self.edges.low_threshold, self.edges.high_threshold
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RichtwerkError::InvalidConfig(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn ratio(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RichtwerkError::InvalidConfig(format!(
            "{name} must lie in [0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = DeskewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.active_estimator(), EstimatorKind::WeightedMedian);
    }

    #[test]
    fn trim_fraction_of_one_half_is_rejected() {
        let config = DeskewConfig {
            trim_fraction: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RichtwerkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn fine_resolution_coarser_than_coarse_is_rejected() {
        let mut config = DeskewConfig::default();
        config.refine.fine_resolution = config.refine.coarse_resolution * 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{ "pipeline": "iterative", "trim_fraction": 0.1, "refine": {{ "num_peaks": 20 }} }}"#
        )
        .expect("write config");

        let config = DeskewConfig::load(file.path()).expect("load config");
        assert_eq!(config.pipeline, PipelineKind::Iterative);
        assert_eq!(config.trim_fraction, 0.1);
        assert_eq!(config.refine.num_peaks, 20);
        assert_eq!(config.refine.window_multiplier, 3.0);
        assert_eq!(config.active_estimator(), EstimatorKind::TrimmedCircularMean);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write config");
        assert!(matches!(
            DeskewConfig::load(file.path()),
            Err(RichtwerkError::Serialization(_))
        ));
    }

    #[test]
    fn set_active_estimator_targets_configured_pipeline() {
        let mut config = DeskewConfig {
            pipeline: PipelineKind::SinglePass,
            ..Default::default()
        };
        config.set_active_estimator(EstimatorKind::WeightedMedian);
        assert_eq!(config.single_pass_estimator, EstimatorKind::WeightedMedian);
        assert_eq!(config.two_cluster_estimator, EstimatorKind::WeightedMedian);
        assert_eq!(config.fine_estimator, EstimatorKind::TrimmedCircularMean);
    }

    #[test]
    fn kinds_parse_from_cli_spellings() {
        assert_eq!("mean".parse::<EstimatorKind>().ok(), Some(EstimatorKind::WeightedCircularMean));
        assert_eq!("Trimmed".parse::<EstimatorKind>().ok(), Some(EstimatorKind::TrimmedCircularMean));
        assert_eq!("single-pass".parse::<PipelineKind>().ok(), Some(PipelineKind::SinglePass));
        assert!("mode".parse::<EstimatorKind>().is_err());
    }
}
