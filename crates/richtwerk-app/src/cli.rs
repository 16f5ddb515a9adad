// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and how they override the loaded configuration.

use std::path::PathBuf;

use clap::Parser;
use richtwerk_core::config::{EstimatorKind, PipelineKind};
use richtwerk_core::error::Result;
use richtwerk_core::DeskewConfig;

/// Detect and correct the skew of a scanned page
#[derive(Parser, Debug)]
#[command(name = "richtwerk")]
#[command(version)]
#[command(about = "Detect and correct the skew of a scanned page", long_about = None)]
pub struct Cli {
    /// Scanned page to deskew (PNG, JPEG, TIFF, ...)
    pub input: PathBuf,

    /// Where to write the corrected image [default: output.file_name from the config]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Estimation pipeline: two-cluster, single-pass or iterative
    #[arg(long)]
    pub pipeline: Option<PipelineKind>,

    /// Estimator for the selected pipeline: mean, median or trimmed
    #[arg(long)]
    pub estimator: Option<EstimatorKind>,

    /// Minimum separation between the two modes, in degrees
    #[arg(long, value_name = "DEG")]
    pub separation: Option<f64>,

    /// Fraction of weight trimmed from each tail by the trimmed mean
    #[arg(long, value_name = "FRACTION")]
    pub trim: Option<f64>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grow the canvas so the whole rotated page stays visible
    #[arg(long)]
    pub resize: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Report the rotation without writing an image
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Load the configuration file (or defaults) and apply the flags on top.
    pub fn resolve_config(&self) -> Result<DeskewConfig> {
        let config = match &self.config {
            Some(path) => DeskewConfig::load(path)?,
            None => DeskewConfig::default(),
        };
        self.apply(config)
    }

    /// Apply the command-line overrides to `config` and validate the result.
    pub fn apply(&self, mut config: DeskewConfig) -> Result<DeskewConfig> {
        if let Some(pipeline) = self.pipeline {
            config.pipeline = pipeline;
        }
        if let Some(kind) = self.estimator {
            config.set_active_estimator(kind);
        }
        if let Some(degrees) = self.separation {
            config.separation_threshold = degrees.to_radians();
        }
        if let Some(fraction) = self.trim {
            config.trim_fraction = fraction;
        }
        if self.resize {
            config.output.resize_to_fit = true;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn output_path(&self, config: &DeskewConfig) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.file_name))
    }

    /// `tracing` filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use richtwerk_core::RichtwerkError;
    use std::io::Write;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_is_required() {
        let err = Cli::try_parse_from(["richtwerk"]).unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["richtwerk", "page.png"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
        assert!(!cli.dry_run && !cli.json && !cli.resize);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config, DeskewConfig::default());
        assert_eq!(cli.output_path(&config), PathBuf::from("rotated_image.png"));
    }

    #[test]
    fn flags_override_the_config() {
        let cli = Cli::try_parse_from([
            "richtwerk",
            "page.png",
            "-o",
            "straight.png",
            "--pipeline",
            "single-pass",
            "--estimator",
            "mean",
            "--separation",
            "30",
            "--trim",
            "0.1",
            "--resize",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "debug");

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.pipeline, PipelineKind::SinglePass);
        assert_eq!(config.single_pass_estimator, EstimatorKind::WeightedCircularMean);
        assert!((config.separation_threshold - 30f64.to_radians()).abs() < 1e-12);
        assert_eq!(config.trim_fraction, 0.1);
        assert!(config.output.resize_to_fit);
        assert_eq!(cli.output_path(&config), PathBuf::from("straight.png"));
    }

    #[test]
    fn unknown_pipeline_is_a_parse_error() {
        assert!(Cli::try_parse_from(["richtwerk", "page.png", "--pipeline", "sideways"]).is_err());
    }

    #[test]
    fn out_of_range_trim_is_rejected() {
        let cli = Cli::try_parse_from(["richtwerk", "page.png", "--trim", "0.6"]).unwrap();
        assert!(matches!(
            cli.resolve_config(),
            Err(RichtwerkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_file_is_loaded_before_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pipeline": "iterative", "trim_fraction": 0.2 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let cli =
            Cli::try_parse_from(["richtwerk", "page.png", "--config", &path, "--trim", "0.3"])
                .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.pipeline, PipelineKind::Iterative);
        assert_eq!(config.trim_fraction, 0.3);
    }
}
