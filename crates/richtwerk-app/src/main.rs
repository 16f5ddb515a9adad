// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Richtwerk: document skew detection and correction
//
// Entry point. Initialises logging, resolves the configuration, deskews the
// input page and reports the outcome.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use richtwerk_core::human_errors::humanize_error;
use richtwerk_core::{Dimensions, RichtwerkError, SkewReport};
use richtwerk_document::ScanDeskewer;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose > 0 {
        tracing_subscriber::EnvFilter::new(cli.log_level())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(input = %cli.input.display(), "Richtwerk starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "deskew failed");
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::from(human.exit_code)
        }
    }
}

fn run(cli: &Cli) -> Result<(), RichtwerkError> {
    let config = cli.resolve_config()?;
    let output = cli.output_path(&config);
    let dry_run = cli.dry_run;

    let deskewer = ScanDeskewer::open(&cli.input, config)?;
    let dimensions = deskewer.dimensions();
    let report = deskewer.detect_skew()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(dimensions, &report);
    }

    if dry_run {
        tracing::info!("dry run; no image written");
        return Ok(());
    }
    deskewer.correct(report.rotation).save(&output)?;
    if !cli.json {
        println!("Saved {}", output.display());
    }
    Ok(())
}

fn print_report(dimensions: Dimensions, report: &SkewReport) {
    println!("{} {}", dimensions.height, dimensions.width);

    match report.modes.secondary {
        Some(secondary) => println!(
            "Modes: {:.2}° and {:.2}°",
            report.modes.primary.degrees(),
            secondary.degrees()
        ),
        None => println!("Modes: {:.2}° (single family)", report.modes.primary.degrees()),
    }

    for (label, cluster) in ["First", "Second"].iter().zip(&report.clusters) {
        println!(
            "{label} cluster says: rotate by {}",
            cluster.suggested_rotation()
        );
    }

    if let Some(coarse) = report.coarse_degrees {
        println!("Coarse estimate: {coarse:.2}°");
    }
    if let Some(refined) = report.refined_degrees {
        println!("Refined estimate: {refined:.4}°");
    }
    println!("Suggested rotation: {}", report.rotation);
}
