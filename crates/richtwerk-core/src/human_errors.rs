// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command-line driver.
//
// Every technical error is mapped to a plain message, a suggestion, and the
// process exit code the driver reports it with.

use crate::error::RichtwerkError;

/// Exit code for invalid arguments or configuration.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for images that cannot be read or written.
pub const EXIT_IMAGE: u8 = 3;
/// Exit code for images in which no usable lines were found.
pub const EXIT_NO_LINES: u8 = 4;

/// A human-readable error with a plain message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub exit_code: u8,
}

/// Convert a `RichtwerkError` into a `HumanError`.
pub fn humanize_error(err: &RichtwerkError) -> HumanError {
    match err {
        RichtwerkError::EmptyHistogram => HumanError {
            message: "No straight lines were found in this image.".into(),
            suggestion: "Check that the scan contains text or ruled lines and is not blank or heavily blurred.".into(),
            exit_code: EXIT_NO_LINES,
        },

        RichtwerkError::MedianUnreachable { .. }
        | RichtwerkError::TrimUnreachable { .. }
        | RichtwerkError::EmptyCluster => HumanError {
            message: "The detected lines carried no usable weight.".into(),
            suggestion: "Try lowering the Canny thresholds or the Hough peak threshold in the configuration.".into(),
            exit_code: EXIT_NO_LINES,
        },

        // Never leaves the core, but map it anyway.
        RichtwerkError::NoSecondMode { .. } => HumanError {
            message: "Only one family of lines was found.".into(),
            suggestion: "The result is based on a single line direction and may be less reliable.".into(),
            exit_code: EXIT_NO_LINES,
        },

        RichtwerkError::InvalidConfig(detail) | RichtwerkError::InvalidSearchSpace(detail) => {
            HumanError {
                message: "The configuration is not usable.".into(),
                suggestion: format!("Fix the setting and try again. ({detail})"),
                exit_code: EXIT_USAGE,
            }
        }

        RichtwerkError::Serialization(err) => HumanError {
            message: "The configuration file could not be parsed.".into(),
            suggestion: format!("Check the JSON syntax and field names. ({err})"),
            exit_code: EXIT_USAGE,
        },

        RichtwerkError::ImageError(detail) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: format!("The image may be damaged or in an unusual format. Try saving it as PNG first. ({detail})"),
            exit_code: EXIT_IMAGE,
        },

        RichtwerkError::Io(err) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check the path and its permissions. ({err})"),
            exit_code: EXIT_IMAGE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_histogram_is_no_lines() {
        let human = humanize_error(&RichtwerkError::EmptyHistogram);
        assert_eq!(human.exit_code, EXIT_NO_LINES);
        assert!(human.message.contains("No straight lines"));
    }

    #[test]
    fn median_unreachable_is_no_lines() {
        let human = humanize_error(&RichtwerkError::MedianUnreachable { total_weight: 0.0 });
        assert_eq!(human.exit_code, EXIT_NO_LINES);
    }

    #[test]
    fn config_errors_carry_detail() {
        let human = humanize_error(&RichtwerkError::InvalidConfig("trim_fraction".into()));
        assert_eq!(human.exit_code, EXIT_USAGE);
        assert!(human.suggestion.contains("trim_fraction"));
    }

    #[test]
    fn image_errors_map_to_image_exit_code() {
        let human = humanize_error(&RichtwerkError::ImageError("truncated PNG".into()));
        assert_eq!(human.exit_code, EXIT_IMAGE);
    }
}
