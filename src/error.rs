//! Error types for configuration and shape conversion

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::generator::ShapeKey;

/// Errors that can occur when building or loading a shape configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid range for {key}: min {min} is greater than max {max}")]
    InvalidRange { key: ShapeKey, min: f64, max: f64 },

    #[error("range {min} to {max} for {key} must lie within {low} to {high}")]
    OutOfBounds {
        key: ShapeKey,
        min: f64,
        max: f64,
        low: f64,
        high: f64,
    },

    #[error("at least one shape kind is required")]
    NoShapeKinds,

    #[error("unknown parameter '{0}'")]
    UnknownKey(String),

    #[error("{0} is a set of shape codes, not a range")]
    NotARange(ShapeKey),
}

impl ConfigError {
    /// Format the error with source context using ariadne
    ///
    /// Only TOML syntax errors carry a location; everything else falls back
    /// to the plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let ConfigError::Parse(err) = self else {
            return self.to_string();
        };
        let Some(span) = err.span() else {
            return self.to_string();
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid shape config")
            .with_label(
                Label::new((filename, span))
                    .with_message(err.message())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Errors raised while turning sampled shapes into markup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    #[error("invalid shape kind: {0}")]
    InvalidShapeKind(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ShapeConfig;

    #[test]
    fn test_format_points_at_toml_error() {
        let source = "shapes = [0, 1\n";
        let err = source.parse::<ShapeConfig>().unwrap_err();
        let report = err.format(source, "art.toml");
        assert!(report.contains("art.toml"));
        assert!(report.contains("invalid shape config"));
    }

    #[test]
    fn test_format_without_span_is_plain() {
        let err = ConfigError::NoShapeKinds;
        assert_eq!(err.format("", "art.toml"), err.to_string());
    }

    #[test]
    fn test_shape_error_message() {
        assert_eq!(
            ShapeError::InvalidShapeKind(2).to_string(),
            "invalid shape kind: 2"
        );
    }
}
