//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check preload names map onto resources
//! - Check the log level is one tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NumdbConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::NumdbConfig;
use crate::registry::is_valid_name;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyDataDir,
    InvalidPreloadName(String),
    DuplicatePreload(String),
    UnknownLogLevel(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDataDir => write!(f, "registry.data_dir must not be empty"),
            ValidationError::InvalidPreloadName(name) => {
                write!(f, "registry.preload contains invalid name {:?}", name)
            }
            ValidationError::DuplicatePreload(name) => {
                write!(f, "registry.preload lists {:?} more than once", name)
            }
            ValidationError::UnknownLogLevel(level) => {
                write!(f, "logging.level {:?} is not one of {}", level, LOG_LEVELS.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a deserialized configuration.
pub fn validate_config(config: &NumdbConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.registry.data_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataDir);
    }

    let mut seen = HashSet::new();
    for name in &config.registry.preload {
        if !is_valid_name(name) {
            errors.push(ValidationError::InvalidPreloadName(name.clone()));
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicatePreload(name.clone()));
        }
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&NumdbConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = NumdbConfig::default();
        config.registry.data_dir = PathBuf::new();
        config.registry.preload = vec!["isbn".into(), "../etc".into(), "isbn".into()];
        config.logging.level = "verbose".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyDataDir,
                ValidationError::InvalidPreloadName("../etc".into()),
                ValidationError::DuplicatePreload("isbn".into()),
                ValidationError::UnknownLogLevel("verbose".into()),
            ]
        );
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let mut config = NumdbConfig::default();
        config.logging.level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
