//! # Parser Configuration Module
//!
//! This module defines the per-call parse options, the environment-driven
//! configuration used by the command-line wrapper, and the constants shared
//! across the parsing pipeline.

use crate::parser_errors::ParserError;
use std::env;
use std::path::PathBuf;

// Constants for parser configuration
pub const DEFAULT_LANGUAGE: &str = "eng";
pub const QUANTITY_DECIMALS: usize = 3;
pub const SMALL_CAN_OUNCES: f64 = 14.0; // cans up to 14 oz keep the weight unit
pub const MAX_ALTERNATIVES: usize = 8;

pub const ENV_LANGUAGE: &str = "INGREDIENT_PARSER_LANGUAGE";
pub const ENV_INCLUDE_ALTERNATIVES: &str = "INGREDIENT_PARSER_INCLUDE_ALTERNATIVES";
pub const ENV_INCLUDE_UNIT_SYSTEMS: &str = "INGREDIENT_PARSER_INCLUDE_UNIT_SYSTEMS";
pub const ENV_LOCALES_DIR: &str = "INGREDIENT_PARSER_LOCALES_DIR";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Options controlling which optional sections a parse produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Attach `unitSystem` (metric, imperial, americanVolumetric) to the result
    pub include_unit_systems: bool,
    /// Detect parenthetical, slash and "or" alternatives
    pub include_alternatives: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit_systems(mut self, enabled: bool) -> Self {
        self.include_unit_systems = enabled;
        self
    }

    pub fn with_alternatives(mut self, enabled: bool) -> Self {
        self.include_alternatives = enabled;
        self
    }

    /// Options for a recursive fragment parse: alternatives never recurse
    pub(crate) fn for_fragment(self) -> Self {
        Self {
            include_unit_systems: self.include_unit_systems,
            include_alternatives: false,
        }
    }
}

/// Configuration for the command-line wrapper
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Language code or tag (e.g., "eng", "en-US", "deu")
    pub language: String,
    /// Parse options applied to every line
    pub options: ParseOptions,
    /// Extra directory of JSON language profiles loaded on top of the built-ins
    pub locales_dir: Option<PathBuf>,
    /// Emit JSON log lines through tracing-subscriber instead of env_logger
    pub json_logs: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            options: ParseOptions::default(),
            locales_dir: None,
            json_logs: false,
        }
    }
}

impl ParserConfig {
    /// Build a configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            language: env::var(ENV_LANGUAGE)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.language),
            options: ParseOptions {
                include_alternatives: env_flag(ENV_INCLUDE_ALTERNATIVES),
                include_unit_systems: env_flag(ENV_INCLUDE_UNIT_SYSTEMS),
            },
            locales_dir: env::var(ENV_LOCALES_DIR)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            json_logs: env::var(ENV_LOG_FORMAT)
                .map(|value| value.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Validate configuration values before use
    pub fn validate(&self) -> Result<(), ParserError> {
        let language = self.language.trim();
        if language.is_empty() {
            return Err(ParserError::Validation(
                "language code must not be empty".to_string(),
            ));
        }
        if !language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ParserError::Validation(format!(
                "language code '{language}' contains invalid characters"
            )));
        }
        if let Some(dir) = &self.locales_dir {
            if !dir.is_dir() {
                return Err(ParserError::Validation(format!(
                    "locales directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
