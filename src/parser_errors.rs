//! # Parser Error Types Module
//!
//! This module defines the error type used by the fallible edges of the parser:
//! loading and validating language profiles, resolving language codes strictly,
//! and validating configuration. Parsing itself never fails; missing pieces of an
//! ingredient line degrade to `None`, `0` or an empty list instead.

/// Custom error types for profile loading and configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ParserError {
    /// No profile is registered for the requested language code
    UnknownLanguage(String),
    /// A language profile document could not be read or is inconsistent
    InvalidProfile(String),
    /// A pattern built from profile data failed to compile
    PatternCompilation(String),
    /// Filesystem errors while loading profiles from a directory
    Io(String),
    /// Configuration validation errors
    Validation(String),
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserError::UnknownLanguage(code) => write!(f, "Unknown language: {code}"),
            ParserError::InvalidProfile(msg) => write!(f, "Invalid language profile: {msg}"),
            ParserError::PatternCompilation(msg) => write!(f, "Pattern compilation error: {msg}"),
            ParserError::Io(msg) => write!(f, "I/O error: {msg}"),
            ParserError::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ParserError {}

impl From<anyhow::Error> for ParserError {
    fn from(err: anyhow::Error) -> Self {
        ParserError::InvalidProfile(err.to_string())
    }
}

impl From<serde_json::Error> for ParserError {
    fn from(err: serde_json::Error) -> Self {
        ParserError::InvalidProfile(err.to_string())
    }
}

impl From<regex::Error> for ParserError {
    fn from(err: regex::Error) -> Self {
        ParserError::PatternCompilation(err.to_string())
    }
}

impl From<std::io::Error> for ParserError {
    fn from(err: std::io::Error) -> Self {
        ParserError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ParserError::UnknownLanguage("xyz".to_string()).to_string(),
            "Unknown language: xyz"
        );
        assert_eq!(
            ParserError::Validation("empty language".to_string()).to_string(),
            "Validation error: empty language"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let converted: ParserError = err.into();
        assert!(matches!(converted, ParserError::InvalidProfile(_)));
    }

    #[test]
    fn test_from_regex_error() {
        let err = regex::Regex::new("(unclosed").unwrap_err();
        let converted: ParserError = err.into();
        assert!(matches!(converted, ParserError::PatternCompilation(_)));
    }

    #[test]
    fn test_from_anyhow_error() {
        let converted: ParserError = anyhow::anyhow!("broken table").into();
        assert_eq!(
            converted,
            ParserError::InvalidProfile("broken table".to_string())
        );
    }
}
