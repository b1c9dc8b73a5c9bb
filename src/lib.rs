//! # Recipe Ingredient Parser
//!
//! Parses free-form, multilingual recipe ingredient lines ("1 1/2 cups flour,
//! sifted (optional)") into structured records: quantity and range, unit,
//! ingredient name, annotations, preparation instructions, flags and
//! alternatives. Also renders records back into readable lines and merges
//! duplicate ingredients across a list.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_ingredient_parser::{parse, parse_with_options, pretty_printing_press, ParseOptions};
//!
//! let parsed = parse("1 (14.5 oz) can tomatoes", "eng");
//! assert_eq!(parsed.quantity, 1.0);
//! assert_eq!(parsed.unit.as_deref(), Some("can"));
//! assert_eq!(parsed.ingredient, "tomatoes");
//! assert_eq!(parsed.additional.as_deref(), Some("14.5 oz"));
//!
//! let options = ParseOptions::new().with_alternatives(true);
//! let parsed = parse_with_options("8 oz / 225g pasta", "eng", &options);
//! assert_eq!(parsed.alternatives[0].unit.as_deref(), Some("gram"));
//!
//! let parsed = parse("1.5 cup flour", "eng");
//! assert_eq!(pretty_printing_press(&parsed, "eng"), "1 1/2 cups flour");
//! ```

pub mod alternatives;
pub mod combine;
pub mod flags;
pub mod fractions;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod instructions;
pub mod language_profile;
pub mod multiplier;
pub mod number_words;
pub mod parser_config;
pub mod parser_errors;
pub mod postprocess;
pub mod pretty_print;
mod profile_patterns;
pub mod text_processing;
pub mod units;

pub use ingredient_model::{Alternative, ParsedIngredient};
pub use ingredient_parser::IngredientParser;
pub use language_profile::{LanguageProfile, LanguageRegistry, UnitDefinition};
pub use parser_config::{ParseOptions, ParserConfig};
pub use parser_errors::ParserError;

use language_profile::DEFAULT_REGISTRY;
use std::sync::Arc;

fn default_parser() -> IngredientParser {
    IngredientParser::new(Arc::clone(&DEFAULT_REGISTRY))
}

/// Parse one ingredient line with the built-in profiles
pub fn parse(line: &str, language: &str) -> ParsedIngredient {
    default_parser().parse(line, language)
}

pub fn parse_with_options(line: &str, language: &str, options: &ParseOptions) -> ParsedIngredient {
    default_parser().parse_with_options(line, language, options)
}

/// Parse a JSON value, returning the empty record for anything but a string
pub fn parse_value(value: &serde_json::Value, language: &str, options: &ParseOptions) -> ParsedIngredient {
    default_parser().parse_value(value, language, options)
}

/// Parse a block of text holding several ingredients
pub fn multi_line_parse(text: &str, language: &str) -> Vec<ParsedIngredient> {
    default_parser().multi_line_parse(text, language)
}

pub use combine::combine;

/// Render a record as a readable line ("1 1/2 cups flour")
pub fn pretty_printing_press(ingredient: &ParsedIngredient, language: &str) -> String {
    default_parser().pretty_printing_press(ingredient, language)
}

/// Symbol of a unit key or surface name, empty when unknown
pub fn get_symbol(unit: &str, language: &str) -> String {
    default_parser().get_symbol(unit, language)
}
