//! # Ingredient Parser
//!
//! Turns one free-form ingredient line into a [`ParsedIngredient`]. The line
//! runs through a fixed sequence of stages over a single mutable parse state;
//! each stage removes what it recognizes and hands the remainder on.
//!
//! ## Features
//!
//! - Quantities: fractions, unicode glyphs, mixed numbers, ranges, number words
//! - Units from the language profile, with container and piece preferences
//! - Multipliers ("2 x 100 g") and size descriptors ("1-inch", "15-ounce")
//! - Annotations from parentheses, comma clauses and trailing dash clauses
//! - Flags: approximate, optional, to serve, to taste
//! - Preparation instructions moved out of the ingredient name
//! - Alternatives ("8 oz / 225g", "or 1/2 cup kefir whey") when requested
//!
//! ## Usage
//!
//! ```rust
//! use recipe_ingredient_parser::IngredientParser;
//!
//! let parser = IngredientParser::default();
//! let parsed = parser.parse("1 1/2 teaspoon water", "eng");
//! assert_eq!(parsed.quantity, 1.5);
//! assert_eq!(parsed.unit.as_deref(), Some("teaspoon"));
//! assert_eq!(parsed.ingredient, "water");
//! ```

use crate::alternatives::{
    inherit_amount, promote_additional_parts, split_inline_unit_alternative, split_joiner_alternative,
    split_slash_alternatives, FragmentParser,
};
use crate::combine::combine;
use crate::flags::{detect_approx, detect_flags, remove_optional_label, strip_flag_phrases, Flags};
use crate::fractions::{convert_from_fraction, convert_to_number, find_quantity, FRACTION_GLYPHS};
use crate::ingredient_model::{Alternative, ParsedIngredient};
use crate::instructions::{extract_from_parts, extract_instructions, split_glued_instructions, sweep_adverbs};
use crate::language_profile::{LanguageProfile, LanguageRegistry, DEFAULT_REGISTRY};
use crate::multiplier::{
    extract_container_size, extract_inch_size_descriptor, extract_multiplier, handle_implicit_inch_descriptor,
};
use crate::number_words::text_to_number;
use crate::parser_config::{ParseOptions, MAX_ALTERNATIVES, SMALL_CAN_OUNCES};
use crate::postprocess::{
    append_piece_inch_size, apply_count_weight_range, apply_multiplier, apply_unit, clean_parts, fallback_ingredient,
    fallback_unit, join_additional, resolve_range, sweep_approx,
};
use crate::pretty_print::pretty_print;
use crate::text_processing::{
    clean_characters, collapse_whitespace, extract_comma_additional, extract_dash_clause,
    extract_parenthetical_segments, normalize_ampersand_fractions, normalize_stray_fraction_separators,
    remove_leading_dashes, remove_list_markers, strip_leading_punctuation,
};
use crate::units::{get_symbol, get_unit, remove_unit, unit_by_key, UnitMatch};
use log::trace;
use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

/// Weight and volume units a container word takes precedence over
const CONTAINER_PREFERRED_OVER: &[&str] = &["ounce", "pound", "gram", "kilogram", "liter", "milliliter"];

/// Separators between ingredients in a block of text
const LINE_SEPARATORS: &[char] = &[',', '👉', '🏻', '\r', '\n', '-'];

/// A fraction left at the start of the name ("½ lemon" after "juice of")
static INGREDIENT_LEADING_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(\d+/\d+|[{FRACTION_GLYPHS}])\s+")).expect("Leading fraction pattern should be valid")
});

/// Parses ingredient lines against the profiles of a language registry
#[derive(Debug, Clone)]
pub struct IngredientParser {
    registry: Arc<LanguageRegistry>,
}

impl Default for IngredientParser {
    /// A parser over the built-in profiles
    fn default() -> Self {
        Self::new(Arc::clone(&DEFAULT_REGISTRY))
    }
}

impl IngredientParser {
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Parse a line with the default options
    pub fn parse(&self, line: &str, language: &str) -> ParsedIngredient {
        self.parse_with_options(line, language, &ParseOptions::default())
    }

    /// Parse a line.
    ///
    /// An unknown language yields a record whose ingredient is the trimmed line.
    pub fn parse_with_options(&self, line: &str, language: &str, options: &ParseOptions) -> ParsedIngredient {
        let original = line.trim();
        let Some(profile) = self.registry.get(language) else {
            tracing::warn!(language, "no language profile registered, line left unparsed");
            return ParsedIngredient {
                ingredient: original.to_string(),
                original_string: original.to_string(),
                ..ParsedIngredient::default()
            };
        };
        if original.is_empty() {
            return ParsedIngredient::empty("");
        }

        let fragment_options = options.for_fragment();
        let parse_fragment = |fragment: &str| self.parse_with_options(fragment, language, &fragment_options);

        let mut state = ParseState::new(original);
        state.prepare(&profile);
        state.split_word_number_can(&profile);
        state.extract_annotations();
        if options.include_alternatives {
            state.split_alternatives(&profile, &parse_fragment);
        }
        state.detect_line_flags(&profile);
        state.extract_amount(&profile);
        state.prepare_rest(&profile, options, &parse_fragment);
        state.recognize_unit(&profile);
        state.clean_ingredient(&profile);
        state.recover_leading_fraction(&profile);

        let result = state.assemble(&profile, options);
        tracing::debug!(
            language = %profile.code,
            quantity = result.quantity,
            unit = ?result.unit,
            ingredient = %result.ingredient,
            alternatives = result.alternatives.len(),
            "parsed ingredient line"
        );
        result
    }

    /// Parse an arbitrary JSON value; anything but a string gives the empty record
    pub fn parse_value(&self, value: &Value, language: &str, options: &ParseOptions) -> ParsedIngredient {
        match value {
            Value::String(line) => self.parse_with_options(line, language, options),
            other => {
                tracing::debug!(kind = json_kind(other), "non-string ingredient input");
                ParsedIngredient::empty("")
            }
        }
    }

    /// Split a block of text into ingredients and parse each one.
    ///
    /// Entries that end up without an ingredient name are dropped.
    pub fn multi_line_parse(&self, text: &str, language: &str) -> Vec<ParsedIngredient> {
        text.split(LINE_SEPARATORS)
            .map(|line| self.parse(line, language))
            .filter(|parsed| !parsed.ingredient.is_empty())
            .collect()
    }

    /// Merge duplicate entries by ingredient and unit
    pub fn combine(&self, ingredients: &[ParsedIngredient]) -> Vec<ParsedIngredient> {
        combine(ingredients)
    }

    /// Render a record as "1 1/2 teaspoons water"
    pub fn pretty_printing_press(&self, ingredient: &ParsedIngredient, language: &str) -> String {
        let profile = self.registry.get(language);
        pretty_print(ingredient, profile.as_deref())
    }

    /// Symbol for a unit key or surface name, empty when unknown
    pub fn get_symbol(&self, unit: &str, language: &str) -> String {
        self.registry
            .get(language)
            .map(|profile| get_symbol(unit, &profile))
            .unwrap_or_default()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Everything learned about a line while its stages run
#[derive(Debug)]
struct ParseState {
    original: String,
    /// The working line before the quantity is taken
    line: String,
    /// Annotation fragments, in the order they were found
    parts: Vec<String>,
    instructions: Vec<String>,
    alternatives: Vec<Alternative>,
    /// Alternatives that take the primary's amount when they lack one
    inheriting: Vec<usize>,
    flags: Flags,
    multiplier: f64,
    had_word_number_can: bool,
    /// The quantity was read from a word rather than digits
    word_quantity: bool,
    container_size: Option<String>,
    /// Canonical quantity string
    quantity: Option<String>,
    /// The line after the quantity
    rest: String,
    rest_before_unit: String,
    unit: Option<UnitMatch>,
    ingredient: String,
}

impl ParseState {
    fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            line: original.to_string(),
            parts: Vec::new(),
            instructions: Vec::new(),
            alternatives: Vec::new(),
            inheriting: Vec::new(),
            flags: Flags::default(),
            multiplier: 1.0,
            had_word_number_can: false,
            word_quantity: false,
            container_size: None,
            quantity: None,
            rest: String::new(),
            rest_before_unit: String::new(),
            unit: None,
            ingredient: String::new(),
        }
    }

    fn prepare(&mut self, profile: &LanguageProfile) {
        let line = clean_characters(&self.line);
        let (line, labelled) = remove_optional_label(&line, profile);
        self.flags.optional |= labelled;
        self.line = remove_list_markers(&line).trim().to_string();
    }

    /// "Three 15-ounce cans of hominy" becomes "3 cans of hominy" with "15-ounce" kept aside
    fn split_word_number_can(&mut self, profile: &LanguageProfile) {
        let Some(pattern) = &profile.patterns().word_number_can else {
            return;
        };
        let Some(caps) = pattern.captures(&self.line) else {
            return;
        };
        let Some(count) = text_to_number(&caps[1], profile).filter(|count| *count > 0) else {
            return;
        };
        self.parts.push(caps[2].trim().to_string());
        self.line = collapse_whitespace(&format!("{} {} {}", count, &caps[3], &caps[4]));
        self.had_word_number_can = true;
        trace!("Word-number can rewritten to '{}'", self.line);
    }

    fn extract_annotations(&mut self) {
        let (line, segments) = extract_parenthetical_segments(&self.line);
        self.parts.extend(segments);
        let (line, clauses) = extract_comma_additional(&line);
        self.parts.extend(clauses);
        let (line, clause) = extract_dash_clause(&line);
        self.parts.extend(clause);
        self.line = collapse_whitespace(&line);
    }

    fn split_alternatives(&mut self, profile: &LanguageProfile, parse: &FragmentParser) {
        let parts = std::mem::take(&mut self.parts);
        let (kept, promoted) = promote_additional_parts(parts, profile, parse);
        self.parts = kept;
        self.alternatives.extend(promoted);

        if self.line.contains('/') {
            let split = split_slash_alternatives(&self.line, profile, parse);
            self.line = split.line;
            self.alternatives.extend(split.alternatives);
            self.instructions.extend(split.instructions);
            self.parts.extend(split.leftovers);
        }

        let joined = split_joiner_alternative(&self.line, profile, parse);
        self.line = joined.line;
        self.instructions.extend(joined.instructions);
        if let Some(alternative) = joined.alternative {
            if joined.inherits {
                self.inheriting.push(self.alternatives.len());
            }
            self.alternatives.push(alternative);
        }
    }

    fn detect_line_flags(&mut self, profile: &LanguageProfile) {
        self.line = detect_approx(&self.line, &mut self.flags, profile);
        self.line = detect_flags(&self.line, Some(&self.original), &mut self.flags, profile);
        self.line = normalize_stray_fraction_separators(&normalize_ampersand_fractions(&self.line));
    }

    fn extract_amount(&mut self, profile: &LanguageProfile) {
        let (multiplier, line) = extract_multiplier(&self.line, profile);
        self.multiplier = multiplier;
        self.word_quantity = line.chars().next().is_some_and(char::is_alphabetic);

        let (quantity, rest) = find_quantity(&line, profile);
        self.quantity = quantity
            .map(|q| convert_from_fraction(&q, profile))
            .filter(|q| !q.is_empty());
        let rest = detect_approx(&rest, &mut self.flags, profile);
        self.rest = detect_flags(&rest, None, &mut self.flags, profile);
    }

    fn prepare_rest(&mut self, profile: &LanguageProfile, options: &ParseOptions, parse: &FragmentParser) {
        if options.include_alternatives {
            if let Some((rest, alternative)) = split_inline_unit_alternative(&self.rest, profile, parse) {
                self.rest = rest;
                self.alternatives.push(alternative);
            }
        }

        let rest = remove_leading_dashes(&self.rest);
        let (rest, size) = extract_inch_size_descriptor(&rest, profile);
        self.parts.extend(size);
        let rest = if self.word_quantity {
            let (rest, size) = handle_implicit_inch_descriptor(&rest, profile);
            self.parts.extend(size);
            rest
        } else {
            rest
        };
        let (rest, size) = extract_container_size(&rest, profile);
        self.container_size = size;
        self.rest = rest;
    }

    fn recognize_unit(&mut self, profile: &LanguageProfile) {
        self.rest_before_unit = self.rest.clone();

        let mut found = get_unit(&self.rest, profile);
        if let Some(taste) = found.as_ref().filter(|unit| unit.to_taste) {
            self.flags.to_taste = true;
            self.rest = remove_unit(&self.rest, taste, profile);
            found = get_unit(&self.rest, profile).filter(|unit| !unit.to_taste);
        }
        let Some(found) = found else {
            self.ingredient = self.rest.clone();
            self.strip_leading_preposition(profile);
            return;
        };

        let patterns = profile.patterns();
        let mut ingredient = remove_unit(&self.rest, &found, profile);
        let mut unit = found.clone();

        if let Some(container) = self.preferred_container(&found, profile) {
            if let Some(word) = &patterns.container_word {
                ingredient = collapse_whitespace(&word.replace(&ingredient, " "));
            }
            trace!("Container '{}' preferred over '{}'", container.key, found.key);
            self.count_containers(&found);
            unit = container;
        }

        if unit.key == "inch" {
            if let Some(piece) = patterns.piece_word.as_ref().filter(|re| re.is_match(&self.rest_before_unit)) {
                if let Some(caps) = patterns.inch_mention.as_ref().and_then(|re| re.captures(&self.rest_before_unit)) {
                    self.parts.push(caps[1].trim().to_string());
                }
                ingredient = collapse_whitespace(&piece.replace(&ingredient, " "));
                if let Some(piece_unit) = unit_by_key("piece", profile) {
                    unit = piece_unit;
                }
            }
        }

        self.unit = Some(unit);
        self.ingredient = ingredient;
        self.strip_leading_preposition(profile);
    }

    /// A can, bag or pack named next to a weight or volume wins over it, except for small ounce cans
    fn preferred_container(&self, unit: &UnitMatch, profile: &LanguageProfile) -> Option<UnitMatch> {
        if !CONTAINER_PREFERRED_OVER.contains(&unit.key.as_str()) {
            return None;
        }
        let patterns = profile.patterns();
        let word = patterns.container_word.as_ref()?.find(&self.rest_before_unit)?;
        let key = patterns.container_keys.get(&word.as_str().to_lowercase())?;
        if key == "can" && unit.key == "ounce" && !self.had_word_number_can {
            let amount = self.quantity.as_deref().map_or(0.0, |q| convert_to_number(q, profile));
            if amount <= SMALL_CAN_OUNCES {
                return None;
            }
        }
        unit_by_key(key, profile)
    }

    /// The amount before a preferred container is its size ("400g cans"); the count is the multiplier
    fn count_containers(&mut self, size_unit: &UnitMatch) {
        if let Some(amount) = self.quantity.take() {
            let unit_text = size_unit.matched.trim_matches(|c: char| !c.is_alphanumeric());
            self.parts.push(format!("{amount} {unit_text}"));
        }
        self.quantity = Some(self.multiplier.to_string());
        self.multiplier = 1.0;
    }

    fn strip_leading_preposition(&mut self, profile: &LanguageProfile) {
        if let Some(re) = &profile.patterns().preposition_leading {
            self.ingredient = re.replace(&self.ingredient, "").trim().to_string();
        }
    }

    fn clean_ingredient(&mut self, profile: &LanguageProfile) {
        let patterns = profile.patterns();

        let text = split_glued_instructions(&self.ingredient, profile);
        let (text, found) = extract_instructions(&text, profile);
        self.instructions.extend(found);
        let (mut parts, found) = extract_from_parts(std::mem::take(&mut self.parts), profile);
        self.instructions.extend(found);
        let (mut text, adverbs) = sweep_adverbs(&text, profile);
        self.instructions.extend(adverbs);

        if !text.chars().any(char::is_alphabetic) {
            let named = parts.iter().position(|part| {
                let stripped = strip_flag_phrases(part, profile);
                stripped.chars().any(char::is_alphabetic) && !stripped.chars().any(|c| c.is_ascii_digit())
            });
            if let Some(index) = named {
                let promoted = parts.remove(index);
                trace!("Annotation '{}' promoted to ingredient", promoted);
                text = strip_flag_phrases(&promoted, profile);
            }
        }

        if self.unit.is_some() {
            if let Some(leading) = patterns.measure_unit_leading.as_ref().and_then(|re| re.find(&text)) {
                if leading.end() < text.len() {
                    parts.push(leading.as_str().trim().to_string());
                    text = text[leading.end()..].trim().to_string();
                }
            }
        }

        loop {
            let before = text.clone();
            for re in [&patterns.preposition_leading, &patterns.filler_leading, &patterns.stopword_edges]
                .into_iter()
                .flatten()
            {
                text = re.replace(&text, "").trim().to_string();
            }
            text = strip_leading_punctuation(&text).trim().to_string();
            if text == before {
                break;
            }
        }

        if let Some(size) = self.container_size.take() {
            if self.unit.as_ref().is_some_and(|unit| unit.key == "pack") {
                text = collapse_whitespace(&format!("{size} {text}"));
            } else {
                parts.push(size);
            }
        }

        self.ingredient = text;
        self.parts = parts;
    }

    fn recover_leading_fraction(&mut self, profile: &LanguageProfile) {
        if self.quantity.is_some() {
            return;
        }
        let Some(caps) = INGREDIENT_LEADING_FRACTION.captures(&self.ingredient) else {
            return;
        };
        let end = caps.get(0).map_or(0, |m| m.end());
        self.quantity = Some(convert_from_fraction(&caps[1], profile));
        self.ingredient = self.ingredient[end..].trim().to_string();
    }

    fn assemble(mut self, profile: &LanguageProfile, options: &ParseOptions) -> ParsedIngredient {
        let (quantity, min_qty, max_qty) = resolve_range(self.quantity.as_deref(), &self.original, profile);
        let mut result = ParsedIngredient {
            quantity,
            min_qty,
            max_qty,
            ingredient: self.ingredient,
            original_string: self.original,
            ..ParsedIngredient::default()
        };

        if let Some(unit) = &self.unit {
            apply_unit(&mut result, unit, profile, options.include_unit_systems);
        }
        apply_multiplier(&mut result, self.multiplier);

        let mut force_unit_null = apply_count_weight_range(
            &mut result,
            &self.rest_before_unit,
            &mut self.instructions,
            &mut self.parts,
            profile,
        );
        append_piece_inch_size(result.unit.as_deref(), &mut self.parts, &result.original_string, profile);

        let mut parts = clean_parts(self.parts, &self.flags, profile);
        sweep_approx(&mut result.ingredient, &mut parts, &mut self.flags, profile);

        if options.include_alternatives {
            let mut alternatives = self.alternatives;
            for index in self.inheriting {
                if let Some(alternative) = alternatives.get_mut(index) {
                    inherit_amount(alternative, &result);
                }
            }
            alternatives.truncate(MAX_ALTERNATIVES);
            result.alternatives = alternatives;
        }

        if self.flags.to_taste && result.quantity == 0.0 {
            result.clear_unit();
            force_unit_null = true;
        }
        if !force_unit_null {
            fallback_unit(&mut result, &mut self.flags, profile, options.include_unit_systems);
        }
        fallback_ingredient(&mut result);

        result.additional = join_additional(&parts);
        result.instructions = dedupe_instructions(self.instructions);
        result.approx = self.flags.approx;
        result.optional = self.flags.optional;
        result.to_serve = self.flags.to_serve;
        result.to_taste = self.flags.to_taste;
        result
    }
}

fn dedupe_instructions(instructions: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(instructions.len());
    for instruction in instructions {
        if !unique.iter().any(|seen| seen.eq_ignore_ascii_case(&instruction)) {
            unique.push(instruction);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> IngredientParser {
        IngredientParser::new(Arc::clone(&DEFAULT_REGISTRY))
    }

    #[test]
    fn test_basic_lines() {
        let parser = parser();
        let cases = vec![
            ("1 1/2 teaspoon water", 1.5, Some("teaspoon"), "water"),
            ("2 cups flour", 2.0, Some("cup"), "flour"),
            ("1kg piece of pork belly", 1.0, Some("kilogram"), "piece of pork belly"),
            ("25g walnut pieces (chopped)", 25.0, Some("gram"), "walnut pieces"),
            ("Powdered Sugar", 0.0, None, "Powdered Sugar"),
            ("2 eggs", 2.0, None, "eggs"),
        ];
        for (input, quantity, unit, ingredient) in cases {
            let parsed = parser.parse(input, "eng");
            assert_eq!(parsed.quantity, quantity, "quantity of {input:?}");
            assert_eq!(parsed.unit.as_deref(), unit, "unit of {input:?}");
            assert_eq!(parsed.ingredient, ingredient, "ingredient of {input:?}");
        }
    }

    #[test]
    fn test_symbol_and_plural() {
        let parsed = parser().parse("1 1/2 teaspoon water", "eng");
        assert_eq!(parsed.unit_plural.as_deref(), Some("teaspoons"));
        assert_eq!(parsed.symbol.as_deref(), Some("tsp"));
        assert_eq!(parsed.min_qty, 1.5);
        assert_eq!(parsed.max_qty, 1.5);
        assert_eq!(parsed.original_string, "1 1/2 teaspoon water");
    }

    #[test]
    fn test_unknown_language_degrades() {
        let parsed = parser().parse("  2 cups flour ", "xx");
        assert_eq!(parsed.ingredient, "2 cups flour");
        assert_eq!(parsed.original_string, "2 cups flour");
        assert_eq!(parsed.quantity, 0.0);
        assert_eq!(parsed.unit, None);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parser().parse("   ", "eng"), ParsedIngredient::empty(""));
    }

    #[test]
    fn test_parse_value() {
        let parser = parser();
        let options = ParseOptions::default();
        assert_eq!(parser.parse_value(&Value::Null, "eng", &options), ParsedIngredient::empty(""));
        assert_eq!(
            parser.parse_value(&serde_json::json!(42), "eng", &options),
            ParsedIngredient::empty("")
        );
        let parsed = parser.parse_value(&serde_json::json!("2 cups flour"), "eng", &options);
        assert_eq!(parsed.unit.as_deref(), Some("cup"));
    }

    #[test]
    fn test_multiplier_line() {
        let parsed = parser().parse("2 x 100 g tomatoes", "eng");
        assert_eq!(parsed.quantity, 200.0);
        assert_eq!(parsed.multiplier, Some(2.0));
        assert_eq!(parsed.per_item_quantity, Some(100.0));
        assert_eq!(parsed.unit.as_deref(), Some("gram"));
        assert_eq!(parsed.ingredient, "tomatoes");

        let cases = vec![("2 x eggs", 2.0), ("3 x large eggs", 3.0)];
        for (input, count) in cases {
            let parsed = parser().parse(input, "eng");
            assert_eq!(parsed.quantity, count, "quantity of {input:?}");
            assert_eq!((parsed.min_qty, parsed.max_qty), (count, count), "range of {input:?}");
            assert_eq!(parsed.multiplier, None, "multiplier of {input:?}");
            assert!(parsed.ingredient.ends_with("eggs"), "ingredient of {input:?}");
        }
    }

    #[test]
    fn test_container_lines() {
        let parser = parser();
        let parsed = parser.parse("1 (14.5 oz) can tomatoes", "eng");
        assert_eq!(parsed.unit.as_deref(), Some("can"));
        assert_eq!(parsed.ingredient, "tomatoes");
        assert_eq!(parsed.additional.as_deref(), Some("14.5 oz"));

        let parsed = parser.parse("Three 15-ounce cans of hominy, drained", "eng");
        assert_eq!(parsed.quantity, 3.0);
        assert_eq!(parsed.unit.as_deref(), Some("can"));
        assert_eq!(parsed.ingredient, "hominy");
        assert_eq!(parsed.additional.as_deref(), Some("15-ounce"));
        assert_eq!(parsed.instructions, vec!["drained"]);

        let cases = vec![
            ("2x 400g cans tomatoes", 2.0, "can", "400 g"),
            ("28 oz can crushed tomatoes", 1.0, "can", "28 oz"),
        ];
        for (input, quantity, unit, size) in cases {
            let parsed = parser.parse(input, "eng");
            assert_eq!(parsed.quantity, quantity, "quantity of {input:?}");
            assert_eq!(parsed.unit.as_deref(), Some(unit), "unit of {input:?}");
            assert_eq!(parsed.ingredient, "tomatoes", "ingredient of {input:?}");
            assert_eq!(parsed.additional.as_deref(), Some(size), "additional of {input:?}");
            assert_eq!(parsed.multiplier, None, "multiplier of {input:?}");
        }

        let parsed = parser.parse("14 oz can tomatoes", "eng");
        assert_eq!(parsed.quantity, 14.0);
        assert_eq!(parsed.unit.as_deref(), Some("ounce"));
    }

    #[test]
    fn test_count_with_weight_range() {
        let parsed = parser().parse("1 3-4 lb whole chicken", "eng");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.ingredient, "whole chicken");
        assert_eq!(parsed.additional.as_deref(), Some("3-4 lb"));
    }

    #[test]
    fn test_multi_line_parse() {
        let parsed = parser().multi_line_parse("2 cups flour\n1 tsp salt, \r\n", "eng");
        let names: Vec<&str> = parsed.iter().map(|p| p.ingredient.as_str()).collect();
        assert_eq!(names, vec!["flour", "salt"]);
    }

    #[test]
    fn test_get_symbol() {
        let parser = parser();
        assert_eq!(parser.get_symbol("tablespoon", "eng"), "tbs");
        assert_eq!(parser.get_symbol("tablespoon", "xx"), "");
    }

    #[test]
    fn test_dedupe_instructions() {
        assert_eq!(
            dedupe_instructions(vec!["Chopped".to_string(), "chopped".to_string(), "raw".to_string()]),
            vec!["Chopped", "raw"]
        );
    }
}
