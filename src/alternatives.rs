//! # Alternatives Module
//!
//! Recognizes the other readings an ingredient line offers:
//!
//! - annotation fragments that parse on their own ("(or 1/2 cup kefir whey)")
//! - slash alternatives, spaced ("8 oz / 225g pasta") or unit-ish ("150g/5½oz butter")
//! - inline unit alternatives after the quantity ("3/4 cup/150 grams sugar")
//! - joiner alternatives ("oats or quinoa", "1/2 tsp black or 1 tsp white pepper")
//!
//! Fragments are parsed by the closure handed in by the orchestrator, which
//! runs the full pipeline with alternatives disabled.

use crate::flags::strip_flag_phrases;
use crate::fractions::{find_quantity, glyph_value, FRACTION_GLYPHS};
use crate::ingredient_model::{Alternative, ParsedIngredient};
use crate::instructions::extract_instructions;
use crate::language_profile::LanguageProfile;
use crate::multiplier::extract_multiplier;
use crate::units::{get_unit, remove_unit};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref SPACED_SLASH: Regex = Regex::new(r"\s+/\s+").expect("Spaced slash pattern should be valid");
    static ref UNITISH: Regex = Regex::new(r"\d[^\s]*[A-Za-z]").expect("Unit-ish pattern should be valid");
    static ref INLINE_UNIT_SLASH: Regex = Regex::new(&format!(
        r"^\s*(\p{{L}}+)\s*/\s*([~\d{FRACTION_GLYPHS}]+(?:\s*/\s*\d+)?)\s*(\p{{L}}+)\b(.*)$"
    ))
    .expect("Inline unit slash pattern should be valid");
}

/// Parses a fragment with alternatives disabled
pub type FragmentParser<'a> = dyn Fn(&str) -> ParsedIngredient + 'a;

/// Result of splitting slash alternatives off a line
#[derive(Debug, Default)]
pub struct SlashSplit {
    pub line: String,
    pub alternatives: Vec<Alternative>,
    /// Instruction words found in ingredient swaps, owed to the primary
    pub instructions: Vec<String>,
    /// Fragments that neither parsed nor named an ingredient
    pub leftovers: Vec<String>,
}

/// Result of splitting a joiner alternative off a line
#[derive(Debug, Default)]
pub struct JoinerSplit {
    pub line: String,
    pub alternative: Option<Alternative>,
    /// True when the alternative should take the primary's amount if it has none
    pub inherits: bool,
    pub instructions: Vec<String>,
}

/// True for ASCII digits and fraction glyphs ("½")
fn has_digit(text: &str) -> bool {
    text.chars().any(is_numeric_char)
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || glyph_value(c).is_some()
}

/// Parse a fragment into an alternative, if it qualifies as one.
///
/// The fragment needs a digit, must not hit an exclusion ("see note", "cut")
/// and must not open with an instruction. A leading joiner is dropped first.
pub fn fragment_alternative(
    fragment: &str,
    profile: &LanguageProfile,
    parse: &FragmentParser,
) -> Option<Alternative> {
    let patterns = profile.patterns();
    let fragment = fragment.trim();
    if !has_digit(fragment) {
        return None;
    }
    if patterns.alternative_exclusion.as_ref().is_some_and(|re| re.is_match(fragment)) {
        return None;
    }
    if patterns.instruction_leading.as_ref().is_some_and(|re| re.is_match(fragment)) {
        return None;
    }

    let fragment = match &patterns.alternative_joiner_leading {
        Some(re) => re.replace(fragment, "").trim().to_string(),
        None => fragment.to_string(),
    };
    let parsed = parse(&fragment);
    if parsed.is_meaningful() {
        debug!("Fragment '{}' kept as an alternative", fragment);
        Some(Alternative::from(parsed))
    } else {
        None
    }
}

/// Move annotation parts that parse as alternatives out of the annotations
pub fn promote_additional_parts(
    parts: Vec<String>,
    profile: &LanguageProfile,
    parse: &FragmentParser,
) -> (Vec<String>, Vec<Alternative>) {
    let mut kept = Vec::with_capacity(parts.len());
    let mut alternatives = Vec::new();
    for part in parts {
        match fragment_alternative(&part, profile, parse) {
            Some(alternative) => alternatives.push(alternative),
            None => kept.push(part),
        }
    }
    (kept, alternatives)
}

/// A fragment without digits names another ingredient; its instructions go to the primary
fn swap_alternative(fragment: &str, profile: &LanguageProfile) -> (Option<Alternative>, Vec<String>) {
    let (rest, instructions) = extract_instructions(fragment, profile);
    let rest = strip_flag_phrases(&rest, profile);
    if rest.is_empty() {
        return (None, instructions);
    }
    (Some(Alternative::swap(&rest, fragment.trim())), instructions)
}

/// True when the text holds nothing beyond a quantity and a unit ("8 oz", "150g")
fn names_nothing(text: &str, profile: &LanguageProfile) -> bool {
    let (_, text) = extract_multiplier(text, profile);
    let (_, rest) = find_quantity(&text, profile);
    let rest = match get_unit(&rest, profile) {
        Some(unit) if !unit.to_taste => remove_unit(&rest, &unit, profile),
        _ => rest,
    };
    !rest.chars().any(char::is_alphabetic)
}

/// Give an empty primary the name of its first alternative ("8 oz / 225g pasta" -> "8 oz pasta")
fn borrow_ingredient(primary: &str, alternatives: &[Alternative], profile: &LanguageProfile) -> String {
    match alternatives.iter().find_map(|alt| alt.ingredient.as_deref()) {
        Some(name) if names_nothing(primary, profile) => format!("{} {}", primary, name),
        _ => primary.to_string(),
    }
}

/// Split spaced or unit-ish slash alternatives off the line.
///
/// ```rust
/// use recipe_ingredient_parser::alternatives::split_slash_alternatives;
/// use recipe_ingredient_parser::language_profile::LanguageRegistry;
/// use recipe_ingredient_parser::{IngredientParser, ParseOptions};
///
/// let registry = LanguageRegistry::builtin();
/// let english = registry.get("eng").unwrap();
/// let parser = IngredientParser::default();
/// let options = ParseOptions::default();
/// let parse = |fragment: &str| parser.parse_with_options(fragment, "eng", &options);
///
/// let split = split_slash_alternatives("8 oz / 225g pasta", &english, &parse);
/// assert_eq!(split.line, "8 oz pasta");
/// assert_eq!(split.alternatives[0].unit.as_deref(), Some("gram"));
/// ```
pub fn split_slash_alternatives(line: &str, profile: &LanguageProfile, parse: &FragmentParser) -> SlashSplit {
    if SPACED_SLASH.is_match(line) {
        return split_spaced(line, profile, parse);
    }

    let Some(index) = line.rfind('/') else {
        return SlashSplit {
            line: line.to_string(),
            ..SlashSplit::default()
        };
    };
    let (first, last) = (line[..index].trim(), line[index + 1..].trim());
    if UNITISH.is_match(first) && UNITISH.is_match(last) {
        if let Some(alternative) = fragment_alternative(last, profile, parse) {
            debug!("Unit-ish slash alternative '{}' in '{}'", last, line);
            let alternatives = vec![alternative];
            return SlashSplit {
                line: borrow_ingredient(first, &alternatives, profile),
                alternatives,
                ..SlashSplit::default()
            };
        }
    }

    SlashSplit {
        line: line.to_string(),
        ..SlashSplit::default()
    }
}

fn split_spaced(line: &str, profile: &LanguageProfile, parse: &FragmentParser) -> SlashSplit {
    let mut parts = SPACED_SLASH.split(line).map(str::trim);
    let primary = parts.next().unwrap_or_default().to_string();
    let mut split = SlashSplit::default();

    for part in parts.filter(|p| !p.is_empty()) {
        if has_digit(part) {
            match fragment_alternative(part, profile, parse) {
                Some(alternative) => split.alternatives.push(alternative),
                None => split.leftovers.push(part.to_string()),
            }
        } else {
            let (alternative, mut instructions) = swap_alternative(part, profile);
            split.instructions.append(&mut instructions);
            if let Some(alternative) = alternative {
                split.alternatives.push(alternative);
            }
        }
    }

    debug!("Spaced slash split of '{}' gave {} alternatives", line, split.alternatives.len());
    split.line = borrow_ingredient(&primary, &split.alternatives, profile);
    split
}

/// Split an "or" style alternative off the line.
///
/// Nothing is split between two numbers ("1 or 2 eggs" is a range) or after an
/// instruction ("freshly ground or whole").
pub fn split_joiner_alternative(line: &str, profile: &LanguageProfile, parse: &FragmentParser) -> JoinerSplit {
    let patterns = profile.patterns();
    let unchanged = || JoinerSplit {
        line: line.to_string(),
        ..JoinerSplit::default()
    };
    let Some(joiner) = &patterns.alternative_joiner else {
        return unchanged();
    };

    for found in joiner.find_iter(line) {
        let before = line[..found.start()].trim();
        let after = line[found.end()..].trim();
        if before.is_empty() || after.is_empty() {
            continue;
        }
        let numeric_before = before.chars().next_back().is_some_and(is_numeric_char);
        let numeric_after = after.chars().next().is_some_and(is_numeric_char);
        if numeric_before && numeric_after {
            continue;
        }
        if patterns.instruction_trailing.as_ref().is_some_and(|re| re.is_match(before)) {
            continue;
        }

        if has_digit(after) {
            let parsed = parse(after);
            if !parsed.is_meaningful() {
                continue;
            }
            debug!("Joiner alternative '{}' split from '{}'", after, before);
            let alternative = Alternative::from(parsed);
            return JoinerSplit {
                line: borrow_ingredient(before, std::slice::from_ref(&alternative), profile),
                alternative: Some(alternative),
                inherits: true,
                instructions: Vec::new(),
            };
        }

        let (alternative, instructions) = swap_alternative(after, profile);
        if alternative.is_some() {
            debug!("Ingredient swap '{}' split from '{}'", after, before);
            return JoinerSplit {
                line: before.to_string(),
                alternative,
                inherits: false,
                instructions,
            };
        }
    }

    unchanged()
}

/// Split "cup/150 grams sugar" left after the quantity into "cup sugar" and an alternative
pub fn split_inline_unit_alternative(
    rest: &str,
    profile: &LanguageProfile,
    parse: &FragmentParser,
) -> Option<(String, Alternative)> {
    let caps = INLINE_UNIT_SLASH.captures(rest)?;
    get_unit(&caps[1], profile).filter(|unit| !unit.to_taste)?;

    let tail = &caps[4];
    let parsed = parse(&format!("{} {}{}", &caps[2], &caps[3], tail));
    if !parsed.has_unit() {
        return None;
    }
    debug!("Inline unit alternative in '{}'", rest);
    Some((
        format!("{}{}", &caps[1], tail).trim().to_string(),
        Alternative::from(parsed),
    ))
}

/// Give an alternative without an amount of its own the primary's amount
pub fn inherit_amount(alternative: &mut Alternative, primary: &ParsedIngredient) {
    if alternative.quantity.map_or(true, |q| q == 0.0) {
        alternative.quantity = Some(primary.quantity);
        alternative.min_qty = Some(primary.min_qty);
        alternative.max_qty = Some(primary.max_qty);
    }
    if alternative.unit.is_none() {
        alternative.unit = primary.unit.clone();
        alternative.unit_plural = primary.unit_plural.clone();
        alternative.symbol = primary.symbol.clone();
        alternative.unit_system = primary.unit_system.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_parser::IngredientParser;
    use crate::language_profile::DEFAULT_REGISTRY;
    use crate::parser_config::ParseOptions;

    fn fixture() -> (IngredientParser, std::sync::Arc<LanguageProfile>) {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        (IngredientParser::new(registry), english)
    }

    #[test]
    fn test_fragment_alternative() {
        let (parser, english) = fixture();
        let options = ParseOptions::default();
        let parse = |text: &str| parser.parse_with_options(text, "eng", &options);

        let alternative = fragment_alternative("or 1/2 cup of kefir whey", &english, &parse).unwrap();
        assert_eq!(alternative.quantity, Some(0.5));
        assert_eq!(alternative.unit.as_deref(), Some("cup"));
        assert_eq!(alternative.ingredient.as_deref(), Some("kefir whey"));

        let alternative = fragment_alternative("or ½ cup of kefir whey", &english, &parse).unwrap();
        assert_eq!(alternative.quantity, Some(0.5));
        assert_eq!(alternative.ingredient.as_deref(), Some("kefir whey"));

        let alternative = fragment_alternative("¾ cup", &english, &parse).unwrap();
        assert_eq!(alternative.quantity, Some(0.75));
        assert_eq!(alternative.ingredient, None);

        assert!(fragment_alternative("see note 2", &english, &parse).is_none());
        assert!(fragment_alternative("cut into 2 cm cubes", &english, &parse).is_none());
        assert!(fragment_alternative("chopped into 4", &english, &parse).is_none());
        assert!(fragment_alternative("green and white", &english, &parse).is_none());
    }

    #[test]
    fn test_slash_alternatives() {
        let (parser, english) = fixture();
        let options = ParseOptions::default();
        let parse = |text: &str| parser.parse_with_options(text, "eng", &options);

        let split = split_slash_alternatives("150g/5½oz butter", &english, &parse);
        assert_eq!(split.line, "150g butter");
        assert_eq!(split.alternatives[0].quantity, Some(5.5));
        assert_eq!(split.alternatives[0].unit.as_deref(), Some("ounce"));

        let split = split_slash_alternatives("1 cup yogurt / vegan yogurt / coconut milk", &english, &parse);
        assert_eq!(split.line, "1 cup yogurt");
        let names: Vec<&str> = split.alternatives.iter().filter_map(|a| a.ingredient.as_deref()).collect();
        assert_eq!(names, vec!["vegan yogurt", "coconut milk"]);
        assert!(split.alternatives.iter().all(|a| a.quantity.is_none()));

        let split = split_slash_alternatives("1/2 cup flour", &english, &parse);
        assert_eq!(split.line, "1/2 cup flour");
        assert!(split.alternatives.is_empty());
    }

    #[test]
    fn test_joiner_alternatives() {
        let (parser, english) = fixture();
        let options = ParseOptions::default();
        let parse = |text: &str| parser.parse_with_options(text, "eng", &options);

        let split = split_joiner_alternative("2 cups oats or quinoa", &english, &parse);
        assert_eq!(split.line, "2 cups oats");
        assert_eq!(split.alternative.unwrap().ingredient.as_deref(), Some("quinoa"));
        assert!(!split.inherits);

        let split = split_joiner_alternative("1 cup milk or ½ cup cream", &english, &parse);
        assert_eq!(split.line, "1 cup milk");
        let alternative = split.alternative.unwrap();
        assert_eq!(alternative.quantity, Some(0.5));
        assert_eq!(alternative.unit.as_deref(), Some("cup"));
        assert_eq!(alternative.ingredient.as_deref(), Some("cream"));

        let split = split_joiner_alternative("1 or 2 eggs", &english, &parse);
        assert_eq!(split.line, "1 or 2 eggs");
        assert!(split.alternative.is_none());

        let split = split_joiner_alternative("3 slices or ~2g sand ginger", &english, &parse);
        assert_eq!(split.line, "3 slices sand ginger");
        assert!(split.inherits);
        let alternative = split.alternative.unwrap();
        assert_eq!(alternative.quantity, Some(2.0));
        assert_eq!(alternative.unit.as_deref(), Some("gram"));
    }

    #[test]
    fn test_inline_unit_alternative() {
        let (parser, english) = fixture();
        let options = ParseOptions::default();
        let parse = |text: &str| parser.parse_with_options(text, "eng", &options);

        let (rest, alternative) =
            split_inline_unit_alternative("cup/150 grams granulated sugar", &english, &parse).unwrap();
        assert_eq!(rest, "cup granulated sugar");
        assert_eq!(alternative.quantity, Some(150.0));
        assert_eq!(alternative.unit.as_deref(), Some("gram"));
        assert_eq!(alternative.ingredient.as_deref(), Some("granulated sugar"));

        assert!(split_inline_unit_alternative("salt", &english, &parse).is_none());
    }

    #[test]
    fn test_inherit_amount() {
        let primary = ParsedIngredient {
            quantity: 2.0,
            min_qty: 2.0,
            max_qty: 2.0,
            unit: Some("cup".to_string()),
            ..ParsedIngredient::default()
        };
        let mut alternative = Alternative {
            quantity: Some(0.0),
            ingredient: Some("quinoa".to_string()),
            ..Alternative::default()
        };
        inherit_amount(&mut alternative, &primary);
        assert_eq!(alternative.quantity, Some(2.0));
        assert_eq!(alternative.unit.as_deref(), Some("cup"));
    }
}
