//! Multipliers ("2 x 100 g", "3×250ml", "1 1.8kg") and the size descriptors
//! that sit between a count and its unit ("3-inch", "15-ounce").

use crate::fractions::{convert_to_number, find_quantity, FRACTION_GLYPHS};
use crate::language_profile::LanguageProfile;
use crate::units::get_unit;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Units describing a physical size rather than an amount
const LENGTH_UNITS: &[&str] = &["inch", "centimetre", "centimeter", "millimeter", "millimetre"];

lazy_static! {
    static ref EXPLICIT_MULTIPLIER: Regex =
        Regex::new(r"(?i)^(\d+(?:[.,]\d+)?)\s*[x×](?:\s+(.+)|(\d.*))$")
            .expect("Explicit multiplier pattern should be valid");
    static ref MIXED_NUMBER: Regex =
        Regex::new(r"^\d+\s+\d+/\d+").expect("Mixed number pattern should be valid");
    static ref STACKED_NUMBERS: Regex =
        Regex::new(r"^(\d+)\s+(.+)$").expect("Stacked number pattern should be valid");
    static ref LEADING_FRACTION: Regex = Regex::new(&format!(r"^(?:[{FRACTION_GLYPHS}]|\d+/\d+)"))
        .expect("Leading fraction pattern should be valid");
    static ref NUMBER_THEN_LETTER: Regex =
        Regex::new(r"^(\d+(?:[.,]\d+)?)(?:\s*[-–]?\s*)\p{L}")
            .expect("Number then letter pattern should be valid");
}

/// Split a leading multiplier off a line.
///
/// Returns `(multiplier, rest)`, with a multiplier of 1 and the trimmed line
/// when no multiplier applies. A stacked count ("1 1.8kg chicken") only counts
/// when the second number carries a unit that is not a length.
///
/// ```rust
/// use recipe_ingredient_parser::language_profile::LanguageRegistry;
/// use recipe_ingredient_parser::multiplier::extract_multiplier;
///
/// let registry = LanguageRegistry::builtin();
/// let english = registry.get("eng").unwrap();
/// assert_eq!(
///     extract_multiplier("2 x 100 g tomatoes", &english),
///     (2.0, "100 g tomatoes".to_string())
/// );
/// ```
pub fn extract_multiplier(line: &str, profile: &LanguageProfile) -> (f64, String) {
    let working = line.trim();

    if let Some(caps) = EXPLICIT_MULTIPLIER.captures(working) {
        let rest = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        let multiplier = non_zero_or_one(convert_to_number(&caps[1], profile));
        debug!("Explicit multiplier {} in '{}'", multiplier, line);
        return (multiplier, rest.trim().to_string());
    }

    if MIXED_NUMBER.is_match(working) {
        return (1.0, working.to_string());
    }

    let Some(caps) = STACKED_NUMBERS.captures(working) else {
        return (1.0, working.to_string());
    };
    let rest = caps[2].trim();
    let patterns = profile.patterns();

    if patterns.inch_leading.as_ref().is_some_and(|re| re.is_match(rest))
        || patterns.stacked_range_tail.is_match(rest)
        || LEADING_FRACTION.is_match(rest)
        || !NUMBER_THEN_LETTER.is_match(rest)
    {
        return (1.0, working.to_string());
    }

    let (quantity, remainder) = find_quantity(rest, profile);
    if quantity.is_none() || remainder.is_empty() {
        return (1.0, working.to_string());
    }
    match get_unit(&remainder, profile) {
        Some(unit) if !unit.to_taste && !LENGTH_UNITS.contains(&unit.key.as_str()) => {
            let multiplier = non_zero_or_one(convert_to_number(&caps[1], profile));
            debug!("Stacked multiplier {} before '{}'", multiplier, rest);
            (multiplier, rest.to_string())
        }
        _ => (1.0, working.to_string()),
    }
}

fn non_zero_or_one(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// Move a leading "3-inch" / "2½-inch" / "1-2 inch" descriptor out of the text
pub fn extract_inch_size_descriptor(text: &str, profile: &LanguageProfile) -> (String, Option<String>) {
    let Some(re) = &profile.patterns().inch_descriptor else {
        return (text.to_string(), None);
    };
    match re.captures(text) {
        Some(caps) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            let descriptor = caps[1].trim().to_string();
            (text[end..].trim().to_string(), Some(descriptor))
        }
        None => (text.to_string(), None),
    }
}

/// A bare "inch piece ginger" left after a word quantity means a 1-inch piece
pub fn handle_implicit_inch_descriptor(text: &str, profile: &LanguageProfile) -> (String, Option<String>) {
    match &profile.patterns().inch_implicit {
        Some(re) if re.is_match(text) => (
            re.replace(text, "").trim().to_string(),
            Some("1-inch".to_string()),
        ),
        _ => (text.to_string(), None),
    }
}

/// Pull a container size ("of a 3.5-ounce", "15-oz") that precedes a container word
pub fn extract_container_size(text: &str, profile: &LanguageProfile) -> (String, Option<String>) {
    let patterns = profile.patterns();
    let (Some(size), Some(follow)) = (&patterns.container_size, &patterns.container_follow) else {
        return (text.to_string(), None);
    };
    let Some(caps) = size.captures(text) else {
        return (text.to_string(), None);
    };
    let end = caps.get(0).map_or(0, |m| m.end());
    let rest = &text[end..];
    if !follow.is_match(rest) {
        return (text.to_string(), None);
    }
    (rest.trim().to_string(), Some(caps[1].trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_profile::DEFAULT_REGISTRY;

    #[test]
    fn test_extract_multiplier() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let cases = vec![
            ("2 x 100 g tomatoes", 2.0, "100 g tomatoes"),
            ("3x250ml broth", 3.0, "250ml broth"),
            ("2 × 400g tins chickpeas", 2.0, "400g tins chickpeas"),
            ("1 1.8kg chicken", 1.0, "1.8kg chicken"),
            ("2 500g packs butter", 2.0, "500g packs butter"),
            ("1 1/2 cups flour", 1.0, "1 1/2 cups flour"),
            ("1 3-inch cinammon stick", 1.0, "1 3-inch cinammon stick"),
            ("1 3-4 lb whole chicken", 1.0, "1 3-4 lb whole chicken"),
            ("2 cloves garlic", 1.0, "2 cloves garlic"),
            ("1 to 2 chicken breasts", 1.0, "1 to 2 chicken breasts"),
            ("2 xl eggs", 1.0, "2 xl eggs"),
        ];
        for (input, multiplier, rest) in cases {
            assert_eq!(
                extract_multiplier(input, &english),
                (multiplier, rest.to_string()),
                "multiplier of {input:?}"
            );
        }
    }

    #[test]
    fn test_inch_descriptors() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        assert_eq!(
            extract_inch_size_descriptor("3-inch cinammon stick", &english),
            ("cinammon stick".to_string(), Some("3-inch".to_string()))
        );
        assert_eq!(
            extract_inch_size_descriptor("2½-inch piece ginger", &english),
            ("piece ginger".to_string(), Some("2½-inch".to_string()))
        );
        assert_eq!(
            extract_inch_size_descriptor("cinnamon stick", &english),
            ("cinnamon stick".to_string(), None)
        );
        assert_eq!(
            handle_implicit_inch_descriptor("inch piece ginger", &english),
            ("piece ginger".to_string(), Some("1-inch".to_string()))
        );
    }

    #[test]
    fn test_extract_container_size() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        assert_eq!(
            extract_container_size("of a 3.5-ounce package prepared achiote seasoning", &english),
            (
                "package prepared achiote seasoning".to_string(),
                Some("3.5-ounce".to_string())
            )
        );
        assert_eq!(
            extract_container_size("15-oz. cans black beans", &english),
            ("cans black beans".to_string(), Some("15-oz.".to_string()))
        );
        assert_eq!(
            extract_container_size("3-4 lb whole chicken", &english),
            ("3-4 lb whole chicken".to_string(), None)
        );
    }
}
