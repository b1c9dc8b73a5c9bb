//! Result assembly helpers: ranges, multipliers, weight-range counts,
//! annotation cleanup and the fallback guesses applied to a finished record.

use crate::flags::{clean_additional_part, remove_approx_anywhere, Flags};
use crate::fractions::{convert_from_fraction, convert_to_number, round_three, FRACTION_GLYPHS};
use crate::ingredient_model::ParsedIngredient;
use crate::language_profile::LanguageProfile;
use crate::text_processing::collapse_whitespace;
use crate::units::{get_unit, get_unit_system, UnitMatch};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref ORIGINAL_DASH_RANGE: Regex = Regex::new(&format!(
        r"([0-9{FRACTION_GLYPHS}/]+)\s*[-–]\s*([0-9{FRACTION_GLYPHS}/]+)"
    ))
    .expect("Dash range pattern should be valid");
    static ref GUESS_PREFIX: Regex = Regex::new(r"^[^A-Za-z]+(?:[A-Za-z]+\s+)?")
        .expect("Ingredient guess pattern should be valid");
    static ref LEADING_OF: Regex = Regex::new(r"(?i)^of\s+").expect("Leading 'of' pattern should be valid");
}

/// Quantity, minimum and maximum for a canonical quantity string.
///
/// A dash splits the string into bounds. Otherwise a dash range in the
/// original line whose lower end equals the quantity supplies the maximum.
pub fn resolve_range(quantity: Option<&str>, original: &str, profile: &LanguageProfile) -> (f64, f64, f64) {
    let Some(quantity) = quantity.map(str::trim).filter(|q| !q.is_empty()) else {
        return (0.0, 0.0, 0.0);
    };

    if let Some((low, high)) = quantity.split_once(['-', '–']) {
        let min = convert_to_number(low, profile);
        let max = convert_to_number(high, profile);
        return if max < min { (max, max, min) } else { (min, min, max) };
    }

    let value = convert_to_number(quantity, profile);
    if value > 0.0 {
        if let Some(caps) = ORIGINAL_DASH_RANGE.captures(original) {
            let low = convert_to_number(&convert_from_fraction(&caps[1], profile), profile);
            let high = convert_to_number(&convert_from_fraction(&caps[2], profile), profile);
            if low == value && high > value {
                trace!("Range {}-{} recovered from '{}'", low, high, original);
                return (value, value, high);
            }
        }
    }
    (value, value, value)
}

/// Copy a recognized unit onto the record
pub fn apply_unit(result: &mut ParsedIngredient, unit: &UnitMatch, profile: &LanguageProfile, with_system: bool) {
    let non_empty = |text: &str| (!text.is_empty()).then(|| text.to_string());
    result.unit = Some(unit.key.clone());
    result.unit_plural = non_empty(&unit.plural);
    result.symbol = non_empty(&unit.symbol);
    if with_system {
        result.unit_system = get_unit_system(&unit.key, profile);
    }
}

/// Scale the amounts by the multiplier, keeping the per-item amounts.
///
/// A multiplier with no amount after it ("2 x eggs") is the count itself.
pub fn apply_multiplier(result: &mut ParsedIngredient, multiplier: f64) {
    if multiplier == 1.0 {
        return;
    }
    if result.quantity == 0.0 {
        result.quantity = multiplier;
        result.min_qty = multiplier;
        result.max_qty = multiplier;
        return;
    }
    result.multiplier = Some(multiplier);
    result.per_item_quantity = Some(result.quantity);
    result.per_item_min_qty = Some(result.min_qty);
    result.per_item_max_qty = Some(result.max_qty);
    result.quantity = round_three(result.quantity * multiplier);
    result.min_qty = round_three(result.min_qty * multiplier);
    result.max_qty = round_three(result.max_qty * multiplier);
}

/// "1 3-4 lb whole chicken": a count followed by a weight range.
///
/// The count becomes the quantity, the weight range an annotation, and the
/// unit is dropped. Returns true when the pattern applied.
pub fn apply_count_weight_range(
    result: &mut ParsedIngredient,
    rest_before_unit: &str,
    instructions: &mut Vec<String>,
    parts: &mut Vec<String>,
    profile: &LanguageProfile,
) -> bool {
    let patterns = profile.patterns();
    let Some(caps) = patterns
        .count_weight_range
        .as_ref()
        .and_then(|re| re.captures(&result.original_string))
    else {
        return false;
    };

    let count = convert_to_number(&caps[1], profile);
    let range: String = caps[2].split_whitespace().collect();
    parts.push(format!("{} {}", range, &caps[3]));

    result.quantity = count;
    result.min_qty = count;
    result.max_qty = count;
    result.clear_unit();

    if let Some(weight) = &patterns.weight_range {
        let remainder = collapse_whitespace(&weight.replace(rest_before_unit, " "));
        let remainder = LEADING_OF.replace(&remainder, "").trim().to_string();
        if !remainder.is_empty() {
            let lowered = remainder.to_lowercase();
            instructions.retain(|word| !lowered.contains(&word.to_lowercase()));
            result.ingredient = remainder;
        }
    }
    debug!("Count with weight range in '{}'", result.original_string);
    true
}

/// A piece unit with an inch size in the line keeps the size as an annotation
pub fn append_piece_inch_size(unit_key: Option<&str>, parts: &mut Vec<String>, original: &str, profile: &LanguageProfile) {
    if unit_key != Some("piece") {
        return;
    }
    let Some(mention) = &profile.patterns().inch_mention else {
        return;
    };
    if parts.iter().any(|part| mention.is_match(part)) {
        return;
    }
    if let Some(caps) = mention.captures(original) {
        parts.push(caps[1].trim().to_string());
    }
}

/// Strip flag phrases from the annotations and drop empty or stopword-only parts
pub fn clean_parts(parts: Vec<String>, flags: &Flags, profile: &LanguageProfile) -> Vec<String> {
    parts
        .into_iter()
        .map(|part| clean_additional_part(&part, flags, profile))
        .filter(|part| part.chars().any(char::is_alphanumeric))
        .filter(|part| {
            !profile
                .additional_stopwords
                .iter()
                .any(|stopword| stopword.eq_ignore_ascii_case(part.trim()))
        })
        .collect()
}

/// Approximation words left anywhere in the name or annotations set the flag
pub fn sweep_approx(ingredient: &mut String, parts: &mut Vec<String>, flags: &mut Flags, profile: &LanguageProfile) {
    if flags.approx {
        return;
    }
    let (cleaned, found) = remove_approx_anywhere(ingredient, profile);
    if found {
        *ingredient = cleaned;
        flags.approx = true;
    }
    for part in parts.iter_mut() {
        let (cleaned, found) = remove_approx_anywhere(part, profile);
        if found {
            *part = cleaned;
            flags.approx = true;
        }
    }
    parts.retain(|part| !part.is_empty());
}

/// Join annotation parts, skipping repeats; `None` when nothing is left
pub fn join_additional(parts: &[String]) -> Option<String> {
    let mut seen: Vec<&str> = Vec::new();
    for part in parts.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !seen.contains(&part) {
            seen.push(part);
        }
    }
    if seen.is_empty() {
        None
    } else {
        Some(collapse_whitespace(&seen.join(", ")))
    }
}

/// Look for a unit anywhere in the original line when none was found
pub fn fallback_unit(result: &mut ParsedIngredient, flags: &mut Flags, profile: &LanguageProfile, with_system: bool) {
    if result.unit.is_some() {
        return;
    }
    match get_unit(&result.original_string, profile) {
        Some(unit) if unit.to_taste => flags.to_taste = true,
        Some(unit) => {
            trace!("Unit '{}' guessed from '{}'", unit.key, result.original_string);
            apply_unit(result, &unit, profile, with_system);
        }
        None => {}
    }
}

/// Name an ingredient that came out empty: the first alternative, then the original line
pub fn fallback_ingredient(result: &mut ParsedIngredient) {
    if !result.ingredient.is_empty() {
        return;
    }
    if let Some(name) = result.alternatives.iter().find_map(|alt| alt.ingredient.clone()) {
        result.ingredient = name;
        return;
    }
    if result.unit.is_some() {
        return;
    }
    let guess = GUESS_PREFIX.replace(&result.original_string, "");
    let guess = guess.split('/').next().unwrap_or_default();
    let guess = guess.split(',').next().unwrap_or_default().trim();
    result.ingredient = guess.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::Alternative;
    use crate::language_profile::DEFAULT_REGISTRY;

    #[test]
    fn test_resolve_range() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let cases = vec![
            (Some("10-20"), "10-20 teaspoon water", (10.0, 10.0, 20.0)),
            (Some("0.25-0.5"), "¼-½ cup of flour", (0.25, 0.25, 0.5)),
            (Some("1.5"), "1 1/2 teaspoon water", (1.5, 1.5, 1.5)),
            (Some("1"), "1 3-4 lb whole chicken", (1.0, 1.0, 1.0)),
            (Some("5-2"), "5-2 eggs", (2.0, 2.0, 5.0)),
            (None, "salt", (0.0, 0.0, 0.0)),
        ];
        for (quantity, original, expected) in cases {
            assert_eq!(resolve_range(quantity, original, &english), expected, "range of {original:?}");
        }
    }

    #[test]
    fn test_apply_multiplier() {
        let mut result = ParsedIngredient {
            quantity: 100.0,
            min_qty: 100.0,
            max_qty: 100.0,
            ..ParsedIngredient::default()
        };
        apply_multiplier(&mut result, 2.0);
        assert_eq!(result.quantity, 200.0);
        assert_eq!(result.multiplier, Some(2.0));
        assert_eq!(result.per_item_quantity, Some(100.0));

        let mut unchanged = ParsedIngredient {
            quantity: 3.0,
            ..ParsedIngredient::default()
        };
        apply_multiplier(&mut unchanged, 1.0);
        assert_eq!(unchanged.multiplier, None);

        let mut count_only = ParsedIngredient::default();
        apply_multiplier(&mut count_only, 3.0);
        assert_eq!((count_only.quantity, count_only.min_qty, count_only.max_qty), (3.0, 3.0, 3.0));
        assert_eq!(count_only.multiplier, None);
        assert_eq!(count_only.per_item_quantity, None);
    }

    #[test]
    fn test_count_weight_range() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let mut result = ParsedIngredient {
            quantity: 1.0,
            unit: Some("pound".to_string()),
            ingredient: "chicken".to_string(),
            original_string: "1 3-4 lb whole chicken".to_string(),
            ..ParsedIngredient::default()
        };
        let mut instructions = vec!["whole".to_string()];
        let mut parts = Vec::new();
        assert!(apply_count_weight_range(
            &mut result,
            "3-4 lb whole chicken",
            &mut instructions,
            &mut parts,
            &english
        ));
        assert_eq!(result.unit, None);
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.ingredient, "whole chicken");
        assert_eq!(parts, vec!["3-4 lb"]);
        assert!(instructions.is_empty());
    }

    #[test]
    fn test_clean_parts_and_join() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let flags = Flags {
            optional: true,
            ..Flags::default()
        };
        let parts = vec![
            "optional".to_string(),
            "or".to_string(),
            "Gebhardt".to_string(),
            "Gebhardt".to_string(),
        ];
        let cleaned = clean_parts(parts, &flags, &english);
        assert_eq!(cleaned, vec!["Gebhardt", "Gebhardt"]);
        assert_eq!(join_additional(&cleaned).as_deref(), Some("Gebhardt"));
        assert_eq!(join_additional(&[]), None);
    }

    #[test]
    fn test_fallback_ingredient() {
        let mut result = ParsedIngredient::empty("2 ½ Powdered Sugar, sifted");
        fallback_ingredient(&mut result);
        assert_eq!(result.ingredient, "Sugar");

        let mut with_unit = ParsedIngredient::empty("3g");
        with_unit.unit = Some("gram".to_string());
        fallback_ingredient(&mut with_unit);
        assert_eq!(with_unit.ingredient, "");

        let mut borrowed = ParsedIngredient::empty("225g / 8 oz pasta");
        borrowed.alternatives = vec![
            Alternative {
                quantity: Some(3.0),
                ..Alternative::default()
            },
            Alternative::swap("pasta", "pasta"),
        ];
        fallback_ingredient(&mut borrowed);
        assert_eq!(borrowed.ingredient, "pasta");
    }
}
