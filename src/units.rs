//! # Units Module
//!
//! Unit recognition against a profile's unit dictionary, plus the small
//! lookups (symbol, measurement system, leading preposition) built on it.
//!
//! ## Selection rules
//!
//! - every name and plural of every unit is tried, bounded by non-alphanumerics
//! - a to-taste phrase or its abbreviation ("t.t.") is a candidate too
//! - a problematic unit ("clove") only counts when a clue word ("garlic") is present
//! - the earliest name wins, then the longer name, then the first one seen
//! - a degree sign belongs to the name after it ("°C" is never the cup "C")

use crate::fractions::remove_span;
use crate::language_profile::LanguageProfile;
use crate::text_processing::collapse_whitespace;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref DANGLING_PERIOD: Regex =
        Regex::new(r"\.(\s|$)").expect("Dangling period pattern should be valid");
}

/// A unit found in a span of text
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMatch {
    /// Canonical unit key, or the to-taste shorthand for the pseudo-unit
    pub key: String,
    pub plural: String,
    pub symbol: String,
    /// Matched text, including the boundary characters around the name
    pub matched: String,
    pub start: usize,
    pub end: usize,
    /// True for the to-taste pseudo-unit
    pub to_taste: bool,
}

/// A to-taste phrase found in text
#[derive(Debug, Clone, PartialEq)]
pub struct ToTasteMatch {
    /// First-letter shorthand, e.g. "t.t."
    pub shorthand: String,
    pub matched: String,
    pub start: usize,
    pub end: usize,
    /// True when the full phrase matched rather than its abbreviation
    pub extended: bool,
}

/// Find a to-taste phrase, trying each phrase in full before its abbreviation
pub fn to_taste_recognize(text: &str, profile: &LanguageProfile) -> Option<ToTasteMatch> {
    for form in &profile.patterns().to_taste_forms {
        if let Some(found) = form.full.captures(text).and_then(|caps| caps.get(1)) {
            return Some(ToTasteMatch {
                shorthand: form.shorthand.clone(),
                matched: found.as_str().to_string(),
                start: found.start(),
                end: found.end(),
                extended: true,
            });
        }
        if let Some(found) = form.abbreviation.as_ref().and_then(|re| re.find(text)) {
            return Some(ToTasteMatch {
                shorthand: form.shorthand.clone(),
                matched: found.as_str().to_string(),
                start: found.start(),
                end: found.end(),
                extended: false,
            });
        }
    }
    None
}

/// Recognize the unit that appears earliest in `text`
///
/// ```rust
/// use recipe_ingredient_parser::language_profile::LanguageRegistry;
/// use recipe_ingredient_parser::units::get_unit;
///
/// let registry = LanguageRegistry::builtin();
/// let english = registry.get("eng").unwrap();
/// let unit = get_unit("Tbsp. olive oil", &english).unwrap();
/// assert_eq!(unit.key, "tablespoon");
/// assert_eq!(unit.symbol, "tbs");
/// ```
pub fn get_unit(text: &str, profile: &LanguageProfile) -> Option<UnitMatch> {
    let patterns = profile.patterns();
    // candidates rank by where the name starts, then by its length
    let mut best: Option<((usize, usize), UnitMatch)> = to_taste_recognize(text, profile).map(|found| {
        let rank = (found.start, found.matched.chars().count());
        let unit = UnitMatch {
            key: found.shorthand.clone(),
            plural: found.shorthand,
            symbol: String::new(),
            matched: found.matched,
            start: found.start,
            end: found.end,
            to_taste: true,
        };
        (rank, unit)
    });

    for pattern in &patterns.units {
        let Some(caps) = pattern.regex.captures(text) else {
            continue;
        };
        let (Some(found), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let unit = &profile.units[pattern.unit_index];
        if let Some(clues) = profile.problematic_units.get(&unit.key) {
            if !clues.iter().any(|clue| text.contains(clue.as_str())) {
                trace!("Dropping '{}' without a context clue in '{}'", unit.key, text);
                continue;
            }
        }

        let rank = (name.start(), name.as_str().chars().count());
        let better = match &best {
            None => true,
            Some((current, _)) => rank.0 < current.0 || (rank.0 == current.0 && rank.1 > current.1),
        };
        if better {
            let candidate = UnitMatch {
                key: unit.key.clone(),
                plural: unit.plural.clone(),
                symbol: unit.symbol.clone(),
                matched: found.as_str().to_string(),
                start: found.start(),
                end: found.end(),
                to_taste: false,
            };
            best = Some((rank, candidate));
        }
    }

    best.map(|(_, unit)| unit)
}

/// Remove a recognized unit from the text it was found in
pub fn remove_unit(text: &str, unit: &UnitMatch, profile: &LanguageProfile) -> String {
    let removed = remove_span(text, unit.start, unit.end);
    let removed = DANGLING_PERIOD.replace_all(&removed, "$1");
    let removed = collapse_whitespace(&removed);
    match &profile.patterns().can_word_leading {
        Some(re) => re.replace(&removed, "").trim().to_string(),
        None => removed,
    }
}

/// Look up a unit by canonical key
pub fn unit_by_key(key: &str, profile: &LanguageProfile) -> Option<UnitMatch> {
    profile.unit(key).map(|unit| UnitMatch {
        key: unit.key.clone(),
        plural: unit.plural.clone(),
        symbol: unit.symbol.clone(),
        matched: String::new(),
        start: 0,
        end: 0,
        to_taste: false,
    })
}

/// Symbol for a unit key or any of its surface names, empty when unknown
pub fn get_symbol(unit: &str, profile: &LanguageProfile) -> String {
    if unit.is_empty() {
        return String::new();
    }
    profile
        .units
        .iter()
        .find(|candidate| candidate.key == unit || candidate.names.iter().any(|name| name == unit))
        .map(|candidate| candidate.symbol.clone())
        .unwrap_or_default()
}

/// Measurement system of a unit key (metric, imperial, americanVolumetric)
pub fn get_unit_system(key: &str, profile: &LanguageProfile) -> Option<String> {
    profile.unit(key).and_then(|unit| unit.system.clone())
}

/// The preposition starting `text`, if any ("of tomatoes" -> "of")
pub fn get_preposition(text: &str, profile: &LanguageProfile) -> Option<String> {
    profile
        .patterns()
        .preposition_leading
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|found| found.as_str().trim().to_string())
}
