//! # Fractions Module
//!
//! Quantity lexing: unicode fraction glyphs, mixed numbers, locale decimals,
//! ranges and spelled-out numbers. Quantities travel through the pipeline as
//! canonical strings ("1.5", "10-20", "0,5" for comma locales) and are turned
//! into numbers only at assembly time by [`convert_to_number`].

use crate::language_profile::LanguageProfile;
use crate::number_words::text_to_number;
use crate::parser_config::QUANTITY_DECIMALS;
use crate::text_processing::{clean_characters, collapse_whitespace};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Every unicode vulgar fraction the lexer understands
pub const FRACTION_GLYPHS: &str = "¼½¾⅐⅑⅒⅓⅔⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞";

const GLYPH_FRACTIONS: &[(char, u32, u32)] = &[
    ('½', 1, 2),
    ('⅓', 1, 3),
    ('⅔', 2, 3),
    ('¼', 1, 4),
    ('¾', 3, 4),
    ('⅕', 1, 5),
    ('⅖', 2, 5),
    ('⅗', 3, 5),
    ('⅘', 4, 5),
    ('⅙', 1, 6),
    ('⅚', 5, 6),
    ('⅐', 1, 7),
    ('⅛', 1, 8),
    ('⅜', 3, 8),
    ('⅝', 5, 8),
    ('⅞', 7, 8),
    ('⅑', 1, 9),
    ('⅒', 1, 10),
];

lazy_static! {
    static ref LEADING_GLYPH: Regex = Regex::new(&format!(r"^(\d*)\s*([{FRACTION_GLYPHS}])"))
        .expect("Leading glyph pattern should be valid");
    static ref DIGITS_THEN_GLYPH: Regex = Regex::new(&format!(r"^(\d+)([{FRACTION_GLYPHS}])$"))
        .expect("Digit glyph pattern should be valid");
}

/// Numerator and denominator of a fraction glyph
pub fn glyph_fraction(c: char) -> Option<(u32, u32)> {
    GLYPH_FRACTIONS
        .iter()
        .find(|(glyph, _, _)| *glyph == c)
        .map(|(_, numerator, denominator)| (*numerator, *denominator))
}

pub fn glyph_value(c: char) -> Option<f64> {
    glyph_fraction(c).map(|(numerator, denominator)| f64::from(numerator) / f64::from(denominator))
}

/// Render a number with the locale delimiter, keeping at most three decimals (truncated)
///
/// ```rust
/// use recipe_ingredient_parser::fractions::keep_three_decimals;
///
/// assert_eq!(keep_three_decimals(1.0 / 3.0, '.'), "0.333");
/// assert_eq!(keep_three_decimals(2.0, '.'), "2");
/// assert_eq!(keep_three_decimals(1.5, ','), "1,5");
/// ```
pub fn keep_three_decimals(value: f64, delimiter: char) -> String {
    let rendered = value.to_string();
    match rendered.split_once('.') {
        Some((whole, fraction)) => {
            let kept: String = fraction.chars().take(QUANTITY_DECIMALS).collect();
            format!("{whole}{delimiter}{kept}")
        }
        None => rendered,
    }
}

/// Render a number in full with the profile's decimal delimiter
pub fn format_number(value: f64, profile: &LanguageProfile) -> String {
    let rendered = value.to_string();
    if profile.is_comma_delimited {
        rendered.replace('.', ",")
    } else {
        rendered
    }
}

/// Convert fractional notation into a canonical decimal string.
///
/// Handles single glyphs ("½"), digits followed by a glyph ("1½"), dash
/// ranges whose sides are converted independently ("⅝-¾"), mixed numbers
/// ("1 1/3") and plain fractions ("3/4"). Anything else is returned as-is.
pub fn convert_from_fraction(value: &str, profile: &LanguageProfile) -> String {
    let delimiter = profile.decimal_delimiter();
    let working = value.trim();
    if working.is_empty() {
        return String::new();
    }

    let mut chars = working.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some((numerator, denominator)) = glyph_fraction(c) {
            return keep_three_decimals(f64::from(numerator) / f64::from(denominator), delimiter);
        }
    }

    if working.contains(['-', '–']) {
        return working
            .split(['-', '–'])
            .map(|part| convert_from_fraction(part, profile))
            .collect::<Vec<_>>()
            .join("-");
    }

    if let Some(caps) = DIGITS_THEN_GLYPH.captures(working) {
        let whole: f64 = caps[1].parse().unwrap_or(0.0);
        let fraction = caps[2].chars().next().and_then(glyph_value).unwrap_or(0.0);
        return keep_three_decimals(whole + fraction, delimiter);
    }

    if let Some((whole, fraction)) = working.split_once(char::is_whitespace) {
        let remainder = divide(fraction.trim()).unwrap_or(f64::NAN);
        let whole = whole.trim().parse::<i64>().unwrap_or(0);
        let total = if whole != 0 {
            whole as f64 + remainder
        } else {
            remainder
        };
        return keep_three_decimals(total, delimiter);
    }

    if working.contains('/') {
        return match divide(working) {
            Some(value) if value.is_finite() => keep_three_decimals(value, delimiter),
            _ => "0".to_string(),
        };
    }

    working.to_string()
}

/// Evaluate "a/b"; a zero denominator yields infinity, a malformed side `None`
fn divide(fraction: &str) -> Option<f64> {
    let (numerator, denominator) = fraction.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    Some(numerator / denominator)
}

/// Parse a canonical quantity string, rounding to three decimals.
///
/// The first locale delimiter becomes a decimal point. Comma locales also drop
/// `.` thousands separators. Empty or unparseable input yields 0.
pub fn convert_to_number(value: &str, profile: &LanguageProfile) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = if profile.is_comma_delimited && trimmed.contains(',') {
        trimmed.replace('.', "").replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(number) if number.is_finite() => round_three(number),
        _ => 0.0,
    }
}

pub(crate) fn round_three(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Remove `text[start..end]` and re-join the two sides with single spaces
pub(crate) fn remove_span(text: &str, start: usize, end: usize) -> String {
    collapse_whitespace(&format!("{} {}", &text[..start], &text[end..]))
}

/// Locate the leading quantity of a line.
///
/// Returns the raw quantity string and the rest of the line. Priority: an
/// indefinite article ("a cup" is one cup), a fraction glyph at the start
/// (optionally with a whole number and a range tail), a numeric range or
/// plain number (whichever starts first, ties to the range), and finally a
/// spelled-out number. A leading number word beats digits further along the
/// line ("One 1-inch piece ginger").
///
/// ```rust
/// use recipe_ingredient_parser::fractions::find_quantity;
/// use recipe_ingredient_parser::language_profile::LanguageRegistry;
///
/// let registry = LanguageRegistry::builtin();
/// let english = registry.get("eng").unwrap();
/// let (quantity, rest) = find_quantity("10 to 20 teaspoon water", &english);
/// assert_eq!(quantity.as_deref(), Some("10-20"));
/// assert_eq!(rest, "teaspoon water");
/// ```
pub fn find_quantity(line: &str, profile: &LanguageProfile) -> (Option<String>, String) {
    let patterns = profile.patterns();
    let cleaned = clean_characters(line);

    if let Some(article) = patterns
        .article_leading
        .as_ref()
        .and_then(|re| re.find(&cleaned))
    {
        return (Some("1".to_string()), cleaned[article.end()..].trim().to_string());
    }

    let text = if profile.is_comma_delimited {
        cleaned
    } else {
        cleaned.replace(',', "")
    };

    if let Some(caps) = LEADING_GLYPH.captures(&text) {
        let whole: f64 = caps[1].parse().unwrap_or(0.0);
        let fraction = caps[2].chars().next().and_then(glyph_value).unwrap_or(0.0);
        let total = format_number(whole + fraction, profile);
        let rest = text[caps.get(0).map_or(0, |m| m.end())..].trim();

        if let Some(tail) = patterns.glyph_range_tail.captures(rest) {
            let second = convert_from_fraction(&tail[1], profile);
            let rest = rest[tail.get(0).map_or(0, |m| m.end())..].trim();
            trace!("Glyph range {}-{} in '{}'", total, second, line);
            return (Some(format!("{total}-{second}")), rest.to_string());
        }
        return (Some(total), rest.to_string());
    }

    let range = patterns.range.captures(&text);
    let number = patterns.quantity.find(&text);
    let range_start = range.as_ref().and_then(|caps| caps.get(0)).map(|m| m.start());
    let number_start = number.map(|m| m.start());

    if number_start.is_some_and(|start| start > 0) && range_start.map_or(true, |start| start > 0) {
        if let Some(found) = leading_number_word(&text, profile) {
            return found;
        }
    }

    if let (Some(caps), Some(start)) = (range.as_ref(), range_start) {
        if number_start.map_or(true, |number_start| start <= number_start) {
            let whole = caps.get(0).map_or(start..start, |m| m.range());
            let quantity = format!("{}-{}", caps[1].trim(), caps[2].trim());
            return (Some(quantity), remove_span(&text, whole.start, whole.end));
        }
    }

    if let Some(found) = number {
        let quantity = collapse_whitespace(found.as_str());
        return (Some(quantity), remove_span(&text, found.start(), found.end()));
    }

    leading_number_word(&text, profile).unwrap_or((None, text))
}

fn leading_number_word(text: &str, profile: &LanguageProfile) -> Option<(Option<String>, String)> {
    let word = text.split_whitespace().next()?;
    let value = text_to_number(word, profile)?;
    let start = text.find(word).unwrap_or(0);
    Some((
        Some(value.to_string()),
        remove_span(text, start, start + word.len()),
    ))
}
