//! Rendering a parsed record back into a readable line with fractions
//! ("1 1/2 cups flour").

use crate::ingredient_model::ParsedIngredient;
use crate::language_profile::LanguageProfile;

/// Three-digit remainders of common repeating fractions
const REPEATING_FRACTIONS: &[(&str, &str)] = &[
    ("333", "1/3"),
    ("667", "2/3"),
    ("111", "1/9"),
    ("167", "1/6"),
    ("143", "1/7"),
    ("222", "2/9"),
    ("286", "2/7"),
    ("429", "3/7"),
    ("444", "4/9"),
    ("556", "5/9"),
    ("571", "4/7"),
    ("714", "5/7"),
    ("778", "7/9"),
    ("833", "5/6"),
    ("857", "6/7"),
    ("889", "8/9"),
];

/// Render the quantity as a whole number plus a reduced fraction, followed by
/// the unit (pluralized when the amount exceeds one) and the ingredient.
///
/// Without a profile the unit key is printed as-is.
pub fn pretty_print(ingredient: &ParsedIngredient, profile: Option<&LanguageProfile>) -> String {
    if ingredient.quantity == 0.0 {
        return ingredient.ingredient.clone();
    }

    let whole = ingredient.quantity.floor();
    let remainder = remainder_digits(ingredient.quantity % 1.0);

    let mut amount = if whole != 0.0 {
        format!("{}", whole as i64)
    } else {
        String::new()
    };
    if let Some(digits) = &remainder {
        let fraction = REPEATING_FRACTIONS
            .iter()
            .find(|(repeating, _)| repeating == digits)
            .map(|(_, fraction)| fraction.to_string())
            .unwrap_or_else(|| reduce(digits));
        if amount.is_empty() {
            amount = fraction;
        } else {
            amount = format!("{amount} {fraction}");
        }
    }

    let plural = (whole != 0.0 && remainder.is_some()) || whole > 1.0;
    let unit = ingredient.unit.as_deref().map(|key| {
        profile
            .filter(|_| plural)
            .and_then(|profile| profile.unit(key))
            .map_or(key, |unit| unit.plural.as_str())
    });

    match unit {
        Some(unit) => format!("{amount} {unit} {}", ingredient.ingredient),
        None => format!("{amount} {}", ingredient.ingredient),
    }
}

/// Digits after the decimal point of `fraction` at three significant digits
fn remainder_digits(fraction: f64) -> Option<String> {
    if fraction == 0.0 || !fraction.is_finite() {
        return None;
    }
    let exponent = fraction.abs().log10().floor() as i32;
    let decimals = (2 - exponent).max(0) as usize;
    let rendered = format!("{:.*}", decimals, fraction);
    rendered
        .split_once('.')
        .map(|(_, digits)| digits.to_string())
        .filter(|digits| !digits.is_empty())
}

/// "250" becomes "1/4"
fn reduce(digits: &str) -> String {
    let mut numerator: u64 = digits.parse().unwrap_or(0);
    let mut denominator: u64 = 10u64.pow(digits.len() as u32);
    let divisor = gcd(numerator, denominator);
    if divisor > 0 {
        numerator /= divisor;
        denominator /= divisor;
    }
    format!("{numerator}/{denominator}")
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
