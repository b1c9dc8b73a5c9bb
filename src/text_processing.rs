//! # Text Processing Module
//!
//! Language-independent normalizers applied to an ingredient line before and
//! during parsing.
//!
//! ## Features
//!
//! - Character cleanup: zero-width and control characters, mojibake fraction
//!   sequences, the unicode fraction slash, spaced fractions ("1 / 2")
//! - Bullet and list marker removal
//! - Nesting-aware extraction of parenthetical segments
//! - Comma clause and trailing dash clause extraction into annotation parts
//! - Ampersand mixed numbers ("1 & 1/2") and stray digit separators ("1∕2")

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref INVISIBLE_CHARS: Regex = Regex::new(r"[\u{200B}-\u{200D}\u{FEFF}\u{0000}-\u{0008}\u{000B}\u{000C}\u{000E}-\u{001F}\u{007F}-\u{009F}]")
        .expect("Invisible character pattern should be valid");
    static ref AMPERSAND_FRACTION: Regex = Regex::new(r"(\d)\s*&\s*(\d+/\d+)")
        .expect("Ampersand fraction pattern should be valid");
    static ref SPACED_FRACTION: Regex = Regex::new(r"(\d)\s*/\s*(\d)")
        .expect("Spaced fraction pattern should be valid");
    static ref STRAY_SEPARATOR: Regex = Regex::new(r"([0-9])\s*[^0-9A-Za-z\s\-–.,&/×~()\[\];:%+'’\u{22}\p{No}]\s*([0-9])")
        .expect("Stray separator pattern should be valid");
    static ref MOJIBAKE_SEPARATOR: Regex = Regex::new(r"([0-9])\s*â[^0-9A-Za-z]+([0-9])")
        .expect("Mojibake separator pattern should be valid");
    static ref LIST_MARKER: Regex = Regex::new(r"^\s*[-•]\s+")
        .expect("List marker pattern should be valid");
    static ref LEADING_DASHES: Regex = Regex::new(r"^[-–]+\s*")
        .expect("Leading dash pattern should be valid");
    static ref LEADING_PUNCTUATION: Regex = Regex::new(r"^[^\p{L}\p{N}]+")
        .expect("Leading punctuation pattern should be valid");
    static ref DASH_CLAUSE: Regex = Regex::new(r"\s+[-–]\s+")
        .expect("Dash clause pattern should be valid");
}

/// Remove invisible characters, repair mojibake and tighten spaced fractions.
///
/// ```rust
/// use recipe_ingredient_parser::text_processing::clean_characters;
///
/// assert_eq!(clean_characters("1 \u{200B}/ 2 cup milk"), "1/2 cup milk");
/// assert_eq!(clean_characters("1 â„ 4 cup kefir"), "1/4 cup kefir");
/// ```
pub fn clean_characters(text: &str) -> String {
    let text = text.replace(['\t', '\n', '\r'], " ");
    let text = INVISIBLE_CHARS.replace_all(&text, "");
    let text = text
        .replace("¬Ω", "1/2")
        .replace("â„", "/")
        .replace('Â', "")
        .replace('\u{2044}', "/");
    let text = AMPERSAND_FRACTION.replace_all(&text, "$1 $2");
    let text = SPACED_FRACTION.replace_all(&text, "$1/$2");
    text.trim().to_string()
}

/// Collapse runs of whitespace into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn remove_list_markers(text: &str) -> String {
    LIST_MARKER.replace(text, "").to_string()
}

pub fn remove_leading_dashes(text: &str) -> String {
    LEADING_DASHES.replace(text, "").to_string()
}

/// Drop punctuation left at the start of an ingredient (". salt" after "approx.")
pub fn strip_leading_punctuation(text: &str) -> String {
    LEADING_PUNCTUATION.replace(text, "").to_string()
}

/// "1 & 1/2" becomes "1 1/2"
pub fn normalize_ampersand_fractions(text: &str) -> String {
    AMPERSAND_FRACTION.replace_all(text, "$1 $2").to_string()
}

/// Turn unusual separators between two digits into a fraction slash ("1∕2" -> "1/2")
pub fn normalize_stray_fraction_separators(text: &str) -> String {
    let text = STRAY_SEPARATOR.replace_all(text, "$1/$2");
    MOJIBAKE_SEPARATOR.replace_all(&text, "$1/$2").to_string()
}

/// Pull out parenthetical segments, honouring nesting.
///
/// Returns the line with every top-level group removed and the trimmed inner
/// text of each group in order. Inner parentheses stay inside their segment:
/// "1 (14.5 oz (410g)) can" yields `["14.5 oz (410g)"]`. An unclosed group
/// runs to the end of the line.
pub fn extract_parenthetical_segments(text: &str) -> (String, Vec<String>) {
    let mut cleaned = String::with_capacity(text.len());
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => {
                if depth > 0 {
                    current.push(c);
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let segment = collapse_whitespace(&current);
                    if !segment.is_empty() {
                        segments.push(segment);
                    }
                    current.clear();
                    cleaned.push(' ');
                } else {
                    current.push(c);
                }
            }
            ')' => cleaned.push(' '),
            _ if depth > 0 => current.push(c),
            _ => cleaned.push(c),
        }
    }

    if depth > 0 {
        let segment = collapse_whitespace(&current);
        if !segment.is_empty() {
            segments.push(segment);
        }
    }

    (collapse_whitespace(&cleaned), segments)
}

/// Split trailing comma clauses off the line.
///
/// A comma directly after a digit ("1,500") is not a clause separator. Each
/// clause runs up to the next comma.
pub fn extract_comma_additional(text: &str) -> (String, Vec<String>) {
    let commas: Vec<usize> = text.match_indices(',').map(|(i, _)| i).collect();
    let mut parts = Vec::new();
    let mut removed: Vec<(usize, usize)> = Vec::new();

    for (n, &start) in commas.iter().enumerate() {
        let preceded_by_digit = text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());
        if preceded_by_digit {
            continue;
        }
        let end = commas.get(n + 1).copied().unwrap_or(text.len());
        let part = text[start + 1..end].trim();
        if !part.is_empty() {
            parts.push(part.to_string());
        }
        removed.push((start, end));
    }

    if removed.is_empty() {
        return (text.trim().to_string(), parts);
    }

    let mut line = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in removed {
        line.push_str(&text[cursor..start]);
        cursor = end;
    }
    line.push_str(&text[cursor..]);

    trace!("Comma clauses {:?} split from '{}'", parts, text);
    (collapse_whitespace(&line), parts)
}

/// Split a trailing " - clause" off the line unless the dash sits between two numbers
pub fn extract_dash_clause(text: &str) -> (String, Option<String>) {
    for found in DASH_CLAUSE.find_iter(text) {
        let before = text[..found.start()].chars().next_back();
        let after = text[found.end()..].chars().next();
        let numeric = |c: Option<char>| c.is_some_and(is_numeric_char);
        if numeric(before) && numeric(after) {
            continue;
        }
        let head = text[..found.start()].trim();
        let tail = text[found.end()..].trim();
        if head.is_empty() || tail.is_empty() {
            continue;
        }
        return (head.to_string(), Some(tail.to_string()));
    }
    (text.to_string(), None)
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || crate::fractions::glyph_value(c).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_characters() {
        let cases = vec![
            ("1 dash \u{200B}\u{200B}ground cinnamon", "1 dash ground cinnamon"),
            ("1\u{2044}2 cup carrot", "1/2 cup carrot"),
            ("¬Ω cup olive oil", "1/2 cup olive oil"),
            ("1 & 1/2 Cups Water", "1 1/2 Cups Water"),
            ("1 /2 cup Sprinkling Crumbs", "1/2 cup Sprinkling Crumbs"),
            ("  2 cups\tflour ", "2 cups flour"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_characters(input), expected, "cleaning {input:?}");
        }
    }

    #[test]
    fn test_list_markers_and_dashes() {
        assert_eq!(remove_list_markers("- 500 g water"), "500 g water");
        assert_eq!(remove_list_markers("• 2 eggs"), "2 eggs");
        assert_eq!(remove_list_markers("-2 eggs"), "-2 eggs");
        assert_eq!(remove_leading_dashes("-oz can sauce"), "oz can sauce");
    }

    #[test]
    fn test_parenthetical_segments() {
        let (line, segments) = extract_parenthetical_segments("1 (14.5 oz) can tomatoes");
        assert_eq!(line, "1 can tomatoes");
        assert_eq!(segments, vec!["14.5 oz"]);

        let (line, segments) =
            extract_parenthetical_segments("1 (14.5 oz (410g)) can tomatoes (drained)");
        assert_eq!(line, "1 can tomatoes");
        assert_eq!(segments, vec!["14.5 oz (410g)", "drained"]);

        let (line, segments) = extract_parenthetical_segments("salt (to taste");
        assert_eq!(line, "salt");
        assert_eq!(segments, vec!["to taste"]);
    }

    #[test]
    fn test_comma_additional() {
        let (line, parts) = extract_comma_additional("2 cloves garlic, finely chopped");
        assert_eq!(line, "2 cloves garlic");
        assert_eq!(parts, vec!["finely chopped"]);

        let (line, parts) = extract_comma_additional("1,500.50 teaspoon water");
        assert_eq!(line, "1,500.50 teaspoon water");
        assert!(parts.is_empty());

        let (line, parts) = extract_comma_additional(
            "2 cans full-fat coconut milk, 13.5 ounces, do not use lite",
        );
        assert_eq!(line, "2 cans full-fat coconut milk");
        assert_eq!(parts, vec!["13.5 ounces", "do not use lite"]);
    }

    #[test]
    fn test_dash_clause() {
        assert_eq!(
            extract_dash_clause("450 g cherries - stalks removed and stoned"),
            (
                "450 g cherries".to_string(),
                Some("stalks removed and stoned".to_string())
            )
        );
        assert_eq!(
            extract_dash_clause("1 - 2 chicken breasts"),
            ("1 - 2 chicken breasts".to_string(), None)
        );
        assert_eq!(
            extract_dash_clause("¼ – ½ cup flour"),
            ("¼ – ½ cup flour".to_string(), None)
        );
    }

    #[test]
    fn test_fraction_separators() {
        assert_eq!(normalize_ampersand_fractions("1 & 1/2 cups"), "1 1/2 cups");
        assert_eq!(normalize_stray_fraction_separators("1∕2 cup"), "1/2 cup");
        assert_eq!(normalize_stray_fraction_separators("3×250ml"), "3×250ml");
        assert_eq!(normalize_stray_fraction_separators("2 x 100 g"), "2 x 100 g");
    }

    #[test]
    fn test_strip_leading_punctuation() {
        assert_eq!(strip_leading_punctuation(". salt"), "salt");
        assert_eq!(strip_leading_punctuation("½ cup"), "½ cup");
    }
}
