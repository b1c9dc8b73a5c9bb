//! Flag phrase detection: approximate, optional, to-serve and to-taste.
//!
//! Optional, to-serve and to-taste are read from the untouched original line
//! (flag only) and from the working line (flag and strip). Approximation is
//! only recognized at the start of the working line, except for the final
//! sweep over the assembled ingredient and annotations.

use crate::language_profile::LanguageProfile;
use crate::text_processing::collapse_whitespace;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref EDGE_SEPARATORS: Regex =
        Regex::new(r"^[,\s]+|[,\s]+$").expect("Edge separator pattern should be valid");
}

/// Flags collected while parsing a line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub approx: bool,
    pub optional: bool,
    pub to_serve: bool,
    pub to_taste: bool,
}

fn strip_all(text: &str, regex: Option<&Regex>) -> Option<String> {
    let regex = regex?;
    if !regex.is_match(text) {
        return None;
    }
    Some(collapse_whitespace(&regex.replace_all(text, " ")))
}

fn trim_edges(text: &str) -> String {
    EDGE_SEPARATORS.replace_all(text, "").trim().to_string()
}

/// Strip a leading "Optional:" label
pub fn remove_optional_label(line: &str, profile: &LanguageProfile) -> (String, bool) {
    match &profile.patterns().optional_label {
        Some(re) if re.is_match(line) => (re.replace(line, "").trim().to_string(), true),
        _ => (line.to_string(), false),
    }
}

/// Strip a leading approximation word ("about", "~"), setting `flags.approx`
pub fn detect_approx(line: &str, flags: &mut Flags, profile: &LanguageProfile) -> String {
    let Some(re) = &profile.patterns().approx_leading else {
        return line.to_string();
    };
    match re.find(line) {
        Some(found) => {
            flags.approx = true;
            line[found.end()..].trim().to_string()
        }
        None => line.to_string(),
    }
}

/// Detect optional, to-serve and to-taste phrases.
///
/// `original` is only inspected. Matches in `line` set the flag and are removed.
pub fn detect_flags(
    line: &str,
    original: Option<&str>,
    flags: &mut Flags,
    profile: &LanguageProfile,
) -> String {
    let patterns = profile.patterns();
    let categories = [
        (patterns.optional.as_ref(), &mut flags.optional),
        (patterns.to_serve.as_ref(), &mut flags.to_serve),
        (patterns.to_taste.as_ref(), &mut flags.to_taste),
    ];

    let mut working = line.to_string();
    for (regex, flag) in categories {
        let Some(regex) = regex else {
            continue;
        };
        if original.is_some_and(|text| regex.is_match(text)) {
            *flag = true;
        }
        if let Some(stripped) = strip_all(&working, Some(regex)) {
            trace!("Flag phrase removed from '{}'", working);
            *flag = true;
            working = stripped;
        }
    }
    working.trim().to_string()
}

/// Remove every flag phrase without recording anything
pub fn strip_flag_phrases(text: &str, profile: &LanguageProfile) -> String {
    let patterns = profile.patterns();
    let mut working = text.to_string();
    for regex in [&patterns.optional, &patterns.to_serve, &patterns.to_taste] {
        if let Some(stripped) = strip_all(&working, regex.as_ref()) {
            working = stripped;
        }
    }
    trim_edges(&working)
}

/// Clean one annotation part of the phrases whose flags are set
pub fn clean_additional_part(part: &str, flags: &Flags, profile: &LanguageProfile) -> String {
    let patterns = profile.patterns();
    let mut working = part.to_string();

    if flags.optional {
        if let Some(stripped) = strip_all(&working, patterns.optional.as_ref()) {
            working = stripped;
        }
    }
    if flags.to_serve {
        if let Some(stripped) = strip_all(&working, patterns.to_serve.as_ref()) {
            working = trim_edges(&stripped);
        }
    }
    if flags.to_taste {
        if let Some(stripped) = strip_all(&working, patterns.to_taste.as_ref()) {
            working = trim_edges(&stripped);
            if let Some(extra) = strip_all(&working, patterns.to_taste_additional.as_ref()) {
                working = trim_edges(&extra);
            }
        }
    }
    working.trim().to_string()
}

/// Remove approximation words anywhere in the text, reporting whether any were found
pub fn remove_approx_anywhere(text: &str, profile: &LanguageProfile) -> (String, bool) {
    match strip_all(text, profile.patterns().approx_anywhere.as_ref()) {
        Some(stripped) => (stripped.trim().to_string(), true),
        None => (text.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_profile::DEFAULT_REGISTRY;

    #[test]
    fn test_optional_label() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        assert_eq!(
            remove_optional_label("Optional: 1 tsp chili flakes", &english),
            ("1 tsp chili flakes".to_string(), true)
        );
        assert_eq!(
            remove_optional_label("1 tsp chili flakes", &english),
            ("1 tsp chili flakes".to_string(), false)
        );
    }

    #[test]
    fn test_detect_approx() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let mut flags = Flags::default();
        assert_eq!(detect_approx("about 1 cup rice", &mut flags, &english), "1 cup rice");
        assert!(flags.approx);

        let mut flags = Flags::default();
        assert_eq!(detect_approx("1 cup rice", &mut flags, &english), "1 cup rice");
        assert!(!flags.approx);

        let cases = vec![
            ("eng", "approx. 200 g flour", "200 g flour"),
            ("eng", "~2g ginger", "2g ginger"),
            ("fra", "env. 200 g farine", "200 g farine"),
            ("hun", "kb. 2 csésze liszt", "2 csésze liszt"),
        ];
        for (language, input, expected) in cases {
            let profile = registry.get(language).unwrap();
            let mut flags = Flags::default();
            assert_eq!(detect_approx(input, &mut flags, &profile), expected, "line of {input:?}");
            assert!(flags.approx, "approx of {input:?}");
        }
    }

    #[test]
    fn test_detect_flags() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let cases = vec![
            ("optional 2 tbsp cream", "2 tbsp cream", Flags { optional: true, ..Flags::default() }),
            ("1 cup cream to serve", "1 cup cream", Flags { to_serve: true, ..Flags::default() }),
            ("1 tbs pepper season to taste", "1 tbs pepper", Flags { to_taste: true, ..Flags::default() }),
            ("TT of salt", "of salt", Flags { to_taste: true, ..Flags::default() }),
            ("option. of water", "of water", Flags { optional: true, ..Flags::default() }),
            ("salt t.t.", "salt", Flags { to_taste: true, ..Flags::default() }),
            ("2 cups flour", "2 cups flour", Flags::default()),
        ];
        for (input, expected_line, expected_flags) in cases {
            let mut flags = Flags::default();
            let line = detect_flags(input, Some(input), &mut flags, &english);
            assert_eq!(line, expected_line, "line of {input:?}");
            assert_eq!(flags, expected_flags, "flags of {input:?}");
        }
    }

    #[test]
    fn test_original_only_sets_flag() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let mut flags = Flags::default();
        let line = detect_flags("1 cup sugar", Some("1 cup sugar (optional)"), &mut flags, &english);
        assert_eq!(line, "1 cup sugar");
        assert!(flags.optional);
    }

    #[test]
    fn test_clean_additional_part() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let flags = Flags {
            to_taste: true,
            to_serve: true,
            optional: true,
            ..Flags::default()
        };
        assert_eq!(clean_additional_part("more to taste", &flags, &english), "");
        assert_eq!(clean_additional_part("optional", &flags, &english), "");
        assert_eq!(clean_additional_part("for serving", &flags, &english), "");
        assert_eq!(clean_additional_part("finely chopped", &flags, &english), "finely chopped");
    }

    #[test]
    fn test_remove_approx_anywhere() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        assert_eq!(
            remove_approx_anywhere("roughly 200g", &english),
            ("200g".to_string(), true)
        );
        assert_eq!(
            remove_approx_anywhere("flour", &english),
            ("flour".to_string(), false)
        );
    }
}
