//! Spelled-out number decoding ("twenty-one", "tres", "one thousand two hundred").

use crate::language_profile::LanguageProfile;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref WORD_SEPARATOR: Regex =
        Regex::new(r"[\s-]+").expect("Word separator pattern should be valid");
}

/// Decode spelled-out number words into an integer.
///
/// Small numbers accumulate into a group, "hundred" multiplies the group, and
/// larger magnitudes flush `group * magnitude` into the running total. Returns
/// `None` as soon as a word is not a number word, so "zero" (`Some(0)`) stays
/// distinguishable from "not a number".
pub fn text_to_number(text: &str, profile: &LanguageProfile) -> Option<i64> {
    let mut total: i64 = 0;
    let mut group: i64 = 0;
    let mut seen_word = false;

    for word in WORD_SEPARATOR.split(text.trim()).filter(|w| !w.is_empty()) {
        seen_word = true;
        if let Some(value) = profile.small_number(word) {
            group += value;
        } else if let Some(magnitude) = profile.magnitude(word) {
            if magnitude == 100 {
                group = if group > 0 { group * 100 } else { 100 };
            } else {
                total += group * magnitude;
                group = 0;
            }
        } else {
            trace!("'{}' is not a number word in '{}'", word, profile.code);
            return None;
        }
    }

    seen_word.then_some(total + group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_profile::DEFAULT_REGISTRY;

    #[test]
    fn test_english_number_words() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let cases = vec![
            ("twenty-one", Some(21)),
            ("Three", Some(3)),
            ("three hundred", Some(300)),
            ("hundred", Some(100)),
            ("one thousand two hundred", Some(1200)),
            ("two million five", Some(2_000_005)),
            ("zero", Some(0)),
            ("tomato", None),
            ("twenty tomatoes", None),
            ("", None),
        ];
        for (input, expected) in cases {
            assert_eq!(text_to_number(input, &english), expected, "decoding {input:?}");
        }
    }

    #[test]
    fn test_other_languages() {
        let registry = DEFAULT_REGISTRY.clone();
        let spanish = registry.get("esp").unwrap();
        assert_eq!(text_to_number("tres", &spanish), Some(3));
        let german = registry.get("deu").unwrap();
        assert_eq!(text_to_number("eine", &german), Some(1));
    }
}
