//! # Profile Patterns Module
//!
//! Regexes derived from a [`LanguageProfile`]'s word lists. They are compiled
//! once per profile and reused by every parse. Phrase alternations are ordered
//! longest-first so that a longer phrase is never shadowed by a shorter phrase
//! sharing its prefix ("lukewarm" before "warm").

use crate::fractions::FRACTION_GLYPHS;
use crate::language_profile::LanguageProfile;
use crate::parser_errors::ParserError;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Keys whose sizes may precede a container word ("15-ounce can")
const CONTAINER_SIZE_UNITS: &[&str] = &["ounce", "pound", "gram", "kilogram", "milliliter", "liter"];
/// Count units that may follow a container size ("200 g piece")
const CONTAINER_FOLLOW_UNITS: &[&str] = &["piece", "bunch", "handful"];
const CONTAINER_KEYS: &[&str] = &["can", "bag", "pack"];

const QUANTITY_PERIOD_DECIMAL: &str =
    r"\d+\s*/\s*\d+|\d+\s+\d+\s*/\s*\d+|\d+(?:,?\d+)*\.\d+|\d+";
const QUANTITY_COMMA_DECIMAL: &str =
    r"\d+\s*/\s*\d+|\d+\s+\d+\s*/\s*\d+|\d+(?:\.?\d+)*,\d+|\d+";

/// One surface form of a unit
#[derive(Debug)]
pub(crate) struct UnitPattern {
    /// Index into `LanguageProfile::units`
    pub unit_index: usize,
    /// Name bounded by non-alphanumerics, the name itself in group 1
    pub regex: Regex,
}

/// A to-taste phrase with its first-letter abbreviation ("to taste" / "t.t.")
#[derive(Debug)]
pub(crate) struct ToTasteForm {
    pub shorthand: String,
    pub full: Regex,
    pub abbreviation: Option<Regex>,
}

#[derive(Debug)]
pub(crate) struct ProfilePatterns {
    pub approx_leading: Option<Regex>,
    pub approx_anywhere: Option<Regex>,
    pub optional: Option<Regex>,
    pub optional_label: Option<Regex>,
    pub to_serve: Option<Regex>,
    pub to_taste: Option<Regex>,
    pub to_taste_additional: Option<Regex>,
    pub to_taste_forms: Vec<ToTasteForm>,
    pub instruction: Option<Regex>,
    pub instruction_leading: Option<Regex>,
    pub instruction_trailing: Option<Regex>,
    pub adverb: Option<Regex>,
    pub preposition_leading: Option<Regex>,
    pub filler_leading: Option<Regex>,
    pub stopword_edges: Option<Regex>,
    pub article_leading: Option<Regex>,
    pub alternative_joiner: Option<Regex>,
    pub alternative_joiner_leading: Option<Regex>,
    pub alternative_exclusion: Option<Regex>,
    pub quantity: Regex,
    pub range: Regex,
    pub glyph_range_tail: Regex,
    pub stacked_range_tail: Regex,
    pub units: Vec<UnitPattern>,
    pub measure_unit_leading: Option<Regex>,
    pub container_word: Option<Regex>,
    pub can_word_leading: Option<Regex>,
    pub word_number_can: Option<Regex>,
    pub container_keys: HashMap<String, String>,
    pub container_size: Option<Regex>,
    pub container_follow: Option<Regex>,
    pub inch_descriptor: Option<Regex>,
    pub inch_leading: Option<Regex>,
    pub inch_implicit: Option<Regex>,
    pub inch_mention: Option<Regex>,
    pub piece_word: Option<Regex>,
    pub count_weight_range: Option<Regex>,
    pub weight_range: Option<Regex>,
}

impl ProfilePatterns {
    pub fn compile(profile: &LanguageProfile) -> Result<Self, ParserError> {
        let joiners = alternation(&profile.joiners);
        let quantity = quantity_pattern(profile);
        let glyphs = FRACTION_GLYPHS;

        let range_separator = match &joiners {
            Some(j) => format!(r"(?:[-–]|(?:{j}))"),
            None => "[-–]".to_string(),
        };
        let glyph_tail_separator = match &joiners {
            Some(j) => format!(r"(?:[-–]|(?:{j})\s)"),
            None => "[-–]".to_string(),
        };
        let stacked_tail_separator = match &joiners {
            Some(j) => format!(r"(?:[-–]|(?:{j})\b)"),
            None => "[-–]".to_string(),
        };

        let inch_words = unit_words(profile, &["inch"]);
        let size_words = unit_words(profile, CONTAINER_SIZE_UNITS);
        let size_prefix = size_prefix(profile);
        let pound_words = unit_words(profile, &["pound"]);
        let piece_words = unit_words(profile, &["piece"]);

        let mut container_keys = HashMap::new();
        let mut container_words = Vec::new();
        for key in CONTAINER_KEYS {
            for word in profile.container_words_for(key) {
                container_keys.insert(word.to_lowercase(), key.to_string());
                container_words.push(word);
            }
        }
        let can_words = alternation(&profile.container_words_for("can"));
        let mut follow_words = container_words.clone();
        follow_words.extend(unit_word_list(profile, CONTAINER_FOLLOW_UNITS));

        let approx = bounded_alternation(&profile.approx);
        let instructions = alternation(&profile.instructions);
        let adverbs = alternation(&profile.adverbs);
        let to_taste = bounded_alternation(&profile.to_taste);
        let to_taste_additional = bounded_alternation(&profile.to_taste_additional);

        let instruction = instructions.as_ref().map(|instr| match &adverbs {
            Some(adv) => format!(r"(?i)\b(?:(?:{adv})\s+)?(?:{instr})\b"),
            None => format!(r"(?i)\b(?:{instr})\b"),
        });
        let to_taste_pattern = to_taste.as_ref().map(|tt| match &to_taste_additional {
            Some(extra) => format!(r"(?i)(?:(?:{extra})\s+)?(?:{tt})"),
            None => format!(r"(?i)(?:{tt})"),
        });
        let stopwords = alternation(&profile.additional_stopwords);

        let measure_names: Vec<String> = profile
            .units
            .iter()
            .filter(|unit| unit.is_measure())
            .flat_map(|unit| unit.names.iter().chain(std::iter::once(&unit.plural)))
            .filter(|name| name.chars().count() >= 2 && name.chars().all(|c| c.is_alphabetic() || c == ' '))
            .cloned()
            .collect();

        Ok(Self {
            approx_leading: compile_opt(approx.as_ref().map(|a| format!(r"(?i)^(?:{a})")))?,
            approx_anywhere: compile_opt(approx.as_ref().map(|a| format!(r"(?i)(?:{a})")))?,
            optional: compile_opt(
                bounded_alternation(&profile.optional).map(|o| format!(r"(?i)(?:^|[\s,(])\s*(?:{o})")),
            )?,
            optional_label: compile_opt(
                alternation(&profile.optional).map(|o| format!(r"(?i)^\s*(?:{o})\s*:\s*")),
            )?,
            to_serve: compile_opt(bounded_alternation(&profile.to_serve).map(|s| format!(r"(?i)(?:{s})")))?,
            to_taste: compile_opt(to_taste_pattern)?,
            to_taste_additional: compile_opt(
                to_taste_additional.as_ref().map(|t| format!(r"(?i)(?:{t})")),
            )?,
            to_taste_forms: to_taste_forms(profile)?,
            instruction: compile_opt(instruction)?,
            instruction_leading: compile_opt(
                instructions.as_ref().map(|i| format!(r"(?i)^(?:{i})\b")),
            )?,
            instruction_trailing: compile_opt(
                instructions.as_ref().map(|i| format!(r"(?i)\b(?:{i})\s*$")),
            )?,
            adverb: compile_opt(adverbs.as_ref().map(|a| format!(r"(?i)\b(?:{a})\b")))?,
            preposition_leading: compile_opt(
                alternation(&profile.prepositions).map(|p| format!(r"(?i)^(?:{p})\s+")),
            )?,
            filler_leading: compile_opt(
                alternation(&profile.filler_words).map(|f| format!(r"(?i)^(?:{f})\s+")),
            )?,
            stopword_edges: compile_opt(
                stopwords.map(|s| format!(r"(?i)^(?:{s})(?:\s+|$)|\s+(?:{s})$")),
            )?,
            article_leading: compile_opt(
                alternation(&profile.indefinite_articles).map(|a| format!(r"(?i)^(?:{a})\s+")),
            )?,
            alternative_joiner: compile_opt(
                alternation(&profile.alternative_joiners).map(|j| format!(r"(?i)\s+(?:{j})\s+")),
            )?,
            alternative_joiner_leading: compile_opt(
                alternation(&profile.alternative_joiners).map(|j| format!(r"(?i)^\s*(?:{j})\s+")),
            )?,
            alternative_exclusion: compile_opt(
                alternation(&profile.alternative_exclusions).map(|e| format!(r"(?i)\b(?:{e})\b")),
            )?,
            quantity: Regex::new(&quantity)?,
            range: Regex::new(&format!(
                r"(?i)((?:{quantity}))\s*{range_separator}\s*((?:{quantity}))"
            ))?,
            glyph_range_tail: Regex::new(&format!(
                r"(?i)^\s*{glyph_tail_separator}\s*([\d{glyphs}]\S*)"
            ))?,
            stacked_range_tail: Regex::new(&format!(r"(?i)^{stacked_tail_separator}\s*\d"))?,
            units: unit_patterns(profile)?,
            measure_unit_leading: compile_opt(
                alternation(&measure_names).map(|m| format!(r"(?i)^(?:{m})(?:\s+|$)")),
            )?,
            container_word: compile_opt(
                alternation(&container_words).map(|w| format!(r"(?i)\b(?:{w})\b")),
            )?,
            can_word_leading: compile_opt(
                can_words.as_ref().map(|c| format!(r"(?i)^(?:{c})\s+")),
            )?,
            word_number_can: compile_opt(can_words.as_ref().map(|c| {
                format!(
                    r"(?i)^(\p{{L}}+)\s+([\d.,/{glyphs}-]+(?:\s*-?\s*\p{{L}}+)?)\s+((?:{c}))\b\s*(.*)$"
                )
            }))?,
            container_keys,
            container_size: compile_opt(size_words.as_ref().map(|w| {
                format!(
                    r"(?i)^{size_prefix}(\d+(?:[.,]\d+)?(?:\s*[–-]\s*\d+(?:[.,]\d+)?)?\s*-?\s*(?:{w})\b\.?)[-\s]*"
                )
            }))?,
            container_follow: compile_opt(
                alternation(&follow_words).map(|w| format!(r"(?i)^\s*(?:{w})(?:$|[^\p{{L}}\p{{N}}])")),
            )?,
            inch_descriptor: compile_opt(inch_words.as_ref().map(|w| {
                format!(
                    r"(?i)^((?:\d+(?:[.,]\d+)?[{glyphs}]?|[{glyphs}])(?:\s*[–-]\s*\d+(?:[.,]\d+)?)?\s*-?\s*(?:{w}))\b[-\s]*"
                )
            }))?,
            inch_leading: compile_opt(
                inch_words.as_ref().map(|w| format!(r"(?i)^\d+\s*[-–]?\s*(?:{w})\b")),
            )?,
            inch_implicit: compile_opt(inch_words.as_ref().map(|w| format!(r"(?i)^(?:{w})\b[-\s]*")))?,
            inch_mention: compile_opt(inch_words.as_ref().map(|w| {
                format!(r"(?i)((?:\d+(?:[.,]\d+)?[{glyphs}]?|[{glyphs}])\s*-?\s*(?:{w}))\b")
            }))?,
            piece_word: compile_opt(piece_words.map(|w| format!(r"(?i)\b(?:{w})\b")))?,
            count_weight_range: compile_opt(pound_words.as_ref().map(|w| {
                format!(r"(?i)^\s*(\d+)\s+(\d+\s*[-–]\s*\d+)\s*({w})\b")
            }))?,
            weight_range: compile_opt(
                pound_words.map(|w| format!(r"(?i)\d+\s*[-–]\s*\d+\s*(?:{w})\b\.?")),
            )?,
        })
    }

    /// Patterns that never match anything beyond plain numbers
    pub fn inert(profile: &LanguageProfile) -> Self {
        let quantity = quantity_pattern(profile);
        Self {
            approx_leading: None,
            approx_anywhere: None,
            optional: None,
            optional_label: None,
            to_serve: None,
            to_taste: None,
            to_taste_additional: None,
            to_taste_forms: Vec::new(),
            instruction: None,
            instruction_leading: None,
            instruction_trailing: None,
            adverb: None,
            preposition_leading: None,
            filler_leading: None,
            stopword_edges: None,
            article_leading: None,
            alternative_joiner: None,
            alternative_joiner_leading: None,
            alternative_exclusion: None,
            quantity: Regex::new(&quantity).expect("Quantity pattern should be valid"),
            range: Regex::new(&format!(r"((?:{quantity}))\s*[-–]\s*((?:{quantity}))"))
                .expect("Range pattern should be valid"),
            glyph_range_tail: Regex::new(&format!(r"^\s*[-–]\s*([\d{FRACTION_GLYPHS}]\S*)"))
                .expect("Glyph range pattern should be valid"),
            stacked_range_tail: Regex::new(r"^[-–]\s*\d").expect("Range tail pattern should be valid"),
            units: Vec::new(),
            measure_unit_leading: None,
            container_word: None,
            can_word_leading: None,
            word_number_can: None,
            container_keys: HashMap::new(),
            container_size: None,
            container_follow: None,
            inch_descriptor: None,
            inch_leading: None,
            inch_implicit: None,
            inch_mention: None,
            piece_word: None,
            count_weight_range: None,
            weight_range: None,
        }
    }
}

fn compile_opt(pattern: Option<String>) -> Result<Option<Regex>, ParserError> {
    pattern.map(|p| Regex::new(&p)).transpose().map_err(ParserError::from)
}

fn quantity_pattern(profile: &LanguageProfile) -> String {
    if profile.is_comma_delimited {
        QUANTITY_COMMA_DECIMAL.to_string()
    } else {
        QUANTITY_PERIOD_DECIMAL.to_string()
    }
}

/// Escape a phrase so literal spaces match any run of whitespace
fn phrase_pattern(phrase: &str) -> String {
    regex::escape(phrase).replace(' ', r"\s+")
}

/// Trimmed, case-insensitively distinct phrases, longest first
fn ordered_phrases<S: AsRef<str>>(phrases: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut cleaned: Vec<&str> = phrases
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty() && seen.insert(p.to_lowercase()))
        .collect();
    cleaned.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
    cleaned
}

/// Build a longest-first alternation, or `None` when the list is empty
pub(crate) fn alternation<S: AsRef<str>>(phrases: &[S]) -> Option<String> {
    let cleaned = ordered_phrases(phrases);
    if cleaned.is_empty() {
        return None;
    }
    Some(
        cleaned
            .into_iter()
            .map(phrase_pattern)
            .collect::<Vec<_>>()
            .join("|"),
    )
}

/// Like [`alternation`], with a word boundary on each phrase edge that is a word character.
///
/// "option." and "~" end or start on punctuation, where `\b` would never match.
fn bounded_alternation<S: AsRef<str>>(phrases: &[S]) -> Option<String> {
    let cleaned = ordered_phrases(phrases);
    if cleaned.is_empty() {
        return None;
    }
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    Some(
        cleaned
            .into_iter()
            .map(|phrase| {
                let lead = if is_word(phrase.chars().next()) { r"\b" } else { "" };
                let tail = if is_word(phrase.chars().next_back()) { r"\b" } else { "" };
                format!("{lead}{}{tail}", phrase_pattern(phrase))
            })
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn unit_word_list(profile: &LanguageProfile, keys: &[&str]) -> Vec<String> {
    profile
        .units
        .iter()
        .filter(|unit| keys.contains(&unit.key.as_str()))
        .flat_map(|unit| unit.names.iter().chain(std::iter::once(&unit.plural)))
        .cloned()
        .collect()
}

fn unit_words(profile: &LanguageProfile, keys: &[&str]) -> Option<String> {
    alternation(&unit_word_list(profile, keys))
}

/// Optional "of a" style lead-in before a container size
fn size_prefix(profile: &LanguageProfile) -> String {
    let mut prefix = String::new();
    if let Some(preps) = alternation(&profile.prepositions) {
        prefix.push_str(&format!(r"(?:(?:{preps})\s+)?"));
    }
    if let Some(articles) = alternation(&profile.indefinite_articles) {
        prefix.push_str(&format!(r"(?:(?:{articles})\s+)?"));
    }
    prefix
}

fn unit_patterns(profile: &LanguageProfile) -> Result<Vec<UnitPattern>, ParserError> {
    let mut patterns = Vec::new();
    for (unit_index, unit) in profile.units.iter().enumerate() {
        let mut seen = HashSet::new();
        let forms = unit.names.iter().chain(std::iter::once(&unit.plural));
        for form in forms {
            let form = form.trim();
            if form.is_empty() || !seen.insert(form.to_string()) {
                continue;
            }
            let flags = if collides_with_other_unit(profile, unit_index, form) {
                ""
            } else {
                "(?i)"
            };
            // group 1 is the name; a degree sign is part of "°C", never a boundary before "C"
            let pattern = format!(
                r"{flags}(?:^|[^\p{{L}}\p{{N}}°º])({})(?:$|[^\p{{L}}\p{{N}}])",
                phrase_pattern(form)
            );
            patterns.push(UnitPattern {
                unit_index,
                regex: Regex::new(&pattern)?,
            });
        }
    }
    Ok(patterns)
}

/// True when another unit owns a name equal to `form` ignoring case ("t" vs "T")
fn collides_with_other_unit(profile: &LanguageProfile, unit_index: usize, form: &str) -> bool {
    let lowered = form.to_lowercase();
    profile.units.iter().enumerate().any(|(index, other)| {
        index != unit_index
            && other
                .names
                .iter()
                .any(|name| name != form && name.to_lowercase() == lowered)
    })
}

fn to_taste_forms(profile: &LanguageProfile) -> Result<Vec<ToTasteForm>, ParserError> {
    let initial = Regex::new(r"\b(\w)").expect("Initial letter pattern should be valid");
    let mut forms = Vec::new();
    for phrase in &profile.to_taste {
        let letters: Vec<String> = initial
            .captures_iter(phrase)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect();
        if letters.is_empty() {
            continue;
        }
        let shorthand = format!("{}.", letters.join(".")).to_lowercase();
        let full = Regex::new(&format!(
            r"(?i)(?:^|[^\p{{L}}\p{{N}}])({})(?:$|[^\p{{L}}\p{{N}}])",
            phrase_pattern(phrase)
        ))?;
        let abbreviation = if letters.len() > 1 {
            let escaped: Vec<String> = letters.iter().map(|l| regex::escape(l)).collect();
            Some(Regex::new(&format!(r"(?i)\b{}[.]?\b", escaped.join("[.]?")))?)
        } else {
            None
        };
        forms.push(ToTasteForm {
            shorthand,
            full,
            abbreviation,
        });
    }
    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language_profile::DEFAULT_REGISTRY;

    #[test]
    fn test_alternation_longest_first() {
        let phrases = vec!["warm", "lukewarm", "", "Warm"];
        assert_eq!(alternation(&phrases).unwrap(), "lukewarm|warm");
        let empty: Vec<String> = Vec::new();
        assert!(alternation(&empty).is_none());
    }

    #[test]
    fn test_bounded_alternation_edges() {
        let phrases = vec!["option.", "~", "if desired"];
        assert_eq!(
            bounded_alternation(&phrases).unwrap(),
            r"\bif\s+desired\b|\boption\.|\~"
        );
        let re = Regex::new(&format!("(?i)(?:{})", bounded_alternation(&phrases).unwrap())).unwrap();
        assert_eq!(re.find("water, option.").unwrap().as_str(), "option.");
        assert!(re.find("optionally").is_none());
    }

    #[test]
    fn test_phrase_pattern_escapes() {
        assert_eq!(phrase_pattern("t.t."), r"t\.t\.");
        assert_eq!(phrase_pattern("to taste"), r"to\s+taste");
    }

    #[test]
    fn test_case_sensitive_single_letters() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let teaspoon = english.units.iter().position(|u| u.key == "teaspoon").unwrap();
        let cup = english.units.iter().position(|u| u.key == "cup").unwrap();
        assert!(collides_with_other_unit(&english, teaspoon, "t"));
        // "C" and "c" both belong to cup
        assert!(!collides_with_other_unit(&english, cup, "c"));
    }

    #[test]
    fn test_compiled_patterns_match() {
        let registry = DEFAULT_REGISTRY.clone();
        let english = registry.get("eng").unwrap();
        let patterns = english.patterns();

        let instruction = patterns.instruction.as_ref().unwrap();
        let found = instruction.find("152g lukewarm water").unwrap();
        assert_eq!(found.as_str(), "lukewarm");

        let to_taste = patterns.to_taste.as_ref().unwrap();
        assert_eq!(to_taste.find("pepper, season to taste").unwrap().as_str(), "season to taste");

        let range = &patterns.range;
        let caps = range.captures("10 to 20 teaspoon water").unwrap();
        assert_eq!(&caps[1], "10");
        assert_eq!(&caps[2], "20");

        assert_eq!(patterns.to_taste_forms[0].shorthand, "t.t.");

        let celsius = english.units.iter().position(|u| u.key == "celsius").unwrap();
        let degree = patterns
            .units
            .iter()
            .find(|p| p.unit_index == celsius && p.regex.is_match("°C"))
            .unwrap();
        let caps = degree.regex.captures("350 °C oven").unwrap();
        assert_eq!(&caps[1], "°C");
    }
}
