//! Preparation instructions ("chopped", "thinly sliced", "at room temperature").
//!
//! Instruction phrases are removed from the ingredient name and the annotation
//! parts and collected separately. A hyphenated word never yields a partial
//! match, so "sun-dried" stays whole even when "dried" is an instruction.

use crate::language_profile::LanguageProfile;
use crate::text_processing::collapse_whitespace;
use log::trace;
use regex::Regex;

/// Find the next match that is not glued to a hyphen on either side
fn find_unhyphenated<'t>(regex: &Regex, text: &'t str, mut from: usize) -> Option<regex::Match<'t>> {
    while from <= text.len() {
        let found = regex.find_at(text, from)?;
        let before = text[..found.start()].chars().next_back();
        let after = text[found.end()..].chars().next();
        if before != Some('-') && after != Some('-') {
            return Some(found);
        }
        // step one character past the rejected start
        let step = text[found.start()..].chars().next().map_or(1, char::len_utf8);
        from = found.start() + step;
    }
    None
}

/// Remove every unhyphenated match of `regex`, returning the rest and the matches
fn take_all(text: &str, regex: &Regex) -> (String, Vec<String>) {
    let mut found = Vec::new();
    let mut rest = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut from = 0;

    while let Some(m) = find_unhyphenated(regex, text, from) {
        if m.start() == m.end() {
            break;
        }
        rest.push_str(&text[cursor..m.start()]);
        rest.push(' ');
        found.push(collapse_whitespace(m.as_str()));
        cursor = m.end();
        from = m.end();
    }
    rest.push_str(&text[cursor..]);
    (collapse_whitespace(&rest), found)
}

/// Pull instruction phrases (with an optional leading adverb) out of `text`.
///
/// ```rust
/// use recipe_ingredient_parser::instructions::extract_instructions;
/// use recipe_ingredient_parser::language_profile::LanguageRegistry;
///
/// let registry = LanguageRegistry::builtin();
/// let english = registry.get("eng").unwrap();
/// let (rest, found) = extract_instructions("raw almonds chopped", &english);
/// assert_eq!(rest, "almonds");
/// assert_eq!(found, vec!["raw", "chopped"]);
/// ```
pub fn extract_instructions(text: &str, profile: &LanguageProfile) -> (String, Vec<String>) {
    let Some(regex) = &profile.patterns().instruction else {
        return (text.trim().to_string(), Vec::new());
    };
    let (rest, found) = take_all(text, regex);
    if !found.is_empty() {
        trace!("Instructions {:?} taken from '{}'", found, text);
    }
    (rest, found)
}

/// Run instruction extraction over annotation parts, dropping parts left empty
pub fn extract_from_parts(parts: Vec<String>, profile: &LanguageProfile) -> (Vec<String>, Vec<String>) {
    let mut kept = Vec::with_capacity(parts.len());
    let mut found = Vec::new();
    for part in parts {
        let (rest, mut taken) = extract_instructions(&part, profile);
        found.append(&mut taken);
        if rest.chars().any(char::is_alphanumeric) {
            kept.push(rest);
        }
    }
    (kept, found)
}

/// Sweep standalone adverbs left behind once instructions are gone ("almonds coarsely")
pub fn sweep_adverbs(text: &str, profile: &LanguageProfile) -> (String, Vec<String>) {
    match &profile.patterns().adverb {
        Some(regex) => take_all(text, regex),
        None => (text.trim().to_string(), Vec::new()),
    }
}

/// Split slash-glued instruction pairs ("peeled/diced") into separate words
pub fn split_glued_instructions(text: &str, profile: &LanguageProfile) -> String {
    let Some(leading) = &profile.patterns().instruction_leading else {
        return text.to_string();
    };
    let is_instruction = |word: &str| leading.find(word).is_some_and(|m| m.end() == word.len());

    text.split_whitespace()
        .map(|token| {
            let pieces: Vec<&str> = token.split('/').filter(|p| !p.is_empty()).collect();
            if token.contains('/') && pieces.len() > 1 && pieces.iter().all(|p| is_instruction(p)) {
                pieces.join(" ")
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
