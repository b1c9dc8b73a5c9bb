//! # Language Profile Module
//!
//! Per-language vocabulary consumed by the parser: unit dictionaries, number
//! words, flag phrases, instruction vocabularies and stopwords. Profiles are
//! JSON documents deserialized with serde, validated once, and then shared
//! read-only behind `Arc` through a [`LanguageRegistry`].
//!
//! ## Usage
//!
//! ```rust
//! use recipe_ingredient_parser::language_profile::LanguageRegistry;
//!
//! let registry = LanguageRegistry::builtin();
//! let english = registry.get("en-US").expect("english is built in");
//! assert_eq!(english.code, "eng");
//! assert_eq!(english.unit("teaspoon").map(|u| u.symbol.as_str()), Some("tsp"));
//! ```

use crate::parser_errors::ParserError;
use crate::profile_patterns::ProfilePatterns;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock, OnceLock};
use unic_langid::LanguageIdentifier;

/// Profiles compiled into the crate
const BUILTIN_PROFILES: &[(&str, &str)] = &[
    ("eng", include_str!("../locales/eng.json")),
    ("deu", include_str!("../locales/deu.json")),
    ("fra", include_str!("../locales/fra.json")),
    ("esp", include_str!("../locales/esp.json")),
    ("por", include_str!("../locales/por.json")),
    ("ces", include_str!("../locales/ces.json")),
    ("hun", include_str!("../locales/hun.json")),
];

/// Registry holding the built-in profiles, created on first use
pub static DEFAULT_REGISTRY: LazyLock<Arc<LanguageRegistry>> =
    LazyLock::new(|| Arc::new(LanguageRegistry::builtin()));

/// A unit of measurement as described by a language profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDefinition {
    /// Canonical, language-neutral key (e.g., "tablespoon")
    pub key: String,
    /// Surface forms recognized in text
    pub names: Vec<String>,
    pub singular: String,
    pub plural: String,
    /// Display symbol, empty when the unit has none
    #[serde(default)]
    pub symbol: String,
    /// Measurement system (metric, imperial, americanVolumetric)
    #[serde(default)]
    pub system: Option<String>,
    /// Kind of quantity measured (volume, weight, count, length)
    #[serde(default)]
    pub unit_type: Option<String>,
}

impl UnitDefinition {
    pub fn is_measure(&self) -> bool {
        matches!(self.unit_type.as_deref(), Some("volume") | Some("weight"))
    }
}

/// Immutable per-language vocabulary
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    pub code: String,
    /// Whether the language writes decimals with a comma ("1,5")
    #[serde(default)]
    pub is_comma_delimited: bool,
    pub units: Vec<UnitDefinition>,
    #[serde(default)]
    pub prepositions: Vec<String>,
    /// Words joining the two ends of a range ("to", "or")
    #[serde(default)]
    pub joiners: Vec<String>,
    #[serde(default)]
    pub to_taste: Vec<String>,
    #[serde(default)]
    pub to_taste_additional: Vec<String>,
    #[serde(default)]
    pub additional_stopwords: Vec<String>,
    #[serde(default)]
    pub approx: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    #[serde(default)]
    pub to_serve: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub adverbs: Vec<String>,
    #[serde(default)]
    pub numbers_small: HashMap<String, i64>,
    #[serde(default)]
    pub numbers_magnitude: HashMap<String, i64>,
    /// Unit key to the context words required before the unit is accepted
    #[serde(default)]
    pub problematic_units: HashMap<String, Vec<String>>,
    /// Leading tokens read as a quantity of one ("a cup")
    #[serde(default)]
    pub indefinite_articles: Vec<String>,
    /// Words joining an ingredient with its substitute ("oats or quinoa")
    #[serde(default)]
    pub alternative_joiners: Vec<String>,
    /// Qualifiers stripped from the start of an ingredient name
    #[serde(default)]
    pub filler_words: Vec<String>,
    /// Phrases marking a fragment as an aside rather than an alternative
    #[serde(default)]
    pub alternative_exclusions: Vec<String>,
    /// Container unit key (can, bag, pack) to its surface words
    #[serde(default)]
    pub container_words: HashMap<String, Vec<String>>,
    #[serde(skip)]
    patterns: OnceLock<ProfilePatterns>,
}

impl LanguageProfile {
    /// Parse and validate a profile from its JSON document.
    ///
    /// Patterns are compiled on first use, so loading many profiles stays cheap.
    pub fn from_json(json: &str) -> Result<Self, ParserError> {
        let profile: LanguageProfile = serde_json::from_str(json)?;
        profile.validate()?;
        debug!(
            "Loaded language profile '{}' with {} units",
            profile.code,
            profile.units.len()
        );
        Ok(profile)
    }

    /// Load a profile from a JSON file on disk
    pub fn from_path(path: &Path) -> Result<Self, ParserError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), ParserError> {
        if self.code.trim().is_empty() {
            return Err(ParserError::InvalidProfile(
                "profile code must not be empty".to_string(),
            ));
        }
        if self.units.is_empty() {
            return Err(ParserError::InvalidProfile(format!(
                "profile '{}' defines no units",
                self.code
            )));
        }
        for unit in &self.units {
            if unit.key.is_empty() || unit.names.iter().any(|name| name.trim().is_empty()) {
                return Err(ParserError::InvalidProfile(format!(
                    "profile '{}' has a unit with an empty key or name",
                    self.code
                )));
            }
        }
        Ok(())
    }

    /// Compiled patterns, built on first use
    pub(crate) fn patterns(&self) -> &ProfilePatterns {
        self.patterns.get_or_init(|| {
            ProfilePatterns::compile(self).unwrap_or_else(|err| {
                warn!(
                    "Patterns for profile '{}' failed to compile, matching disabled: {}",
                    self.code, err
                );
                ProfilePatterns::inert(self)
            })
        })
    }

    pub fn unit(&self, key: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|unit| unit.key == key)
    }

    pub fn decimal_delimiter(&self) -> char {
        if self.is_comma_delimited {
            ','
        } else {
            '.'
        }
    }

    /// Surface words for a container unit, falling back to the unit's own names
    pub fn container_words_for(&self, key: &str) -> Vec<String> {
        if let Some(words) = self.container_words.get(key) {
            return words.clone();
        }
        self.unit(key)
            .map(|unit| {
                let mut words = unit.names.clone();
                words.push(unit.plural.clone());
                words
            })
            .unwrap_or_default()
    }

    pub fn small_number(&self, word: &str) -> Option<i64> {
        self.numbers_small.get(&word.to_lowercase()).copied()
    }

    pub fn magnitude(&self, word: &str) -> Option<i64> {
        self.numbers_magnitude.get(&word.to_lowercase()).copied()
    }
}

/// Registry of language profiles keyed by their code
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    profiles: HashMap<String, Arc<LanguageProfile>>,
}

impl LanguageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every profile shipped with the crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (code, json) in BUILTIN_PROFILES {
            match LanguageProfile::from_json(json) {
                Ok(profile) => {
                    registry.register(profile);
                }
                Err(err) => warn!("Skipping built-in profile '{}': {}", code, err),
            }
        }
        tracing::debug!(count = registry.profiles.len(), "built-in language profiles ready");
        registry
    }

    /// Add or replace a profile, returning the shared handle
    pub fn register(&mut self, profile: LanguageProfile) -> Arc<LanguageProfile> {
        let code = profile.code.to_lowercase();
        let shared = Arc::new(profile);
        if self.profiles.insert(code.clone(), Arc::clone(&shared)).is_some() {
            debug!("Replaced language profile '{}'", code);
        }
        shared
    }

    /// Load every `*.json` profile in a directory, returning how many were registered
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, ParserError> {
        let mut loaded = 0;
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let profile = LanguageProfile::from_path(&path).map_err(|err| {
                ParserError::InvalidProfile(format!("{}: {}", path.display(), err))
            })?;
            tracing::info!(code = %profile.code, path = %path.display(), "registered language profile");
            self.register(profile);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Look up a profile by code or language tag ("eng", "en", "en-US")
    pub fn get(&self, code: &str) -> Option<Arc<LanguageProfile>> {
        let resolved = self.resolve_code(code)?;
        self.profiles.get(&resolved).cloned()
    }

    /// Like [`get`](Self::get) but reports unknown codes as an error
    pub fn require(&self, code: &str) -> Result<Arc<LanguageProfile>, ParserError> {
        self.get(code)
            .ok_or_else(|| ParserError::UnknownLanguage(code.to_string()))
    }

    /// Registered codes in sorted order
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.profiles.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Map a code or language tag onto a registered profile code
    pub fn resolve_code(&self, code: &str) -> Option<String> {
        let lowered = code.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if self.profiles.contains_key(&lowered) {
            return Some(lowered);
        }
        let canonical = canonical_code(&lowered)?;
        self.profiles.contains_key(&canonical).then_some(canonical)
    }
}

/// Normalize a BCP 47 tag or ISO 639 code to the three-letter codes used by profiles
fn canonical_code(code: &str) -> Option<String> {
    let langid: LanguageIdentifier = code.replace('_', "-").parse().ok()?;
    let language = langid.language.as_str().to_string();
    let mapped = match language.as_str() {
        "en" => "eng",
        "de" | "ger" => "deu",
        "fr" | "fre" => "fra",
        "es" | "spa" => "esp",
        "pt" => "por",
        "cs" | "cze" => "ces",
        "hu" => "hun",
        "it" => "ita",
        "ru" => "rus",
        "hi" => "hin",
        "id" => "ind",
        "ar" => "ara",
        other => other,
    };
    Some(mapped.to_string())
}
