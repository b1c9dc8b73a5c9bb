//! # Ingredient Data Model
//!
//! The record produced for one ingredient line, and the shape of the
//! alternatives found inside it.
//!
//! Both serialize in camelCase. Flags and the optional groups (multiplier,
//! unit system, alternatives, instructions) are omitted rather than written
//! as `false` or empty, so a plain line serializes to a small object:
//!
//! ```rust
//! use recipe_ingredient_parser::parse;
//!
//! let parsed = parse("2 cups flour", "eng");
//! let json = serde_json::to_value(&parsed).unwrap();
//! assert_eq!(json["unit"], "cup");
//! assert!(json.get("approx").is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

fn is_false(value: &bool) -> bool {
    !*value
}

/// A parsed ingredient line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredient {
    /// 0 when absent or unparseable
    pub quantity: f64,

    /// Canonical unit key ("cup", "gram")
    pub unit: Option<String>,

    /// Localized plural of the unit
    pub unit_plural: Option<String>,

    /// Localized symbol of the unit
    pub symbol: Option<String>,

    pub ingredient: String,

    pub min_qty: f64,
    pub max_qty: f64,

    /// Free-text annotations, joined with ", "
    pub additional: Option<String>,

    /// The trimmed input line
    pub original_string: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub approx: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub to_serve: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub to_taste: bool,

    /// Preparation words moved out of the name ("chopped", "thinly sliced")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,

    /// Count in front of a sized unit ("2 x 100 g" has a multiplier of 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_item_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_item_min_qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_item_max_qty: Option<f64>,

    /// metric, imperial or americanVolumetric, only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_system: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,
}

/// Another way of reading the same line ("8 oz / 225g pasta", "oats or quinoa")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    /// `None` for a pure ingredient swap
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub unit_plural: Option<String>,
    pub symbol: Option<String>,
    /// `None` when the fragment only gave an amount ("(3g)")
    pub ingredient: Option<String>,
    pub min_qty: Option<f64>,
    pub max_qty: Option<f64>,
    pub additional: Option<String>,
    pub original_string: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_system: Option<String>,
}

impl ParsedIngredient {
    /// The record returned for input that cannot be parsed at all
    pub fn empty(original: &str) -> Self {
        Self {
            original_string: original.to_string(),
            ..Self::default()
        }
    }

    pub fn has_unit(&self) -> bool {
        self.unit.is_some()
    }

    /// True when a unit, a quantity or a name was recognized
    pub fn is_meaningful(&self) -> bool {
        self.unit.is_some() || self.quantity > 0.0 || !self.ingredient.is_empty()
    }

    /// Clear the unit together with its plural and symbol
    pub fn clear_unit(&mut self) {
        self.unit = None;
        self.unit_plural = None;
        self.symbol = None;
        self.unit_system = None;
    }
}

impl Alternative {
    /// An alternative that only swaps the ingredient name
    pub fn swap(ingredient: &str, original: &str) -> Self {
        Self {
            ingredient: Some(ingredient.to_string()),
            original_string: original.to_string(),
            ..Self::default()
        }
    }

    /// True when the alternative carries no amount of its own
    pub fn lacks_amount(&self) -> bool {
        self.unit.is_none() && self.quantity.map_or(true, |q| q == 0.0)
    }
}

impl From<ParsedIngredient> for Alternative {
    fn from(parsed: ParsedIngredient) -> Self {
        Self {
            quantity: Some(parsed.quantity),
            unit: parsed.unit,
            unit_plural: parsed.unit_plural,
            symbol: parsed.symbol,
            ingredient: Some(parsed.ingredient).filter(|name| !name.is_empty()),
            min_qty: Some(parsed.min_qty),
            max_qty: Some(parsed.max_qty),
            additional: parsed.additional,
            original_string: parsed.original_string,
            instructions: parsed.instructions,
            unit_system: parsed.unit_system,
        }
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.quantity > 0.0 {
            if self.min_qty < self.max_qty {
                write!(f, "{}-{} ", self.min_qty, self.max_qty)?;
            } else {
                write!(f, "{} ", self.quantity)?;
            }
        }
        if let Some(unit) = &self.unit {
            write!(f, "{} ", unit)?;
        }
        write!(f, "{}", self.ingredient)?;
        if let Some(additional) = &self.additional {
            write!(f, " ({})", additional)?;
        }
        Ok(())
    }
}
