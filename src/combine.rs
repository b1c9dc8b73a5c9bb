//! Merging of duplicate ingredients across a list.

use crate::fractions::round_three;
use crate::ingredient_model::ParsedIngredient;
use log::debug;
use std::collections::HashMap;

/// Merge entries sharing an ingredient name and unit, summing their amounts.
///
/// The first entry of a group keeps its other fields. Entries with different
/// units are never merged. The result is sorted by ingredient name, keeping
/// the first-seen order between equal names.
///
/// ```rust
/// use recipe_ingredient_parser::{combine, parse};
///
/// let merged = combine(&[
///     parse("1 cup flour", "eng"),
///     parse("2 cups flour", "eng"),
///     parse("1 tsp salt", "eng"),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].ingredient, "flour");
/// assert_eq!(merged[0].quantity, 3.0);
/// ```
pub fn combine(ingredients: &[ParsedIngredient]) -> Vec<ParsedIngredient> {
    let mut merged: Vec<ParsedIngredient> = Vec::with_capacity(ingredients.len());
    let mut positions: HashMap<(&str, Option<&str>), usize> = HashMap::new();

    for ingredient in ingredients {
        let key = (ingredient.ingredient.as_str(), ingredient.unit.as_deref());
        match positions.get(&key) {
            Some(&position) => {
                let existing = &mut merged[position];
                existing.quantity = round_three(existing.quantity + ingredient.quantity);
                existing.min_qty = round_three(existing.min_qty + ingredient.min_qty);
                existing.max_qty = round_three(existing.max_qty + ingredient.max_qty);
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(ingredient.clone());
            }
        }
    }

    debug!("Combined {} ingredients into {}", ingredients.len(), merged.len());
    merged.sort_by(|a, b| a.ingredient.cmp(&b.ingredient));
    merged
}
