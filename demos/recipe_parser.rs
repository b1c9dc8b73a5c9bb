//! # Recipe Parser Example
//!
//! Parses a small English recipe and a German one, shows alternatives and
//! unit systems, and merges a shopping list with `combine`.

use recipe_ingredient_parser::{
    combine, multi_line_parse, parse, parse_with_options, pretty_printing_press, ParseOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🍳 Recipe Ingredient Parser Example");
    println!("===================================\n");

    // Example 1: Line-by-line parsing
    println!("📖 Example 1: Basic Recipe Parsing");
    println!("-----------------------------------");

    let cookies = [
        "2 1/4 cups all-purpose flour",
        "1 teaspoon baking soda",
        "1 cup unsalted butter, softened",
        "3/4 cup granulated sugar",
        "2 large eggs",
        "about 2 cups chocolate chips",
        "salt, to taste",
    ];
    for (i, line) in cookies.iter().enumerate() {
        let parsed = parse(line, "eng");
        println!(
            "  {}. {:<34} → {} {} \"{}\"{}",
            i + 1,
            line,
            parsed.quantity,
            parsed.unit.as_deref().unwrap_or("-"),
            parsed.ingredient,
            if parsed.instructions.is_empty() {
                String::new()
            } else {
                format!(" [{}]", parsed.instructions.join(", "))
            }
        );
    }

    println!("\n");

    // Example 2: German recipe with comma decimals
    println!("🇩🇪 Example 2: German Recipe");
    println!("---------------------------");

    for line in ["1,5 kg Mehl", "250 g Butter", "3 EL Zucker"] {
        let parsed = parse(line, "deu");
        println!(
            "  {:<14} → {} {} \"{}\"",
            line,
            parsed.quantity,
            parsed.unit.as_deref().unwrap_or("-"),
            parsed.ingredient
        );
    }

    println!("\n");

    // Example 3: Alternatives and unit systems as JSON
    println!("🔀 Example 3: Alternatives");
    println!("--------------------------");

    let options = ParseOptions::new().with_alternatives(true).with_unit_systems(true);
    let parsed = parse_with_options("2 x 150g/5½oz salmon fillets, skinned and thinly sliced", "eng", &options);
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    println!("\n");

    // Example 4: Shopping list
    println!("🛒 Example 4: Combined Shopping List");
    println!("------------------------------------");

    let mut list = multi_line_parse("1 cup flour\n2 tsp salt\n1/2 cup flour\n1 egg", "eng");
    list.push(parse("2 eggs", "eng"));
    for ingredient in combine(&list) {
        println!("  • {}", pretty_printing_press(&ingredient, "eng"));
    }

    Ok(())
}
