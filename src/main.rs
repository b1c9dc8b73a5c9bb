//! Command-line wrapper around the ingredient parser.
//!
//! Reads ingredient lines from the arguments, or from stdin when none are
//! given, and prints the parsed records as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use recipe_ingredient_parser::{IngredientParser, LanguageRegistry, ParsedIngredient, ParserConfig};
use std::io::{self, BufRead};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "recipe-ingredient-parser",
    version,
    about = "Parse recipe ingredient lines into structured JSON"
)]
struct Cli {
    /// Ingredient lines; read from stdin when omitted
    lines: Vec<String>,

    /// Language code or tag (eng, deu, en-US, ...)
    #[arg(long)]
    lang: Option<String>,

    /// Detect alternatives ("8 oz / 225g", "or 1/2 cup kefir whey")
    #[arg(long)]
    alternatives: bool,

    /// Attach the measurement system of each unit
    #[arg(long = "unit-systems")]
    unit_systems: bool,

    /// Print readable lines instead of JSON
    #[arg(long)]
    pretty: bool,

    /// Merge duplicate ingredients before printing
    #[arg(long)]
    combine: bool,
}

fn init_logging(json_logs: bool) {
    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    } else {
        env_logger::init();
    }
}

fn read_stdin_lines() -> Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read ingredient lines from stdin")
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ParserConfig::from_env();
    init_logging(config.json_logs);

    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    config.options = config
        .options
        .with_alternatives(config.options.include_alternatives || cli.alternatives)
        .with_unit_systems(config.options.include_unit_systems || cli.unit_systems);
    config.validate().context("invalid parser configuration")?;

    let mut registry = LanguageRegistry::builtin();
    if let Some(dir) = &config.locales_dir {
        let loaded = registry
            .load_dir(dir)
            .with_context(|| format!("failed to load language profiles from {}", dir.display()))?;
        info!("Loaded {} language profiles from {}", loaded, dir.display());
    }
    registry
        .require(&config.language)
        .context("cannot parse ingredient lines")?;

    let parser = IngredientParser::new(Arc::new(registry));
    let lines = if cli.lines.is_empty() {
        read_stdin_lines()?
    } else {
        cli.lines
    };

    let mut parsed: Vec<ParsedIngredient> = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parser.parse_with_options(line, &config.language, &config.options))
        .collect();
    info!("Parsed {} ingredient lines", parsed.len());

    if cli.combine {
        parsed = parser.combine(&parsed);
    }

    if cli.pretty {
        for ingredient in &parsed {
            println!("{}", parser.pretty_printing_press(ingredient, &config.language));
        }
    } else {
        let json = serde_json::to_string_pretty(&parsed).context("failed to serialize parsed ingredients")?;
        println!("{json}");
    }
    Ok(())
}
