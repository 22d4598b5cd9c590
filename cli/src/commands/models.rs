//! Models command implementation.

use clap::Parser;

/// Models command arguments.
#[derive(Parser)]
pub struct ModelsCommand {}

use anyhow::Result as AnyhowResult;
use mergetrace_tokenizer::{ModelVariant, WordBoundaryStyle};

pub fn run(_cmd: ModelsCommand) -> AnyhowResult<()> {
    for (key, variant) in ModelVariant::catalog() {
        let boundary = match &variant.word_boundary {
            WordBoundaryStyle::SuffixMarker { marker } => format!("suffix {marker}"),
            WordBoundaryStyle::PrefixMarker { marker } => format!("prefix {marker}"),
            WordBoundaryStyle::None => "none".to_string(),
        };
        let specials: Vec<&str> = variant.special_tokens.iter().map(|s| s.as_str()).collect();
        println!(
            "{key:<14} {:<14} default vocab {:>6}  boundary: {:<10} specials: {}",
            variant.name,
            variant.vocab_size_default,
            boundary,
            specials.join(" ")
        );
    }
    Ok(())
}
