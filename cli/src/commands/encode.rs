//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// File to learn merges from ("-" for stdin)
    #[arg(short, long)]
    pub corpus: String,

    /// Text to tokenize
    #[arg(short, long)]
    pub text: String,

    /// Model variant (gpt2, bert, sentencepiece)
    #[arg(short, long, default_value = "gpt2")]
    pub model: String,

    /// Target vocabulary size (defaults to the model's)
    #[arg(long)]
    pub vocab_size: Option<usize>,
}

use super::read_input;
use anyhow::Result as AnyhowResult;
use log::info;
use mergetrace_tokenizer::{ModelVariant, Tokenizer};

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let corpus = read_input(None, Some(cmd.corpus))?;
    let model = ModelVariant::by_name(&cmd.model)?;

    let mut builder = Tokenizer::builder().model(model);
    if let Some(size) = cmd.vocab_size {
        builder = builder.vocab_size(size);
    }
    let tokenizer = builder.build()?;

    let trajectory = tokenizer.compute(&corpus)?;
    info!("learned {} merges", trajectory.merges_performed());

    let encoding = tokenizer.encode_with(&trajectory, &cmd.text)?;
    println!("{}", encoding.get_tokens().join(" "));
    println!("{} symbols", encoding.len());

    Ok(())
}
