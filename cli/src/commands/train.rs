//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Text to train on
    #[arg(short, long)]
    pub text: Option<String>,

    /// File to train on ("-" for stdin)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Model variant (gpt2, bert, sentencepiece)
    #[arg(short, long, default_value = "gpt2")]
    pub model: String,

    /// Target vocabulary size (defaults to the model's)
    #[arg(long)]
    pub vocab_size: Option<usize>,

    /// Maximum number of merges
    #[arg(long, default_value_t = MAX_MERGES)]
    pub max_merges: usize,

    /// Print the whole trajectory as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

use super::read_input;
use anyhow::Result as AnyhowResult;
use mergetrace_tokenizer::{ModelVariant, Tokenizer, Trajectory, MAX_MERGES};

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let text = read_input(cmd.text, cmd.input)?;
    let model = ModelVariant::by_name(&cmd.model)?;

    let mut builder = Tokenizer::builder().model(model).max_merges(cmd.max_merges);
    if let Some(size) = cmd.vocab_size {
        builder = builder.vocab_size(size);
    }
    let tokenizer = builder.build()?;

    let trajectory = tokenizer.compute(&text)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&trajectory)?);
    } else {
        print_trajectory(&tokenizer, &trajectory);
    }

    Ok(())
}

fn print_trajectory(tokenizer: &Tokenizer, trajectory: &Trajectory) {
    println!(
        "Model: {}  target vocabulary: {}",
        tokenizer.model().name,
        tokenizer.vocab_size()
    );
    println!();
    println!("{:>5}  {:<24} {:>5} {:>8} {:>6}", "step", "merge", "freq", "symbols", "vocab");

    for step in trajectory {
        let merge = match (&step.chosen_pair, step.merged_symbol()) {
            (Some((left, right)), Some(result)) => format!("{left} + {right} -> {result}"),
            _ => "(initial)".to_string(),
        };
        println!(
            "{:>5}  {:<24} {:>5} {:>8} {:>6}",
            step.iteration,
            merge,
            step.frequency,
            step.sequence.len(),
            step.vocabulary.len()
        );
    }

    let stats = trajectory.stats();
    println!();
    println!("Stopped: {:?}", trajectory.stop_reason());
    println!("  Merges: {}", stats.total_merges);
    println!(
        "  Sequence: {} -> {} symbols",
        stats.initial_sequence_length, stats.final_sequence_length
    );
    println!("  Compression ratio: {:.3}", stats.compression_ratio);
    println!("  Average symbol length: {:.3}", stats.average_symbol_length);
    println!("  Vocabulary efficiency: {:.3}", stats.vocabulary_efficiency);
}
