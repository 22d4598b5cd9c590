//! CLI commands for the mergetrace tool.

pub mod encode;
pub mod models;
pub mod train;

pub use encode::EncodeCommand;
pub use models::ModelsCommand;
pub use train::TrainCommand;

use anyhow::{bail, Context, Result as AnyhowResult};
use std::fs;
use std::io::Read;

/// Read input text from `--text`, a file path, or stdin when the path is "-".
pub(crate) fn read_input(text: Option<String>, input: Option<String>) -> AnyhowResult<String> {
    match (text, input) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) if path == "-" => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))
        }
        (Some(_), Some(_)) => bail!("pass either --text or --input, not both"),
        (None, None) => bail!("no input: pass --text, or --input with a file path or -"),
    }
}
