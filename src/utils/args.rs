//! Argument normalization utilities.

use crate::error::{Error, Result};

/// Split a pipeline stage string into program name and arguments.
///
/// Splits on whitespace only; quotes are not interpreted, so each word
/// reaches the spawned program as a separate argument. Callers that need
/// multi-word arguments should use the library API and pass them directly.
pub fn split_command(stage: &str) -> Result<Vec<String>> {
    let words: Vec<String> = stage.split_whitespace().map(String::from).collect();
    if words.is_empty() {
        return Err(Error::validation_invalid_argument(
            "command",
            "Command string is empty",
        ));
    }
    Ok(words)
}
