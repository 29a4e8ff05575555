//! Prompt assembly: file loading, placeholder substitution, random
//! starters.

use std::fs;
use std::io;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Sentence starters drawn from by `--random-prompt`.
const RANDOM_STARTERS: [&str; 10] = [
    "So",
    "Once upon a time",
    "When",
    "The",
    "After",
    "If",
    "import",
    "He",
    "She",
    "They",
];

/// Append the contents of `path` to the prompt buffer.
///
/// The file must be UTF-8. One trailing line feed is trimmed afterwards,
/// so prompts written in an editor do not end mid-turn.
pub fn append_prompt_file(prompt: &mut String, path: &Path) -> io::Result<()> {
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded prompt file");
    append_text(prompt, &text);
    Ok(())
}

/// Append `text` to the prompt buffer, then trim one trailing line feed
/// from the combined buffer if present. Interior line feeds are kept.
pub fn append_text(prompt: &mut String, text: &str) {
    prompt.push_str(text);
    if prompt.ends_with('\n') {
        prompt.pop();
    }
}

/// Replace every occurrence of `needle` in `source` with `replacement`.
///
/// Matching is literal, leftmost, and non-overlapping; replacement text
/// is never rescanned. An empty needle is a no-op.
pub fn replace_all(source: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return source.to_string();
    }
    source.replace(needle, replacement)
}

/// Pick a starter for `--random-prompt` from the fixed set.
pub fn random_prompt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    RANDOM_STARTERS.choose(rng).copied().unwrap_or("The")
}
