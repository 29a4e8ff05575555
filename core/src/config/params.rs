//! The resolved run configuration and its defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Hard ceiling applied to `--batch_size` values.
///
/// Larger batches only waste scratch memory, so oversized requests are
/// clamped instead of rejected. Undersized requests pass through as-is.
pub const MAX_BATCH_SIZE: i32 = 512;

/// Default worker-thread count for a machine with `cpu_count` logical
/// CPUs: three quarters of the machine, never outside `[1, 20]`.
///
/// The clamp applies to the derived default only. An explicit
/// `--threads` value is taken verbatim.
pub fn default_thread_count(cpu_count: usize) -> i32 {
    ((cpu_count as f64 * 0.75).round() as i32).clamp(1, 20)
}

/// How much of the initial prompt survives context truncation.
///
/// A `--keep` argument that reads fully as an optional-sign integer is a
/// token count. Anything else is a boundary marker: a substring that
/// divides the real prompt from the example preamble above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keep {
    /// Keep this many tokens from the start of the prompt. Zero keeps
    /// nothing, -1 keeps everything.
    Count(i32),
    /// Keep everything up to and including this substring.
    Boundary(String),
}

impl Keep {
    /// Classify a raw `--keep` argument.
    pub fn from_arg(value: &str) -> Self {
        if is_integer(value) {
            if let Ok(count) = value.parse::<i32>() {
                return Keep::Count(count);
            }
        }
        Keep::Boundary(value.to_string())
    }

    /// The token count, or 0 when a boundary marker is set.
    pub fn count(&self) -> i32 {
        match self {
            Keep::Count(count) => *count,
            Keep::Boundary(_) => 0,
        }
    }

    /// The boundary marker, if one is set and non-empty.
    pub fn boundary(&self) -> Option<&str> {
        match self {
            Keep::Boundary(marker) if !marker.is_empty() => Some(marker),
            _ => None,
        }
    }
}

impl Default for Keep {
    fn default() -> Self {
        Keep::Count(0)
    }
}

/// An optional leading `-` followed by one or more ASCII digits and
/// nothing else.
fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Everything the front end needs to know to run one generation session.
///
/// Produced by [`Resolver::parse`](super::Resolver::parse); the engine
/// and the interactive loop only ever read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// RNG seed. Values of zero or below ask the front end to derive one
    /// from the clock at startup.
    pub seed: i32,
    /// Worker threads for generation.
    pub n_threads: i32,
    /// New tokens to predict. -1 generates until stopped.
    pub n_predict: i32,
    /// Size of the prompt context window, in tokens.
    pub n_ctx: i32,
    /// Batch size for prompt ingestion, never above [`MAX_BATCH_SIZE`].
    pub n_batch: i32,
    /// Model part count. -1 determines it from the tensor dimensions.
    pub n_parts: i32,

    /// Sample from the `top_k` most likely tokens.
    pub top_k: i32,
    /// Sample from the smallest set whose probability exceeds `top_p`.
    pub top_p: f32,
    /// Sampling temperature.
    pub temp: f32,
    /// Penalty applied to recently generated tokens.
    pub repeat_penalty: f32,
    /// Window of recent tokens the repeat penalty looks at.
    pub repeat_last_n: i32,

    /// Text the generation starts from.
    pub prompt: String,
    /// Where the engine may persist evaluated-prompt state for fast
    /// reload, when set.
    pub prompt_cache: Option<PathBuf>,
    /// String prefixed to each line of interactive user input.
    pub input_prefix: String,
    /// How much of the initial prompt to pin when the context overflows.
    pub keep: Keep,
    /// Strings that hand control back to the user once generated.
    pub antiprompts: Vec<String>,

    /// Path to the model weights.
    pub model: PathBuf,
    /// LoRA adapter applied on top of the model, when set.
    pub lora_adapter: Option<PathBuf>,
    /// Base model for the layers the adapter modifies, when set.
    pub lora_base: Option<PathBuf>,

    /// Keep the key/value memory in f16 instead of f32.
    pub memory_f16: bool,
    /// Memory-map the model file instead of reading it in.
    pub use_mmap: bool,
    /// Lock the model pages in RAM.
    pub use_mlock: bool,

    /// Run interactively, polling the user at antiprompts.
    pub interactive: bool,
    /// Run interactively and wait for input before generating anything.
    pub interactive_first: bool,
    /// Instruction-following mode.
    pub instruct: bool,
    /// Colorize prompt, input, and generation on the console.
    pub use_color: bool,
    /// Diagnostic verbosity, one step per `-v`.
    pub verbose: u32,
    /// Echo the prompt before generation starts.
    pub verbose_prompt: bool,

    /// Keep generating through end-of-stream tokens.
    pub ignore_eos: bool,
    /// Compute perplexity over the prompt instead of generating.
    pub perplexity: bool,
    /// Measure peak memory use, then exit.
    pub mem_test: bool,
    /// Start from a randomized one-word prompt.
    pub random_prompt: bool,
    /// Produce embeddings instead of text.
    pub embedding: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: -1,
            n_threads: default_thread_count(num_cpus::get()),
            n_predict: 128,
            n_ctx: 512,
            n_batch: 512,
            n_parts: -1,
            top_k: 40,
            top_p: 0.95,
            temp: 0.80,
            repeat_penalty: 1.10,
            repeat_last_n: 64,
            prompt: String::new(),
            prompt_cache: None,
            input_prefix: String::new(),
            keep: Keep::default(),
            antiprompts: Vec::new(),
            model: PathBuf::from("models/7B/ggml-model.bin"),
            lora_adapter: None,
            lora_base: None,
            memory_f16: true,
            use_mmap: true,
            use_mlock: false,
            interactive: false,
            interactive_first: false,
            instruct: false,
            use_color: false,
            verbose: 0,
            verbose_prompt: false,
            ignore_eos: false,
            perplexity: false,
            mem_test: false,
            random_prompt: false,
            embedding: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_default_is_three_quarters_of_the_machine() {
        assert_eq!(default_thread_count(8), 6);
        assert_eq!(default_thread_count(4), 3);
        assert_eq!(default_thread_count(16), 12);
    }

    #[test]
    fn thread_default_never_leaves_its_bounds() {
        assert_eq!(default_thread_count(1), 1);
        assert_eq!(default_thread_count(64), 20);
        assert_eq!(default_thread_count(27), 20);
    }

    #[test]
    fn keep_classifies_integers_as_counts() {
        assert_eq!(Keep::from_arg("0"), Keep::Count(0));
        assert_eq!(Keep::from_arg("48"), Keep::Count(48));
        assert_eq!(Keep::from_arg("-1"), Keep::Count(-1));
    }

    #[test]
    fn keep_classifies_text_as_boundary() {
        assert_eq!(
            Keep::from_arg("\n\n\n"),
            Keep::Boundary("\n\n\n".to_string())
        );
        assert_eq!(Keep::from_arg("5x"), Keep::Boundary("5x".to_string()));
        assert_eq!(Keep::from_arg("-"), Keep::Boundary("-".to_string()));
        // No '+' sign support; that spelling is a marker, not a count.
        assert_eq!(Keep::from_arg("+5"), Keep::Boundary("+5".to_string()));
    }

    #[test]
    fn keep_overflow_falls_back_to_boundary() {
        let huge = "99999999999999999999";
        assert_eq!(Keep::from_arg(huge), Keep::Boundary(huge.to_string()));
    }

    #[test]
    fn keep_count_zero_reports_no_boundary() {
        let keep = Keep::from_arg("0");
        assert_eq!(keep.count(), 0);
        assert_eq!(keep.boundary(), None);
    }

    #[test]
    fn keep_boundary_reports_zero_count() {
        let keep = Keep::from_arg("hello");
        assert_eq!(keep.count(), 0);
        assert_eq!(keep.boundary(), Some("hello"));
    }

    #[test]
    fn keep_empty_boundary_is_not_reported() {
        let keep = Keep::from_arg("");
        assert_eq!(keep, Keep::Boundary(String::new()));
        assert_eq!(keep.boundary(), None);
    }
}
