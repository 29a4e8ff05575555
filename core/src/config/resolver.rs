//! Argument resolution for the front end.
//!
//! The resolver walks the raw argument vector once, left to right,
//! matching each token exactly against the flag table. Flags that take a
//! value consume the next token greedily, whatever it looks like. The
//! resolver never prints and never exits; anything fatal comes back as a
//! [`ParseError`] so the front end keeps ownership of usage output and
//! exit codes.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ParseError;
use crate::prompt::{append_prompt_file, append_text, replace_all};

use super::params::{default_thread_count, Keep, RunConfig, MAX_BATCH_SIZE};

/// Placeholder the companion script uses for the user's name.
const USER_NAME_PLACEHOLDER: &str = "USER_NAME";

/// Environment variable consulted for the user's name.
const USER_NAME_VAR: &str = "USER";

/// Name substituted when the environment does not provide one.
const DEFAULT_USER_NAME: &str = "Guest";

/// The bundled companion persona, used when no prompt is supplied.
const COMPANION_SCRIPT: &str = include_str!("../../assets/companion.txt");

/// Resolves an argument vector into a [`RunConfig`].
///
/// The two host inputs that tests need to pin down are injectable: the
/// detected CPU count and the companion script text.
#[derive(Debug, Clone)]
pub struct Resolver {
    cpu_count: usize,
    companion_script: String,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            cpu_count: num_cpus::get(),
            companion_script: COMPANION_SCRIPT.to_string(),
        }
    }

    /// Override the detected CPU count.
    pub fn with_cpu_count(mut self, cpu_count: usize) -> Self {
        self.cpu_count = cpu_count;
        self
    }

    /// Override the bundled companion script.
    pub fn with_companion_script(mut self, script: impl Into<String>) -> Self {
        self.companion_script = script.into();
        self
    }

    /// Resolve `args`, everything after the program name, into a config.
    ///
    /// Later occurrences of a flag overwrite earlier ones, except for
    /// `-r` which accumulates and `-f` which appends. When no prompt
    /// text remains at the end, the companion fallback fills one in.
    pub fn parse<I, S>(&self, args: I) -> Result<RunConfig, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = RunConfig {
            n_threads: default_thread_count(self.cpu_count),
            ..RunConfig::default()
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-s" | "--seed" => config.seed = next_i32(arg, &mut args)?,
                "-v" | "--verbose" => config.verbose += 1,
                "-t" | "--threads" => config.n_threads = next_i32(arg, &mut args)?,
                "-p" | "--prompt" => config.prompt = next_value(arg, &mut args)?,
                "-C" | "--prompt_cache" => {
                    config.prompt_cache = Some(PathBuf::from(next_value(arg, &mut args)?));
                }
                "-f" | "--file" => {
                    let path = next_value(arg, &mut args)?;
                    append_prompt_file(&mut config.prompt, Path::new(&path))
                        .map_err(|source| ParseError::PromptFile { path, source })?;
                }
                "-n" | "--n_predict" => config.n_predict = next_i32(arg, &mut args)?,
                "--top_k" => config.top_k = next_i32(arg, &mut args)?,
                "-c" | "--ctx_size" => config.n_ctx = next_i32(arg, &mut args)?,
                "--memory_f32" => config.memory_f16 = false,
                "--top_p" => config.top_p = next_f32(arg, &mut args)?,
                "--temp" => config.temp = next_f32(arg, &mut args)?,
                "--repeat_last_n" => config.repeat_last_n = next_i32(arg, &mut args)?,
                "--repeat_penalty" => config.repeat_penalty = next_f32(arg, &mut args)?,
                "-b" | "--batch_size" => {
                    // Oversized batches are clamped, undersized ones kept.
                    config.n_batch = next_i32(arg, &mut args)?.min(MAX_BATCH_SIZE);
                }
                "--keep" => config.keep = Keep::from_arg(&next_value(arg, &mut args)?),
                "-m" | "--model" => config.model = PathBuf::from(next_value(arg, &mut args)?),
                "--lora" => {
                    config.lora_adapter = Some(PathBuf::from(next_value(arg, &mut args)?));
                    // Adapter patching rewrites tensors in place; a
                    // mapped file cannot take those writes.
                    config.use_mmap = false;
                }
                "--lora-base" => {
                    config.lora_base = Some(PathBuf::from(next_value(arg, &mut args)?));
                }
                "-i" | "--interactive" => config.interactive = true,
                "--embedding" => config.embedding = true,
                "--interactive-first" => config.interactive_first = true,
                "-ins" | "--instruct" => config.instruct = true,
                "--color" => config.use_color = true,
                "--mlock" => config.use_mlock = true,
                "--no-mmap" => config.use_mmap = false,
                "--mtest" => config.mem_test = true,
                "--verbose-prompt" => config.verbose_prompt = true,
                "-r" | "--reverse-prompt" => {
                    config.antiprompts.push(next_value(arg, &mut args)?);
                }
                "--perplexity" => config.perplexity = true,
                "--ignore-eos" => config.ignore_eos = true,
                "--n_parts" => config.n_parts = next_i32(arg, &mut args)?,
                "-h" | "--help" => return Err(ParseError::Help),
                "--random-prompt" => config.random_prompt = true,
                "--in-prefix" => config.input_prefix = next_value(arg, &mut args)?,
                unknown => return Err(ParseError::UnknownArgument(unknown.to_string())),
            }
        }

        if config.prompt.is_empty() {
            self.apply_companion_fallback(&mut config);
        }

        Ok(config)
    }

    /// Zero-config mode: no prompt text was supplied, so load the
    /// companion persona and retune sampling for conversation.
    fn apply_companion_fallback(&self, config: &mut RunConfig) {
        debug!("no prompt supplied, loading the companion persona");
        append_text(&mut config.prompt, &self.companion_script);

        let user = env::var(USER_NAME_VAR)
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        config.prompt = replace_all(&config.prompt, USER_NAME_PLACEHOLDER, &user);
        config.antiprompts.push(format!("{user}:"));

        config.repeat_penalty = 1.17647;
        config.repeat_last_n = 256;
        config.interactive = true;
        config.ignore_eos = true;
        config.n_predict = -1;
        config.n_ctx = 2048;
        config.keep = Keep::Boundary("\n\n\n".to_string());
        config.top_k = 40;
        config.top_p = 0.5;
        config.temp = 0.4;
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

fn next_value<I, S>(flag: &str, args: &mut I) -> Result<String, ParseError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    match args.next() {
        Some(value) => Ok(value.as_ref().to_string()),
        None => Err(ParseError::InvalidParameter(flag.to_string())),
    }
}

fn next_i32<I, S>(flag: &str, args: &mut I) -> Result<i32, ParseError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    next_value(flag, args)?
        .parse()
        .map_err(|_| ParseError::InvalidParameter(flag.to_string()))
}

fn next_f32<I, S>(flag: &str, args: &mut I) -> Result<f32, ParseError>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    next_value(flag, args)?
        .parse()
        .map_err(|_| ParseError::InvalidParameter(flag.to_string()))
}
