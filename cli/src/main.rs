//! # confab CLI
//!
//! Command-line front end for confab - an interactive text-generation
//! driver for local models.
//!
//! ## Usage
//!
//! - `confab -p "prompt" [options]` - resolve a run from an explicit prompt
//! - `confab` - zero-config companion persona
//! - `confab --help` - the full option table
//!
//! The binary owns every process-level side effect: usage output, exit
//! codes, logging setup, clock-derived seeds, and the resolved-run
//! report. Everything else lives in `confab-core`.

use std::env;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use confab_core::prompt::random_prompt;
use confab_core::{usage, Console, ConsoleColor, ParseError, Resolver, RunConfig};

fn main() -> Result<()> {
    let mut argv = env::args();
    let prog = argv.next().unwrap_or_else(|| "confab".to_string());
    let args: Vec<String> = argv.collect();

    let mut config = match Resolver::new().parse(&args) {
        Ok(config) => config,
        Err(err) => report_usage_and_exit(&prog, &err),
    };

    confab_core::init_tracing(config.verbose);
    debug!(version = confab_core::VERSION, "confab starting");

    if config.seed <= 0 {
        config.seed = unix_time_seed();
        debug!("no seed supplied, derived one from the clock");
    }
    info!(seed = config.seed, "run seed");

    if config.random_prompt {
        let mut rng = StdRng::seed_from_u64(config.seed as u64);
        config.prompt = random_prompt(&mut rng).to_string();
        info!(prompt = %config.prompt, "randomized starting prompt");
    }

    info!(
        threads = config.n_threads,
        n_ctx = config.n_ctx,
        n_batch = config.n_batch,
        n_predict = config.n_predict,
        n_keep = config.keep.count(),
        "generation window"
    );
    info!(
        temp = config.temp,
        top_k = config.top_k,
        top_p = config.top_p,
        repeat_last_n = config.repeat_last_n,
        repeat_penalty = config.repeat_penalty,
        "sampling"
    );
    info!(model = %config.model.display(), "model");
    if let Some(adapter) = &config.lora_adapter {
        info!(adapter = %adapter.display(), "lora adapter, memory mapping off");
    }
    for antiprompt in &config.antiprompts {
        debug!(antiprompt = %antiprompt, "reverse prompt registered");
    }

    let mut console = Console::stdout(config.use_color);
    if config.verbose_prompt {
        console.set_color(ConsoleColor::Prompt)?;
        println!("{}", config.prompt);
        console.set_color(ConsoleColor::Default)?;
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Print the error (unless help was asked for) and the usage table, then
/// exit with the signal's code.
fn report_usage_and_exit(prog: &str, err: &ParseError) -> ! {
    if !matches!(err, ParseError::Help) {
        eprintln!("error: {err}");
    }
    eprint!("{}", usage(prog, &RunConfig::default()));
    process::exit(err.exit_code());
}

/// Seconds since the epoch, folded into the engine's 32-bit seed space.
/// Never returns a value at or below zero, which would mean "derive one".
fn unix_time_seed() -> i32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    ((secs & 0x7fff_ffff) as i32).max(1)
}
