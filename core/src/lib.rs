//! # confab Core
//!
//! Core library for confab - an interactive text-generation front end
//! for local models.
//!
//! This library owns everything between the raw argument vector and the
//! inference engine: the flag table and its companion fallback policy
//! ([`config::Resolver`]), prompt assembly ([`prompt`]), the console
//! color state machine ([`console::Console`]), and the buffer-sizing
//! tokenize adapter over the engine boundary ([`engine::tokenize`]).
//! Generation itself stays behind [`engine::Tokenizer`].

// Core modules
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod prompt;

// Re-export commonly used types
pub use config::{usage, Keep, Resolver, RunConfig};
pub use console::{Console, ConsoleColor};
pub use engine::{tokenize, Token, Tokenizer};
pub use error::ParseError;

/// Current version of the confab-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the front end.
///
/// `RUST_LOG` wins when it is set; otherwise the `-v` count picks the
/// filter. Events go to stderr so stdout stays a clean product surface.
pub fn init_tracing(verbosity: u32) {
    let fallback = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
