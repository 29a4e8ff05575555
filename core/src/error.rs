//! Error types for argument resolution

use std::io;

use thiserror::Error;

/// Fatal signal produced while resolving the argument vector.
///
/// The resolver never prints and never terminates the process. Each
/// variant carries what the front end needs to report the problem and
/// pick an exit code.
#[derive(Error, Debug)]
pub enum ParseError {
    /// `-h` or `--help` was seen. Not a failure: the caller prints the
    /// usage table and exits cleanly.
    #[error("help requested")]
    Help,

    /// An argument matched no entry in the flag table.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// A flag required a value that was missing or not convertible.
    #[error("invalid parameter for argument: {0}")]
    InvalidParameter(String),

    /// A `--file` argument named a prompt file that could not be read.
    #[error("failed to open prompt file '{path}': {source}")]
    PromptFile { path: String, source: io::Error },
}

impl ParseError {
    /// Process exit code the front end uses for this signal.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseError::Help => 0,
            _ => 1,
        }
    }
}
