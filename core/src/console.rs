//! Console color state machine for the interactive loop.
//!
//! Generation output, echoed prompt text, and user input each get their
//! own color so a transcript stays readable. The console tracks what is
//! currently active and only writes an escape sequence on a real change,
//! which keeps raw ANSI noise out of piped output when colors are off
//! and out of unchanged stretches when they are on.

use std::io::{self, Stdout, Write};

/// Escape sequence restoring the terminal's default style.
pub const ANSI_RESET: &str = "\x1b[0m";
/// Escape sequence for echoed prompt text.
pub const ANSI_YELLOW: &str = "\x1b[33m";
/// Escape sequence for user input, bold green.
pub const ANSI_BOLD_GREEN: &str = "\x1b[1m\x1b[32m";

/// What the console is currently styled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleColor {
    /// The terminal's own style; used for generated text.
    #[default]
    Default,
    /// Prompt text being echoed back.
    Prompt,
    /// Text typed by the user.
    UserInput,
}

impl ConsoleColor {
    fn escape(self) -> &'static str {
        match self {
            ConsoleColor::Default => ANSI_RESET,
            ConsoleColor::Prompt => ANSI_YELLOW,
            ConsoleColor::UserInput => ANSI_BOLD_GREEN,
        }
    }
}

/// Writes color transitions to a sink, deduplicating repeats.
///
/// Every call flushes the sink, even when nothing was written, so color
/// changes stay byte-ordered with generation text the caller prints
/// around them.
#[derive(Debug)]
pub struct Console<W: Write = Stdout> {
    out: W,
    use_color: bool,
    current: ConsoleColor,
}

impl Console<Stdout> {
    /// Console over the process's stdout.
    pub fn stdout(use_color: bool) -> Self {
        Self::new(io::stdout(), use_color)
    }
}

impl<W: Write> Console<W> {
    /// Console over an arbitrary sink. Starts in [`ConsoleColor::Default`].
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            current: ConsoleColor::Default,
        }
    }

    /// Switch the console to `color`.
    ///
    /// Writes nothing when colors are disabled or `color` is already
    /// active. Flushes the sink either way.
    pub fn set_color(&mut self, color: ConsoleColor) -> io::Result<()> {
        if self.use_color && self.current != color {
            self.out.write_all(color.escape().as_bytes())?;
            self.current = color;
        }
        self.out.flush()
    }

    /// The color the console last switched to.
    pub fn current(&self) -> ConsoleColor {
        self.current
    }
}
