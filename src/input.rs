//! One-shot text-input prompt.
//!
//! Reads a single line in cooked (line-buffered) mode. A preceding
//! selection prompt may have left the terminal in raw mode, so cooked
//! mode is re-asserted before reading. Input is returned untouched
//! apart from the trailing newline.

use std::io::{self, IsTerminal, Write};

use crossterm::terminal::{disable_raw_mode, is_raw_mode_enabled};

use crate::error::Result;

/// Strip one trailing `\n` or `\r\n` from a read line.
fn trim_newline(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// Display `question` (if any) and read one line of input.
///
/// `on_after_enter` observes the raw line text before the prompt
/// returns. No validation or transformation is applied.
pub fn input(question: Option<&str>, on_after_enter: Option<&dyn Fn(&str)>) -> Result<String> {
    if io::stdin().is_terminal() && is_raw_mode_enabled()? {
        log::debug!("input: restoring cooked mode before line read");
        disable_raw_mode()?;
    }

    let mut out = io::stdout();
    if let Some(question) = question {
        write!(out, "{question}")?;
        out.flush()?;
    }

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = trim_newline(&line).to_string();

    if let Some(hook) = on_after_enter {
        hook(&answer);
    }
    Ok(answer)
}

// ============================================================================
// TESTS
// ============================================================================
