//! Selection-list rendering over any `Write`.
//!
//! Rows are repainted with relative movement counted in rows, anchored
//! at the baseline (the line below the last option). Nothing here asks
//! the terminal for its width; only column 0 is ever addressed.

use std::io::Write;

use crate::error::{PromptError, Result};
use crate::style::highlight;
use crate::term;
use crate::types::OptionValue;

/// One rendered row: highlighted under the cursor, plainly indented
/// otherwise.
fn row_line(option: &OptionValue, selected: bool) -> String {
    if selected {
        highlight(&option.to_string())
    } else {
        format!("  {option}")
    }
}

/// Write the full option list once, each row on its own line, leaving
/// the cursor at the baseline.
pub fn render_all<W: Write>(out: &mut W, options: &[OptionValue], cursor: usize) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        out.write_all(row_line(option, i == cursor).as_bytes())?;
        out.write_all(b"\r\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Repaint a single row in place.
///
/// From the baseline: move up to the row, return to column 0, clear the
/// line, write the row text, then move back down to the baseline and
/// column 0 so the next repaint starts from the same anchor.
pub fn paint_row<W: Write>(
    out: &mut W,
    options: &[OptionValue],
    row: usize,
    selected: bool,
) -> Result<()> {
    // Unreachable given the modulo arithmetic, but a bad row index must
    // fail loudly rather than scribble on the wrong line.
    let option = options.get(row).ok_or(PromptError::InvalidOptions)?;
    // A list taller than the relative-move range cannot be repainted in
    // place; refuse rather than truncate the row distance.
    let rows_up =
        i16::try_from(options.len() - row).map_err(|_| PromptError::InvalidOptions)?;
    term::move_rows(out, -rows_up)?;
    term::to_column_start(out)?;
    term::clear_line(out)?;
    out.write_all(row_line(option, selected).as_bytes())?;
    term::move_rows(out, rows_up)?;
    term::to_column_start(out)?;
    out.flush()?;
    Ok(())
}

/// Numbered list for the non-interactive fallback: `1. opt` per line.
pub fn render_numbered<W: Write>(out: &mut W, options: &[OptionValue]) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "{}. {option}", i + 1)?;
    }
    out.flush()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
