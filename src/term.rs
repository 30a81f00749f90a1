//! Terminal control surface: the only primitives allowed to touch the
//! terminal. Everything is relative — row moves and column 0. No
//! component may assume terminal width or emit absolute positioning.
//!
//! Primitives are generic over `W: Write` so rendering code can be
//! exercised against an in-memory buffer. They queue their escape
//! sequences; callers flush when a frame is complete.
//!
//! The raw-mode flag is the one process-wide contended resource.
//! [`RawModeGuard`] makes its hand-off structural: prior state is
//! captured on acquire and restored on `Drop`, so every exit path —
//! normal return, `?`, panic unwind — leaves the terminal usable.
//! [`install_panic_hook`] and [`install_interrupt_hook`] are the
//! process-wide backstops for paths no guard covers: panics that escape
//! guards, and SIGINT delivered while no prompt is active.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveDown, MoveToColumn, MoveUp, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, is_raw_mode_enabled, Clear, ClearType,
};
use crossterm::{execute, queue};

// ============================================================================
// OUTPUT PRIMITIVES
// ============================================================================

/// Reset the terminal and clear the whole screen (RIS).
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x1Bc")
}

/// Make the cursor visible.
pub fn show_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Show)
}

/// Hide the cursor (animations, selection lists).
pub fn hide_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Hide)
}

/// Move the cursor `delta` rows: negative is up, positive is down,
/// zero is a no-op. Column is unchanged.
pub fn move_rows<W: Write>(out: &mut W, delta: i16) -> io::Result<()> {
    if delta < 0 {
        queue!(out, MoveUp(delta.unsigned_abs()))
    } else if delta > 0 {
        queue!(out, MoveDown(delta as u16))
    } else {
        Ok(())
    }
}

/// Return the cursor to column 0 of the current row.
pub fn to_column_start<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveToColumn(0))
}

/// Clear the entire current line.
pub fn clear_line<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::CurrentLine))
}

/// Clear from the cursor to the end of the line. Used by the spinner so
/// a shorter frame never leaves artifacts from a longer one.
pub fn clear_to_line_end<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::UntilNewLine))
}

// ============================================================================
// INPUT STREAM
// ============================================================================

/// Release the input stream at the end of a prompt sequence: restore
/// cooked mode if a prompt left raw mode enabled and flush pending
/// output, so the process can exit with a usable terminal.
pub fn release_input() -> io::Result<()> {
    if is_raw_mode_enabled()? {
        log::debug!("release_input: disabling leftover raw mode");
        disable_raw_mode()?;
    }
    io::stdout().flush()
}

// ============================================================================
// RAW MODE OWNERSHIP
// ============================================================================

/// Scoped ownership of the terminal's raw-mode flag.
///
/// Acquiring enables raw mode; dropping restores the flag to the value
/// it held immediately before the call and re-shows the cursor. Exactly
/// one component holds the guard at a time — the sequencer runs steps
/// strictly in order, so hand-off is structural.
#[derive(Debug)]
pub struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    /// Enable raw mode, remembering the prior state.
    pub fn acquire() -> io::Result<Self> {
        let was_raw = is_raw_mode_enabled()?;
        enable_raw_mode()?;
        log::debug!("raw mode acquired (was_raw={was_raw})");
        Ok(RawModeGuard { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best effort: nothing useful to do with failures during teardown.
        if !self.was_raw {
            let _ = disable_raw_mode();
        }
        let _ = execute!(io::stdout(), Show);
        log::debug!("raw mode released (restored_raw={})", self.was_raw);
    }
}

/// Install a panic hook that restores the terminal (cooked mode, visible
/// cursor) before the panic message prints, so a crash mid-prompt never
/// leaves the shell in raw mode.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show);
        original_hook(panic_info);
    }));
}

#[cfg(unix)]
static COOKED_TERMIOS: std::sync::OnceLock<libc::termios> = std::sync::OnceLock::new();

/// SIGINT handler: re-show the cursor, restore the cooked-mode termios
/// snapshot, then hand the signal back to its default disposition.
/// Only async-signal-safe calls (write, tcsetattr, signal, raise).
#[cfg(unix)]
extern "C" fn restore_on_interrupt(signo: libc::c_int) {
    const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            SHOW_CURSOR.as_ptr().cast(),
            SHOW_CURSOR.len(),
        );
        if let Some(termios) = COOKED_TERMIOS.get() {
            let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, termios);
        }
        libc::signal(signo, libc::SIG_DFL);
        libc::raise(signo);
    }
}

/// Install a SIGINT handler that restores the terminal before the
/// process dies. This covers interrupts no guard can: ctrl+c while the
/// cursor is hidden in cooked mode (a running spinner, for instance)
/// delivers the signal directly, and without this hook the process
/// terminates with the cursor still invisible.
#[cfg(unix)]
pub fn install_interrupt_hook() {
    let mut cooked = std::mem::MaybeUninit::<libc::termios>::uninit();
    unsafe {
        // Snapshot cooked-mode settings now; the handler itself may not
        // allocate or lock.
        if libc::tcgetattr(libc::STDIN_FILENO, cooked.as_mut_ptr()) == 0 {
            let _ = COOKED_TERMIOS.set(cooked.assume_init());
        }
        libc::signal(
            libc::SIGINT,
            restore_on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t,
        );
    }
}

#[cfg(not(unix))]
pub fn install_interrupt_hook() {}

// ============================================================================
// TESTS
// ============================================================================
