//! Free-running spinner: a worker thread repaints one line on a fixed
//! tick while the caller keeps working.
//!
//! `start` returns immediately; the animation owns its own thread and
//! is told to stop over an mpsc channel (the channel doubles as the
//! tick timer via `recv_timeout`). `start` while running and `stop`
//! while stopped are no-ops. The frame line is rewritten from column 0
//! with a clear-to-end-of-line so a shorter frame never leaves
//! artifacts from a longer one.

use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::Result;
use crate::style::{stylize, Styles};
use crate::term;

/// Tick interval between frames.
const TICK: Duration = Duration::from_millis(100);

/// Default braille frame cycle.
const DEFAULT_FRAMES: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

/// Default label prefix.
const DEFAULT_PREFIX: &str = "Loading";

struct Worker {
    stop_tx: mpsc::Sender<()>,
    join: JoinHandle<()>,
}

/// A periodic one-line animation with independent start/stop lifecycle.
pub struct Spinner {
    style: Styles,
    prefix: String,
    frames: Vec<String>,
    worker: Option<Worker>,
}

impl Spinner {
    /// Spinner with the default prefix and frames.
    pub fn new() -> Self {
        Spinner {
            style: Styles::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            frames: DEFAULT_FRAMES.iter().map(|f| f.to_string()).collect(),
            worker: None,
        }
    }

    /// Override the line style.
    pub fn with_style(mut self, style: Styles) -> Self {
        self.style = style;
        self
    }

    /// Override the label prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Override the frame sequence. Empty input keeps the default.
    pub fn with_frames(mut self, frames: Vec<String>) -> Self {
        if !frames.is_empty() {
            self.frames = frames;
        }
        self
    }

    /// True while the animation thread is running.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Hide the cursor and begin the animation. No-op while running.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            return Ok(());
        }

        let mut out = io::stdout();
        term::hide_cursor(&mut out)?;
        out.flush()?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let prefix = self.prefix.clone();
        let frames = self.frames.clone();
        let style = self.style.clone();

        log::debug!("spinner started: prefix={prefix:?}, {} frames", frames.len());
        let join = std::thread::spawn(move || {
            let mut i = 0usize;
            loop {
                match stop_rx.recv_timeout(TICK) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
                i = (i + 1) % frames.len();
                // Repaint failures just end the animation; the terminal
                // is gone and stop() will still restore the cursor.
                if tick(&prefix, &frames[i], &style).is_err() {
                    break;
                }
            }
        });

        self.worker = Some(Worker { stop_tx, join });
        Ok(())
    }

    /// Stop the animation, clear its line, restore the cursor, and
    /// optionally print a final message line. No-op while stopped.
    pub fn stop(&mut self, message: Option<&str>) -> Result<()> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let _ = worker.stop_tx.send(());
        let _ = worker.join.join();
        log::debug!("spinner stopped");

        let mut out = io::stdout();
        term::clear_line(&mut out)?;
        term::to_column_start(&mut out)?;
        term::show_cursor(&mut out)?;
        if let Some(message) = message {
            writeln!(out, "{message}")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// One animation frame: column 0, styled `"{prefix} {frame}"`, clear to
/// end of line.
fn tick(prefix: &str, frame: &str, style: &Styles) -> io::Result<()> {
    let mut out = io::stdout();
    term::to_column_start(&mut out)?;
    out.write_all(stylize(&format!("{prefix} {frame}"), style).as_bytes())?;
    term::clear_to_line_end(&mut out)?;
    out.flush()
}

impl Default for Spinner {
    fn default() -> Self {
        Spinner::new()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        let _ = self.stop(None);
    }
}

// ============================================================================
// TESTS
// ============================================================================
