//! Error taxonomy for prompt operations.
//!
//! Two domain failures exist: a selection prompt given nothing to select,
//! and a user cancelling an in-flight selection. Everything else is I/O.
//! None of these are swallowed — they propagate out of the prompt call
//! (and out of a sequencer's `draw`) after terminal cleanup has run.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Failures surfaced by prompts and the line sequencer.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Empty or malformed option list, or a repaint resolved to a row
    /// that doesn't exist.
    #[error("invalid options provided")]
    InvalidOptions,

    /// User cancelled an interactive selection with ctrl+c.
    #[error("operation canceled")]
    Aborted,

    /// Terminal read/write failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// True when the error is a user cancellation rather than a fault.
    pub fn is_aborted(&self) -> bool {
        matches!(self, PromptError::Aborted)
    }
}

// ============================================================================
// TESTS
// ============================================================================
