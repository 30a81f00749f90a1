//! Pure selection-prompt state machine: (cursor, length, action) → transition.
//!
//! This is the core logic of the prompt, fully testable without a
//! terminal. The cursor is an index into the option list, wrapping
//! modulo length on movement. The effects boundary (`select::run`)
//! interprets transitions: repaint two rows, resolve, or cancel.

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    /// Move the cursor up one row (wrapping).
    MoveUp,
    /// Move the cursor down one row (wrapping).
    MoveDown,
    /// Accept the option under the cursor.
    Accept,
    /// Cancel the prompt (ctrl+c).
    Cancel,
}

/// Result of a pure transition. The event loop inspects this to decide
/// what to paint and whether the prompt is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Cursor moved: unhighlight `old`, highlight `new`, keep listening.
    Repaint { old: usize, new: usize },
    /// Accepted: resolve with the option at this index.
    Resolve(usize),
    /// Cancelled by the user.
    Cancel,
}

/// Pure state transition.
///
/// `len` is the option-list length and is always ≥ 1 here — the empty
/// list is rejected before the prompt ever starts.
pub fn transition(cursor: usize, len: usize, action: SelectAction) -> Transition {
    match action {
        SelectAction::MoveUp => Transition::Repaint {
            old: cursor,
            new: (cursor + len - 1) % len,
        },
        SelectAction::MoveDown => Transition::Repaint {
            old: cursor,
            new: (cursor + 1) % len,
        },
        SelectAction::Accept => Transition::Resolve(cursor),
        SelectAction::Cancel => Transition::Cancel,
    }
}

/// Parse the typed 1-based index from the non-interactive fallback.
///
/// Deliberately permissive: non-numeric input defaults to 1 and
/// out-of-range input clamps into `[1, len]`. Returns a 0-based index.
pub fn parse_choice(input: &str, len: usize) -> usize {
    let n = input.trim().parse::<usize>().unwrap_or(1);
    n.clamp(1, len) - 1
}

// ============================================================================
// TESTS
// ============================================================================
