//! Single-choice selection prompt.
//!
//! Organized along the same boundaries as the rest of the crate:
//! - `state`: pure cursor/action algebra (fully testable, no terminal)
//! - `view`: row painting over any `Write`
//! - this module: the effects boundary — TTY probe, raw-mode ownership,
//!   the key event loop, and the non-interactive fallback.
//!
//! The interactive path owns the input stream's raw-mode flag for the
//! duration of the call and restores it on every exit path via
//! [`RawModeGuard`](crate::term::RawModeGuard).

pub mod state;
pub mod view;

use std::io::{self, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::{PromptError, Result};
use crate::style::{palette, stylize, Styles};
use crate::term;
use crate::types::{OptionValue, SelectConfig};

use state::{parse_choice, transition, SelectAction, Transition};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic action.
///
/// Returns None for key releases/repeats and for keys the prompt
/// ignores.
pub fn map_key(key: &KeyEvent) -> Option<SelectAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always cancels — raw mode suppresses the signal, so the
    // prompt must handle it as a key.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(SelectAction::Cancel);
    }

    match key.code {
        KeyCode::Up => Some(SelectAction::MoveUp),
        KeyCode::Down => Some(SelectAction::MoveDown),
        KeyCode::Enter => Some(SelectAction::Accept),
        _ => None,
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Drive the selection list against a stream of actions.
///
/// Renders the full list once, then repaints exactly two rows per
/// movement. Returns the resolved cursor index, or `Aborted` on cancel
/// (and on action-stream exhaustion, which only a closed input can
/// produce).
fn run_loop<W: Write>(
    out: &mut W,
    options: &[OptionValue],
    events: impl IntoIterator<Item = Result<SelectAction>>,
) -> Result<usize> {
    let mut cursor = 0usize;
    view::render_all(out, options, cursor)?;

    for action in events {
        match transition(cursor, options.len(), action?) {
            Transition::Repaint { old, new } => {
                view::paint_row(out, options, old, false)?;
                view::paint_row(out, options, new, true)?;
                cursor = new;
            }
            Transition::Resolve(index) => return Ok(index),
            Transition::Cancel => return Err(PromptError::Aborted),
        }
    }
    Err(PromptError::Aborted)
}

/// Blocking crossterm key events mapped to actions.
fn terminal_actions() -> impl Iterator<Item = Result<SelectAction>> {
    std::iter::from_fn(|| loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(action) = map_key(&key) {
                    return Some(Ok(action));
                }
            }
            Ok(_) => {} // resize, focus, paste — not ours
            Err(e) => return Some(Err(e.into())),
        }
    })
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Prompt the user to pick one option.
///
/// Fails with [`PromptError::InvalidOptions`] before any rendering when
/// `options` is empty. Interactive when both stdin and stdout are
/// terminals; otherwise falls back to a numbered list plus a typed
/// 1-based index (permissively clamped). Resolves to the string form of
/// the chosen option.
pub fn select(options: &[OptionValue], config: &SelectConfig) -> Result<String> {
    if options.is_empty() {
        return Err(PromptError::InvalidOptions);
    }

    let tty = io::stdin().is_terminal() && io::stdout().is_terminal();
    log::debug!("select: {} options, interactive={tty}", options.len());

    if tty {
        interactive(options, config)
    } else {
        fallback(options, config)
    }
}

/// Raw-mode keypress-driven path.
fn interactive(options: &[OptionValue], config: &SelectConfig) -> Result<String> {
    let mut out = io::stdout();

    let guard = term::RawModeGuard::acquire()?;
    term::hide_cursor(&mut out)?;

    let outcome = run_loop(&mut out, options, terminal_actions());

    // Restores cooked mode and cursor visibility before anything else
    // happens on either stream.
    drop(guard);

    match outcome {
        Ok(index) => {
            let text = options[index].to_string();
            log::debug!("select: resolved {text:?}");
            if let Some(hook) = &config.on_after_selection {
                hook(&text);
            }
            Ok(text)
        }
        Err(PromptError::Aborted) => {
            log::debug!("select: cancelled");
            let notice = stylize("operation canceled", &Styles::fg(palette::YELLOW));
            writeln!(out, "{notice}")?;
            out.flush()?;
            if let Some(hook) = &config.on_cancel {
                hook();
            }
            Err(PromptError::Aborted)
        }
        Err(e) => Err(e),
    }
}

/// Non-interactive path: numbered list, one typed line, clamp.
fn fallback(options: &[OptionValue], config: &SelectConfig) -> Result<String> {
    let mut out = io::stdout();
    view::render_numbered(&mut out, options)?;

    if let Some(question) = &config.no_tty_fallback_text {
        write!(out, "{question}")?;
        out.flush()?;
    }

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let index = parse_choice(&line, options.len());
    log::debug!("select: fallback input {line:?} -> index {index}");
    Ok(options[index].to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::options;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn actions(list: &[SelectAction]) -> Vec<Result<SelectAction>> {
        list.iter().copied().map(Ok).collect()
    }

    // -- Key mapping --

    #[test]
    fn arrows_map_to_movement() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(SelectAction::MoveUp));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(SelectAction::MoveDown));
    }

    #[test]
    fn enter_maps_to_accept() {
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(SelectAction::Accept));
    }

    #[test]
    fn ctrl_c_maps_to_cancel() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&key), Some(SelectAction::Cancel));
    }

    #[test]
    fn plain_c_is_ignored() {
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(&press(KeyCode::Left)), None);
        assert_eq!(map_key(&press(KeyCode::Esc)), None);
        assert_eq!(map_key(&press(KeyCode::Char(' '))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(&key), None);
    }

    // -- Event loop against a buffer --

    #[test]
    fn two_downs_then_accept_resolves_third_option() {
        let opts = options(["A", "B", "C"]);
        let mut buf = Vec::new();
        let index = run_loop(
            &mut buf,
            &opts,
            actions(&[
                SelectAction::MoveDown,
                SelectAction::MoveDown,
                SelectAction::Accept,
            ]),
        )
        .unwrap();
        assert_eq!(index, 2);
        assert_eq!(opts[index].to_string(), "C");
    }

    #[test]
    fn immediate_accept_resolves_first_option() {
        let opts = options(["A", "B"]);
        let mut buf = Vec::new();
        let index = run_loop(&mut buf, &opts, actions(&[SelectAction::Accept])).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn wrap_up_from_top_resolves_last_option() {
        let opts = options(["A", "B", "C"]);
        let mut buf = Vec::new();
        let index = run_loop(
            &mut buf,
            &opts,
            actions(&[SelectAction::MoveUp, SelectAction::Accept]),
        )
        .unwrap();
        assert_eq!(index, 2);
    }

    #[test]
    fn cancel_aborts() {
        let opts = options(["A", "B"]);
        let mut buf = Vec::new();
        let err = run_loop(
            &mut buf,
            &opts,
            actions(&[SelectAction::MoveDown, SelectAction::Cancel]),
        )
        .unwrap_err();
        assert!(err.is_aborted());
    }

    #[test]
    fn exhausted_input_aborts() {
        let opts = options(["A"]);
        let mut buf = Vec::new();
        let err = run_loop(&mut buf, &opts, actions(&[])).unwrap_err();
        assert!(err.is_aborted());
    }

    #[test]
    fn each_movement_repaints_exactly_two_rows() {
        let opts = options(["A", "B", "C"]);

        let mut initial = Vec::new();
        view::render_all(&mut initial, &opts, 0).unwrap();
        let initial_highlights = count_highlights(&initial);

        let mut buf = Vec::new();
        let _ = run_loop(
            &mut buf,
            &opts,
            actions(&[SelectAction::MoveDown, SelectAction::Accept]),
        )
        .unwrap();

        // One initial highlight plus exactly one per movement: any more
        // would mean rows were over-painted.
        assert_eq!(count_highlights(&buf), initial_highlights + 1);
        // The old row is cleared and rewritten plainly.
        assert!(String::from_utf8(buf).unwrap().contains("\x1b[2K  A"));
    }

    #[test]
    fn run_loop_propagates_event_errors() {
        let opts = options(["A", "B"]);
        let mut buf = Vec::new();
        let events = vec![Err(PromptError::Io(io::Error::other("tty gone")))];
        let err = run_loop(&mut buf, &opts, events).unwrap_err();
        assert!(matches!(err, PromptError::Io(_)));
    }

    #[test]
    fn empty_options_fail_before_any_rendering() {
        let err = select(&[], &SelectConfig::default()).unwrap_err();
        assert!(matches!(err, PromptError::InvalidOptions));
    }

    fn count_highlights(bytes: &[u8]) -> usize {
        String::from_utf8_lossy(bytes).matches("\x1b[47;30m").count()
    }
}
