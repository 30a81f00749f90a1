//! Line sequencer: replay an ordered list of static lines and
//! state-transforming prompt steps, threading one accumulated state
//! value through them.
//!
//! State is a JSON object. Each step receives the current state and
//! returns a partial update — another JSON object — that is shallow
//! merged before the next step begins: later fields overwrite earlier
//! ones with the same name, unmentioned fields persist. Steps run
//! strictly in declaration order on the calling thread, so no step ever
//! observes a half-merged state, and only one step at a time can own
//! the terminal's raw-mode flag.
//!
//! A failing step (a cancelled selection, a broken pipe) aborts the
//! remaining sequence; the error propagates out of `draw` after the
//! prompt's own teardown has restored the terminal.

use std::io::{self, Write};

use serde_json::{Map, Value};

use crate::error::Result;
use crate::input::input;
use crate::select::select;
use crate::style::{stylize, Styles};
use crate::term;
use crate::types::{OptionValue, SelectConfig};

// ============================================================================
// LINES
// ============================================================================

/// A step the sequencer can own.
pub enum Line {
    /// Pre-rendered text, written verbatim as one output line.
    Static(String),
    /// Fallible state transform: current state in, partial update out.
    Step(Box<dyn FnMut(&Value) -> Result<Value>>),
}

impl Line {
    /// Static line with optional styling applied at declaration time.
    pub fn text(text: &str, styles: Option<&Styles>) -> Self {
        match styles {
            Some(styles) => Line::Static(stylize(text, styles)),
            None => Line::Static(text.to_string()),
        }
    }
}

impl std::fmt::Debug for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Line::Step(_) => f.write_str("Step(..)"),
        }
    }
}

// ============================================================================
// STATE MERGE
// ============================================================================

/// Shallow merge of a partial update into the accumulated state.
///
/// Object-into-object inserts every field of `patch`, overwriting on
/// name collision. Anything else replaces the state wholesale.
pub fn merge(state: &mut Value, patch: Value) {
    match (state, patch) {
        (Value::Object(fields), Value::Object(updates)) => {
            for (key, value) in updates {
                fields.insert(key, value);
            }
        }
        (state, patch) => *state = patch,
    }
}

// ============================================================================
// DRAW OPTIONS
// ============================================================================

/// Playback options for [`Sequencer::draw`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOptions {
    /// Clear the screen before the first line.
    pub clean: bool,
    /// Release the input stream after the last line so the process can
    /// exit cleanly.
    pub close_stream: bool,
}

// ============================================================================
// SEQUENCER
// ============================================================================

/// Ordered playback of lines and prompts with accumulated state.
///
/// The sequence is append-only during setup and read-only during
/// playback. State belongs exclusively to this instance.
#[derive(Debug)]
pub struct Sequencer {
    lines: Vec<Line>,
    state: Value,
}

impl Sequencer {
    /// Empty sequence, empty object state.
    pub fn new() -> Self {
        Sequencer::with_lines(Vec::new())
    }

    /// Sequence seeded with pre-built lines.
    pub fn with_lines(lines: Vec<Line>) -> Self {
        Sequencer {
            lines,
            state: Value::Object(Map::new()),
        }
    }

    /// Set the accumulated state before playback.
    pub fn init_state(&mut self, state: Value) {
        self.state = state;
    }

    /// The current accumulated state.
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// Append a static line, styled at declaration time.
    pub fn new_line(&mut self, text: &str, styles: Option<&Styles>) {
        self.lines.push(Line::text(text, styles));
    }

    /// Append an arbitrary state-transforming step.
    pub fn new_step(&mut self, step: impl FnMut(&Value) -> Result<Value> + 'static) {
        self.lines.push(Line::Step(Box::new(step)));
    }

    /// Append a text-input step. The adapter maps the entered line and
    /// the state at that point to a partial update.
    pub fn new_input_line(
        &mut self,
        question: Option<String>,
        adapter: impl Fn(&str, &Value) -> Value + 'static,
    ) {
        self.new_step(move |state| {
            let answer = input(question.as_deref(), None)?;
            Ok(adapter(&answer, state))
        });
    }

    /// Append a selection step over `options`. The adapter maps the
    /// chosen option's string form and the state to a partial update.
    pub fn new_select_line(
        &mut self,
        options: Vec<OptionValue>,
        adapter: impl Fn(&str, &Value) -> Value + 'static,
    ) {
        self.new_step(move |state| {
            let choice = select(&options, &SelectConfig::default())?;
            Ok(adapter(&choice, state))
        });
    }

    /// Play the sequence against stdout. Returns the final state.
    pub fn draw(&mut self, opts: DrawOptions) -> Result<&Value> {
        let mut out = io::stdout();
        self.draw_to(&mut out, opts)
    }

    /// Play the sequence, writing static lines (and the optional screen
    /// clear) to `out`. Prompt steps still talk to the real terminal —
    /// the writer seam exists so ordering and state threading are
    /// testable with buffer-only sequences.
    pub fn draw_to<W: Write>(&mut self, out: &mut W, opts: DrawOptions) -> Result<&Value> {
        if opts.clean {
            term::clear_screen(out)?;
        }

        // State is merged in place so an aborted sequence — a failed
        // step or a failed write — keeps everything accumulated so far.
        let Sequencer { lines, state } = &mut *self;
        for (i, line) in lines.iter_mut().enumerate() {
            match line {
                Line::Static(text) => writeln!(out, "{text}")?,
                Line::Step(step) => {
                    log::debug!("sequencer: step {i} starting");
                    match step(state) {
                        Ok(patch) => merge(state, patch),
                        Err(e) => {
                            log::debug!("sequencer: step {i} failed: {e}");
                            return Err(e);
                        }
                    }
                }
            }
        }
        out.flush()?;

        if opts.close_stream {
            term::release_input()?;
        }
        Ok(&self.state)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Sequencer::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::style::Effect;
    use serde_json::json;

    #[test]
    fn merge_overwrites_and_preserves() {
        let mut state = json!({"name": "Ada", "role": "engineer"});
        merge(&mut state, json!({"role": "mathematician", "born": 1815}));
        assert_eq!(
            state,
            json!({"name": "Ada", "role": "mathematician", "born": 1815})
        );
    }

    #[test]
    fn merge_is_shallow() {
        let mut state = json!({"user": {"name": "Ada", "role": "engineer"}});
        merge(&mut state, json!({"user": {"name": "Grace"}}));
        // Nested objects replace, they do not deep-merge.
        assert_eq!(state, json!({"user": {"name": "Grace"}}));
    }

    #[test]
    fn merge_non_object_replaces_wholesale() {
        let mut state = json!({"a": 1});
        merge(&mut state, json!("done"));
        assert_eq!(state, json!("done"));
    }

    #[test]
    fn static_lines_print_in_declaration_order() {
        let mut seq = Sequencer::new();
        seq.new_line("Hi", None);
        seq.new_line("Bye", None);
        let mut buf = Vec::new();
        seq.draw_to(&mut buf, DrawOptions::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Hi\nBye\n");
    }

    #[test]
    fn styled_lines_are_rendered_at_declaration_time() {
        let mut seq = Sequencer::new();
        let styles = Styles { effect: vec![Effect::Bold], ..Styles::default() };
        seq.new_line("Hello", Some(&styles));
        let mut buf = Vec::new();
        seq.draw_to(&mut buf, DrawOptions::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\x1b[1mHello\n");
    }

    #[test]
    fn clean_clears_screen_first() {
        let mut seq = Sequencer::new();
        seq.new_line("Hi", None);
        let mut buf = Vec::new();
        seq.draw_to(&mut buf, DrawOptions { clean: true, ..DrawOptions::default() })
            .unwrap();
        assert!(String::from_utf8(buf).unwrap().starts_with("\x1Bc"));
    }

    #[test]
    fn steps_thread_state_in_order() {
        let mut seq = Sequencer::new();
        seq.new_line("Hi", None);
        seq.new_step(|_| Ok(json!({"name": "Ada"})));
        // A later step reads what the earlier one wrote.
        seq.new_step(|state| {
            let name = state["name"].as_str().unwrap_or("?");
            Ok(json!({"greeting": format!("Bye {name}")}))
        });
        seq.new_line("Bye", None);

        let mut buf = Vec::new();
        let state = seq.draw_to(&mut buf, DrawOptions::default()).unwrap();
        assert_eq!(*state, json!({"name": "Ada", "greeting": "Bye Ada"}));
        assert_eq!(String::from_utf8(buf).unwrap(), "Hi\nBye\n");
    }

    #[test]
    fn init_state_seeds_playback() {
        let mut seq = Sequencer::new();
        seq.init_state(json!({"count": 1}));
        seq.new_step(|state| {
            let count = state["count"].as_i64().unwrap_or(0);
            Ok(json!({"count": count + 1}))
        });
        let mut buf = Vec::new();
        let state = seq.draw_to(&mut buf, DrawOptions::default()).unwrap();
        assert_eq!(*state, json!({"count": 2}));
    }

    #[test]
    fn failing_step_aborts_remaining_lines() {
        let mut seq = Sequencer::new();
        seq.new_line("before", None);
        seq.new_step(|_| Err(PromptError::Aborted));
        seq.new_line("after", None);

        let mut buf = Vec::new();
        let err = seq.draw_to(&mut buf, DrawOptions::default()).unwrap_err();
        assert!(err.is_aborted());
        // The trailing line never printed.
        assert_eq!(String::from_utf8(buf).unwrap(), "before\n");
    }

    /// Writer whose every operation fails, standing in for a closed pipe.
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("sink closed"))
        }
    }

    #[test]
    fn state_survives_a_failed_write() {
        let mut seq = Sequencer::new();
        seq.init_state(json!({"name": "Ada"}));
        seq.new_line("Hi", None);
        let err = seq
            .draw_to(&mut FailingWriter, DrawOptions::default())
            .unwrap_err();
        assert!(matches!(err, PromptError::Io(_)));
        assert_eq!(*seq.state(), json!({"name": "Ada"}));
    }

    #[test]
    fn state_survives_a_failed_flush() {
        let mut seq = Sequencer::new();
        seq.new_step(|_| Ok(json!({"n": 1})));
        let err = seq
            .draw_to(&mut FailingWriter, DrawOptions::default())
            .unwrap_err();
        assert!(matches!(err, PromptError::Io(_)));
        assert_eq!(*seq.state(), json!({"n": 1}));
    }

    #[test]
    fn state_survives_an_aborted_sequence() {
        let mut seq = Sequencer::new();
        seq.new_step(|_| Ok(json!({"name": "Ada"})));
        seq.new_step(|_| Err(PromptError::Aborted));

        let mut buf = Vec::new();
        let _ = seq.draw_to(&mut buf, DrawOptions::default()).unwrap_err();
        assert_eq!(*seq.state(), json!({"name": "Ada"}));
    }

    #[test]
    fn later_fields_overwrite_earlier_ones() {
        let mut seq = Sequencer::new();
        seq.new_step(|_| Ok(json!({"color": "red", "size": "small"})));
        seq.new_step(|_| Ok(json!({"color": "blue"})));
        let mut buf = Vec::new();
        let state = seq.draw_to(&mut buf, DrawOptions::default()).unwrap();
        assert_eq!(*state, json!({"color": "blue", "size": "small"}));
    }

    #[test]
    fn with_lines_plays_prebuilt_sequence() {
        let mut seq = Sequencer::with_lines(vec![
            Line::text("one", None),
            Line::Step(Box::new(|_| Ok(json!({"n": 1})))),
            Line::text("two", None),
        ]);
        let mut buf = Vec::new();
        let state = seq.draw_to(&mut buf, DrawOptions::default()).unwrap();
        assert_eq!(*state, json!({"n": 1}));
        assert_eq!(String::from_utf8(buf).unwrap(), "one\ntwo\n");
    }
}
