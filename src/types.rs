//! Shared prompt types: option values and selection configuration.
//!
//! Pure data. Option lists are immutable for the duration of one prompt
//! call; config hooks are observation points, not control flow.

use std::fmt;

// ============================================================================
// OPTION VALUES
// ============================================================================

/// A displayable selection option: text, number, or boolean.
///
/// Selection always resolves to the *string form* of the chosen option,
/// so heterogeneous lists stay uniform at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Int(n)
    }
}

impl From<f64> for OptionValue {
    fn from(x: f64) -> Self {
        OptionValue::Float(x)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

/// Build an option list from anything displayable.
pub fn options<T: Into<OptionValue>>(items: impl IntoIterator<Item = T>) -> Vec<OptionValue> {
    items.into_iter().map(Into::into).collect()
}

// ============================================================================
// SELECTION CONFIG
// ============================================================================

/// Optional knobs for a selection prompt.
#[derive(Default)]
pub struct SelectConfig {
    /// Question text written before the typed-index read in the
    /// non-interactive fallback.
    pub no_tty_fallback_text: Option<String>,
    /// Invoked with the string form of the selected option, before the
    /// prompt returns.
    pub on_after_selection: Option<Box<dyn Fn(&str)>>,
    /// Invoked when the user cancels with ctrl+c, before the prompt
    /// returns the abort error.
    pub on_cancel: Option<Box<dyn Fn()>>,
}

impl fmt::Debug for SelectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("no_tty_fallback_text", &self.no_tty_fallback_text)
            .field("on_after_selection", &self.on_after_selection.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
