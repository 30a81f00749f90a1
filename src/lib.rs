//! promptline: interactive terminal prompts with a state-threading
//! line sequencer.
//!
//! Declare a sequence of output lines, text-input prompts, and
//! single-choice selection prompts, then replay it against the
//! terminal, accumulating a state value step by step. The prompts can
//! also be called directly for one-off use.
//!
//! ```no_run
//! use promptline::sequencer::{DrawOptions, Sequencer};
//! use promptline::types::options;
//! use serde_json::json;
//!
//! let mut seq = Sequencer::new();
//! seq.new_line("Welcome!", None);
//! seq.new_select_line(options(["red", "green", "blue"]), |choice, _| {
//!     json!({ "color": choice })
//! });
//! seq.new_input_line(Some("Your name: ".into()), |name, _| {
//!     json!({ "name": name })
//! });
//! let state = seq.draw(DrawOptions { clean: true, close_stream: true })?;
//! # let _ = state;
//! # Ok::<(), promptline::error::PromptError>(())
//! ```
//!
//! Selection prompts run a raw-mode keypress loop when both stdin and
//! stdout are terminals, and degrade to a numbered-list-plus-typed-index
//! read otherwise. The terminal's raw-mode flag is owned by exactly one
//! prompt at a time and restored on every exit path.

pub mod error;
pub mod input;
pub mod select;
pub mod sequencer;
pub mod spinner;
pub mod style;
pub mod term;
pub mod types;

pub use error::{PromptError, Result};
pub use input::input;
pub use select::select;
pub use sequencer::{DrawOptions, Line, Sequencer};
pub use spinner::Spinner;
pub use style::{stylize, Effect, Styles};
pub use types::{options, OptionValue, SelectConfig};
