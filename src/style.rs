//! ANSI style formatting: pure functions from text + attributes to
//! escaped strings. No I/O, no state.
//!
//! Layering order is significant and fixed: effects first (each effect
//! prepends its code without a closing reset, so effects stack), then
//! foreground, then background (each wrapping the accumulated text with
//! a reset suffix). The selection highlight is its own fixed sequence
//! rather than a `Styles` value because it pads the text and combines
//! classic SGR codes (47;30) in one parameter list.

/// SGR reset suffix.
const RESET: &str = "\x1b[0m";

// ============================================================================
// EFFECTS
// ============================================================================

/// Text effects with their fixed SGR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Inverse,
    Hidden,
    Strike,
}

impl Effect {
    /// The SGR parameter for this effect.
    pub fn code(self) -> u8 {
        match self {
            Effect::Reset => 0,
            Effect::Bold => 1,
            Effect::Dim => 2,
            Effect::Italic => 3,
            Effect::Underline => 4,
            Effect::Blink => 5,
            Effect::Inverse => 7,
            Effect::Hidden => 8,
            Effect::Strike => 9,
        }
    }
}

// ============================================================================
// PALETTE
// ============================================================================

/// 256-color palette indices for the handful of semantic colors the
/// toolkit itself emits. Callers may pass any palette index.
pub mod palette {
    /// Cancellation notices, warnings.
    pub const YELLOW: u8 = 3;
    /// Errors.
    pub const RED: u8 = 1;
    /// Success messages.
    pub const GREEN: u8 = 2;
}

// ============================================================================
// STYLE ATTRIBUTES
// ============================================================================

/// Optional foreground/background palette colors plus stacked effects.
/// Purely descriptive — carried by static lines and spinners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styles {
    /// Foreground 256-palette index.
    pub color: Option<u8>,
    /// Background 256-palette index.
    pub bgcolor: Option<u8>,
    /// Effects applied in order, before any color.
    pub effect: Vec<Effect>,
}

impl Styles {
    /// Foreground-only style.
    pub fn fg(color: u8) -> Self {
        Styles { color: Some(color), ..Styles::default() }
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Apply style attributes to `text`: effects, then foreground, then
/// background. Returns `text` unchanged when `styles` is empty.
pub fn stylize(text: &str, styles: &Styles) -> String {
    let mut result = text.to_string();
    for effect in &styles.effect {
        result = format!("\x1b[{}m{result}", effect.code());
    }
    if let Some(color) = styles.color {
        result = format!("\x1b[38;5;{color}m{result}{RESET}");
    }
    if let Some(bgcolor) = styles.bgcolor {
        result = format!("\x1b[48;5;{bgcolor}m{result}{RESET}");
    }
    result
}

/// The inverse-video selection row: white background, black foreground,
/// two spaces of padding either side.
pub fn highlight(text: &str) -> String {
    format!("\x1b[47;30m  {text}  {RESET}")
}

// ============================================================================
// TESTS
// ============================================================================
