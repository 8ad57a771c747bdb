//! Built-in color themes for the form UI.

mod daylight;
mod slate;

pub use daylight::DAYLIGHT;
pub use slate::SLATE;

use ratatui::style::Style;

/// Styles used when drawing the booking form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Top title bar.
    pub title: Style,
    /// Field captions and static text.
    pub label: Style,
    /// Input content when the field is not focused.
    pub field: Style,
    /// Input content and border of the focused field.
    pub field_focused: Style,
    /// Placeholder text and the key help line.
    pub hint: Style,
    /// Validation and fetch failure messages.
    pub error: Style,
    /// Selected row inside the suggestion popup.
    pub popup_highlight: Style,
    /// The search summary panel after a submit completes.
    pub summary: Style,
}

const BUILT_INS: [(&str, Theme); 2] = [("daylight", DAYLIGHT), ("slate", SLATE)];

/// Lookup a theme by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    let normalized = name.trim().to_ascii_lowercase();
    BUILT_INS
        .iter()
        .find(|(candidate, _)| *candidate == normalized)
        .map(|(_, theme)| *theme)
}

/// Canonical names of every built-in theme, sorted for display.
#[must_use]
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILT_INS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}
