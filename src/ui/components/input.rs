use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use tui_textarea::{CursorMove, TextArea};

use crate::theme::Theme;

/// Visual state a field is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Focused,
    Idle,
    Disabled,
}

/// Single-line text editor used by the free-text form fields.
///
/// Wraps a [`TextArea`] restricted to one line: keys that would insert a
/// newline or that the form reserves for navigation are filtered out before
/// they reach the editor.
pub struct FieldInput<'a> {
    textarea: TextArea<'a>,
}

impl<'a> FieldInput<'a> {
    pub fn new(placeholder: &str) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(placeholder);
        Self { textarea }
    }

    /// Current content of the single line.
    #[must_use]
    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replace the content, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.textarea.move_cursor(CursorMove::End);
        self.textarea.delete_line_by_head();
        self.textarea.insert_str(text);
    }

    /// Feed a key press into the editor. Returns whether the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Esc => false,
            _ => self.textarea.input(key),
        }
    }

    /// Draw the field inside a titled border reflecting `mode`.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: String,
        mode: FieldMode,
        theme: &Theme,
    ) {
        let (border_style, text_style, cursor_style) = match mode {
            FieldMode::Focused => (
                theme.field_focused,
                theme.field_focused,
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            FieldMode::Idle => (theme.label, theme.field, Style::default()),
            FieldMode::Disabled => (theme.hint, theme.hint, Style::default()),
        };
        self.textarea.set_style(text_style);
        self.textarea.set_placeholder_style(theme.hint);
        self.textarea.set_cursor_style(cursor_style);
        self.textarea.set_block(
            Block::bordered()
                .title(title)
                .border_style(border_style)
                .title_style(border_style),
        );
        frame.render_widget(&self.textarea, area);
    }
}
