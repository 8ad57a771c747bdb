use crate::theme::Theme;
use ratatui::style::{Color, Modifier, Style};

pub const SLATE: Theme = Theme {
    title: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(15, 23, 42))
        .add_modifier(Modifier::BOLD),
    label: Style::new().fg(Color::Rgb(148, 163, 184)),
    field: Style::new().fg(Color::Rgb(226, 232, 240)),
    field_focused: Style::new().fg(Color::LightCyan),
    hint: Style::new().fg(Color::DarkGray),
    error: Style::new().fg(Color::Rgb(248, 113, 113)),
    popup_highlight: Style::new()
        .bg(Color::Rgb(30, 41, 59))
        .fg(Color::Rgb(250, 204, 21)),
    summary: Style::new().fg(Color::Rgb(134, 239, 172)),
};
