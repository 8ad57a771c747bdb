use crate::theme::Theme;
use ratatui::style::{Color, Modifier, Style};

pub const DAYLIGHT: Theme = Theme {
    title: Style::new()
        .fg(Color::Rgb(30, 41, 59))
        .bg(Color::Rgb(186, 230, 253))
        .add_modifier(Modifier::BOLD),
    label: Style::new().fg(Color::Rgb(71, 85, 105)),
    field: Style::new().fg(Color::Rgb(15, 23, 42)),
    field_focused: Style::new().fg(Color::Blue),
    hint: Style::new().fg(Color::Gray),
    error: Style::new().fg(Color::Rgb(185, 28, 28)),
    popup_highlight: Style::new()
        .bg(Color::Rgb(224, 242, 254))
        .fg(Color::Rgb(2, 132, 199)),
    summary: Style::new().fg(Color::Rgb(21, 128, 61)),
};
