use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Clear, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::booking::Airport;
use crate::theme::Theme;

/// Rows shown at once before the list scrolls.
const MAX_VISIBLE: usize = 6;

/// Rectangle for a dropdown anchored to `anchor`, preferring the space
/// below it and flipping above when the bottom of the frame is too close.
/// `None` when the candidate rows cannot fit either way.
pub(crate) fn popup_rect(anchor: Rect, frame: Rect, rows: u16, desired_width: u16) -> Option<Rect> {
    if rows == 0 || frame.height == 0 || frame.width == 0 {
        return None;
    }
    let height = rows.saturating_add(2);
    let below_top = anchor.y.saturating_add(anchor.height);
    let space_below = frame.bottom().saturating_sub(below_top);
    let y = if space_below >= height {
        below_top
    } else if anchor.y.saturating_sub(frame.y) >= height {
        anchor.y.saturating_sub(height)
    } else {
        return None;
    };

    let width = desired_width.max(anchor.width).min(frame.width);
    let mut x = anchor.x;
    if x.saturating_add(width) > frame.right() {
        x = frame.right().saturating_sub(width);
    }

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

/// Draw the suggestion dropdown for one autocomplete field.
pub(crate) fn render_suggestions(
    frame: &mut Frame,
    anchor: Rect,
    candidates: &[Airport],
    selected: usize,
    theme: &Theme,
) {
    if candidates.is_empty() {
        return;
    }

    let labels: Vec<String> = candidates.iter().map(Airport::label).collect();
    let widest = labels
        .iter()
        .map(|label| label.as_str().width())
        .max()
        .unwrap_or(0);
    let rows = labels.len().min(MAX_VISIBLE) as u16;
    let desired_width = (widest as u16).saturating_add(4);
    let Some(area) = popup_rect(anchor, frame.area(), rows, desired_width) else {
        return;
    };

    let items: Vec<ListItem> = labels.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .style(theme.field)
        .block(
            ratatui::widgets::Block::bordered()
                .border_style(theme.field_focused),
        )
        .highlight_style(theme.popup_highlight);
    let mut state = ListState::default().with_selected(Some(selected));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}
