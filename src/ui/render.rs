use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use throbber_widgets_tui::Throbber;

use super::app::App;
use super::components::{FieldMode, render_suggestions};
use super::focus::FormField;
use crate::booking::{Field, TripType, passenger_label};
use crate::suggest::Side;

impl App<'_> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title bar
                Constraint::Length(1), // subtitle
                Constraint::Length(1), // trip type
                Constraint::Length(3), // origin / destination
                Constraint::Length(1), // autocomplete notices
                Constraint::Length(3), // dates
                Constraint::Length(1), // date notices
                Constraint::Length(3), // passengers / cabin
                Constraint::Length(3), // submit
                Constraint::Min(0),    // summary
                Constraint::Length(1), // key help
            ])
            .split(area);

        self.render_header(frame, rows[0], rows[1]);
        self.render_trip_type(frame, rows[2]);

        let route = split_pair(rows[3]);
        let route_notices = split_pair(rows[4]);
        self.render_autocomplete(frame, Side::Origin, route[0], route_notices[0]);
        self.render_autocomplete(frame, Side::Destination, route[1], route_notices[1]);

        let dates = split_pair(rows[5]);
        let date_notices = split_pair(rows[6]);
        self.render_dates(frame, dates[0], dates[1], date_notices[0], date_notices[1]);

        let choices = split_pair(rows[7]);
        self.render_passengers(frame, choices[0]);
        self.render_cabin(frame, choices[1]);

        self.render_submit(frame, rows[8]);
        self.render_summary(frame, rows[9]);
        self.render_help(frame, rows[10]);

        // Dropdowns paint over whatever sits below their field.
        if let Some(side) = self.open_popup_side() {
            let anchor = match side {
                Side::Origin => route[0],
                Side::Destination => route[1],
            };
            let state = self.suggest_state(side);
            render_suggestions(frame, anchor, &state.candidates, state.selected, &self.theme);
        }
    }

    fn render_header(&self, frame: &mut Frame, title_area: Rect, subtitle_area: Rect) {
        let title = Paragraph::new(self.title.as_str())
            .style(self.theme.title)
            .alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        let subtitle = Paragraph::new("Search for the best deals on flights")
            .style(self.theme.hint)
            .alignment(Alignment::Center);
        frame.render_widget(subtitle, subtitle_area);
    }

    fn render_trip_type(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormField::TripType;
        let label_style = if focused {
            self.theme.field_focused
        } else {
            self.theme.label
        };
        let radio_style = |selected: bool| {
            if focused {
                self.theme.field_focused
            } else if selected {
                self.theme.field
            } else {
                self.theme.label
            }
        };
        let round = self.query.trip_type == TripType::RoundTrip;
        let line = Line::from(vec![
            Span::styled("Trip Type  ", label_style),
            radio_span(round, TripType::RoundTrip.label(), radio_style(round)),
            Span::raw("   "),
            radio_span(!round, TripType::OneWay.label(), radio_style(!round)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_autocomplete(&mut self, frame: &mut Frame, side: Side, area: Rect, notice_area: Rect) {
        let field = match side {
            Side::Origin => FormField::Origin,
            Side::Destination => FormField::Destination,
        };
        let mode = if self.focus == field {
            FieldMode::Focused
        } else {
            FieldMode::Idle
        };
        let state = self.suggest_state(side);
        let title = if state.loading {
            format!("{} {}", field.label(), self.spinner_symbol())
        } else {
            field.label().to_string()
        };

        let error_field = match side {
            Side::Origin => Field::Origin,
            Side::Destination => Field::Destination,
        };
        let notice = self
            .errors
            .message(error_field)
            .map(str::to_string)
            .or_else(|| self.suggest_state(side).notice.clone());

        let theme = self.theme;
        self.side_input_mut(side).render(frame, area, title, mode, &theme);
        if let Some(notice) = notice {
            let style = if self.errors.message(error_field).is_some() {
                theme.error
            } else {
                theme.hint
            };
            frame.render_widget(Paragraph::new(notice).style(style), notice_area);
        }
    }

    fn render_dates(
        &mut self,
        frame: &mut Frame,
        departure_area: Rect,
        return_area: Rect,
        departure_notice: Rect,
        return_notice: Rect,
    ) {
        let theme = self.theme;
        let departure_mode = if self.focus == FormField::DepartureDate {
            FieldMode::Focused
        } else {
            FieldMode::Idle
        };
        self.departure_input.render(
            frame,
            departure_area,
            FormField::DepartureDate.label().to_string(),
            departure_mode,
            &theme,
        );

        let return_mode = if self.query.trip_type == TripType::OneWay {
            FieldMode::Disabled
        } else if self.focus == FormField::ReturnDate {
            FieldMode::Focused
        } else {
            FieldMode::Idle
        };
        self.return_input.render(
            frame,
            return_area,
            FormField::ReturnDate.label().to_string(),
            return_mode,
            &theme,
        );

        if let Some(message) = self.errors.message(Field::DepartureDate) {
            frame.render_widget(Paragraph::new(message).style(theme.error), departure_notice);
        }
        if let Some(message) = self.errors.message(Field::ReturnDate) {
            frame.render_widget(Paragraph::new(message).style(theme.error), return_notice);
        }
    }

    fn render_passengers(&self, frame: &mut Frame, area: Rect) {
        self.render_choice(
            frame,
            area,
            FormField::Passengers,
            passenger_label(self.query.passengers),
        );
    }

    fn render_cabin(&self, frame: &mut Frame, area: Rect) {
        self.render_choice(
            frame,
            area,
            FormField::Cabin,
            self.query.cabin.label().to_string(),
        );
    }

    fn render_choice(&self, frame: &mut Frame, area: Rect, field: FormField, value: String) {
        let focused = self.focus == field;
        let (border_style, text_style) = if focused {
            (self.theme.field_focused, self.theme.field_focused)
        } else {
            (self.theme.label, self.theme.field)
        };
        let content = Paragraph::new(format!("< {value} >"))
            .style(text_style)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(field.label())
                    .border_style(border_style)
                    .title_style(border_style),
            );
        frame.render_widget(content, area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormField::Submit;
        let searching = self.phase.is_searching();
        let border_style = if focused && !searching {
            self.theme.field_focused
        } else {
            self.theme.label
        };

        let line = if searching {
            Line::from(vec![
                Span::styled(self.spinner_symbol(), self.theme.field_focused),
                Span::styled(" Searching...", self.theme.field_focused),
            ])
        } else {
            Line::from(Span::styled(
                FormField::Submit.label(),
                if focused {
                    self.theme.field_focused
                } else {
                    self.theme.field
                },
            ))
        };

        let button = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(border_style));
        frame.render_widget(button, area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let Some(snapshot) = &self.last_search else {
            return;
        };
        if area.height < 3 {
            return;
        }

        let query = snapshot.query();
        let mut lines = vec![Line::from(format!("Route       {}", snapshot.route()))];
        let dates = if query.trip_type == TripType::RoundTrip {
            format!(
                "Dates       {} to {}",
                query.departure_date, query.return_date
            )
        } else {
            format!("Dates       {} (one way)", query.departure_date)
        };
        lines.push(Line::from(dates));
        lines.push(Line::from(format!(
            "Travellers  {}, {}",
            passenger_label(query.passengers),
            query.cabin.label()
        )));

        let panel = Paragraph::new(lines).style(self.theme.summary).block(
            Block::bordered()
                .title("Search completed!")
                .border_style(self.theme.summary),
        );
        frame.render_widget(panel, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new("Tab move  Left/Right adjust  Enter submit  Esc quit")
            .style(self.theme.hint)
            .alignment(Alignment::Center);
        frame.render_widget(help, area);
    }

    fn spinner_symbol(&self) -> String {
        Throbber::default()
            .to_symbol_span(&self.throbber_state)
            .content
            .into_owned()
    }
}

fn radio_span(selected: bool, label: &str, style: ratatui::style::Style) -> Span<'static> {
    let marker = if selected { "(x)" } else { "( )" };
    Span::styled(format!("{marker} {label}"), style)
}

fn split_pair(area: Rect) -> [Rect; 2] {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    [halves[0], halves[1]]
}
