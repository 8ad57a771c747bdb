use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Phase, side_field};
use crate::booking::{FieldUpdate, SearchOutcome, TripType};
use crate::suggest::Side;
use crate::ui::focus::FormField;

impl App<'_> {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<SearchOutcome>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(self.outcome()));
        }

        if self.phase.is_searching() {
            // The form is frozen while the search runs; only quitting works.
            if key.code == KeyCode::Esc {
                if let Phase::Searching(search) = &self.phase {
                    search.cancel();
                }
                return Ok(Some(self.outcome()));
            }
            return Ok(None);
        }

        if let Some(side) = self.open_popup_side() {
            match key.code {
                KeyCode::Esc => {
                    self.suggest_state_mut(side).open = false;
                    return Ok(None);
                }
                KeyCode::Down => {
                    self.move_popup_selection(side, 1);
                    return Ok(None);
                }
                KeyCode::Up => {
                    self.move_popup_selection(side, -1);
                    return Ok(None);
                }
                KeyCode::Enter => {
                    self.accept_suggestion(side);
                    return Ok(None);
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    // Close and fall through to the focus move below.
                    self.suggest_state_mut(side).open = false;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => return Ok(Some(self.outcome())),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            _ => self.handle_field_key(key),
        }
        Ok(None)
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        match self.focus {
            FormField::TripType => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => self.toggle_trip_type(),
                _ => {}
            },
            FormField::Origin => self.edit_autocomplete(Side::Origin, key),
            FormField::Destination => self.edit_autocomplete(Side::Destination, key),
            FormField::DepartureDate => {
                if self.departure_input.input(key) {
                    let date = self.departure_input.text().to_string();
                    self.query.apply(FieldUpdate::DepartureDate(date));
                }
            }
            FormField::ReturnDate => {
                if self.return_input.input(key) {
                    let date = self.return_input.text().to_string();
                    self.query.apply(FieldUpdate::ReturnDate(date));
                }
            }
            FormField::Passengers => match key.code {
                KeyCode::Left => self.adjust_passengers(-1),
                KeyCode::Right => self.adjust_passengers(1),
                _ => {}
            },
            FormField::Cabin => match key.code {
                KeyCode::Left => self.query.apply(FieldUpdate::Cabin(self.query.cabin.prev())),
                KeyCode::Right => self.query.apply(FieldUpdate::Cabin(self.query.cabin.next())),
                _ => {}
            },
            // Enter is handled before dispatch; nothing else to do here.
            FormField::Submit => {}
        }
    }

    fn edit_autocomplete(&mut self, side: Side, key: KeyEvent) {
        if !self.side_input_mut(side).input(key) {
            return;
        }
        // Typed text is not a selection; drop any stored airport.
        self.store_selection(side, None);
        self.request_suggestions(side);
    }

    fn toggle_trip_type(&mut self) {
        let next = self.query.trip_type.toggled();
        self.query.apply(FieldUpdate::TripType(next));
        if next == TripType::OneWay {
            self.return_input.set_text("");
        }
    }

    fn adjust_passengers(&mut self, delta: i8) {
        let count = self.query.passengers.saturating_add_signed(delta);
        self.query.apply(FieldUpdate::Passengers(count));
    }

    fn focus_next(&mut self) {
        self.focus = self.focus.next(self.query.trip_type);
    }

    fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.query.trip_type);
    }

    pub(crate) fn open_popup_side(&self) -> Option<Side> {
        [Side::Origin, Side::Destination]
            .into_iter()
            .find(|side| self.focus == side_field(*side) && self.suggest_state(*side).open)
    }

    fn move_popup_selection(&mut self, side: Side, delta: isize) {
        let state = self.suggest_state_mut(side);
        if state.candidates.is_empty() {
            return;
        }
        let last = state.candidates.len() as isize - 1;
        let next = (state.selected as isize + delta).clamp(0, last);
        state.selected = next as usize;
    }

    fn accept_suggestion(&mut self, side: Side) {
        let state = self.suggest_state_mut(side);
        state.open = false;
        let Some(airport) = state.candidates.get(state.selected).cloned() else {
            return;
        };
        let label = airport.label();
        self.side_input_mut(side).set_text(&label);
        self.store_selection(side, Some(airport));
    }
}
