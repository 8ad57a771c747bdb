use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use throbber_widgets_tui::ThrobberState;

use crate::booking::{Airport, BookingQuery, FieldUpdate, SearchOutcome, Snapshot, ValidationErrors};
use crate::suggest::{self, FetchCommand, FetchReply, LatestIds, Side, SuggestSource};
use crate::theme::{self, Theme};
use crate::ui::components::FieldInput;
use crate::ui::focus::FormField;
use crate::ui::search_task::DelayedSearch;

/// Notice shown under the autocomplete fields when no endpoint is set.
pub(crate) const OFFLINE_NOTICE: &str = "Suggestions unavailable (no endpoint configured)";

/// Presentation knobs resolved before the form starts.
pub struct FormOptions {
    pub title: String,
    pub theme: Theme,
    /// Simulated backend latency between a valid submit and its summary.
    pub search_delay: Duration,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            title: "SkyJourney Travel".to_string(),
            theme: theme::SLATE,
            search_delay: Duration::from_millis(1_500),
        }
    }
}

/// Where the form is in its submit lifecycle.
pub(crate) enum Phase {
    Idle,
    Searching(DelayedSearch),
}

impl Phase {
    pub(crate) fn is_searching(&self) -> bool {
        matches!(self, Self::Searching(_))
    }
}

/// Suggestion state carried independently per autocomplete side.
#[derive(Debug, Default)]
pub(crate) struct SuggestState {
    pub(crate) candidates: Vec<Airport>,
    pub(crate) selected: usize,
    pub(crate) open: bool,
    pub(crate) loading: bool,
    pub(crate) notice: Option<String>,
}

struct Fetcher {
    command_tx: Sender<FetchCommand>,
    reply_rx: Receiver<FetchReply>,
    latest: Arc<LatestIds>,
}

/// Run the booking form over the given suggestion source until the user
/// quits, returning what was submitted.
pub fn run<S: SuggestSource>(options: FormOptions, source: Option<S>) -> Result<SearchOutcome> {
    let mut app = App::new(options);
    if let Some(source) = source {
        app.attach_source(source);
    }
    app.run()
}

impl Drop for App<'_> {
    fn drop(&mut self) {
        if let Some(fetcher) = &self.fetcher {
            let _ = fetcher.command_tx.send(FetchCommand::Shutdown);
        }
    }
}

pub struct App<'a> {
    pub(crate) query: BookingQuery,
    pub(crate) focus: FormField,
    pub(crate) origin_input: FieldInput<'a>,
    pub(crate) destination_input: FieldInput<'a>,
    pub(crate) departure_input: FieldInput<'a>,
    pub(crate) return_input: FieldInput<'a>,
    pub(crate) origin_suggest: SuggestState,
    pub(crate) destination_suggest: SuggestState,
    pub(crate) errors: ValidationErrors,
    pub(crate) phase: Phase,
    pub(crate) last_search: Option<Snapshot>,
    pub(crate) title: String,
    pub(crate) theme: Theme,
    pub(crate) throbber_state: ThrobberState,
    search_delay: Duration,
    fetcher: Option<Fetcher>,
    next_fetch_id: u64,
}

impl<'a> App<'a> {
    pub fn new(options: FormOptions) -> Self {
        Self {
            query: BookingQuery::default(),
            focus: FormField::TripType,
            origin_input: FieldInput::new("City or airport"),
            destination_input: FieldInput::new("City or airport"),
            departure_input: FieldInput::new("YYYY-MM-DD"),
            return_input: FieldInput::new("YYYY-MM-DD"),
            origin_suggest: SuggestState::default(),
            destination_suggest: SuggestState::default(),
            errors: ValidationErrors::default(),
            phase: Phase::Idle,
            last_search: None,
            title: options.title,
            theme: options.theme,
            throbber_state: ThrobberState::default(),
            search_delay: options.search_delay,
            fetcher: None,
            next_fetch_id: 0,
        }
    }

    /// Wire a suggestion source, starting its background worker. Without
    /// one the form still works; the autocomplete fields show a notice.
    pub fn attach_source<S: SuggestSource>(&mut self, source: S) {
        let (command_tx, reply_rx, latest) = suggest::spawn(source);
        self.fetcher = Some(Fetcher {
            command_tx,
            reply_rx,
            latest,
        });
    }

    pub fn run(&mut self) -> Result<SearchOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let outcome = loop {
            self.pump_fetch_replies();
            self.pump_search();
            self.throbber_state.calc_next();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(outcome) = self.handle_key(key)? {
                            break outcome;
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        };

        ratatui::restore();
        Ok(outcome)
    }

    /// What the binary prints once the form exits.
    pub(crate) fn outcome(&mut self) -> SearchOutcome {
        SearchOutcome {
            submitted: self.last_search.take(),
        }
    }

    /// Issue a fetch for the side's current text. An empty term issues
    /// nothing and leaves the side's list and loading flag untouched.
    pub(crate) fn request_suggestions(&mut self, side: Side) {
        let term = self.side_input(side).text().trim().to_string();
        if term.is_empty() {
            return;
        }

        let Some(fetcher) = &self.fetcher else {
            self.suggest_state_mut(side).notice = Some(OFFLINE_NOTICE.to_string());
            return;
        };

        self.next_fetch_id = self.next_fetch_id.saturating_add(1);
        let id = self.next_fetch_id;
        fetcher.latest.store(side, id);
        let _ = fetcher.command_tx.send(FetchCommand::Fetch { id, side, term });
        self.suggest_state_mut(side).loading = true;
    }

    pub(crate) fn pump_fetch_replies(&mut self) {
        loop {
            let reply = match &self.fetcher {
                Some(fetcher) => match fetcher.reply_rx.try_recv() {
                    Ok(reply) => reply,
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                },
                None => break,
            };
            self.handle_fetch_reply(reply);
        }
    }

    /// Apply one worker reply, unless a newer request for the side has been
    /// issued since this one was sent.
    pub(crate) fn handle_fetch_reply(&mut self, reply: FetchReply) {
        let fresh = self
            .fetcher
            .as_ref()
            .is_some_and(|fetcher| fetcher.latest.load(reply.side) == reply.id);
        if !fresh {
            return;
        }

        let focused = self.focus == side_field(reply.side);
        let state = self.suggest_state_mut(reply.side);
        state.loading = false;
        match reply.outcome {
            Ok(candidates) => {
                state.notice = None;
                state.selected = 0;
                state.open = focused && !candidates.is_empty();
                state.candidates = candidates;
            }
            Err(error) => {
                // Keep whatever list was on screen; only surface the notice.
                state.notice = Some(error.to_string());
            }
        }
    }

    pub(crate) fn pump_search(&mut self) {
        let finished = match &self.phase {
            Phase::Searching(search) => search.try_finish(),
            Phase::Idle => None,
        };
        if let Some(snapshot) = finished {
            self.last_search = Some(snapshot);
            self.phase = Phase::Idle;
        }
    }

    /// Validate and, if clean, start the simulated search.
    pub(crate) fn submit(&mut self) {
        if self.phase.is_searching() {
            return;
        }
        self.errors = self.query.validate();
        if !self.errors.is_empty() {
            return;
        }
        self.origin_suggest.open = false;
        self.destination_suggest.open = false;
        let snapshot = Snapshot::new(self.query.clone());
        self.phase = Phase::Searching(DelayedSearch::schedule(snapshot, self.search_delay));
    }

    pub(crate) fn side_input(&self, side: Side) -> &FieldInput<'a> {
        match side {
            Side::Origin => &self.origin_input,
            Side::Destination => &self.destination_input,
        }
    }

    pub(crate) fn side_input_mut(&mut self, side: Side) -> &mut FieldInput<'a> {
        match side {
            Side::Origin => &mut self.origin_input,
            Side::Destination => &mut self.destination_input,
        }
    }

    pub(crate) fn suggest_state(&self, side: Side) -> &SuggestState {
        match side {
            Side::Origin => &self.origin_suggest,
            Side::Destination => &self.destination_suggest,
        }
    }

    pub(crate) fn suggest_state_mut(&mut self, side: Side) -> &mut SuggestState {
        match side {
            Side::Origin => &mut self.origin_suggest,
            Side::Destination => &mut self.destination_suggest,
        }
    }

    pub(crate) fn store_selection(&mut self, side: Side, airport: Option<Airport>) {
        let update = match side {
            Side::Origin => FieldUpdate::Origin(airport),
            Side::Destination => FieldUpdate::Destination(airport),
        };
        self.query.apply(update);
    }
}

/// The form field an autocomplete side belongs to.
pub(crate) fn side_field(side: Side) -> FormField {
    match side {
        Side::Origin => FormField::Origin,
        Side::Destination => FormField::Destination,
    }
}
