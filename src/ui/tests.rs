use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, FormOptions, OFFLINE_NOTICE, Phase};
use super::focus::FormField;
use crate::booking::{Airport, FieldUpdate, Snapshot, TripType};
use crate::suggest::{FetchReply, Side, SuggestError, SuggestSource};

struct ScriptedSource {
    responses: HashMap<String, Vec<Airport>>,
}

impl ScriptedSource {
    fn new<const N: usize>(entries: [(&str, Vec<Airport>); N]) -> Self {
        Self {
            responses: entries
                .into_iter()
                .map(|(term, airports)| (term.to_string(), airports))
                .collect(),
        }
    }
}

impl SuggestSource for ScriptedSource {
    fn search(&self, term: &str) -> Result<Vec<Airport>, SuggestError> {
        Ok(self.responses.get(term).cloned().unwrap_or_default())
    }
}

fn heathrow() -> Airport {
    Airport {
        municipality: "London".into(),
        name: "Heathrow".into(),
        iata_code: "LHR".into(),
    }
}

fn jfk() -> Airport {
    Airport {
        municipality: "New York".into(),
        name: "John F. Kennedy".into(),
        iata_code: "JFK".into(),
    }
}

fn options(delay: Duration) -> FormOptions {
    FormOptions {
        search_delay: delay,
        ..FormOptions::default()
    }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::from(code)).expect("key handling");
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn fill_valid_one_way(app: &mut App) {
    app.query.apply(FieldUpdate::TripType(TripType::OneWay));
    app.query.apply(FieldUpdate::Origin(Some(jfk())));
    app.query.apply(FieldUpdate::Destination(Some(heathrow())));
    app.query
        .apply(FieldUpdate::DepartureDate("2025-07-10".into()));
}

fn wait_for(app: &mut App, mut done: impl FnMut(&App) -> bool, what: &str) {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        app.pump_fetch_replies();
        app.pump_search();
        if done(app) {
            return;
        }
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn typing_populates_only_that_sides_suggestions() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.attach_source(ScriptedSource::new([("lon", vec![heathrow()])]));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, FormField::Origin);
    type_text(&mut app, "lon");

    wait_for(
        &mut app,
        |app| !app.origin_suggest.candidates.is_empty(),
        "origin suggestions",
    );

    assert_eq!(app.origin_suggest.candidates, vec![heathrow()]);
    assert!(app.origin_suggest.open);
    assert!(!app.origin_suggest.loading);
    assert!(app.origin_suggest.notice.is_none());
    assert!(app.destination_suggest.candidates.is_empty());
    assert!(!app.destination_suggest.loading);
}

#[test]
fn accepting_a_suggestion_fills_the_draft_and_editing_clears_it() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.attach_source(ScriptedSource::new([("lon", vec![heathrow()])]));

    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "lon");
    wait_for(&mut app, |app| app.origin_suggest.open, "suggestion popup");

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.query.origin, Some(heathrow()));
    assert_eq!(app.origin_input.text(), "London - Heathrow (LHR)");
    assert!(!app.origin_suggest.open);

    // Any further edit turns the selection back into free text.
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.query.origin, None);
}

#[test]
fn empty_term_never_issues_a_fetch() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.attach_source(ScriptedSource::new([]));

    app.origin_suggest.candidates = vec![heathrow()];
    app.request_suggestions(Side::Origin);
    assert_eq!(app.origin_suggest.candidates, vec![heathrow()]);
    assert!(!app.origin_suggest.loading);

    app.origin_input.set_text("   ");
    app.request_suggestions(Side::Origin);
    assert_eq!(app.origin_suggest.candidates, vec![heathrow()]);
    assert!(!app.origin_suggest.loading);
}

#[test]
fn typing_without_an_endpoint_surfaces_the_offline_notice() {
    let mut app = App::new(options(Duration::from_millis(1_500)));

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('l'));

    assert_eq!(app.origin_suggest.notice.as_deref(), Some(OFFLINE_NOTICE));
    assert!(!app.origin_suggest.loading);
    assert!(app.origin_suggest.candidates.is_empty());
}

#[test]
fn stale_reply_is_discarded_even_when_it_arrives_last() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.attach_source(ScriptedSource::new([]));
    press(&mut app, KeyCode::Tab);

    app.origin_input.set_text("par");
    app.request_suggestions(Side::Origin);
    app.origin_input.set_text("lon");
    app.request_suggestions(Side::Origin);

    app.handle_fetch_reply(FetchReply {
        id: 1,
        side: Side::Origin,
        outcome: Ok(vec![jfk()]),
    });
    assert!(
        app.origin_suggest.candidates.is_empty(),
        "superseded reply must not be applied"
    );
    assert!(app.origin_suggest.loading, "newest request is still pending");

    app.handle_fetch_reply(FetchReply {
        id: 2,
        side: Side::Origin,
        outcome: Ok(vec![heathrow()]),
    });
    assert_eq!(app.origin_suggest.candidates, vec![heathrow()]);
    assert!(!app.origin_suggest.loading);
}

#[test]
fn error_reply_keeps_the_list_and_surfaces_a_notice() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.attach_source(ScriptedSource::new([]));
    press(&mut app, KeyCode::Tab);

    app.origin_input.set_text("lon");
    app.request_suggestions(Side::Origin);
    app.handle_fetch_reply(FetchReply {
        id: 1,
        side: Side::Origin,
        outcome: Ok(vec![heathrow()]),
    });

    app.origin_input.set_text("lond");
    app.request_suggestions(Side::Origin);
    app.handle_fetch_reply(FetchReply {
        id: 2,
        side: Side::Origin,
        outcome: Err(SuggestError::Http { status: 502 }),
    });

    assert_eq!(app.origin_suggest.candidates, vec![heathrow()]);
    assert!(!app.origin_suggest.loading);
    let notice = app.origin_suggest.notice.as_deref().expect("notice");
    assert!(notice.contains("502"), "notice names the status: {notice}");

    // The next applied reply clears the notice again.
    app.origin_input.set_text("londo");
    app.request_suggestions(Side::Origin);
    app.handle_fetch_reply(FetchReply {
        id: 3,
        side: Side::Origin,
        outcome: Ok(Vec::new()),
    });
    assert!(app.origin_suggest.notice.is_none());
}

#[test]
fn invalid_submit_reports_errors_and_stays_idle() {
    let mut app = App::new(options(Duration::from_millis(10)));

    press(&mut app, KeyCode::Enter);

    assert_eq!(app.errors.len(), 4);
    assert!(matches!(app.phase, Phase::Idle));
    assert!(app.last_search.is_none());
}

#[test]
fn valid_submit_searches_then_idles_with_the_snapshot() {
    let mut app = App::new(options(Duration::from_millis(10)));
    fill_valid_one_way(&mut app);

    app.submit();
    assert!(app.errors.is_empty());
    assert!(app.phase.is_searching());

    wait_for(&mut app, |app| !app.phase.is_searching(), "search completion");
    let snapshot = app.last_search.as_ref().expect("snapshot");
    assert_eq!(snapshot.route(), "JFK -> LHR");
    assert_eq!(snapshot.query().departure_date, "2025-07-10");
}

#[test]
fn input_is_frozen_while_searching() {
    let mut app = App::new(options(Duration::from_secs(30)));
    fill_valid_one_way(&mut app);
    app.submit();
    assert!(app.phase.is_searching());

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('z'));

    assert!(app.phase.is_searching());
    assert_eq!(app.focus, FormField::TripType);
    assert_eq!(app.query.origin, Some(jfk()));
}

#[test]
fn one_way_toggle_clears_the_return_date_everywhere() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.return_input.set_text("2025-12-24");
    app.query
        .apply(FieldUpdate::ReturnDate("2025-12-24".into()));

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.query.trip_type, TripType::OneWay);
    assert!(app.query.return_date.is_empty());
    assert_eq!(app.return_input.text(), "");

    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.query.trip_type, TripType::RoundTrip);
    assert!(app.query.return_date.is_empty());
}

#[test]
fn focus_cycle_skips_the_return_date_under_one_way() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    press(&mut app, KeyCode::Char(' '));

    for _ in 0..4 {
        press(&mut app, KeyCode::Tab);
    }
    assert_eq!(app.focus, FormField::Passengers);

    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.focus, FormField::DepartureDate);
}

#[test]
fn passengers_and_cabin_adjust_with_arrow_keys() {
    let mut app = App::new(options(Duration::from_millis(1_500)));

    app.focus = FormField::Passengers;
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.query.passengers, 3);
    for _ in 0..7 {
        press(&mut app, KeyCode::Right);
    }
    assert_eq!(app.query.passengers, 6, "count clamps at the maximum");
    for _ in 0..9 {
        press(&mut app, KeyCode::Left);
    }
    assert_eq!(app.query.passengers, 1, "count clamps at the minimum");

    app.focus = FormField::Cabin;
    press(&mut app, KeyCode::Right);
    assert_eq!(app.query.cabin.as_str(), "premium");
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.query.cabin.as_str(), "first", "cycling wraps");
}

#[test]
fn quitting_hands_back_the_last_snapshot() {
    let mut app = App::new(options(Duration::from_millis(10)));
    fill_valid_one_way(&mut app);
    app.submit();
    wait_for(&mut app, |app| !app.phase.is_searching(), "search completion");

    let outcome = app
        .handle_key(KeyEvent::from(KeyCode::Esc))
        .expect("key handling")
        .expect("quit outcome");
    let snapshot = outcome.submitted.expect("submitted snapshot");
    assert_eq!(snapshot.route(), "JFK -> LHR");
}

#[test]
fn draw_renders_form_errors_popup_and_summary() {
    let mut app = App::new(options(Duration::from_millis(1_500)));
    app.errors = app.query.validate();
    app.focus = FormField::Origin;
    app.origin_suggest.candidates = vec![heathrow()];
    app.origin_suggest.open = true;
    let mut submitted = app.query.clone();
    fill_valid_one_way(&mut app);
    std::mem::swap(&mut submitted, &mut app.query);
    app.last_search = Some(Snapshot::new(submitted));

    let mut terminal = Terminal::new(TestBackend::new(90, 30)).expect("terminal");
    terminal.draw(|frame| app.draw(frame)).expect("draw");

    let view = terminal.backend().to_string();
    assert!(view.contains("SkyJourney Travel"));
    assert!(view.contains("Trip Type"));
    assert!(view.contains("Search Flights"));
    // The open popup covers the origin notice row; the other errors stay
    // visible around it.
    assert!(view.contains("Please enter a destination city"));
    assert!(view.contains("Please select a departure date"));
    assert!(view.contains("London - Heathrow (LHR)"));
    assert!(view.contains("Search completed!"));
    assert!(view.contains("JFK -> LHR"));
}

#[test]
fn draw_shows_the_busy_button_while_searching() {
    let mut app = App::new(options(Duration::from_secs(30)));
    fill_valid_one_way(&mut app);
    app.submit();
    app.throbber_state.calc_next();

    let mut terminal = Terminal::new(TestBackend::new(90, 30)).expect("terminal");
    terminal.draw(|frame| app.draw(frame)).expect("draw");

    let view = terminal.backend().to_string();
    assert!(view.contains("Searching..."));
    assert!(!view.contains("Search Flights"));
}
