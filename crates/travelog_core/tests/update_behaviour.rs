use std::sync::Once;

use chrono::NaiveDate;
use travelog_core::{
    update, AppState, DataSource, Effect, Itinerary, LoadStatus, Msg, Reference, TravelRecord,
    ValidationMode,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(travelog_logging::initialize_for_tests);
}

fn sample_records() -> Vec<TravelRecord> {
    let row = serde_json::json!({
        "location": "Lisbon", "country": "Portugal",
        "travelTimeToHere": "8 hours", "timeZone": "GMT+1",
        "arrivalDate": "2025-01-01", "departureDate": "2025-01-10",
        "daysAtPlace": 10, "booked": true, "residing": true
    });
    vec![TravelRecord::from_value(&row, ValidationMode::Strict).unwrap()]
}

fn sample_itinerary() -> Itinerary {
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    Itinerary::build(&sample_records(), &Reference::from_date(today))
}

fn refresh(state: AppState, source: DataSource) -> (AppState, Vec<Effect>) {
    update(state, Msg::RefreshRequested { source })
}

#[test]
fn refresh_starts_loading_and_emits_fetch() {
    init_logging();
    let (mut state, effects) = refresh(AppState::new(), DataSource::Api);

    assert_eq!(
        effects,
        vec![Effect::Fetch {
            request_id: 1,
            source: DataSource::Api
        }]
    );
    let view = state.view();
    assert_eq!(view.status, LoadStatus::Loading);
    assert_eq!(view.source, DataSource::Api);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn success_moves_to_ready_with_itinerary() {
    init_logging();
    let (state, _effects) = refresh(AppState::new(), DataSource::Local);
    let (state, effects) = update(
        state,
        Msg::FetchSucceeded {
            request_id: 1,
            records: sample_records(),
            itinerary: sample_itinerary(),
            rejected: 2,
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.status, LoadStatus::Ready);
    assert_eq!(view.rejected_rows, 2);
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.itinerary.unwrap().stats.destinations, 1);
    assert_eq!(state.in_flight(), None);
}

#[test]
fn failure_drops_previous_itinerary() {
    init_logging();
    let (state, _effects) = refresh(AppState::new(), DataSource::Local);
    let (state, _effects) = update(
        state,
        Msg::FetchSucceeded {
            request_id: 1,
            records: sample_records(),
            itinerary: sample_itinerary(),
            rejected: 0,
        },
    );
    let (state, _effects) = refresh(state, DataSource::Local);
    assert!(state.view().itinerary.is_some(), "kept while reloading");

    let (state, _effects) = update(
        state,
        Msg::FetchFailed {
            request_id: 2,
            message: "http status 503".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(view.status, LoadStatus::Failed);
    assert_eq!(view.itinerary, None);
    assert!(view.records.is_empty());
    assert_eq!(view.error.as_deref(), Some("http status 503"));
}

#[test]
fn attempt_failures_are_counted_then_reset() {
    init_logging();
    let (state, _effects) = refresh(AppState::new(), DataSource::Bucket);
    let (state, _effects) = update(
        state,
        Msg::AttemptFailed {
            request_id: 1,
            attempt: 1,
            message: "network error".to_string(),
        },
    );
    assert_eq!(state.view().failed_attempts, 1);
    assert_eq!(state.view().status, LoadStatus::Loading);
    assert_eq!(state.view().error, None);

    let (state, _effects) = refresh(state, DataSource::Bucket);
    assert_eq!(state.view().failed_attempts, 0);
}

#[test]
fn second_refresh_cancels_first_and_ignores_its_result() {
    init_logging();
    let (state, _effects) = refresh(AppState::new(), DataSource::Local);
    let (state, effects) = refresh(state, DataSource::Api);
    assert_eq!(
        effects,
        vec![
            Effect::Cancel { request_id: 1 },
            Effect::Fetch {
                request_id: 2,
                source: DataSource::Api
            },
        ]
    );

    let (mut state, _effects) = update(
        state,
        Msg::FetchFailed {
            request_id: 1,
            message: "cancelled".to_string(),
        },
    );
    assert_eq!(state.view().status, LoadStatus::Loading);
    assert_eq!(state.in_flight(), Some(2));
    assert!(state.consume_dirty());

    let (mut state, _effects) = update(
        state,
        Msg::FetchSucceeded {
            request_id: 1,
            records: sample_records(),
            itinerary: sample_itinerary(),
            rejected: 0,
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.view().itinerary, None);
}

#[test]
fn cancel_only_applies_while_loading() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::CancelRequested);
    assert!(effects.is_empty());

    let (state, _effects) = refresh(AppState::new(), DataSource::Local);
    let (_state, effects) = update(state, Msg::CancelRequested);
    assert_eq!(effects, vec![Effect::Cancel { request_id: 1 }]);
}
