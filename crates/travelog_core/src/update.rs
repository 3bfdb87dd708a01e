use travelog_logging::travel_debug;

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested { source } => {
            let superseded = state.in_flight();
            let request_id = state.begin_request(source);
            let mut effects = Vec::with_capacity(2);
            if let Some(request_id) = superseded {
                effects.push(Effect::Cancel { request_id });
            }
            effects.push(Effect::Fetch { request_id, source });
            effects
        }
        Msg::CancelRequested => match state.in_flight() {
            Some(request_id) => vec![Effect::Cancel { request_id }],
            None => Vec::new(),
        },
        Msg::AttemptFailed {
            request_id,
            attempt,
            message,
        } => {
            if state.is_current(request_id) {
                travel_debug!("Refresh {} attempt {} failed: {}", request_id, attempt, message);
                state.record_attempt_failure(attempt);
            }
            Vec::new()
        }
        Msg::FetchSucceeded {
            request_id,
            records,
            itinerary,
            rejected,
        } => {
            if state.is_current(request_id) {
                state.complete(records, itinerary, rejected);
            } else {
                travel_debug!("Ignoring stale result for refresh {}", request_id);
            }
            Vec::new()
        }
        Msg::FetchFailed {
            request_id,
            message,
        } => {
            if state.is_current(request_id) {
                state.fail(message);
            } else {
                travel_debug!("Ignoring stale failure for refresh {}", request_id);
            }
            Vec::new()
        }
    };

    (state, effects)
}
