use travelog_core::{Effect, Msg};
use travelog_engine::{EngineEvent, EngineHandle};
use travelog_logging::{travel_info, travel_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { request_id, source } => {
                    travel_info!("Refreshing travel data from {} (request {})", source, request_id);
                    self.engine.refresh(request_id, source);
                }
                Effect::Cancel { request_id } => {
                    travel_info!("Cancelling refresh {}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Blocks for the next engine event; `None` when the engine has shut down.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AttemptFailed {
            request_id,
            attempt,
            message,
            ..
        } => Msg::AttemptFailed {
            request_id,
            attempt,
            message,
        },
        EngineEvent::RefreshCompleted { request_id, result } => match result {
            Ok(output) => Msg::FetchSucceeded {
                request_id,
                rejected: output.rejected.len(),
                records: output.records,
                itinerary: output.itinerary,
            },
            Err(err) => {
                travel_warn!("Refresh {} failed after {} attempts: {}", request_id, err.attempts, err);
                Msg::FetchFailed {
                    request_id,
                    message: err.to_string(),
                }
            }
        },
    }
}
