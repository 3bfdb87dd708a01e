//! Travelog core: record model, categorization, statistics and the refresh state machine.
//!
//! Everything here is synchronous and pure over its inputs; fetching lives in
//! `travelog_engine`.
mod categorize;
mod effect;
mod itinerary;
mod msg;
mod query;
mod record;
mod reference;
mod source;
mod state;
mod stats;
mod update;
mod validate;
mod view_model;

#[cfg(test)]
mod test_support;

pub use categorize::{categorize, Categorized, Category};
pub use effect::Effect;
pub use itinerary::Itinerary;
pub use msg::Msg;
pub use query::{RecordFilter, SortDirection, SortField, SortOptions};
pub use record::{
    dedupe_by_key, is_travel_record, normalize_flag, Coordinates, RecordError, RecordKey,
    TravelRecord, ValidationMode, DATE_FORMAT, LONG_STAY_DAYS,
};
pub use reference::Reference;
pub use source::DataSource;
pub use state::{AppState, LoadStatus, RequestId};
pub use stats::{aggregate, aggregate_categorized, Stats};
pub use update::update;
pub use validate::{validate_rows, Rejection, Validated};
pub use view_model::ViewModel;
