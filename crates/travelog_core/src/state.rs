use crate::view_model::ViewModel;
use crate::{DataSource, Itinerary, TravelRecord};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    status: LoadStatus,
    source: DataSource,
    next_request_id: RequestId,
    in_flight: Option<RequestId>,
    itinerary: Option<Itinerary>,
    records: Vec<TravelRecord>,
    error: Option<String>,
    rejected_rows: usize,
    failed_attempts: u32,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            status: self.status,
            source: self.source,
            itinerary: self.itinerary.clone(),
            records: self.records.clone(),
            error: self.error.clone(),
            rejected_rows: self.rejected_rows,
            failed_attempts: self.failed_attempts,
            dirty: self.dirty,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns whether the view changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_request(&mut self, source: DataSource) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(request_id);
        self.source = source;
        self.status = LoadStatus::Loading;
        self.error = None;
        self.failed_attempts = 0;
        self.dirty = true;
        request_id
    }

    pub(crate) fn is_current(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    pub(crate) fn record_attempt_failure(&mut self, attempt: u32) {
        self.failed_attempts = attempt;
        self.dirty = true;
    }

    pub(crate) fn complete(
        &mut self,
        records: Vec<TravelRecord>,
        itinerary: Itinerary,
        rejected_rows: usize,
    ) {
        self.in_flight = None;
        self.status = LoadStatus::Ready;
        self.records = records;
        self.itinerary = Some(itinerary);
        self.rejected_rows = rejected_rows;
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.in_flight = None;
        self.status = LoadStatus::Failed;
        self.itinerary = None;
        self.records.clear();
        self.rejected_rows = 0;
        self.error = Some(message);
        self.dirty = true;
    }
}
