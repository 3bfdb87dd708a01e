#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User asked for fresh data from a source.
    RefreshRequested { source: crate::DataSource },
    /// User asked to abandon the in-flight refresh.
    CancelRequested,
    /// Engine reported a failed attempt that will be retried.
    AttemptFailed {
        request_id: crate::RequestId,
        attempt: u32,
        message: String,
    },
    /// Engine delivered a validated, categorized record set.
    FetchSucceeded {
        request_id: crate::RequestId,
        records: Vec<crate::TravelRecord>,
        itinerary: crate::Itinerary,
        rejected: usize,
    },
    /// Engine gave up on a refresh.
    FetchFailed {
        request_id: crate::RequestId,
        message: String,
    },
}
