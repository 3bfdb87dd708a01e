use crate::{DataSource, Itinerary, LoadStatus, TravelRecord};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewModel {
    pub status: LoadStatus,
    pub source: DataSource,
    /// Present only while the last completed refresh succeeded.
    pub itinerary: Option<Itinerary>,
    /// Validated records behind `itinerary`, in fetch order.
    pub records: Vec<TravelRecord>,
    pub error: Option<String>,
    /// Rows dropped by validation in the last successful refresh.
    pub rejected_rows: usize,
    /// Number of failed attempts so far in the running refresh.
    pub failed_attempts: u32,
    pub dirty: bool,
}
