use crate::{DataSource, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start fetching, validating and categorizing records from `source`.
    Fetch {
        request_id: RequestId,
        source: DataSource,
    },
    /// Abandon an in-flight fetch.
    Cancel { request_id: RequestId },
}
