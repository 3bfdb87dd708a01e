use serde_json::Value;
use travelog_logging::travel_warn;

use crate::{RecordError, TravelRecord, ValidationMode};

/// A fetched row that could not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub error: RecordError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validated {
    /// Accepted records in input order.
    pub records: Vec<TravelRecord>,
    pub rejected: Vec<Rejection>,
}

/// Parses every row, logging and excluding the malformed ones.
pub fn validate_rows(rows: &[Value], mode: ValidationMode) -> Validated {
    let mut validated = Validated::default();
    for (index, row) in rows.iter().enumerate() {
        match TravelRecord::from_value(row, mode) {
            Ok(record) => validated.records.push(record),
            Err(error) => {
                travel_warn!("Excluding row {}: {}", index, error);
                validated.rejected.push(Rejection { index, error });
            }
        }
    }
    validated
}
