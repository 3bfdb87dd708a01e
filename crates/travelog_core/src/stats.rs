use std::collections::BTreeSet;

use serde::Serialize;

use crate::{categorize, Categorized, Reference, TravelRecord};

/// Summary figures for the hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Distinct countries among completed and current stays.
    pub countries: usize,
    /// Completed stays plus the current one.
    pub destinations: usize,
    /// Days since the earliest departure of any record.
    pub total_days: u64,
    /// Booked and potential future trips.
    pub upcoming: usize,
}

pub fn aggregate(records: &[TravelRecord], reference: &Reference) -> Stats {
    aggregate_categorized(records, &categorize(records, reference), reference)
}

/// Same as [`aggregate`] for callers that already hold the categories of `records`.
pub fn aggregate_categorized(
    records: &[TravelRecord],
    categorized: &Categorized,
    reference: &Reference,
) -> Stats {
    let countries = categorized
        .visited()
        .map(|record| record.country.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    Stats {
        countries,
        destinations: categorized.visited().count(),
        total_days: total_days(records, reference),
        upcoming: categorized.upcoming_count(),
    }
}

fn total_days(records: &[TravelRecord], reference: &Reference) -> u64 {
    records
        .iter()
        .map(|record| record.departure_date)
        .min()
        .map(|earliest| u64::try_from(reference.days_since(earliest)).unwrap_or(0))
        .unwrap_or(0)
}
