use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Reference, TravelRecord};

/// Time relationship of a record to the reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AlreadyTraveled,
    Current,
    UpcomingBooked,
    Potential,
}

impl Category {
    /// Classifies a single record on its own.
    ///
    /// Overlapping stays may each report `Current` here; [`categorize`] surfaces
    /// only the first of them.
    pub fn of(record: &TravelRecord, today: NaiveDate) -> Self {
        if record.departure_date < today {
            Category::AlreadyTraveled
        } else if record.arrival_date <= today {
            Category::Current
        } else if record.booked {
            Category::UpcomingBooked
        } else {
            Category::Potential
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorized {
    /// Most recently departed first.
    pub already_traveled: Vec<TravelRecord>,
    pub current_location: Option<TravelRecord>,
    /// Soonest arrival first.
    pub upcoming_booked: Vec<TravelRecord>,
    /// Soonest arrival first.
    pub potential: Vec<TravelRecord>,
}

impl Categorized {
    pub fn upcoming_count(&self) -> usize {
        self.upcoming_booked.len() + self.potential.len()
    }

    /// Completed trips plus the current stay, if any.
    pub fn visited(&self) -> impl Iterator<Item = &TravelRecord> {
        self.already_traveled.iter().chain(self.current_location.as_ref())
    }
}

/// Partitions records by their relation to the reference day in one pass.
///
/// The first record in input order whose stay includes today becomes the
/// current location. Any further overlapping stay is left out of all buckets.
pub fn categorize(records: &[TravelRecord], reference: &Reference) -> Categorized {
    let today = reference.today();
    let mut out = Categorized::default();

    for record in records {
        match Category::of(record, today) {
            Category::AlreadyTraveled => out.already_traveled.push(record.clone()),
            Category::Current => {
                if out.current_location.is_none() {
                    out.current_location = Some(record.clone());
                }
            }
            Category::UpcomingBooked => out.upcoming_booked.push(record.clone()),
            Category::Potential => out.potential.push(record.clone()),
        }
    }

    out.already_traveled
        .sort_by(|a, b| b.departure_date.cmp(&a.departure_date));
    out.upcoming_booked.sort_by_key(|record| record.arrival_date);
    out.potential.sort_by_key(|record| record.arrival_date);
    out
}
