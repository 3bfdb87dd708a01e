use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Category, Reference, TravelRecord};

/// Criteria for narrowing a record list; unset criteria match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordFilter {
    /// Case-insensitive country names.
    pub countries: Vec<String>,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
    /// Keeps stays that end on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Keeps stays that begin on or before this date.
    pub end_date: Option<NaiveDate>,
    pub categories: Vec<Category>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &TravelRecord, reference: &Reference) -> bool {
        let country_ok = self.countries.is_empty()
            || self
                .countries
                .iter()
                .any(|country| country.trim().eq_ignore_ascii_case(&record.country));
        let min_ok = self.min_days.is_none_or(|min| record.days_at_place >= min);
        let max_ok = self.max_days.is_none_or(|max| record.days_at_place <= max);
        let start_ok = self.start_date.is_none_or(|start| record.departure_date >= start);
        let end_ok = self.end_date.is_none_or(|end| record.arrival_date <= end);
        let category_ok = self.categories.is_empty()
            || self
                .categories
                .contains(&Category::of(record, reference.today()));

        country_ok && min_ok && max_ok && start_ok && end_ok && category_ok
    }

    pub fn apply<'a>(
        &self,
        records: &'a [TravelRecord],
        reference: &Reference,
    ) -> Vec<&'a TravelRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, reference))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    ArrivalDate,
    DepartureDate,
    DaysAtPlace,
    Location,
    Country,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortOptions {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn compare(&self, a: &TravelRecord, b: &TravelRecord) -> Ordering {
        let ordering = match self.field {
            SortField::ArrivalDate => a.arrival_date.cmp(&b.arrival_date),
            SortField::DepartureDate => a.departure_date.cmp(&b.departure_date),
            SortField::DaysAtPlace => a.days_at_place.cmp(&b.days_at_place),
            SortField::Location => a.location.cmp(&b.location),
            SortField::Country => a.country.cmp(&b.country),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable sort: equal keys keep their input order.
    pub fn sort(&self, records: &mut [TravelRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reference, trip, RecordExt};

    fn sample() -> Vec<TravelRecord> {
        vec![
            trip("Lisbon", "2025-01-01", "2025-01-05", true).in_country("Portugal").staying(5),
            trip("Seville", "2025-02-01", "2025-02-02", true).in_country("Spain").staying(2),
            trip("Faro", "2025-03-01", "2025-03-10", false).in_country("portugal").staying(10),
        ]
    }

    fn names(records: &[&TravelRecord]) -> Vec<String> {
        records.iter().map(|r| r.location.clone()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = sample();
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&records, &reference("2025-01-15")).len(), 3);
    }

    #[test]
    fn criteria_combine() {
        let records = sample();
        let filter = RecordFilter {
            countries: vec!["PORTUGAL".to_string()],
            min_days: Some(6),
            ..RecordFilter::default()
        };
        assert_eq!(names(&filter.apply(&records, &reference("2025-01-15"))), ["Faro"]);

        let window = RecordFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 5),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            ..RecordFilter::default()
        };
        assert_eq!(
            names(&window.apply(&records, &reference("2025-01-15"))),
            ["Lisbon", "Seville"]
        );
    }

    #[test]
    fn category_filter_uses_reference() {
        let records = sample();
        let filter = RecordFilter {
            categories: vec![Category::Potential],
            ..RecordFilter::default()
        };
        assert_eq!(names(&filter.apply(&records, &reference("2025-01-15"))), ["Faro"]);
    }

    #[test]
    fn sort_is_stable_and_directional() {
        let mut records = sample();
        SortOptions {
            field: SortField::DaysAtPlace,
            direction: SortDirection::Desc,
        }
        .sort(&mut records);
        let order: Vec<_> = records.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(order, ["Faro", "Lisbon", "Seville"]);

        SortOptions {
            field: SortField::Location,
            direction: SortDirection::Asc,
        }
        .sort(&mut records);
        let order: Vec<_> = records.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(order, ["Faro", "Lisbon", "Seville"]);
    }
}
