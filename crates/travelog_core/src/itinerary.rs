use serde::Serialize;

use crate::{aggregate_categorized, categorize, Categorized, Reference, Stats, TravelRecord};

/// Everything the presentation layer needs from one fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(flatten)]
    pub categories: Categorized,
    pub stats: Stats,
}

impl Itinerary {
    pub fn build(records: &[TravelRecord], reference: &Reference) -> Self {
        let categories = categorize(records, reference);
        let stats = aggregate_categorized(records, &categories, reference);
        Self { categories, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reference, trip};
    use pretty_assertions::assert_eq;

    #[test]
    fn january_scenario() {
        let records = vec![
            trip("First", "2025-01-01", "2025-01-10", true),
            trip("Second", "2025-02-01", "2025-02-05", false),
        ];
        let itinerary = Itinerary::build(&records, &reference("2025-01-15"));

        assert_eq!(itinerary.categories.already_traveled, vec![records[0].clone()]);
        assert_eq!(itinerary.categories.current_location, None);
        assert!(itinerary.categories.upcoming_booked.is_empty());
        assert_eq!(itinerary.categories.potential, vec![records[1].clone()]);
        assert_eq!(itinerary.stats.destinations, 1);
        assert_eq!(itinerary.stats.upcoming, 1);
    }

    #[test]
    fn building_twice_is_identical() {
        let records = vec![
            trip("A", "2024-12-01", "2024-12-31", true),
            trip("B", "2025-01-10", "2025-01-20", false),
            trip("C", "2025-04-01", "2025-04-03", true),
        ];
        let first = Itinerary::build(&records, &reference("2025-01-15"));
        let second = Itinerary::build(&records, &reference("2025-01-15"));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
