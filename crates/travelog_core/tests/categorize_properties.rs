use chrono::{Days, NaiveDate};
use pretty_assertions::assert_eq;
use serde_json::json;
use travelog_core::{
    aggregate, categorize, validate_rows, Category, Itinerary, Reference, TravelRecord,
    ValidationMode,
};

/// Non-overlapping stays spread across two years, alternating booked flags.
fn itinerary_rows() -> Vec<serde_json::Value> {
    let stays = [
        ("Lisbon", "Portugal", "2024-01-03", "2024-01-20", "yes"),
        ("Porto", "Portugal", "2024-02-01", "2024-02-05", "no"),
        ("Madrid", "Spain", "2024-04-10", "2024-04-30", "TRUE"),
        ("Seville", "Spain", "2024-06-01", "2024-06-01", ""),
        ("Rome", "Italy", "2024-09-15", "2024-10-02", "1"),
        ("Naples", "Italy", "2025-01-05", "2025-01-09", "t"),
        ("Athens", "Greece", "2025-03-01", "2025-03-20", "0"),
        ("Kyoto", "Japan", "2025-06-01", "2025-06-30", "y"),
    ];
    stays
        .iter()
        .map(|(location, country, arrival, departure, booked)| {
            json!({
                "location": location,
                "country": country,
                "travelTimeToHere": "",
                "timeZone": "",
                "arrivalDate": arrival,
                "departureDate": departure,
                "daysAtPlace": "3",
                "booked": booked,
                "residing": "no",
            })
        })
        .collect()
}

fn records() -> Vec<TravelRecord> {
    let validated = validate_rows(&itinerary_rows(), ValidationMode::Lenient);
    assert!(validated.rejected.is_empty());
    validated.records
}

fn references() -> impl Iterator<Item = Reference> {
    let start = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
    (0..600u64)
        .step_by(7)
        .map(move |offset| Reference::from_date(start + Days::new(offset)))
}

#[test]
fn every_record_lands_in_exactly_one_bucket() {
    let records = records();
    for reference in references() {
        let categorized = categorize(&records, &reference);
        let total = categorized.already_traveled.len()
            + categorized.upcoming_booked.len()
            + categorized.potential.len()
            + usize::from(categorized.current_location.is_some());
        assert_eq!(total, records.len(), "at {:?}", reference.today());

        for record in &records {
            let expected = Category::of(record, reference.today());
            let found = match expected {
                Category::AlreadyTraveled => categorized.already_traveled.contains(record),
                Category::Current => categorized.current_location.as_ref() == Some(record),
                Category::UpcomingBooked => categorized.upcoming_booked.contains(record),
                Category::Potential => categorized.potential.contains(record),
            };
            assert!(found, "{} missing from {:?}", record.location, expected);
        }
    }
}

#[test]
fn buckets_keep_their_ordering() {
    let mut records = records();
    records.reverse();
    for reference in references() {
        let categorized = categorize(&records, &reference);
        assert!(categorized
            .already_traveled
            .windows(2)
            .all(|pair| pair[0].departure_date >= pair[1].departure_date));
        assert!(categorized
            .upcoming_booked
            .windows(2)
            .all(|pair| pair[0].arrival_date <= pair[1].arrival_date));
        assert!(categorized
            .potential
            .windows(2)
            .all(|pair| pair[0].arrival_date <= pair[1].arrival_date));
    }
}

#[test]
fn categorize_and_aggregate_are_deterministic() {
    let records = records();
    for reference in references() {
        let first = Itinerary::build(&records, &reference);
        let second = Itinerary::build(&records, &reference);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(aggregate(&records, &reference), first.stats);
    }
}

#[test]
fn stats_mid_itinerary() {
    let records = records();
    let reference = Reference::from_date(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
    let itinerary = Itinerary::build(&records, &reference);

    assert_eq!(
        itinerary.categories.current_location.as_ref().map(|r| r.location.as_str()),
        Some("Naples")
    );
    assert_eq!(itinerary.stats.destinations, 6);
    assert_eq!(itinerary.stats.countries, 3);
    assert_eq!(itinerary.stats.upcoming, 2);
    // 2024-01-20 to 2025-01-07
    assert_eq!(itinerary.stats.total_days, 353);
    let booked: Vec<_> = itinerary
        .categories
        .upcoming_booked
        .iter()
        .map(|r| r.location.as_str())
        .collect();
    assert_eq!(booked, ["Kyoto"]);
}
