use chrono::NaiveDate;

use crate::{Reference, TravelRecord, DATE_FORMAT};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

pub(crate) fn reference(today: &str) -> Reference {
    Reference::from_date(date(today))
}

pub(crate) fn trip(location: &str, arrival: &str, departure: &str, booked: bool) -> TravelRecord {
    let mut record = TravelRecord {
        location: location.to_string(),
        country: "Testland".to_string(),
        travel_time_to_here: String::new(),
        time_zone: String::new(),
        arrival_date: date(arrival),
        departure_date: date(departure),
        days_at_place: 0,
        booked,
        residing: false,
        coordinates: None,
        vacation_start: None,
        vacation_end: None,
    };
    record.days_at_place = record.inclusive_day_count();
    record
}

pub(crate) trait RecordExt {
    fn in_country(self, country: &str) -> Self;
    fn staying(self, days: u32) -> Self;
}

impl RecordExt for TravelRecord {
    fn in_country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    fn staying(mut self, days: u32) -> Self {
        self.days_at_place = days;
        self
    }
}
