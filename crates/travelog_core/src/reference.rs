use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// The instant every categorization and aggregation pass is evaluated against.
///
/// Record dates carry no time of day; they are read as midnight UTC. The
/// calendar day used for categorization is the UTC date of the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference {
    instant: DateTime<Utc>,
}

impl Reference {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Midnight UTC at the start of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(midnight_utc(date))
    }

    pub fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    /// Whole days elapsed since midnight UTC of `date`, rounded up.
    ///
    /// Negative when `date` lies in the future.
    pub fn days_since(&self, date: NaiveDate) -> i64 {
        let elapsed: TimeDelta = self.instant - midnight_utc(date);
        let millis = elapsed.num_milliseconds();
        let days = millis.div_euclid(MILLIS_PER_DAY);
        if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
            days
        } else {
            days + 1
        }
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn midnight_reference_counts_exact_days() {
        let reference = Reference::from_date(date("2025-01-15"));
        assert_eq!(reference.days_since(date("2025-01-10")), 5);
        assert_eq!(reference.days_since(date("2025-01-15")), 0);
        assert_eq!(reference.days_since(date("2025-01-20")), -5);
    }

    #[test]
    fn partial_days_round_up() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let reference = Reference::new(instant);
        assert_eq!(reference.today(), date("2025-01-15"));
        assert_eq!(reference.days_since(date("2025-01-10")), 6);
        assert_eq!(reference.days_since(date("2025-01-16")), 0);
    }
}
