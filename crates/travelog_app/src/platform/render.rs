use std::fmt::Write as _;

use serde::Serialize;
use travelog_core::{Itinerary, SortOptions, TravelRecord, ViewModel};

/// Plain-text summary of a successful refresh.
pub fn render_text(itinerary: &Itinerary, rejected_rows: usize) -> String {
    let mut out = String::new();
    let categories = &itinerary.categories;
    let stats = &itinerary.stats;

    match &categories.current_location {
        Some(record) => {
            let _ = writeln!(out, "Currently in {}", describe(record));
        }
        None => out.push_str("Currently between destinations\n"),
    }
    let _ = writeln!(
        out,
        "{} destinations in {} countries, {} days on the road, {} upcoming",
        stats.destinations, stats.countries, stats.total_days, stats.upcoming
    );

    section(&mut out, "Already traveled", &categories.already_traveled);
    section(&mut out, "Upcoming (booked)", &categories.upcoming_booked);
    section(&mut out, "Potential", &categories.potential);

    if rejected_rows > 0 {
        let _ = writeln!(out, "\n{rejected_rows} rows skipped by validation");
    }
    out
}

/// Every record in one list, ordered by `sort`.
pub fn render_list(records: &[TravelRecord], sort: SortOptions) -> String {
    let mut sorted = records.to_vec();
    sort.sort(&mut sorted);
    let mut out = String::new();
    for record in &sorted {
        let _ = writeln!(out, "{}", describe(record));
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    itinerary: &'a Itinerary,
    rejected_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<TravelRecord>>,
}

pub fn render_json(
    itinerary: &Itinerary,
    rejected_rows: usize,
    list: Option<(&[TravelRecord], SortOptions)>,
) -> Result<String, serde_json::Error> {
    let records = list.map(|(records, sort)| {
        let mut sorted = records.to_vec();
        sort.sort(&mut sorted);
        sorted
    });
    serde_json::to_string_pretty(&JsonReport {
        itinerary,
        rejected_rows,
        records,
    })
}

/// One-line progress note while a refresh is retrying.
pub fn render_progress(view: &ViewModel) -> Option<String> {
    (view.failed_attempts > 0).then(|| {
        format!(
            "Attempt {} against {} failed, retrying...",
            view.failed_attempts, view.source
        )
    })
}

fn section(out: &mut String, title: &str, records: &[TravelRecord]) {
    let _ = writeln!(out, "\n{title} ({})", records.len());
    for record in records {
        let _ = writeln!(out, "  {}", describe(record));
    }
}

fn describe(record: &TravelRecord) -> String {
    let mut line = format!(
        "{}, {} ({} to {}, {} days)",
        record.location,
        record.country,
        record.arrival_date,
        record.departure_date,
        record.days_at_place
    );
    if record.residing {
        line.push_str(" [home base]");
    } else if record.is_long_stay() {
        line.push_str(" [long stay]");
    }
    line
}
