use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use travelog_core::{DataSource, RecordFilter, SortDirection, SortField, SortOptions};

use super::config::DEFAULT_CONFIG_FILENAME;
use super::logging::LogDestination;

/// Show past, current and planned destinations from the travel spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "travelog", version)]
pub struct Cli {
    /// Configuration file (RON); missing means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Which copy of the data to read: local, bucket or api.
    #[arg(long)]
    pub source: Option<DataSource>,

    /// Evaluate as of midnight UTC on this date instead of now (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Also print every record in one list.
    #[arg(long)]
    pub list: bool,

    /// Field used to order the list.
    #[arg(long, value_enum, default_value_t = SortArg::Arrival)]
    pub sort: SortArg,

    /// Order the list descending.
    #[arg(long)]
    pub desc: bool,

    /// Only include these countries (repeatable, case-insensitive).
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Drop repeated (location, arrival date) records.
    #[arg(long)]
    pub dedupe: bool,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// error, warn, info, debug or trace; overrides the config file.
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Arrival,
    Departure,
    Days,
    Location,
    Country,
}

impl Cli {
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            countries: self.countries.clone(),
            ..RecordFilter::default()
        }
    }

    pub fn sort_options(&self) -> SortOptions {
        let field = match self.sort {
            SortArg::Arrival => SortField::ArrivalDate,
            SortArg::Departure => SortField::DepartureDate,
            SortArg::Days => SortField::DaysAtPlace,
            SortArg::Location => SortField::Location,
            SortArg::Country => SortField::Country,
        };
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortOptions { field, direction }
    }
}
