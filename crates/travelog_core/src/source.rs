use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which published copy of the travel data to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Static JSON file served next to the site.
    #[default]
    Local,
    /// JSON file published to an object-store bucket.
    Bucket,
    /// Live endpoint backed by the spreadsheet.
    Api,
}

impl DataSource {
    pub const ALL: [DataSource; 3] = [DataSource::Local, DataSource::Bucket, DataSource::Api];

    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Local => "local",
            DataSource::Bucket => "bucket",
            DataSource::Api => "api",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DataSource::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown data source {s:?} (expected local, bucket or api)"))
    }
}
