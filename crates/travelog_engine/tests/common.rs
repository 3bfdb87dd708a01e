#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use travelog_core::DataSource;
use travelog_engine::{FetchEvent, FetchEventSink, FetchRequest, SourceUrls};

#[derive(Default, Clone)]
pub struct TestSink {
    events: Arc<Mutex<Vec<FetchEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<FetchEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl FetchEventSink for TestSink {
    fn emit(&self, event: FetchEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn urls_for(server_uri: &str) -> SourceUrls {
    SourceUrls {
        local: format!("{server_uri}/travel-data.json"),
        bucket: format!("{server_uri}/bucket/travel-data.json"),
        api: format!("{server_uri}/api/travel-data"),
    }
}

pub fn api_request(server_uri: &str) -> FetchRequest {
    urls_for(server_uri).request(DataSource::Api).unwrap()
}

pub fn row(location: &str, arrival: &str, departure: &str, booked: &str) -> Value {
    json!({
        "location": location,
        "country": "Portugal",
        "travelTimeToHere": "2 hours",
        "timeZone": "GMT",
        "arrivalDate": arrival,
        "departureDate": departure,
        "daysAtPlace": "4",
        "booked": booked,
        "residing": "",
        "lat": "38.7",
        "lon": "-9.1"
    })
}
