use tokio_util::sync::CancellationToken;
use travelog_core::{
    dedupe_by_key, validate_rows, Itinerary, RecordFilter, Reference, ValidationMode,
};
use travelog_logging::{travel_info, travel_warn};

use crate::retry::{fetch_with_retry, FetchEventSink};
use crate::{FetchError, FetchRequest, FetchSettings, PipelineOutput, RowFetcher};

/// What happens to rows between fetching and categorizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub validation: ValidationMode,
    /// Keep only the first record per `(location, arrivalDate)`.
    pub dedupe: bool,
    pub filter: RecordFilter,
}

/// Fetch, validate, categorize and aggregate in one run.
///
/// Only the fetch can fail; malformed rows are reported in
/// [`PipelineOutput::rejected`] and left out of the itinerary.
pub async fn run_pipeline(
    fetcher: &dyn RowFetcher,
    request: &FetchRequest,
    settings: &FetchSettings,
    options: &PipelineOptions,
    reference: Reference,
    cancel: &CancellationToken,
    sink: &dyn FetchEventSink,
) -> Result<PipelineOutput, FetchError> {
    let (rows, attempts) = fetch_with_retry(fetcher, request, settings, cancel, sink).await?;

    let validated = validate_rows(&rows, options.validation);
    if !validated.rejected.is_empty() {
        travel_warn!(
            "{} of {} rows were rejected by validation",
            validated.rejected.len(),
            rows.len()
        );
    }

    let mut records = validated.records;
    if options.dedupe {
        let before = records.len();
        records = dedupe_by_key(records);
        if records.len() != before {
            travel_info!("Dropped {} duplicate records", before - records.len());
        }
    }
    if !options.filter.is_empty() {
        records.retain(|record| options.filter.matches(record, &reference));
    }

    let itinerary = Itinerary::build(&records, &reference);
    Ok(PipelineOutput {
        records,
        itinerary,
        rejected: validated.rejected,
        attempts,
    })
}
