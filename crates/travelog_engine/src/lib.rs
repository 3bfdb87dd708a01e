//! Travelog engine: resilient fetching and the background refresh worker.
mod engine;
mod fetch;
mod pipeline;
mod retry;
mod types;

pub use engine::{EngineConfig, EngineHandle};
pub use fetch::{parse_rows, FetchRequest, FetchSettings, ReqwestFetcher, RowFetcher, SourceUrls};
pub use pipeline::{run_pipeline, PipelineOptions};
pub use retry::{backoff_delay, fetch_with_retry, FetchEventSink, NullSink};
pub use types::{EngineEvent, FailureKind, FetchError, FetchEvent, PipelineOutput};
