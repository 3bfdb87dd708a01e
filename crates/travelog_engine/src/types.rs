use std::fmt;
use std::time::Duration;

use travelog_core::{Itinerary, Rejection, RequestId, TravelRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
    /// Attempts made before giving up; 1 for a single-shot fetch.
    pub attempts: u32,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            attempts: 1,
        }
    }

    pub(crate) fn after_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// The HTTP client itself could not be built.
    Client,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedPayload,
    Cancelled,
    Network,
}

impl FailureKind {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Only connection-level failures, 5xx and 429 qualify.
    pub fn is_transient(&self) -> bool {
        match self {
            FailureKind::Network | FailureKind::Timeout => true,
            FailureKind::HttpStatus(code) => *code == 429 || (500..=599).contains(code),
            FailureKind::InvalidUrl
            | FailureKind::Client
            | FailureKind::RedirectLimitExceeded
            | FailureKind::TooLarge { .. }
            | FailureKind::MalformedPayload
            | FailureKind::Cancelled => false,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Client => write!(f, "http client setup failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Progress of one retrying fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    AttemptStarted {
        attempt: u32,
    },
    AttemptFailed {
        attempt: u32,
        error: FetchError,
        /// Delay before the next attempt; `None` when no retry follows.
        retry_in: Option<Duration>,
    },
    Completed {
        attempt: u32,
        rows: usize,
    },
}

/// Result of one fetch, validate and categorize run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Accepted records in fetch order, after dedupe and filtering.
    pub records: Vec<TravelRecord>,
    pub itinerary: Itinerary,
    pub rejected: Vec<Rejection>,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AttemptFailed {
        request_id: RequestId,
        attempt: u32,
        message: String,
        retry_in: Option<Duration>,
    },
    RefreshCompleted {
        request_id: RequestId,
        result: Result<PipelineOutput, FetchError>,
    },
}
