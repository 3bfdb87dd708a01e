use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use travelog_core::{DataSource, Reference, RequestId};
use travelog_logging::travel_debug;

use crate::pipeline::{run_pipeline, PipelineOptions};
use crate::retry::FetchEventSink;
use crate::{EngineEvent, FetchEvent, FetchSettings, ReqwestFetcher, RowFetcher, SourceUrls};

/// Everything a refresh needs, passed explicitly to the background worker.
#[derive(Clone)]
pub struct EngineConfig {
    pub settings: FetchSettings,
    pub urls: SourceUrls,
    pub options: PipelineOptions,
    /// Supplies the reference instant for each refresh.
    pub clock: Arc<dyn Fn() -> Reference + Send + Sync>,
}

impl EngineConfig {
    pub fn new(urls: SourceUrls) -> Self {
        Self {
            settings: FetchSettings::default(),
            urls,
            options: PipelineOptions::default(),
            clock: Arc::new(Reference::now),
        }
    }
}

enum EngineCommand {
    Refresh {
        request_id: RequestId,
        source: DataSource,
    },
    Cancel {
        request_id: RequestId,
    },
}

type Tokens = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.settings.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn RowFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let config = Arc::new(config);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let tokens: Tokens = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Refresh { request_id, source } => {
                        let cancel = CancellationToken::new();
                        if let Ok(mut tokens) = tokens.lock() {
                            tokens.insert(request_id, cancel.clone());
                        }
                        let fetcher = fetcher.clone();
                        let config = config.clone();
                        let event_tx = event_tx.clone();
                        let tokens = tokens.clone();
                        runtime.spawn(async move {
                            handle_refresh(
                                fetcher.as_ref(),
                                &config,
                                request_id,
                                source,
                                &cancel,
                                event_tx,
                            )
                            .await;
                            if let Ok(mut tokens) = tokens.lock() {
                                tokens.remove(&request_id);
                            }
                        });
                    }
                    EngineCommand::Cancel { request_id } => {
                        let token = tokens.lock().ok().and_then(|mut t| t.remove(&request_id));
                        match token {
                            Some(token) => token.cancel(),
                            None => travel_debug!("Refresh {} is not running", request_id),
                        }
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn refresh(&self, request_id: RequestId, source: DataSource) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Refresh { request_id, source });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    /// Returns a pending event without blocking.
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

struct RefreshSink {
    request_id: RequestId,
    tx: mpsc::Sender<EngineEvent>,
}

impl FetchEventSink for RefreshSink {
    fn emit(&self, event: FetchEvent) {
        if let FetchEvent::AttemptFailed {
            attempt,
            error,
            retry_in: Some(retry_in),
        } = event
        {
            let _ = self.tx.send(EngineEvent::AttemptFailed {
                request_id: self.request_id,
                attempt,
                message: error.to_string(),
                retry_in: Some(retry_in),
            });
        }
    }
}

async fn handle_refresh(
    fetcher: &dyn RowFetcher,
    config: &EngineConfig,
    request_id: RequestId,
    source: DataSource,
    cancel: &CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = match config.urls.request(source) {
        Ok(request) => {
            let sink = RefreshSink {
                request_id,
                tx: event_tx.clone(),
            };
            run_pipeline(
                fetcher,
                &request,
                &config.settings,
                &config.options,
                (config.clock)(),
                cancel,
                &sink,
            )
            .await
        }
        Err(err) => Err(err),
    };
    let _ = event_tx.send(EngineEvent::RefreshCompleted { request_id, result });
}
