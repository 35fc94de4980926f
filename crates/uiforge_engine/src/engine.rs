use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_warn};

use crate::backend::{Backend, BackendSettings, ReqwestBackend};
use crate::{ApiCall, ApiError, EngineEvent, Epoch};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Backend(#[from] ApiError),
}

/// Receives completions from the engine thread, with the epoch their call
/// was submitted under.
pub trait EventSink: Send + Sync {
    fn emit(&self, epoch: Epoch, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<(Epoch, EngineEvent)>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<(Epoch, EngineEvent)>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, epoch: Epoch, event: EngineEvent) {
        let _ = self.tx.send((epoch, event));
    }
}

/// Runs backend calls off the UI thread.
///
/// `submit` returns immediately; every call runs to completion on its own
/// task and reports through the sink. Nothing is queued behind an earlier
/// call and nothing can be cancelled; callers drop stale completions by
/// their epoch.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<(Epoch, ApiCall)>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend), sink)
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("uiforge-engine")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<(Epoch, ApiCall)>();

        thread::spawn(move || {
            while let Ok((epoch, call)) = cmd_rx.recv() {
                let backend = backend.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    let event = perform(backend.as_ref(), call).await;
                    sink.emit(epoch, event);
                });
            }
            engine_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, epoch: Epoch, call: ApiCall) {
        if self.cmd_tx.send((epoch, call)).is_err() {
            engine_warn!("Engine thread is gone; dropping backend call");
        }
    }
}

async fn perform(backend: &dyn Backend, call: ApiCall) -> EngineEvent {
    match call {
        ApiCall::ListStrategies => EngineEvent::StrategiesListed(backend.list_strategies().await),
        ApiCall::GetStrategy { filename } => {
            let result = backend.get_strategy(&filename).await;
            EngineEvent::StrategyFetched { filename, result }
        }
        ApiCall::SaveStrategy { draft } => {
            EngineEvent::StrategySaved(backend.save_strategy(&draft).await)
        }
        ApiCall::Generate {
            request_id,
            request,
        } => {
            let result = backend.generate(&request).await;
            EngineEvent::Generated { request_id, result }
        }
        ApiCall::ListHistory => EngineEvent::HistoryListed(backend.list_history().await),
        ApiCall::GetHistoryItem { id } => {
            let result = backend.get_history_item(&id).await;
            EngineEvent::HistoryItemFetched { id, result }
        }
    }
}
