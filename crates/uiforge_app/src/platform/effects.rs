use std::sync::mpsc;

use engine_logging::{engine_error, engine_info};
use uiforge_core::{Effect, Msg};
use uiforge_engine::{ApiCall, EngineEvent, EngineHandle, Epoch, EventSink, PreviewWriter};

/// Runs the IO effects the controller hands back.
pub struct EffectRunner {
    engine: EngineHandle,
    preview: PreviewWriter,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, preview: PreviewWriter) -> Self {
        Self { engine, preview }
    }

    /// Submits backend calls under `epoch`; returns notices for anything
    /// that finished synchronously.
    pub fn run(&self, epoch: Epoch, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            if let Some(call) = api_call(&effect) {
                self.engine.submit(epoch, call);
                continue;
            }
            match effect {
                Effect::OpenPreview { html } => match self.preview.write(&html) {
                    Ok(path) => notices.push(format!("Preview written to {}", path.display())),
                    Err(err) => {
                        engine_error!("Preview could not be written: {}", err);
                        notices.push(format!("Failed to write preview: {err}"));
                    }
                },
                other => engine_error!("Effect {:?} reached the runner unhandled", other),
            }
        }
        notices
    }
}

fn api_call(effect: &Effect) -> Option<ApiCall> {
    let call = match effect {
        Effect::FetchStrategies => ApiCall::ListStrategies,
        Effect::FetchStrategy { filename } => ApiCall::GetStrategy {
            filename: filename.clone(),
        },
        Effect::Generate {
            request_id,
            request,
        } => {
            engine_info!(
                "Generate request_id={} description_len={}",
                request_id,
                request.description().len()
            );
            ApiCall::Generate {
                request_id: *request_id,
                request: request.clone(),
            }
        }
        Effect::FetchHistory => ApiCall::ListHistory,
        Effect::FetchHistoryItem { id } => ApiCall::GetHistoryItem { id: id.clone() },
        Effect::SaveStrategy { draft } => ApiCall::SaveStrategy {
            draft: draft.clone(),
        },
        Effect::RenderFragment { .. } | Effect::OpenPreview { .. } | Effect::Navigate(_) => {
            return None
        }
    };
    Some(call)
}

/// Completion of a backend call as the message the core expects.
pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::StrategiesListed(result) => {
            Msg::StrategiesLoaded(result.map_err(|err| err.into_failure()))
        }
        EngineEvent::StrategyFetched { filename, result } => Msg::StrategyLoaded {
            filename,
            result: result.map_err(|err| err.into_failure()),
        },
        EngineEvent::StrategySaved(result) => {
            Msg::StrategySaved(result.map_err(|err| err.into_failure()))
        }
        EngineEvent::Generated { request_id, result } => Msg::GenerationFinished {
            request_id,
            result: result.map_err(|err| err.into_failure()),
        },
        EngineEvent::HistoryListed(result) => {
            Msg::HistoryLoaded(result.map_err(|err| err.into_failure()))
        }
        EngineEvent::HistoryItemFetched { id, result } => Msg::HistoryItemLoaded {
            id,
            result: result.map_err(|err| err.into_failure()),
        },
    }
}

/// Forwards engine completions into the UI loop, epoch included.
pub struct MsgSink<T> {
    tx: mpsc::Sender<T>,
    wrap: fn(Epoch, Msg) -> T,
}

impl<T> MsgSink<T> {
    pub fn new(tx: mpsc::Sender<T>, wrap: fn(Epoch, Msg) -> T) -> Self {
        Self { tx, wrap }
    }
}

impl<T: Send> EventSink for MsgSink<T> {
    fn emit(&self, epoch: Epoch, event: EngineEvent) {
        let _ = self.tx.send((self.wrap)(epoch, event_to_msg(event)));
    }
}
