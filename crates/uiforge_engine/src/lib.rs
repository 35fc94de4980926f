//! UI Forge engine: backend calls, fragment rendering and preview output.
mod backend;
mod engine;
mod fragment;
mod preview;
mod render;
mod types;

pub use backend::{Backend, BackendSettings, ReqwestBackend};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use fragment::{mount_fragment, select_text, InlineScript, MountedFragment};
pub use preview::{
    build_preview_document, ensure_output_dir, PersistError, PreviewWriter, COMPONENT_STYLESHEET,
    PREVIEW_FILENAME,
};
pub use render::{LiveDocument, PreviewSurface, RenderReport, ScriptError, ScriptHost, ScriptUnit};
pub use types::{ApiCall, ApiError, EngineEvent, Epoch, FailureKind};
