//! Dossier core: pure state machine and view-model helpers.
mod assemble;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use assemble::{build_request_parts, RequestPart, ANALYSIS_INSTRUCTION, FALLBACK_MIME_TYPE};
pub use effect::Effect;
pub use msg::{IngestedContent, Msg};
pub use state::{
    AnalysisPhase, AppState, ArtifactContent, ArtifactId, SourceFile, TrackedFile, CAPACITY_ERROR,
    GENERIC_ANALYSIS_ERROR, MAX_FILES,
};
pub use update::update;
pub use view_model::{human_size, AppViewModel, ContentKind, FileRowView};
