use std::path::PathBuf;

use crate::assemble::RequestPart;
use crate::state::ArtifactId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read, classify and extract/encode one picked file.
    IngestFile {
        artifact_id: ArtifactId,
        path: PathBuf,
    },
    /// Open a streaming completion call with the assembled parts.
    StartAnalysis { parts: Vec<RequestPart> },
    /// Place the current result text on the system clipboard.
    CopyToClipboard { text: String },
    /// Deliver `Msg::CopyAckElapsed` after the acknowledgement delay.
    ScheduleCopyAckReset,
}
