use std::path::PathBuf;

use crate::state::{ArtifactContent, ArtifactId, SourceFile};

/// Successful intake payload delivered back from the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedContent {
    pub source: SourceFile,
    pub content: ArtifactContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked one or more files for intake.
    FilesPicked(Vec<PathBuf>),
    /// Engine finished intake of one picked file. `Err` carries the
    /// user-visible message for that file.
    FileIngested {
        artifact_id: ArtifactId,
        result: Result<IngestedContent, String>,
    },
    /// User removed one tracked file.
    RemoveFile { artifact_id: ArtifactId },
    /// User cleared the whole batch.
    ClearAll,
    /// User requested an analysis run.
    AnalyzeClicked,
    /// One incremental text fragment from the completion stream.
    AnalysisFragment(String),
    /// The completion stream ended without error.
    AnalysisCompleted,
    /// The completion stream failed during setup or consumption.
    AnalysisFailed { message: String },
    /// User requested a copy of the result text.
    CopyClicked,
    /// The scheduled copied-acknowledgement delay elapsed.
    CopyAckElapsed,
}
