use crate::view_model::{AppViewModel, ContentKind, FileRowView};

pub type ArtifactId = u64;

/// Hard cap on the number of tracked files.
pub const MAX_FILES: usize = 10;

/// Shown when a pick would push the batch past [`MAX_FILES`].
pub const CAPACITY_ERROR: &str = "Можно загрузить не более 10 файлов";

/// Shown when an analysis run fails without a usable message.
pub const GENERIC_ANALYSIS_ERROR: &str = "Произошла ошибка при анализе файлов";

/// Declared metadata of an uploaded file, captured at intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Derived content of a tracked file. The enum guarantees that exactly
/// one of the two representations exists per artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactContent {
    /// Plain text pulled out of a text-bearing file.
    ExtractedText(String),
    /// Base64 of the raw bytes of a binary file.
    EncodedPayload(String),
}

/// One registered artifact: stable id, declared source, derived content.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub id: ArtifactId,
    pub source: SourceFile,
    pub content: ArtifactContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Analyzing,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    batch: Vec<TrackedFile>,
    pending: Vec<ArtifactId>,
    next_artifact_id: ArtifactId,
    phase: AnalysisPhase,
    result_text: String,
    error: Option<String>,
    copied: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            files: self.batch.iter().map(file_row).collect(),
            pending_intake: self.pending.len(),
            result_text: self.result_text.clone(),
            error: self.error.clone(),
            copied: self.copied,
            can_analyze: self.can_start_analysis(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and resets it. The driver renders only
    /// when this returns true, coalescing bursts of messages.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub fn batch(&self) -> &[TrackedFile] {
        &self.batch
    }

    pub(crate) fn can_admit(&self, candidate_count: usize) -> bool {
        self.batch.len() + self.pending.len() + candidate_count <= MAX_FILES
    }

    /// Reserves a fresh artifact id and marks it as awaiting intake.
    pub(crate) fn register_pending(&mut self) -> ArtifactId {
        self.next_artifact_id += 1;
        self.pending.push(self.next_artifact_id);
        self.dirty = true;
        self.next_artifact_id
    }

    /// Applies one intake result. Results for ids that are no longer
    /// pending (cleared batches) are dropped.
    pub(crate) fn apply_ingested(
        &mut self,
        artifact_id: ArtifactId,
        result: Result<crate::IngestedContent, String>,
    ) {
        let Some(index) = self.pending.iter().position(|id| *id == artifact_id) else {
            return;
        };
        self.pending.remove(index);
        match result {
            Ok(ingested) => self.batch.push(TrackedFile {
                id: artifact_id,
                source: ingested.source,
                content: ingested.content,
            }),
            Err(message) => self.error = Some(message),
        }
        self.dirty = true;
    }

    pub(crate) fn remove_file(&mut self, artifact_id: ArtifactId) {
        let before = self.batch.len();
        self.batch.retain(|file| file.id != artifact_id);
        if self.batch.len() != before {
            self.dirty = true;
        }
    }

    pub(crate) fn clear_all(&mut self) {
        self.batch.clear();
        self.pending.clear();
        self.result_text.clear();
        self.phase = AnalysisPhase::Idle;
        self.error = None;
        self.copied = false;
        self.dirty = true;
    }

    pub(crate) fn can_start_analysis(&self) -> bool {
        !self.batch.is_empty()
            && self.pending.is_empty()
            && self.phase != AnalysisPhase::Analyzing
    }

    pub(crate) fn begin_analysis(&mut self) {
        self.result_text.clear();
        self.phase = AnalysisPhase::Analyzing;
        self.error = None;
        self.copied = false;
        self.dirty = true;
    }

    pub(crate) fn append_fragment(&mut self, text: &str) {
        if self.phase == AnalysisPhase::Analyzing && !text.is_empty() {
            self.result_text.push_str(text);
            self.dirty = true;
        }
    }

    pub(crate) fn finish_analysis(&mut self) {
        if self.phase == AnalysisPhase::Analyzing {
            self.phase = AnalysisPhase::Success;
            self.dirty = true;
        }
    }

    pub(crate) fn fail_analysis(&mut self, message: String) {
        if self.phase != AnalysisPhase::Analyzing {
            return;
        }
        self.phase = AnalysisPhase::Failed;
        self.error = Some(if message.trim().is_empty() {
            GENERIC_ANALYSIS_ERROR.to_string()
        } else {
            message
        });
        self.dirty = true;
    }

    /// The text a copy action would place on the clipboard, if any.
    pub(crate) fn copyable_text(&self) -> Option<String> {
        if self.result_text.is_empty() {
            None
        } else {
            Some(self.result_text.clone())
        }
    }

    pub(crate) fn set_copied(&mut self) {
        self.copied = true;
        self.dirty = true;
    }

    pub(crate) fn clear_copied(&mut self) {
        if self.copied {
            self.copied = false;
            self.dirty = true;
        }
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.dirty = true;
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.is_some() {
            self.error = None;
            self.dirty = true;
        }
    }
}

fn file_row(file: &TrackedFile) -> FileRowView {
    FileRowView {
        id: file.id,
        name: file.source.name.clone(),
        size_label: crate::human_size(file.source.size_bytes),
        kind: match file.content {
            ArtifactContent::ExtractedText(_) => ContentKind::Text,
            ArtifactContent::EncodedPayload(_) => ContentKind::Binary,
        },
    }
}
