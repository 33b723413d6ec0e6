use std::fmt;

pub type ArtifactId = u64;

/// Declared metadata of one picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Derived representation of one file, exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedPayload {
    /// Text pulled out of a text-bearing file.
    Text(String),
    /// Base64 of the raw bytes of a binary file.
    Base64(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFile {
    pub source: SourceInfo,
    pub payload: ExtractedPayload,
}

/// One discrete unit of the completion request, before wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Text { content: String },
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Intake of one file finished, successfully or not.
    FileIngested {
        artifact_id: ArtifactId,
        file_name: String,
        result: Result<IngestedFile, IntakeError>,
    },
    /// One incremental text fragment from the completion stream.
    AnalysisFragment { text: String },
    /// The completion stream terminated.
    AnalysisFinished { result: Result<(), AnalysisError> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("text extraction failed: {0}")]
    Extraction(String),
    #[error("binary encoding failed: {0}")]
    Encoding(String),
    #[error("file too large (max {max_bytes} bytes, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub kind: AnalysisFailureKind,
    pub message: String,
}

impl AnalysisError {
    pub(crate) fn new(kind: AnalysisFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
    Stream,
    InvalidResponse,
}

impl fmt::Display for AnalysisFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            AnalysisFailureKind::Timeout => write!(f, "timeout"),
            AnalysisFailureKind::Network => write!(f, "network error"),
            AnalysisFailureKind::Stream => write!(f, "stream error"),
            AnalysisFailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}
