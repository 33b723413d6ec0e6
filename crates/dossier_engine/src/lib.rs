//! Dossier engine: file intake pipeline and streaming completion client.
mod classify;
mod engine;
mod extract;
mod intake;
mod request;
mod sse;
mod stream;
mod types;

pub use classify::{classify, declared_mime_type, FileClass};
pub use engine::{EngineConfig, EngineHandle};
pub use extract::{decode_plain_text, DocumentTextExtractor, DocxTextExtractor, ExtractionError};
pub use intake::{FileIngestor, IntakeSettings};
pub use request::{to_wire_request, GenerateRequest};
pub use sse::SseParser;
pub use stream::{
    CompletionConfig, CompletionService, FragmentSink, GeminiClient, DEFAULT_BASE_URL,
    DEFAULT_MODEL,
};
pub use types::{
    AnalysisError, AnalysisFailureKind, ArtifactId, EngineEvent, ExtractedPayload, IngestedFile,
    IntakeError, RequestPart, SourceInfo,
};
