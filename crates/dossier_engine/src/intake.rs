use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::classify::{classify, declared_mime_type, FileClass};
use crate::extract::{decode_plain_text, DocumentTextExtractor, DocxTextExtractor};
use crate::types::{ExtractedPayload, IngestedFile, IntakeError, SourceInfo};

#[derive(Debug, Clone)]
pub struct IntakeSettings {
    /// Per-file ceiling; larger files fail intake instead of inflating
    /// the request.
    pub max_bytes: u64,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Reads one file and derives its payload: extracted text for
/// text-bearing formats, base64 for everything else.
pub struct FileIngestor {
    settings: IntakeSettings,
    doc_extractor: Box<dyn DocumentTextExtractor>,
}

impl FileIngestor {
    pub fn new(settings: IntakeSettings) -> Self {
        Self::with_extractor(settings, Box::new(DocxTextExtractor))
    }

    pub fn with_extractor(
        settings: IntakeSettings,
        doc_extractor: Box<dyn DocumentTextExtractor>,
    ) -> Self {
        Self {
            settings,
            doc_extractor,
        }
    }

    pub fn ingest(&self, path: &Path) -> Result<IngestedFile, IntakeError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = declared_mime_type(&file_name);
        let class = classify(&file_name, &mime_type);

        // A read failure surfaces as the class-appropriate kind: the
        // text pipeline reports extraction errors, the binary pipeline
        // encoding errors.
        let bytes = fs::read(path).map_err(|err| match class {
            FileClass::Binary => IntakeError::Encoding(err.to_string()),
            _ => IntakeError::Extraction(err.to_string()),
        })?;
        if bytes.len() as u64 > self.settings.max_bytes {
            return Err(IntakeError::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: bytes.len() as u64,
            });
        }

        let payload = match class {
            FileClass::WordDocument => ExtractedPayload::Text(
                self.doc_extractor
                    .extract_text(&bytes)
                    .map_err(|err| IntakeError::Extraction(err.to_string()))?,
            ),
            FileClass::PlainText => ExtractedPayload::Text(
                decode_plain_text(&bytes).map_err(|err| IntakeError::Extraction(err.to_string()))?,
            ),
            FileClass::Binary => ExtractedPayload::Base64(STANDARD.encode(&bytes)),
        };

        Ok(IngestedFile {
            source: SourceInfo {
                file_name,
                mime_type,
                size_bytes: bytes.len() as u64,
            },
            payload,
        })
    }
}
