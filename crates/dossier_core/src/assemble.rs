use crate::state::{ArtifactContent, TrackedFile};

/// Fixed trailing instruction. It refers to "the files above", so it
/// must always be the last part of the request.
pub const ANALYSIS_INSTRUCTION: &str = "Проанализируй все файлы, приведённые выше. \
Сделай вывод по каждому файлу отдельно, а затем дай общий вывод по всем файлам вместе. \
Отвечай на русском языке.";

/// Substitute MIME type for binary payloads whose declared type is empty.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// One discrete unit of the completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Text { content: String },
    InlineData { mime_type: String, data: String },
}

/// Maps the batch, in order, to request parts and appends the
/// instruction. Always yields `batch.len() + 1` parts.
pub fn build_request_parts(batch: &[TrackedFile]) -> Vec<RequestPart> {
    let mut parts = Vec::with_capacity(batch.len() + 1);
    for file in batch {
        match &file.content {
            ArtifactContent::ExtractedText(text) => parts.push(RequestPart::Text {
                content: format!("Содержимое файла {}:\n{}", file.source.name, text),
            }),
            ArtifactContent::EncodedPayload(data) => {
                let mime_type = if file.source.mime_type.is_empty() {
                    FALLBACK_MIME_TYPE
                } else {
                    file.source.mime_type.as_str()
                };
                parts.push(RequestPart::InlineData {
                    mime_type: mime_type.to_string(),
                    data: data.clone(),
                });
            }
        }
    }
    parts.push(RequestPart::Text {
        content: ANALYSIS_INSTRUCTION.to_string(),
    });
    parts
}
