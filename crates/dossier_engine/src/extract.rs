use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ExtractionError(String);

impl ExtractionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Pulls plain text out of a binary document format.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Reads the docx package and concatenates the text runs of every
/// paragraph, one line per paragraph.
#[derive(Debug, Default)]
pub struct DocxTextExtractor;

impl DocumentTextExtractor for DocxTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx =
            read_docx(bytes).map_err(|err| ExtractionError::new(format!("malformed docx: {err}")))?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                if !text.is_empty() {
                    text.push('\n');
                }
                for paragraph_child in &paragraph.children {
                    if let ParagraphChild::Run(run) = paragraph_child {
                        for run_child in &run.children {
                            match run_child {
                                RunChild::Text(t) => text.push_str(&t.text),
                                RunChild::Tab(_) => text.push('\t'),
                                RunChild::Break(_) => text.push('\n'),
                                _ => {}
                            }
                        }
                    }
                }
            }
        }
        Ok(text)
    }
}

/// Decodes raw bytes as UTF-8 with BOM sniffing (a UTF-16 BOM switches
/// the decoder accordingly). Malformed sequences are an error, not
/// replacement characters.
pub fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        return Err(ExtractionError::new(format!(
            "not valid {} text",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}
