use serde::Serialize;

use crate::types::RequestPart;

/// Wire form of one streaming generation request.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WirePart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineBlob,
    },
}

#[derive(Debug, Serialize)]
pub struct InlineBlob {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// Maps the assembled parts onto the wire request, one user turn.
pub fn to_wire_request(parts: &[RequestPart]) -> GenerateRequest {
    let wire_parts = parts
        .iter()
        .map(|part| match part {
            RequestPart::Text { content } => WirePart::Text {
                text: content.clone(),
            },
            RequestPart::InlineData { mime_type, data } => WirePart::InlineData {
                inline_data: InlineBlob {
                    mime_type: mime_type.clone(),
                    data: data.clone(),
                },
            },
        })
        .collect();

    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: wire_parts,
        }],
    }
}
