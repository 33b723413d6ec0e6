use std::time::Duration;

use futures_util::StreamExt;
use serde::Deserialize;

use crate::request::to_wire_request;
use crate::sse::SseParser;
use crate::types::{AnalysisError, AnalysisFailureKind, RequestPart};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole streaming call, consumption included.
    pub request_timeout: Duration,
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

/// Receives streamed fragments in arrival order.
pub trait FragmentSink: Send + Sync {
    fn emit(&self, text: String);
}

#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Streams one generation. Every non-empty text fragment goes to
    /// the sink in arrival order; the stream is finite and cannot be
    /// restarted.
    async fn stream_generate(
        &self,
        parts: &[RequestPart],
        sink: &dyn FragmentSink,
    ) -> Result<(), AnalysisError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl GeminiClient {
    pub fn new(config: CompletionConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AnalysisError::new(AnalysisFailureKind::Network, err.to_string()))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse&key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }
}

#[async_trait::async_trait]
impl CompletionService for GeminiClient {
    async fn stream_generate(
        &self,
        parts: &[RequestPart],
        sink: &dyn FragmentSink,
    ) -> Result<(), AnalysisError> {
        let request = to_wire_request(parts);
        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.trim().chars().take(800).collect();
            return Err(AnalysisError::new(
                AnalysisFailureKind::HttpStatus(status.as_u16()),
                if detail.is_empty() {
                    status.to_string()
                } else {
                    detail
                },
            ));
        }

        let mut parser = SseParser::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            for payload in parser.feed(&chunk) {
                for text in fragment_texts(&payload)? {
                    if !text.is_empty() {
                        sink.emit(text);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    candidates: Option<Vec<StreamCandidate>>,
}

#[derive(Debug, Deserialize)]
struct StreamCandidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn fragment_texts(payload: &str) -> Result<Vec<String>, AnalysisError> {
    let chunk: StreamChunk = serde_json::from_str(payload).map_err(|err| {
        AnalysisError::new(
            AnalysisFailureKind::InvalidResponse,
            format!("unparseable stream payload: {err}"),
        )
    })?;
    Ok(chunk
        .candidates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts.unwrap_or_default())
        .filter_map(|part| part.text)
        .collect())
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(AnalysisFailureKind::Timeout, err.to_string());
    }
    if err.is_connect() {
        return AnalysisError::new(AnalysisFailureKind::Network, err.to_string());
    }
    if err.is_body() || err.is_decode() {
        return AnalysisError::new(AnalysisFailureKind::Stream, err.to_string());
    }
    AnalysisError::new(AnalysisFailureKind::Network, err.to_string())
}
