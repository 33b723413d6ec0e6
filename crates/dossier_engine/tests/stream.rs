use std::sync::{Arc, Mutex};
use std::time::Duration;

use dossier_engine::{
    to_wire_request, AnalysisFailureKind, CompletionConfig, CompletionService, FragmentSink,
    GeminiClient, RequestPart, SseParser,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    fragments: Arc<Mutex<Vec<String>>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<String> {
        self.fragments.lock().unwrap().drain(..).collect()
    }
}

impl FragmentSink for TestSink {
    fn emit(&self, text: String) {
        self.fragments.lock().unwrap().push(text);
    }
}

fn test_config(base_url: String) -> CompletionConfig {
    CompletionConfig {
        base_url,
        connect_timeout: Duration::from_secs(5),
        request_timeout: Duration::from_secs(5),
        ..CompletionConfig::new("test-key", "gemini-2.5-flash")
    }
}

fn stream_path() -> &'static str {
    "/v1beta/models/gemini-2.5-flash:streamGenerateContent"
}

fn chunk_with_text(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

fn sse_body(payloads: &[serde_json::Value]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {payload}\r\n\r\n"))
        .collect()
}

#[test]
fn sse_parser_returns_completed_events_in_order() {
    let mut parser = SseParser::new();
    let payloads = parser.feed(b"data: one\n\ndata: two\n\n");
    assert_eq!(payloads, vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn sse_parser_buffers_events_split_across_chunks() {
    let mut parser = SseParser::new();
    assert!(parser.feed(b"data: hel").is_empty());
    assert_eq!(parser.feed(b"lo\n\n"), vec!["hello".to_string()]);
}

#[test]
fn sse_parser_handles_crlf_delimiters() {
    let mut parser = SseParser::new();
    let payloads = parser.feed(b"data: one\r\n\r\ndata: two\r");
    assert_eq!(payloads, vec!["one".to_string()]);
    assert_eq!(parser.feed(b"\n\r\n"), vec!["two".to_string()]);
}

#[test]
fn sse_parser_skips_comments_and_joins_data_lines() {
    let mut parser = SseParser::new();
    assert!(parser.feed(b": keepalive\n\n").is_empty());
    assert_eq!(
        parser.feed(b"data: first\ndata: second\n\n"),
        vec!["first\nsecond".to_string()]
    );
}

#[test]
fn wire_request_serializes_text_and_inline_parts() {
    let parts = vec![
        RequestPart::Text {
            content: "Содержимое файла a.txt:\nпривет".to_string(),
        },
        RequestPart::InlineData {
            mime_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        },
    ];

    let value = serde_json::to_value(to_wire_request(&parts)).unwrap();
    assert_eq!(
        value,
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": "Содержимое файла a.txt:\nпривет"},
                    {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}},
                ],
            }],
        })
    );
}

#[tokio::test]
async fn client_streams_fragments_in_arrival_order() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        chunk_with_text("Файл 1: "),
        chunk_with_text("вывод."),
        chunk_with_text("\nОбщий вывод: готово."),
    ]);
    Mock::given(method("POST"))
        .and(path(stream_path()))
        .and(query_param("alt", "sse"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(server.uri())).unwrap();
    let sink = TestSink::new();
    let parts = vec![RequestPart::Text {
        content: "Проанализируй".to_string(),
    }];

    client.stream_generate(&parts, &sink).await.expect("stream ok");
    assert_eq!(
        sink.take(),
        vec![
            "Файл 1: ".to_string(),
            "вывод.".to_string(),
            "\nОбщий вывод: готово.".to_string(),
        ]
    );

    // The whole request is one user turn ending with the text part.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["contents"][0]["role"], "user");
    assert_eq!(sent["contents"][0]["parts"][0]["text"], "Проанализируй");
}

#[tokio::test]
async fn empty_fragments_and_metadata_chunks_are_skipped() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        chunk_with_text(""),
        json!({"usageMetadata": {"totalTokenCount": 7}}),
        chunk_with_text("вывод"),
    ]);
    Mock::given(method("POST"))
        .and(path(stream_path()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(server.uri())).unwrap();
    let sink = TestSink::new();
    client
        .stream_generate(&[], &sink)
        .await
        .expect("stream ok");
    assert_eq!(sink.take(), vec!["вывод".to_string()]);
}

#[tokio::test]
async fn http_error_carries_status_and_body_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(stream_path()))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(server.uri())).unwrap();
    let sink = TestSink::new();
    let err = client.stream_generate(&[], &sink).await.unwrap_err();

    assert_eq!(err.kind, AnalysisFailureKind::HttpStatus(400));
    assert!(err.message.contains("API key not valid"));
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn malformed_stream_payload_is_an_invalid_response() {
    let server = MockServer::start().await;
    let body = format!("{}data: {{not json\n\n", sse_body(&[chunk_with_text("частичный")]));
    Mock::given(method("POST"))
        .and(path(stream_path()))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(test_config(server.uri())).unwrap();
    let sink = TestSink::new();
    let err = client.stream_generate(&[], &sink).await.unwrap_err();

    assert_eq!(err.kind, AnalysisFailureKind::InvalidResponse);
    // Fragments that arrived before the failure were still delivered.
    assert_eq!(sink.take(), vec!["частичный".to_string()]);
}
