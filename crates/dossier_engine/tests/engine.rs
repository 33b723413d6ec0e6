use std::fs;
use std::sync::Once;
use std::time::Duration;

use dossier_engine::{
    CompletionConfig, EngineConfig, EngineEvent, EngineHandle, ExtractedPayload, IntakeSettings,
    RequestPart,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn engine_config(base_url: String) -> EngineConfig {
    EngineConfig {
        intake: IntakeSettings::default(),
        completion: CompletionConfig {
            base_url,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
            ..CompletionConfig::new("test-key", "gemini-2.5-flash")
        },
    }
}

fn recv(events: &std::sync::mpsc::Receiver<EngineEvent>) -> EngineEvent {
    events
        .recv_timeout(Duration::from_secs(10))
        .expect("engine event")
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_processes_commands_sequentially_in_order() {
    init_logging();

    let server = MockServer::start().await;
    let body = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Файл 1: \"}]}}]}\n\n\
                data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"вывод.\"}]}}]}\n\n";
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let good = dir.path().join("заметка.txt");
    fs::write(&good, "привет").unwrap();
    let missing = dir.path().join("нет.txt");

    let (engine, events) = EngineHandle::new(engine_config(server.uri()));

    // Two intakes then one analysis: results must come back in the
    // same order even though the second intake fails.
    engine.ingest(1, good);
    engine.ingest(2, missing);
    engine.analyze(vec![RequestPart::Text {
        content: "Проанализируй".to_string(),
    }]);

    match recv(&events) {
        EngineEvent::FileIngested {
            artifact_id,
            file_name,
            result,
        } => {
            assert_eq!(artifact_id, 1);
            assert_eq!(file_name, "заметка.txt");
            let ingested = result.expect("intake ok");
            assert_eq!(
                ingested.payload,
                ExtractedPayload::Text("привет".to_string())
            );
        }
        other => panic!("expected FileIngested, got {other:?}"),
    }

    match recv(&events) {
        EngineEvent::FileIngested {
            artifact_id,
            result,
            ..
        } => {
            assert_eq!(artifact_id, 2);
            assert!(result.is_err());
        }
        other => panic!("expected FileIngested, got {other:?}"),
    }

    assert_eq!(
        recv(&events),
        EngineEvent::AnalysisFragment {
            text: "Файл 1: ".to_string(),
        }
    );
    assert_eq!(
        recv(&events),
        EngineEvent::AnalysisFragment {
            text: "вывод.".to_string(),
        }
    );
    match recv(&events) {
        EngineEvent::AnalysisFinished { result } => assert!(result.is_ok()),
        other => panic!("expected AnalysisFinished, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn analysis_failure_is_reported_after_partial_fragments() {
    init_logging();

    let server = MockServer::start().await;
    let chunk = json!({"candidates": [{"content": {"parts": [{"text": "частичный"}]}}]});
    let body = format!("data: {chunk}\n\ndata: {{broken\n\n");
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let (engine, events) = EngineHandle::new(engine_config(server.uri()));
    engine.analyze(Vec::new());

    assert_eq!(
        recv(&events),
        EngineEvent::AnalysisFragment {
            text: "частичный".to_string(),
        }
    );
    match recv(&events) {
        EngineEvent::AnalysisFinished { result } => assert!(result.is_err()),
        other => panic!("expected AnalysisFinished, got {other:?}"),
    }
}
