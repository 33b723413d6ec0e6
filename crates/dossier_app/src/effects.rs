use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};

use dossier_core::{ArtifactContent, Effect, IngestedContent, Msg, SourceFile};
use dossier_engine::{EngineEvent, EngineHandle, ExtractedPayload, IngestedFile};

/// How long the "copied" acknowledgement stays visible.
pub const COPY_ACK_DELAY: Duration = Duration::from_secs(2);

/// Executes core effects against the engine, the clipboard and the
/// timer thread.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    clipboard: Box<dyn crate::clipboard::Clipboard>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        msg_tx: mpsc::Sender<Msg>,
        clipboard: Box<dyn crate::clipboard::Clipboard>,
    ) -> Self {
        Self {
            engine,
            msg_tx,
            clipboard,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::IngestFile { artifact_id, path } => {
                    engine_info!("IngestFile id={} path={}", artifact_id, path.display());
                    self.engine.ingest(artifact_id, path);
                }
                Effect::StartAnalysis { parts } => {
                    engine_info!("StartAnalysis parts={}", parts.len());
                    self.engine
                        .analyze(parts.iter().map(map_request_part).collect());
                }
                Effect::CopyToClipboard { text } => {
                    // Clipboard failure is non-fatal and not surfaced.
                    if let Err(err) = self.clipboard.write_text(&text) {
                        engine_warn!("clipboard write failed: {err:#}");
                    }
                }
                Effect::ScheduleCopyAckReset => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(COPY_ACK_DELAY);
                        let _ = tx.send(Msg::CopyAckElapsed);
                    });
                }
            }
        }
    }
}

/// Forwards engine events to the message channel until either side
/// hangs up.
pub fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        for event in events {
            if msg_tx.send(map_engine_event(event)).is_err() {
                break;
            }
        }
    });
}

fn map_request_part(part: &dossier_core::RequestPart) -> dossier_engine::RequestPart {
    match part {
        dossier_core::RequestPart::Text { content } => dossier_engine::RequestPart::Text {
            content: content.clone(),
        },
        dossier_core::RequestPart::InlineData { mime_type, data } => {
            dossier_engine::RequestPart::InlineData {
                mime_type: mime_type.clone(),
                data: data.clone(),
            }
        }
    }
}

fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FileIngested {
            artifact_id,
            file_name,
            result,
        } => Msg::FileIngested {
            artifact_id,
            result: match result {
                Ok(ingested) => Ok(map_ingested_file(ingested)),
                // The typed failure was already logged engine-side;
                // the user sees the per-file message.
                Err(_) => Err(format!("Ошибка при обработке файла {file_name}")),
            },
        },
        EngineEvent::AnalysisFragment { text } => Msg::AnalysisFragment(text),
        EngineEvent::AnalysisFinished { result } => match result {
            Ok(()) => Msg::AnalysisCompleted,
            // An empty message falls back to the core's generic one.
            Err(err) => Msg::AnalysisFailed {
                message: err.message,
            },
        },
    }
}

fn map_ingested_file(ingested: IngestedFile) -> IngestedContent {
    IngestedContent {
        source: SourceFile {
            name: ingested.source.file_name,
            mime_type: ingested.source.mime_type,
            size_bytes: ingested.source.size_bytes,
        },
        content: match ingested.payload {
            ExtractedPayload::Text(text) => ArtifactContent::ExtractedText(text),
            ExtractedPayload::Base64(data) => ArtifactContent::EncodedPayload(data),
        },
    }
}
