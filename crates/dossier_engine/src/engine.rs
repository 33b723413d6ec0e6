use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_error, engine_info, engine_warn};

use crate::intake::{FileIngestor, IntakeSettings};
use crate::stream::{CompletionConfig, CompletionService, FragmentSink, GeminiClient};
use crate::types::{ArtifactId, EngineEvent, RequestPart};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub intake: IntakeSettings,
    pub completion: CompletionConfig,
}

enum EngineCommand {
    Ingest {
        artifact_id: ArtifactId,
        path: PathBuf,
    },
    Analyze {
        parts: Vec<RequestPart>,
    },
}

/// Front of the engine worker. Cheap to clone; all clones feed the
/// same command queue.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Spawns the worker thread and returns the handle plus the event
    /// stream. Commands run strictly one at a time in submission
    /// order, so intake results and failures are deterministic.
    pub fn new(config: EngineConfig) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("failed to start engine runtime: {err}");
                    return;
                }
            };
            let ingestor = FileIngestor::new(config.intake);
            let service: Box<dyn CompletionService> = match GeminiClient::new(config.completion) {
                Ok(client) => Box::new(client),
                Err(err) => {
                    engine_error!("failed to build completion client: {err}");
                    return;
                }
            };

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Ingest { artifact_id, path } => {
                        let file_name = path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        let result = ingestor.ingest(&path);
                        match &result {
                            Ok(ingested) => engine_info!(
                                "ingested {} ({} bytes)",
                                path.display(),
                                ingested.source.size_bytes
                            ),
                            Err(err) => {
                                engine_warn!("intake failed for {}: {err}", path.display())
                            }
                        }
                        let _ = event_tx.send(EngineEvent::FileIngested {
                            artifact_id,
                            file_name,
                            result,
                        });
                    }
                    EngineCommand::Analyze { parts } => {
                        engine_info!("starting analysis with {} parts", parts.len());
                        let sink = ChannelFragmentSink {
                            tx: event_tx.clone(),
                        };
                        let result = runtime.block_on(service.stream_generate(&parts, &sink));
                        if let Err(err) = &result {
                            engine_warn!("analysis failed: {err}");
                        }
                        let _ = event_tx.send(EngineEvent::AnalysisFinished { result });
                    }
                }
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn ingest(&self, artifact_id: ArtifactId, path: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::Ingest { artifact_id, path });
    }

    pub fn analyze(&self, parts: Vec<RequestPart>) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze { parts });
    }
}

struct ChannelFragmentSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl FragmentSink for ChannelFragmentSink {
    fn emit(&self, text: String) {
        let _ = self.tx.send(EngineEvent::AnalysisFragment { text });
    }
}
