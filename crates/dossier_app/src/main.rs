use std::env;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{anyhow, Result};
use clap::Parser;
use dotenv::dotenv;
use engine_logging::LogDestination;

use dossier_engine::{CompletionConfig, EngineConfig, EngineHandle, IntakeSettings};

use crate::clipboard::SystemClipboard;
use crate::driver::Driver;
use crate::effects::{spawn_event_loop, EffectRunner};

mod clipboard;
mod driver;
mod effects;
mod render;
mod repl;

#[derive(Parser, Debug)]
#[command(author, version, about = "Анализ набора файлов с помощью генеративной модели", long_about = None)]
struct Args {
    /// API key for the completion service; falls back to GEMINI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Model identifier.
    #[arg(long, default_value = dossier_engine::DEFAULT_MODEL)]
    model: String,

    /// Base URL of the completion service.
    #[arg(long, default_value = dossier_engine::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-file size ceiling in bytes.
    #[arg(long, default_value_t = 10 * 1024 * 1024)]
    max_file_bytes: u64,

    /// Log to the terminal instead of ./dossier.log.
    #[arg(long)]
    log_to_terminal: bool,
}

fn main() -> Result<()> {
    // Pick up GEMINI_API_KEY from a .env file if one is present.
    dotenv().ok();
    let args = Args::parse();

    engine_logging::initialize(if args.log_to_terminal {
        LogDestination::Terminal
    } else {
        LogDestination::File(Path::new("./dossier.log"))
    });

    let api_key = match args.api_key {
        Some(key) => key,
        None => env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("API key must be provided via --api-key or GEMINI_API_KEY"))?,
    };

    let mut completion = CompletionConfig::new(api_key, args.model);
    completion.base_url = args.base_url;
    let config = EngineConfig {
        intake: IntakeSettings {
            max_bytes: args.max_file_bytes,
        },
        completion,
    };

    let (engine, engine_events) = EngineHandle::new(config);
    let (msg_tx, msg_rx) = mpsc::channel();
    spawn_event_loop(engine_events, msg_tx.clone());

    let runner = EffectRunner::new(engine, msg_tx, Box::new(SystemClipboard));
    let mut driver = Driver::new(runner, msg_rx);
    repl::run(&mut driver)
}
