use crate::assemble::build_request_parts;
use crate::state::CAPACITY_ERROR;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked(paths) => {
            if paths.is_empty() {
                return (state, Vec::new());
            }
            if !state.can_admit(paths.len()) {
                // All-or-nothing: nothing from the triggering pick is
                // admitted, the existing batch stays untouched.
                state.set_error(CAPACITY_ERROR);
                Vec::new()
            } else {
                state.clear_error();
                paths
                    .into_iter()
                    .map(|path| Effect::IngestFile {
                        artifact_id: state.register_pending(),
                        path,
                    })
                    .collect()
            }
        }
        Msg::FileIngested {
            artifact_id,
            result,
        } => {
            state.apply_ingested(artifact_id, result);
            Vec::new()
        }
        Msg::RemoveFile { artifact_id } => {
            state.remove_file(artifact_id);
            Vec::new()
        }
        Msg::ClearAll => {
            state.clear_all();
            Vec::new()
        }
        Msg::AnalyzeClicked => {
            if state.can_start_analysis() {
                state.begin_analysis();
                vec![Effect::StartAnalysis {
                    parts: build_request_parts(state.batch()),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::AnalysisFragment(text) => {
            state.append_fragment(&text);
            Vec::new()
        }
        Msg::AnalysisCompleted => {
            state.finish_analysis();
            Vec::new()
        }
        Msg::AnalysisFailed { message } => {
            state.fail_analysis(message);
            Vec::new()
        }
        Msg::CopyClicked => match state.copyable_text() {
            Some(text) => {
                state.set_copied();
                vec![
                    Effect::CopyToClipboard { text },
                    Effect::ScheduleCopyAckReset,
                ]
            }
            None => Vec::new(),
        },
        Msg::CopyAckElapsed => {
            state.clear_copied();
            Vec::new()
        }
    };

    (state, effects)
}
