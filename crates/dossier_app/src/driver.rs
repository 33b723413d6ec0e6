use std::sync::mpsc;
use std::time::Duration;

use dossier_core::{update, AnalysisPhase, AppState, Msg};

use crate::effects::EffectRunner;
use crate::render::Renderer;
use crate::repl::Command;

/// Owns the state machine and drives it: user commands become
/// messages, effects go to the runner, engine events come back through
/// the message channel, and dirty views are rendered incrementally.
pub struct Driver {
    state: AppState,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    renderer: Renderer,
}

impl Driver {
    pub fn new(effects: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        Self {
            state: AppState::new(),
            effects,
            msg_rx,
            renderer: Renderer::new(),
        }
    }

    /// Runs one user command to quiescence: dispatch, then pump engine
    /// events until no intake or analysis is in flight.
    pub fn execute(&mut self, command: Command) {
        let msg = match command {
            Command::Add(paths) => Msg::FilesPicked(paths),
            Command::Remove(artifact_id) => Msg::RemoveFile { artifact_id },
            Command::Clear => Msg::ClearAll,
            Command::Analyze => Msg::AnalyzeClicked,
            Command::Copy => Msg::CopyClicked,
            // Handled by the command loop, never dispatched.
            Command::List | Command::Help | Command::Quit => return,
        };
        self.dispatch(msg);
        self.pump_until_settled();
    }

    pub fn render_list(&self) {
        self.renderer.render_list(&self.state.view());
    }

    /// True when an `analyze` would currently be accepted.
    pub fn can_analyze(&self) -> bool {
        self.state.view().can_analyze
    }

    /// True when there is result text a `copy` could pick up.
    pub fn has_result(&self) -> bool {
        !self.state.view().result_text.is_empty()
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.effects.run(effects);
        if was_dirty {
            self.renderer.render(&view);
        }
    }

    fn pump_until_settled(&mut self) {
        loop {
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.dispatch(msg);
            }
            if self.is_settled() {
                break;
            }
            match self.msg_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(msg) => self.dispatch(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn is_settled(&self) -> bool {
        let view = self.state.view();
        view.pending_intake == 0 && view.phase != AnalysisPhase::Analyzing
    }
}
