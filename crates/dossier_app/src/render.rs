use std::io::{self, Write};

use colored::Colorize;

use dossier_core::{AnalysisPhase, AppViewModel, ContentKind, FileRowView, MAX_FILES};

/// Incremental terminal renderer. Tracks what has already been printed
/// so repeated views only emit what changed — in particular, streamed
/// result text is printed fragment by fragment.
pub struct Renderer {
    printed_result_len: usize,
    shown_files: usize,
    last_error: Option<String>,
    was_analyzing: bool,
    last_copied: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            printed_result_len: 0,
            shown_files: 0,
            last_error: None,
            was_analyzing: false,
            last_copied: false,
        }
    }

    pub fn render(&mut self, view: &AppViewModel) {
        if view.files.len() > self.shown_files {
            for row in &view.files[self.shown_files..] {
                println!("{}", format_row(row));
            }
        }
        self.shown_files = view.files.len();

        if view.phase == AnalysisPhase::Analyzing {
            if !self.was_analyzing {
                println!("{}", "Анализирую…".cyan());
                self.printed_result_len = 0;
            }
            if view.result_text.len() > self.printed_result_len {
                print!("{}", &view.result_text[self.printed_result_len..]);
                let _ = io::stdout().flush();
                self.printed_result_len = view.result_text.len();
            }
        } else if self.was_analyzing {
            // Close the streamed line before any status below.
            println!();
            if view.phase == AnalysisPhase::Success {
                println!("{}", "Анализ завершён".green());
            }
        }
        self.was_analyzing = view.phase == AnalysisPhase::Analyzing;

        if view.error != self.last_error {
            if let Some(error) = &view.error {
                println!("{}", error.red());
            }
            self.last_error = view.error.clone();
        }

        if view.copied && !self.last_copied {
            println!("{}", "Скопировано в буфер обмена".green());
        }
        self.last_copied = view.copied;
    }

    /// Full listing for the `list` command.
    pub fn render_list(&self, view: &AppViewModel) {
        if view.files.is_empty() {
            println!("Файлы не добавлены");
            return;
        }
        for row in &view.files {
            println!("{}", format_row(row));
        }
        println!("Всего: {} из {}", view.files.len(), MAX_FILES);
    }
}

fn format_row(row: &FileRowView) -> String {
    let kind = match row.kind {
        ContentKind::Text => "текст",
        ContentKind::Binary => "данные",
    };
    format!(
        "  [{}] {} — {}, {}",
        row.id.to_string().bold(),
        row.name,
        kind,
        row.size_label
    )
}
