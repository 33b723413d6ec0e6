use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use dossier_core::ArtifactId;

use crate::driver::Driver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Remove(ArtifactId),
    Clear,
    List,
    Analyze,
    Copy,
    Help,
    Quit,
}

/// Parses one input line. The error string is the user-facing hint.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let mut tokens = input.split_whitespace();
    let Some(head) = tokens.next() else {
        return Err("Введите help для справки".to_string());
    };
    match head.to_ascii_lowercase().as_str() {
        "add" | "a" => {
            let paths: Vec<PathBuf> = tokens.map(PathBuf::from).collect();
            if paths.is_empty() {
                Err("Укажите хотя бы один путь: add <путь>".to_string())
            } else {
                Ok(Command::Add(paths))
            }
        }
        "remove" | "rm" => match tokens.next() {
            Some(id) => id
                .parse()
                .map(Command::Remove)
                .map_err(|_| format!("Некорректный идентификатор: {id}")),
            None => Err("Укажите идентификатор: remove <id>".to_string()),
        },
        "clear" => Ok(Command::Clear),
        "list" | "ls" => Ok(Command::List),
        "analyze" | "run" => Ok(Command::Analyze),
        "copy" => Ok(Command::Copy),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Неизвестная команда: {other}. Введите help для справки")),
    }
}

pub fn run(driver: &mut Driver) -> Result<()> {
    print_help();
    let mut rl = Editor::<(), DefaultHistory>::new()?;

    loop {
        match rl.readline("📂 ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match parse_command(input) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => print_help(),
                    Ok(Command::List) => driver.render_list(),
                    Ok(Command::Analyze) if !driver.can_analyze() => {
                        println!("{}", "Сначала добавьте файлы".yellow());
                    }
                    Ok(Command::Copy) if !driver.has_result() => {
                        println!("{}", "Пока нечего копировать".yellow());
                    }
                    Ok(command) => driver.execute(command),
                    Err(hint) => println!("{}", hint.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Ошибка ввода: {err:?}");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_collects_all_paths() {
        assert_eq!(
            parse_command("add notes.txt отчёт.docx схема.png"),
            Ok(Command::Add(vec![
                PathBuf::from("notes.txt"),
                PathBuf::from("отчёт.docx"),
                PathBuf::from("схема.png"),
            ]))
        );
    }

    #[test]
    fn add_without_paths_is_rejected() {
        assert!(parse_command("add").is_err());
    }

    #[test]
    fn remove_parses_the_id() {
        assert_eq!(parse_command("remove 7"), Ok(Command::Remove(7)));
        assert_eq!(parse_command("rm 2"), Ok(Command::Remove(2)));
        assert!(parse_command("remove семь").is_err());
        assert!(parse_command("remove").is_err());
    }

    #[test]
    fn command_head_is_case_insensitive() {
        assert_eq!(parse_command("ANALYZE"), Ok(Command::Analyze));
        assert_eq!(parse_command("Quit"), Ok(Command::Quit));
    }

    #[test]
    fn unknown_command_yields_a_hint() {
        let hint = parse_command("frobnicate").unwrap_err();
        assert!(hint.contains("frobnicate"));
    }
}

fn print_help() {
    println!(
        "Команды:\n\
         \x20 add <путь> [...]   добавить файлы (до 10)\n\
         \x20 remove <id>        убрать файл из набора\n\
         \x20 list               показать набор\n\
         \x20 analyze            проанализировать файлы\n\
         \x20 copy               скопировать результат\n\
         \x20 clear              очистить всё\n\
         \x20 help               справка\n\
         \x20 quit               выход"
    );
}
