//! The `quizforge take` command: an interactive terminal quiz session.
//!
//! This is the presentation layer over the core session: it renders the
//! current question with any recorded answer, parses raw terminal input,
//! and forwards it into `Session::record_answer`.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::model::{Question, QuestionKind, QuizMeta, QuizSource, RawAnswer};
use quizforge_core::scorer::score;
use quizforge_core::session::{Session, SessionOptions};
use quizforge_store::{FileStore, SnapshotStore};

use crate::commands::{print_review, print_summary, write_reports};
use crate::config::load_config_from;
use crate::source::load_source;

/// One line of user input, decoded.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Prev,
    Next,
    Submit,
    Reset,
    Clear,
    Quit,
    Answer(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "p" | "prev" => Input::Prev,
        "n" | "next" => Input::Next,
        "submit" => Input::Submit,
        "reset" => Input::Reset,
        "clear" => Input::Clear,
        "q" | "quit" => Input::Quit,
        other => Input::Answer(other.to_string()),
    }
}

/// Turn answer text into the raw answer shape the question expects.
/// Choice selections are 1-based on screen. `None` means unusable input.
fn raw_answer_for(question: &Question, text: &str) -> Option<RawAnswer> {
    match &question.kind {
        QuestionKind::Single { options, .. } => {
            let choice = text.trim().parse::<usize>().ok()?;
            if choice == 0 || choice > options.len() {
                return None;
            }
            Some(RawAnswer::Selection(Some(choice - 1)))
        }
        QuestionKind::Multiple { options, .. } => {
            let mut indices = Vec::new();
            for part in text.split(',') {
                let choice = part.trim().parse::<usize>().ok()?;
                if choice == 0 || choice > options.len() {
                    return None;
                }
                indices.push(choice - 1);
            }
            Some(RawAnswer::Selections(indices))
        }
        QuestionKind::Short { .. } | QuestionKind::Long => {
            Some(RawAnswer::Text(text.to_string()))
        }
    }
}

fn render_question(session: &Session) {
    let Some(question) = session.current() else {
        println!("No questions loaded.");
        return;
    };
    let position = session.index().map(|i| i + 1).unwrap_or(0);
    let required = if question.required { " *" } else { "" };

    println!();
    println!(
        "[{position}/{}] {}{required}",
        session.len(),
        question.prompt
    );

    let recorded = session.answer(&question.id);
    match &question.kind {
        QuestionKind::Single { options, .. } | QuestionKind::Multiple { options, .. } => {
            let selected = |i: usize| -> bool {
                match recorded {
                    Some(quizforge_core::model::Answer::Choice(c)) => *c == i,
                    Some(quizforge_core::model::Answer::Choices(set)) => set.contains(&i),
                    _ => false,
                }
            };
            for (i, option) in options.iter().enumerate() {
                let marker = if selected(i) { "[x]" } else { "[ ]" };
                println!("  {marker} {}. {}", i + 1, option.text);
            }
            match &question.kind {
                QuestionKind::Multiple { .. } => {
                    println!("  (enter option numbers, e.g. 1,3)")
                }
                _ => println!("  (enter an option number)"),
            }
        }
        QuestionKind::Short { .. } | QuestionKind::Long => {
            match recorded {
                Some(answer) => println!("  current answer: {answer}"),
                None => println!("  (type your answer)"),
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    source_spec: String,
    state_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    shuffle: bool,
    fresh: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let state_dir = state_dir.unwrap_or(config.state_dir);
    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.format);

    // A load failure is visible but not fatal: the session starts empty.
    let source = match load_source(&source_spec).await {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Could not load quiz source: {e:#}");
            eprintln!("Starting with an empty session.");
            QuizSource {
                meta: QuizMeta::default(),
                questions: vec![],
            }
        }
    };

    let store = SnapshotStore::new(FileStore::new(&state_dir));
    if fresh {
        use quizforge_core::traits::ProgressStore;
        store.clear()?;
    }

    let mut session = Session::start(
        source,
        SessionOptions {
            force_shuffle: shuffle,
        },
        Box::new(store),
    );

    if !session.meta().title.is_empty() {
        println!("{}", session.meta().title);
    }
    if !session.meta().description.is_empty() {
        println!("{}", session.meta().description);
    }
    println!(
        "{} questions, {:.0} points. Commands: n(ext), p(rev), submit, reset, clear, q(uit)",
        session.len(),
        session.total_points()
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render_question(&session);

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;

        match parse_input(&line) {
            Input::Quit => break,
            Input::Prev => {
                if !session.prev() {
                    println!("Already at the first question.");
                }
            }
            Input::Next => {
                if !session.next() {
                    println!("Already at the last question.");
                }
            }
            Input::Clear => {
                if let Some(question) = session.current() {
                    let cleared = match &question.kind {
                        QuestionKind::Single { .. } => RawAnswer::Selection(None),
                        QuestionKind::Multiple { .. } => RawAnswer::Selections(vec![]),
                        _ => RawAnswer::Text(String::new()),
                    };
                    let id = question.id.clone();
                    session.record_answer(&id, cleared);
                    println!("Answer cleared.");
                }
            }
            Input::Reset => {
                session.reset();
                println!("Session reset.");
            }
            Input::Submit => {
                session.submit();
                let report = score(&session);
                print_summary(&report);
                if session.meta().allow_review {
                    print_review(&report, session.meta().show_correct_after_submit);
                }
                write_reports(&report, &output, &format)?;
                println!("Type reset to retry, or q to quit.");
            }
            Input::Answer(text) => {
                let Some(question) = session.current() else {
                    continue;
                };
                match raw_answer_for(question, &text) {
                    Some(raw) => {
                        let id = question.id.clone();
                        session.record_answer(&id, raw);
                        println!(
                            "Recorded. ({}/{} answered)",
                            session.answered_count(),
                            session.len()
                        );
                    }
                    None => println!("Could not read that as an answer, try again."),
                }
            }
        }

        if session.is_empty() {
            // Nothing to interact with; only quit makes sense.
            println!("Nothing to do without questions. q to quit.");
        }
    }

    Ok(())
}
