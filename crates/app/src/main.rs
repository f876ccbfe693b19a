mod args;
mod render;

use std::io::Write as _;
use std::sync::Arc;

use quiz_core::QuizSettings;
use quiz_core::catalog;
use services::{
    AnswerOutcome, AudioError, AudioPrompter, FallbackAudio, QuizEngine, QuizLoopService,
    SessionPhase, SilentAudio, TracingAudio,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, print_usage};
use crate::render::{Input, Screen};

/// Stand-in for a speech engine: prints the phrase.
struct TerminalAudio;

impl AudioPrompter for TerminalAudio {
    fn speak(&self, text: &str) -> Result<(), AudioError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "  🔊 {text}").map_err(|err| AudioError::Device(err.to_string()))
    }
}

fn print_line(text: &str) {
    println!("{text}");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|_| print_usage())?;
    let Some(args) = parsed else {
        print_usage();
        return Ok(());
    };

    let settings = QuizSettings::with_time_unit(args.time_unit)?;
    let engine = QuizEngine::from_catalog(args.group, settings, args.seed)?;
    let audio: Arc<dyn AudioPrompter> = if args.mute {
        Arc::new(SilentAudio)
    } else {
        Arc::new(FallbackAudio::new(TerminalAudio, TracingAudio))
    };
    let quiz = QuizLoopService::new(engine, audio);

    let title = args.group.map_or("All the animals", |group| {
        catalog::group_info(group).title
    });
    print_line(&format!("Listen & Find: {title}"));

    let mut updates = quiz.subscribe();
    quiz.start(args.teams)?;

    let mut screen = Screen::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let snapshot = updates.borrow_and_update().clone();
        if let Some(text) = screen.update(&snapshot, quiz.results().as_ref()) {
            print_line(&text);
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Replay => quiz.replay_prompt(),
                    Input::PlayAgain => {
                        if snapshot.phase != SessionPhase::Playing {
                            quiz.play_again(args.teams)?;
                        }
                    }
                    Input::Answer(slot) => {
                        let (Some(token), Some(item)) = (snapshot.token, snapshot.options.get(slot))
                        else {
                            print_line("Pick one of the numbered options.");
                            continue;
                        };
                        if quiz.answer_for(token, &item.id) == AnswerOutcome::Ignored {
                            tracing::debug!(slot, "answer arrived after the round closed");
                        }
                    }
                    Input::Unknown => print_line("Type a number, r, p or q."),
                }
            }
        }
    }

    quiz.restart();
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
