use std::fmt::Write as _;

use quiz_core::Phrasebook;
use quiz_core::model::{Feedback, QuizResults, Team};
use services::{QuizSnapshot, SessionPhase};

/// A line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Zero-based option slot.
    Answer(usize),
    Replay,
    PlayAgain,
    Quit,
    Unknown,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "replay" => Input::Replay,
            "p" | "play" => Input::PlayAgain,
            "q" | "quit" | "exit" => Input::Quit,
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map_or(Input::Unknown, Input::Answer),
        }
    }
}

/// Remembers what is already on screen so only changes get printed.
#[derive(Debug, Default)]
pub struct Screen {
    shown: Option<(SessionPhase, u32, Feedback)>,
    last_ticks: Option<u32>,
}

/// Countdown values at or below this are called out.
const HURRY_TICKS: u32 = 5;

impl Screen {
    /// Text to print for `snapshot`, if anything changed.
    pub fn update(
        &mut self,
        snapshot: &QuizSnapshot,
        results: Option<&QuizResults>,
    ) -> Option<String> {
        let key = (snapshot.phase, snapshot.round, snapshot.feedback);
        if self.shown != Some(key) {
            self.shown = Some(key);
            self.last_ticks = Some(snapshot.remaining_ticks);
            return Some(match snapshot.phase {
                SessionPhase::Setup => "Back at the start. Type p to play.".to_string(),
                SessionPhase::Playing if snapshot.feedback == Feedback::None => {
                    round_screen(snapshot)
                }
                SessionPhase::Playing => feedback_line(snapshot),
                SessionPhase::Finished => results.map_or_else(
                    || "Game over.".to_string(),
                    results_screen,
                ),
            });
        }

        let ticking = snapshot.phase == SessionPhase::Playing && snapshot.feedback == Feedback::None;
        if ticking && self.last_ticks != Some(snapshot.remaining_ticks) {
            self.last_ticks = Some(snapshot.remaining_ticks);
            if snapshot.remaining_ticks <= HURRY_TICKS {
                return Some(format!("  ⏱  {}s", snapshot.remaining_ticks));
            }
        }
        None
    }
}

/// Team icon and name in the team's colour.
pub fn team_label(team: &Team) -> String {
    let code = match team.color() {
        "red" => "31",
        "green" => "32",
        "yellow" => "33",
        "blue" => "34",
        _ => return format!("{} {}", team.icon(), team.name()),
    };
    format!("\x1b[{code}m{} {}\x1b[0m", team.icon(), team.name())
}

pub fn round_screen(snapshot: &QuizSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "── Round {} / {} ──────────────────────────",
        snapshot.round, snapshot.total_rounds
    );
    if snapshot.teams.len() > 1 {
        let scores: Vec<String> = snapshot
            .teams
            .iter()
            .map(|team| format!("{} {}", team_label(team), team.score()))
            .collect();
        let _ = writeln!(out, "{}", scores.join("   "));
        if let Some(team) = snapshot.current_team() {
            let _ = writeln!(out, "Turn: {}", team_label(team));
        }
    } else if let Some(team) = snapshot.teams.first() {
        let _ = writeln!(out, "Score: {}", team.score());
    }
    if let Some(target) = &snapshot.target {
        let _ = writeln!(out, "Listen & find: {}", Phrasebook::arabic().prompt(target));
    }
    for (slot, item) in snapshot.options.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {} {}", slot + 1, item.emoji, item.label);
    }
    let _ = write!(
        out,
        "{}s on the clock. Answer 1-{}, r to replay the sound.",
        snapshot.remaining_ticks,
        snapshot.options.len()
    );
    out
}

pub fn feedback_line(snapshot: &QuizSnapshot) -> String {
    let answer = snapshot
        .target
        .as_ref()
        .map(|item| format!("{} {} ({})", item.emoji, item.label, item.transliteration))
        .unwrap_or_default();
    match snapshot.feedback {
        Feedback::Correct => format!("✅ Correct! It was {answer}."),
        Feedback::Wrong => format!("❌ Try again! It was {answer}."),
        Feedback::TimedOut => format!("⏰ Time's up! It was {answer}."),
        Feedback::None => String::new(),
    }
}

pub fn results_screen(results: &QuizResults) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    if let Some(band) = results.solo_band() {
        let (headline, native) = Phrasebook::band_headline(band);
        let score = results.winner().map_or(0, |s| s.score);
        let _ = writeln!(out, "🏆 {headline}  {native}");
        let _ = writeln!(out, "Final score: {score} / {}", results.total_rounds());
    } else {
        if results.is_tie() {
            let _ = writeln!(out, "🤝 It's a tie!");
        } else if let Some(winner) = results.winner() {
            let _ = writeln!(out, "🏆 {} wins!", winner.name);
        }
        for standing in results.standings() {
            let _ = writeln!(
                out,
                "  {}. {:<16} {} / {}",
                standing.rank,
                standing.name,
                standing.score,
                results.rounds_per_team()
            );
        }
    }
    let _ = write!(out, "Type p to play again or q to quit.");
    out
}
