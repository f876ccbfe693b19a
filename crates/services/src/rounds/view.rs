use serde::Serialize;

use quiz_core::model::{Feedback, Item, RoundToken, Team, TeamId};

use super::engine::{Session, SessionPhase};

/// Everything a presentation layer needs to draw the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSnapshot {
    pub phase: SessionPhase,
    pub round: u32,
    pub total_rounds: u32,
    /// Identifies the round on screen; pass it back with an answer.
    pub token: Option<RoundToken>,
    pub current_team: Option<TeamId>,
    pub teams: Vec<Team>,
    pub target: Option<Item>,
    pub options: Vec<Item>,
    pub feedback: Feedback,
    pub remaining_ticks: u32,
}

impl QuizSnapshot {
    #[must_use]
    pub fn setup() -> Self {
        Self {
            phase: SessionPhase::Setup,
            round: 0,
            total_rounds: 0,
            token: None,
            current_team: None,
            teams: Vec::new(),
            target: None,
            options: Vec::new(),
            feedback: Feedback::None,
            remaining_ticks: 0,
        }
    }

    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let round = session.round();
        Self {
            phase: session.phase(),
            round: session.current_round(),
            total_rounds: session.total_rounds(),
            token: round.map(|round| round.token()),
            current_team: round.map(|_| session.current_team()),
            teams: session.teams().to_vec(),
            target: round.map(|round| round.target().clone()),
            options: round.map(|round| round.options().to_vec()).unwrap_or_default(),
            feedback: round.map_or(Feedback::None, |round| round.feedback()),
            remaining_ticks: round.map_or(0, |round| round.remaining_ticks()),
        }
    }

    #[must_use]
    pub fn current_team(&self) -> Option<&Team> {
        let id = self.current_team?;
        self.teams.get(id.index())
    }

    /// Option slot (zero-based) holding the target, for highlighting.
    #[must_use]
    pub fn target_slot(&self) -> Option<usize> {
        let target = self.target.as_ref()?;
        self.options.iter().position(|item| item.id == target.id)
    }
}

impl Default for QuizSnapshot {
    fn default() -> Self {
        Self::setup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::QuizEngine;
    use quiz_core::model::TeamCount;
    use quiz_core::{QuizSettings, catalog};

    #[test]
    fn setup_snapshot_is_empty() {
        let snapshot = QuizSnapshot::default();
        assert_eq!(snapshot.phase, SessionPhase::Setup);
        assert!(snapshot.current_team().is_none());
        assert!(snapshot.target_slot().is_none());
    }

    #[test]
    fn playing_snapshot_mirrors_round() {
        let roster = catalog::roster_for(None).unwrap();
        let mut engine = QuizEngine::seeded(roster, QuizSettings::standard(), 9);
        engine.initialize(TeamCount::new(4).unwrap()).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Playing);
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.total_rounds, 20);
        assert_eq!(snapshot.teams.len(), 4);
        assert_eq!(snapshot.current_team().unwrap().name(), "Red Lions");
        assert_eq!(snapshot.options.len(), 4);
        assert_eq!(snapshot.remaining_ticks, 15);
        assert_eq!(snapshot.token, engine.round().map(|round| round.token()));
        let slot = snapshot.target_slot().unwrap();
        assert_eq!(Some(&snapshot.options[slot]), snapshot.target.as_ref());
    }
}
