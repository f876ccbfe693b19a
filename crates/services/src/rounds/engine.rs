use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use quiz_core::model::{
    Feedback, ItemGroup, ItemId, QuizResults, Roster, Round, RoundToken, Team, TeamCount, TeamId,
};
use quiz_core::{Clock, Phrasebook, QuizSettings, catalog};

use super::effects::{AnswerOutcome, AnswerResult, Effect, Tick};
use super::plan::RoundBuilder;
use super::view::QuizSnapshot;
use crate::error::QuizError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SessionPhase {
    Setup,
    Playing,
    Finished,
}

/// Outcome of one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u32,
    pub team: TeamId,
    pub target: ItemId,
    pub feedback: Feedback,
}

/// One quiz session: teams, turn order, and the round in play.
#[derive(Debug, Clone)]
pub struct Session {
    teams: Vec<Team>,
    current_round: u32,
    total_rounds: u32,
    current_team: usize,
    round: Option<Round>,
    phase: SessionPhase,
    history: Vec<RoundRecord>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Session {
    fn new(team_count: TeamCount, rounds_per_team: u32, started_at: DateTime<Utc>) -> Self {
        let teams = team_count
            .ids()
            .map(|id| Team::from_preset(id, catalog::team_preset(id.index())))
            .collect();
        let count = u32::try_from(team_count.get()).unwrap_or(1);

        Self {
            teams,
            current_round: 1,
            total_rounds: rounds_per_team.saturating_mul(count),
            current_team: 0,
            round: None,
            phase: SessionPhase::Playing,
            history: Vec::new(),
            started_at,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// One-based number of the round in play (or the last round once finished).
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    #[must_use]
    pub fn current_team(&self) -> TeamId {
        self.teams
            .get(self.current_team)
            .map_or_else(|| TeamId::new(0), Team::id)
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Resolved rounds, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    fn open_round_mut(&mut self, token: RoundToken) -> Option<&mut Round> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        self.round
            .as_mut()
            .filter(|round| round.token() == token && round.is_open())
    }

    fn record(&mut self, feedback: Feedback) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        self.history.push(RoundRecord {
            round: self.current_round,
            team: round.team(),
            target: round.target().id.clone(),
            feedback,
        });
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Round/turn state machine for one quiz.
///
/// Every transition returns the [`Effect`]s a driver must apply. Timers are
/// tied to a per-round [`RoundToken`]; callbacks carrying an old token are
/// ignored, so a late timer from one round can never touch the next.
pub struct QuizEngine<R = StdRng> {
    roster: Roster,
    settings: QuizSettings,
    phrases: Phrasebook,
    clock: Clock,
    rng: R,
    session: Option<Session>,
    generation: u64,
}

impl QuizEngine<StdRng> {
    #[must_use]
    pub fn new(roster: Roster, settings: QuizSettings) -> Self {
        Self::with_rng(roster, settings, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn seeded(roster: Roster, settings: QuizSettings, seed: u64) -> Self {
        Self::with_rng(roster, settings, StdRng::seed_from_u64(seed))
    }

    /// Engine over the built-in catalog, optionally limited to one group.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Roster` if the selection cannot fill a round.
    pub fn from_catalog(
        group: Option<ItemGroup>,
        settings: QuizSettings,
        seed: Option<u64>,
    ) -> Result<Self, QuizError> {
        let roster = catalog::roster_for(group)?;
        Ok(match seed {
            Some(seed) => Self::seeded(roster, settings, seed),
            None => Self::new(roster, settings),
        })
    }
}

impl<R: Rng> QuizEngine<R> {
    #[must_use]
    pub fn with_rng(roster: Roster, settings: QuizSettings, rng: R) -> Self {
        Self {
            roster,
            settings,
            phrases: Phrasebook::default(),
            clock: Clock::default(),
            rng,
            session: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_phrasebook(mut self, phrases: Phrasebook) -> Self {
        self.phrases = phrases;
        self
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map_or(SessionPhase::Setup, Session::phase)
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.session.as_ref().and_then(Session::round)
    }

    /// True while `token` names the round in play.
    #[must_use]
    pub fn is_current(&self, token: RoundToken) -> bool {
        self.round().is_some_and(|round| round.token() == token)
    }

    /// Set up teams with zero scores and open round 1 for the first team.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless the engine is in setup.
    pub fn initialize(&mut self, team_count: TeamCount) -> Result<Vec<Effect>, QuizError> {
        if self.session.is_some() {
            return Err(QuizError::AlreadyStarted);
        }

        let session = Session::new(
            team_count,
            self.settings.rounds_per_team(),
            self.clock.now(),
        );
        info!(
            teams = session.team_count(),
            total_rounds = session.total_rounds(),
            roster = self.roster.len(),
            "quiz session started"
        );
        self.session = Some(session);
        Ok(self.start_round(0))
    }

    fn start_round(&mut self, team_index: usize) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let Some(team) = session.teams.get(team_index).map(Team::id) else {
            return Vec::new();
        };

        self.generation += 1;
        let token = RoundToken::new(self.generation);
        let plan = RoundBuilder::new(&self.roster).build(&mut self.rng);
        let prompt = self.phrases.prompt(&plan.target);

        debug!(
            round = session.current_round,
            team = %team,
            target = %plan.target.id,
            ?token,
            "round started"
        );
        session.current_team = team_index;
        session.round = Some(Round::new(
            token,
            team,
            plan.target,
            plan.options,
            self.settings.round_ticks(),
        ));

        vec![
            Effect::CancelTimers,
            Effect::StartCountdown {
                token,
                tick: self.settings.tick(),
            },
            Effect::Speak {
                text: prompt,
                delay: self.settings.prompt_delay(),
                token: Some(token),
            },
        ]
    }

    /// Answer the open round. A round that already has feedback ignores the call.
    pub fn submit_answer(&mut self, selected: &ItemId) -> AnswerResult {
        let answer_delay = self.settings.answer_delay();
        let try_again = self.phrases.try_again().to_string();

        let Some(session) = self.session.as_mut() else {
            return AnswerResult::ignored();
        };
        let Some(token) = session.round().map(Round::token) else {
            return AnswerResult::ignored();
        };
        let Some(round) = session.open_round_mut(token) else {
            debug!(item = %selected, "answer ignored, round already resolved");
            return AnswerResult::ignored();
        };

        let correct = round.is_target(selected);
        let feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Wrong
        };
        round.resolve(feedback);

        let mut effects = vec![Effect::CancelTimers];
        if correct {
            if let Some(team) = session.teams.get_mut(session.current_team) {
                team.award_point();
            }
        } else {
            effects.push(Effect::Speak {
                text: try_again,
                delay: Duration::ZERO,
                token: None,
            });
        }
        session.record(feedback);
        effects.push(Effect::ScheduleAdvance {
            token,
            delay: answer_delay,
        });

        debug!(round = session.current_round, ?feedback, "answer recorded");
        AnswerResult {
            outcome: if correct {
                AnswerOutcome::Correct
            } else {
                AnswerOutcome::Wrong
            },
            effects,
        }
    }

    /// Count one tick off the round named by `token`.
    ///
    /// Emptying the budget times the round out exactly once; later ticks are stale.
    pub fn tick(&mut self, token: RoundToken) -> Tick {
        let timeout_delay = self.settings.timeout_delay();
        let times_up = self.phrases.times_up().to_string();

        let Some(session) = self.session.as_mut() else {
            return Tick::Stale;
        };
        let Some(round) = session.open_round_mut(token) else {
            return Tick::Stale;
        };
        if !round.tick() {
            return Tick::Running {
                remaining: round.remaining_ticks(),
            };
        }

        round.resolve(Feedback::TimedOut);
        session.record(Feedback::TimedOut);
        debug!(round = session.current_round, "round timed out");

        Tick::Expired(vec![
            Effect::CancelTimers,
            Effect::Speak {
                text: times_up,
                delay: Duration::ZERO,
                token: None,
            },
            Effect::ScheduleAdvance {
                token,
                delay: timeout_delay,
            },
        ])
    }

    /// Move to the next team's turn, or finish after the last planned round.
    ///
    /// Only the resolved round named by `token` can be advanced.
    pub fn advance_turn(&mut self, token: RoundToken) -> Vec<Effect> {
        let now = self.clock.now();
        let next_team = {
            let Some(session) = self.session.as_mut() else {
                return Vec::new();
            };
            if session.phase != SessionPhase::Playing {
                return Vec::new();
            }
            let resolved = session
                .round
                .as_ref()
                .is_some_and(|round| round.token() == token && !round.is_open());
            if !resolved {
                return Vec::new();
            }

            if session.current_round >= session.total_rounds {
                session.phase = SessionPhase::Finished;
                session.round = None;
                session.finished_at = Some(now);
                info!(rounds = session.total_rounds, "quiz session finished");
                return vec![Effect::CancelTimers, Effect::Finished];
            }

            session.current_round += 1;
            (session.current_team + 1) % session.teams.len()
        };

        self.start_round(next_team)
    }

    /// Drop the session and return to setup. Scores are discarded.
    pub fn restart(&mut self) -> Vec<Effect> {
        if let Some(session) = self.session.take() {
            info!(round = session.current_round, "quiz session discarded");
        }
        vec![Effect::CancelTimers]
    }

    /// Speak the current prompt again, right away.
    #[must_use]
    pub fn replay_prompt(&self) -> Vec<Effect> {
        self.round()
            .filter(|round| round.is_open())
            .map(|round| {
                vec![Effect::Speak {
                    text: self.phrases.prompt(round.target()),
                    delay: Duration::ZERO,
                    token: Some(round.token()),
                }]
            })
            .unwrap_or_default()
    }

    /// Final ranking, once the session has finished.
    #[must_use]
    pub fn results(&self) -> Option<QuizResults> {
        let session = self.session.as_ref()?;
        if session.phase != SessionPhase::Finished {
            return None;
        }
        Some(QuizResults::from_teams(
            &session.teams,
            self.settings.rounds_per_team(),
            session.total_rounds,
            session.started_at,
            session.finished_at.unwrap_or(session.started_at),
        ))
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.session
            .as_ref()
            .map_or_else(QuizSnapshot::setup, QuizSnapshot::from_session)
    }
}

impl<R> fmt::Debug for QuizEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("roster_len", &self.roster.len())
            .field("generation", &self.generation)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
