use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use quiz_core::model::{ItemId, QuizResults, RoundToken, TeamCount};

use super::effects::{AnswerOutcome, Effect, Tick};
use super::engine::QuizEngine;
use super::timers::RoundTimers;
use super::view::QuizSnapshot;
use crate::audio::AudioPrompter;
use crate::error::QuizError;

/// Engine and its timers live under one lock so a transition and the
/// timers it arms are applied as a single step.
struct LoopState {
    engine: QuizEngine,
    timers: RoundTimers,
}

struct LoopInner {
    state: Mutex<LoopState>,
    audio: Arc<dyn AudioPrompter>,
    updates: watch::Sender<QuizSnapshot>,
}

/// Drives a [`QuizEngine`] in real time on the Tokio runtime.
///
/// Engine effects become timer tasks: a per-tick countdown, the delayed
/// prompt, and the delayed turn advance. Every state change is published as a
/// [`QuizSnapshot`] on a watch channel.
///
/// Methods that apply effects spawn tasks and must be called from within a
/// Tokio runtime.
#[derive(Clone)]
pub struct QuizLoopService {
    inner: Arc<LoopInner>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(engine: QuizEngine, audio: Arc<dyn AudioPrompter>) -> Self {
        let (updates, _) = watch::channel(engine.snapshot());
        Self {
            inner: Arc::new(LoopInner {
                state: Mutex::new(LoopState {
                    engine,
                    timers: RoundTimers::default(),
                }),
                audio,
                updates,
            }),
        }
    }

    fn from_weak(weak: &Weak<LoopInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn state(&self) -> MutexGuard<'_, LoopState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a session for `team_count` teams.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` if a session exists; call `restart` first.
    pub fn start(&self, team_count: TeamCount) -> Result<QuizSnapshot, QuizError> {
        self.drive(|engine| match engine.initialize(team_count) {
            Ok(effects) => (Ok(engine.snapshot()), effects),
            Err(err) => (Err(err), Vec::new()),
        })
    }

    /// Submit an answer for the round in play.
    pub fn answer(&self, selected: &ItemId) -> AnswerOutcome {
        self.drive(|engine| {
            let result = engine.submit_answer(selected);
            (result.outcome, result.effects)
        })
    }

    /// Submit an answer only if `token`'s round is still the one in play.
    ///
    /// Use the token from the snapshot the player was looking at, so a choice
    /// made just before a turn change is not applied to the next team.
    pub fn answer_for(&self, token: RoundToken, selected: &ItemId) -> AnswerOutcome {
        self.drive(|engine| {
            if !engine.is_current(token) {
                return (AnswerOutcome::Ignored, Vec::new());
            }
            let result = engine.submit_answer(selected);
            (result.outcome, result.effects)
        })
    }

    /// Speak the current prompt again.
    pub fn replay_prompt(&self) {
        self.drive(|engine| ((), engine.replay_prompt()));
    }

    /// Abandon the session and return to setup.
    pub fn restart(&self) {
        self.drive(|engine| ((), engine.restart()));
    }

    /// Restart and immediately start a fresh session.
    ///
    /// # Errors
    ///
    /// Propagates `QuizError` from session start.
    pub fn play_again(&self, team_count: TeamCount) -> Result<QuizSnapshot, QuizError> {
        self.restart();
        self.start(team_count)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.inner.updates.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.state().engine.snapshot()
    }

    #[must_use]
    pub fn results(&self) -> Option<QuizResults> {
        self.state().engine.results()
    }

    /// Number of timer tasks still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state().timers.pending()
    }

    /// Runs one engine transition and applies its effects under the same lock.
    /// Immediate speech happens after the lock is released.
    fn drive<T>(&self, step: impl FnOnce(&mut QuizEngine) -> (T, Vec<Effect>)) -> T {
        let mut state = self.state();
        let (value, effects) = step(&mut state.engine);
        let spoken = self.apply(&mut state, effects);
        drop(state);

        for text in spoken {
            self.speak(&text);
        }
        value
    }

    fn apply(&self, state: &mut LoopState, effects: Vec<Effect>) -> Vec<String> {
        let mut spoken = Vec::new();
        for effect in effects {
            match effect {
                Effect::CancelTimers => {
                    state.timers.cancel_all();
                }
                Effect::StartCountdown { token, tick } => {
                    state.timers.arm(self.spawn_countdown(token, tick));
                }
                Effect::Speak { text, delay, token } => {
                    if delay.is_zero() {
                        spoken.push(text);
                    } else {
                        state.timers.arm(self.spawn_speak(text, delay, token));
                    }
                }
                Effect::ScheduleAdvance { token, delay } => {
                    state.timers.arm(self.spawn_advance(token, delay));
                }
                Effect::Finished => {
                    if let Some(results) = state.engine.results() {
                        info!(
                            winner = results.winner().map(|s| s.name.as_str()),
                            tie = results.is_tie(),
                            "quiz results ready"
                        );
                    }
                }
            }
        }
        self.inner.updates.send_replace(state.engine.snapshot());
        spoken
    }

    fn speak(&self, text: &str) {
        if let Err(err) = self.inner.audio.speak(text) {
            warn!(error = %err, phrase = text, "speech failed");
        }
    }

    fn spawn_countdown(&self, token: RoundToken, tick: Duration) -> tokio::task::JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tick).await;
                let Some(service) = Self::from_weak(&weak) else {
                    return;
                };
                let running = service.drive(|engine| match engine.tick(token) {
                    Tick::Running { .. } => (true, Vec::new()),
                    Tick::Expired(effects) => (false, effects),
                    Tick::Stale => (false, Vec::new()),
                });
                if !running {
                    return;
                }
            }
        })
    }

    fn spawn_speak(
        &self,
        text: String,
        delay: Duration,
        token: Option<RoundToken>,
    ) -> tokio::task::JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(service) = Self::from_weak(&weak) else {
                return;
            };
            let live = token.is_none_or(|token| service.state().engine.is_current(token));
            if live {
                service.speak(&text);
            }
        })
    }

    fn spawn_advance(&self, token: RoundToken, delay: Duration) -> tokio::task::JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(service) = Self::from_weak(&weak) else {
                return;
            };
            service.drive(|engine| ((), engine.advance_turn(token)));
        })
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("engine", &self.state().engine)
            .finish_non_exhaustive()
    }
}
