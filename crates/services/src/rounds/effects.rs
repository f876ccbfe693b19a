use std::time::Duration;

use quiz_core::model::RoundToken;

/// Side effect requested by an engine transition, applied in order by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Invalidate every outstanding timer. Always precedes newly armed timers.
    CancelTimers,
    /// Count the round down, one tick per `tick`.
    StartCountdown { token: RoundToken, tick: Duration },
    /// Hand `text` to the audio collaborator after `delay`.
    ///
    /// A delayed phrase carrying a token is dropped if its round is gone.
    Speak {
        text: String,
        delay: Duration,
        token: Option<RoundToken>,
    },
    /// Call `advance_turn(token)` after `delay`.
    ScheduleAdvance { token: RoundToken, delay: Duration },
    /// The session reached its final round.
    Finished,
}

/// Result of feeding one countdown tick to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Running { remaining: u32 },
    /// The budget ran out: the round timed out and these effects follow.
    Expired(Vec<Effect>),
    /// The token no longer names an open round; stop counting.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    /// No open round: the answer was dropped.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub outcome: AnswerOutcome,
    pub effects: Vec<Effect>,
}

impl AnswerResult {
    pub(crate) fn ignored() -> Self {
        Self {
            outcome: AnswerOutcome::Ignored,
            effects: Vec::new(),
        }
    }
}
