use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::{ItemId, TeamId};
use crate::model::item::Item;

/// Terminal outcome of a round. `None` while the round is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Wrong,
    TimedOut,
}

impl Feedback {
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Feedback::None)
    }
}

/// Generation number tying timers to the round that armed them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundToken(u64);

impl RoundToken {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }
}

impl fmt::Debug for RoundToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundToken({})", self.0)
    }
}

/// Per-turn state: target, shuffled options, countdown and outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    token: RoundToken,
    team: TeamId,
    target: Item,
    options: Vec<Item>,
    remaining_ticks: u32,
    feedback: Feedback,
}

impl Round {
    /// Builds an open round. `options` must already contain `target` exactly once.
    #[must_use]
    pub fn new(
        token: RoundToken,
        team: TeamId,
        target: Item,
        options: Vec<Item>,
        duration_ticks: u32,
    ) -> Self {
        debug_assert_eq!(
            options.iter().filter(|item| item.id == target.id).count(),
            1,
            "target must appear exactly once among the options"
        );
        Self {
            token,
            team,
            target,
            options,
            remaining_ticks: duration_ticks,
            feedback: Feedback::None,
        }
    }

    #[must_use]
    pub fn token(&self) -> RoundToken {
        self.token
    }

    #[must_use]
    pub fn team(&self) -> TeamId {
        self.team
    }

    #[must_use]
    pub fn target(&self) -> &Item {
        &self.target
    }

    #[must_use]
    pub fn options(&self) -> &[Item] {
        &self.options
    }

    #[must_use]
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.feedback.is_resolved()
    }

    #[must_use]
    pub fn is_target(&self, id: &ItemId) -> bool {
        &self.target.id == id
    }

    /// Counts one tick down. Returns true exactly once: on the tick that
    /// empties the budget of a still-open round.
    pub fn tick(&mut self) -> bool {
        if !self.is_open() || self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        self.remaining_ticks == 0
    }

    /// Records the outcome. Returns false if the round was already resolved.
    pub fn resolve(&mut self, feedback: Feedback) -> bool {
        if !self.is_open() || !feedback.is_resolved() {
            return false;
        }
        self.feedback = feedback;
        true
    }
}
