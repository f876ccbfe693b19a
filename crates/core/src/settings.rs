use std::time::Duration;
use thiserror::Error;

/// Every round shows the target plus three distractors.
pub const OPTIONS_PER_ROUND: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("rounds per team must be > 0")]
    InvalidRoundsPerTeam,

    #[error("round duration must be at least one tick")]
    InvalidRoundTicks,

    #[error("tick length must be > 0")]
    InvalidTick,

    #[error("timeout feedback delay must be longer than the answer feedback delay")]
    InvalidFeedbackDelays,
}

/// Pacing and length of a quiz session.
///
/// Durations are expressed against a time unit (one second by default):
/// - 5 rounds per team
/// - 15 units per round, counted down one unit per tick
/// - spoken prompt 0.5 units after a round opens
/// - next turn 1.5 units after an answer, 2.5 units after a timeout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    rounds_per_team: u32,
    round_ticks: u32,
    tick: Duration,
    prompt_delay: Duration,
    answer_delay: Duration,
    timeout_delay: Duration,
}

impl QuizSettings {
    pub const STANDARD_ROUNDS_PER_TEAM: u32 = 5;
    pub const STANDARD_ROUND_TICKS: u32 = 15;

    #[must_use]
    pub fn standard() -> Self {
        Self::paced(Duration::from_secs(1))
    }

    /// # Errors
    ///
    /// Returns an error when a count or the tick is zero, or when the timeout
    /// delay is not longer than the answer delay.
    pub fn new(
        rounds_per_team: u32,
        round_ticks: u32,
        tick: Duration,
        prompt_delay: Duration,
        answer_delay: Duration,
        timeout_delay: Duration,
    ) -> Result<Self, QuizSettingsError> {
        if rounds_per_team == 0 {
            return Err(QuizSettingsError::InvalidRoundsPerTeam);
        }
        if round_ticks == 0 {
            return Err(QuizSettingsError::InvalidRoundTicks);
        }
        if tick.is_zero() {
            return Err(QuizSettingsError::InvalidTick);
        }
        if timeout_delay <= answer_delay {
            return Err(QuizSettingsError::InvalidFeedbackDelays);
        }

        Ok(Self {
            rounds_per_team,
            round_ticks,
            tick,
            prompt_delay,
            answer_delay,
            timeout_delay,
        })
    }

    /// Standard pacing with every duration scaled to `unit`.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidTick` if `unit` is zero.
    pub fn with_time_unit(unit: Duration) -> Result<Self, QuizSettingsError> {
        if unit.is_zero() {
            return Err(QuizSettingsError::InvalidTick);
        }
        Ok(Self::paced(unit))
    }

    fn paced(unit: Duration) -> Self {
        Self {
            rounds_per_team: Self::STANDARD_ROUNDS_PER_TEAM,
            round_ticks: Self::STANDARD_ROUND_TICKS,
            tick: unit,
            prompt_delay: unit / 2,
            answer_delay: unit * 3 / 2,
            timeout_delay: unit * 5 / 2,
        }
    }

    #[must_use]
    pub fn rounds_per_team(&self) -> u32 {
        self.rounds_per_team
    }

    #[must_use]
    pub fn round_ticks(&self) -> u32 {
        self.round_ticks
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    #[must_use]
    pub fn prompt_delay(&self) -> Duration {
        self.prompt_delay
    }

    #[must_use]
    pub fn answer_delay(&self) -> Duration {
        self.answer_delay
    }

    #[must_use]
    pub fn timeout_delay(&self) -> Duration {
        self.timeout_delay
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pacing_matches_game_rules() {
        let settings = QuizSettings::standard();
        assert_eq!(settings.rounds_per_team(), 5);
        assert_eq!(settings.round_ticks(), 15);
        assert_eq!(settings.tick(), Duration::from_secs(1));
        assert_eq!(settings.prompt_delay(), Duration::from_millis(500));
        assert_eq!(settings.answer_delay(), Duration::from_millis(1500));
        assert_eq!(settings.timeout_delay(), Duration::from_millis(2500));
    }

    #[test]
    fn time_unit_scales_every_delay() {
        let settings = QuizSettings::with_time_unit(Duration::from_millis(100)).unwrap();
        assert_eq!(settings.tick(), Duration::from_millis(100));
        assert_eq!(settings.prompt_delay(), Duration::from_millis(50));
        assert_eq!(settings.answer_delay(), Duration::from_millis(150));
        assert_eq!(settings.timeout_delay(), Duration::from_millis(250));
        assert!(QuizSettings::with_time_unit(Duration::ZERO).is_err());
    }

    #[test]
    fn new_validates_inputs() {
        let s = Duration::from_secs(1);
        assert_eq!(
            QuizSettings::new(0, 15, s, s, s, s * 2),
            Err(QuizSettingsError::InvalidRoundsPerTeam)
        );
        assert_eq!(
            QuizSettings::new(5, 0, s, s, s, s * 2),
            Err(QuizSettingsError::InvalidRoundTicks)
        );
        assert_eq!(
            QuizSettings::new(5, 15, Duration::ZERO, s, s, s * 2),
            Err(QuizSettingsError::InvalidTick)
        );
        assert_eq!(
            QuizSettings::new(5, 15, s, s, s * 2, s * 2),
            Err(QuizSettingsError::InvalidFeedbackDelays)
        );
        assert!(QuizSettings::new(3, 10, s, s, s, s * 2).is_ok());
    }
}
