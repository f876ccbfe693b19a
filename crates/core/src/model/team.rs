use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TeamId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TeamCountError {
    #[error("team count must be between 1 and {max}, got {got}")]
    OutOfRange { got: u8, max: u8 },
}

/// Number of teams taking part in a session: solo (1) or team play (2 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamCount(u8);

impl TeamCount {
    pub const MAX: u8 = 4;
    pub const SOLO: TeamCount = TeamCount(1);

    /// # Errors
    ///
    /// Returns `TeamCountError::OutOfRange` unless `count` is in `1..=4`.
    pub fn new(count: u8) -> Result<Self, TeamCountError> {
        if (1..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(TeamCountError::OutOfRange {
                got: count,
                max: Self::MAX,
            })
        }
    }

    #[must_use]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn is_solo(self) -> bool {
        self.0 == 1
    }

    pub fn ids(self) -> impl Iterator<Item = TeamId> {
        (0..self.0).map(TeamId::new)
    }
}

impl TryFrom<u8> for TeamCount {
    type Error = TeamCountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display metadata for a team slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPreset {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

/// A team and its running score.
///
/// The score only ever grows during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    color: String,
    icon: String,
    score: u32,
}

impl Team {
    #[must_use]
    pub fn from_preset(id: TeamId, preset: &TeamPreset) -> Self {
        Self {
            id,
            name: preset.name.to_string(),
            color: preset.color.to_string(),
            icon: preset.icon.to_string(),
            score: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> TeamId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn award_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESET: TeamPreset = TeamPreset {
        name: "Lions",
        color: "red",
        icon: "🦁",
    };

    #[test]
    fn team_count_accepts_presets_only() {
        for n in 1..=4 {
            assert_eq!(TeamCount::new(n).unwrap().get(), usize::from(n));
        }
        assert_eq!(
            TeamCount::try_from(0),
            Err(TeamCountError::OutOfRange { got: 0, max: 4 })
        );
        assert!(TeamCount::new(5).is_err());
        assert!(TeamCount::SOLO.is_solo());
    }

    #[test]
    fn team_count_lists_ids_in_order() {
        let ids: Vec<_> = TeamCount::new(3).unwrap().ids().map(|id| id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn team_starts_at_zero_and_only_grows() {
        let mut team = Team::from_preset(TeamId::new(0), &PRESET);
        assert_eq!(team.score(), 0);
        team.award_point();
        team.award_point();
        assert_eq!(team.score(), 2);
        assert_eq!(team.name(), "Lions");
        assert_eq!(team.color(), "red");
    }
}
