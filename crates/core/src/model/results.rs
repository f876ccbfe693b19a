use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::TeamId;
use crate::model::team::Team;

/// Qualitative grade for a solo finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoloBand {
    /// Every round answered correctly.
    Perfect,
    /// More than 60% correct.
    WellDone,
    GoodEffort,
}

impl SoloBand {
    /// Bands a solo score against the number of rounds played.
    #[must_use]
    pub fn for_score(score: u32, total_rounds: u32) -> Self {
        if total_rounds > 0 && score >= total_rounds {
            return SoloBand::Perfect;
        }
        // score / total > 0.6, kept in integers
        if u64::from(score) * 100 > u64::from(total_rounds) * 60 {
            SoloBand::WellDone
        } else {
            SoloBand::GoodEffort
        }
    }
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub name: String,
    pub score: u32,
    /// Competition rank: equal scores share a rank (1, 1, 3).
    pub rank: u32,
}

/// Final outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    standings: Vec<Standing>,
    team_count: usize,
    rounds_per_team: u32,
    total_rounds: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl QuizResults {
    /// Ranks teams by score, highest first. Teams with equal scores keep
    /// their original order.
    #[must_use]
    pub fn from_teams(
        teams: &[Team],
        rounds_per_team: u32,
        total_rounds: u32,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut ordered: Vec<&Team> = teams.iter().collect();
        // stable, so ties stay in index order
        ordered.sort_by(|left, right| right.score().cmp(&left.score()));

        let mut standings: Vec<Standing> = Vec::with_capacity(ordered.len());
        for (position, team) in ordered.into_iter().enumerate() {
            let rank = match standings.last() {
                Some(prev) if prev.score == team.score() => prev.rank,
                _ => u32::try_from(position + 1).unwrap_or(u32::MAX),
            };
            standings.push(Standing {
                team_id: team.id(),
                name: team.name().to_string(),
                score: team.score(),
                rank,
            });
        }

        Self {
            standings,
            team_count: teams.len(),
            rounds_per_team,
            total_rounds,
            started_at,
            finished_at,
        }
    }

    #[must_use]
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// True when more than one team plays and the top two scores match.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        match self.standings.as_slice() {
            [first, second, ..] => first.score == second.score,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_solo(&self) -> bool {
        self.team_count == 1
    }

    /// Solo sessions are graded in bands; team sessions have no band.
    #[must_use]
    pub fn solo_band(&self) -> Option<SoloBand> {
        if !self.is_solo() {
            return None;
        }
        self.winner()
            .map(|standing| SoloBand::for_score(standing.score, self.total_rounds))
    }

    #[must_use]
    pub fn rounds_per_team(&self) -> u32 {
        self.rounds_per_team
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}
