//! Participation ledger
//!
//! Per-team and per-pair counters that drive match scoring. Entries are
//! created on registration and never removed, so a team that leaves the
//! queue keeps its history.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::LedgerError;
use crate::team::{MatchCandidate, Side, TeamId};

/// Counters for a single team
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub matches_played: u32,
    pub rounds_waited: u32,
}

/// Counters for an unordered pair of distinct teams
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PairRecord {
    /// Matches on the same alliance
    pub together: u32,
    /// Matches on opposing alliances
    pub against: u32,
}

/// Canonical key: the two ids in sorted order
type PairKey = (TeamId, TeamId);

fn pair_key(a: &TeamId, b: &TeamId) -> PairKey {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Fairness statistics for every team ever registered
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    teams: FxHashMap<TeamId, TeamRecord>,
    pairs: FxHashMap<PairKey, PairRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create zeroed entries for `team` and for its pairing with every
    /// known team. Returns false if the team was already known.
    pub fn register(&mut self, team: &TeamId) -> bool {
        if self.teams.contains_key(team) {
            return false;
        }

        for other in self.teams.keys() {
            self.pairs.insert(pair_key(team, other), PairRecord::default());
        }
        self.teams.insert(team.clone(), TeamRecord::default());

        true
    }

    pub fn contains(&self, team: &TeamId) -> bool {
        self.teams.contains_key(team)
    }

    /// Number of registered teams
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// All registered teams with their counters, in no particular order
    pub fn teams(&self) -> impl Iterator<Item = (&TeamId, &TeamRecord)> {
        self.teams.iter()
    }

    pub fn team_stats(&self, team: &TeamId) -> Result<TeamRecord, LedgerError> {
        self.teams
            .get(team)
            .copied()
            .ok_or_else(|| LedgerError::UnknownTeam(team.clone()))
    }

    pub fn pair_stats(&self, a: &TeamId, b: &TeamId) -> Result<PairRecord, LedgerError> {
        self.pairs
            .get(&pair_key(a, b))
            .copied()
            .ok_or_else(|| LedgerError::UnknownPair(a.clone(), b.clone()))
    }

    pub fn matches_played(&self, team: &TeamId) -> Result<u32, LedgerError> {
        self.team_stats(team).map(|r| r.matches_played)
    }

    pub fn rounds_waited(&self, team: &TeamId) -> Result<u32, LedgerError> {
        self.team_stats(team).map(|r| r.rounds_waited)
    }

    pub fn played_together(&self, a: &TeamId, b: &TeamId) -> Result<u32, LedgerError> {
        self.pair_stats(a, b).map(|r| r.together)
    }

    pub fn played_against(&self, a: &TeamId, b: &TeamId) -> Result<u32, LedgerError> {
        self.pair_stats(a, b).map(|r| r.against)
    }

    /// Count a committed match.
    ///
    /// Each team's played counter moves by one, each same-alliance pair's
    /// `together` by one and each cross-alliance pair's `against` by one.
    /// Missing entries are logged and skipped.
    pub fn record_match(&mut self, candidate: &MatchCandidate) {
        for side in [Side::Red, Side::Blue] {
            let alliance = candidate.alliance(side);
            for i in 0..alliance.len() {
                for j in (i + 1)..alliance.len() {
                    self.bump_pair(&alliance[i], &alliance[j], |p| p.together += 1);
                }
            }
        }

        for red in &candidate.red {
            for blue in &candidate.blue {
                self.bump_pair(red, blue, |p| p.against += 1);
            }
        }

        for team in candidate.teams() {
            match self.teams.get_mut(team) {
                Some(record) => record.matches_played += 1,
                None => tracing::error!(%team, "team played without a ledger entry"),
            }
        }
    }

    /// Count one round spent waiting
    pub fn record_wait_round(&mut self, team: &TeamId) {
        match self.teams.get_mut(team) {
            Some(record) => record.rounds_waited += 1,
            None => tracing::error!(%team, "team waited without a ledger entry"),
        }
    }

    fn bump_pair(&mut self, a: &TeamId, b: &TeamId, bump: impl FnOnce(&mut PairRecord)) {
        match self.pairs.get_mut(&pair_key(a, b)) {
            Some(record) => bump(record),
            None => tracing::error!(%a, %b, "teams played without a joint ledger entry"),
        }
    }
}
