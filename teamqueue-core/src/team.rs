//! Teams, alliances and match candidates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of teams on one alliance
pub const ALLIANCE_SIZE: usize = 3;

/// Number of teams in one match
pub const MATCH_SIZE: usize = ALLIANCE_SIZE * 2;

/// Opaque team identifier
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TeamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Three teams playing together
pub type Alliance = [TeamId; ALLIANCE_SIZE];

/// Alliance color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

/// A proposed red vs blue pairing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub red: Alliance,
    pub blue: Alliance,
}

impl MatchCandidate {
    pub fn new(red: Alliance, blue: Alliance) -> Self {
        Self { red, blue }
    }

    /// All six teams, red first
    pub fn teams(&self) -> impl Iterator<Item = &TeamId> {
        self.red.iter().chain(self.blue.iter())
    }

    /// All six teams tagged with their side
    pub fn seats(&self) -> impl Iterator<Item = (Side, &TeamId)> {
        self.red
            .iter()
            .map(|t| (Side::Red, t))
            .chain(self.blue.iter().map(|t| (Side::Blue, t)))
    }

    pub fn contains(&self, team: &TeamId) -> bool {
        self.teams().any(|t| t == team)
    }

    /// Alliance for a side
    pub fn alliance(&self, side: Side) -> &Alliance {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    /// Opposing alliance for a side
    pub fn opponents(&self, side: Side) -> &Alliance {
        match side {
            Side::Red => &self.blue,
            Side::Blue => &self.red,
        }
    }

    /// Copy of this candidate with `out` swapped for `incoming` on the same side.
    ///
    /// Returns `None` if `out` is not in the match.
    pub fn with_replacement(&self, out: &TeamId, incoming: TeamId) -> Option<Self> {
        let mut next = self.clone();
        let slot = next
            .red
            .iter_mut()
            .chain(next.blue.iter_mut())
            .find(|t| **t == *out)?;
        *slot = incoming;
        Some(next)
    }

    /// Same teams on the same sides, ignoring seat order
    pub fn same_lineup(&self, other: &MatchCandidate) -> bool {
        sorted(&self.red) == sorted(&other.red) && sorted(&self.blue) == sorted(&other.blue)
    }
}

fn sorted(alliance: &Alliance) -> [&TeamId; ALLIANCE_SIZE] {
    let mut refs = [&alliance[0], &alliance[1], &alliance[2]];
    refs.sort();
    refs
}
