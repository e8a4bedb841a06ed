//! Queue scheduler - waiting list and match selection
//!
//! Level 1 - Orchestration and Level 2 - Phases
//!
//! A match is drawn at random from the waiting list, then refined by
//! repeatedly swapping its worst-scoring team for another waiting team.
//! Every candidate tried is kept in a [`RankTracker`] and the best one is
//! committed to the ledger.
//!
//! While refining, the waiting list always holds exactly the waiting teams
//! that are not in the current best candidate.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SchedulerConfig;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::rank::RankTracker;
use crate::team::{MatchCandidate, Side, TeamId, MATCH_SIZE};

/// A candidate and its score (lower = better)
#[derive(Clone, Debug)]
struct Scored {
    candidate: MatchCandidate,
    score: i64,
}

fn by_score(a: &Scored, b: &Scored) -> Ordering {
    a.score.cmp(&b.score)
}

type Candidates = RankTracker<Scored, fn(&Scored, &Scored) -> Ordering>;

/// Event queue: waiting teams plus the statistics used to match them
pub struct TeamQueue {
    waiting: Vec<TeamId>,
    ledger: Ledger,
    config: SchedulerConfig,
    rng: ChaCha8Rng,
}

impl TeamQueue {
    /// Create a queue with every roster team pre-registered in the ledger
    pub fn new(roster: impl IntoIterator<Item = TeamId>, config: SchedulerConfig) -> Self {
        let mut ledger = Ledger::new();
        for team in roster {
            ledger.register(&team);
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            waiting: Vec::new(),
            ledger,
            config,
            rng,
        }
    }

    /// Add a team to the waiting list.
    ///
    /// Returns false if the team is already waiting. Unknown teams are
    /// registered in the ledger first.
    pub fn queue_team(&mut self, team: impl Into<TeamId>) -> bool {
        let team = team.into();
        if self.waiting.contains(&team) {
            return false;
        }

        if self.ledger.register(&team) {
            tracing::debug!(%team, "registered new team");
        }
        self.waiting.push(team);

        true
    }

    /// Remove a team from the waiting list. Ledger history is kept.
    pub fn remove_team(&mut self, team: &TeamId) -> bool {
        match self.waiting.iter().position(|t| t == team) {
            Some(i) => {
                self.waiting.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn waiting_teams(&self) -> &[TeamId] {
        &self.waiting
    }

    pub fn contains(&self, team: &TeamId) -> bool {
        self.waiting.contains(team)
    }

    /// Number of waiting teams
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ========================================================================
    // Level 1 - Orchestration
    // ========================================================================

    /// Select, commit and return the next match.
    ///
    /// Returns `None` without touching any state when fewer than six teams
    /// are waiting. Otherwise the six chosen teams leave the waiting list,
    /// their match is recorded and every team left behind is charged one
    /// waiting round.
    pub fn new_match(&mut self) -> Option<MatchCandidate> {
        if self.waiting.len() < MATCH_SIZE {
            return None;
        }

        let best = self.determine_best_match()?;
        self.commit(&best);

        Some(best)
    }

    // ========================================================================
    // Level 2 - Phases
    // ========================================================================

    /// Draw a random match and refine it for up to `refinement_rounds`
    fn determine_best_match(&mut self) -> Option<MatchCandidate> {
        let initial = self.generate_random_match()?;
        if self.waiting.is_empty() {
            return Some(initial);
        }

        Some(self.refine(initial))
    }

    /// Improve on `initial` by swapping out its worst team until no round
    /// helps. The result never scores above `initial`.
    fn refine(&mut self, initial: MatchCandidate) -> MatchCandidate {
        let score = self.match_score(&initial);
        let mut candidates: Candidates = RankTracker::new(
            Scored {
                candidate: initial,
                score,
            },
            by_score as fn(&Scored, &Scored) -> Ordering,
        );

        let mut rounds = 0;
        while rounds < self.config.refinement_rounds && self.refine_once(&mut candidates) {
            rounds += 1;
        }

        tracing::debug!(
            rounds,
            tried = candidates.len(),
            score = candidates.best().score,
            "refinement finished"
        );

        candidates.into_best().candidate
    }

    /// Shuffle the waiting list and take six teams off it
    fn generate_random_match(&mut self) -> Option<MatchCandidate> {
        if self.waiting.len() < MATCH_SIZE {
            return None;
        }

        self.waiting.shuffle(&mut self.rng);
        let drawn = self.waiting.split_off(self.waiting.len() - MATCH_SIZE);
        let [r0, r1, r2, b0, b1, b2]: [TeamId; MATCH_SIZE] = drawn.try_into().ok()?;

        Some(MatchCandidate::new([r0, r1, r2], [b0, b1, b2]))
    }

    /// Record the chosen match and charge a waiting round to everyone left
    fn commit(&mut self, best: &MatchCandidate) {
        self.ledger.record_match(best);
        for team in &self.waiting {
            self.ledger.record_wait_round(team);
        }

        tracing::info!(
            red = ?best.red,
            blue = ?best.blue,
            still_waiting = self.waiting.len(),
            "match committed"
        );
    }

    // ========================================================================
    // Level 3 - Steps
    // ========================================================================

    /// One refinement round. Returns false once refinement should stop.
    fn refine_once(&mut self, candidates: &mut Candidates) -> bool {
        let best = candidates.best().clone();
        let Some(worst) = self.find_worst_team(&best.candidate) else {
            return false;
        };
        let Some((incoming, next)) = self.draw_replacement(&best.candidate, &worst, candidates)
        else {
            return false;
        };

        // The waiting list now holds `worst` instead of `incoming`, which is
        // only right if `next` takes over as best.
        let score = self.match_score(&next);
        if score >= best.score {
            self.take_from_waiting(&worst);
            self.waiting.push(incoming);
        }

        candidates.push(Scored {
            candidate: next,
            score,
        });

        true
    }

    /// Put `worst` back in the waiting list and draw a team to replace it,
    /// skipping lineups that were already tried.
    ///
    /// On success the drawn team has left the waiting list and `worst` is
    /// in it. On exhaustion the waiting list is restored.
    fn draw_replacement(
        &mut self,
        best: &MatchCandidate,
        worst: &TeamId,
        candidates: &Candidates,
    ) -> Option<(TeamId, MatchCandidate)> {
        self.waiting.push(worst.clone());

        for _ in 0..self.config.max_draw_attempts {
            self.waiting.shuffle(&mut self.rng);
            let Some(drawn) = self.waiting.pop() else {
                break;
            };

            let next = best.with_replacement(worst, drawn.clone());
            match next {
                Some(next) if !candidates.iter().any(|s| s.candidate.same_lineup(&next)) => {
                    return Some((drawn, next));
                }
                _ => self.waiting.push(drawn),
            }
        }

        tracing::debug!(%worst, "no untried replacement found");
        self.take_from_waiting(worst);
        None
    }

    /// Team contributing the highest strictly positive score, if any
    fn find_worst_team(&self, candidate: &MatchCandidate) -> Option<TeamId> {
        let mut worst = 0;
        let mut worst_team = None;

        for (side, team) in candidate.seats() {
            let score = self.team_score(candidate, side, team);
            if score > worst {
                worst = score;
                worst_team = Some(team);
            }
        }

        worst_team.cloned()
    }

    // ========================================================================
    // Level 4 - Scoring
    // ========================================================================

    /// Score of a whole match: the sum of every team's contribution
    pub fn match_score(&self, candidate: &MatchCandidate) -> i64 {
        candidate
            .seats()
            .map(|(side, team)| self.team_score(candidate, side, team))
            .sum()
    }

    /// One team's contribution to its match's score
    pub fn team_score(&self, candidate: &MatchCandidate, side: Side, team: &TeamId) -> i64 {
        let weights = &self.config.weights;

        let played = neutral_on_error(self.ledger.matches_played(team));
        let waited = neutral_on_error(self.ledger.rounds_waited(team));
        let together: i64 = candidate
            .alliance(side)
            .iter()
            .filter(|mate| *mate != team)
            .map(|mate| neutral_on_error(self.ledger.played_together(team, mate)))
            .sum();
        let against: i64 = candidate
            .opponents(side)
            .iter()
            .map(|opponent| neutral_on_error(self.ledger.played_against(team, opponent)))
            .sum();

        played * weights.played + together * weights.together + against * weights.against
            - waited * weights.waited
    }

    fn take_from_waiting(&mut self, team: &TeamId) {
        if let Some(i) = self.waiting.iter().position(|t| t == team) {
            self.waiting.swap_remove(i);
        }
    }
}

/// Missing ledger entries mean registration was skipped; score them as zero
fn neutral_on_error(lookup: Result<u32, LedgerError>) -> i64 {
    match lookup {
        Ok(value) => i64::from(value),
        Err(e) => {
            tracing::warn!(error = %e, "ledger lookup failed while scoring");
            0
        }
    }
}
