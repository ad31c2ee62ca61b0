//! Greedy salary-capped lineup construction.
//!
//! Each lineup is filled by walking a strategy-sorted pool and taking the
//! first players that fit a slot, the budget and the team cap. This is a
//! heuristic, not an optimizer: it will happily leave salary on the table.
//! After every successful lineup, each member has an even chance of being
//! dropped from the pool so later lineups differ.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::metrics::{average_ownership, expected_value, find_stacks, risk_score, Stack};
use super::requirements::{PositionRequirements, RosterSlot};
use crate::cli::types::{PlayerId, Position, Strategy};
use crate::projections::scoring::{round_to, value_per_thousand};

#[cfg(test)]
mod tests;

/// Chance a used player stays in the pool for the next lineup.
pub const DIVERSITY_KEEP_PROBABILITY: f64 = 0.5;

/// A projected player eligible for lineups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolPlayer {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub salary: u32,
    pub projected_points: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub confidence: f64,
    pub ownership: f64,
}

impl PoolPlayer {
    pub fn value(&self) -> f64 {
        value_per_thousand(self.projected_points, self.salary)
    }

    fn sort_key(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Tournament => self.ceiling,
            Strategy::Cash => self.floor,
            Strategy::Balanced => self.value(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConstraints {
    #[serde(alias = "maxPlayersPerTeam")]
    pub max_per_team: Option<usize>,
    #[serde(alias = "requiredPlayers")]
    pub required: Vec<PlayerId>,
    #[serde(alias = "excludedPlayers")]
    pub excluded: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupPlayer {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub position: Position,
    pub slot: RosterSlot,
    pub salary: u32,
    pub projected_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    /// 1-based attempt number; ranks of failed attempts are skipped.
    pub rank: usize,
    pub players: Vec<LineupPlayer>,
    pub total_salary: u32,
    pub salary_cap: u32,
    pub salary_remaining: u32,
    pub projected_points: f64,
    pub expected_value: f64,
    pub risk_score: u32,
    pub estimated_ownership: f64,
    pub stacks: Vec<Stack>,
}

impl Lineup {
    fn from_members(
        rank: usize,
        members: &[(RosterSlot, &PoolPlayer)],
        salary_cap: u32,
        strategy: Strategy,
    ) -> Self {
        let total_salary: u32 = members.iter().map(|(_, p)| p.salary).sum();
        let points: f64 = members.iter().map(|(_, p)| p.projected_points).sum();
        let confidences: Vec<f64> = members.iter().map(|(_, p)| p.confidence).collect();
        let ownerships: Vec<f64> = members.iter().map(|(_, p)| p.ownership).collect();

        Self {
            rank,
            players: members
                .iter()
                .map(|(slot, p)| LineupPlayer {
                    player_id: p.id.clone(),
                    player_name: p.name.clone(),
                    team: p.team.clone(),
                    position: p.position,
                    slot: *slot,
                    salary: p.salary,
                    projected_points: p.projected_points,
                })
                .collect(),
            total_salary,
            salary_cap,
            salary_remaining: salary_cap.saturating_sub(total_salary),
            projected_points: round_to(points, 1),
            expected_value: expected_value(points, total_salary),
            risk_score: risk_score(strategy, &confidences),
            estimated_ownership: average_ownership(&ownerships),
            stacks: find_stacks(
                members
                    .iter()
                    .map(|(_, p)| (p.team.as_str(), p.name.as_str())),
            ),
        }
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.player_id == id)
    }
}

/// Builds lineups for one sport's requirements and one strategy.
pub struct LineupBuilder<'a> {
    requirements: &'a PositionRequirements,
    salary_cap: u32,
    strategy: Strategy,
    constraints: &'a LineupConstraints,
}

impl<'a> LineupBuilder<'a> {
    pub fn new(
        requirements: &'a PositionRequirements,
        salary_cap: u32,
        strategy: Strategy,
        constraints: &'a LineupConstraints,
    ) -> Self {
        Self {
            requirements,
            salary_cap,
            strategy,
            constraints,
        }
    }

    /// Pool after dropping excluded players and anyone priced over the cap.
    pub fn eligible<'p>(&self, pool: &'p [PoolPlayer]) -> Vec<&'p PoolPlayer> {
        let excluded: HashSet<&PlayerId> = self.constraints.excluded.iter().collect();
        pool.iter()
            .filter(|p| !excluded.contains(&p.id) && p.salary <= self.salary_cap)
            .collect()
    }

    /// One greedy lineup from `candidates`, or `None` when slots stay open.
    pub fn fill<'p>(&self, candidates: &[&'p PoolPlayer]) -> Option<Vec<(RosterSlot, &'p PoolPlayer)>> {
        let mut sorted: Vec<&PoolPlayer> = candidates.to_vec();
        sorted.sort_by(|a, b| {
            b.sort_key(self.strategy)
                .partial_cmp(&a.sort_key(self.strategy))
                .unwrap_or(Ordering::Equal)
        });

        let mut tracker = self.requirements.tracker();
        let mut remaining = self.salary_cap;
        let mut members: Vec<(RosterSlot, &PoolPlayer)> = Vec::new();
        let mut team_counts: HashMap<&str, usize> = HashMap::new();
        let mut taken: HashSet<&PlayerId> = HashSet::new();

        for id in &self.constraints.required {
            let Some(player) = sorted.iter().copied().find(|p| &p.id == id) else {
                continue;
            };
            if taken.contains(&player.id) || player.salary > remaining {
                continue;
            }
            if let Some(slot) = tracker.claim(player.position) {
                remaining -= player.salary;
                *team_counts.entry(player.team.as_str()).or_default() += 1;
                taken.insert(&player.id);
                members.push((slot, player));
            }
        }

        for &player in &sorted {
            if tracker.is_full() {
                break;
            }
            if taken.contains(&player.id) || player.salary > remaining {
                continue;
            }
            if let Some(cap) = self.constraints.max_per_team {
                if team_counts.get(player.team.as_str()).copied().unwrap_or(0) >= cap {
                    continue;
                }
            }
            if let Some(slot) = tracker.claim(player.position) {
                remaining -= player.salary;
                *team_counts.entry(player.team.as_str()).or_default() += 1;
                taken.insert(&player.id);
                members.push((slot, player));
            }
        }

        if tracker.is_full() {
            Some(members)
        } else {
            debug!(
                filled = members.len(),
                needed = self.requirements.total(),
                "could not fill lineup"
            );
            None
        }
    }

    /// Up to `count` lineups. Failed attempts are skipped, not retried.
    pub fn build<R: Rng + ?Sized>(&self, pool: &[PoolPlayer], count: usize, rng: &mut R) -> Vec<Lineup> {
        let required: HashSet<&PlayerId> = self.constraints.required.iter().collect();
        let mut candidates = self.eligible(pool);
        let mut lineups = Vec::new();

        for attempt in 0..count {
            let Some(members) = self.fill(&candidates) else {
                continue;
            };
            lineups.push(Lineup::from_members(
                attempt + 1,
                &members,
                self.salary_cap,
                self.strategy,
            ));

            if attempt + 1 < count {
                let used: HashSet<&PlayerId> = members.iter().map(|(_, p)| &p.id).collect();
                candidates.retain(|p| {
                    !used.contains(&p.id)
                        || required.contains(&p.id)
                        || rng.gen_bool(DIVERSITY_KEEP_PROBABILITY)
                });
            }
        }

        lineups
    }
}
