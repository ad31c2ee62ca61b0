//! Turns recent box scores, salary and an optional injury-risk verdict into
//! a point projection with a factor breakdown.

use chrono::NaiveDate;
use futures::future::join_all;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::scoring::{
    confidence_for, round_to, value_per_thousand, StatAverages, RECENT_GAMES, STATS_WINDOW_DAYS,
};
use crate::cli::types::{PlayerId, Position};
use crate::providers::{
    DateRange, MentionFeed, PlayerRecord, RiskAssessment, RiskOracle, StatsProvider,
};
use crate::Result;

#[cfg(test)]
mod tests;

pub const MODEL_VERSION: &str = "1.0.0";

/// Salary assumed when no provider priced the player.
pub const DEFAULT_SALARY: u32 = 5500;

/// Floor and ceiling sit this fraction below and above the estimate.
pub const VARIANCE: f64 = 0.2;

const FALLBACK_SALARIES: &[(&str, u32)] = &[
    ("LeBron James", 9500),
    ("Stephen Curry", 9300),
    ("Kevin Durant", 9100),
    ("Giannis Antetokounmpo", 11000),
    ("Nikola Jokic", 11500),
    ("Luka Doncic", 11200),
    ("Joel Embiid", 10800),
    ("Jayson Tatum", 9800),
    ("Damian Lillard", 9000),
    ("Anthony Davis", 9700),
];

pub fn fallback_salary(player_name: &str) -> u32 {
    FALLBACK_SALARIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(player_name))
        .map(|(_, salary)| *salary)
        .unwrap_or(DEFAULT_SALARY)
}

/// Ownership percentage drawn uniformly from the band for `value`:
/// >7 → [30,50), >6 → [15,30), >5 → [5,15), else [0,5).
pub fn estimate_ownership<R: Rng + ?Sized>(value: f64, rng: &mut R) -> f64 {
    let (low, high) = if value > 7.0 {
        (30.0, 50.0)
    } else if value > 6.0 {
        (15.0, 30.0)
    } else if value > 5.0 {
        (5.0, 15.0)
    } else {
        (0.0, 5.0)
    };
    rng.gen_range(low..high)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub name: String,
    /// Raw input behind the factor.
    pub value: f64,
    /// Signed contribution in fantasy points.
    pub impact: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub factors: Vec<Factor>,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub position: Position,
    pub salary: u32,
    pub projected_points: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub confidence: f64,
    pub value: f64,
    pub ownership: f64,
    pub games_played: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

/// Build a projection, or `None` when the player has no recent games.
pub fn project<R: Rng + ?Sized>(
    player: &PlayerRecord,
    averages: &StatAverages,
    salary: u32,
    risk: Option<&RiskAssessment>,
    include_explanation: bool,
    rng: &mut R,
) -> Option<ProjectionRecord> {
    if averages.games_played == 0 {
        return None;
    }

    let base = averages.avg_fantasy_points;
    let active_risk = risk.filter(|r| r.adjustment < 1.0);
    let estimate = match active_risk {
        Some(r) => base * r.adjustment,
        None => base,
    };
    let variance = estimate * VARIANCE;
    let value = value_per_thousand(estimate, salary);

    Some(ProjectionRecord {
        player_id: player.id.clone(),
        player_name: player.name.clone(),
        team: player.team.clone(),
        position: player.position,
        salary,
        projected_points: round_to(estimate, 1),
        floor: round_to(estimate - variance, 1),
        ceiling: round_to(estimate + variance, 1),
        confidence: confidence_for(averages.games_played),
        value: round_to(value, 2),
        ownership: estimate_ownership(value, rng),
        games_played: averages.games_played,
        risk: risk.cloned(),
        explanation: include_explanation.then(|| explain(player, averages, salary, active_risk)),
    })
}

/// Factor breakdown: recent performance, salary value, consistency and, when
/// a reducing risk multiplier is in play, injury risk.
pub fn explain(
    player: &PlayerRecord,
    averages: &StatAverages,
    salary: u32,
    risk: Option<&RiskAssessment>,
) -> Explanation {
    let base = averages.avg_fantasy_points;
    let per_thousand = value_per_thousand(base, salary);
    let consistent = averages.games_played >= 8;

    let mut factors = vec![
        Factor {
            name: "recent_performance".to_string(),
            value: base,
            impact: base,
            description: format!(
                "Averaging {base:.1} FP over last {} games",
                averages.games_played
            ),
        },
        Factor {
            name: "salary_value".to_string(),
            value: per_thousand,
            impact: per_thousand,
            description: format!("{per_thousand:.2} points per $1K salary"),
        },
        Factor {
            name: "consistency".to_string(),
            value: averages.games_played as f64,
            impact: if consistent { 5.0 } else { -5.0 },
            description: if consistent {
                "Consistent playing time".to_string()
            } else {
                "Limited recent data".to_string()
            },
        },
    ];

    let mut reasoning = format!(
        "{} is projected for {base:.1} fantasy points based primarily on recent performance \
         averaging {:.1} pts, {:.1} reb, {:.1} ast over {} games.",
        player.name,
        averages.avg_points,
        averages.avg_rebounds,
        averages.avg_assists,
        averages.games_played
    );

    if let Some(risk) = risk.filter(|r| r.adjustment < 1.0) {
        let reduction = (1.0 - risk.adjustment) * 100.0;
        factors.push(Factor {
            name: "injury_risk".to_string(),
            value: risk.adjustment,
            impact: base * (risk.adjustment - 1.0),
            description: format!(
                "{:?} injury risk from {} negative mention(s) ({:.0}% confidence)",
                risk.level,
                risk.negatives,
                risk.confidence * 100.0
            ),
        });
        reasoning.push_str(&format!(
            " Note: injury concerns reduce the projection by {reduction:.0}%."
        ));
    }

    Explanation { factors, reasoning }
}

/// Fetched inputs for one player, before the random ownership draw.
#[derive(Debug, Clone)]
pub struct PlayerInputs {
    pub player: PlayerRecord,
    pub salary: u32,
    pub averages: StatAverages,
    pub risk: Option<RiskAssessment>,
}

/// Fetches stats and risk for players concurrently.
pub struct ProjectionGenerator {
    stats: Arc<dyn StatsProvider>,
    oracle: Option<Arc<dyn RiskOracle>>,
    mentions: Arc<dyn MentionFeed>,
    recent_games: usize,
}

impl ProjectionGenerator {
    pub fn new(stats: Arc<dyn StatsProvider>, mentions: Arc<dyn MentionFeed>) -> Self {
        Self {
            stats,
            oracle: None,
            mentions,
            recent_games: RECENT_GAMES,
        }
    }

    pub fn with_oracle(mut self, oracle: Arc<dyn RiskOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn stats_source(&self) -> &str {
        self.stats.name()
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// Averages over the most recent games inside the trailing window.
    pub async fn averages(&self, player_id: &PlayerId, as_of: NaiveDate) -> Result<StatAverages> {
        let range = DateRange::trailing(as_of, STATS_WINDOW_DAYS);
        let lines = self.stats.list_player_stats(player_id, range).await?;
        Ok(StatAverages::from_lines(&lines, self.recent_games))
    }

    pub async fn risk(&self, player_name: &str) -> Option<RiskAssessment> {
        let oracle = self.oracle.as_ref()?;
        let mentions = self.mentions.mentions(player_name).await;
        Some(oracle.score_risk(player_name, &mentions).await)
    }

    async fn inputs_for(
        &self,
        player: PlayerRecord,
        salary: u32,
        as_of: NaiveDate,
    ) -> Result<PlayerInputs> {
        let averages = self.averages(&player.id, as_of).await?;
        let risk = if averages.games_played > 0 {
            self.risk(&player.name).await
        } else {
            None
        };
        Ok(PlayerInputs {
            player,
            salary,
            averages,
            risk,
        })
    }

    /// Gather inputs for every player. One player's failure is logged and
    /// dropped without affecting the rest.
    pub async fn gather(&self, players: Vec<(PlayerRecord, u32)>, as_of: NaiveDate) -> Vec<PlayerInputs> {
        let results = join_all(
            players
                .into_iter()
                .map(|(player, salary)| async move {
                    let name = player.name.clone();
                    (name, self.inputs_for(player, salary, as_of).await)
                }),
        )
        .await;

        results
            .into_iter()
            .filter_map(|(name, result)| match result {
                Ok(inputs) => Some(inputs),
                Err(e) => {
                    warn!(player = %name, error = %e, "skipping player projection");
                    None
                }
            })
            .collect()
    }

    /// Project everyone with recent games, best value first.
    pub fn project_all<R: Rng + ?Sized>(
        inputs: &[PlayerInputs],
        include_explanation: bool,
        rng: &mut R,
    ) -> Vec<ProjectionRecord> {
        let mut projections: Vec<ProjectionRecord> = inputs
            .iter()
            .filter_map(|input| {
                let projection = project(
                    &input.player,
                    &input.averages,
                    input.salary,
                    input.risk.as_ref(),
                    include_explanation,
                    rng,
                );
                if projection.is_none() {
                    debug!(player = %input.player.name, "no recent games, excluded");
                }
                projection
            })
            .collect();

        projections.sort_by(|a, b| b.value.total_cmp(&a.value));
        projections
    }
}
