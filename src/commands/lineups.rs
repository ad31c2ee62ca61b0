//! `optimizeLineups`: salary-capped lineups from a projection pool.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use super::common::CommandContext;
use crate::cli::types::{PlayerId, Position, Sport, Strategy};
use crate::lineup::metrics::DEFAULT_CONFIDENCE;
use crate::lineup::{requirements_for, Lineup, LineupBuilder, LineupConstraints, PoolPlayer};
use crate::projections::estimate_ownership;
use crate::projections::generator::VARIANCE;
use crate::projections::scoring::{round_to, value_per_thousand};
use crate::{Result, SportIntelError};

pub const DEFAULT_LINEUP_COUNT: usize = 10;
pub const MAX_LINEUP_COUNT: usize = 150;

fn default_lineup_count() -> usize {
    DEFAULT_LINEUP_COUNT
}

/// One projected player as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    #[serde(alias = "playerId")]
    pub id: PlayerId,
    #[serde(alias = "playerName")]
    pub name: String,
    pub team: String,
    pub position: Position,
    pub salary: u32,
    #[serde(alias = "projectedPoints")]
    pub projected_points: f64,
    #[serde(default)]
    pub floor: Option<f64>,
    #[serde(default)]
    pub ceiling: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub ownership: Option<f64>,
}

impl PoolEntry {
    /// Fill the optional fields: floor and ceiling 20% either side of the
    /// projection, default confidence, ownership from the value tier.
    fn into_pool_player<R: rand::Rng + ?Sized>(self, rng: &mut R) -> PoolPlayer {
        let points = self.projected_points;
        let ownership = match self.ownership {
            Some(o) => o,
            None => estimate_ownership(value_per_thousand(points, self.salary), rng),
        };
        PoolPlayer {
            floor: self.floor.unwrap_or(points * (1.0 - VARIANCE)),
            ceiling: self.ceiling.unwrap_or(points * (1.0 + VARIANCE)),
            confidence: self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            ownership,
            id: self.id,
            name: self.name,
            team: self.team,
            position: self.position,
            salary: self.salary,
            projected_points: points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeParams {
    pub sport: Sport,
    pub projections: Vec<PoolEntry>,
    #[serde(alias = "salaryCap")]
    pub salary_cap: u32,
    #[serde(default = "default_lineup_count", alias = "lineupCount")]
    pub lineup_count: usize,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub constraints: LineupConstraints,
    /// Seeds this run's diversity and ownership draws.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl OptimizeParams {
    pub fn new(sport: Sport, projections: Vec<PoolEntry>, salary_cap: u32) -> Self {
        Self {
            sport,
            projections,
            salary_cap,
            lineup_count: DEFAULT_LINEUP_COUNT,
            strategy: Strategy::default(),
            constraints: LineupConstraints::default(),
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LINEUP_COUNT).contains(&self.lineup_count) {
            return Err(SportIntelError::validation(format!(
                "lineup_count must be between 1 and {MAX_LINEUP_COUNT}, got {}",
                self.lineup_count
            )));
        }
        if self.salary_cap == 0 {
            return Err(SportIntelError::validation("salary_cap must be positive"));
        }
        if self.projections.is_empty() {
            return Err(SportIntelError::validation("projections must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationStats {
    pub strategy: Strategy,
    pub unique_players_used: usize,
    pub average_ownership: f64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeOutput {
    pub lineups: Vec<Lineup>,
    pub optimization_stats: OptimizationStats,
}

fn stats_for(lineups: &[Lineup], strategy: Strategy, generated_at: DateTime<Utc>) -> OptimizationStats {
    let unique: HashSet<&PlayerId> = lineups
        .iter()
        .flat_map(|l| l.players.iter().map(|p| &p.player_id))
        .collect();
    let average_ownership = if lineups.is_empty() {
        0.0
    } else {
        let total: f64 = lineups.iter().map(|l| l.estimated_ownership).sum();
        round_to(total / lineups.len() as f64, 1)
    };

    OptimizationStats {
        strategy,
        unique_players_used: unique.len(),
        average_ownership,
        generated_at,
    }
}

pub fn optimize_lineups(ctx: &CommandContext, params: OptimizeParams) -> Result<OptimizeOutput> {
    params.validate()?;
    let requirements = requirements_for(params.sport)?;

    info!(
        count = params.lineup_count,
        sport = %params.sport,
        strategy = %params.strategy,
        "optimizing lineups"
    );

    let mut seeded = params.seed.map(StdRng::seed_from_u64);
    let mut shared = ctx.rng();
    let rng: &mut StdRng = match seeded.as_mut() {
        Some(rng) => rng,
        None => &mut *shared,
    };

    let pool: Vec<PoolPlayer> = params
        .projections
        .into_iter()
        .map(|entry| entry.into_pool_player(&mut *rng))
        .collect();

    let builder = LineupBuilder::new(
        &requirements,
        params.salary_cap,
        params.strategy,
        &params.constraints,
    );
    let lineups = builder.build(&pool, params.lineup_count, &mut *rng);
    info!(built = lineups.len(), requested = params.lineup_count, "lineups built");

    let optimization_stats = stats_for(&lineups, params.strategy, ctx.now());
    Ok(OptimizeOutput {
        lineups,
        optimization_stats,
    })
}

pub fn handle_optimize(ctx: &CommandContext, params: OptimizeParams, as_json: bool) -> Result<()> {
    let output = optimize_lineups(ctx, params)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.lineups.is_empty() {
        println!("No lineup could fill every roster slot under the cap.");
    }
    for lineup in &output.lineups {
        println!(
            "Lineup {}: {:.1} pts, ${} (${} left), value {:.2}, risk {}/100, own {}%",
            lineup.rank,
            lineup.projected_points,
            lineup.total_salary,
            lineup.salary_remaining,
            lineup.expected_value,
            lineup.risk_score,
            lineup.estimated_ownership
        );
        for p in &lineup.players {
            println!(
                "  {:<4} {:<26} {:<4} ${:>6}  {:.1}",
                p.slot.label(),
                p.player_name,
                p.team,
                p.salary,
                p.projected_points
            );
        }
        for stack in &lineup.stacks {
            println!("  stack {}: {}", stack.team, stack.players.join(", "));
        }
    }
    println!(
        "{} strategy, {} unique players, average ownership {:.1}%",
        output.optimization_stats.strategy,
        output.optimization_stats.unique_players_used,
        output.optimization_stats.average_ownership
    );
    Ok(())
}
