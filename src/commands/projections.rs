//! `getProjections`: projections for every player on the day's slate.
//!
//! The pipeline is: check the sport and options, confirm there are games,
//! resolve salaries through the fallback chain, pick which players to
//! project, fetch their recent stats concurrently, then project and rank by
//! value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use super::common::CommandContext;
use crate::cli::types::{Position, SalarySource, SlateType, Site, Sport};
use crate::projections::{fallback_salary, ProjectionGenerator, ProjectionRecord, MODEL_VERSION};
use crate::providers::PlayerRecord;
use crate::services::{ensure_stats_sport, SalaryNeed};
use crate::{Result, SportIntelError};

pub const DEFAULT_MAX_PLAYERS: usize = 50;

fn default_max_players() -> usize {
    DEFAULT_MAX_PLAYERS
}

fn default_true() -> bool {
    true
}

/// Options for [`get_projections`]. Only `sport` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub sport: Sport,
    #[serde(default)]
    pub slate: SlateType,
    #[serde(default)]
    pub site: Site,
    /// Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_true", alias = "includeExplanations")]
    pub include_explanations: bool,
    #[serde(default, alias = "minSalary")]
    pub min_salary: Option<u32>,
    #[serde(default, alias = "maxSalary")]
    pub max_salary: Option<u32>,
    #[serde(default)]
    pub positions: Option<Vec<Position>>,
    #[serde(default = "default_max_players", alias = "maxPlayers")]
    pub max_players: usize,
}

impl ProjectionParams {
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            slate: SlateType::default(),
            site: Site::default(),
            date: None,
            include_explanations: true,
            min_salary: None,
            max_salary: None,
            positions: None,
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_salary, self.max_salary) {
            if min > max {
                return Err(SportIntelError::validation(format!(
                    "min_salary ({min}) must not exceed max_salary ({max})"
                )));
            }
        }
        if self.max_players == 0 {
            return Err(SportIntelError::validation("max_players must be at least 1"));
        }
        Ok(())
    }

    fn salary_allowed(&self, salary: u32) -> bool {
        self.min_salary.map_or(true, |min| salary >= min)
            && self.max_salary.map_or(true, |max| salary <= max)
    }

    fn position_allowed(&self, position: Position) -> bool {
        self.positions
            .as_ref()
            .map_or(true, |positions| positions.contains(&position))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionMetadata {
    pub model_version: &'static str,
    pub data_sources_used: Vec<String>,
    pub salary_source: Option<SalarySource>,
    pub salaries_from_cache: bool,
    pub generated_at: DateTime<Utc>,
}

impl ProjectionMetadata {
    fn new(
        ctx: &CommandContext,
        data_sources_used: Vec<String>,
        salary_source: Option<SalarySource>,
        salaries_from_cache: bool,
    ) -> Self {
        Self {
            model_version: MODEL_VERSION,
            data_sources_used,
            salary_source,
            salaries_from_cache,
            generated_at: ctx.now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionsOutput {
    pub sport: Sport,
    pub slate: SlateType,
    pub date: NaiveDate,
    pub projections: Vec<ProjectionRecord>,
    pub metadata: ProjectionMetadata,
}

impl ProjectionsOutput {
    fn new(
        params: &ProjectionParams,
        date: NaiveDate,
        projections: Vec<ProjectionRecord>,
        metadata: ProjectionMetadata,
    ) -> Self {
        Self {
            sport: params.sport,
            slate: params.slate,
            date,
            projections,
            metadata,
        }
    }
}

/// Players to project, each with the salary used for them. Players priced by
/// a provider come first; the rest keep directory order.
fn select_players(
    players: Vec<PlayerRecord>,
    salaries: &HashMap<String, u32>,
    params: &ProjectionParams,
) -> Vec<(PlayerRecord, u32)> {
    let mut selected: Vec<(PlayerRecord, u32, bool)> = players
        .into_iter()
        .filter_map(|player| {
            let priced = salaries.get(&player.name.to_lowercase()).copied();
            let salary = priced.unwrap_or_else(|| fallback_salary(&player.name));
            (params.salary_allowed(salary) && params.position_allowed(player.position))
                .then_some((player, salary, priced.is_some()))
        })
        .collect();

    selected.sort_by_key(|(_, _, priced)| !priced);
    selected.truncate(params.max_players);
    selected
        .into_iter()
        .map(|(player, salary, _)| (player, salary))
        .collect()
}

pub async fn get_projections(
    ctx: &CommandContext,
    params: ProjectionParams,
) -> Result<ProjectionsOutput> {
    params.validate()?;
    ensure_stats_sport(params.sport)?;

    let date = params.date.unwrap_or_else(|| ctx.today());
    info!(sport = %params.sport, slate = %params.slate, %date, "generating projections");

    let mut data_sources = vec![ctx.generator.stats_source().to_string()];

    let games = ctx.stats.list_games(date).await?;
    if games.is_empty() {
        info!(%date, "no games scheduled");
        let metadata = ProjectionMetadata::new(ctx, data_sources, None, false);
        return Ok(ProjectionsOutput::new(&params, date, Vec::new(), metadata));
    }

    let need = SalaryNeed::new(params.sport)
        .site(params.site)
        .slate_type(params.slate);
    let resolved = ctx.salaries.resolve(&need).await?;
    if let Some(source) = resolved.source {
        data_sources.push(source.to_string());
    }
    if ctx.generator.has_oracle() {
        data_sources.push("huggingface".to_string());
    }

    let salaries: HashMap<String, u32> = resolved
        .records
        .iter()
        .filter_map(|quote| {
            quote
                .salaries
                .salary_for(params.site)
                .map(|salary| (quote.player_name.to_lowercase(), salary))
        })
        .collect();
    info!(count = salaries.len(), "players with salaries");

    let players = ctx.players.players(params.sport).await?;
    let total = players.len();
    let selected = select_players(players, &salaries, &params);
    info!(selected = selected.len(), total, "projecting players");

    let inputs = ctx.generator.gather(selected, date).await;
    let projections = {
        let mut rng = ctx.rng();
        ProjectionGenerator::project_all(&inputs, params.include_explanations, &mut *rng)
    };

    let metadata =
        ProjectionMetadata::new(ctx, data_sources, resolved.source, resolved.from_cache);
    Ok(ProjectionsOutput::new(&params, date, projections, metadata))
}

/// Run [`get_projections`] and print the result.
pub async fn handle_projections(
    ctx: &CommandContext,
    params: ProjectionParams,
    as_json: bool,
) -> Result<()> {
    let output = get_projections(ctx, params).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} slate, {}: {} projections",
        output.sport,
        output.slate,
        output.date,
        output.projections.len()
    );
    for p in &output.projections {
        println!(
            "{:<26} {:<4} {:<3} ${:>6}  {:>5.1} pts ({:.1}-{:.1})  value {:.2}",
            p.player_name,
            p.team,
            p.position,
            p.salary,
            p.projected_points,
            p.floor,
            p.ceiling,
            p.value
        );
    }
    Ok(())
}
