//! `explainProjection`: a factor-by-factor account of one player's projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::CommandContext;
use crate::cli::types::{ExplainMethod, PlayerId, Sport};
use crate::projections::scoring::round_to;
use crate::projections::{fallback_salary, project, Factor};
use crate::services::{ensure_stats_sport, SalaryNeed};
use crate::{Result, SportIntelError};

/// League-average projection the factors are measured against.
pub const BASELINE_POINTS: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainParams {
    #[serde(alias = "playerId")]
    pub player_id: PlayerId,
    pub sport: Sport,
    #[serde(default, alias = "explainerType")]
    pub method: ExplainMethod,
}

impl ExplainParams {
    pub fn new(player_id: PlayerId, sport: Sport) -> Self {
        Self {
            player_id,
            sport,
            method: ExplainMethod::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.player_id.as_str().trim().is_empty() {
            return Err(SportIntelError::validation("player_id must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub feature: String,
    pub value: f64,
    pub impact: f64,
    pub direction: Direction,
    /// Share of total absolute impact; only for `feature_importance`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    pub human_readable: String,
}

impl From<&Factor> for FactorContribution {
    fn from(factor: &Factor) -> Self {
        Self {
            feature: factor.name.clone(),
            value: round_to(factor.value, 2),
            impact: round_to(factor.impact, 2),
            direction: if factor.impact < 0.0 {
                Direction::Negative
            } else {
                Direction::Positive
            },
            importance: None,
            human_readable: format!("{} ({:+.1} fantasy points)", factor.description, factor.impact),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationDetail {
    pub method: ExplainMethod,
    pub top_factors: Vec<FactorContribution>,
    pub base_value: f64,
    pub prediction_value: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainOutput {
    pub player_id: PlayerId,
    pub player_name: String,
    pub projected_points: f64,
    pub explanation: ExplanationDetail,
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

/// Order (and for `feature_importance`, normalize) factors for `method`.
pub fn arrange_factors(method: ExplainMethod, mut factors: Vec<FactorContribution>) -> Vec<FactorContribution> {
    match method {
        ExplainMethod::Shap => {}
        ExplainMethod::Lime => {
            factors.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
        }
        ExplainMethod::FeatureImportance => {
            let total: f64 = factors.iter().map(|f| f.impact.abs()).sum();
            for factor in &mut factors {
                let share = if total > 0.0 {
                    factor.impact.abs() / total
                } else {
                    0.0
                };
                factor.importance = Some(round_to(share, 3));
            }
            factors.sort_by(|a, b| {
                b.importance
                    .unwrap_or(0.0)
                    .total_cmp(&a.importance.unwrap_or(0.0))
            });
        }
    }
    factors
}

pub fn reasoning_text(
    player_name: &str,
    factors: &[FactorContribution],
    prediction: f64,
    confidence: f64,
) -> String {
    let delta = prediction - BASELINE_POINTS;
    let mut text = format!(
        "{player_name}'s projection is {} the baseline by {:.1} fantasy points.",
        if delta >= 0.0 { "above" } else { "below" },
        delta.abs()
    );

    let positive: Vec<&str> = factors
        .iter()
        .filter(|f| f.direction == Direction::Positive)
        .map(|f| f.feature.as_str())
        .collect();
    let negative: Vec<&str> = factors
        .iter()
        .filter(|f| f.direction == Direction::Negative)
        .map(|f| f.feature.as_str())
        .collect();

    if !positive.is_empty() {
        text.push_str(&format!(" The main positive factors are: {}.", positive.join(", ")));
    }
    if !negative.is_empty() {
        let verb = if negative.len() == 1 { "works" } else { "work" };
        text.push_str(&format!(
            " However, {} {verb} against this projection.",
            negative.join(" and ")
        ));
    }
    text.push_str(&format!(
        " Overall, the model has {:.0}% confidence in this projection.",
        confidence * 100.0
    ));
    text
}

pub async fn explain_projection(ctx: &CommandContext, params: ExplainParams) -> Result<ExplainOutput> {
    params.validate()?;
    ensure_stats_sport(params.sport)?;
    info!(player_id = %params.player_id, method = %params.method, "explaining projection");

    let player = ctx
        .players
        .find(params.sport, &params.player_id)
        .await?
        .ok_or_else(|| SportIntelError::PlayerNotFound {
            id: params.player_id.to_string(),
        })?;

    let need = SalaryNeed::new(params.sport);
    let salary = ctx
        .salaries
        .player_salary(&player.name, &need)
        .await?
        .unwrap_or_else(|| fallback_salary(&player.name));

    let averages = ctx.generator.averages(&player.id, ctx.today()).await?;
    if averages.games_played == 0 {
        return Err(SportIntelError::NoData);
    }
    let risk = ctx.generator.risk(&player.name).await;

    let projection = {
        let mut rng = ctx.rng();
        project(&player, &averages, salary, risk.as_ref(), true, &mut *rng)
    }
    .ok_or(SportIntelError::NoData)?;

    let factors: Vec<FactorContribution> = projection
        .explanation
        .as_ref()
        .map(|e| e.factors.iter().map(FactorContribution::from).collect())
        .unwrap_or_default();
    let top_factors = arrange_factors(params.method, factors);
    let reasoning = reasoning_text(
        &player.name,
        &top_factors,
        projection.projected_points,
        projection.confidence,
    );

    Ok(ExplainOutput {
        player_id: player.id,
        player_name: player.name,
        projected_points: projection.projected_points,
        explanation: ExplanationDetail {
            method: params.method,
            top_factors,
            base_value: BASELINE_POINTS,
            prediction_value: projection.projected_points,
            reasoning,
        },
        confidence: projection.confidence,
        generated_at: ctx.now(),
    })
}

pub async fn handle_explain(ctx: &CommandContext, params: ExplainParams, as_json: bool) -> Result<()> {
    let output = explain_projection(ctx, params).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}: {:.1} pts (baseline {:.1}, {} method)",
        output.player_name,
        output.projected_points,
        output.explanation.base_value,
        output.explanation.method
    );
    for factor in &output.explanation.top_factors {
        println!("  {:<20} {}", factor.feature, factor.human_readable);
    }
    println!("{}", output.explanation.reasoning);
    Ok(())
}
