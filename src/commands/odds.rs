//! `getLiveOdds`: current lines per game plus the best price on each side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::CommandContext;
use crate::cli::types::{Market, Sport};
use crate::providers::{Bookmaker, OddsQuote};
use crate::{Result, SportIntelError};

fn default_markets() -> Vec<Market> {
    vec![Market::Spreads, Market::Totals]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsParams {
    pub sport: Sport,
    /// Only these games when set.
    #[serde(default, alias = "gameIds")]
    pub game_ids: Option<Vec<String>>,
    #[serde(default = "default_markets")]
    pub markets: Vec<Market>,
    #[serde(default)]
    pub bookmakers: Option<Vec<String>>,
}

impl OddsParams {
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            game_ids: None,
            markets: default_markets(),
            bookmakers: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.markets.is_empty() {
            return Err(SportIntelError::validation("at least one market is required"));
        }
        Ok(())
    }
}

/// Best price found for one side of a market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestLine {
    pub line: Option<f64>,
    pub price: f64,
    pub bookmaker: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BestOdds {
    pub home_spread: Option<BestLine>,
    pub away_spread: Option<BestLine>,
    pub over_total: Option<BestLine>,
    pub under_total: Option<BestLine>,
}

impl BestOdds {
    /// Highest American price for each side across every bookmaker. A spread
    /// outcome named after the home team is the home side; anything else is
    /// the away side.
    pub fn from_quote(quote: &OddsQuote) -> Self {
        let mut best = Self::default();
        for book in &quote.bookmakers {
            for market in &book.markets {
                for outcome in &market.outcomes {
                    let slot = match market.market {
                        Market::Spreads if outcome.name == quote.home_team => &mut best.home_spread,
                        Market::Spreads => &mut best.away_spread,
                        Market::Totals if outcome.name.eq_ignore_ascii_case("over") => {
                            &mut best.over_total
                        }
                        Market::Totals if outcome.name.eq_ignore_ascii_case("under") => {
                            &mut best.under_total
                        }
                        _ => continue,
                    };
                    if slot.as_ref().map_or(true, |current| outcome.price > current.price) {
                        *slot = Some(BestLine {
                            line: outcome.point,
                            price: outcome.price,
                            bookmaker: book.name.clone(),
                        });
                    }
                }
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOdds {
    pub game_id: String,
    pub home_team: String,
    pub away_team: String,
    pub game_time: Option<DateTime<Utc>>,
    pub bookmakers: Vec<Bookmaker>,
    pub best_odds: BestOdds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsMetadata {
    pub fetched_at: DateTime<Utc>,
    pub data_source: String,
    pub markets_covered: Vec<Market>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsOutput {
    pub sport: Sport,
    pub games: Vec<GameOdds>,
    pub metadata: OddsMetadata,
}

/// Fetch odds. Provider failures, including an exhausted quota, are returned
/// to the caller as-is.
pub async fn get_live_odds(ctx: &CommandContext, params: OddsParams) -> Result<OddsOutput> {
    params.validate()?;
    let provider = ctx.odds()?;
    info!(sport = %params.sport, markets = params.markets.len(), "fetching live odds");

    let quotes = provider
        .list_odds(params.sport, &params.markets, params.bookmakers.as_deref())
        .await?;

    let games = quotes
        .into_iter()
        .filter(|quote| {
            params
                .game_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(&quote.game_id))
        })
        .map(|quote| GameOdds {
            best_odds: BestOdds::from_quote(&quote),
            game_id: quote.game_id,
            home_team: quote.home_team,
            away_team: quote.away_team,
            game_time: quote.commence_time,
            bookmakers: quote.bookmakers,
        })
        .collect();

    Ok(OddsOutput {
        sport: params.sport,
        games,
        metadata: OddsMetadata {
            fetched_at: ctx.now(),
            data_source: provider.name().to_string(),
            markets_covered: params.markets,
        },
    })
}

pub async fn handle_odds(ctx: &CommandContext, params: OddsParams, as_json: bool) -> Result<()> {
    let output = get_live_odds(ctx, params).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} games from {}", output.games.len(), output.metadata.data_source);
    for game in &output.games {
        println!("{} @ {}", game.away_team, game.home_team);
        let sides = [
            ("home spread", &game.best_odds.home_spread),
            ("away spread", &game.best_odds.away_spread),
            ("over", &game.best_odds.over_total),
            ("under", &game.best_odds.under_total),
        ];
        for (label, best) in sides {
            if let Some(best) = best {
                let line = best.line.map(|l| format!("{l:+}")).unwrap_or_default();
                println!("  {label:<12} {line:>6} {:>+5} ({})", best.price, best.bookmaker);
            }
        }
    }
    Ok(())
}
