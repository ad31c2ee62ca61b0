//! External data sources.
//!
//! Each provider is a trait so services can be wired to real HTTP clients in
//! the binary and to in-memory fakes in tests. Clients own their rate
//! limiter; nothing here is process-global.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::cli::types::{Market, PlayerId, SalarySource, SlateType, Site, Sport};
use crate::core::RateLimitStatus;
use crate::Result;

pub mod balldontlie;
pub mod draftkings;
pub mod odds_api;
pub mod rotogrinders;
pub mod sentiment;
pub mod types;

pub use balldontlie::BallDontLieClient;
pub use draftkings::DraftKingsClient;
pub use odds_api::OddsApiClient;
pub use rotogrinders::RotoGrindersClient;
pub use sentiment::{
    HuggingFaceClassifier, InjuryRiskAnalyzer, NeutralOracle, SentimentClassifier,
    StaticMentionFeed,
};
pub use types::{
    select_slate, Bookmaker, DateRange, GameRecord, MarketQuote, OddsQuote, Outcome,
    PlayerRecord, RawStatLine, RiskAssessment, RiskLevel, SalaryQuote, SiteSalaries, Slate,
};

/// Box scores, schedules and the player list.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn list_players(&self, search: Option<&str>) -> Result<Vec<PlayerRecord>>;

    async fn list_games(&self, date: NaiveDate) -> Result<Vec<GameRecord>>;

    async fn list_player_stats(
        &self,
        player_id: &PlayerId,
        range: DateRange,
    ) -> Result<Vec<RawStatLine>>;

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        None
    }
}

/// DFS slates and salaries.
#[async_trait]
pub trait SalaryProvider: Send + Sync {
    fn source(&self) -> SalarySource;

    /// Sites this provider can price. Unsupported sites resolve to nothing.
    fn supports_site(&self, site: Site) -> bool;

    async fn list_slates(&self, sport: Sport, date: NaiveDate) -> Result<Vec<Slate>>;

    async fn list_salaries(&self, slate: &Slate, site: Site) -> Result<Vec<SalaryQuote>>;

    /// Salaries for the slate of `slate_type` on `date`.
    async fn salaries_for(
        &self,
        sport: Sport,
        site: Site,
        slate_type: SlateType,
        date: NaiveDate,
    ) -> Result<Vec<SalaryQuote>> {
        if !self.supports_site(site) {
            return Ok(Vec::new());
        }

        let slates = self.list_slates(sport, date).await?;
        match select_slate(&slates, slate_type) {
            Some(slate) => self.list_salaries(slate, site).await,
            None => {
                tracing::debug!(source = %self.source(), %sport, "no slates available");
                Ok(Vec::new())
            }
        }
    }

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        None
    }
}

/// Sportsbook lines.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn list_odds(
        &self,
        sport: Sport,
        markets: &[Market],
        bookmakers: Option<&[String]>,
    ) -> Result<Vec<OddsQuote>>;

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        None
    }
}

/// Scores injury risk from free-text mentions. Never fails: an oracle that
/// cannot reach its model answers [`RiskAssessment::neutral`].
#[async_trait]
pub trait RiskOracle: Send + Sync {
    async fn score_risk(&self, player_name: &str, mentions: &[String]) -> RiskAssessment;
}

/// Recent news or social mentions of a player.
#[async_trait]
pub trait MentionFeed: Send + Sync {
    async fn mentions(&self, player_name: &str) -> Vec<String>;
}
