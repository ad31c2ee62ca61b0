//! balldontlie.io NBA stats client.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{DateRange, GameRecord, PlayerRecord, RawStatLine};
use super::StatsProvider;
use crate::cli::types::{normalize_position, PlayerId, Sport};
use crate::core::config::ProviderConfig;
use crate::core::http::{api_key_header_map, build_client, get_json};
use crate::core::{RateLimitStatus, RateLimiter};
use crate::Result;


const PER_PAGE: &str = "100";

pub struct BallDontLieClient {
    client: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl BallDontLieClient {
    pub const NAME: &'static str = "balldontlie";

    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let headers = api_key_header_map(config.api_key.as_deref())?;
        Ok(Self {
            client: build_client(headers, config.timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::per_minute(Self::NAME, config.rate_limit),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.limiter.try_acquire()?;
        let url = format!("{}{}", self.base_url, path);
        get_json(&self.client, Self::NAME, &url, query).await
    }
}

#[async_trait]
impl StatsProvider for BallDontLieClient {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn list_players(&self, search: Option<&str>) -> Result<Vec<PlayerRecord>> {
        let mut query = vec![("per_page", PER_PAGE.to_string())];
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            query.push(("search", term.to_string()));
        }

        let page: Page<WirePlayer> = self.get("/players", &query).await?;
        Ok(page.data.into_iter().map(WirePlayer::into_record).collect())
    }

    async fn list_games(&self, date: NaiveDate) -> Result<Vec<GameRecord>> {
        let query = [
            ("dates[]", date.format("%Y-%m-%d").to_string()),
            ("per_page", PER_PAGE.to_string()),
        ];
        let page: Page<WireGame> = self.get("/games", &query).await?;
        Ok(page.data.into_iter().map(WireGame::into_record).collect())
    }

    async fn list_player_stats(
        &self,
        player_id: &PlayerId,
        range: DateRange,
    ) -> Result<Vec<RawStatLine>> {
        let query = [
            ("player_ids[]", player_id.to_string()),
            ("start_date", range.start.format("%Y-%m-%d").to_string()),
            ("end_date", range.end.format("%Y-%m-%d").to_string()),
            ("per_page", PER_PAGE.to_string()),
        ];
        let page: Page<WireStats> = self.get("/stats", &query).await?;
        Ok(page.data.into_iter().map(WireStats::into_line).collect())
    }

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        Some(self.limiter.status())
    }
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct WireTeam {
    #[serde(default)]
    abbreviation: String,
}

#[derive(Debug, Deserialize)]
struct WirePlayer {
    id: u64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    team: Option<WireTeam>,
}

impl WirePlayer {
    fn into_record(self) -> PlayerRecord {
        PlayerRecord {
            id: PlayerId::from(self.id),
            name: format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
            team: self.team.unwrap_or_default().abbreviation,
            position: normalize_position(self.position.as_deref().unwrap_or_default()),
            salary: 0,
            sport: Sport::NBA,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireGame {
    id: u64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    datetime: Option<String>,
    #[serde(default)]
    home_team: Option<WireTeam>,
    #[serde(default)]
    visitor_team: Option<WireTeam>,
    #[serde(default)]
    status: Option<String>,
}

impl WireGame {
    /// Tip-off from `datetime`; games without one start at midnight UTC of `date`.
    fn into_record(self) -> GameRecord {
        let start_time = self
            .datetime
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| {
                self.date
                    .as_deref()
                    .and_then(parse_game_date)
                    .and_then(|day| day.and_hms_opt(0, 0, 0))
                    .map(|midnight| midnight.and_utc())
            });

        GameRecord {
            id: self.id.to_string(),
            sport: Sport::NBA,
            home_team: self.home_team.unwrap_or_default().abbreviation,
            away_team: self.visitor_team.unwrap_or_default().abbreviation,
            start_time,
            status: self.status.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireStatsGame {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireStats {
    #[serde(default)]
    game: Option<WireStatsGame>,
    #[serde(default)]
    pts: Option<f64>,
    #[serde(default)]
    reb: Option<f64>,
    #[serde(default)]
    ast: Option<f64>,
    #[serde(default)]
    stl: Option<f64>,
    #[serde(default)]
    blk: Option<f64>,
    #[serde(default)]
    turnover: Option<f64>,
    #[serde(default)]
    min: Option<String>,
}

impl WireStats {
    fn into_line(self) -> RawStatLine {
        let game = self.game.unwrap_or_default();
        RawStatLine {
            game_id: game.id.to_string(),
            game_date: game.date.as_deref().and_then(parse_game_date),
            pts: self.pts.unwrap_or(0.0),
            reb: self.reb.unwrap_or(0.0),
            ast: self.ast.unwrap_or(0.0),
            stl: self.stl.unwrap_or(0.0),
            blk: self.blk.unwrap_or(0.0),
            tov: self.turnover.unwrap_or(0.0),
            minutes: self.min.unwrap_or_default(),
        }
    }
}

/// Accepts `2024-01-15` as well as full timestamps.
fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}
