//! RotoGrinders slates and salaries. Prices every supported site.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{SalaryQuote, SiteSalaries, Slate};
use super::SalaryProvider;
use crate::cli::types::{normalize_position, PlayerId, SalarySource, Site, Sport};
use crate::core::config::ProviderConfig;
use crate::core::http::{bearer_header_map, build_client, get_json};
use crate::core::{RateLimitStatus, RateLimiter};
use crate::Result;

pub struct RotoGrindersClient {
    client: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl RotoGrindersClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let headers = bearer_header_map(config.api_key.as_deref())?;
        Ok(Self {
            client: build_client(headers, config.timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::per_minute(SalarySource::RotoGrinders.as_str(), config.rate_limit),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.limiter.try_acquire()?;
        let url = format!("{}{}", self.base_url, path);
        get_json(&self.client, SalarySource::RotoGrinders.as_str(), &url, query).await
    }
}

#[async_trait]
impl SalaryProvider for RotoGrindersClient {
    fn source(&self) -> SalarySource {
        SalarySource::RotoGrinders
    }

    fn supports_site(&self, _site: Site) -> bool {
        true
    }

    async fn list_slates(&self, sport: Sport, date: NaiveDate) -> Result<Vec<Slate>> {
        let path = format!("/slates/{}", sport.as_str().to_lowercase());
        let query = [("date", date.format("%Y-%m-%d").to_string())];
        let response: SlatesResponse = self.get(&path, &query).await?;

        Ok(response
            .slates
            .into_iter()
            .map(|slate| slate.into_slate(sport))
            .collect())
    }

    async fn list_salaries(&self, slate: &Slate, site: Site) -> Result<Vec<SalaryQuote>> {
        let path = format!("/players/{}", slate.id);
        let query = [("site", site.as_str().to_string())];
        let response: PlayersResponse = self.get(&path, &query).await?;

        let fetched_at = Utc::now();
        Ok(response
            .players
            .into_iter()
            .map(|player| player.into_quote(slate, site, fetched_at))
            .collect())
    }

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        Some(self.limiter.status())
    }
}

#[derive(Debug, Deserialize)]
struct SlatesResponse {
    #[serde(default)]
    slates: Vec<WireSlate>,
}

#[derive(Debug, Deserialize)]
struct WireSlate {
    slate_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    game_count: u32,
}

impl WireSlate {
    fn into_slate(self, sport: Sport) -> Slate {
        Slate {
            id: self.slate_id,
            name: self.name,
            sport,
            site: self
                .site
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            game_count: self.game_count,
            start_time: self
                .start_time
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayersResponse {
    #[serde(default)]
    players: Vec<WirePlayer>,
}

#[derive(Debug, Deserialize)]
struct WirePlayer {
    player_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    team: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    salary: u32,
    #[serde(default)]
    slate_id: Option<String>,
}

impl WirePlayer {
    /// The salary lands in the requested site's field only.
    fn into_quote(self, slate: &Slate, site: Site, fetched_at: DateTime<Utc>) -> SalaryQuote {
        SalaryQuote {
            player_id: PlayerId::new(self.player_id),
            player_name: self.name,
            team: self.team,
            position: normalize_position(&self.position),
            salaries: SiteSalaries::for_site(site, self.salary),
            slate_id: self.slate_id.unwrap_or_else(|| slate.id.clone()),
            sport: slate.sport,
            fetched_at,
        }
    }
}
