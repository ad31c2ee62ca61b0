//! DraftKings lobby client (draft groups and draftables).
//!
//! Only prices DraftKings itself; any other site resolves to an empty set.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::types::{SalaryQuote, SiteSalaries, Slate};
use super::SalaryProvider;
use crate::cli::types::{normalize_position, PlayerId, SalarySource, Site, Sport};
use crate::core::config::ProviderConfig;
use crate::core::http::{browser_header_map, build_client, get_json};
use crate::core::{RateLimitStatus, RateLimiter};
use crate::Result;

const LOBBY_ORIGIN: &str = "https://www.draftkings.com";

/// DraftKings' numeric sport ids.
pub fn sport_id(sport: Sport) -> u32 {
    match sport {
        Sport::NBA => 4,
        Sport::NFL => 1,
        Sport::MLB => 2,
        Sport::NHL => 3,
    }
}

pub struct DraftKingsClient {
    client: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl DraftKingsClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(browser_header_map(LOBBY_ORIGIN)?, config.timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::per_minute(SalarySource::DraftKings.as_str(), config.rate_limit),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.limiter.try_acquire()?;
        let url = format!("{}{}", self.base_url, path);
        get_json(&self.client, SalarySource::DraftKings.as_str(), &url, query).await
    }
}

#[async_trait]
impl SalaryProvider for DraftKingsClient {
    fn source(&self) -> SalarySource {
        SalarySource::DraftKings
    }

    fn supports_site(&self, site: Site) -> bool {
        site == Site::DraftKings
    }

    /// The lobby lists what is open now, so `date` is not sent.
    async fn list_slates(&self, sport: Sport, _date: NaiveDate) -> Result<Vec<Slate>> {
        let query = [("sport", sport_id(sport).to_string())];
        let groups: DraftGroupsResponse = self.get("/draftgroups", &query).await?;

        Ok(groups
            .draft_groups
            .into_iter()
            .map(|group| group.into_slate(sport))
            .collect())
    }

    async fn list_salaries(&self, slate: &Slate, site: Site) -> Result<Vec<SalaryQuote>> {
        if !self.supports_site(site) {
            return Ok(Vec::new());
        }

        let path = format!("/draftgroups/{}/draftables", slate.id);
        let query = [("format", "json".to_string())];
        let response: DraftablesResponse = self.get(&path, &query).await?;

        let fetched_at = Utc::now();
        Ok(response
            .draftables
            .into_iter()
            .map(|player| player.into_quote(slate, fetched_at))
            .collect())
    }

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        Some(self.limiter.status())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftGroupsResponse {
    #[serde(default)]
    draft_groups: Vec<WireDraftGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDraftGroup {
    draft_group_id: u64,
    #[serde(default)]
    game_count: u32,
    #[serde(default)]
    start_time_type: Option<String>,
    #[serde(default)]
    min_start_time: Option<String>,
}

impl WireDraftGroup {
    fn into_slate(self, sport: Sport) -> Slate {
        let start_time = self
            .min_start_time
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Slate {
            id: self.draft_group_id.to_string(),
            name: self.start_time_type.unwrap_or_else(|| "Normal".to_string()),
            sport,
            site: Site::DraftKings,
            game_count: self.game_count,
            start_time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DraftablesResponse {
    #[serde(default)]
    draftables: Vec<WireDraftable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDraftable {
    player_id: u64,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    team_abbreviation: String,
    #[serde(default)]
    salary: u32,
}

impl WireDraftable {
    fn into_quote(self, slate: &Slate, fetched_at: DateTime<Utc>) -> SalaryQuote {
        let player_name = self
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("{} {}", self.first_name, self.last_name).trim().to_string());

        SalaryQuote {
            player_id: PlayerId::from(self.player_id),
            player_name,
            team: self.team_abbreviation,
            position: normalize_position(&self.position),
            salaries: SiteSalaries::for_site(Site::DraftKings, self.salary),
            slate_id: slate.id.clone(),
            sport: slate.sport,
            fetched_at,
        }
    }
}
