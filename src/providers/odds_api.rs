//! The Odds API client. Quota is counted per hour, not per minute.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::types::{Bookmaker, MarketQuote, OddsQuote, Outcome};
use super::OddsProvider;
use crate::cli::types::{Market, Sport};
use crate::core::config::ProviderConfig;
use crate::core::http::{api_key_header_map, build_client, get_json};
use crate::core::{RateLimitStatus, RateLimiter};
use crate::Result;

pub fn sport_key(sport: Sport) -> &'static str {
    match sport {
        Sport::NBA => "basketball_nba",
        Sport::NFL => "americanfootball_nfl",
        Sport::MLB => "baseball_mlb",
        Sport::NHL => "icehockey_nhl",
    }
}

pub struct OddsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    limiter: RateLimiter,
}

impl OddsApiClient {
    pub const NAME: &'static str = "the-odds-api";

    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(api_key_header_map(None)?, config.timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            limiter: RateLimiter::per_hour(Self::NAME, config.rate_limit),
        })
    }
}

#[async_trait]
impl OddsProvider for OddsApiClient {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn list_odds(
        &self,
        sport: Sport,
        markets: &[Market],
        bookmakers: Option<&[String]>,
    ) -> Result<Vec<OddsQuote>> {
        self.limiter.try_acquire()?;

        let markets = markets
            .iter()
            .map(Market::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let mut query = vec![
            ("apiKey", self.api_key.clone()),
            ("regions", "us".to_string()),
            ("markets", markets),
            ("oddsFormat", "american".to_string()),
        ];
        if let Some(books) = bookmakers.filter(|b| !b.is_empty()) {
            query.push(("bookmakers", books.join(",")));
        }

        let url = format!("{}/sports/{}/odds", self.base_url, sport_key(sport));
        let events: Vec<WireEvent> = get_json(&self.client, Self::NAME, &url, &query).await?;

        Ok(events
            .into_iter()
            .map(|event| event.into_quote(sport))
            .collect())
    }

    fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        Some(self.limiter.status())
    }
}

fn parse_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|r| DateTime::parse_from_rfc3339(r).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    id: String,
    #[serde(default)]
    commence_time: Option<String>,
    #[serde(default)]
    home_team: String,
    #[serde(default)]
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<WireBookmaker>,
}

impl WireEvent {
    fn into_quote(self, sport: Sport) -> OddsQuote {
        OddsQuote {
            game_id: self.id,
            sport,
            home_team: self.home_team,
            away_team: self.away_team,
            commence_time: parse_time(self.commence_time.as_deref()),
            bookmakers: self
                .bookmakers
                .into_iter()
                .map(WireBookmaker::into_bookmaker)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireBookmaker {
    #[serde(default)]
    key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    markets: Vec<WireMarket>,
}

impl WireBookmaker {
    fn into_bookmaker(self) -> Bookmaker {
        Bookmaker {
            key: self.key,
            name: self.title,
            markets: self
                .markets
                .into_iter()
                .map(|market| MarketQuote {
                    market: Market::from_provider_key(&market.key),
                    last_update: parse_time(market.last_update.as_deref()),
                    key: market.key,
                    outcomes: market
                        .outcomes
                        .into_iter()
                        .map(|o| Outcome {
                            name: o.name,
                            price: o.price.unwrap_or(0.0),
                            point: o.point,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireMarket {
    #[serde(default)]
    key: String,
    #[serde(default)]
    last_update: Option<String>,
    #[serde(default)]
    outcomes: Vec<WireOutcome>,
}

#[derive(Debug, Deserialize)]
struct WireOutcome {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    point: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::SportIntelError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_sport_keys() {
        assert_eq!(sport_key(Sport::NBA), "basketball_nba");
        assert_eq!(sport_key(Sport::NHL), "icehockey_nhl");
    }

    #[tokio::test]
    async fn test_list_odds_normalizes_markets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sports/basketball_nba/odds"))
            .and(query_param("apiKey", "odds-key"))
            .and(query_param("regions", "us"))
            .and(query_param("markets", "spreads,totals"))
            .and(query_param("oddsFormat", "american"))
            .and(query_param("bookmakers", "fanduel,draftkings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "evt1",
                "commence_time": "2024-01-16T00:30:00Z",
                "home_team": "Boston Celtics",
                "away_team": "Miami Heat",
                "bookmakers": [{
                    "key": "fanduel",
                    "title": "FanDuel",
                    "markets": [
                        { "key": "spreads", "last_update": "2024-01-15T20:00:00Z",
                          "outcomes": [
                            { "name": "Boston Celtics", "price": -110, "point": -6.5 },
                            { "name": "Miami Heat", "price": -110, "point": 6.5 }
                          ] },
                        { "key": "alternate_totals", "outcomes": [
                            { "name": "Over", "price": 105, "point": 221.5 }
                          ] }
                    ]
                }]
            }])))
            .mount(&server)
            .await;

        let config = Config::default()
            .odds
            .with_base_url(server.uri())
            .with_api_key("odds-key");
        let client = OddsApiClient::new(&config).unwrap();
        let books = vec!["fanduel".to_string(), "draftkings".to_string()];
        let quotes = client
            .list_odds(Sport::NBA, &[Market::Spreads, Market::Totals], Some(books.as_slice()))
            .await
            .unwrap();

        assert_eq!(quotes.len(), 1);
        let quote = &quotes[0];
        assert_eq!(quote.home_team, "Boston Celtics");
        assert!(quote.commence_time.is_some());
        let markets = &quote.bookmakers[0].markets;
        assert_eq!(quote.bookmakers[0].name, "FanDuel");
        assert_eq!(markets[0].market, Market::Spreads);
        assert_eq!(markets[0].outcomes[0].point, Some(-6.5));
        assert_eq!(markets[1].market, Market::Totals);
        assert_eq!(markets[1].key, "alternate_totals");
        assert!(markets[1].last_update.is_none());
    }

    #[tokio::test]
    async fn test_hourly_quota() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::default()
            .odds
            .with_base_url(server.uri())
            .with_rate_limit(1);
        let client = OddsApiClient::new(&config).unwrap();

        assert!(client.list_odds(Sport::NBA, &[Market::H2h], None).await.unwrap().is_empty());
        let err = client
            .list_odds(Sport::NBA, &[Market::H2h], None)
            .await
            .unwrap_err();
        assert!(matches!(err, SportIntelError::RateLimitExceeded { .. }));
    }
}
