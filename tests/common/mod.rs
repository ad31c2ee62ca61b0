//! Shared fixtures for integration tests: in-memory providers and a fixed clock.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sportintel::commands::{CommandContext, Providers};
use sportintel::core::{Clock, SalaryServiceConfig};
use sportintel::providers::{
    DateRange, GameRecord, PlayerRecord, RawStatLine, SalaryProvider, SalaryQuote, SiteSalaries,
    Slate, StaticMentionFeed, StatsProvider,
};
use sportintel::{PlayerId, Position, Result, SalarySource, Site, Sport, SportIntelError};

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn game_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()
}

/// Stats provider with one game and a fixed box score per player.
#[derive(Default)]
pub struct StubStats {
    pub players: Vec<PlayerRecord>,
    pub lines: HashMap<PlayerId, Vec<RawStatLine>>,
}

impl StubStats {
    pub fn with_player(mut self, id: &str, name: &str, position: Position, pts: f64, games: u32) -> Self {
        let record = PlayerRecord {
            id: PlayerId::new(id),
            name: name.to_string(),
            team: "TST".to_string(),
            position,
            salary: 0,
            sport: Sport::NBA,
        };
        let lines = (1..=games)
            .map(|day| RawStatLine {
                game_id: format!("{id}-{day}"),
                game_date: NaiveDate::from_ymd_opt(2024, 1, day),
                pts,
                reb: 5.0,
                ast: 4.0,
                stl: 1.0,
                blk: 0.0,
                tov: 2.0,
                minutes: "30".to_string(),
            })
            .collect();
        self.lines.insert(record.id.clone(), lines);
        self.players.push(record);
        self
    }
}

#[async_trait]
impl StatsProvider for StubStats {
    fn name(&self) -> &str {
        "stub-stats"
    }

    async fn list_players(&self, _search: Option<&str>) -> Result<Vec<PlayerRecord>> {
        Ok(self.players.clone())
    }

    async fn list_games(&self, _date: NaiveDate) -> Result<Vec<GameRecord>> {
        Ok(vec![GameRecord {
            id: "g1".to_string(),
            sport: Sport::NBA,
            home_team: "TST".to_string(),
            away_team: "OPP".to_string(),
            start_time: None,
            status: "scheduled".to_string(),
        }])
    }

    async fn list_player_stats(&self, player_id: &PlayerId, _range: DateRange) -> Result<Vec<RawStatLine>> {
        Ok(self.lines.get(player_id).cloned().unwrap_or_default())
    }
}

/// Salary source returning fixed prices, or failing when `prices` is `None`.
pub struct StubSalaries {
    pub source: SalarySource,
    pub prices: Option<Vec<(String, u32)>>,
    pub calls: AtomicUsize,
}

impl StubSalaries {
    pub fn new(source: SalarySource, prices: &[(&str, u32)]) -> Arc<Self> {
        Arc::new(Self {
            source,
            prices: Some(prices.iter().map(|(n, s)| (n.to_string(), *s)).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(source: SalarySource) -> Arc<Self> {
        Arc::new(Self {
            source,
            prices: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SalaryProvider for StubSalaries {
    fn source(&self) -> SalarySource {
        self.source
    }

    fn supports_site(&self, _site: Site) -> bool {
        true
    }

    async fn list_slates(&self, sport: Sport, _date: NaiveDate) -> Result<Vec<Slate>> {
        Ok(vec![Slate {
            id: "main".to_string(),
            name: "Main".to_string(),
            sport,
            site: Site::DraftKings,
            game_count: 1,
            start_time: None,
        }])
    }

    async fn list_salaries(&self, slate: &Slate, site: Site) -> Result<Vec<SalaryQuote>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prices = self
            .prices
            .as_ref()
            .ok_or_else(|| SportIntelError::unavailable(self.source.as_str(), "HTTP 503"))?;
        Ok(prices
            .iter()
            .map(|(name, salary)| SalaryQuote {
                player_id: PlayerId::new(name.to_lowercase()),
                player_name: name.clone(),
                team: "TST".to_string(),
                position: Position::PG,
                salaries: SiteSalaries::for_site(site, *salary),
                slate_id: slate.id.clone(),
                sport: Sport::NBA,
                fetched_at: game_day(),
            })
            .collect())
    }
}

pub fn context(stats: StubStats, salaries: Vec<Arc<dyn SalaryProvider>>) -> CommandContext {
    let providers = Providers {
        stats: Arc::new(stats),
        salaries,
        odds: None,
        oracle: None,
        mentions: Arc::new(StaticMentionFeed::new()),
    };
    CommandContext::new(providers, SalaryServiceConfig::default(), Some(3))
        .with_clock(Arc::new(FixedClock(game_day())))
}

/// Eighteen NBA players spanning every position and price tier.
pub fn sample_pool() -> Value {
    let rows = [
        ("1", "Luka Doncic", "DAL", "PG", 11500, 52.3),
        ("2", "Giannis Antetokounmpo", "MIL", "PF", 10800, 48.7),
        ("3", "Joel Embiid", "PHI", "C", 10200, 47.2),
        ("4", "Jayson Tatum", "BOS", "SF", 8900, 42.5),
        ("5", "Donovan Mitchell", "CLE", "SG", 8400, 40.1),
        ("6", "Trae Young", "ATL", "PG", 7800, 38.9),
        ("7", "Anthony Davis", "LAL", "PF", 7500, 37.6),
        ("8", "Julius Randle", "NYK", "PF", 6700, 35.2),
        ("9", "Dejounte Murray", "ATL", "PG", 6200, 33.8),
        ("10", "Tyler Herro", "MIA", "SG", 5800, 32.4),
        ("11", "Jaren Jackson Jr", "MEM", "C", 5500, 31.9),
        ("12", "OG Anunoby", "NYK", "SF", 5200, 30.7),
        ("13", "Coby White", "CHI", "PG", 4800, 28.5),
        ("14", "Josh Hart", "NYK", "SG", 4400, 27.3),
        ("15", "Derrick White", "BOS", "PG", 4000, 26.1),
        ("16", "Jalen Williams", "OKC", "SF", 3800, 25.8),
        ("17", "Nic Claxton", "BKN", "C", 3500, 24.5),
        ("18", "Alex Caruso", "CHI", "SG", 3200, 23.2),
    ];
    Value::Array(
        rows.iter()
            .map(|(id, name, team, position, salary, points)| {
                json!({
                    "playerId": id,
                    "playerName": name,
                    "team": team,
                    "position": position,
                    "salary": salary,
                    "projectedPoints": points,
                })
            })
            .collect(),
    )
}
