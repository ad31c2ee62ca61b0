//! In-memory providers and a manual clock for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::cli::types::{Market, PlayerId, Position, SalarySource, Site, Sport};
use crate::core::Clock;
use crate::providers::{
    DateRange, GameRecord, OddsProvider, OddsQuote, PlayerRecord, RawStatLine, SalaryProvider,
    SalaryQuote, SiteSalaries, Slate, StatsProvider,
};
use crate::{Result, SportIntelError};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn quote(name: &str, site: Site, salary: u32) -> SalaryQuote {
    SalaryQuote {
        player_id: PlayerId::new(name.to_lowercase().replace(' ', "-")),
        player_name: name.to_string(),
        team: "TST".to_string(),
        position: Position::PG,
        salaries: SiteSalaries::for_site(site, salary),
        slate_id: "slate-1".to_string(),
        sport: Sport::NBA,
        fetched_at: fixed_now(),
    }
}

pub enum Behavior {
    Returns(Vec<SalaryQuote>),
    Empty,
    Fails,
    Misconfigured,
}

/// Salary provider that answers with a fixed behavior and counts calls.
pub struct FakeSalaryProvider {
    source: SalarySource,
    behavior: Behavior,
    pub calls: AtomicUsize,
}

impl FakeSalaryProvider {
    pub fn new(source: SalarySource, behavior: Behavior) -> Self {
        Self {
            source,
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SalaryProvider for FakeSalaryProvider {
    fn source(&self) -> SalarySource {
        self.source
    }

    fn supports_site(&self, _site: Site) -> bool {
        true
    }

    async fn list_slates(&self, sport: Sport, _date: NaiveDate) -> Result<Vec<Slate>> {
        Ok(vec![Slate {
            id: "slate-1".to_string(),
            name: "Main".to_string(),
            sport,
            site: Site::DraftKings,
            game_count: 5,
            start_time: None,
        }])
    }

    async fn list_salaries(&self, _slate: &Slate, _site: Site) -> Result<Vec<SalaryQuote>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Returns(quotes) => Ok(quotes.clone()),
            Behavior::Empty => Ok(Vec::new()),
            Behavior::Fails => Err(SportIntelError::unavailable(self.source.as_str(), "boom")),
            Behavior::Misconfigured => Err(SportIntelError::configuration("salary source url is not set")),
        }
    }
}

pub fn player(id: &str, name: &str, team: &str, position: Position) -> PlayerRecord {
    PlayerRecord {
        id: PlayerId::new(id),
        name: name.to_string(),
        team: team.to_string(),
        position,
        salary: 0,
        sport: Sport::NBA,
    }
}

pub fn stat_line(day: u32, pts: f64, reb: f64, ast: f64) -> RawStatLine {
    RawStatLine {
        game_id: format!("g{day}"),
        game_date: NaiveDate::from_ymd_opt(2024, 1, day),
        pts,
        reb,
        ast,
        stl: 1.0,
        blk: 1.0,
        tov: 2.0,
        minutes: "32".to_string(),
    }
}

/// Stats provider backed by maps.
#[derive(Default)]
pub struct FakeStatsProvider {
    pub players: Vec<PlayerRecord>,
    pub games: Vec<GameRecord>,
    pub stats: HashMap<PlayerId, Vec<RawStatLine>>,
    pub failing: HashSet<PlayerId>,
    pub fail_players: bool,
    pub player_calls: AtomicUsize,
    pub stat_calls: AtomicUsize,
}

impl FakeStatsProvider {
    pub fn with_game(mut self) -> Self {
        self.games.push(GameRecord {
            id: "1".to_string(),
            sport: Sport::NBA,
            home_team: "LAL".to_string(),
            away_team: "BOS".to_string(),
            start_time: None,
            status: "scheduled".to_string(),
        });
        self
    }

    pub fn with_player(mut self, record: PlayerRecord, lines: Vec<RawStatLine>) -> Self {
        self.stats.insert(record.id.clone(), lines);
        self.players.push(record);
        self
    }
}

#[async_trait]
impl StatsProvider for FakeStatsProvider {
    fn name(&self) -> &str {
        "fake-stats"
    }

    async fn list_players(&self, _search: Option<&str>) -> Result<Vec<PlayerRecord>> {
        self.player_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_players {
            return Err(SportIntelError::unavailable("fake-stats", "down"));
        }
        Ok(self.players.clone())
    }

    async fn list_games(&self, _date: NaiveDate) -> Result<Vec<GameRecord>> {
        Ok(self.games.clone())
    }

    async fn list_player_stats(
        &self,
        player_id: &PlayerId,
        _range: DateRange,
    ) -> Result<Vec<RawStatLine>> {
        self.stat_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(player_id) {
            return Err(SportIntelError::unavailable("fake-stats", "timeout"));
        }
        Ok(self.stats.get(player_id).cloned().unwrap_or_default())
    }
}

/// Odds provider returning canned quotes, or failing.
pub struct FakeOddsProvider {
    pub quotes: Vec<OddsQuote>,
    pub fail: bool,
}

#[async_trait]
impl OddsProvider for FakeOddsProvider {
    fn name(&self) -> &str {
        "fake-odds"
    }

    async fn list_odds(
        &self,
        _sport: Sport,
        _markets: &[Market],
        _bookmakers: Option<&[String]>,
    ) -> Result<Vec<OddsQuote>> {
        if self.fail {
            return Err(SportIntelError::unavailable("fake-odds", "HTTP 401"));
        }
        Ok(self.quotes.clone())
    }
}
