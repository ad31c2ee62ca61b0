//! Normalized records every provider client produces.
//!
//! Wire formats stay private to each client; only these shapes cross the
//! provider boundary.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::types::{Market, PlayerId, Position, SlateType, Site, Sport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Zero when the source does not carry salaries.
    pub salary: u32,
    pub sport: Sport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub sport: Sport,
    pub home_team: String,
    pub away_team: String,
    pub start_time: Option<DateTime<Utc>>,
    pub status: String,
}

/// One box-score line. Missing counting stats decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatLine {
    pub game_id: String,
    pub game_date: Option<NaiveDate>,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub minutes: String,
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days` days ending at `end`.
    pub fn trailing(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

/// Salary per DFS site; a single fetch fills at most one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSalaries {
    pub draftkings: Option<u32>,
    pub fanduel: Option<u32>,
    pub yahoo: Option<u32>,
}

impl SiteSalaries {
    pub fn for_site(site: Site, salary: u32) -> Self {
        let mut salaries = Self::default();
        match site {
            Site::DraftKings => salaries.draftkings = Some(salary),
            Site::FanDuel => salaries.fanduel = Some(salary),
            Site::Yahoo => salaries.yahoo = Some(salary),
        }
        salaries
    }

    pub fn salary_for(&self, site: Site) -> Option<u32> {
        match site {
            Site::DraftKings => self.draftkings,
            Site::FanDuel => self.fanduel,
            Site::Yahoo => self.yahoo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryQuote {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub position: Position,
    pub salaries: SiteSalaries,
    pub slate_id: String,
    pub sport: Sport,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slate {
    pub id: String,
    pub name: String,
    pub sport: Sport,
    pub site: Site,
    pub game_count: u32,
    pub start_time: Option<DateTime<Utc>>,
}

impl Slate {
    fn name_matches(&self, slate_type: SlateType) -> bool {
        self.name.to_lowercase().contains(slate_type.as_str())
    }
}

/// Pick the slate that best represents `slate_type`.
///
/// - `main`: a slate named "main", else the one with most games
/// - `early` / `late`: earliest / latest start, else a name match
/// - anything else: a name match, else the first slate
pub fn select_slate(slates: &[Slate], slate_type: SlateType) -> Option<&Slate> {
    let by_name = || slates.iter().find(|s| s.name_matches(slate_type));

    match slate_type {
        SlateType::Main => by_name().or_else(|| {
            // max_by_key keeps the last maximum, so walk in reverse to keep the first
            slates.iter().rev().max_by_key(|s| s.game_count)
        }),
        SlateType::Early => slates
            .iter()
            .filter(|s| s.start_time.is_some())
            .min_by_key(|s| s.start_time)
            .or_else(by_name)
            .or_else(|| slates.first()),
        SlateType::Late => slates
            .iter()
            .rev()
            .filter(|s| s.start_time.is_some())
            .max_by_key(|s| s.start_time)
            .or_else(by_name)
            .or_else(|| slates.first()),
        _ => by_name().or_else(|| slates.first()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    /// American odds.
    pub price: f64,
    pub point: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    pub market: Market,
    /// Provider's own market key, e.g. `alternate_spreads`.
    pub key: String,
    pub outcomes: Vec<Outcome>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    pub name: String,
    pub markets: Vec<MarketQuote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    pub game_id: String,
    pub sport: Sport,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Verdict of the injury-risk oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub confidence: f64,
    /// Multiplier applied to a projection; 1.0 leaves it untouched.
    pub adjustment: f64,
    /// Mentions the model labelled negative with high confidence.
    #[serde(default)]
    pub negatives: usize,
    pub evidence: Vec<String>,
}

impl RiskAssessment {
    /// What an absent or failing oracle reports.
    pub fn neutral() -> Self {
        Self {
            level: RiskLevel::Low,
            confidence: 0.5,
            adjustment: 1.0,
            negatives: 0,
            evidence: Vec::new(),
        }
    }
}
