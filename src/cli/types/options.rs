//! Option enums shared by the CLI and the exposed operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SportIntelError;

fn invalid(kind: &'static str, value: &str) -> SportIntelError {
    SportIntelError::InvalidValue {
        kind,
        value: value.to_string(),
    }
}

/// Supported leagues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    NBA,
    NFL,
    MLB,
    NHL,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::NBA => "NBA",
            Sport::NFL => "NFL",
            Sport::MLB => "MLB",
            Sport::NHL => "NHL",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sport {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NBA" => Ok(Sport::NBA),
            "NFL" => Ok(Sport::NFL),
            "MLB" => Ok(Sport::MLB),
            "NHL" => Ok(Sport::NHL),
            _ => Err(invalid("sport", s)),
        }
    }
}

/// Daily-fantasy site whose salaries are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    #[default]
    DraftKings,
    FanDuel,
    Yahoo,
}

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::DraftKings => "draftkings",
            Site::FanDuel => "fanduel",
            Site::Yahoo => "yahoo",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Site {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draftkings" | "dk" => Ok(Site::DraftKings),
            "fanduel" | "fd" => Ok(Site::FanDuel),
            "yahoo" => Ok(Site::Yahoo),
            _ => Err(invalid("site", s)),
        }
    }
}

/// Slate (set of games) within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlateType {
    #[default]
    Main,
    Early,
    Afternoon,
    Evening,
    Late,
    Showdown,
}

impl SlateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlateType::Main => "main",
            SlateType::Early => "early",
            SlateType::Afternoon => "afternoon",
            SlateType::Evening => "evening",
            SlateType::Late => "late",
            SlateType::Showdown => "showdown",
        }
    }
}

impl fmt::Display for SlateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlateType {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" => Ok(SlateType::Main),
            "early" => Ok(SlateType::Early),
            "afternoon" => Ok(SlateType::Afternoon),
            "evening" => Ok(SlateType::Evening),
            "late" => Ok(SlateType::Late),
            "showdown" => Ok(SlateType::Showdown),
            _ => Err(invalid("slate type", s)),
        }
    }
}

/// Contest strategy driving the lineup sort order and risk scaling.
///
/// - **Cash**: prefer safe floors
/// - **Tournament**: chase ceilings
/// - **Balanced**: sort by points per $1K
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Cash,
    Tournament,
    #[default]
    Balanced,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Cash => "cash",
            Strategy::Tournament => "tournament",
            Strategy::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Strategy::Cash),
            "tournament" | "gpp" => Ok(Strategy::Tournament),
            "balanced" => Ok(Strategy::Balanced),
            _ => Err(invalid("strategy", s)),
        }
    }
}

/// Betting market families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    Spreads,
    Totals,
    H2h,
    PlayerProps,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Spreads => "spreads",
            Market::Totals => "totals",
            Market::H2h => "h2h",
            Market::PlayerProps => "player_props",
        }
    }

    /// Normalize a provider market key onto a family.
    pub fn from_provider_key(key: &str) -> Self {
        let key = key.to_lowercase();
        if key.contains("spread") {
            Market::Spreads
        } else if key.contains("total") {
            Market::Totals
        } else if key.contains("h2h") || key.contains("moneyline") {
            Market::H2h
        } else {
            Market::PlayerProps
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Market {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spreads" => Ok(Market::Spreads),
            "totals" => Ok(Market::Totals),
            "h2h" => Ok(Market::H2h),
            "player_props" => Ok(Market::PlayerProps),
            _ => Err(invalid("market", s)),
        }
    }
}

/// Salary providers the resolution service can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalarySource {
    DraftKings,
    RotoGrinders,
}

impl SalarySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalarySource::DraftKings => "draftkings",
            SalarySource::RotoGrinders => "rotogrinders",
        }
    }
}

impl fmt::Display for SalarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SalarySource {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draftkings" => Ok(SalarySource::DraftKings),
            "rotogrinders" => Ok(SalarySource::RotoGrinders),
            _ => Err(invalid("salary source", s)),
        }
    }
}

/// How projection factors are attributed in explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplainMethod {
    #[default]
    Shap,
    Lime,
    FeatureImportance,
}

impl ExplainMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplainMethod::Shap => "shap",
            ExplainMethod::Lime => "lime",
            ExplainMethod::FeatureImportance => "feature_importance",
        }
    }
}

impl fmt::Display for ExplainMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExplainMethod {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shap" => Ok(ExplainMethod::Shap),
            "lime" => Ok(ExplainMethod::Lime),
            "feature_importance" => Ok(ExplainMethod::FeatureImportance),
            _ => Err(invalid("explain method", s)),
        }
    }
}
