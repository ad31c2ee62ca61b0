//! Player position types and provider code normalization.

use crate::error::SportIntelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player positions across the supported sports.
///
/// Basketball positions (PG, SG, SF, PF, C) drive NBA lineup construction;
/// the football positions are carried so salary feeds for other sports
/// normalize cleanly.
///
/// # Examples
///
/// ```rust
/// use sportintel::Position;
///
/// let pg = Position::PG;
/// assert_eq!(pg.to_string(), "PG");
/// assert!(pg.is_guard());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
    QB,
    RB,
    WR,
    TE,
    DST,
    K,
}

/// Position used when a provider sends a code we cannot map.
pub const FALLBACK_POSITION: Position = Position::PG;

impl Position {
    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::SF | Position::PF)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::DST => "DST",
            Position::K => "K",
        }
    }
}

/// Map a provider position code onto a [`Position`].
///
/// Combined basketball codes resolve to their first listed role. Unknown or
/// empty codes fall back to [`FALLBACK_POSITION`] instead of failing, since a
/// single odd record must not sink a whole feed.
pub fn normalize_position(code: &str) -> Position {
    match code.trim().to_uppercase().as_str() {
        "PG" | "G" => Position::PG,
        "SG" | "G-F" => Position::SG,
        "SF" | "F" | "F-G" => Position::SF,
        "PF" | "F-C" => Position::PF,
        "C" | "C-F" => Position::C,
        "QB" => Position::QB,
        "RB" => Position::RB,
        "WR" => Position::WR,
        "TE" => Position::TE,
        "DST" | "DEF" | "D/ST" | "D" => Position::DST,
        "K" | "PK" => Position::K,
        _ => FALLBACK_POSITION,
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PG" => Ok(Position::PG),
            "SG" => Ok(Position::SG),
            "SF" => Ok(Position::SF),
            "PF" => Ok(Position::PF),
            "C" => Ok(Position::C),
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "DST" | "DEF" | "D/ST" => Ok(Position::DST),
            "K" => Ok(Position::K),
            _ => Err(SportIntelError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}
