use serde::Serialize;

use crate::providers::RawStatLine;


/// Games averaged for a projection.
pub const RECENT_GAMES: usize = 10;

/// Calendar days fetched to find [`RECENT_GAMES`] games (twice the count, to
/// skip over rest days).
pub const STATS_WINDOW_DAYS: i64 = (RECENT_GAMES * 2) as i64;

const BONUS_THRESHOLD: f64 = 10.0;

/// DraftKings NBA scoring for one box score.
///
/// PTS 1, REB 1.25, AST 1.5, STL 2, BLK 2, TOV -0.5, plus +1 for each of
/// PTS/REB/AST reaching 10 and +3 more when all three do.
pub fn fantasy_points(line: &RawStatLine) -> f64 {
    let base = line.pts
        + 1.25 * line.reb
        + 1.5 * line.ast
        + 2.0 * line.stl
        + 2.0 * line.blk
        - 0.5 * line.tov;

    let double_digit = [line.pts, line.reb, line.ast]
        .iter()
        .filter(|v| **v >= BONUS_THRESHOLD)
        .count();
    let triple_double = if double_digit == 3 { 3.0 } else { 0.0 };

    base + double_digit as f64 + triple_double
}

/// Per-game averages over a player's most recent games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatAverages {
    pub games_played: usize,
    pub avg_points: f64,
    pub avg_rebounds: f64,
    pub avg_assists: f64,
    pub avg_fantasy_points: f64,
}

impl StatAverages {
    /// Average the last `last_n` games by date. Lines without a date keep
    /// their provider order ahead of dated ones.
    pub fn from_lines(lines: &[RawStatLine], last_n: usize) -> Self {
        let mut ordered: Vec<&RawStatLine> = lines.iter().collect();
        ordered.sort_by_key(|line| line.game_date);

        let recent = &ordered[ordered.len().saturating_sub(last_n)..];
        if recent.is_empty() {
            return Self::default();
        }

        let n = recent.len() as f64;
        let sum = |f: fn(&RawStatLine) -> f64| recent.iter().map(|&l| f(l)).sum::<f64>() / n;

        Self {
            games_played: recent.len(),
            avg_points: sum(|l| l.pts),
            avg_rebounds: sum(|l| l.reb),
            avg_assists: sum(|l| l.ast),
            avg_fantasy_points: sum(fantasy_points),
        }
    }
}

/// Confidence grows with the sample of games.
pub fn confidence_for(games_played: usize) -> f64 {
    match games_played {
        n if n >= 10 => 0.9,
        n if n >= 5 => 0.75,
        n if n >= 3 => 0.6,
        _ => 0.4,
    }
}

/// Points per 1000 salary units; zero for a zero salary.
pub fn value_per_thousand(points: f64, salary: u32) -> f64 {
    if salary == 0 {
        0.0
    } else {
        points / salary as f64 * 1000.0
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
