//! Lineup-level metrics.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::types::Strategy;
use crate::projections::scoring::round_to;

/// Team with at least this many lineup members forms a stack.
pub const STACK_SIZE: usize = 3;

/// Confidence assumed when a member has none.
pub const DEFAULT_CONFIDENCE: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub team: String,
    pub players: Vec<String>,
}

/// Risk on a 0-100 scale, lower is safer. Tournaments tolerate the most.
pub fn risk_score(strategy: Strategy, confidences: &[f64]) -> u32 {
    if confidences.is_empty() {
        return 0;
    }
    let avg = confidences.iter().sum::<f64>() / confidences.len() as f64;
    let scale = match strategy {
        Strategy::Cash => 100.0,
        Strategy::Tournament => 50.0,
        Strategy::Balanced => 75.0,
    };
    ((1.0 - avg) * scale).round().max(0.0) as u32
}

/// Points per 1000 salary, 2 decimals.
pub fn expected_value(points: f64, total_salary: u32) -> f64 {
    if total_salary == 0 {
        return 0.0;
    }
    round_to(points / total_salary as f64 * 1000.0, 2)
}

/// Mean member ownership, rounded to a whole percent.
pub fn average_ownership(ownerships: &[f64]) -> f64 {
    if ownerships.is_empty() {
        return 0.0;
    }
    (ownerships.iter().sum::<f64>() / ownerships.len() as f64).round()
}

/// Teams with [`STACK_SIZE`] or more members, in team-name order. Members
/// keep lineup order.
pub fn find_stacks<'a, I>(members: I) -> Vec<Stack>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut by_team: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (team, name) in members {
        by_team.entry(team).or_default().push(name.to_string());
    }

    by_team
        .into_iter()
        .filter(|(_, players)| players.len() >= STACK_SIZE)
        .map(|(team, players)| Stack {
            team: team.to_string(),
            players,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_score_by_strategy() {
        let conf = [0.75; 8];
        assert_eq!(risk_score(Strategy::Cash, &conf), 25);
        assert_eq!(risk_score(Strategy::Tournament, &conf), 13);
        assert_eq!(risk_score(Strategy::Balanced, &conf), 19);
        assert_eq!(risk_score(Strategy::Cash, &[]), 0);
    }

    #[test]
    fn test_expected_value() {
        assert_eq!(expected_value(221.3, 35600), 6.22);
        assert_eq!(expected_value(100.0, 0), 0.0);
    }

    #[test]
    fn test_average_ownership_rounds() {
        assert_eq!(average_ownership(&[10.0, 12.0, 13.0]), 12.0);
        assert_eq!(average_ownership(&[]), 0.0);
    }

    #[test]
    fn test_stacks_need_three() {
        let members = [
            ("NYK", "Hart"),
            ("CHI", "Caruso"),
            ("NYK", "Anunoby"),
            ("CHI", "White"),
            ("NYK", "Randle"),
        ];
        let stacks = find_stacks(members);
        assert_eq!(
            stacks,
            vec![Stack {
                team: "NYK".to_string(),
                players: vec!["Hart".into(), "Anunoby".into(), "Randle".into()],
            }]
        );
    }
}
