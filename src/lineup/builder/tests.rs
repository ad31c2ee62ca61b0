//! Unit tests for the greedy lineup builder

use super::*;

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::cli::types::Sport;
    use crate::lineup::requirements::requirements_for;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool_player(id: &str, name: &str, team: &str, position: Position, salary: u32, points: f64) -> PoolPlayer {
        PoolPlayer {
            id: PlayerId::new(id),
            name: name.to_string(),
            team: team.to_string(),
            position,
            salary,
            projected_points: points,
            floor: points * 0.8,
            ceiling: points * 1.2,
            confidence: 0.75,
            ownership: 10.0,
        }
    }

    fn sample_pool() -> Vec<PoolPlayer> {
        use Position::*;
        vec![
            pool_player("1", "Luka Doncic", "DAL", PG, 11500, 52.3),
            pool_player("2", "Giannis Antetokounmpo", "MIL", PF, 10800, 48.7),
            pool_player("3", "Joel Embiid", "PHI", C, 10200, 47.2),
            pool_player("4", "Jayson Tatum", "BOS", SF, 8900, 42.5),
            pool_player("5", "Donovan Mitchell", "CLE", SG, 8400, 40.1),
            pool_player("6", "Trae Young", "ATL", PG, 7800, 38.9),
            pool_player("7", "Anthony Davis", "LAL", PF, 7500, 37.6),
            pool_player("8", "Julius Randle", "NYK", PF, 6700, 35.2),
            pool_player("9", "Dejounte Murray", "ATL", PG, 6200, 33.8),
            pool_player("10", "Tyler Herro", "MIA", SG, 5800, 32.4),
            pool_player("11", "Jaren Jackson Jr", "MEM", C, 5500, 31.9),
            pool_player("12", "OG Anunoby", "NYK", SF, 5200, 30.7),
            pool_player("13", "Coby White", "CHI", PG, 4800, 28.5),
            pool_player("14", "Josh Hart", "NYK", SG, 4400, 27.3),
            pool_player("15", "Derrick White", "BOS", PG, 4000, 26.1),
            pool_player("16", "Jalen Williams", "OKC", SF, 3800, 25.8),
            pool_player("17", "Nic Claxton", "BKN", C, 3500, 24.5),
            pool_player("18", "Alex Caruso", "CHI", SG, 3200, 23.2),
        ]
    }

    fn ids(lineup: &Lineup) -> Vec<&str> {
        let mut ids: Vec<&str> = lineup.players.iter().map(|p| p.player_id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    fn assert_valid(lineup: &Lineup, cap: u32) {
        assert_eq!(lineup.players.len(), 8);
        assert!(lineup.total_salary <= cap);
        assert_eq!(
            lineup.total_salary,
            lineup.players.iter().map(|p| p.salary).sum::<u32>()
        );
        for player in &lineup.players {
            assert!(player.slot.accepts(player.position));
        }
        let mut unique = ids(lineup);
        unique.dedup();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_first_balanced_lineup_follows_value_order() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints::default();
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let mut rng = StdRng::seed_from_u64(42);

        let pool = sample_pool();
        let lineups = builder.build(&pool, 1, &mut rng);
        assert_eq!(lineups.len(), 1);

        let lineup = &lineups[0];
        assert_eq!(lineup.rank, 1);
        assert_eq!(ids(lineup), vec!["12", "13", "14", "15", "16", "17", "18", "8"]);
        assert_eq!(lineup.total_salary, 35600);
        assert_eq!(lineup.salary_remaining, 14400);
        assert_eq!(lineup.projected_points, 221.3);
        assert_eq!(lineup.expected_value, 6.22);
        assert_eq!(lineup.risk_score, 19);
        assert_eq!(lineup.estimated_ownership, 10.0);

        let slot_of = |name: &str| {
            lineup
                .players
                .iter()
                .find(|p| p.player_name == name)
                .map(|p| p.slot.label())
                .unwrap()
        };
        assert_eq!(slot_of("Alex Caruso"), "SG");
        assert_eq!(slot_of("Josh Hart"), "G");
        assert_eq!(slot_of("Coby White"), "UTIL");
        assert_eq!(slot_of("OG Anunoby"), "F");
        assert_eq!(slot_of("Julius Randle"), "PF");

        assert_eq!(lineup.stacks.len(), 1);
        assert_eq!(lineup.stacks[0].team, "NYK");
        assert_eq!(lineup.stacks[0].players.len(), 3);
    }

    #[test]
    fn test_cash_sorts_by_floor() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints::default();
        let builder = LineupBuilder::new(&reqs, 80000, Strategy::Cash, &constraints);
        let mut rng = StdRng::seed_from_u64(1);

        let pool = sample_pool();
        let lineups = builder.build(&pool, 1, &mut rng);
        let lineup = &lineups[0];

        assert_eq!(ids(lineup), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(lineup.total_salary, 71800);
        assert_eq!(lineup.projected_points, 342.5);
        assert_eq!(lineup.risk_score, 25);
    }

    #[test]
    fn test_top_heavy_greedy_fill_can_fail() {
        // Ceiling order spends 49,800 on five stars and strands three slots.
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints::default();
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Tournament, &constraints);
        let mut rng = StdRng::seed_from_u64(1);

        let pool = sample_pool();
        assert!(builder.build(&pool, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_lineups_respect_cap_and_size() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints::default();
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let pool = sample_pool();

        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let lineups = builder.build(&pool, 3, &mut rng);
            assert!(!lineups.is_empty());
            assert!(lineups.len() <= 3);
            for lineup in &lineups {
                assert_valid(lineup, 50000);
            }
        }
    }

    #[test]
    fn test_required_players_always_present() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints {
            required: vec![PlayerId::new("1"), PlayerId::new("2")],
            ..Default::default()
        };
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let pool = sample_pool();

        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            for lineup in builder.build(&pool, 3, &mut rng) {
                assert_valid(&lineup, 50000);
                assert!(lineup.contains(&PlayerId::new("1")));
                assert!(lineup.contains(&PlayerId::new("2")));
            }
        }
    }

    #[test]
    fn test_players_over_cap_are_filtered() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints {
            required: vec![PlayerId::new("1")],
            ..Default::default()
        };
        let builder = LineupBuilder::new(&reqs, 11000, Strategy::Balanced, &constraints);
        let pool = sample_pool();

        let eligible = builder.eligible(&pool);
        assert_eq!(eligible.len(), 17);
        assert!(eligible.iter().all(|p| p.id.as_str() != "1"));
    }

    #[test]
    fn test_excluded_players_never_appear() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints {
            excluded: vec![PlayerId::new("18"), PlayerId::new("17")],
            ..Default::default()
        };
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let pool = sample_pool();

        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            for lineup in builder.build(&pool, 3, &mut rng) {
                assert!(!lineup.contains(&PlayerId::new("18")));
                assert!(!lineup.contains(&PlayerId::new("17")));
            }
        }
    }

    #[test]
    fn test_team_cap() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints {
            max_per_team: Some(2),
            ..Default::default()
        };
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let pool = sample_pool();
        let mut rng = StdRng::seed_from_u64(9);

        let lineups = builder.build(&pool, 1, &mut rng);
        let lineup = &lineups[0];
        assert!(!lineup.contains(&PlayerId::new("8")));
        assert!(lineup.contains(&PlayerId::new("7")));
        assert!(lineup.stacks.is_empty());

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for p in &lineup.players {
            *counts.entry(p.team.as_str()).or_default() += 1;
        }
        assert!(counts.values().all(|&n| n <= 2));
    }

    #[test]
    fn test_missing_position_fails_every_attempt() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints::default();
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let pool: Vec<PoolPlayer> = sample_pool()
            .into_iter()
            .filter(|p| p.position != Position::C)
            .collect();
        let mut rng = StdRng::seed_from_u64(3);

        assert!(builder.build(&pool, 5, &mut rng).is_empty());
    }

    #[test]
    fn test_diversity_varies_later_lineups() {
        let reqs = requirements_for(Sport::NBA).unwrap();
        let constraints = LineupConstraints::default();
        let builder = LineupBuilder::new(&reqs, 50000, Strategy::Balanced, &constraints);
        let pool = sample_pool();

        let mut differing = 0;
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let lineups = builder.build(&pool, 2, &mut rng);
            if lineups.len() == 2 && ids(&lineups[0]) != ids(&lineups[1]) {
                differing += 1;
            }
        }
        assert!(differing > 20);
    }
}
