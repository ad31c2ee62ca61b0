//! Unit tests for the projection generator

use super::*;

#[cfg(test)]
mod generator_tests {
    use super::*;
    use crate::providers::{RawStatLine, RiskLevel, StaticMentionFeed};
    use crate::testing::{player, stat_line, FakeStatsProvider};
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Answers the same verdict for anyone with at least one mention.
    struct FixedOracle(RiskAssessment);

    #[async_trait]
    impl RiskOracle for FixedOracle {
        async fn score_risk(&self, _player_name: &str, mentions: &[String]) -> RiskAssessment {
            if mentions.is_empty() {
                RiskAssessment::neutral()
            } else {
                self.0.clone()
            }
        }
    }

    fn medium_risk() -> RiskAssessment {
        RiskAssessment {
            level: RiskLevel::Medium,
            confidence: 0.7,
            adjustment: 0.85,
            negatives: 3,
            evidence: vec!["questionable tonight".to_string()],
        }
    }

    // 20 pts, 8 reb, 4 ast, 1 stl, 1 blk, 2 tov = 39 + 1 bonus
    fn forty_point_lines(games: u32) -> Vec<RawStatLine> {
        (1..=games).map(|d| stat_line(d, 20.0, 8.0, 4.0)).collect()
    }

    fn averages(games: u32) -> StatAverages {
        StatAverages::from_lines(&forty_point_lines(games), RECENT_GAMES)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_fallback_salary_table() {
        assert_eq!(fallback_salary("Nikola Jokic"), 11500);
        assert_eq!(fallback_salary("lebron james"), 9500);
        assert_eq!(fallback_salary("Unknown Rookie"), DEFAULT_SALARY);
    }

    #[test]
    fn test_ownership_bands() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let high = estimate_ownership(7.5, &mut rng);
            assert!((30.0..50.0).contains(&high));
            let upper = estimate_ownership(6.5, &mut rng);
            assert!((15.0..30.0).contains(&upper));
            let mid = estimate_ownership(5.5, &mut rng);
            assert!((5.0..15.0).contains(&mid));
            let low = estimate_ownership(5.0, &mut rng);
            assert!((0.0..5.0).contains(&low));
        }
    }

    #[test]
    fn test_project_without_risk() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = player("1", "Test Guard", "LAL", Position::PG);
        let projection = project(&record, &averages(10), 8000, None, false, &mut rng).unwrap();

        assert_eq!(projection.projected_points, 40.0);
        assert_eq!(projection.floor, 32.0);
        assert_eq!(projection.ceiling, 48.0);
        assert_eq!(projection.confidence, 0.9);
        assert_eq!(projection.value, 5.0);
        assert!(projection.ownership < 5.0);
        assert_eq!(projection.games_played, 10);
        assert!(projection.explanation.is_none());
    }

    #[test]
    fn test_project_applies_risk_multiplier() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = player("1", "Test Guard", "LAL", Position::PG);
        let risk = medium_risk();
        let projection =
            project(&record, &averages(10), 8000, Some(&risk), true, &mut rng).unwrap();

        assert_eq!(projection.projected_points, 34.0);
        assert_eq!(projection.floor, 27.2);
        assert_eq!(projection.ceiling, 40.8);
        assert_eq!(projection.value, 4.25);

        let explanation = projection.explanation.unwrap();
        let injury = explanation
            .factors
            .iter()
            .find(|f| f.name == "injury_risk")
            .unwrap();
        assert!(approx(injury.impact, -6.0));
        assert!(explanation.reasoning.contains("reduce the projection by 15%"));
    }

    #[test]
    fn test_neutral_risk_leaves_projection_alone() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = player("1", "Test Guard", "LAL", Position::PG);
        let risk = RiskAssessment::neutral();
        let projection =
            project(&record, &averages(10), 8000, Some(&risk), true, &mut rng).unwrap();

        assert_eq!(projection.projected_points, 40.0);
        assert_eq!(projection.risk, Some(RiskAssessment::neutral()));
        let explanation = projection.explanation.unwrap();
        assert_eq!(explanation.factors.len(), 3);
        assert!(!explanation.reasoning.contains("injury"));
    }

    #[test]
    fn test_project_without_games() {
        let mut rng = StdRng::seed_from_u64(1);
        let record = player("1", "Bench", "LAL", Position::C);
        assert!(project(&record, &StatAverages::default(), 4000, None, true, &mut rng).is_none());
    }

    #[test]
    fn test_injury_factor_counts_every_negative_mention() {
        let record = player("1", "Test Guard", "LAL", Position::PG);
        let risk = RiskAssessment {
            level: RiskLevel::High,
            confidence: 0.95,
            adjustment: 0.7,
            negatives: 6,
            evidence: vec![
                "ruled out".to_string(),
                "ankle sprain".to_string(),
                "did not practice".to_string(),
            ],
        };
        let explanation = explain(&record, &averages(10), 8000, Some(&risk));

        let injury = explanation
            .factors
            .iter()
            .find(|f| f.name == "injury_risk")
            .unwrap();
        assert_eq!(
            injury.description,
            "High injury risk from 6 negative mention(s) (95% confidence)"
        );
        assert!(approx(injury.impact, -12.0));
    }

    #[test]
    fn test_explain_factors() {
        let record = player("1", "Test Guard", "LAL", Position::PG);
        let explanation = explain(&record, &averages(4), 8000, None);
        let names: Vec<&str> = explanation.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["recent_performance", "salary_value", "consistency"]);
        assert_eq!(explanation.factors[0].impact, 40.0);
        assert!(approx(explanation.factors[1].impact, 5.0));
        assert_eq!(explanation.factors[2].impact, -5.0);
        assert!(explanation.reasoning.starts_with("Test Guard is projected for 40.0"));
    }

    #[tokio::test]
    async fn test_gather_skips_failing_players() {
        let healthy = player("1", "Healthy", "LAL", Position::PG);
        let broken = player("2", "Broken", "BOS", Position::C);
        let mut stats = FakeStatsProvider::default()
            .with_player(healthy.clone(), forty_point_lines(10))
            .with_player(broken.clone(), forty_point_lines(10));
        stats.failing.insert(broken.id.clone());

        let generator =
            ProjectionGenerator::new(Arc::new(stats), Arc::new(StaticMentionFeed::new()));
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let inputs = generator
            .gather(vec![(healthy, 8000), (broken, 9000)], as_of)
            .await;

        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].player.name, "Healthy");
        assert!(inputs[0].risk.is_none());
    }

    #[tokio::test]
    async fn test_gather_scores_risk_from_mentions() {
        let hurt = player("1", "Hurt Player", "LAL", Position::SF);
        let stats = FakeStatsProvider::default().with_player(hurt.clone(), forty_point_lines(6));
        let feed = StaticMentionFeed::new().with_mentions("Hurt Player", ["questionable tonight"]);

        let generator = ProjectionGenerator::new(Arc::new(stats), Arc::new(feed))
            .with_oracle(Arc::new(FixedOracle(medium_risk())));
        assert!(generator.has_oracle());

        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let inputs = generator.gather(vec![(hurt, 8000)], as_of).await;
        assert_eq!(inputs[0].risk, Some(medium_risk()));
        assert_eq!(inputs[0].averages.games_played, 6);
    }

    #[tokio::test]
    async fn test_project_all_sorts_by_value_and_drops_idle() {
        let cheap = player("1", "Cheap", "LAL", Position::PG);
        let pricey = player("2", "Pricey", "BOS", Position::C);
        let idle = player("3", "Idle", "MIA", Position::SF);
        let stats = FakeStatsProvider::default()
            .with_player(cheap.clone(), forty_point_lines(10))
            .with_player(pricey.clone(), forty_point_lines(10))
            .with_player(idle.clone(), vec![]);

        let generator =
            ProjectionGenerator::new(Arc::new(stats), Arc::new(StaticMentionFeed::new()));
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let inputs = generator
            .gather(vec![(pricey, 10000), (cheap, 5000), (idle, 3000)], as_of)
            .await;
        assert_eq!(inputs.len(), 3);

        let mut rng = StdRng::seed_from_u64(3);
        let projections = ProjectionGenerator::project_all(&inputs, false, &mut rng);
        let names: Vec<&str> = projections.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, vec!["Cheap", "Pricey"]);
        assert_eq!(projections[0].value, 8.0);
    }
}
