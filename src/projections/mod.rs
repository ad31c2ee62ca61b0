//! Fantasy-point projections from recent box scores.

pub mod generator;
pub mod scoring;

pub use generator::{
    estimate_ownership, explain, fallback_salary, project, Explanation, Factor, PlayerInputs,
    ProjectionGenerator, ProjectionRecord, DEFAULT_SALARY, MODEL_VERSION,
};
pub use scoring::{fantasy_points, StatAverages, RECENT_GAMES, STATS_WINDOW_DAYS};
