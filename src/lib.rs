//! SportIntel DFS Library
//!
//! Daily-fantasy tooling built on free sports-data providers: projections,
//! salary-capped lineup construction, live betting odds and per-player
//! projection explanations.
//!
//! ## Features
//!
//! - **Provider Clients**: Rate-limited clients for stats, salaries, odds and sentiment
//! - **Salary Resolution**: Ordered fallback across salary sources with a TTL cache
//! - **Projections**: Recent-form averages, variance bands, value and ownership
//! - **Lineups**: Greedy, strategy-aware construction with diversity across lineups
//! - **Explanations**: Factor breakdowns against a league baseline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sportintel::commands::{get_projections, CommandContext, ProjectionParams};
//! use sportintel::core::Config;
//! use sportintel::Sport;
//!
//! # async fn example() -> sportintel::Result<()> {
//! let ctx = CommandContext::from_config(&Config::from_env()?)?;
//! let output = get_projections(&ctx, ProjectionParams::new(Sport::NBA)).await?;
//! for projection in output.projections.iter().take(5) {
//!     println!("{} {:.1}", projection.player_name, projection.projected_points);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! API keys are read from the environment (or a `.env` file):
//! ```bash
//! export BALLDONTLIE_API_KEY=...
//! export ODDS_API_KEY=...
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod lineup;
pub mod projections;
pub mod providers;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use cli::types::{
    ExplainMethod, Market, PlayerId, Position, SalarySource, SlateType, Site, Sport, Strategy,
};
pub use error::{Result, SportIntelError};
