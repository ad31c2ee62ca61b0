//! The four exposed operations and their CLI handlers.

pub mod common;
pub mod explain;
pub mod lineups;
pub mod odds;
pub mod projections;

pub use common::{CommandContext, Providers};
pub use explain::{explain_projection, handle_explain, ExplainOutput, ExplainParams};
pub use lineups::{handle_optimize, optimize_lineups, OptimizeOutput, OptimizeParams, PoolEntry};
pub use odds::{get_live_odds, handle_odds, OddsOutput, OddsParams};
pub use projections::{get_projections, handle_projections, ProjectionParams, ProjectionsOutput};
