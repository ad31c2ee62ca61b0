//! Type-safe wrappers and enums for DFS data.

pub mod ids;
pub mod options;
pub mod position;

pub use ids::PlayerId;
pub use options::{ExplainMethod, Market, SalarySource, SlateType, Site, Sport, Strategy};
pub use position::{normalize_position, Position, FALLBACK_POSITION};
