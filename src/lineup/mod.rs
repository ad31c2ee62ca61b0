//! Salary-capped lineup construction.

pub mod builder;
pub mod metrics;
pub mod requirements;

pub use builder::{Lineup, LineupBuilder, LineupConstraints, LineupPlayer, PoolPlayer};
pub use metrics::Stack;
pub use requirements::{requirements_for, PositionRequirements, RosterSlot, SlotTracker};
