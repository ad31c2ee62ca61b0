//! Services sitting between providers and the exposed operations.

pub mod players;
pub mod salary;

pub use players::{ensure_stats_sport, PlayerDirectory};
pub use salary::{Resolved, SalaryNeed, SalaryService};
