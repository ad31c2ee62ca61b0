//! Roster slots and per-sport position requirements.

use serde::Serialize;
use std::fmt;

use crate::cli::types::{Position, Sport};
use crate::{Result, SportIntelError};

/// One lineup slot: a fixed position or a flexible one.
///
/// # Examples
///
/// ```rust
/// use sportintel::lineup::RosterSlot;
/// use sportintel::Position;
///
/// assert!(RosterSlot::Guard.accepts(Position::SG));
/// assert!(!RosterSlot::Forward.accepts(Position::C));
/// assert!(RosterSlot::Utility.accepts(Position::C));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterSlot {
    Position(Position),
    /// G: PG or SG
    Guard,
    /// F: SF or PF
    Forward,
    /// UTIL: any position
    Utility,
}

impl RosterSlot {
    pub fn accepts(&self, position: Position) -> bool {
        match self {
            RosterSlot::Position(p) => *p == position,
            RosterSlot::Guard => position.is_guard(),
            RosterSlot::Forward => position.is_forward(),
            RosterSlot::Utility => true,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RosterSlot::Position(p) => p.as_str(),
            RosterSlot::Guard => "G",
            RosterSlot::Forward => "F",
            RosterSlot::Utility => "UTIL",
        }
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RosterSlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Ordered slot counts for one sport's lineup.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRequirements {
    slots: Vec<(RosterSlot, usize)>,
}

impl PositionRequirements {
    pub fn new(slots: Vec<(RosterSlot, usize)>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[(RosterSlot, usize)] {
        &self.slots
    }

    /// Lineup size.
    pub fn total(&self) -> usize {
        self.slots.iter().map(|(_, n)| n).sum()
    }

    pub fn tracker(&self) -> SlotTracker {
        SlotTracker {
            open: self.slots.clone(),
        }
    }
}

/// Requirements for `sport`. Only NBA is configured.
pub fn requirements_for(sport: Sport) -> Result<PositionRequirements> {
    match sport {
        Sport::NBA => Ok(PositionRequirements::new(vec![
            (RosterSlot::Position(Position::PG), 1),
            (RosterSlot::Position(Position::SG), 1),
            (RosterSlot::Position(Position::SF), 1),
            (RosterSlot::Position(Position::PF), 1),
            (RosterSlot::Position(Position::C), 1),
            (RosterSlot::Guard, 1),
            (RosterSlot::Forward, 1),
            (RosterSlot::Utility, 1),
        ])),
        other => Err(SportIntelError::configuration(format!(
            "{other} position requirements not implemented yet"
        ))),
    }
}

/// Remaining capacity per slot while a lineup is being filled.
#[derive(Debug, Clone)]
pub struct SlotTracker {
    open: Vec<(RosterSlot, usize)>,
}

impl SlotTracker {
    /// The first slot, in requirement order, that accepts `position` and
    /// still has room.
    pub fn open_slot(&self, position: Position) -> Option<RosterSlot> {
        self.open
            .iter()
            .find(|(slot, remaining)| *remaining > 0 && slot.accepts(position))
            .map(|(slot, _)| *slot)
    }

    /// Take the slot [`open_slot`](Self::open_slot) would pick.
    pub fn claim(&mut self, position: Position) -> Option<RosterSlot> {
        let slot = self.open_slot(position)?;
        let entry = self
            .open
            .iter_mut()
            .find(|(open, remaining)| *open == slot && *remaining > 0)?;
        entry.1 -= 1;
        Some(slot)
    }

    pub fn remaining(&self) -> usize {
        self.open.iter().map(|(_, n)| n).sum()
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }
}
