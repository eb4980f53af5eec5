//! The single "current roster view" renderers read.
//!
//! A `RosterView` is an owned value built on demand. `version` changes on
//! every mutation, so a renderer can skip redraws when it sees the same
//! version twice.

use serde::{Deserialize, Serialize};

use super::controller::SessionPhase;
use super::outcome::{Presentation, ShakeToken};

/// Where a participant sits in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub column: usize,
}

impl Seat {
    /// Seat for position `index` in a grid `per_row` wide.
    #[must_use]
    pub fn at(index: usize, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        Self {
            row: index / per_row,
            column: index % per_row,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Survivor,
    Loser,
    Winner,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub name: String,
    pub seat: Seat,
    pub status: ParticipantStatus,
    pub presentation: Option<Presentation>,
}

/// Snapshot of everything a renderer needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterView {
    pub version: u64,
    pub phase: SessionPhase,
    pub round_number: u64,
    pub num_chances: u32,
    pub shake: Option<ShakeToken>,
    /// In seating order.
    pub participants: Vec<ParticipantView>,
}

impl RosterView {
    #[must_use]
    pub fn participant(&self, name: &str) -> Option<&ParticipantView> {
        self.participants.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.status == ParticipantStatus::Winner)
            .map(|p| p.name.as_str())
    }
}
