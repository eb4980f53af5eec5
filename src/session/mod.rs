//! Session layer: rounds, persistence reconciliation and renderer-facing
//! outcomes.
//!
//! `SessionController` composes a `Roster` with a `RandomSource` and a
//! storage port. Each operation returns or exposes owned values
//! (`RoundReport`, `RosterView`) rather than shared mutable state.

pub mod controller;
pub mod outcome;
pub mod view;

pub use controller::{SessionController, SessionPhase};
pub use outcome::{
    EliminationStyle, OutcomeKind, ParticipantOutcome, Presentation, RoundReport, ShakeToken,
};
pub use view::{ParticipantStatus, ParticipantView, RosterView, Seat};
