//! Core engine types: roster, RNG, configuration, errors.
//!
//! Nothing here performs I/O. The session layer composes these with a
//! storage port.

pub mod config;
pub mod error;
pub mod rng;
pub mod roster;

pub use config::{ChanceBounds, ChanceInput, SessionConfig, DEFAULT_CHANCES, MAX_CHANCES, MIN_CHANCES, SEATS_PER_ROW};
pub use error::{RosterError, StorageError};
pub use rng::{RandomSource, ScriptedRandom, SessionRng};
pub use roster::Roster;
