//! # survivor
//!
//! A randomized single-elimination game engine. A roster of named
//! participants plays rounds; in each round every remaining participant
//! independently faces a 1-in-N chance of elimination, until one survivor
//! is left.
//!
//! ## Design Principles
//!
//! 1. **Invariants in one place**: `Roster` alone decides who is in and who
//!    is out, and refuses any edit that would break `losers + survivors = names`.
//!
//! 2. **Injected collaborators**: randomness (`RandomSource`) and storage
//!    (`KeyValueStore`) are passed in, so tests script both.
//!
//! 3. **Owned results**: every round returns a `RoundReport`, and renderers
//!    read a single `RosterView` value instead of observing shared state.
//!
//! ## Modules
//!
//! - `core`: roster, RNG, configuration, errors
//! - `storage`: snapshot schema, key-value port, snapshot persistence
//! - `session`: session controller, round outcomes, roster view
//!
//! ## Example
//!
//! ```
//! use survivor::{MemoryStore, SessionConfig, SessionController};
//!
//! let config = SessionConfig::default().with_seed(42);
//! let mut session = SessionController::open(["Alice", "Bob", "Carol"], config, MemoryStore::new());
//!
//! while !session.roster().has_winner() {
//!     session.play_round(4);
//! }
//! assert_eq!(session.roster().count_survivors(), 1);
//! ```

pub mod core;
pub mod session;
pub mod storage;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ChanceBounds, ChanceInput, RandomSource, Roster, RosterError, ScriptedRandom, SessionConfig,
    SessionRng, StorageError,
};

pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, Snapshot, SnapshotStorage};

pub use crate::session::{
    EliminationStyle, OutcomeKind, ParticipantOutcome, ParticipantStatus, Presentation,
    RosterView, RoundReport, SessionController, SessionPhase, ShakeToken,
};
