//! Session orchestration.
//!
//! ## Phases
//!
//! - `Fresh`: no winner, no round played yet
//! - `InProgress`: no winner, at least one round played
//! - `Complete`: a winner exists; further rounds eliminate nobody
//!
//! `play_round` moves Fresh/InProgress forward, `reset_session` returns to
//! Fresh from anywhere.
//!
//! ## Persistence
//!
//! A snapshot is written after every round, every roster edit and every
//! config close, cleared on reset, and read once by `start`. A stored
//! snapshot is only used when its names are exactly the starting names (in
//! any order); otherwise it is discarded, never merged.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::core::{ChanceInput, RandomSource, Roster, SessionConfig, SessionRng};
use crate::storage::{KeyValueStore, Snapshot, SnapshotStorage};

use super::outcome::{
    EliminationStyle, OutcomeKind, ParticipantOutcome, Presentation, RoundReport, ShakeToken,
};
use super::view::{ParticipantStatus, ParticipantView, RosterView, Seat};

/// Where a session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    Fresh,
    InProgress,
    Complete,
}

/// Drives rounds over a roster and keeps storage in step.
pub struct SessionController<R, S> {
    config: SessionConfig,
    roster: Roster,
    rng: R,
    storage: SnapshotStorage<S>,
    num_chances: u32,
    round_number: u64,
    presentation: FxHashMap<String, Presentation>,
    shake: Option<ShakeToken>,
    next_shake: u64,
    version: u64,
}

impl<S: KeyValueStore> SessionController<SessionRng, S> {
    /// Start a session with an RNG seeded from `config.seed`, or from OS
    /// entropy when no seed is set.
    pub fn open<I, N>(names: I, config: SessionConfig, store: S) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let rng = config.seed.map_or_else(SessionRng::from_entropy, SessionRng::new);
        Self::start(names, config, rng, store)
    }
}

impl<R: RandomSource, S: KeyValueStore> SessionController<R, S> {
    /// Start a session for `names`, resuming the stored one if it is for
    /// the same participants.
    pub fn start<I, N>(names: I, config: SessionConfig, mut rng: R, store: S) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let storage = SnapshotStorage::new(store);

        let restored = storage.load().and_then(|snapshot| {
            let roster = snapshot.to_roster();
            if roster.is_stalled() {
                warn!(
                    names = roster.count_names(),
                    "saved session has no survivors, discarding"
                );
                None
            } else if roster.has_same_members(&names) {
                Some((
                    roster,
                    config.chances.resolve(snapshot.num_chances),
                    snapshot.round_number,
                ))
            } else {
                info!(
                    saved = snapshot.names.len(),
                    given = names.len(),
                    "saved session is for a different roster, discarding"
                );
                None
            }
        });

        let (roster, num_chances, round_number) = match restored {
            Some(state) => {
                info!(
                    names = state.0.count_names(),
                    losers = state.0.count_losers(),
                    round = state.2,
                    "restoring saved session"
                );
                state
            }
            None => {
                let roster = Roster::new(names, &mut rng);
                info!(names = roster.count_names(), "starting fresh session");
                (roster, config.chances.default, 0)
            }
        };

        let mut controller = Self {
            config,
            roster,
            rng,
            storage,
            num_chances,
            round_number,
            presentation: FxHashMap::default(),
            shake: None,
            next_shake: 0,
            version: 0,
        };

        let losers: Vec<String> = controller.roster.losers().map(String::from).collect();
        for loser in losers {
            controller
                .presentation
                .insert(loser, Presentation::Eliminated(EliminationStyle::Shrink));
        }
        controller.refresh_winner();
        controller
    }

    // === Accessors ===

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn num_chances(&self) -> u32 {
        self.num_chances
    }

    #[must_use]
    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    /// Current "no casualties" signal, if raised.
    #[must_use]
    pub fn shake(&self) -> Option<ShakeToken> {
        self.shake
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.roster.has_winner() {
            SessionPhase::Complete
        } else if self.round_number > 0 {
            SessionPhase::InProgress
        } else {
            SessionPhase::Fresh
        }
    }

    /// Lasting visual state of `name`.
    #[must_use]
    pub fn presentation_of(&self, name: &str) -> Option<Presentation> {
        self.presentation.get(name).copied()
    }

    /// The snapshot that would be persisted right now.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.roster, self.num_chances, self.round_number)
    }

    #[must_use]
    pub fn storage(&self) -> &SnapshotStorage<S> {
        &self.storage
    }

    /// End the session and hand back the store.
    pub fn into_store(self) -> S {
        self.storage.into_store()
    }

    // === Rounds ===

    /// Play one round: every survivor gets an independent 1-in-N trial.
    ///
    /// `num_chances` is clamped to the configured bounds. When the winner
    /// is already decided nothing is rolled and the round counter stays,
    /// but the snapshot is still written.
    pub fn play_round<'a>(&mut self, num_chances: impl Into<ChanceInput<'a>>) -> RoundReport {
        self.num_chances = self.config.chances.resolve(num_chances);
        self.shake = None;

        let already_complete = self.roster.has_winner();
        let contenders: Vec<String> = self.roster.survivors().map(String::from).collect();

        let mut eliminated: SmallVec<[String; 4]> = SmallVec::new();
        let mut outcomes = Vec::with_capacity(contenders.len());

        for name in contenders {
            if self
                .roster
                .roll_for_elimination(&name, self.num_chances, &mut self.rng)
            {
                let style = self
                    .rng
                    .pick_one(&EliminationStyle::ALL)
                    .copied()
                    .unwrap_or(EliminationStyle::Shrink);
                self.presentation
                    .insert(name.clone(), Presentation::Eliminated(style));
                outcomes.push(ParticipantOutcome::new(
                    name.clone(),
                    OutcomeKind::Eliminated(style),
                ));
                eliminated.push(name);
            } else {
                outcomes.push(ParticipantOutcome::new(name, OutcomeKind::Survived));
            }
        }

        let winner = self.roster.winner().map(String::from);
        if let Some(winner) = &winner {
            self.refresh_winner();
            for outcome in outcomes.iter_mut().filter(|o| o.name == *winner) {
                outcome.kind = OutcomeKind::Winner;
            }
        } else if eliminated.is_empty() {
            self.next_shake += 1;
            self.shake = Some(ShakeToken(self.next_shake));
            for outcome in &mut outcomes {
                outcome.kind = OutcomeKind::NoOpShake;
            }
        }

        if !already_complete {
            self.round_number += 1;
        }

        debug!(
            round = self.round_number,
            num_chances = self.num_chances,
            eliminated = eliminated.len(),
            survivors = self.roster.count_survivors(),
            winner = winner.as_deref().unwrap_or(""),
            "round played"
        );

        self.persist();
        self.touch();

        RoundReport {
            round_number: self.round_number,
            num_chances: self.num_chances,
            outcomes,
            eliminated,
            winner,
            shake: self.shake,
        }
    }

    /// Clear the "no casualties" signal if it is still the one `token`
    /// names. Returns false if a newer round already replaced or cleared it.
    pub fn clear_shake(&mut self, token: ShakeToken) -> bool {
        if self.shake == Some(token) {
            self.shake = None;
            self.touch();
            true
        } else {
            false
        }
    }

    // === Roster Edits ===

    /// Add a participant as a survivor. Blank and duplicate names are
    /// ignored and return false.
    pub fn add_participant(&mut self, raw_name: &str) -> bool {
        let name = raw_name.trim();
        if !self.roster.add_participant(name) {
            debug!(name, "rejected participant");
            return false;
        }

        info!(name, "added participant");
        self.refresh_winner();
        self.persist();
        self.touch();
        true
    }

    /// Remove a participant. Returns false if they are not on the roster.
    pub fn remove_participant(&mut self, name: &str) -> bool {
        if !self.roster.remove_participant(name) {
            return false;
        }

        info!(name, "removed participant");
        self.presentation.remove(name);
        if self.roster.count_losers() == 0 {
            self.presentation.clear();
        }
        self.refresh_winner();
        self.persist();
        self.touch();
        true
    }

    // === Session Lifecycle ===

    /// Forget the stored session, reseat everyone and start over.
    pub fn reset_session(&mut self) {
        info!("resetting session");
        self.storage.clear();
        self.roster.reset(&mut self.rng);
        self.round_number = 0;
        self.presentation.clear();
        self.shake = None;
        self.refresh_winner();
        self.touch();
    }

    /// Apply the config dialog's denominator and persist. Returns the value
    /// in effect after clamping.
    pub fn close_config<'a>(&mut self, num_chances: impl Into<ChanceInput<'a>>) -> u32 {
        self.num_chances = self.config.chances.resolve(num_chances);
        self.persist();
        self.touch();
        self.num_chances
    }

    // === View ===

    /// Build the current roster view.
    #[must_use]
    pub fn view(&self) -> RosterView {
        let participants = self
            .roster
            .names()
            .enumerate()
            .map(|(index, name)| {
                let status = if self.roster.is_winner(name) {
                    ParticipantStatus::Winner
                } else if self.roster.is_loser(name) {
                    ParticipantStatus::Loser
                } else {
                    ParticipantStatus::Survivor
                };
                ParticipantView {
                    name: name.to_string(),
                    seat: Seat::at(index, self.config.seats_per_row),
                    status,
                    presentation: self.presentation_of(name),
                }
            })
            .collect();

        RosterView {
            version: self.version,
            phase: self.phase(),
            round_number: self.round_number,
            num_chances: self.num_chances,
            shake: self.shake,
            participants,
        }
    }

    // === Internals ===

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        self.storage.save(&snapshot);
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    /// Keep the winner presentation on the current winner only.
    fn refresh_winner(&mut self) {
        let winner = self.roster.winner().map(String::from);
        self.presentation.retain(|name, presentation| {
            *presentation != Presentation::Winner || winner.as_ref() == Some(name)
        });
        if let Some(winner) = winner {
            self.presentation.insert(winner, Presentation::Winner);
        }
    }
}
