//! Roster of participants: who is still in, who is out, and who won.
//!
//! ## Invariants
//!
//! After every operation:
//! - `losers` and `survivors` are disjoint and together make up `names`
//! - `names` has no duplicates
//! - a winner exists iff exactly one survivor remains, and once it does
//!   nothing more is eliminated
//!
//! `names` keeps its seating order (fixed by a shuffle at creation) except
//! for appends and removals. `losers` is in elimination order. `survivors`
//! follows `names` order.
//!
//! Sequences are `im::Vector`, so cloning a roster for a view or snapshot
//! is O(1).

use im::Vector;
use rustc_hash::FxHashSet;

use super::error::RosterError;
use super::rng::RandomSource;

/// Participants of one session and their elimination state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vector<String>,
    losers: Vector<String>,
    survivors: Vector<String>,
}

/// Drop repeated names, keeping the first occurrence.
fn unique<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = FxHashSet::default();
    names
        .into_iter()
        .map(Into::into)
        .filter(|name: &String| seen.insert(name.clone()))
        .collect()
}

impl Roster {
    /// Seat `names` in a random order with everyone surviving.
    pub fn new<I, S, R>(names: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: RandomSource,
    {
        Self::seated(rng.permutation(&unique(names)))
    }

    /// Rebuild a roster from persisted names and losers, keeping their order.
    ///
    /// Losers not on the roster and repeated losers are ignored.
    pub fn restore<N, L, S, T>(names: N, losers: L) -> Self
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let names: Vector<String> = unique(names).into_iter().collect();

        let losers: Vector<String> = {
            let members: FxHashSet<&str> = names.iter().map(String::as_str).collect();
            let mut seen = FxHashSet::default();
            losers
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| members.contains(name.as_str()) && seen.insert(name.clone()))
                .collect()
        };

        let survivors = {
            let out: FxHashSet<&str> = losers.iter().map(String::as_str).collect();
            names
                .iter()
                .filter(|name| !out.contains(name.as_str()))
                .cloned()
                .collect()
        };

        Self {
            names,
            losers,
            survivors,
        }
    }

    fn seated(order: Vec<String>) -> Self {
        let names: Vector<String> = order.into_iter().collect();
        Self {
            survivors: names.clone(),
            names,
            losers: Vector::new(),
        }
    }

    // === Counts & Lookup ===

    /// Number of participants.
    #[must_use]
    pub fn count_names(&self) -> usize {
        self.names.len()
    }

    /// Number of eliminated participants.
    #[must_use]
    pub fn count_losers(&self) -> usize {
        self.losers.len()
    }

    /// Number of participants still in.
    #[must_use]
    pub fn count_survivors(&self) -> usize {
        self.survivors.len()
    }

    /// Name in seat `index`.
    pub fn name_at(&self, index: usize) -> Result<&str, RosterError> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(RosterError::IndexOutOfRange {
                index,
                len: self.names.len(),
            })
    }

    /// Seat index of `name`.
    #[must_use]
    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// All names in seating order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Eliminated names in elimination order.
    pub fn losers(&self) -> impl Iterator<Item = &str> + '_ {
        self.losers.iter().map(String::as_str)
    }

    /// Remaining names in seating order.
    pub fn survivors(&self) -> impl Iterator<Item = &str> + '_ {
        self.survivors.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_loser(&self, name: &str) -> bool {
        self.losers.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_survivor(&self, name: &str) -> bool {
        self.survivors.iter().any(|n| n == name)
    }

    /// True if `names` holds exactly this roster's members, in any order.
    #[must_use]
    pub fn has_same_members<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let ours: FxHashSet<&str> = self.names().collect();
        let theirs: FxHashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        ours == theirs
    }

    /// True if there are names but nobody left to play.
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        !self.names.is_empty() && self.survivors.is_empty()
    }

    // === Winner ===

    /// True iff exactly one survivor remains.
    #[must_use]
    pub fn has_winner(&self) -> bool {
        self.survivors.len() == 1
    }

    /// True iff `name` is the sole survivor.
    #[must_use]
    pub fn is_winner(&self, name: &str) -> bool {
        self.winner() == Some(name)
    }

    /// The sole survivor, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        if self.has_winner() {
            self.survivors.front().map(String::as_str)
        } else {
            None
        }
    }

    // === Elimination ===

    /// Move `name` from the survivors to the end of the losers.
    ///
    /// Fails without changing state if `name` is not a survivor or if the
    /// winner has already been decided.
    pub fn eliminate(&mut self, name: &str) -> Result<(), RosterError> {
        let not_a_survivor = || RosterError::NotASurvivor {
            name: name.to_string(),
        };

        if self.has_winner() {
            return Err(not_a_survivor());
        }

        let pos = self
            .survivors
            .iter()
            .position(|n| n == name)
            .ok_or_else(not_a_survivor)?;
        let loser = self.survivors.remove(pos);
        self.losers.push_back(loser);
        Ok(())
    }

    /// Run one 1-in-`num_chances` elimination trial for `name`.
    ///
    /// Returns true (and eliminates `name`) only if no winner exists yet,
    /// `name` is still a survivor, and the trial hits. No trial is drawn
    /// when the guards fail.
    pub fn roll_for_elimination<R: RandomSource>(
        &mut self,
        name: &str,
        num_chances: u32,
        rng: &mut R,
    ) -> bool {
        if self.has_winner() || !self.is_survivor(name) {
            return false;
        }
        if !rng.trial_succeeds(num_chances) {
            return false;
        }
        self.eliminate(name).is_ok()
    }

    // === Membership ===

    /// Append a participant as a survivor.
    ///
    /// The name is trimmed first. Blank names and exact duplicates are
    /// rejected and return false.
    pub fn add_participant(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push_back(name.to_string());
        self.survivors.push_back(name.to_string());
        true
    }

    /// Remove a participant wherever they are. Returns false if absent.
    ///
    /// Removing the last survivor while others remain brings everyone back,
    /// since a roster of only losers can never produce a winner.
    pub fn remove_participant(&mut self, name: &str) -> bool {
        let Some(pos) = self.seat_of(name) else {
            return false;
        };
        self.names.remove(pos);

        if let Some(pos) = self.losers.iter().position(|n| n == name) {
            self.losers.remove(pos);
        } else if let Some(pos) = self.survivors.iter().position(|n| n == name) {
            self.survivors.remove(pos);
        }

        if self.is_stalled() {
            self.clear();
        }
        true
    }

    // === Restarting ===

    /// Reseat everyone in a new random order with nobody eliminated.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) {
        let current: Vec<String> = self.names.iter().cloned().collect();
        *self = Self::seated(rng.permutation(&current));
    }

    /// Bring everyone back without reseating.
    pub fn clear(&mut self) {
        self.losers = Vector::new();
        self.survivors = self.names.clone();
    }
}
