//! Session bindings for Python.

use pyo3::prelude::*;

use crate::core::{ChanceBounds, SessionConfig};
use crate::session::{ParticipantStatus, ParticipantView, Presentation, SessionController, SessionPhase};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::SessionRng;

type BoxedStore = Box<dyn KeyValueStore + Send>;

/// Python wrapper for one participant in the roster view.
#[pyclass(name = "Participant")]
#[derive(Clone, Debug)]
pub struct PyParticipant(pub ParticipantView);

#[pymethods]
impl PyParticipant {
    #[getter]
    fn name(&self) -> String {
        self.0.name.clone()
    }

    /// "survivor", "loser" or "winner".
    #[getter]
    fn status(&self) -> &'static str {
        match self.0.status {
            ParticipantStatus::Survivor => "survivor",
            ParticipantStatus::Loser => "loser",
            ParticipantStatus::Winner => "winner",
        }
    }

    /// (row, column) in the seating grid.
    #[getter]
    fn seat(&self) -> (usize, usize) {
        (self.0.seat.row, self.0.seat.column)
    }

    /// "puff", "shrink", "winner" or None.
    #[getter]
    fn presentation(&self) -> Option<&'static str> {
        self.0.presentation.map(|p| match p {
            Presentation::Eliminated(style) => style.label(),
            Presentation::Winner => "winner",
        })
    }

    fn __repr__(&self) -> String {
        format!("Participant(name={:?}, status={})", self.0.name, self.status())
    }
}

/// Python wrapper for SessionController.
///
/// Sessions persist to `state_dir` when given, otherwise to memory.
#[pyclass(name = "Session")]
pub struct PySession {
    inner: SessionController<SessionRng, BoxedStore>,
}

#[pymethods]
impl PySession {
    /// Start or resume a session.
    ///
    /// # Arguments
    /// - names: Participant names
    /// - state_dir: Directory for the saved session (None = in memory)
    /// - seed: RNG seed (None = OS entropy)
    /// - min_chances / max_chances / default_chances: Denominator bounds
    #[new]
    #[pyo3(signature = (
        names,
        state_dir = None,
        seed = None,
        min_chances = 2,
        max_chances = 10,
        default_chances = 4
    ))]
    fn new(
        names: Vec<String>,
        state_dir: Option<String>,
        seed: Option<u64>,
        min_chances: u32,
        max_chances: u32,
        default_chances: u32,
    ) -> PyResult<Self> {
        if min_chances == 0 || min_chances > max_chances {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "chance bounds need 1 <= min_chances <= max_chances",
            ));
        }

        let mut config = SessionConfig::new()
            .with_chances(ChanceBounds::new(min_chances, max_chances, default_chances));
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }

        let store: BoxedStore = match state_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(MemoryStore::new()),
        };

        Ok(Self {
            inner: SessionController::open(names, config, store),
        })
    }

    /// Play a round. Returns (name, outcome) pairs for everyone who was
    /// live when the round began.
    #[pyo3(signature = (num_chances = None))]
    fn play_round(&mut self, num_chances: Option<i64>) -> Vec<(String, &'static str)> {
        self.inner
            .play_round(num_chances)
            .outcomes
            .into_iter()
            .map(|o| (o.name, o.kind.label()))
            .collect()
    }

    fn add_participant(&mut self, name: &str) -> bool {
        self.inner.add_participant(name)
    }

    fn remove_participant(&mut self, name: &str) -> bool {
        self.inner.remove_participant(name)
    }

    fn reset(&mut self) {
        self.inner.reset_session();
    }

    /// Store the denominator from the config dialog. Returns the clamped value.
    #[pyo3(signature = (num_chances = None))]
    fn close_config(&mut self, num_chances: Option<i64>) -> u32 {
        self.inner.close_config(num_chances)
    }

    /// Participants in seating order.
    fn participants(&self) -> Vec<PyParticipant> {
        self.inner
            .view()
            .participants
            .into_iter()
            .map(PyParticipant)
            .collect()
    }

    #[getter]
    fn winner(&self) -> Option<String> {
        self.inner.roster().winner().map(String::from)
    }

    #[getter]
    fn round_number(&self) -> u64 {
        self.inner.round_number()
    }

    #[getter]
    fn num_chances(&self) -> u32 {
        self.inner.num_chances()
    }

    /// "fresh", "in_progress" or "complete".
    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            SessionPhase::Fresh => "fresh",
            SessionPhase::InProgress => "in_progress",
            SessionPhase::Complete => "complete",
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Session(round={}, survivors={}, phase={})",
            self.inner.round_number(),
            self.inner.roster().count_survivors(),
            self.phase()
        )
    }
}
