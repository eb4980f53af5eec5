//! Python bindings for the survivor engine.
//!
//! # Quick Start
//!
//! ```python
//! import survivor
//!
//! # Resume or start a session stored under ./state
//! session = survivor.Session(["Alice", "Bob", "Carol"], state_dir="state", seed=42)
//!
//! while session.winner is None:
//!     for name, kind in session.play_round(4):
//!         print(name, kind)
//! ```

use pyo3::prelude::*;

mod py_session;

pub use py_session::*;

/// survivor: a randomized single-elimination roster engine.
#[pymodule]
fn survivor(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySession>()?;
    m.add_class::<PyParticipant>()?;

    Ok(())
}
