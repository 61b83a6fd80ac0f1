//! Python bindings for the cinder engine.
//!
//! The presentation layer drives a run through these classes: it issues
//! commands and renders the JSON snapshot after each one.
//!
//! # Quick Start
//!
//! ```python
//! import cinder_engine as cinder
//! import json
//!
//! game = cinder.SolitaireGame(seed=42)
//! state = json.loads(game.snapshot())
//!
//! top = state["table"]["Tableau"]["piles"][0][-1]["Visible"]["id"]
//! game.play_card(top)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// cinder_engine: tick-budget card combat.
///
/// This module provides:
/// - SolitaireGame: stock, waste and tableau piles
/// - LinearGame: one sequential deck with a hold slot
/// - Rules: the tunable rule knobs
#[pymodule]
fn cinder_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRules>()?;
    m.add_class::<PySolitaireGame>()?;
    m.add_class::<PyLinearGame>()?;
    Ok(())
}
