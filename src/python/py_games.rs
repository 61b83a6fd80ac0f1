//! Game bindings for Python.
//!
//! Commands return `True` when accepted and `False` when rejected; the
//! reason for the latest rejection is kept in `last_rejection`.

use std::borrow::Cow;

use pyo3::prelude::*;

use crate::campaign::{Engine, EngineBuilder, LinearGame, SolitaireGame};
use crate::core::{CardId, CommandResult};
use crate::zones::Table;

use super::py_core::{engine_error, rejection_message, to_json, PyRules};

fn build<T: Table>(rules: Option<&PyRules>, seed: u64) -> Engine<T> {
    let mut builder = EngineBuilder::new();
    if let Some(rules) = rules {
        builder = builder.rules(rules.0.clone());
    }
    builder.build(seed)
}

fn accept<V>(last: &mut Option<String>, result: CommandResult<V>) -> bool {
    match result {
        Ok(_) => {
            *last = None;
            true
        }
        Err(reason) => {
            *last = Some(rejection_message(&reason));
            false
        }
    }
}

/// Python wrapper for the solitaire variant.
#[pyclass(name = "SolitaireGame")]
pub struct PySolitaireGame {
    engine: SolitaireGame,
    last_rejection: Option<String>,
}

#[pymethods]
impl PySolitaireGame {
    /// Start a run.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic runs
    /// - rules: optional Rules; defaults to the standard rules
    #[new]
    #[pyo3(signature = (seed = 42, rules = None))]
    fn new(seed: u64, rules: Option<PyRef<'_, PyRules>>) -> Self {
        Self {
            engine: build(rules.as_deref(), seed),
            last_rejection: None,
        }
    }

    /// Full engine snapshot as JSON.
    fn snapshot(&self) -> PyResult<String> {
        to_json(&self.engine.snapshot())
    }

    /// Current view: COMBAT, REWARD, GAME_OVER or VICTORY.
    #[getter]
    fn view(&self) -> String {
        self.engine.view().to_string()
    }

    #[getter]
    fn last_rejection(&self) -> Option<String> {
        self.last_rejection.clone()
    }

    #[getter]
    fn escape_cost(&self) -> u32 {
        self.engine.escape_preview()
    }

    fn draw_from_stock(&mut self) -> bool {
        let result = self.engine.draw_from_stock();
        accept(&mut self.last_rejection, result)
    }

    fn select_card(&mut self, card: u32) -> bool {
        let result = self.engine.select_card(CardId::new(card));
        accept(&mut self.last_rejection, result)
    }

    fn play_selected(&mut self) -> bool {
        let result = self.engine.play_selected();
        accept(&mut self.last_rejection, result)
    }

    fn play_card(&mut self, card: u32) -> bool {
        let result = self.engine.play_card(CardId::new(card));
        accept(&mut self.last_rejection, result)
    }

    /// Move a face-up top card onto tableau pile `pile`.
    fn move_card(&mut self, card: u32, pile: usize) -> bool {
        let result = self.engine.move_card(CardId::new(card), pile);
        accept(&mut self.last_rejection, result)
    }

    fn select_reward(&mut self, card: u32) -> bool {
        let result = self.engine.select_reward(CardId::new(card));
        accept(&mut self.last_rejection, result)
    }

    fn confirm_rewards(&mut self) -> bool {
        let result = self.engine.confirm_rewards();
        accept(&mut self.last_rejection, result)
    }

    fn escape(&mut self) -> bool {
        let result = self.engine.escape();
        accept(&mut self.last_rejection, result)
    }

    fn start_new_run(&mut self) {
        self.engine.start_new_run();
        self.last_rejection = None;
    }

    /// Encode the run state to bytes.
    fn checkpoint(&self) -> PyResult<Cow<'static, [u8]>> {
        let bytes = self.engine.checkpoint().map_err(engine_error)?;
        Ok(Cow::Owned(bytes))
    }

    /// Restore a run encoded by `checkpoint`.
    fn restore(&mut self, bytes: &[u8]) -> PyResult<()> {
        self.engine.restore(bytes).map_err(engine_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "SolitaireGame(view={}, fight={}, hp={})",
            self.engine.view(),
            self.engine.fight_index(),
            self.engine.ledger().player_hp
        )
    }
}

/// Python wrapper for the linear variant.
#[pyclass(name = "LinearGame")]
pub struct PyLinearGame {
    engine: LinearGame,
    last_rejection: Option<String>,
}

#[pymethods]
impl PyLinearGame {
    /// Start a run.
    #[new]
    #[pyo3(signature = (seed = 42, rules = None))]
    fn new(seed: u64, rules: Option<PyRef<'_, PyRules>>) -> Self {
        Self {
            engine: build(rules.as_deref(), seed),
            last_rejection: None,
        }
    }

    fn snapshot(&self) -> PyResult<String> {
        to_json(&self.engine.snapshot())
    }

    #[getter]
    fn view(&self) -> String {
        self.engine.view().to_string()
    }

    #[getter]
    fn last_rejection(&self) -> Option<String> {
        self.last_rejection.clone()
    }

    #[getter]
    fn escape_cost(&self) -> u32 {
        self.engine.escape_preview()
    }

    fn play_active(&mut self) -> bool {
        let result = self.engine.play_active();
        accept(&mut self.last_rejection, result)
    }

    fn shuffle(&mut self) -> bool {
        let result = self.engine.shuffle();
        accept(&mut self.last_rejection, result)
    }

    fn hold(&mut self) -> bool {
        let result = self.engine.hold();
        accept(&mut self.last_rejection, result)
    }

    fn select_reward(&mut self, card: u32) -> bool {
        let result = self.engine.select_reward(CardId::new(card));
        accept(&mut self.last_rejection, result)
    }

    fn confirm_rewards(&mut self) -> bool {
        let result = self.engine.confirm_rewards();
        accept(&mut self.last_rejection, result)
    }

    fn escape(&mut self) -> bool {
        let result = self.engine.escape();
        accept(&mut self.last_rejection, result)
    }

    fn start_new_run(&mut self) {
        self.engine.start_new_run();
        self.last_rejection = None;
    }

    /// Encode the run state to bytes.
    fn checkpoint(&self) -> PyResult<Cow<'static, [u8]>> {
        let bytes = self.engine.checkpoint().map_err(engine_error)?;
        Ok(Cow::Owned(bytes))
    }

    /// Restore a run encoded by `checkpoint`.
    fn restore(&mut self, bytes: &[u8]) -> PyResult<()> {
        self.engine.restore(bytes).map_err(engine_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "LinearGame(view={}, fight={}, hp={})",
            self.engine.view(),
            self.engine.fight_index(),
            self.engine.ledger().player_hp
        )
    }
}
