//! Rule configuration and error mapping for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde::Serialize;

use crate::core::{BonusReset, EngineError, PlayCost, Rejected, RulesConfig};

/// Python wrapper for RulesConfig.
#[pyclass(name = "Rules")]
#[derive(Clone, Debug, Default)]
pub struct PyRules(pub RulesConfig);

#[pymethods]
impl PyRules {
    /// Create a rule set.
    ///
    /// # Arguments
    /// - player_max_hp: HP cap and starting HP
    /// - card_cost_plays: tableau plays cost the card's own ticks instead of 1
    /// - reset_bonus_per_fight: clear shuffle bonuses at every fight start
    #[new]
    #[pyo3(signature = (player_max_hp = 50, card_cost_plays = false, reset_bonus_per_fight = false))]
    fn new(player_max_hp: u32, card_cost_plays: bool, reset_bonus_per_fight: bool) -> PyResult<Self> {
        if player_max_hp == 0 {
            return Err(PyValueError::new_err("player_max_hp must be positive"));
        }
        let mut rules = RulesConfig::default().with_player_max_hp(player_max_hp);
        if card_cost_plays {
            rules = rules.with_tableau_play_cost(PlayCost::CardCost);
        }
        if reset_bonus_per_fight {
            rules = rules.with_bonus_reset(BonusReset::PerFight);
        }
        Ok(Self(rules))
    }

    #[getter]
    fn player_max_hp(&self) -> u32 {
        self.0.player_max_hp
    }

    /// Rules as JSON.
    fn to_json(&self) -> PyResult<String> {
        to_json(&self.0)
    }

    fn __repr__(&self) -> String {
        format!(
            "Rules(player_max_hp={}, play_cost={:?}, bonus_reset={:?})",
            self.0.player_max_hp, self.0.tableau_play_cost, self.0.bonus_reset
        )
    }
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

/// Rejections become `None`/`False` on the Python side; this keeps the reason
/// available for callers that want it.
pub(crate) fn rejection_message(reason: &Rejected) -> String {
    reason.to_string()
}

pub(crate) fn engine_error(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}
