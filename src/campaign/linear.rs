//! Commands of the linear variant.

use tracing::debug;

use super::engine::{traced, Engine, Outcome};
use super::state::View;
use crate::combat::Resolution;
use crate::core::{CommandResult, RandomSource, Rejected};
use crate::zones::{HoldMove, LinearDeck};

impl<R: RandomSource> Engine<LinearDeck, R> {
    /// Play the active card at its own tick cost.
    pub fn play_active(&mut self) -> CommandResult<Outcome> {
        traced("play_active", self.try_play_active())
    }

    fn try_play_active(&mut self) -> CommandResult<Outcome> {
        self.require(View::Combat)?;
        let card = self.state.table.take_active()?;
        let cost = card.cost_or(self.rules.default_card_cost);

        let resolution = self.resolve_play(&card, cost);
        Ok(self.settle(resolution))
    }

    /// Cycle the active card to the back of the deck.
    pub fn shuffle(&mut self) -> CommandResult<Outcome> {
        traced("shuffle", self.try_shuffle())
    }

    fn try_shuffle(&mut self) -> CommandResult<Outcome> {
        self.require(View::Combat)?;
        if self.state.table.active().is_none() {
            return Err(Rejected::EmptyDeck);
        }

        let breach = self.resolve_time(self.rules.shuffle_cost);
        if let Some(bonus) = self.state.table.rotate()? {
            debug!(bonus, "shuffle bonus grew");
        }
        self.state.log.push("SHUFFLE: Deck cycled.");
        Ok(self.settle(Resolution { breach, effect: None }))
    }

    /// Stash, swap or release the held card.
    pub fn hold(&mut self) -> CommandResult<(HoldMove, Outcome)> {
        traced("hold", self.try_hold())
    }

    fn try_hold(&mut self) -> CommandResult<(HoldMove, Outcome)> {
        self.require(View::Combat)?;
        if !self.state.table.can_hold() {
            return Err(Rejected::EmptyDeck);
        }

        let breach = self.resolve_time(self.rules.hold_cost);
        let moved = self.state.table.hold()?;
        debug!(?moved, "hold");
        Ok((moved, self.settle(Resolution { breach, effect: None })))
    }
}
