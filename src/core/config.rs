//! Rules configuration.
//!
//! Every tunable number the engine uses lives in [`RulesConfig`]. The
//! defaults reproduce the standard Cinder run; tests and alternative modes
//! adjust them through the `with_*` builders.

use serde::{Deserialize, Serialize};

use crate::campaign::Campaign;
use crate::combat::IntentTable;

/// Tick cost of playing a card from the tableau.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayCost {
    /// Every play costs the same number of ticks.
    Flat(u32),
    /// A play costs the card's own tick cost.
    CardCost,
}

/// What happens to accumulated shuffle bonuses when a new fight begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusReset {
    /// Bonuses stay on the card for the rest of the run.
    #[default]
    Persist,
    /// Bonuses are cleared at every fight start.
    PerFight,
}

/// Integer ratio used for the escape penalty (`floor(value * num / den)`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub num: u32,
    pub den: u32,
}

impl Ratio {
    /// Create a ratio. Panics on a zero denominator.
    #[must_use]
    pub fn new(num: u32, den: u32) -> Self {
        assert!(den > 0, "Ratio denominator must be non-zero");
        Self { num, den }
    }

    /// Apply the ratio, rounding down.
    #[must_use]
    pub fn apply_floor(self, value: u32) -> u32 {
        (u64::from(value) * u64::from(self.num) / u64::from(self.den)) as u32
    }
}

/// Complete rules configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Player HP cap; also the HP a new run starts with.
    pub player_max_hp: u32,

    /// Tick cost of a card whose template leaves cost unset.
    pub default_card_cost: u32,

    /// Ticks consumed by drawing from (or recycling) the stock.
    pub draw_cost: u32,

    /// Ticks consumed by a tableau play.
    pub tableau_play_cost: PlayCost,

    /// Ticks consumed by cycling the linear deck.
    pub shuffle_cost: u32,

    /// Ticks consumed by the linear hold action.
    pub hold_cost: u32,

    /// Fraction of the current intent's value taken as escape damage.
    pub escape_penalty: Ratio,

    /// Number of tableau piles.
    pub pile_count: usize,

    /// Cards dealt into each tableau pile at fight start.
    pub pile_depth: usize,

    /// Combat log lines kept (newest first).
    pub log_capacity: usize,

    /// Shuffle bonus lifetime.
    pub bonus_reset: BonusReset,

    /// Duration of the opening intent of every fight.
    pub opening_intent_duration: u32,

    /// Enemy AI roll table.
    pub intents: IntentTable,

    /// Enemies fought in order.
    pub campaign: Campaign,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_max_hp: 50,
            default_card_cost: 2,
            draw_cost: 2,
            tableau_play_cost: PlayCost::Flat(1),
            shuffle_cost: 5,
            hold_cost: 1,
            escape_penalty: Ratio::new(4, 5),
            pile_count: 3,
            pile_depth: 3,
            log_capacity: 5,
            bonus_reset: BonusReset::Persist,
            opening_intent_duration: 15,
            intents: IntentTable::default(),
            campaign: Campaign::standard(),
        }
    }
}

impl RulesConfig {
    /// Escape damage for an intent of the given value.
    #[must_use]
    pub fn escape_damage(&self, intent_value: u32) -> u32 {
        self.escape_penalty.apply_floor(intent_value)
    }

    /// Set the player HP cap.
    #[must_use]
    pub fn with_player_max_hp(mut self, hp: u32) -> Self {
        assert!(hp > 0, "Player max HP must be positive");
        self.player_max_hp = hp;
        self
    }

    /// Set the tableau play cost rule.
    #[must_use]
    pub fn with_tableau_play_cost(mut self, cost: PlayCost) -> Self {
        self.tableau_play_cost = cost;
        self
    }

    /// Set the shuffle bonus lifetime.
    #[must_use]
    pub fn with_bonus_reset(mut self, reset: BonusReset) -> Self {
        self.bonus_reset = reset;
        self
    }

    /// Set the tableau shape.
    #[must_use]
    pub fn with_piles(mut self, count: usize, depth: usize) -> Self {
        assert!(count > 0, "Must have at least 1 tableau pile");
        self.pile_count = count;
        self.pile_depth = depth;
        self
    }

    /// Set the enemy AI roll table.
    #[must_use]
    pub fn with_intents(mut self, intents: IntentTable) -> Self {
        self.intents = intents;
        self
    }

    /// Replace the campaign.
    #[must_use]
    pub fn with_campaign(mut self, campaign: Campaign) -> Self {
        assert!(!campaign.is_empty(), "Campaign must have at least 1 enemy");
        self.campaign = campaign;
        self
    }
}
