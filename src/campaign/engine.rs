//! The run engine: fight lifecycle and the commands shared by both variants.
//!
//! ## State machine
//!
//! ```text
//! COMBAT --enemy HP 0, more enemies--> REWARD --confirm--> COMBAT(next)
//! COMBAT --enemy HP 0, last enemy----> VICTORY
//! COMBAT --player HP 0 / exhausted---> GAME_OVER
//! COMBAT --escape (non-boss)---------> COMBAT(next)
//! ```
//!
//! `GAME_OVER` and `VICTORY` are left only through [`Engine::start_new_run`].
//!
//! Every command validates before it mutates. A rejected command returns
//! `Err(Rejected)` with the state untouched and nothing written to the
//! combat log.

use serde::de::DeserializeOwned;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::enemy::EnemyDef;
use super::snapshot::Snapshot;
use super::state::{RunState, View};
use crate::cards::{Card, Catalog};
use crate::combat::{BreachReport, CardEffect, CombatLedger, CombatLog, EnemyAi, Resolution, TurnResolver};
use crate::core::{
    CardId, CommandResult, EngineError, GameRng, RandomSource, Rejected, RulesConfig, SequentialIds,
};
use crate::zones::{LinearDeck, Table, Tableau};

/// Solitaire-variant engine with the default generator.
pub type SolitaireGame = Engine<Tableau>;

/// Linear-variant engine with the default generator.
pub type LinearGame = Engine<LinearDeck>;

/// What an accepted combat command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Enemy turn triggered by the command's tick cost.
    pub breach: Option<BreachReport>,
    /// Card effect, for plays.
    pub effect: Option<CardEffect>,
    /// View after the command settled.
    pub view: View,
}

/// One run of the game over a card table `T`, driven by random source `R`.
#[derive(Clone, Debug)]
pub struct Engine<T: Table, R: RandomSource = GameRng> {
    pub(super) rules: RulesConfig,
    pub(super) catalog: Catalog,
    pub(super) ai: EnemyAi,
    pub(super) state: RunState<T, R>,
}

/// Builder for an [`Engine`].
///
/// ```
/// use cinder_engine::campaign::{EngineBuilder, SolitaireGame, View};
/// use cinder_engine::core::{PlayCost, RulesConfig};
///
/// let game: SolitaireGame = EngineBuilder::new()
///     .rules(RulesConfig::default().with_tableau_play_cost(PlayCost::CardCost))
///     .build(42);
/// assert_eq!(game.view(), View::Combat);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EngineBuilder {
    rules: RulesConfig,
    catalog: Option<Catalog>,
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build with a seeded [`GameRng`].
    pub fn build<T: Table>(self, seed: u64) -> Engine<T> {
        self.build_with_rng(GameRng::new(seed))
    }

    /// Build with an injected random source.
    pub fn build_with_rng<T: Table, R: RandomSource>(self, rng: R) -> Engine<T, R> {
        assert!(!self.rules.campaign.is_empty(), "Campaign must have at least 1 enemy");
        let catalog = self.catalog.unwrap_or_else(Catalog::standard);
        Engine::with_parts(self.rules, catalog, rng)
    }
}

impl<T: Table> Engine<T> {
    /// Standard rules and catalog, seeded generator.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        EngineBuilder::new().build(seed)
    }
}

impl<T: Table, R: RandomSource> Engine<T, R> {
    /// Assemble an engine and start the first run.
    pub fn with_parts(rules: RulesConfig, catalog: Catalog, mut rng: R) -> Self {
        let ai = EnemyAi::new(rules.intents);
        let mut ids = SequentialIds::new();
        let starter = catalog.stamp_all(T::starter(&catalog), &mut ids);
        let table = T::new_run(starter, &rules, &mut rng);
        let opening = ai.opening_intent(0, rules.opening_intent_duration);

        let state = RunState {
            view: View::Combat,
            fight_index: 0,
            ledger: CombatLedger::for_fight(rules.player_max_hp, rules.player_max_hp, 0, opening),
            table,
            rewards: Vec::new(),
            selected_rewards: SmallVec::new(),
            log: CombatLog::new(rules.log_capacity),
            ids,
            rng,
        };

        let mut engine = Self { rules, catalog, ai, state };
        engine.state.log.push("System Online.");
        engine.enter_fight(0);
        engine
    }

    // --- queries ---

    #[must_use]
    pub fn view(&self) -> View {
        self.state.view
    }

    #[must_use]
    pub fn fight_index(&self) -> usize {
        self.state.fight_index
    }

    #[must_use]
    pub fn ledger(&self) -> &CombatLedger {
        &self.state.ledger
    }

    #[must_use]
    pub fn table(&self) -> &T {
        &self.state.table
    }

    #[must_use]
    pub fn log(&self) -> &CombatLog {
        &self.state.log
    }

    #[must_use]
    pub fn rewards(&self) -> &[Card] {
        &self.state.rewards
    }

    #[must_use]
    pub fn selected_rewards(&self) -> &[CardId] {
        &self.state.selected_rewards
    }

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.state.rng
    }

    /// Mutable access to the random source, e.g. to extend a script.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.state.rng
    }

    /// The enemy of the current fight.
    #[must_use]
    pub fn enemy(&self) -> &EnemyDef {
        &self.rules.campaign.enemies()[self.state.fight_index]
    }

    /// Escape damage at the current intent.
    #[must_use]
    pub fn escape_preview(&self) -> u32 {
        self.rules.escape_damage(self.state.ledger.intent.value)
    }

    /// Whether [`escape`](Self::escape) would be accepted.
    #[must_use]
    pub fn can_escape(&self) -> bool {
        self.state.view == View::Combat && !self.enemy().boss
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            view: state.view,
            fight_index: state.fight_index,
            enemy: self.enemy().clone(),
            ledger: state.ledger.clone(),
            intent: state.ledger.intent,
            table: state.table.view(),
            log: state.log.lines().map(str::to_owned).collect(),
            rewards: state.rewards.clone(),
            selected_rewards: state.selected_rewards.to_vec(),
            escape_cost: self.escape_preview(),
            can_escape: self.can_escape(),
        }
    }

    // --- commands shared by both variants ---

    /// Toggle a reward card. Returns whether it is now picked.
    pub fn select_reward(&mut self, id: CardId) -> CommandResult<bool> {
        traced("select_reward", self.try_select_reward(id))
    }

    fn try_select_reward(&mut self, id: CardId) -> CommandResult<bool> {
        self.require(View::Reward)?;
        if !self.state.rewards.iter().any(|c| c.id == id) {
            return Err(Rejected::UnknownReward(id));
        }

        let picked = &mut self.state.selected_rewards;
        if let Some(pos) = picked.iter().position(|&p| p == id) {
            picked.remove(pos);
            Ok(false)
        } else {
            picked.push(id);
            Ok(true)
        }
    }

    /// Add the picked rewards to the card pool and start the next fight.
    ///
    /// Returns the number of cards added. Unpicked offers are discarded.
    pub fn confirm_rewards(&mut self) -> CommandResult<usize> {
        traced("confirm_rewards", self.try_confirm_rewards())
    }

    fn try_confirm_rewards(&mut self) -> CommandResult<usize> {
        self.require(View::Reward)?;

        let picked = std::mem::take(&mut self.state.selected_rewards);
        let chosen: Vec<Card> = std::mem::take(&mut self.state.rewards)
            .into_iter()
            .filter(|card| picked.contains(&card.id))
            .collect();
        let added = chosen.len();
        self.state.table.add_cards(chosen);
        debug!(added, "rewards confirmed");

        self.enter_fight(self.state.fight_index + 1);
        Ok(added)
    }

    /// Flee the current fight for a share of the intent's value in HP.
    ///
    /// Returns the damage taken.
    pub fn escape(&mut self) -> CommandResult<u32> {
        traced("escape", self.try_escape())
    }

    fn try_escape(&mut self) -> CommandResult<u32> {
        self.require(View::Combat)?;
        if self.enemy().boss {
            return Err(Rejected::BossFight);
        }

        let damage = self.escape_preview();
        self.state.ledger.lose_hp(damage);
        self.state.log.push(format!("ESCAPE: Took {damage} damage."));
        debug!(damage, fight = self.state.fight_index, "escaped");

        if self.state.ledger.player_defeated() {
            self.transition(View::GameOver);
        } else if self.rules.campaign.is_last(self.state.fight_index) {
            self.transition(View::Victory);
        } else {
            self.enter_fight(self.state.fight_index + 1);
        }
        Ok(damage)
    }

    /// Throw the current run away and start again from the first fight.
    ///
    /// The random source keeps running; it is not reseeded.
    pub fn start_new_run(&mut self) {
        let mut ids = SequentialIds::new();
        let starter = self.catalog.stamp_all(T::starter(&self.catalog), &mut ids);
        self.state.table = T::new_run(starter, &self.rules, &mut self.state.rng);
        self.state.ids = ids;
        self.state.ledger.player_hp = self.rules.player_max_hp;
        self.state.rewards.clear();
        self.state.selected_rewards.clear();
        self.state.log.clear();
        self.state.log.push("System Online.");
        info!("new run");
        self.enter_fight(0);
    }

    /// Encode the run state.
    pub fn checkpoint(&self) -> Result<Vec<u8>, EngineError>
    where
        R: Serialize,
    {
        bincode::serialize(&self.state).map_err(EngineError::Encode)
    }

    /// Replace the run state with a checkpoint taken from an engine with
    /// the same rules and catalog.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), EngineError>
    where
        R: DeserializeOwned,
    {
        let state: RunState<T, R> = bincode::deserialize(bytes).map_err(EngineError::Decode)?;
        let fights = self.rules.campaign.len();
        if state.fight_index >= fights {
            return Err(EngineError::Incompatible(format!(
                "fight {} of a {fights}-enemy campaign",
                state.fight_index
            )));
        }
        if !state.table.fits(&self.rules) {
            return Err(EngineError::Incompatible("table shape differs from the rules".into()));
        }
        self.state = state;
        Ok(())
    }

    // --- internals used by the variant commands ---

    pub(super) fn require(&self, view: View) -> CommandResult<()> {
        if self.state.view == view {
            Ok(())
        } else {
            Err(Rejected::WrongView(self.state.view))
        }
    }

    pub(super) fn resolver(&self) -> TurnResolver {
        TurnResolver::new(self.ai, self.state.fight_index)
    }

    /// Resolve a card play through both phases and log it.
    pub(super) fn resolve_play(&mut self, card: &Card, cost: u32) -> Resolution {
        let resolver = self.resolver();
        let resolution = resolver.play(&mut self.state.ledger, card, cost, &mut self.state.rng);
        self.log_breach(resolution.breach.as_ref());
        if let Some(effect) = &resolution.effect {
            self.state.log.push(effect.describe(&card.name));
        }
        debug!(card = %card.id, name = %card.name, cost, "card played");
        resolution
    }

    /// Time phase only, for actions without a card effect.
    pub(super) fn resolve_time(&mut self, cost: u32) -> Option<BreachReport> {
        let resolver = self.resolver();
        let resolution = resolver.pass_time(&mut self.state.ledger, cost, &mut self.state.rng);
        self.log_breach(resolution.breach.as_ref());
        resolution.breach
    }

    fn log_breach(&mut self, breach: Option<&BreachReport>) {
        if let Some(report) = breach {
            let line = report.describe(&self.enemy().name);
            self.state.log.push(line);
            debug!(
                kind = ?report.resolved.kind,
                value = report.resolved.value,
                hp_lost = report.split.hp_lost,
                "enemy turn"
            );
        }
    }

    /// Check fight outcomes after a command committed.
    ///
    /// Player defeat is checked first: an action whose breach kills the
    /// player ends the run even if its card also finished the enemy.
    pub(super) fn settle(&mut self, resolution: Resolution) -> Outcome {
        let player_down = self.state.ledger.player_defeated();
        let enemy_down = self.state.ledger.enemy_defeated();

        if player_down {
            self.transition(View::GameOver);
        } else if enemy_down {
            if self.rules.campaign.is_last(self.state.fight_index) {
                self.transition(View::Victory);
            } else {
                self.offer_rewards();
            }
        } else if self.stranded() {
            self.state.log.push("CRITICAL: Out of ammunition.");
            self.transition(View::GameOver);
        }

        Outcome {
            breach: resolution.breach,
            effect: resolution.effect,
            view: self.state.view,
        }
    }

    fn offer_rewards(&mut self) {
        let count = self.enemy().reward_count;
        self.state.rewards = self
            .catalog
            .roll_rewards(count, &mut self.state.rng, &mut self.state.ids);
        self.state.selected_rewards.clear();
        self.transition(View::Reward);
    }

    fn enter_fight(&mut self, index: usize) {
        self.state.fight_index = index;
        self.state.table.begin_fight(&self.rules, &mut self.state.rng);

        let enemy_hp = self.enemy().max_hp;
        let opening = self.ai.opening_intent(index, self.rules.opening_intent_duration);
        self.state.ledger = CombatLedger::for_fight(
            self.state.ledger.player_hp,
            self.rules.player_max_hp,
            enemy_hp,
            opening,
        );

        let line = format!("ENCOUNTER: {} detected.", self.enemy().name);
        self.state.log.push(line);
        info!(fight = index, enemy = %self.enemy().name, hp = enemy_hp, "fight started");
        self.transition(View::Combat);

        if self.stranded() {
            self.state.log.push("CRITICAL: Out of ammunition.");
            self.transition(View::GameOver);
        }
    }

    /// Out of cards with no way left to act or flee.
    fn stranded(&self) -> bool {
        self.state.table.is_exhausted() && (T::STRANDED_WHEN_EXHAUSTED || !self.can_escape())
    }

    fn transition(&mut self, view: View) {
        if self.state.view != view {
            info!(from = %self.state.view, to = %view, fight = self.state.fight_index, "view changed");
        }
        self.state.view = view;
    }
}

/// Trace a command's rejection. Rejections never reach the combat log.
pub(super) fn traced<V>(command: &'static str, result: CommandResult<V>) -> CommandResult<V> {
    if let Err(reason) = &result {
        debug!(command, %reason, "command rejected");
    }
    result
}
