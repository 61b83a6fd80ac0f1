//! Card containers for the two play variants.
//!
//! ## Key Types
//!
//! - `Table`: The seam the campaign engine drives both variants through
//! - `Tableau`: Stock, waste and N stacks (solitaire variant)
//! - `LinearDeck`: One sequential deck plus a hold slot (linear variant)
//! - `PileRef`: Names a container in the solitaire variant
//! - `CardView`: A card as the presentation layer may see it
//!
//! ## Conservation
//!
//! Containers only ever move cards between themselves. A card leaves the
//! table for good only when it is played (`take_*` methods).

pub mod linear;
pub mod tableau;

pub use linear::{HoldMove, LinearDeck, LinearView};
pub use tableau::{Draw, Tableau, TableauView};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Catalog};
use crate::core::{CardId, RandomSource, RulesConfig, TemplateId};

/// Names a container in the solitaire variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileRef {
    Stock,
    Waste,
    Tableau(usize),
}

impl std::fmt::Display for PileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileRef::Stock => write!(f, "stock"),
            PileRef::Waste => write!(f, "waste"),
            PileRef::Tableau(i) => write!(f, "tableau {i}"),
        }
    }
}

/// A card as the presentation layer may see it.
///
/// Face-down cards expose only their identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardView {
    Hidden(CardId),
    Visible(Card),
}

impl CardView {
    /// Render a card according to its visibility.
    #[must_use]
    pub fn of(card: &Card) -> Self {
        if card.face_up {
            CardView::Visible(card.clone())
        } else {
            CardView::Hidden(card.id)
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        match self {
            CardView::Hidden(id) => *id,
            CardView::Visible(card) => card.id,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, CardView::Visible(_))
    }
}

/// Container contents as exposed in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableView {
    Tableau(TableauView),
    Linear(LinearView),
}

/// The variant-specific card containers, as seen by the campaign engine.
pub trait Table: Clone + std::fmt::Debug + Serialize + DeserializeOwned {
    /// Whether an exhausted table ends the run even while escape is open.
    /// Otherwise only a fight that cannot be escaped is lost to exhaustion.
    const STRANDED_WHEN_EXHAUSTED: bool;

    /// Catalog templates a new run starts with.
    fn starter(catalog: &Catalog) -> &[TemplateId];

    /// Hold a new run's starter cards.
    fn new_run(cards: Vec<Card>, rules: &RulesConfig, rng: &mut impl RandomSource) -> Self;

    /// Prepare the containers for a fight.
    fn begin_fight(&mut self, rules: &RulesConfig, rng: &mut impl RandomSource);

    /// Add reward cards to the pool, face-down.
    fn add_cards(&mut self, cards: Vec<Card>);

    /// Whether the player has nothing left to act with.
    fn is_exhausted(&self) -> bool;

    /// Every card on the table, in no particular order.
    fn cards(&self) -> Vec<&Card>;

    /// Snapshot of the containers with per-card visibility.
    fn view(&self) -> TableView;

    /// Whether the containers have the shape `rules` deals.
    fn fits(&self, _rules: &RulesConfig) -> bool {
        true
    }

    /// Number of cards on the table.
    fn card_count(&self) -> usize {
        self.cards().len()
    }
}
