//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Static card data (kind, value, cost, heal)
//! - `Card`: A stamped instance with identity and visibility
//! - `Catalog`: Template lookup, starter decks and reward offers
//!
//! ## Polarity
//!
//! Attack cards are `Warm`, block cards are `Cool`. Polarity is always
//! derived from the kind and is only consulted when stacking on the tableau.

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::{ids, Catalog};
pub use definition::{Aspect, CardKind, CardTemplate, Polarity};
pub use instance::Card;
