//! Prediction for predictive parsers.

mod first;
mod follow;

use std::collections::{BTreeMap, BTreeSet};

use crate::symbol::{Lookahead, Symbol};

pub use self::first::FirstSets;
pub use self::follow::FollowSets;

/// A single FIRST or FOLLOW set.
pub type PredictSet = BTreeSet<Lookahead>;

/// The representation of FIRST and FOLLOW sets.
pub type PerSymbolSets = BTreeMap<Symbol, PredictSet>;

/// Access to computed sets.
pub trait PredictSets {
    /// Returns a reference to the sets, keyed by symbol.
    fn predict_sets(&self) -> &PerSymbolSets;

    /// Returns the set of one symbol.
    fn get(&self, sym: Symbol) -> Option<&PredictSet> {
        self.predict_sets().get(&sym)
    }
}
