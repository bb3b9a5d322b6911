use crate::core::favorites::{FavoriteId, FavoritesSet};

/// Incremental change between the current set and the last
/// remote-confirmed baseline. Key sets are disjoint by construction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetDiff {
    /// current \ baseline
    pub added: Vec<FavoriteId>,
    /// baseline \ current
    pub removed: Vec<FavoriteId>,
}

impl SetDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub fn diff(current: &FavoritesSet, baseline: &FavoritesSet) -> SetDiff {
    SetDiff {
        added: current.difference(baseline).cloned().collect(),
        removed: baseline.difference(current).cloned().collect(),
    }
}
