//! Row selection by identifier.

use std::collections::BTreeSet;

/// Selected row ids.
///
/// Ids that leave the visible set after re-filtering stay selected until the
/// caller clears or toggles them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Whether the selection size equals the number of distinct visible ids.
    /// Only the counts are compared, not the ids themselves.
    pub fn covers(&self, visible_ids: impl IntoIterator<Item = String>) -> bool {
        let distinct: BTreeSet<String> = visible_ids.into_iter().collect();
        !distinct.is_empty() && self.ids.len() == distinct.len()
    }

    /// Header checkbox. Clears when the selection size equals the distinct
    /// visible count, otherwise selects exactly `visible_ids`.
    pub fn toggle_all(&mut self, visible_ids: Vec<String>) {
        let distinct: BTreeSet<String> = visible_ids.into_iter().collect();
        if self.ids.len() == distinct.len() {
            self.ids.clear();
        } else {
            self.ids = distinct;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
