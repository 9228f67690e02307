//! Selection model over file ids

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How picks combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Each pick replaces the whole selection
    Single,
    /// Each pick toggles membership
    Multi,
}

/// The set of currently selected file ids
#[derive(Debug, Clone)]
pub struct Selection {
    mode: SelectionMode,
    ids: HashSet<String>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ids: HashSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Apply a pick according to the selection mode
    pub fn toggle(&mut self, id: &str) {
        match self.mode {
            SelectionMode::Single => {
                self.ids.clear();
                self.ids.insert(id.to_string());
            }
            SelectionMode::Multi => {
                if !self.ids.remove(id) {
                    self.ids.insert(id.to_string());
                }
            }
        }
    }

    /// Toggle between full and empty selection of the given filtered listing
    ///
    /// Select-all semantics are computed over the filtered listing, never
    /// the unfiltered one: if every given id is already selected, the
    /// selection clears; otherwise it becomes exactly the given ids.
    pub fn toggle_all(&mut self, filtered_ids: &[&str]) {
        let all_selected =
            !filtered_ids.is_empty() && filtered_ids.iter().all(|id| self.ids.contains(*id));

        if all_selected {
            self.ids.clear();
        } else {
            self.ids = filtered_ids.iter().map(|id| id.to_string()).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = Selection::new(SelectionMode::Single);

        selection.toggle("a");
        selection.toggle("b");

        assert_eq!(selection.len(), 1);
        assert!(selection.contains("b"));
        assert!(!selection.contains("a"));
    }

    #[test]
    fn test_multi_mode_toggles_membership() {
        let mut selection = Selection::new(SelectionMode::Multi);

        selection.toggle("a");
        selection.toggle("b");
        assert_eq!(selection.len(), 2);

        selection.toggle("a");
        assert!(!selection.contains("a"));
        assert!(selection.contains("b"));
    }

    #[test]
    fn test_toggle_all_from_empty_is_idempotent() {
        let mut selection = Selection::new(SelectionMode::Multi);
        let filtered = ["a", "b", "c"];

        selection.toggle_all(&filtered);
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&filtered);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_from_full_is_idempotent() {
        let mut selection = Selection::new(SelectionMode::Multi);
        let filtered = ["a", "b"];

        selection.toggle("a");
        selection.toggle("b");

        selection.toggle_all(&filtered);
        assert!(selection.is_empty());

        selection.toggle_all(&filtered);
        assert!(selection.contains("a"));
        assert!(selection.contains("b"));
    }

    #[test]
    fn test_toggle_all_uses_filtered_listing_only() {
        let mut selection = Selection::new(SelectionMode::Multi);

        // "c" is filtered out of view; selecting all must not include it
        selection.toggle_all(&["a", "b"]);

        assert!(selection.contains("a"));
        assert!(selection.contains("b"));
        assert!(!selection.contains("c"));
    }

    #[test]
    fn test_toggle_all_with_empty_listing_clears() {
        let mut selection = Selection::new(SelectionMode::Multi);
        selection.toggle("a");

        selection.toggle_all(&[]);
        assert!(selection.is_empty());
    }
}
