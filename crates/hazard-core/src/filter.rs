//! Category visibility state for the filter panel.
//!
//! The filter has two modes. In *show all* mode the set holds excluded
//! categories; in *selection* mode it holds the selected ones. The set is
//! always read relative to the current mode, so switching modes clears it.

use std::collections::BTreeSet;

use hazard_types::CategoryId;
use serde::{Deserialize, Serialize};

/// Which disaster categories are visible on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// `true`: everything except `set` is visible. `false`: only `set` is.
    show_all: bool,
    /// Exclusions in show-all mode, selections otherwise.
    set: BTreeSet<CategoryId>,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryFilter {
    /// A filter showing every category.
    pub const fn new() -> Self {
        Self {
            show_all: true,
            set: BTreeSet::new(),
        }
    }

    /// A filter in selection mode showing only `selected`.
    pub fn only(selected: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            show_all: false,
            set: selected.into_iter().collect(),
        }
    }

    /// Whether the filter is in show-all mode.
    pub const fn show_all(&self) -> bool {
        self.show_all
    }

    /// Switch mode. The set is cleared regardless of the previous mode.
    pub fn set_all_mode(&mut self, enabled: bool) {
        self.show_all = enabled;
        self.set.clear();
    }

    /// Selection mode with nothing selected.
    pub fn clear_all(&mut self) {
        self.set_all_mode(false);
    }

    /// Apply a checkbox change for one category.
    ///
    /// Idempotent: toggling a category into the state it is already in does
    /// nothing.
    pub fn toggle_category(&mut self, id: &CategoryId, checked: bool) {
        // In show-all mode the set holds exclusions, so "checked" removes.
        let insert = checked != self.show_all;
        if insert {
            if !self.set.contains(id) {
                self.set.insert(id.clone());
            }
        } else {
            self.set.remove(id);
        }
    }

    /// Whether events of this category are drawn.
    pub fn is_visible(&self, id: &CategoryId) -> bool {
        if self.show_all {
            !self.set.contains(id)
        } else {
            self.set.contains(id)
        }
    }

    /// Checkbox state for a category. Same as [`Self::is_visible`].
    pub fn is_checked(&self, id: &CategoryId) -> bool {
        self.is_visible(id)
    }

    /// The visible subset of `known`.
    pub fn visible_categories<'a>(
        &self,
        known: impl IntoIterator<Item = &'a CategoryId>,
    ) -> BTreeSet<CategoryId> {
        known
            .into_iter()
            .filter(|id| self.is_visible(id))
            .cloned()
            .collect()
    }
}
