//! Selection state: the selected sticker set and the multi-select flag.

use crate::sticker::StickerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tracks which stickers are selected and whether multi-select mode is on.
///
/// Outside multi-select mode a plain toggle replaces the selection, so the
/// set conceptually holds at most one id; the structure itself does not
/// enforce that cardinality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionModel {
    selected: HashSet<StickerId>,
    multi_select: bool,
}

impl SelectionModel {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `id` and report whether it is selected afterwards.
    ///
    /// With `additive` set, `id` flips its own membership and the rest of
    /// the selection is untouched. Otherwise the selection becomes exactly
    /// `{id}`, or empties when `id` was already the sole selected sticker
    /// (click again to deselect).
    pub fn toggle(&mut self, id: &str, additive: bool) -> bool {
        if additive {
            if self.selected.remove(id) {
                false
            } else {
                self.selected.insert(id.to_string());
                true
            }
        } else if self.selected.len() == 1 && self.selected.contains(id) {
            self.selected.clear();
            false
        } else {
            self.selected.clear();
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Check whether a sticker is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Drop `id` from the selection if present.
    pub fn deselect(&mut self, id: &str) {
        self.selected.remove(id);
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The selected id set.
    pub fn selected(&self) -> &HashSet<StickerId> {
        &self.selected
    }

    /// Number of selected stickers.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether multi-select mode is active.
    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    /// Switch multi-select mode; the current selection is kept either way.
    pub fn set_multi_select(&mut self, active: bool) {
        self.multi_select = active;
    }

    /// Flip multi-select mode.
    pub fn toggle_multi_select(&mut self) {
        self.multi_select = !self.multi_select;
    }
}
