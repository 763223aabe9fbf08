//! Sticker board: the owning collection of stickers and their grouping.

use crate::sticker::{GroupId, Sticker, StickerId};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The dashboard's sticker set, keyed by id, plus a stable layer order
/// (placement order, back to front) consumed by the layer panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickerBoard {
    /// All stickers on the board, keyed by id.
    stickers: HashMap<StickerId, Sticker>,
    /// Layer order of sticker ids.
    order: Vec<StickerId>,
}

impl Default for StickerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StickerBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            stickers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Place a sticker on the board. Placing under an existing id replaces
    /// that sticker and keeps its layer position.
    pub fn place_sticker(&mut self, sticker: Sticker) {
        let id = sticker.id.clone();
        if !self.stickers.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.stickers.insert(id, sticker);
    }

    /// Remove a sticker from the board.
    ///
    /// If the removal leaves the sticker's group with a single member, that
    /// member's group id is cleared; a group of one is no group at all.
    pub fn remove_sticker(&mut self, id: &str) -> Option<Sticker> {
        let removed = self.stickers.remove(id)?;
        self.order.retain(|sticker_id| sticker_id != id);

        if let Some(group_id) = removed.group_id {
            self.collapse_singleton_group(group_id);
        }

        Some(removed)
    }

    /// Clear all stickers from the board.
    pub fn clear(&mut self) {
        self.stickers.clear();
        self.order.clear();
    }

    /// Get a sticker by id.
    pub fn get_sticker(&self, id: &str) -> Option<&Sticker> {
        self.stickers.get(id)
    }

    /// Get a mutable reference to a sticker by id.
    pub fn get_sticker_mut(&mut self, id: &str) -> Option<&mut Sticker> {
        self.stickers.get_mut(id)
    }

    /// Stickers in layer order (back to front).
    pub fn stickers_ordered(&self) -> impl Iterator<Item = &Sticker> {
        self.order.iter().filter_map(|id| self.stickers.get(id))
    }

    /// Check if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Get the number of stickers.
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    // --- Movement ---

    /// Translate a sticker by `delta`, carrying its whole effective group
    /// along as one unit. Locked members stay put; a locked grab moves
    /// nothing. Returns the ids that moved.
    pub fn move_sticker(&mut self, id: &str, delta: Vec2) -> Vec<StickerId> {
        let grabbed = match self.stickers.get(id) {
            Some(sticker) => sticker,
            None => return Vec::new(),
        };
        if grabbed.locked {
            return Vec::new();
        }

        let targets = match self.effective_group(id) {
            Some(group_id) => self.group_members(group_id),
            None => vec![id.to_string()],
        };

        let mut moved = Vec::new();
        for target in targets {
            if let Some(sticker) = self.stickers.get_mut(&target) {
                if sticker.locked {
                    continue;
                }
                sticker.position += delta;
                moved.push(target);
            }
        }
        moved
    }

    /// Set a sticker's hidden flag. Returns false for an unknown id.
    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        if let Some(sticker) = self.stickers.get_mut(id) {
            sticker.hidden = hidden;
            true
        } else {
            false
        }
    }

    /// Set a sticker's locked flag. Returns false for an unknown id.
    pub fn set_locked(&mut self, id: &str, locked: bool) -> bool {
        if let Some(sticker) = self.stickers.get_mut(id) {
            sticker.locked = locked;
            true
        } else {
            false
        }
    }

    // --- Grouping ---

    /// Assign a freshly generated group id to the given stickers,
    /// overwriting any group they previously belonged to.
    ///
    /// Returns the new group's id, or None if fewer than 2 of the ids exist
    /// on the board; unknown ids are ignored, so a list of strangers can
    /// never produce an undersized group.
    pub fn group_stickers(&mut self, ids: &[StickerId]) -> Option<GroupId> {
        if ids.len() < 2 {
            return None;
        }

        // Collect the members that actually exist, in layer order.
        let found: Vec<StickerId> = self
            .order
            .iter()
            .filter(|id| ids.contains(*id))
            .cloned()
            .collect();
        if found.len() < 2 {
            return None;
        }

        let group_id = Uuid::new_v4();
        for id in &found {
            if let Some(sticker) = self.stickers.get_mut(id) {
                sticker.group_id = Some(group_id);
            }
        }
        Some(group_id)
    }

    /// Clear the group id on every sticker sharing the given sticker's
    /// group. Ungrouping is group-wide, not per-sticker.
    ///
    /// Returns the ids that were cleared, in layer order; empty when the
    /// sticker is unknown or not grouped.
    pub fn ungroup_sticker(&mut self, id: &str) -> Vec<StickerId> {
        let group_id = match self.stickers.get(id).and_then(|s| s.group_id) {
            Some(group_id) => group_id,
            None => return Vec::new(),
        };

        let mut cleared = Vec::new();
        for sticker_id in &self.order {
            if let Some(sticker) = self.stickers.get_mut(sticker_id) {
                if sticker.group_id == Some(group_id) {
                    sticker.group_id = None;
                    cleared.push(sticker_id.clone());
                }
            }
        }
        cleared
    }

    /// Ids of the stickers in a group, in layer order.
    pub fn group_members(&self, group_id: GroupId) -> Vec<StickerId> {
        self.order
            .iter()
            .filter(|id| {
                self.stickers
                    .get(*id)
                    .map_or(false, |s| s.group_id == Some(group_id))
            })
            .cloned()
            .collect()
    }

    /// A sticker's group, resolved only while the group genuinely has two
    /// or more members. A singleton remnant reads as ungrouped.
    pub fn effective_group(&self, id: &str) -> Option<GroupId> {
        let group_id = self.stickers.get(id)?.group_id?;
        if self.group_members(group_id).len() >= 2 {
            Some(group_id)
        } else {
            None
        }
    }

    /// A group left with a single member is collapsed back to ungrouped.
    fn collapse_singleton_group(&mut self, group_id: GroupId) {
        let mut members = self
            .stickers
            .values_mut()
            .filter(|s| s.group_id == Some(group_id));
        if let (Some(only), None) = (members.next(), members.next()) {
            only.group_id = None;
        }
    }
}
