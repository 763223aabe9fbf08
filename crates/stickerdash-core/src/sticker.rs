//! Sticker model: a placeable widget instance on the dashboard.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique sticker identifier, assigned by the host page.
pub type StickerId = String;

/// Identifier shared by the members of a sticker group.
pub type GroupId = Uuid;

/// Edge length used when a sticker carries no explicit size.
pub const DEFAULT_STICKER_SIZE: f64 = 60.0;

/// A placeable sticker. Stickers are square; `size` is the edge length
/// and falls back to [`DEFAULT_STICKER_SIZE`] when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    /// Unique identifier.
    pub id: StickerId,
    /// Top-left corner position.
    pub position: Point,
    /// Edge length override.
    pub size: Option<f64>,
    /// Group membership; meaningful only while two or more stickers share it.
    pub group_id: Option<GroupId>,
    /// Hidden stickers stay on the board but drop out of derived geometry.
    pub hidden: bool,
    /// Locked stickers cannot be moved.
    pub locked: bool,
    /// Whether the sticker has been placed on the board surface.
    pub placed: bool,
    /// Display name shown in the layer panel.
    pub name: Option<String>,
}

impl Sticker {
    /// Create a placed sticker at `position` with the default size.
    pub fn new(id: impl Into<StickerId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            size: None,
            group_id: None,
            hidden: false,
            locked: false,
            placed: true,
            name: None,
        }
    }

    /// Set an explicit edge length.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Effective edge length, falling back to the default.
    pub fn effective_size(&self) -> f64 {
        self.size.unwrap_or(DEFAULT_STICKER_SIZE)
    }

    /// Footprint rectangle covered by the sticker.
    pub fn footprint(&self) -> Rect {
        let size = self.effective_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + size,
            self.position.y + size,
        )
    }
}
