//! StickerDash Application

mod dashboard;
mod shortcuts;

pub use dashboard::{ClickOutcome, Dashboard};
pub use shortcuts::{Modifiers, Shortcut, ShortcutRegistry, LAYER_PANEL_TOGGLE};
