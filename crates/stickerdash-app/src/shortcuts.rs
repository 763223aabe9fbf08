//! Keyboard shortcut registry and modifier state.

use serde::{Deserialize, Serialize};

/// Modifier keys state, as reported by the host page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub description: &'static str,
}

/// The layer panel visibility toggle, the dashboard's one global binding.
pub const LAYER_PANEL_TOGGLE: Shortcut =
    Shortcut::new("L", false, true, false, "Toggle layer panel");

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        alt: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            alt,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Alt+L").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Check whether a key press matches this shortcut exactly; extra
    /// modifiers disqualify the match. No binding uses the platform (meta)
    /// key, so any meta press falls through to the host.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.ctrl == modifiers.ctrl
            && self.alt == modifiers.alt
            && self.shift == modifiers.shift
            && !modifiers.meta
            && key.eq_ignore_ascii_case(self.key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![LAYER_PANEL_TOGGLE]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
