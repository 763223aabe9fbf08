//! Widget registry: named behavioral handles and static descriptive data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Behavioral contract implemented by every registered widget.
pub trait Widget {
    /// Idempotent setup. The registry runs it on registration, so
    /// re-registering a widget must be safe.
    fn init(&mut self);
    /// Snapshot of the widget's current state.
    fn state(&self) -> Map<String, Value>;
    /// Merge a partial state into the current state, never a wholesale
    /// replace. [`merge_state`] implements the shared merge rules.
    fn set_state(&mut self, partial: Map<String, Value>);
    /// Widget-defined side effect dispatch.
    fn trigger(&mut self, action: &str, payload: Option<&Value>);
}

/// Shared handle to a live widget.
pub type WidgetHandle = Rc<RefCell<dyn Widget>>;

/// Static descriptive entry for a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetData {
    /// Display title.
    pub title: String,
    /// Descriptive content shown alongside the widget.
    pub content: String,
}

impl WidgetData {
    /// Create a widget data entry.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Merge `partial` into `state`: listed keys are patched in, a JSON null
/// deletes its key, unlisted keys stay untouched.
pub fn merge_state(state: &mut Map<String, Value>, partial: Map<String, Value>) {
    for (key, value) in partial {
        if value.is_null() {
            state.remove(&key);
        } else {
            state.insert(key, value);
        }
    }
}

/// Two independent name-keyed registries: live behavioral handles and
/// static `{title, content}` data. Registering in one has no effect on the
/// other, and a widget is free to exist in only one of them.
///
/// Duplicate registrations are not an error; the last write wins. Lookups
/// of unknown names return None, never a failure.
#[derive(Default)]
pub struct WidgetRegistry {
    handles: HashMap<String, WidgetHandle>,
    data: HashMap<String, WidgetData>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Behavioral handles ---

    /// Register a live widget under `name`, replacing any previous entry,
    /// and run the widget's `init`.
    pub fn register(&mut self, name: impl Into<String>, handle: WidgetHandle) {
        let name = name.into();
        log::debug!("registering widget `{name}`");
        handle.borrow_mut().init();
        self.handles.insert(name, handle);
    }

    /// Look up a widget handle. The returned clone aliases the live widget;
    /// that aliasing is the point of a behavioral handle.
    pub fn get(&self, name: &str) -> Option<WidgetHandle> {
        self.handles.get(name).cloned()
    }

    /// Copy of the whole handle mapping. Mutating the copy has no effect
    /// on the registry.
    pub fn all(&self) -> HashMap<String, WidgetHandle> {
        self.handles.clone()
    }

    /// Drop a widget handle. Unknown names are a silent no-op.
    pub fn remove(&mut self, name: &str) -> Option<WidgetHandle> {
        self.handles.remove(name)
    }

    // --- Static data ---

    /// Register static data under `name`, replacing any previous entry.
    pub fn register_data(&mut self, name: impl Into<String>, data: WidgetData) {
        self.data.insert(name.into(), data);
    }

    /// Look up a widget's static data.
    pub fn get_data(&self, name: &str) -> Option<WidgetData> {
        self.data.get(name).cloned()
    }

    /// Copy of the whole static data mapping.
    pub fn all_data(&self) -> HashMap<String, WidgetData> {
        self.data.clone()
    }

    /// Drop a static data entry. Unknown names are a silent no-op.
    pub fn remove_data(&mut self, name: &str) -> Option<WidgetData> {
        self.data.remove(name)
    }
}
