//! Dashboard session: wires board, selection, registry, and bus together.

use crate::shortcuts::{Modifiers, LAYER_PANEL_TOGGLE};
use kurbo::{Rect, Vec2};
use std::collections::HashSet;
use stickerdash_core::{
    selection_bounds, DashboardEvent, EventBus, GroupId, SelectionModel, Sticker, StickerBoard,
    StickerId, WidgetRegistry,
};

/// Source tag the dashboard attaches to its own bus events.
const EVENT_SOURCE: &str = "dashboard";

/// Outcome of a sticker click, for the view layer to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Multi-select mode toggled membership. `added` is true only on the
    /// add transition, the cue for a transient notification; removal stays
    /// quiet.
    Toggled { added: bool },
    /// Outside multi-select mode the caller-supplied handler ran and the
    /// selection was left untouched.
    Forwarded,
}

/// One dashboard session owning the coordinated state.
///
/// Construct it explicitly and hand it (or its bus handle) to every
/// component that needs it; there are no process-wide globals. Session
/// operations announce themselves on the bus; the public fields allow
/// direct reads and panel-level tweaks.
pub struct Dashboard {
    /// Sticker set, layer order, and grouping.
    pub board: StickerBoard,
    /// Selection set and multi-select mode.
    /// NOTE: Prefer [`Dashboard::toggle_selection`] for mutations so
    /// observers hear about them on the bus.
    pub selection: SelectionModel,
    /// Live widget handles and static widget data.
    pub registry: WidgetRegistry,
    bus: EventBus,
    layer_panel_open: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Create a session with a fresh bus.
    pub fn new() -> Self {
        Self::with_bus(EventBus::new())
    }

    /// Create a session on an existing bus.
    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            board: StickerBoard::new(),
            selection: SelectionModel::new(),
            registry: WidgetRegistry::new(),
            bus,
            layer_panel_open: false,
        }
    }

    /// Handle to the session bus; clone it into widgets and observers.
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    // --- Stickers ---

    /// Place a sticker on the board and announce it.
    pub fn place_sticker(&mut self, sticker: Sticker) {
        let announced = DashboardEvent::StickerPlaced {
            id: sticker.id.clone(),
            x: sticker.position.x,
            y: sticker.position.y,
        };
        self.board.place_sticker(sticker);
        announced.publish(&self.bus, EVENT_SOURCE);
    }

    /// Remove a sticker, dropping it from the selection as well.
    /// Returns false for an unknown id.
    pub fn remove_sticker(&mut self, id: &str) -> bool {
        if self.board.remove_sticker(id).is_none() {
            return false;
        }
        DashboardEvent::StickerRemoved { id: id.to_string() }.publish(&self.bus, EVENT_SOURCE);
        if self.selection.is_selected(id) {
            self.selection.deselect(id);
            self.publish_selection();
        }
        true
    }

    /// Drag the sticker under the pointer by `delta`; its effective group
    /// travels along. Returns the ids that moved.
    pub fn move_sticker(&mut self, id: &str, delta: Vec2) -> Vec<StickerId> {
        let moved = self.board.move_sticker(id, delta);
        if !moved.is_empty() {
            DashboardEvent::StickerMoved {
                ids: moved.clone(),
                dx: delta.x,
                dy: delta.y,
            }
            .publish(&self.bus, EVENT_SOURCE);
        }
        moved
    }

    /// Translate every selected sticker by `delta`. Stickers sharing a
    /// group move once, not once per selected member.
    pub fn move_selected(&mut self, delta: Vec2) -> Vec<StickerId> {
        let mut moved = Vec::new();
        let mut visited: HashSet<StickerId> = HashSet::new();
        for id in self.selected_in_layer_order() {
            if visited.contains(&id) {
                continue;
            }
            let step = self.board.move_sticker(&id, delta);
            visited.extend(step.iter().cloned());
            moved.extend(step);
        }
        if !moved.is_empty() {
            DashboardEvent::StickerMoved {
                ids: moved.clone(),
                dx: delta.x,
                dy: delta.y,
            }
            .publish(&self.bus, EVENT_SOURCE);
        }
        moved
    }

    // --- Selection ---

    /// Toggle a sticker's selection (see [`SelectionModel::toggle`]) and
    /// announce the new selection. Returns whether the sticker is selected
    /// afterwards.
    pub fn toggle_selection(&mut self, id: &str, additive: bool) -> bool {
        let selected = self.selection.toggle(id, additive);
        self.publish_selection();
        selected
    }

    /// Empty the selection and announce it; a no-op when already empty.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.publish_selection();
    }

    /// Apply the sticker-click rules.
    ///
    /// In multi-select mode the click toggles membership (`additive`
    /// follows the shift key). Outside multi-select mode the
    /// caller-supplied handler runs instead and no selection state moves.
    pub fn sticker_click<F>(&mut self, id: &str, shift: bool, on_click: F) -> ClickOutcome
    where
        F: FnOnce(&str),
    {
        if self.selection.multi_select() {
            let added = self.toggle_selection(id, shift);
            ClickOutcome::Toggled { added }
        } else {
            on_click(id);
            ClickOutcome::Forwarded
        }
    }

    /// Padded rectangle enclosing the visible selection, if any.
    pub fn selection_bounds(&self) -> Option<Rect> {
        selection_bounds(&self.board, &self.selection)
    }

    // --- Toolbar operations ---

    /// Group the selected stickers under a fresh id.
    pub fn group_selected(&mut self) -> Option<GroupId> {
        let ids = self.selected_in_layer_order();
        let group_id = self.board.group_stickers(&ids)?;
        log::debug!("grouped {} stickers as {group_id}", ids.len());
        DashboardEvent::GroupCreated {
            group_id,
            members: self.board.group_members(group_id),
        }
        .publish(&self.bus, EVENT_SOURCE);
        Some(group_id)
    }

    /// Dissolve every group the selection touches. Returns all ids whose
    /// group membership was cleared.
    pub fn ungroup_selected(&mut self) -> Vec<StickerId> {
        let mut dissolved = Vec::new();
        for id in self.selected_in_layer_order() {
            let group_id = match self.board.get_sticker(&id).and_then(|s| s.group_id) {
                Some(group_id) => group_id,
                None => continue,
            };
            let members = self.board.ungroup_sticker(&id);
            if !members.is_empty() {
                DashboardEvent::GroupDissolved {
                    group_id,
                    members: members.clone(),
                }
                .publish(&self.bus, EVENT_SOURCE);
                dissolved.extend(members);
            }
        }
        dissolved
    }

    /// Delete the selected stickers. Selected ids with no sticker on the
    /// board have nothing to remove but still leave the selection. Returns
    /// how many stickers were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selected_in_layer_order();
        let mut removed = 0;
        for id in &ids {
            if self.board.remove_sticker(id).is_some() {
                DashboardEvent::StickerRemoved { id: id.clone() }
                    .publish(&self.bus, EVENT_SOURCE);
                removed += 1;
            }
        }
        self.clear_selection();
        removed
    }

    // --- Layer panel ---

    /// Whether the layer panel is open.
    pub fn layer_panel_open(&self) -> bool {
        self.layer_panel_open
    }

    /// Flip layer panel visibility; returns the new state.
    pub fn toggle_layer_panel(&mut self) -> bool {
        self.layer_panel_open = !self.layer_panel_open;
        log::debug!("layer panel open: {}", self.layer_panel_open);
        self.layer_panel_open
    }

    /// Feed a key press. Alt+L toggles the layer panel; every other
    /// combination is left for the host, reported by returning false.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        if LAYER_PANEL_TOGGLE.matches(key, modifiers) {
            self.toggle_layer_panel();
            return true;
        }
        false
    }

    // --- Internal ---

    /// Selected ids in layer order, for deterministic event payloads.
    fn selected_in_layer_order(&self) -> Vec<StickerId> {
        self.board
            .stickers_ordered()
            .filter(|s| self.selection.is_selected(&s.id))
            .map(|s| s.id.clone())
            .collect()
    }

    fn publish_selection(&self) {
        DashboardEvent::SelectionChanged {
            selected: self.selected_in_layer_order(),
        }
        .publish(&self.bus, EVENT_SOURCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use stickerdash_core::events;

    fn session_with(ids: &[&str]) -> Dashboard {
        let mut dashboard = Dashboard::new();
        for (i, id) in ids.iter().enumerate() {
            dashboard.place_sticker(Sticker::new(*id, Point::new(i as f64 * 100.0, 0.0)));
        }
        dashboard
    }

    fn count_events(dashboard: &Dashboard, event_type: &str) -> usize {
        dashboard
            .bus()
            .history()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    #[test]
    fn test_place_announces_on_bus() {
        let dashboard = session_with(&["s1"]);

        let history = dashboard.bus().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_type, events::STICKER_PLACED);
        assert_eq!(history[0].source.as_deref(), Some("dashboard"));
    }

    #[test]
    fn test_toggle_selection_announces() {
        let mut dashboard = session_with(&["s1"]);

        assert!(dashboard.toggle_selection("s1", false));
        assert_eq!(count_events(&dashboard, events::SELECTION_CHANGED), 1);

        let last = dashboard.bus().history().pop().unwrap();
        let decoded = DashboardEvent::from_event(&last).unwrap();
        assert_eq!(
            decoded,
            DashboardEvent::SelectionChanged {
                selected: vec!["s1".to_string()]
            }
        );
    }

    #[test]
    fn test_click_outside_multi_select_forwards() {
        let mut dashboard = session_with(&["s1"]);

        let mut clicked = None;
        let outcome = dashboard.sticker_click("s1", false, |id| clicked = Some(id.to_string()));

        assert_eq!(outcome, ClickOutcome::Forwarded);
        assert_eq!(clicked.as_deref(), Some("s1"));
        assert!(dashboard.selection.is_empty());
        assert_eq!(count_events(&dashboard, events::SELECTION_CHANGED), 0);
    }

    #[test]
    fn test_click_in_multi_select_reports_add_transition_only() {
        let mut dashboard = session_with(&["s1", "s2"]);
        dashboard.selection.set_multi_select(true);

        let added = dashboard.sticker_click("s1", true, |_| unreachable!());
        assert_eq!(added, ClickOutcome::Toggled { added: true });

        let removed = dashboard.sticker_click("s1", true, |_| unreachable!());
        assert_eq!(removed, ClickOutcome::Toggled { added: false });

        assert_eq!(count_events(&dashboard, events::SELECTION_CHANGED), 2);
    }

    #[test]
    fn test_click_in_multi_select_without_shift_replaces() {
        let mut dashboard = session_with(&["s1", "s2"]);
        dashboard.selection.set_multi_select(true);

        dashboard.sticker_click("s1", true, |_| unreachable!());
        dashboard.sticker_click("s2", false, |_| unreachable!());

        assert!(!dashboard.selection.is_selected("s1"));
        assert!(dashboard.selection.is_selected("s2"));
    }

    #[test]
    fn test_remove_sticker_deselects_and_announces() {
        let mut dashboard = session_with(&["s1"]);
        dashboard.toggle_selection("s1", false);

        assert!(dashboard.remove_sticker("s1"));
        assert!(dashboard.selection.is_empty());
        assert_eq!(count_events(&dashboard, events::STICKER_REMOVED), 1);
        assert_eq!(count_events(&dashboard, events::SELECTION_CHANGED), 2);

        assert!(!dashboard.remove_sticker("s1"));
    }

    #[test]
    fn test_group_selected_announces_members() {
        let mut dashboard = session_with(&["s1", "s2", "s3"]);
        dashboard.toggle_selection("s1", true);
        dashboard.toggle_selection("s2", true);

        let group_id = dashboard.group_selected().unwrap();
        assert_eq!(dashboard.board.group_members(group_id).len(), 2);

        let last = dashboard.bus().history().pop().unwrap();
        assert_eq!(last.event_type, events::GROUP_CREATED);
        let decoded = DashboardEvent::from_event(&last).unwrap();
        assert_eq!(
            decoded,
            DashboardEvent::GroupCreated {
                group_id,
                members: vec!["s1".to_string(), "s2".to_string()]
            }
        );
    }

    #[test]
    fn test_group_selected_rejects_singleton() {
        let mut dashboard = session_with(&["s1"]);
        dashboard.toggle_selection("s1", false);

        assert!(dashboard.group_selected().is_none());
        assert_eq!(count_events(&dashboard, events::GROUP_CREATED), 0);
    }

    #[test]
    fn test_ungroup_selected_one_event_per_group() {
        let mut dashboard = session_with(&["s1", "s2"]);
        dashboard.toggle_selection("s1", true);
        dashboard.toggle_selection("s2", true);
        dashboard.group_selected().unwrap();

        let dissolved = dashboard.ungroup_selected();
        assert_eq!(dissolved.len(), 2);
        assert_eq!(count_events(&dashboard, events::GROUP_DISSOLVED), 1);
        assert!(dashboard.board.get_sticker("s1").unwrap().group_id.is_none());
    }

    #[test]
    fn test_delete_selected_collapses_leftover_group() {
        let mut dashboard = session_with(&["s1", "s2", "s3"]);
        dashboard.toggle_selection("s1", true);
        dashboard.toggle_selection("s2", true);
        dashboard.group_selected().unwrap();

        // Keep only s1 selected, then delete it; s2 is stranded alone in
        // the group and must come out ungrouped.
        dashboard.toggle_selection("s2", true);
        assert_eq!(dashboard.delete_selected(), 1);

        assert!(dashboard.board.get_sticker("s1").is_none());
        assert!(dashboard.board.get_sticker("s2").unwrap().group_id.is_none());
        assert!(dashboard.selection.is_empty());
        assert_eq!(count_events(&dashboard, events::STICKER_REMOVED), 1);
    }

    #[test]
    fn test_delete_selected_clears_ids_missing_from_board() {
        let mut dashboard = session_with(&["s1"]);
        dashboard.toggle_selection("missing", false);

        // Nothing to remove, but the stale selection still empties and
        // observers hear about it.
        assert_eq!(dashboard.delete_selected(), 0);
        assert!(dashboard.selection.is_empty());
        assert_eq!(count_events(&dashboard, events::STICKER_REMOVED), 0);
        assert_eq!(count_events(&dashboard, events::SELECTION_CHANGED), 2);
    }

    #[test]
    fn test_move_selected_moves_shared_group_once() {
        let mut dashboard = session_with(&["s1", "s2"]);
        dashboard.toggle_selection("s1", true);
        dashboard.toggle_selection("s2", true);
        dashboard.group_selected().unwrap();

        let moved = dashboard.move_selected(Vec2::new(10.0, 0.0));
        assert_eq!(moved.len(), 2);
        assert_eq!(count_events(&dashboard, events::STICKER_MOVED), 1);

        let s1 = dashboard.board.get_sticker("s1").unwrap();
        let s2 = dashboard.board.get_sticker("s2").unwrap();
        assert!((s1.position.x - 10.0).abs() < f64::EPSILON);
        assert!((s2.position.x - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_bounds_through_session() {
        let mut dashboard = Dashboard::new();
        dashboard.place_sticker(Sticker::new("s1", Point::new(100.0, 100.0)));
        dashboard.toggle_selection("s1", false);

        let rect = dashboard.selection_bounds().unwrap();
        assert!((rect.x0 - 90.0).abs() < f64::EPSILON);
        assert!((rect.width() - 80.0).abs() < f64::EPSILON);

        dashboard.clear_selection();
        assert!(dashboard.selection_bounds().is_none());
    }

    #[test]
    fn test_alt_l_toggles_layer_panel() {
        let mut dashboard = Dashboard::new();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };

        assert!(!dashboard.layer_panel_open());
        assert!(dashboard.handle_key("l", alt));
        assert!(dashboard.layer_panel_open());
        assert!(dashboard.handle_key("L", alt));
        assert!(!dashboard.layer_panel_open());

        // Without Alt, or with the platform key held, the press is left
        // for the host.
        assert!(!dashboard.handle_key("L", Modifiers::default()));
        assert!(!dashboard.handle_key(
            "L",
            Modifiers {
                alt: true,
                meta: true,
                ..Modifiers::default()
            }
        ));
        assert!(!dashboard.layer_panel_open());
    }

    #[test]
    fn test_widgets_observe_selection_through_bus() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut dashboard = session_with(&["s1"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let bus = dashboard.bus();
        let _sub = bus.on(events::SELECTION_CHANGED, move |event| {
            if let Ok(DashboardEvent::SelectionChanged { selected }) =
                DashboardEvent::from_event(event)
            {
                sink.borrow_mut().push(selected.len());
            }
        });

        dashboard.toggle_selection("s1", false);
        dashboard.clear_selection();

        assert_eq!(*seen.borrow(), vec![1, 0]);
    }
}
