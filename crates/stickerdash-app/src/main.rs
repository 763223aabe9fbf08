//! Main application entry point: a scripted dashboard session.

use kurbo::{Point, Vec2};
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::rc::Rc;
use stickerdash_app::{Dashboard, ShortcutRegistry};
use stickerdash_core::{merge_state, Sticker, Widget, WidgetData, WILDCARD};

/// A small widget that counts how often it is triggered.
struct CounterWidget {
    state: Map<String, Value>,
}

impl CounterWidget {
    fn new() -> Self {
        Self { state: Map::new() }
    }
}

impl Widget for CounterWidget {
    fn init(&mut self) {
        self.state.entry("count".to_string()).or_insert(json!(0));
    }

    fn state(&self) -> Map<String, Value> {
        self.state.clone()
    }

    fn set_state(&mut self, partial: Map<String, Value>) {
        merge_state(&mut self.state, partial);
    }

    fn trigger(&mut self, action: &str, _payload: Option<&Value>) {
        if action == "increment" {
            let count = self.state.get("count").and_then(Value::as_i64).unwrap_or(0);
            self.state.insert("count".to_string(), json!(count + 1));
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting StickerDash");

    ShortcutRegistry::print_all();

    let mut dashboard = Dashboard::new();

    // Tap everything the session announces.
    let bus = dashboard.bus();
    let _tap = bus.on(WILDCARD, |event| {
        log::info!("bus: {} {}", event.event_type, event.payload);
    });

    // Register a live widget plus its panel card.
    dashboard
        .registry
        .register("counter", Rc::new(RefCell::new(CounterWidget::new())));
    dashboard
        .registry
        .register_data("counter", WidgetData::new("Counter", "Counts things"));

    // Lay out a few stickers.
    dashboard.place_sticker(Sticker::new("s1", Point::new(100.0, 100.0)));
    dashboard.place_sticker(Sticker::new("s2", Point::new(220.0, 100.0)));
    dashboard.place_sticker(Sticker::new("s3", Point::new(100.0, 220.0)));

    // Select two, box them, group them, drag the group.
    dashboard.toggle_selection("s1", false);
    dashboard.toggle_selection("s2", true);
    if let Some(rect) = dashboard.selection_bounds() {
        log::info!(
            "selection box at ({}, {}), {}x{}",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
    }
    if dashboard.group_selected().is_some() {
        dashboard.move_selected(Vec2::new(24.0, 0.0));
    }

    // Poke the widget through the registry.
    if let Some(widget) = dashboard.registry.get("counter") {
        widget.borrow_mut().trigger("increment", None);
        widget.borrow_mut().trigger("increment", None);
        log::info!("counter state: {:?}", widget.borrow().state());
    }

    log::info!("session emitted {} events", dashboard.bus().history().len());
}
