//! StickerDash Core Library
//!
//! State coordination for the sticker dashboard: the event bus, the widget
//! registry, and the selection/grouping model the UI layers observe.

pub mod board;
pub mod bounds;
pub mod bus;
pub mod events;
pub mod registry;
pub mod selection;
pub mod sticker;

pub use board::StickerBoard;
pub use bounds::{selection_bounds, SELECTION_PADDING};
pub use bus::{Event, EventBus, Subscription, DEFAULT_HISTORY_CAPACITY, WILDCARD};
pub use events::{DashboardEvent, PayloadError};
pub use registry::{merge_state, Widget, WidgetData, WidgetHandle, WidgetRegistry};
pub use selection::SelectionModel;
pub use sticker::{GroupId, Sticker, StickerId, DEFAULT_STICKER_SIZE};
