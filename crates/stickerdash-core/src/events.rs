//! Typed catalog of the dashboard's own bus events.
//!
//! Every event the session layer emits has a variant here, so consumers can
//! decode payloads without poking at raw JSON. Events outside this catalog
//! are still legal bus traffic; an arbitrary `serde_json::Value` payload is
//! the deliberate escape hatch for widget-to-widget messages with no fixed
//! shape.

use crate::bus::{Event, EventBus};
use crate::sticker::{GroupId, StickerId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A sticker landed on the board.
pub const STICKER_PLACED: &str = "sticker.placed";
/// A sticker left the board.
pub const STICKER_REMOVED: &str = "sticker.removed";
/// One or more stickers were translated.
pub const STICKER_MOVED: &str = "sticker.moved";
/// The selected set changed.
pub const SELECTION_CHANGED: &str = "selection.changed";
/// Stickers were grouped under a fresh id.
pub const GROUP_CREATED: &str = "group.created";
/// A group was dissolved.
pub const GROUP_DISSOLVED: &str = "group.dissolved";

/// Dashboard events with typed payloads.
///
/// The serde tag mirrors the bus event type, so a serialized payload is
/// self-describing and decodes back to the right variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardEvent {
    /// Payload of [`STICKER_PLACED`].
    #[serde(rename = "sticker.placed")]
    StickerPlaced { id: StickerId, x: f64, y: f64 },
    /// Payload of [`STICKER_REMOVED`].
    #[serde(rename = "sticker.removed")]
    StickerRemoved { id: StickerId },
    /// Payload of [`STICKER_MOVED`].
    #[serde(rename = "sticker.moved")]
    StickerMoved {
        ids: Vec<StickerId>,
        dx: f64,
        dy: f64,
    },
    /// Payload of [`SELECTION_CHANGED`].
    #[serde(rename = "selection.changed")]
    SelectionChanged { selected: Vec<StickerId> },
    /// Payload of [`GROUP_CREATED`].
    #[serde(rename = "group.created")]
    GroupCreated {
        group_id: GroupId,
        members: Vec<StickerId>,
    },
    /// Payload of [`GROUP_DISSOLVED`].
    #[serde(rename = "group.dissolved")]
    GroupDissolved {
        group_id: GroupId,
        members: Vec<StickerId>,
    },
}

impl DashboardEvent {
    /// The bus event type this payload travels under.
    pub fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::StickerPlaced { .. } => STICKER_PLACED,
            DashboardEvent::StickerRemoved { .. } => STICKER_REMOVED,
            DashboardEvent::StickerMoved { .. } => STICKER_MOVED,
            DashboardEvent::SelectionChanged { .. } => SELECTION_CHANGED,
            DashboardEvent::GroupCreated { .. } => GROUP_CREATED,
            DashboardEvent::GroupDissolved { .. } => GROUP_DISSOLVED,
        }
    }

    /// Serialize into a bus payload.
    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Emit this event on the bus, attributed to `source`. A payload that
    /// fails to serialize is logged and dropped rather than propagated; a
    /// faulty catalog entry must not break the caller.
    pub fn publish(&self, bus: &EventBus, source: &str) {
        match self.to_payload() {
            Ok(payload) => bus.emit_from(source, self.event_type(), payload),
            Err(err) => log::error!("failed to serialize `{}` payload: {err}", self.event_type()),
        }
    }

    /// Decode a bus event back into its catalog variant.
    pub fn from_event(event: &Event) -> Result<Self, PayloadError> {
        match event.event_type.as_str() {
            STICKER_PLACED | STICKER_REMOVED | STICKER_MOVED | SELECTION_CHANGED
            | GROUP_CREATED | GROUP_DISSOLVED => {
                let parsed: DashboardEvent = serde_json::from_value(event.payload.clone())?;
                if parsed.event_type() != event.event_type {
                    return Err(PayloadError::TypeMismatch {
                        expected: event.event_type.clone(),
                        actual: parsed.event_type(),
                    });
                }
                Ok(parsed)
            }
            other => Err(PayloadError::UnknownType(other.to_string())),
        }
    }
}

/// Failure to read a typed payload out of a bus event.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The event type has no catalog entry.
    #[error("no typed payload for event type `{0}`")]
    UnknownType(String),
    /// The payload belongs to a different event type than the envelope claims.
    #[error("event typed `{expected}` carried a `{actual}` payload")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },
    /// The payload did not deserialize.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn event_of(event_type: &str, payload: Value) -> Event {
        Event {
            event_type: event_type.to_string(),
            payload,
            source: None,
            timestamp: 0,
        }
    }

    #[test]
    fn test_event_type_names() {
        let event = DashboardEvent::SelectionChanged {
            selected: vec!["a".into()],
        };
        assert_eq!(event.event_type(), SELECTION_CHANGED);

        let event = DashboardEvent::GroupCreated {
            group_id: Uuid::new_v4(),
            members: vec![],
        };
        assert_eq!(event.event_type(), GROUP_CREATED);
    }

    #[test]
    fn test_payload_roundtrip() {
        let original = DashboardEvent::StickerPlaced {
            id: "s1".into(),
            x: 40.0,
            y: 80.0,
        };
        let payload = original.to_payload().unwrap();
        let event = event_of(STICKER_PLACED, payload);

        let decoded = DashboardEvent::from_event(&event).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_type_mismatch() {
        let payload = DashboardEvent::SelectionChanged { selected: vec![] }
            .to_payload()
            .unwrap();
        let event = event_of(STICKER_PLACED, payload);

        let err = DashboardEvent::from_event(&event).unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { .. }));
    }

    #[test]
    fn test_decode_unknown_type() {
        let event = event_of("widget.custom", json!({ "anything": true }));

        let err = DashboardEvent::from_event(&event).unwrap_err();
        assert!(matches!(err, PayloadError::UnknownType(_)));
    }

    #[test]
    fn test_decode_malformed_payload() {
        let event = event_of(STICKER_PLACED, json!({ "type": "sticker.placed" }));

        let err = DashboardEvent::from_event(&event).unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn test_publish_lands_on_bus() {
        let bus = EventBus::new();
        DashboardEvent::StickerRemoved { id: "s1".into() }.publish(&bus, "toolbar");

        let history = bus.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_type, STICKER_REMOVED);
        assert_eq!(history[0].source.as_deref(), Some("toolbar"));
    }
}
