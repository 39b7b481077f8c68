//! Input event types for the Autocam event stream.
//!
//! Events are produced by the recording session and persisted as a single
//! versioned JSON document (`{"schemaVersion": 1, "events": [...]}`).
//! Positions are in capture-pixel space; timestamps are seconds since the
//! start of the recording.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Seconds since recording start.
pub type TimestampSecs = f64;

/// Event log schema version this crate reads and writes.
pub const EVENT_LOG_SCHEMA_VERSION: u32 = 1;

/// Kind of a recorded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputEventKind {
    /// Pointer position update.
    CursorMoved,
    /// Mouse button pressed.
    MouseDown,
    /// Mouse button released.
    MouseUp,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

/// A single recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// The event kind.
    #[serde(rename = "type")]
    pub kind: InputEventKind,

    /// Seconds since recording start.
    pub timestamp: TimestampSecs,

    /// Pointer position in capture pixels.
    pub position: Point2D,

    /// Button involved, for press/release events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<MouseButton>,
}

impl InputEvent {
    /// Create a cursor move event.
    pub fn cursor_moved(timestamp: TimestampSecs, x: f64, y: f64) -> Self {
        Self {
            kind: InputEventKind::CursorMoved,
            timestamp,
            position: Point2D::new(x, y),
            button: None,
        }
    }

    /// Create a button press event.
    pub fn mouse_down(timestamp: TimestampSecs, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            kind: InputEventKind::MouseDown,
            timestamp,
            position: Point2D::new(x, y),
            button: Some(button),
        }
    }

    /// Create a button release event.
    pub fn mouse_up(timestamp: TimestampSecs, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            kind: InputEventKind::MouseUp,
            timestamp,
            position: Point2D::new(x, y),
            button: Some(button),
        }
    }

    /// Whether timestamp and position are all finite numbers.
    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.position.is_finite()
    }
}

/// Versioned event log written by a recording session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    /// Schema version for forward compatibility.
    pub schema_version: u32,

    /// Recorded events, oldest first.
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl EventLog {
    /// Create a log at the current schema version.
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            schema_version: EVENT_LOG_SCHEMA_VERSION,
            events,
        }
    }

    /// Whether events are in nondecreasing timestamp order.
    pub fn is_time_ordered(&self) -> bool {
        self.events
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    }

    /// Stable-sort events by timestamp.
    ///
    /// Consumers expect time-ordered input; call this when loading logs
    /// written by trackers that may interleave sources.
    pub fn sort_by_time(&mut self) {
        self.events
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }

    /// Latest timestamp in the log, if any.
    pub fn last_timestamp(&self) -> Option<TimestampSecs> {
        self.events
            .iter()
            .map(|e| e.timestamp)
            .filter(|t| t.is_finite())
            .reduce(f64::max)
    }
}

/// Errors raised while loading an event log.
#[derive(Debug, thiserror::Error)]
pub enum EventLogError {
    #[error("Malformed event log: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported event log schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
}

/// Parse an event log document and check its schema version.
pub fn parse_event_log(json: &str) -> Result<EventLog, EventLogError> {
    let log: EventLog = serde_json::from_str(json)?;
    if log.schema_version != EVENT_LOG_SCHEMA_VERSION {
        return Err(EventLogError::UnsupportedSchema {
            found: log.schema_version,
            expected: EVENT_LOG_SCHEMA_VERSION,
        });
    }
    Ok(log)
}

/// Serialize an event log to pretty JSON.
pub fn serialize_event_log(log: &EventLog) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_matches_recorder() {
        let event = InputEvent::mouse_down(1.25, 10.0, 20.0, MouseButton::Left);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"mouseDown\""));
        assert!(json.contains("\"timestamp\":1.25"));
        assert!(json.contains("\"position\":{\"x\":10.0,\"y\":20.0}"));
        assert!(json.contains("\"button\":\"left\""));

        let moved = serde_json::to_string(&InputEvent::cursor_moved(0.5, 1.0, 2.0)).unwrap();
        assert!(moved.contains("\"type\":\"cursorMoved\""));
        assert!(!moved.contains("button"));
    }

    #[test]
    fn test_parse_event_log() {
        let json = r#"{
            "schemaVersion": 1,
            "events": [
                {"type":"cursorMoved","timestamp":0.0,"position":{"x":5,"y":6}},
                {"type":"mouseDown","timestamp":0.4,"position":{"x":5,"y":6},"button":"left"},
                {"type":"mouseUp","timestamp":0.5,"position":{"x":5,"y":6},"button":"left"}
            ]
        }"#;
        let log = parse_event_log(json).unwrap();
        assert_eq!(log.events.len(), 3);
        assert_eq!(log.events[1].kind, InputEventKind::MouseDown);
        assert_eq!(log.events[2].button, Some(MouseButton::Left));
        assert!(log.is_time_ordered());
        assert_eq!(log.last_timestamp(), Some(0.5));
    }

    #[test]
    fn test_parse_rejects_unknown_schema() {
        let err = parse_event_log(r#"{"schemaVersion": 7, "events": []}"#).unwrap_err();
        assert!(matches!(
            err,
            EventLogError::UnsupportedSchema {
                found: 7,
                expected: 1
            }
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_event_log("{\"schemaVersion\": ").unwrap_err();
        assert!(matches!(err, EventLogError::Parse(_)));
    }

    #[test]
    fn test_sort_by_time_is_stable() {
        let mut log = EventLog::new(vec![
            InputEvent::cursor_moved(2.0, 0.0, 0.0),
            InputEvent::mouse_down(1.0, 1.0, 1.0, MouseButton::Left),
            InputEvent::cursor_moved(1.0, 2.0, 2.0),
        ]);
        assert!(!log.is_time_ordered());
        log.sort_by_time();
        assert!(log.is_time_ordered());
        assert_eq!(log.events[0].kind, InputEventKind::MouseDown);
        assert_eq!(log.events[1].position, Point2D::new(2.0, 2.0));
    }

    #[test]
    fn test_empty_log_has_no_last_timestamp() {
        let log = EventLog::new(vec![]);
        assert_eq!(log.last_timestamp(), None);
        let text = serialize_event_log(&log).unwrap();
        assert!(text.contains("\"schemaVersion\": 1"));
    }
}
