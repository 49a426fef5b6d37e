//! Bounded log of bridge exchanges for debugging.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Direction of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Send,
    Receive,
}

/// One body that went to or came from the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub msg_type: MessageType,
    /// HTTP method and resource, e.g. `PUT /lights/1/state`
    pub endpoint: String,
    pub message: Value,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Requests sent to a bridge, what came back, and the last failure.
///
/// Only the newest `max_entries` messages are kept. The latest body per
/// endpoint and direction survives eviction from that window.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use hue_lights_rs::{MessageHistory, MessageType};
///
/// let mut history = MessageHistory::with_max_entries(10);
/// history.record(MessageType::Send, "GET /lights", &json!(null));
/// history.record(MessageType::Receive, "GET /lights", &json!({}));
/// history.record_error("GET /groups", "connection refused");
///
/// let summary = history.summary();
/// assert_eq!(summary.total_entries, 2);
/// assert_eq!(summary.error_count, 1);
/// assert_eq!(history.last_error(), Some("GET /groups: connection refused"));
/// ```
#[derive(Debug, Clone)]
pub struct MessageHistory {
    latest: HashMap<(MessageType, String), Value>,
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
    last_error: Option<String>,
    error_count: usize,
    start_time: Instant,
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self::with_max_entries(Self::DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        MessageHistory {
            latest: HashMap::new(),
            entries: VecDeque::with_capacity(max_entries.min(Self::DEFAULT_MAX_ENTRIES)),
            max_entries,
            last_error: None,
            error_count: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, msg_type: MessageType, endpoint: &str, message: &Value) {
        self.latest
            .insert((msg_type, endpoint.to_string()), message.clone());

        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            msg_type,
            endpoint: endpoint.to_string(),
            message: message.clone(),
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });
    }

    /// Remember a failed exchange with `endpoint`.
    pub fn record_error(&mut self, endpoint: &str, error: &str) {
        self.last_error = Some(format!("{endpoint}: {error}"));
        self.error_count += 1;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Most recent body of the given direction for an endpoint.
    pub fn latest(&self, msg_type: MessageType, endpoint: &str) -> Option<&Value> {
        self.latest.get(&(msg_type, endpoint.to_string()))
    }

    /// Kept messages, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.latest.clear();
        self.entries.clear();
        self.last_error = None;
        self.error_count = 0;
    }

    pub fn summary(&self) -> HistorySummary {
        let endpoints = |t: MessageType| self.latest.keys().filter(|(k, _)| *k == t).count();
        HistorySummary {
            send_count: endpoints(MessageType::Send),
            receive_count: endpoints(MessageType::Receive),
            error_count: self.error_count,
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Summary of message history for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Distinct endpoints requests were sent to
    pub send_count: usize,
    /// Distinct endpoints responses came back from
    pub receive_count: usize,
    pub error_count: usize,
    pub total_entries: usize,
    pub last_error: Option<String>,
}
