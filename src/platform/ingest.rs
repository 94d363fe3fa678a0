//! In-memory log of raw sensor hits and the log channel message type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: u64 = 60_000;

/// One ingested request: arrival time plus its query parameters verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unix timestamp (ms) when received
    #[serde(rename = "date")]
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
}

impl LogEntry {
    pub fn to_json(&self) -> String {
        // Map of strings plus an integer cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Advisory message on the log channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl LogMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: "info".to_string(),
            message: message.into(),
        }
    }

    pub fn data(entry: &LogEntry) -> Self {
        Self {
            kind: "data".to_string(),
            message: entry.to_json(),
        }
    }
}

/// Append-only log of ingested samples (until cleared)
#[derive(Debug, Clone, Default)]
pub struct SampleLog {
    entries: Vec<LogEntry>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamp and store a set of query parameters
    pub fn ingest<I, K, V>(&mut self, params: I, now_ms: u64) -> LogEntry
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (k, v) in params {
            let key = k.into();
            if key == "date" {
                // Reserved for the arrival timestamp
                log::debug!("Dropping reserved query parameter 'date'");
                continue;
            }
            map.insert(key, v.into());
        }
        let entry = LogEntry {
            timestamp_ms: now_ms,
            params: map,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Entries younger than `window_minutes` (all entries when None or 0)
    pub fn within(&self, window_minutes: Option<u64>, now_ms: u64) -> impl Iterator<Item = &LogEntry> {
        let window_ms = window_minutes.unwrap_or(0).saturating_mul(MS_PER_MINUTE);
        self.entries
            .iter()
            .filter(move |e| window_ms == 0 || now_ms.saturating_sub(e.timestamp_ms) < window_ms)
    }

    /// Dump page body and the number of entries listed
    ///
    /// `interval` is the raw query value; a non-numeric interval lists everything.
    pub fn render_dump(&self, interval: Option<&str>, now_ms: u64) -> (String, usize) {
        let mut out = match interval.filter(|s| !s.is_empty()) {
            Some(raw) => format!("<p>Showing data from the last {} minutes.</p><p>", raw),
            None => String::from("<p>"),
        };
        let window = interval.and_then(parse_minutes);

        let mut count = 0;
        for entry in self.within(window, now_ms) {
            out.push_str(&entry.to_json());
            out.push_str("<br>");
            count += 1;
        }
        if count == 0 {
            out.push_str("no data");
        }
        out.push_str("</p>");
        (out, count)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Leading integer of an interval parameter ("15min" -> 15)
fn parse_minutes(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
