//! Records exchanged with storage and import/export.
//! Timestamps are kept as ISO-8601 strings and only parsed when a record is
//! turned into a [`Timer`](super::timer::Timer).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub created_on: String,
    #[serde(default)]
    pub started_on: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub logged_on: String,
    #[serde(default)]
    pub manually: bool,
    pub value: i64,
}

impl TimerRecord {
    /// Same record with ids stripped, so it is saved as a new timer.
    pub fn detached(&self) -> Self {
        Self {
            id: None,
            entries: self
                .entries
                .iter()
                .map(|e| EntryRecord {
                    id: None,
                    ..e.clone()
                })
                .collect(),
            ..self.clone()
        }
    }
}
