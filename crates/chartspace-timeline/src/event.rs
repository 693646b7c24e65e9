#![forbid(unsafe_code)]

//! Normalized timeline event shape.

use serde::{Deserialize, Serialize};

/// One label/value row under an event (a lab component, a vital sign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubItem {
    /// Display label.
    pub label: String,
    /// Display value.
    pub value: String,
}

impl SubItem {
    /// Create a sub-item.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A normalized, display-ready representation of one clinical record.
///
/// Events are recomputed from the source collections on demand and never
/// persisted; the serde impls exist for exporting a rendered timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier, unique across source kinds.
    pub id: String,
    /// Category tag; two-level hierarchy is expressed as `parent_child`.
    pub category: String,
    /// Row title.
    pub title: String,
    /// ISO-ish timestamp string from the source record.
    pub timestamp: String,
    /// Secondary display line.
    pub details: String,
    /// Optional attention tag, e.g. `"Abnormal"`.
    pub tag: Option<String>,
    /// Resolved author/provider display name.
    pub author: String,
    /// Label/value rows shown under the event.
    pub sub_items: Vec<SubItem>,
}
